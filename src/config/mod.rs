pub mod loader;
pub mod settings;

pub use loader::{config_path, load_config, save_config};
pub use settings::HansardConfig;
