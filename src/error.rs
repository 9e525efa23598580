use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HansardError {
    #[error("Media read error: {0}")]
    MediaRead(String),

    #[error("Malformed transcription result: {0}")]
    MalformedTranscription(String),

    #[error("No usable voice fragments in recording")]
    EmptyFragmentSequence,

    #[error("Recording not found: {0}")]
    RecordingNotFound(PathBuf),

    #[error("Malformed frame-diff file: {0}")]
    MalformedDiffFile(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HansardError>;
