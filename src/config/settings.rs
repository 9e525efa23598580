use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HansardConfig {
    #[serde(default)]
    pub video: VideoConfig,

    #[serde(default)]
    pub segmentation: SegmentationConfig,

    #[serde(default)]
    pub punctuation: PunctuationConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Per-channel intensity change (0-255) below which a pixel counts as unchanged
    #[serde(default = "default_pixel_tolerance")]
    pub pixel_tolerance: u8,
    /// Diff ratio above which a sampled second counts as a camera cut
    #[serde(default = "default_diff_threshold")]
    pub diff_threshold: f64,
    /// Seconds between sampled frames
    #[serde(default = "default_sample_interval")]
    pub sample_interval_secs: u64,
    /// Abort decoding a single video after this many seconds
    #[serde(default = "default_decode_timeout")]
    pub decode_timeout_secs: u64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            pixel_tolerance: default_pixel_tolerance(),
            diff_threshold: default_diff_threshold(),
            sample_interval_secs: default_sample_interval(),
            decode_timeout_secs: default_decode_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Silence longer than this (seconds) starts a new paragraph
    #[serde(default = "default_silence_gap")]
    pub silence_gap_secs: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            silence_gap_secs: default_silence_gap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunctuationConfig {
    /// Terminal punctuation mark appended to every fragment
    #[serde(default = "default_terminal_mark")]
    pub terminal_mark: String,
    /// Polite verb endings that close a sentence
    #[serde(default = "default_sentence_suffixes")]
    pub sentence_suffixes: Vec<String>,
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self {
            terminal_mark: default_terminal_mark(),
            sentence_suffixes: default_sentence_suffixes(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `<id>.json` / `<id>.diff` / `<id>.txt` files
    /// (None = XDG data dir)
    pub recordings_dir: Option<PathBuf>,
}

fn default_pixel_tolerance() -> u8 {
    10
}

fn default_diff_threshold() -> f64 {
    0.5
}

fn default_sample_interval() -> u64 {
    1
}

fn default_decode_timeout() -> u64 {
    600
}

fn default_silence_gap() -> f64 {
    3.0
}

fn default_terminal_mark() -> String {
    "。".to_string()
}

fn default_sentence_suffixes() -> Vec<String> {
    ["ました", "します", "きます", "います", "ります"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HansardConfig::default();
        assert_eq!(config.video.pixel_tolerance, 10);
        assert_eq!(config.video.diff_threshold, 0.5);
        assert_eq!(config.segmentation.silence_gap_secs, 3.0);
        assert_eq!(config.punctuation.terminal_mark, "。");
        assert_eq!(config.punctuation.sentence_suffixes.len(), 5);
        assert!(config.storage.recordings_dir.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: HansardConfig = toml::from_str(
            r#"
            [segmentation]
            silence_gap_secs = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(config.segmentation.silence_gap_secs, 5.0);
        assert_eq!(config.video.diff_threshold, 0.5);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = HansardConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: HansardConfig = toml::from_str(&toml).unwrap();
        assert_eq!(
            parsed.punctuation.sentence_suffixes,
            config.punctuation.sentence_suffixes
        );
    }
}
