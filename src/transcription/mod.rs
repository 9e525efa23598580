use serde::{Deserialize, Serialize};

pub mod loader;
pub mod punctuation;

/// One time-stamped unit of recognized speech text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceFragment {
    pub transcript: String,
    /// Start of the first word, in seconds from the beginning of the recording.
    pub start_time: f64,
    /// End of the last word, in seconds.
    pub end_time: f64,
    /// True when this fragment opens a new paragraph. Written only by the
    /// segmentation merger.
    pub begins_paragraph: bool,
}

impl VoiceFragment {
    pub fn new(transcript: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            transcript: transcript.into(),
            start_time,
            end_time,
            begins_paragraph: false,
        }
    }
}
