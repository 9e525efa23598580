use crate::error::{HansardError, Result};
use crate::transcription::VoiceFragment;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Long-running speech recognition result, as saved by the transcription
/// fetcher. Only the fields the segmenter needs are modeled.
#[derive(Debug, Deserialize)]
struct TranscriptionFile {
    response: TranscriptionResponse,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
    confidence: Option<f64>,
    #[serde(default)]
    words: Vec<WordInfo>,
}

#[derive(Debug, Deserialize)]
struct WordInfo {
    #[serde(rename = "startTime")]
    start_time: String,
    #[serde(rename = "endTime")]
    end_time: String,
}

/// Parse a duration string of the form `"3.400s"`.
fn parse_time_str(time_str: &str) -> Result<f64> {
    time_str
        .strip_suffix('s')
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| {
            HansardError::MalformedTranscription(format!("invalid time string: {time_str:?}"))
        })
}

fn fragment_from_result(result: &RecognitionResult) -> Result<VoiceFragment> {
    // Ranked by confidence, keeping the earliest among ties so a response
    // without confidence values falls back to the recognizer's own ordering.
    let alternative = result
        .alternatives
        .iter()
        .fold(None::<&RecognitionAlternative>, |best, alt| match best {
            Some(b) if alt.confidence.unwrap_or(0.0) > b.confidence.unwrap_or(0.0) => Some(alt),
            Some(b) => Some(b),
            None => Some(alt),
        })
        .ok_or_else(|| {
            HansardError::MalformedTranscription("result has no alternatives".to_string())
        })?;

    let (Some(first_word), Some(last_word)) =
        (alternative.words.first(), alternative.words.last())
    else {
        return Err(HansardError::MalformedTranscription(
            "result has no word timings".to_string(),
        ));
    };

    Ok(VoiceFragment::new(
        alternative.transcript.clone(),
        parse_time_str(&first_word.start_time)?,
        parse_time_str(&last_word.end_time)?,
    ))
}

/// Load the ordered voice fragments of one recording from its transcription
/// result JSON. The final result entry is a non-content summary and is
/// dropped; results without word timings are skipped with a warning.
pub fn load_voice_fragments(json_path: &Path) -> Result<Vec<VoiceFragment>> {
    if !json_path.exists() {
        return Err(HansardError::RecordingNotFound(json_path.to_path_buf()));
    }
    let data = fs::read_to_string(json_path)?;
    let file: TranscriptionFile = serde_json::from_str(&data)?;

    let results = &file.response.results;
    let eligible = results.len().saturating_sub(1);

    let mut fragments = Vec::with_capacity(eligible);
    for (index, result) in results[..eligible].iter().enumerate() {
        match fragment_from_result(result) {
            Ok(fragment) => fragments.push(fragment),
            Err(e) => warn!("skipping result {} of {}: {}", index, json_path.display(), e),
        }
    }

    if fragments.is_empty() {
        return Err(HansardError::EmptyFragmentSequence);
    }
    Ok(fragments)
}
