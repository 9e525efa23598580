use crate::transcription::punctuation::PunctuationNormalizer;
use crate::transcription::VoiceFragment;

/// Concatenate normalized fragment text into paragraphs, splitting before
/// every fragment flagged by the merger. Pure function of its inputs.
pub fn assemble_paragraphs(
    fragments: &[VoiceFragment],
    normalizer: &PunctuationNormalizer,
) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut buffer = String::new();
    for fragment in fragments {
        if fragment.begins_paragraph && !buffer.is_empty() {
            paragraphs.push(std::mem::take(&mut buffer));
        }
        buffer.push_str(&normalizer.normalize(&fragment.transcript));
    }
    if !buffer.is_empty() {
        paragraphs.push(buffer);
    }
    paragraphs
}
