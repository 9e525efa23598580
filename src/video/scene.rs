use crate::video::{read_diff_csv, FrameDiffSample};
use std::path::Path;
use tracing::warn;

/// A moment judged to be a camera cut, in seconds from the start of the
/// recording. Break sets are strictly increasing and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBreak {
    pub time: f64,
}

/// Threshold the frame-diff series into scene breaks. A sample becomes a
/// break when its ratio strictly exceeds `threshold`.
pub fn extract_scene_breaks(samples: &[FrameDiffSample], threshold: f64) -> Vec<SceneBreak> {
    samples
        .iter()
        .filter(|sample| sample.diff_ratio > threshold)
        .map(|sample| SceneBreak {
            time: sample.second as f64,
        })
        .collect()
}

/// Load scene breaks for a recording from its frame-diff CSV.
///
/// A missing or unreadable diff file means the video signal is absent for
/// this recording, which degrades segmentation but does not fail it: the
/// merger runs on the silence rule alone.
pub fn load_scene_breaks(diff_path: &Path, threshold: f64) -> Vec<SceneBreak> {
    if !diff_path.exists() {
        warn!("frame-diff file does not exist: {}", diff_path.display());
        return Vec::new();
    }
    match read_diff_csv(diff_path) {
        Ok(samples) => extract_scene_breaks(&samples, threshold),
        Err(e) => {
            warn!("failed to read {}: {}", diff_path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(second: u64, diff_ratio: f64) -> FrameDiffSample {
        FrameDiffSample { second, diff_ratio }
    }

    #[test]
    fn test_threshold_is_strict() {
        let samples = vec![sample(0, 0.1), sample(1, 0.6), sample(2, 0.2)];
        let breaks = extract_scene_breaks(&samples, 0.5);
        assert_eq!(breaks, vec![SceneBreak { time: 1.0 }]);

        // A ratio exactly at the threshold is not a break.
        let samples = vec![sample(0, 0.5)];
        assert!(extract_scene_breaks(&samples, 0.5).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_scene_breaks(&[], 0.5).is_empty());
    }

    #[test]
    fn test_breaks_keep_order() {
        let samples = vec![sample(3, 0.9), sample(10, 0.8), sample(42, 0.7)];
        let breaks = extract_scene_breaks(&samples, 0.5);
        let times: Vec<f64> = breaks.iter().map(|b| b.time).collect();
        assert_eq!(times, vec![3.0, 10.0, 42.0]);
    }

    #[test]
    fn test_missing_file_yields_empty_set() {
        let breaks = load_scene_breaks(Path::new("/nonexistent/rec.diff"), 0.5);
        assert!(breaks.is_empty());
    }
}
