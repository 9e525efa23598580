use crate::error::{HansardError, Result};
use std::fs;
use std::path::Path;

pub mod frame_diff;
pub mod scene;

/// Pixel-difference ratio between the frame sampled at `second` and the
/// previous sampled frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDiffSample {
    pub second: u64,
    /// Fraction of pixel channels differing beyond tolerance, in [0, 1].
    pub diff_ratio: f64,
}

/// Write frame-diff samples as a two-column CSV (`sec,diff`), the interchange
/// format between the `diff` and `segment` subcommands.
pub fn write_diff_csv(path: &Path, samples: &[FrameDiffSample]) -> Result<()> {
    let mut out = String::from("sec,diff\n");
    for sample in samples {
        out.push_str(&format!("{},{}\n", sample.second, sample.diff_ratio));
    }
    fs::write(path, out)?;
    Ok(())
}

/// Read frame-diff samples back from CSV.
pub fn read_diff_csv(path: &Path) -> Result<Vec<FrameDiffSample>> {
    let data = fs::read_to_string(path)?;
    let mut lines = data.lines().enumerate();
    match lines.next() {
        Some((_, header)) if header.trim() == "sec,diff" => {}
        _ => {
            return Err(HansardError::MalformedDiffFile(
                "missing sec,diff header".to_string(),
            ))
        }
    }
    let mut samples = Vec::new();
    for (lineno, line) in lines {
        if line.is_empty() {
            continue;
        }
        let (sec, diff) = line.split_once(',').ok_or_else(|| {
            HansardError::MalformedDiffFile(format!("line {}: missing comma", lineno + 1))
        })?;
        let second = sec.trim().parse::<u64>().map_err(|e| {
            HansardError::MalformedDiffFile(format!("line {}: {}", lineno + 1, e))
        })?;
        let diff_ratio = diff.trim().parse::<f64>().map_err(|e| {
            HansardError::MalformedDiffFile(format!("line {}: {}", lineno + 1, e))
        })?;
        samples.push(FrameDiffSample { second, diff_ratio });
    }
    Ok(samples)
}
