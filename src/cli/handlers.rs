use crate::cli::commands::*;
use crate::config;
use crate::config::HansardConfig;
use crate::error::{HansardError, Result};
use crate::segmentation::assembler::assemble_paragraphs;
use crate::segmentation::merger::merge;
use crate::transcription::loader::load_voice_fragments;
use crate::transcription::punctuation::PunctuationNormalizer;
use crate::video::frame_diff::FrameDiffEstimator;
use crate::video::scene::load_scene_breaks;
use crate::video::write_diff_csv;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Diff { video, out } => handle_diff(video, out).await,
        Commands::Segment {
            id,
            dir,
            gap_threshold,
            diff_threshold,
        } => handle_segment(id, dir, gap_threshold, diff_threshold).await,
        Commands::Config { action } => handle_config(action).await,
    }
}

async fn handle_diff(video: PathBuf, out: PathBuf) -> Result<()> {
    let config = config::load_config()?;
    let estimator = FrameDiffEstimator::new(
        config.video.pixel_tolerance,
        config.video.sample_interval_secs,
    );

    // Decoding a corrupt or truncated file can stall; bound it so a batch
    // caller is never stuck on one recording.
    let timeout = Duration::from_secs(config.video.decode_timeout_secs);
    let video_for_task = video.clone();
    let task = tokio::task::spawn_blocking(move || estimator.estimate(&video_for_task));
    let samples = match tokio::time::timeout(timeout, task).await {
        Ok(joined) => joined
            .map_err(|e| HansardError::MediaRead(format!("decode task failed: {e}")))??,
        Err(_) => {
            return Err(HansardError::MediaRead(format!(
                "decoding {} exceeded {}s",
                video.display(),
                timeout.as_secs()
            )))
        }
    };

    write_diff_csv(&out, &samples)?;
    println!(
        "Saved {} frame-diff samples to {}",
        samples.len(),
        out.display()
    );
    Ok(())
}

async fn handle_segment(
    id: Option<String>,
    dir: Option<PathBuf>,
    gap_threshold: Option<f64>,
    diff_threshold: Option<f64>,
) -> Result<()> {
    let config = config::load_config()?;
    let recordings_dir = match dir {
        Some(dir) => dir,
        None => config::loader::recordings_dir(&config)?,
    };
    let gap_threshold = gap_threshold.unwrap_or(config.segmentation.silence_gap_secs);
    let diff_threshold = diff_threshold.unwrap_or(config.video.diff_threshold);

    let ids = match id {
        Some(id) => vec![id],
        None => pending_recording_ids(&recordings_dir)?,
    };
    info!("found {} recordings to process", ids.len());

    let normalizer = PunctuationNormalizer::new(
        &config.punctuation.sentence_suffixes,
        &config.punctuation.terminal_mark,
    );

    let mut processed = 0usize;
    let mut failed = 0usize;
    for id in &ids {
        match process_recording(&recordings_dir, id, gap_threshold, diff_threshold, &normalizer) {
            Ok(paragraphs) => {
                processed += 1;
                println!("{}: {} paragraphs", id, paragraphs);
            }
            Err(e) => {
                failed += 1;
                error!("failed to process {}: {}", id, e);
            }
        }
    }

    println!("Processed {} recordings ({} failed)", processed, failed);
    Ok(())
}

/// IDs of recordings that have a transcription result but no paragraph output.
fn pending_recording_ids(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(HansardError::RecordingNotFound(dir.to_path_buf()));
    }
    let mut json_ids = BTreeSet::new();
    let mut done_ids = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let (Some(stem), Some(ext)) = (path.file_stem(), path.extension()) else {
            continue;
        };
        let stem = stem.to_string_lossy().into_owned();
        match ext.to_string_lossy().as_ref() {
            "json" => {
                json_ids.insert(stem);
            }
            "txt" => {
                done_ids.insert(stem);
            }
            _ => {}
        }
    }
    Ok(json_ids.difference(&done_ids).cloned().collect())
}

/// Segment one recording and write its paragraphs. Returns the paragraph
/// count. Failures here are isolated per recording by the caller.
fn process_recording(
    dir: &Path,
    id: &str,
    gap_threshold: f64,
    diff_threshold: f64,
    normalizer: &PunctuationNormalizer,
) -> Result<usize> {
    let json_path = dir.join(format!("{id}.json"));
    let diff_path = dir.join(format!("{id}.diff"));
    let out_path = dir.join(format!("{id}.txt"));

    let mut fragments = load_voice_fragments(&json_path)?;
    info!("loaded {} voice fragments from {}", fragments.len(), json_path.display());

    let breaks = load_scene_breaks(&diff_path, diff_threshold);
    info!("loaded {} scene breaks from {}", breaks.len(), diff_path.display());

    merge(&mut fragments, &breaks, gap_threshold);
    let flagged = fragments.iter().filter(|f| f.begins_paragraph).count();
    info!("flagged {} of {} fragments as paragraph starts", flagged, fragments.len());

    let paragraphs = assemble_paragraphs(&fragments, normalizer);
    let mut out = paragraphs.join("\n");
    out.push('\n');
    fs::write(&out_path, out)?;
    info!("saved {} paragraphs to {}", paragraphs.len(), out_path.display());

    Ok(paragraphs.len())
}

async fn handle_config(action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let config = config::load_config()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => {
            println!("{}", config::config_path()?.display());
        }
        ConfigCommands::Reset => {
            config::save_config(&HansardConfig::default())?;
            println!("Configuration reset to defaults");
        }
    }
    Ok(())
}
