use crate::error::{HansardError, Result};
use crate::video::FrameDiffSample;
use std::path::Path;
use tracing::{debug, info};

/// Samples one frame per interval from a video and computes each sampled
/// frame's pixel-difference ratio against the previous sampled frame.
///
/// Legislative broadcast video switches cameras when the speaker changes, so
/// a second where many pixels moved is a strong speaker-change signal. The
/// ratio counts RGB channel values whose change exceeds `pixel_tolerance`,
/// which ignores sensor noise and compression shimmer.
pub struct FrameDiffEstimator {
    /// Per-channel intensity change (0-255) below which a pixel counts as
    /// unchanged.
    pub pixel_tolerance: u8,
    /// Seconds between sampled frames.
    pub sample_interval_secs: u64,
}

impl FrameDiffEstimator {
    pub fn new(pixel_tolerance: u8, sample_interval_secs: u64) -> Self {
        Self {
            pixel_tolerance,
            sample_interval_secs: sample_interval_secs.max(1),
        }
    }

    /// Decode `path` and produce the ordered per-second diff series.
    ///
    /// This decodes the whole file and should be called from a blocking
    /// context (the CLI wraps it in `spawn_blocking` with a timeout).
    pub fn estimate(&self, path: &Path) -> Result<Vec<FrameDiffSample>> {
        ffmpeg_next::init().map_err(|e| HansardError::MediaRead(e.to_string()))?;

        let path_str = path
            .to_str()
            .ok_or_else(|| HansardError::MediaRead("video path is not valid UTF-8".to_string()))?;

        let mut ictx = ffmpeg_next::format::input(&path_str)
            .map_err(|e| HansardError::MediaRead(format!("failed to open {path_str}: {e}")))?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| HansardError::MediaRead(format!("no video stream in {path_str}")))?;
        let stream_index = stream.index();
        let time_base = f64::from(stream.time_base());

        let mut decoder =
            ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
                .map_err(|e| HansardError::MediaRead(e.to_string()))?
                .decoder()
                .video()
                .map_err(|e| HansardError::MediaRead(e.to_string()))?;

        let width = decoder.width();
        let height = decoder.height();
        info!("decoding {path_str} ({width}x{height})");

        let mut scaler: Option<ffmpeg_next::software::scaling::Context> = None;
        let mut prev_rgb: Option<Vec<u8>> = None;
        let mut cursor = SampleCursor::new(self.sample_interval_secs);
        let mut samples = Vec::new();

        let mut process_decoded = |decoder: &mut ffmpeg_next::decoder::Video| -> Result<()> {
            let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
            while decoder.receive_frame(&mut decoded).is_ok() {
                // Best-effort timestamp; a frame without one cannot be
                // placed on the time axis and is dropped.
                let Some(ts) = decoded.timestamp().or_else(|| decoded.pts()) else {
                    debug!("skipping frame without timestamp");
                    continue;
                };
                let frame_time = (ts as f64 * time_base).max(0.0);
                let Some(second) = cursor.observe(frame_time) else {
                    continue;
                };

                if scaler.is_none() {
                    scaler = Some(
                        ffmpeg_next::software::scaling::Context::get(
                            decoded.format(),
                            width,
                            height,
                            ffmpeg_next::format::Pixel::RGB24,
                            width,
                            height,
                            ffmpeg_next::software::scaling::Flags::BILINEAR,
                        )
                        .map_err(|e| HansardError::MediaRead(e.to_string()))?,
                    );
                }

                let mut rgb_frame = ffmpeg_next::util::frame::video::Video::empty();
                scaler
                    .as_mut()
                    .unwrap()
                    .run(&decoded, &mut rgb_frame)
                    .map_err(|e| HansardError::MediaRead(e.to_string()))?;

                let rgb = flatten_rgb(&rgb_frame, width, height);
                let ratio = match prev_rgb {
                    Some(ref prev) => diff_ratio(prev, &rgb, self.pixel_tolerance),
                    None => 0.0,
                };
                debug!("second {second}: diff {ratio:.3}");
                samples.push(FrameDiffSample {
                    second,
                    diff_ratio: ratio,
                });
                prev_rgb = Some(rgb);
            }
            Ok(())
        };

        for (stream_ref, packet) in ictx.packets() {
            if stream_ref.index() != stream_index {
                continue;
            }
            decoder
                .send_packet(&packet)
                .map_err(|e| HansardError::MediaRead(e.to_string()))?;
            process_decoded(&mut decoder)?;
        }

        // Drain frames still buffered in the decoder.
        decoder
            .send_eof()
            .map_err(|e| HansardError::MediaRead(e.to_string()))?;
        process_decoded(&mut decoder)?;

        info!("sampled {} frames from {path_str}", samples.len());
        Ok(samples)
    }
}

/// Tracks which decoded frames to sample, one per interval.
///
/// Samples carry the frame's actual second, so a source whose frames arrive
/// sparser than the interval still labels each sample correctly instead of
/// compacting the series onto consecutive seconds.
struct SampleCursor {
    interval: u64,
    next_sec: u64,
}

impl SampleCursor {
    fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            next_sec: 0,
        }
    }

    /// Returns the second to label this frame's sample with, or None when
    /// the frame falls before the next sampling point.
    fn observe(&mut self, frame_time: f64) -> Option<u64> {
        if frame_time < self.next_sec as f64 {
            return None;
        }
        let second = frame_time as u64;
        self.next_sec = second + self.interval;
        Some(second)
    }
}

/// Copy the frame's RGB24 plane row by row, dropping the stride padding.
fn flatten_rgb(frame: &ffmpeg_next::util::frame::video::Video, width: u32, height: u32) -> Vec<u8> {
    let data = frame.data(0);
    let stride = frame.stride(0);
    let row_bytes = width as usize * 3;
    let mut flat = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let row_start = y * stride;
        let row_end = row_start + row_bytes;
        if row_end <= data.len() {
            flat.extend_from_slice(&data[row_start..row_end]);
        }
    }
    flat
}

/// Fraction of channel values whose change exceeds `tolerance`.
///
/// `abs_diff` keeps the comparison in u8 without wraparound; a plain
/// subtraction would wrap on brighter-to-darker transitions.
pub fn diff_ratio(prev: &[u8], curr: &[u8], tolerance: u8) -> f64 {
    if prev.is_empty() || curr.is_empty() {
        return 0.0;
    }
    let changed = prev
        .iter()
        .zip(curr.iter())
        .filter(|(a, b)| a.abs_diff(**b) > tolerance)
        .count();
    changed as f64 / prev.len().min(curr.len()) as f64
}
