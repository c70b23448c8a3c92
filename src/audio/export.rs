//! Audio export functionality.
//!
//! Renders a Morse schedule offline through the same mixer and envelope
//! used for live playback and writes it to a WAV file.

use super::mixer::ToneMixer;
use crate::config::Settings;
use crate::morse::{compute_profile, schedule_playback, MorseTable, Schedule};
use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Buffer size for rendering chunks.
const RENDER_BUFFER_SIZE: usize = 4096;

/// Silence appended after the last tone.
const TAIL_SECONDS: f64 = 0.25;

/// Renders a schedule laid out against a zero clock into mono samples.
pub fn render_schedule(schedule: &Schedule, sample_rate: u32) -> Vec<f32> {
    let mut mixer = ToneMixer::new(sample_rate);
    for tone in &schedule.tones {
        mixer.schedule(tone);
    }

    let end_time = schedule
        .tones
        .iter()
        .map(|t| t.end_time())
        .fold(schedule.total_duration, f64::max);
    let total_samples = ((end_time + TAIL_SECONDS) * sample_rate as f64).ceil() as usize;

    let mut samples = vec![0.0f32; total_samples];
    for chunk in samples.chunks_mut(RENDER_BUFFER_SIZE) {
        mixer.render(chunk);
    }
    samples
}

/// Writes a schedule to a 16-bit mono WAV file.
///
/// # Errors
///
/// Returns error if the output file cannot be created or written
pub fn export_to_wav<P: AsRef<Path>>(
    schedule: &Schedule,
    sample_rate: u32,
    output_path: P,
) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(output_path.as_ref(), spec).with_context(|| {
        format!(
            "Failed to create output WAV file: {}",
            output_path.as_ref().display()
        )
    })?;

    for sample in render_schedule(schedule, sample_rate) {
        // Convert f32 (-1.0 to 1.0) to i16
        let value = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer.write_sample(value)?;
    }

    writer.finalize().context("Failed to finalize WAV file")?;
    Ok(())
}

/// Schedules `text` with the given settings and writes it to a WAV file.
///
/// Returns the schedule that was rendered.
pub fn export_text_to_wav<P: AsRef<Path>>(
    text: &str,
    settings: &Settings,
    output_path: P,
) -> Result<Schedule> {
    let table = MorseTable::standard();
    let profile = compute_profile(settings.wpm);
    let schedule = schedule_playback(&table, text, &profile, settings.frequency as f64, 0.0);

    export_to_wav(&schedule, settings.sample_rate, output_path)?;
    tracing::info!(
        "Exported {} tones ({:.2}s) to WAV",
        schedule.tones.len(),
        schedule.total_duration
    );
    Ok(schedule)
}
