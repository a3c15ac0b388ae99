//! sj-crop - trial crop inspection and editing
//!
//! Loads a trial stored as JSON and reports, checks, drags or applies crop
//! ranges using the same rules as the chart editor.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sj_common::config::OutputFormat;
use sj_common::crop::CropViolation;
use sj_common::human_time::{format_absolute_ms, format_duration_ms, format_relative_ms};
use sj_common::{CropHandle, CropSession, DragOutcome, TimeRange, Trial};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line arguments for sj-crop
#[derive(Parser, Debug)]
#[command(name = "sj-crop")]
#[command(about = "Inspect and crop recorded trials")]
#[command(version)]
pub struct Cli {
    /// Config file (overrides SJ_CROP_CONFIG and the platform default)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show recording range, crop range and visible labels
    Info {
        /// Trial JSON file
        #[arg(long, value_name = "FILE")]
        trial: PathBuf,
    },

    /// Check whether a crop range would be accepted
    Check {
        #[arg(long, value_name = "FILE")]
        trial: PathBuf,
        /// Crop start (epoch ms)
        #[arg(long, allow_negative_numbers = true)]
        start: i64,
        /// Crop end (epoch ms)
        #[arg(long, allow_negative_numbers = true)]
        end: i64,
    },

    /// Drag one handle of the current crop and report where it lands
    Drag {
        #[arg(long, value_name = "FILE")]
        trial: PathBuf,
        /// Handle to move: start or end
        #[arg(long)]
        handle: CropHandle,
        /// Requested handle position (epoch ms)
        #[arg(long, allow_negative_numbers = true)]
        to: i64,
    },

    /// Validate and store a crop range on the trial
    Apply {
        #[arg(long, value_name = "FILE")]
        trial: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        start: i64,
        #[arg(long, allow_negative_numbers = true)]
        end: i64,
        /// Write the cropped trial here instead of overwriting the input
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Remove the crop from the trial
    Clear {
        #[arg(long, value_name = "FILE")]
        trial: PathBuf,
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Serialize)]
struct LabelReport<'a> {
    timestamp_ms: i64,
    offset: String,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct InfoReport<'a> {
    id: &'a str,
    title: Option<&'a str>,
    recording_range: TimeRange,
    recording_start: String,
    duration: String,
    croppable: bool,
    crop_range: Option<TimeRange>,
    effective_range: TimeRange,
    labels: Vec<LabelReport<'a>>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    crop_range: TimeRange,
    valid: bool,
    violations: Vec<CropViolation>,
}

#[derive(Debug, Serialize)]
struct DragReport {
    handle: CropHandle,
    requested: i64,
    /// `None` when the drag was ignored
    timestamp: Option<i64>,
    crop_range: TimeRange,
}

#[derive(Debug, Serialize)]
struct WriteReport<'a> {
    path: &'a Path,
    crop_range: Option<TimeRange>,
}

// ============================================================================
// Commands
// ============================================================================

/// Execute `cli.command`, writing results to `out`
pub fn run(cli: &Cli, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Info { trial } => {
            let trial = load_trial(trial)?;
            info_command(&trial, format, out)
        }
        Command::Check { trial, start, end } => {
            let trial = load_trial(trial)?;
            check_command(&trial, TimeRange::new(*start, *end), format, out)
        }
        Command::Drag { trial, handle, to } => {
            let trial = load_trial(trial)?;
            drag_command(&trial, *handle, *to, format, out)
        }
        Command::Apply {
            trial: path,
            start,
            end,
            output,
        } => {
            let mut trial = load_trial(path)?;
            trial
                .apply_crop(TimeRange::new(*start, *end))
                .context("Crop rejected")?;
            let target = output.as_deref().unwrap_or(path);
            save_trial(&trial, target)?;
            write_report(&trial, target, format, out)
        }
        Command::Clear {
            trial: path,
            output,
        } => {
            let mut trial = load_trial(path)?;
            trial.clear_crop();
            let target = output.as_deref().unwrap_or(path);
            save_trial(&trial, target)?;
            write_report(&trial, target, format, out)
        }
    }
}

fn load_trial(path: &Path) -> Result<Trial> {
    Trial::from_json_file(path)
        .with_context(|| format!("Failed to load trial from {}", path.display()))
}

fn save_trial(trial: &Trial, path: &Path) -> Result<()> {
    trial
        .write_json_file(path)
        .with_context(|| format!("Failed to write trial to {}", path.display()))?;
    info!("Wrote trial {} to {}", trial.id, path.display());
    Ok(())
}

fn info_command(trial: &Trial, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let origin = trial.recording_range.min;
    let report = InfoReport {
        id: &trial.id,
        title: trial.title.as_deref(),
        recording_range: trial.recording_range,
        recording_start: format_absolute_ms(origin),
        duration: format_duration_ms(trial.recording_range.duration_ms()),
        croppable: trial.is_croppable(),
        crop_range: trial.crop_range,
        effective_range: trial.effective_range(),
        labels: trial
            .labels_in_effective_range()
            .map(|label| LabelReport {
                timestamp_ms: label.timestamp_ms,
                offset: format_relative_ms(label.timestamp_ms, origin),
                text: &label.text,
            })
            .collect(),
    };

    if format == OutputFormat::Json {
        return print_json(&report, out);
    }

    writeln!(out, "Trial:      {}", report.id)?;
    if let Some(title) = report.title {
        writeln!(out, "Title:      {}", title)?;
    }
    writeln!(out, "Recorded:   {} ({})", report.recording_range, report.recording_start)?;
    writeln!(out, "Duration:   {}", report.duration)?;
    writeln!(out, "Croppable:  {}", if report.croppable { "yes" } else { "no" })?;
    match report.crop_range {
        Some(crop) => writeln!(
            out,
            "Crop:       {} ({} - {})",
            crop,
            format_relative_ms(crop.min, origin),
            format_relative_ms(crop.max, origin)
        )?,
        None => writeln!(out, "Crop:       none")?,
    }
    writeln!(out, "Labels:     {}", report.labels.len())?;
    for label in &report.labels {
        writeln!(out, "  {}  {}", label.offset, label.text)?;
    }
    Ok(())
}

fn check_command(
    trial: &Trial,
    crop_range: TimeRange,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let violations = trial.crop_validator().crop_range_violations(crop_range);
    let report = CheckReport {
        crop_range,
        valid: violations.is_empty(),
        violations,
    };

    if format == OutputFormat::Json {
        return print_json(&report, out);
    }

    if report.valid {
        writeln!(out, "{} is a valid crop", report.crop_range)?;
    } else {
        writeln!(out, "{} is not a valid crop:", report.crop_range)?;
        for violation in &report.violations {
            writeln!(out, "  - {}", violation)?;
        }
    }
    Ok(())
}

fn drag_command(
    trial: &Trial,
    handle: CropHandle,
    requested: i64,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let mut session = CropSession::begin(trial)?;
    let timestamp = match session.drag(handle, requested) {
        DragOutcome::Moved { timestamp, .. } => Some(timestamp),
        DragOutcome::Ignored => None,
    };
    let report = DragReport {
        handle,
        requested,
        timestamp,
        crop_range: session.crop_range(),
    };

    if format == OutputFormat::Json {
        return print_json(&report, out);
    }

    match report.timestamp {
        Some(timestamp) if timestamp == requested => {
            writeln!(out, "{:?} handle moved to {}", handle, timestamp)?
        }
        Some(timestamp) => writeln!(
            out,
            "{:?} handle clamped from {} to {}",
            handle, requested, timestamp
        )?,
        None => writeln!(out, "{:?} handle has no valid position; drag ignored", handle)?,
    }
    writeln!(out, "Crop: {}", report.crop_range)?;
    Ok(())
}

fn write_report(
    trial: &Trial,
    path: &Path,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let report = WriteReport {
        path,
        crop_range: trial.crop_range,
    };

    if format == OutputFormat::Json {
        return print_json(&report, out);
    }

    match report.crop_range {
        Some(crop) => writeln!(out, "Cropped to {}, saved {}", crop, path.display())?,
        None => writeln!(out, "Crop cleared, saved {}", path.display())?,
    }
    Ok(())
}

fn print_json<T: Serialize>(report: &T, out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
