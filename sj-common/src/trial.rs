//! Trial and label records
//!
//! A trial is one timed recording session inside an experiment. It carries
//! the recording range, an optional crop range and any labels (notes pinned
//! to a timestamp) the user added while recording or reviewing.
//!
//! Trials are stored as camelCase JSON so they can be exchanged with the
//! command-line tools.

use crate::crop::{CropValidator, TimeRange, TimestampMs};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// A note pinned to a timestamp inside a trial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub timestamp_ms: TimestampMs,
    pub text: String,
}

/// A single recording session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trial {
    /// UUID v4 string
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Full interval the sensors were recorded over. Never changes.
    pub recording_range: TimeRange,

    /// User-selected sub-interval, if the trial has been cropped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_range: Option<TimeRange>,

    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Trial {
    /// Create an uncropped trial with a fresh id and no labels
    pub fn new(recording_range: TimeRange) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: None,
            recording_range,
            crop_range: None,
            labels: Vec::new(),
        }
    }

    pub fn crop_validator(&self) -> CropValidator {
        CropValidator::new(self.recording_range)
    }

    /// Whether the recording is long enough to be cropped
    pub fn is_croppable(&self) -> bool {
        self.crop_validator().is_recording_range_valid_for_cropping()
    }

    /// Crop range if set, otherwise the full recording range
    pub fn effective_range(&self) -> TimeRange {
        self.crop_range.unwrap_or(self.recording_range)
    }

    /// Set the crop range after validating it
    ///
    /// # Errors
    ///
    /// - [`Error::CropUnavailable`] if the recording is too short to crop
    /// - [`Error::InvalidCrop`] if `crop_range` breaks any crop rule; the
    ///   trial is left unchanged
    pub fn apply_crop(&mut self, crop_range: TimeRange) -> Result<()> {
        let validator = self.crop_validator();
        if !validator.is_recording_range_valid_for_cropping() {
            return Err(Error::CropUnavailable {
                duration_ms: self.recording_range.duration_ms(),
            });
        }

        let violations = validator.crop_range_violations(crop_range);
        if !violations.is_empty() {
            let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(Error::InvalidCrop(format!(
                "{} for recording {}: {}",
                crop_range,
                self.recording_range,
                reasons.join(", ")
            )));
        }

        info!(trial = %self.id, crop = %crop_range, "Applied crop");
        self.crop_range = Some(crop_range);
        Ok(())
    }

    /// Remove any crop, restoring the full recording range
    pub fn clear_crop(&mut self) {
        if self.crop_range.take().is_some() {
            info!(trial = %self.id, "Cleared crop");
        }
    }

    /// Pin a note at `timestamp_ms`
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the timestamp lies outside the recording.
    pub fn add_label(&mut self, timestamp_ms: TimestampMs, text: impl Into<String>) -> Result<&Label> {
        if !self.recording_range.contains(timestamp_ms) {
            return Err(Error::InvalidInput(format!(
                "label timestamp {} outside recording {}",
                timestamp_ms, self.recording_range
            )));
        }

        // Labels stay ordered by timestamp; equal times keep insertion order
        let index = self
            .labels
            .partition_point(|label| label.timestamp_ms <= timestamp_ms);
        self.labels.insert(
            index,
            Label {
                id: Uuid::new_v4().to_string(),
                timestamp_ms,
                text: text.into(),
            },
        );
        Ok(&self.labels[index])
    }

    /// Labels that remain visible after cropping
    pub fn labels_in_effective_range(&self) -> impl Iterator<Item = &Label> {
        let range = self.effective_range();
        self.labels
            .iter()
            .filter(move |label| range.contains(label.timestamp_ms))
    }

    /// Load a trial from a JSON file
    ///
    /// # Errors
    ///
    /// Besides I/O and parse failures: [`Error::InvalidInput`] for an inverted
    /// recording range, [`Error::InvalidCrop`] for a stored crop that breaks
    /// any crop rule.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let trial: Trial = serde_json::from_str(&content)?;
        if !trial.recording_range.is_ordered() {
            return Err(Error::InvalidInput(format!(
                "recording range {} ends before it starts",
                trial.recording_range
            )));
        }
        if let Some(crop_range) = trial.crop_range {
            let violations = trial.crop_validator().crop_range_violations(crop_range);
            if !violations.is_empty() {
                let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
                return Err(Error::InvalidCrop(format!(
                    "stored crop {} for recording {}: {}",
                    crop_range,
                    trial.recording_range,
                    reasons.join(", ")
                )));
            }
        }
        Ok(trial)
    }

    /// Write the trial as pretty-printed JSON
    pub fn write_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}
