//! Crop editing session
//!
//! Tracks the crop range while a user drags the start and end handles over a
//! trial chart. Every drag is routed through [`CropValidator`], so a session
//! that starts from a valid range stays valid no matter how the handles move.

use crate::crop::{CropValidator, TimeRange, TimestampMs};
use crate::trial::Trial;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which crop handle is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropHandle {
    Start,
    End,
}

impl std::str::FromStr for CropHandle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "start" => Ok(CropHandle::Start),
            "end" => Ok(CropHandle::End),
            other => Err(Error::InvalidInput(format!(
                "unknown crop handle '{}' (expected start or end)",
                other
            ))),
        }
    }
}

/// Result of a single handle drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Handle moved to `timestamp` (possibly clamped from the requested value)
    Moved {
        handle: CropHandle,
        timestamp: TimestampMs,
    },
    /// No valid position exists for this handle; the range is unchanged
    Ignored,
}

/// Transient crop state for one trial
#[derive(Debug, Clone)]
pub struct CropSession {
    validator: CropValidator,
    crop_range: TimeRange,
}

impl CropSession {
    /// Start editing from the trial's current effective range
    ///
    /// # Errors
    ///
    /// [`Error::CropUnavailable`] if the recording is shorter than the
    /// minimum crop duration.
    pub fn begin(trial: &Trial) -> Result<Self> {
        let validator = trial.crop_validator();
        if !validator.is_recording_range_valid_for_cropping() {
            return Err(Error::CropUnavailable {
                duration_ms: trial.recording_range.duration_ms(),
            });
        }
        Ok(Self::new(validator, trial.effective_range()))
    }

    /// Start editing from an arbitrary range
    ///
    /// Unlike [`begin`](Self::begin) this skips the croppable check and
    /// accepts a `crop_range` that is already invalid. Drags on such a
    /// session may come back [`DragOutcome::Ignored`]; [`commit`](Self::commit)
    /// still validates before touching the trial.
    pub fn new(validator: CropValidator, crop_range: TimeRange) -> Self {
        Self {
            validator,
            crop_range,
        }
    }

    pub fn crop_range(&self) -> TimeRange {
        self.crop_range
    }

    pub fn validator(&self) -> &CropValidator {
        &self.validator
    }

    pub fn is_valid(&self) -> bool {
        self.validator.is_crop_range_valid(self.crop_range)
    }

    /// Move `handle` towards `timestamp`
    pub fn drag(&mut self, handle: CropHandle, timestamp: TimestampMs) -> DragOutcome {
        let clamped = match handle {
            CropHandle::Start => self
                .validator
                .start_crop_timestamp_clamped_to_valid_range(timestamp, self.crop_range),
            CropHandle::End => self
                .validator
                .end_crop_timestamp_clamped_to_valid_range(timestamp, self.crop_range),
        };

        let Some(clamped) = clamped else {
            debug!(
                ?handle,
                timestamp,
                crop = %self.crop_range,
                "Ignoring drag: no valid handle position"
            );
            return DragOutcome::Ignored;
        };

        match handle {
            CropHandle::Start => self.crop_range.min = clamped,
            CropHandle::End => self.crop_range.max = clamped,
        }
        if clamped != timestamp {
            debug!(?handle, requested = timestamp, clamped, "Clamped drag");
        }
        DragOutcome::Moved {
            handle,
            timestamp: clamped,
        }
    }

    /// Return to the full recording range
    pub fn reset(&mut self) {
        self.crop_range = self.validator.recording_range();
    }

    /// Store the session's crop range on `trial`
    pub fn commit(&self, trial: &mut Trial) -> Result<()> {
        trial.apply_crop(self.crop_range)
    }
}
