//! Crop-range validation for recorded trials
//!
//! A trial is recorded over a fixed window of time (the *recording range*).
//! Users may trim it to a sub-interval (the *crop range*) by dragging a start
//! and an end handle over a chart. This module decides whether a proposed crop
//! range is acceptable and, for single-handle drags, computes the nearest
//! acceptable position.
//!
//! # Timestamps
//!
//! All timestamps are `i64` milliseconds. There is no timezone or calendar
//! meaning at this layer; see [`crate::human_time`] for display.
//!
//! # Rules
//!
//! A crop range `[min, max]` is valid when:
//!
//! 1. `min` lies inside the recording range (inclusive)
//! 2. `max` lies inside the recording range (inclusive)
//! 3. `max - min >= MINIMUM_CROP_DURATION_MS`
//!
//! Clamping a dragged handle is always done against the *opposite* handle
//! offset by the minimum duration, so a clamped move can never produce a
//! range that is too short.
//!
//! # Examples
//!
//! ```rust
//! use sj_common::crop::{CropValidator, TimeRange};
//!
//! let validator = CropValidator::new(TimeRange::new(0, 10_000));
//! assert!(validator.is_recording_range_valid_for_cropping());
//! assert!(validator.is_crop_range_valid(TimeRange::new(2000, 4000)));
//!
//! // Dragging the start handle too close to the end handle
//! let crop = TimeRange::new(5000, 6000);
//! assert_eq!(
//!     validator.start_crop_timestamp_clamped_to_valid_range(4500, crop),
//!     Some(4000)
//! );
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Millisecond timestamp
pub type TimestampMs = i64;

/// Shortest crop range a user may keep: 1 second
pub const MINIMUM_CROP_DURATION_MS: i64 = 1000;

// ============================================================================
// Time Range
// ============================================================================

/// Closed interval `[min, max]` of millisecond timestamps
///
/// Used both for a trial's recording range and for a proposed crop range.
/// The constructor does not reorder its arguments; an inverted range simply
/// has a negative duration and fails every length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start timestamp in milliseconds
    pub min: TimestampMs,
    /// Inclusive end timestamp in milliseconds
    pub max: TimestampMs,
}

impl TimeRange {
    pub fn new(min: TimestampMs, max: TimestampMs) -> Self {
        Self { min, max }
    }

    /// Length of the range in milliseconds (`max - min`, saturating)
    pub fn duration_ms(&self) -> i64 {
        self.max.saturating_sub(self.min)
    }

    /// `true` if `timestamp` lies in `[min, max]`
    pub fn contains(&self, timestamp: TimestampMs) -> bool {
        self.min <= timestamp && timestamp <= self.max
    }

    /// `true` if `min <= max`
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

// ============================================================================
// Crop Validator
// ============================================================================

/// Validates crop ranges against a fixed recording range
///
/// The validator holds nothing but the recording range and never changes it.
/// Crop ranges are owned by the caller; clamp operations return new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropValidator {
    recording_range: TimeRange,
}

impl CropValidator {
    /// Create a validator for a trial recorded over `recording_range`
    pub fn new(recording_range: TimeRange) -> Self {
        Self { recording_range }
    }

    /// The recording range this validator checks against
    pub fn recording_range(&self) -> TimeRange {
        self.recording_range
    }

    /// Whether the recording is long enough to offer cropping at all
    ///
    /// ```rust
    /// use sj_common::crop::{CropValidator, TimeRange};
    ///
    /// assert!(CropValidator::new(TimeRange::new(0, 1000)).is_recording_range_valid_for_cropping());
    /// assert!(!CropValidator::new(TimeRange::new(0, 999)).is_recording_range_valid_for_cropping());
    /// ```
    pub fn is_recording_range_valid_for_cropping(&self) -> bool {
        self.recording_range.duration_ms() >= MINIMUM_CROP_DURATION_MS
    }

    /// Whether `timestamp` lies inside the recording range (inclusive)
    pub fn is_timestamp_within_recording_range(&self, timestamp: TimestampMs) -> bool {
        self.recording_range.contains(timestamp)
    }

    /// Whether `range` is at least the minimum crop duration long
    ///
    /// Pure length check; the recording range is not consulted.
    pub fn is_range_at_least_minimum_for_crop(&self, range: TimeRange) -> bool {
        range.duration_ms() >= MINIMUM_CROP_DURATION_MS
    }

    /// Whether `crop_range` is an acceptable crop of the recording
    ///
    /// Both endpoints must be inside the recording range and the range must
    /// meet the minimum duration.
    pub fn is_crop_range_valid(&self, crop_range: TimeRange) -> bool {
        self.is_timestamp_within_recording_range(crop_range.min)
            && self.is_timestamp_within_recording_range(crop_range.max)
            && self.is_range_at_least_minimum_for_crop(crop_range)
    }

    /// Clamp a proposed start-handle position
    ///
    /// The start may move anywhere in `[recording.min, crop_range.max - MINIMUM_CROP_DURATION_MS]`.
    ///
    /// # Returns
    ///
    /// `None` when that interval is empty, i.e. the current end handle is
    /// already too close to the recording start. Callers should leave the
    /// handle where it is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sj_common::crop::{CropValidator, TimeRange};
    ///
    /// let validator = CropValidator::new(TimeRange::new(0, 10_000));
    /// let crop = TimeRange::new(5000, 6000);
    ///
    /// assert_eq!(validator.start_crop_timestamp_clamped_to_valid_range(3000, crop), Some(3000));
    /// assert_eq!(validator.start_crop_timestamp_clamped_to_valid_range(-500, crop), Some(0));
    /// assert_eq!(
    ///     validator.start_crop_timestamp_clamped_to_valid_range(0, TimeRange::new(500, 600)),
    ///     None
    /// );
    /// ```
    pub fn start_crop_timestamp_clamped_to_valid_range(
        &self,
        timestamp: TimestampMs,
        crop_range: TimeRange,
    ) -> Option<TimestampMs> {
        let lower_bound = self.recording_range.min;
        // Below i64::MIN there is no representable start position
        let upper_bound = crop_range.max.checked_sub(MINIMUM_CROP_DURATION_MS)?;
        if upper_bound < lower_bound {
            return None;
        }
        Some(timestamp.clamp(lower_bound, upper_bound))
    }

    /// Clamp a proposed end-handle position
    ///
    /// The end may move anywhere in `[crop_range.min + MINIMUM_CROP_DURATION_MS, recording.max]`.
    ///
    /// # Returns
    ///
    /// `None` when that interval is empty, i.e. the current start handle is
    /// already too close to the recording end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sj_common::crop::{CropValidator, TimeRange};
    ///
    /// let validator = CropValidator::new(TimeRange::new(0, 10_000));
    /// let crop = TimeRange::new(5000, 6000);
    ///
    /// assert_eq!(validator.end_crop_timestamp_clamped_to_valid_range(7000, crop), Some(7000));
    /// assert_eq!(validator.end_crop_timestamp_clamped_to_valid_range(5500, crop), Some(6000));
    /// ```
    pub fn end_crop_timestamp_clamped_to_valid_range(
        &self,
        timestamp: TimestampMs,
        crop_range: TimeRange,
    ) -> Option<TimestampMs> {
        let lower_bound = crop_range.min.checked_add(MINIMUM_CROP_DURATION_MS)?;
        let upper_bound = self.recording_range.max;
        if upper_bound < lower_bound {
            return None;
        }
        Some(timestamp.clamp(lower_bound, upper_bound))
    }

    /// List the rules `crop_range` breaks, in check order
    ///
    /// Empty exactly when [`is_crop_range_valid`](Self::is_crop_range_valid)
    /// returns `true`. Used for user-facing diagnostics.
    pub fn crop_range_violations(&self, crop_range: TimeRange) -> Vec<CropViolation> {
        let mut violations = Vec::new();
        if !self.is_timestamp_within_recording_range(crop_range.min) {
            violations.push(CropViolation::StartOutsideRecording);
        }
        if !self.is_timestamp_within_recording_range(crop_range.max) {
            violations.push(CropViolation::EndOutsideRecording);
        }
        if !self.is_range_at_least_minimum_for_crop(crop_range) {
            violations.push(CropViolation::TooShort);
        }
        violations
    }
}

/// A single failed crop rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropViolation {
    /// Crop start is before the recording start or after its end
    StartOutsideRecording,
    /// Crop end is before the recording start or after its end
    EndOutsideRecording,
    /// Crop range is shorter than [`MINIMUM_CROP_DURATION_MS`]
    TooShort,
}

impl std::fmt::Display for CropViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropViolation::StartOutsideRecording => {
                write!(f, "crop start is outside the recording range")
            }
            CropViolation::EndOutsideRecording => {
                write!(f, "crop end is outside the recording range")
            }
            CropViolation::TooShort => write!(
                f,
                "crop range is shorter than {} ms",
                MINIMUM_CROP_DURATION_MS
            ),
        }
    }
}

// ============================================================================
// Tests Module
// ============================================================================

#[cfg(test)]
#[path = "crop_tests.rs"]
mod tests;
