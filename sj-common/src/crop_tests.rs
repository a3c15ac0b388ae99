//! Unit tests for crop-range validation
//!
//! Most cases use a recording range of `[0, 10000]` ms.

use super::*;

fn validator() -> CropValidator {
    CropValidator::new(TimeRange::new(0, 10_000))
}

// ============================================================================
// Test Group 1: Recording Range
// ============================================================================

#[test]
fn test_minimum_crop_duration_constant() {
    assert_eq!(MINIMUM_CROP_DURATION_MS, 1000);
}

#[test]
fn test_long_recording_is_croppable() {
    assert!(validator().is_recording_range_valid_for_cropping());
}

#[test]
fn test_short_recording_is_not_croppable() {
    let validator = CropValidator::new(TimeRange::new(0, 500));
    assert!(!validator.is_recording_range_valid_for_cropping());
}

#[test]
fn test_recording_exactly_minimum_is_croppable() {
    let validator = CropValidator::new(TimeRange::new(1_600_000_000_000, 1_600_000_001_000));
    assert!(validator.is_recording_range_valid_for_cropping());
}

#[test]
fn test_inverted_recording_is_not_croppable() {
    let validator = CropValidator::new(TimeRange::new(5000, 0));
    assert!(!validator.is_recording_range_valid_for_cropping());
}

#[test]
fn test_validator_keeps_recording_range() {
    assert_eq!(validator().recording_range(), TimeRange::new(0, 10_000));
}

// ============================================================================
// Test Group 2: Timestamp Containment
// ============================================================================

#[test]
fn test_timestamp_within_recording_range() {
    let validator = validator();
    assert!(validator.is_timestamp_within_recording_range(5000));
    assert!(!validator.is_timestamp_within_recording_range(10_001));
    assert!(!validator.is_timestamp_within_recording_range(-1));
}

#[test]
fn test_recording_range_bounds_are_inclusive() {
    let validator = validator();
    assert!(validator.is_timestamp_within_recording_range(0));
    assert!(validator.is_timestamp_within_recording_range(10_000));
}

// ============================================================================
// Test Group 3: Crop Range Validity
// ============================================================================

#[test]
fn test_range_length_check_ignores_recording_range() {
    let validator = validator();
    assert!(validator.is_range_at_least_minimum_for_crop(TimeRange::new(50_000, 51_000)));
    assert!(!validator.is_range_at_least_minimum_for_crop(TimeRange::new(50_000, 50_999)));
}

#[test]
fn test_crop_range_valid() {
    assert!(validator().is_crop_range_valid(TimeRange::new(2000, 4000)));
}

#[test]
fn test_crop_range_too_short() {
    assert!(!validator().is_crop_range_valid(TimeRange::new(2000, 2500)));
}

#[test]
fn test_crop_range_start_outside_recording() {
    assert!(!validator().is_crop_range_valid(TimeRange::new(-100, 2000)));
}

#[test]
fn test_crop_range_end_outside_recording() {
    assert!(!validator().is_crop_range_valid(TimeRange::new(9000, 10_500)));
}

#[test]
fn test_full_recording_is_valid_crop() {
    assert!(validator().is_crop_range_valid(TimeRange::new(0, 10_000)));
}

#[test]
fn test_validity_implies_each_condition() {
    let validator = validator();
    let candidates = [
        TimeRange::new(0, 1000),
        TimeRange::new(0, 999),
        TimeRange::new(2000, 4000),
        TimeRange::new(-1, 5000),
        TimeRange::new(9000, 10_001),
        TimeRange::new(8000, 7000),
        TimeRange::new(9000, 10_000),
    ];

    for range in candidates {
        if validator.is_crop_range_valid(range) {
            assert!(validator.is_range_at_least_minimum_for_crop(range), "{}", range);
            assert!(validator.is_timestamp_within_recording_range(range.min), "{}", range);
            assert!(validator.is_timestamp_within_recording_range(range.max), "{}", range);
        }
    }
}

#[test]
fn test_violations_match_validity() {
    let validator = validator();
    assert!(validator.crop_range_violations(TimeRange::new(2000, 4000)).is_empty());
    assert_eq!(
        validator.crop_range_violations(TimeRange::new(-100, 200)),
        vec![CropViolation::StartOutsideRecording, CropViolation::TooShort]
    );
    assert_eq!(
        validator.crop_range_violations(TimeRange::new(9000, 10_500)),
        vec![CropViolation::EndOutsideRecording]
    );
}

// ============================================================================
// Test Group 4: Start Handle Clamping
// ============================================================================

#[test]
fn test_start_clamp_in_range_unchanged() {
    let crop = TimeRange::new(5000, 6000);
    assert_eq!(
        validator().start_crop_timestamp_clamped_to_valid_range(3000, crop),
        Some(3000)
    );
}

#[test]
fn test_start_clamp_to_upper_bound() {
    let crop = TimeRange::new(5000, 6000);
    assert_eq!(
        validator().start_crop_timestamp_clamped_to_valid_range(4500, crop),
        Some(4000)
    );
}

#[test]
fn test_start_clamp_to_recording_start() {
    let crop = TimeRange::new(5000, 6000);
    assert_eq!(
        validator().start_crop_timestamp_clamped_to_valid_range(-500, crop),
        Some(0)
    );
}

#[test]
fn test_start_clamp_without_room_returns_none() {
    let crop = TimeRange::new(500, 600);
    for timestamp in [-1000, 0, 300, 5000] {
        assert_eq!(
            validator().start_crop_timestamp_clamped_to_valid_range(timestamp, crop),
            None
        );
    }
}

#[test]
fn test_start_clamp_extreme_values_do_not_overflow() {
    let crop = TimeRange::new(i64::MIN, i64::MIN + 10);
    let validator = CropValidator::new(TimeRange::new(0, i64::MAX));
    assert_eq!(validator.start_crop_timestamp_clamped_to_valid_range(0, crop), None);
}

// ============================================================================
// Test Group 5: End Handle Clamping
// ============================================================================

#[test]
fn test_end_clamp_in_range_unchanged() {
    let crop = TimeRange::new(5000, 6000);
    assert_eq!(
        validator().end_crop_timestamp_clamped_to_valid_range(7000, crop),
        Some(7000)
    );
}

#[test]
fn test_end_clamp_to_lower_bound() {
    let crop = TimeRange::new(5000, 6000);
    assert_eq!(
        validator().end_crop_timestamp_clamped_to_valid_range(5500, crop),
        Some(6000)
    );
}

#[test]
fn test_end_clamp_to_recording_end() {
    let crop = TimeRange::new(5000, 6000);
    assert_eq!(
        validator().end_crop_timestamp_clamped_to_valid_range(12_000, crop),
        Some(10_000)
    );
}

#[test]
fn test_end_clamp_without_room_returns_none() {
    let crop = TimeRange::new(9500, 9800);
    assert_eq!(
        validator().end_crop_timestamp_clamped_to_valid_range(9900, crop),
        None
    );
}

#[test]
fn test_end_clamp_extreme_values_do_not_overflow() {
    let crop = TimeRange::new(i64::MAX - 10, i64::MAX);
    let validator = CropValidator::new(TimeRange::new(0, i64::MAX));
    assert_eq!(validator.end_crop_timestamp_clamped_to_valid_range(0, crop), None);
}

#[test]
fn test_start_clamp_at_recording_floor_returns_none() {
    let crop = TimeRange::new(i64::MIN, i64::MIN + 500);
    let validator = CropValidator::new(TimeRange::new(i64::MIN, 0));
    assert_eq!(validator.start_crop_timestamp_clamped_to_valid_range(0, crop), None);
}

#[test]
fn test_end_clamp_near_limit_keeps_minimum_duration() {
    let crop = TimeRange::new(i64::MAX - 2000, i64::MAX - 1500);
    let validator = CropValidator::new(TimeRange::new(0, i64::MAX));
    let end = validator
        .end_crop_timestamp_clamped_to_valid_range(0, crop)
        .unwrap();
    assert_eq!(end, i64::MAX - 1000);
    assert!(validator.is_crop_range_valid(TimeRange::new(crop.min, end)));
}

// ============================================================================
// Test Group 6: Clamp Properties
// ============================================================================

#[test]
fn test_clamping_is_idempotent() {
    let validator = validator();
    let crop = TimeRange::new(3000, 7000);

    for timestamp in [-5000, 0, 1500, 2999, 6000, 9000, 20_000] {
        let start = validator
            .start_crop_timestamp_clamped_to_valid_range(timestamp, crop)
            .unwrap();
        assert_eq!(
            validator.start_crop_timestamp_clamped_to_valid_range(start, crop),
            Some(start)
        );

        let end = validator
            .end_crop_timestamp_clamped_to_valid_range(timestamp, crop)
            .unwrap();
        assert_eq!(
            validator.end_crop_timestamp_clamped_to_valid_range(end, crop),
            Some(end)
        );
    }
}

#[test]
fn test_clamped_moves_keep_crop_valid() {
    let validator = validator();
    let crop = TimeRange::new(3000, 7000);

    for timestamp in (-2000..=12_000).step_by(250) {
        let start = validator
            .start_crop_timestamp_clamped_to_valid_range(timestamp, crop)
            .unwrap();
        assert!(validator.is_crop_range_valid(TimeRange::new(start, crop.max)));

        let end = validator
            .end_crop_timestamp_clamped_to_valid_range(timestamp, crop)
            .unwrap();
        assert!(validator.is_crop_range_valid(TimeRange::new(crop.min, end)));
    }
}

#[test]
fn test_clamp_does_not_touch_inputs() {
    let validator = validator();
    let crop = TimeRange::new(5000, 6000);
    let _ = validator.start_crop_timestamp_clamped_to_valid_range(4500, crop);
    let _ = validator.end_crop_timestamp_clamped_to_valid_range(5500, crop);
    assert_eq!(crop, TimeRange::new(5000, 6000));
    assert_eq!(validator.recording_range(), TimeRange::new(0, 10_000));
}

// ============================================================================
// Test Group 7: TimeRange
// ============================================================================

#[test]
fn test_time_range_duration_and_order() {
    assert_eq!(TimeRange::new(2000, 4500).duration_ms(), 2500);
    assert_eq!(TimeRange::new(4500, 2000).duration_ms(), -2500);
    assert!(!TimeRange::new(4500, 2000).is_ordered());
    assert_eq!(TimeRange::new(i64::MIN, i64::MAX).duration_ms(), i64::MAX);
}

#[test]
fn test_time_range_serializes_as_min_max() {
    let json = serde_json::to_string(&TimeRange::new(1, 2)).unwrap();
    assert_eq!(json, r#"{"min":1,"max":2}"#);
}
