//! # Science Journal Common Library
//!
//! Shared code for trial cropping:
//! - Timestamp ranges and crop validation
//! - Trial and label records
//! - Crop editing sessions (handle drags)
//! - Human-readable timestamp formatting
//! - Configuration loading

pub mod config;
pub mod crop;
pub mod crop_session;
pub mod error;
pub mod human_time;
pub mod trial;

pub use crop::{CropValidator, TimeRange, TimestampMs, MINIMUM_CROP_DURATION_MS};
pub use crop_session::{CropHandle, CropSession, DragOutcome};
pub use error::{Error, Result};
pub use trial::{Label, Trial};
