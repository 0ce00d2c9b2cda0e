//! Utility module for playhead
//!
//! This module provides common utilities used throughout the crate:
//! - Error handling with custom error types
//! - Progress formatting for timeline displays
//! - Clamping and percentage helpers
//! - Volume icon selection

pub mod error;

// Re-export commonly used items
pub use error::{PlayerError, Result};

/// Volume glyph the presentation layer should show for a given audio state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    /// Muted, or volume is exactly zero
    Muted,

    /// Audible but below half volume
    Low,

    /// Half volume and above
    High,
}

/// Clamp a value between min and max
///
/// # Arguments
///
/// * `value` - Value to clamp
/// * `min` - Minimum value
/// * `max` - Maximum value
///
/// # Returns
///
/// The clamped value
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Format a position in seconds for display
///
/// # Arguments
///
/// * `seconds` - Position in seconds
///
/// # Returns
///
/// Formatted string in the format "H:MM:SS", or "M:SS" for positions under
/// an hour. Minutes and seconds are zero-padded to two digits; hours and the
/// leading minutes component are not.
pub fn format_progress(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Fraction of the media already played, as a value in `[0.0, 1.0]`.
///
/// Yields a neutral `0.0` while the duration is unknown or non-finite so
/// that NaN never reaches the presentation layer.
pub fn progress_percent(progress: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !progress.is_finite() {
        return 0.0;
    }
    clamp(progress / duration, 0.0, 1.0)
}

/// Select the volume glyph for the current audio state
///
/// An explicit mute always wins over the numeric volume.
pub fn volume_icon(volume: f64, muted: bool) -> VolumeIcon {
    if muted || volume == 0.0 {
        return VolumeIcon::Muted;
    }
    if volume < 0.5 {
        VolumeIcon::Low
    } else {
        VolumeIcon::High
    }
}
