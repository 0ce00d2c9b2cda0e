//! Playback controller module for playhead
//!
//! This module owns the canonical playback state. The controller reconciles
//! the adapter's asynchronous lifecycle notifications into a single
//! render-friendly snapshot, and exposes the imperative command surface the
//! presentation layer drives. It is the only component allowed to mutate
//! the media adapter.

mod controller;
mod facade;

pub use controller::{PlaybackController, SharedController};
pub use facade::{VideoPlayer, VideoPlayerBuilder};

use crate::adapter::TimeRange;
use crate::utils::error::{PlayerError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Immutable snapshot of "what the player is doing right now".
///
/// Published to subscribers on every relevant change; the presentation layer
/// renders from this and never reads the adapter directly.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// True iff the underlying media is not paused
    pub is_playing: bool,

    /// True once initial media data has arrived; gates interactive controls
    pub is_loaded: bool,

    /// True once playback has reached the duration; cleared on play/seek
    pub is_ended: bool,

    /// Explicit mute flag, independent of `volume`
    pub is_muted: bool,

    /// Mirrors the process-wide fullscreen state
    pub is_fullscreen: bool,

    /// Media duration in seconds; `0.0` while unknown. Never NaN.
    pub duration: f64,

    /// Playback position in seconds, within `[0, duration]` once the
    /// duration is known
    pub progress: f64,

    /// Volume in `[0.0, 1.0]`. Retains the pre-mute value's replacement
    /// (zero) while muted; the pre-mute value itself is controller-owned.
    pub volume: f64,

    /// Downloaded spans, sorted by start, non-overlapping
    pub buffer_ranges: Vec<TimeRange>,

    /// Id of the active quality, if any were supplied
    pub active_quality: Option<u32>,

    /// Index into the supplied captions list, `None` when captions are off
    pub active_captions: Option<usize>,
}

impl PlayerState {
    /// Whether the duration has been reported and is usable for clamping
    /// and percentage math.
    pub fn duration_known(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }
}

/// An alternate source the player can swap to (e.g. a resolution rung).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityTrack {
    /// Stable identifier used by [`PlaybackController::change_quality`]
    pub id: u32,

    /// Display label, e.g. "1080p"
    pub label: String,

    /// Source URL handed to the adapter on swap
    pub src: String,
}

/// A caption track the presentation layer can render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Display label, e.g. "English"
    pub label: String,

    /// BCP 47 language tag
    pub language: String,

    /// Track source URL
    pub src: String,
}

/// Construction-time configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerOptions {
    /// Volume applied to the adapter on attach (0.0 to 1.0)
    pub initial_volume: f64,

    /// Issue a play request immediately after attach
    pub autoplay: bool,

    /// Seconds moved by the arrow-key seek shortcuts
    pub seek_step: f64,

    /// Volume delta applied by the arrow-key volume shortcuts (0.0 to 1.0)
    pub volume_step: f64,

    /// Alternate sources, first entry is the default selection
    pub qualities: Vec<QualityTrack>,

    /// Quality id selected at construction; falls back to the first entry
    /// when absent or unknown
    pub initial_quality: Option<u32>,

    /// Available caption tracks; captions start disabled
    pub captions: Vec<CaptionTrack>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            initial_volume: 0.5,
            autoplay: false,
            seek_step: 5.0,
            volume_step: 0.05,
            qualities: Vec::new(),
            initial_quality: None,
            captions: Vec::new(),
        }
    }
}

impl PlayerOptions {
    /// Validate the options.
    ///
    /// This is the only place the crate surfaces errors: a malformed
    /// configuration is a programmer error and is rejected up front rather
    /// than tolerated during steady-state operation.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_volume.is_finite() || !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(PlayerError::config(format!(
                "initial_volume must be within [0.0, 1.0], got {}",
                self.initial_volume
            )));
        }
        if !self.volume_step.is_finite() || !(0.0..=1.0).contains(&self.volume_step) {
            return Err(PlayerError::config(format!(
                "volume_step must be within [0.0, 1.0], got {}",
                self.volume_step
            )));
        }
        if !self.seek_step.is_finite() || self.seek_step <= 0.0 {
            return Err(PlayerError::config(format!(
                "seek_step must be positive, got {}",
                self.seek_step
            )));
        }
        for (i, quality) in self.qualities.iter().enumerate() {
            if self.qualities[..i].iter().any(|q| q.id == quality.id) {
                return Err(PlayerError::config(format!(
                    "duplicate quality id {}",
                    quality.id
                )));
            }
        }
        Ok(())
    }
}

type Listener = Box<dyn Fn(&PlayerState) + Send>;

/// Subscriber registry for snapshot publication.
///
/// Shared between the controller and the guards it hands out so that
/// dropping a guard removes exactly its own listener.
#[derive(Clone, Default)]
pub(crate) struct ListenerRegistry {
    inner: Arc<Mutex<ListenerSlots>>,
}

#[derive(Default)]
struct ListenerSlots {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl ListenerRegistry {
    pub fn subscribe<F>(&self, callback: F) -> StateListener
    where
        F: Fn(&PlayerState) + Send + 'static,
    {
        let mut slots = self.inner.lock();
        let id = slots.next_id;
        slots.next_id += 1;
        slots.listeners.push((id, Box::new(callback)));

        StateListener {
            id,
            registry: Arc::clone(&self.inner),
        }
    }

    pub fn publish(&self, state: &PlayerState) {
        let slots = self.inner.lock();
        for (_, listener) in slots.listeners.iter() {
            listener(state);
        }
    }
}

/// Subscription guard returned by [`PlaybackController::subscribe`].
///
/// Dropping the guard unsubscribes the listener.
pub struct StateListener {
    id: u64,
    registry: Arc<Mutex<ListenerSlots>>,
}

impl Drop for StateListener {
    fn drop(&mut self) {
        let mut slots = self.registry.lock();
        slots.listeners.retain(|(id, _)| *id != self.id);
    }
}
