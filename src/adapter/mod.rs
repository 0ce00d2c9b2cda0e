//! Media source adapter boundary for playhead
//!
//! The native playback element (an HTML `<video>`, a GStreamer pipeline, a
//! platform media session) is treated as an external dependency behind the
//! [`MediaAdapter`] trait: a handful of imperative, fire-and-forget commands
//! plus a stream of lifecycle notifications. The controller is the exclusive
//! owner of all mutating calls on the adapter.
//!
//! Notifications are delivered through an epoch-tagged channel. Each attach
//! hands out an [`EventSink`] stamped with the attachment epoch; events sent
//! through a sink that belongs to a previous attachment are discarded when
//! the controller drains the queue. This is what keeps a quality/source swap
//! from applying stale in-flight notifications from the old source.

use crossbeam_channel::{unbounded, Receiver, Sender};

/// A contiguous span of already-downloaded media, in seconds from the start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    /// Span start in seconds
    pub start: f64,

    /// Span end in seconds
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Thin interface over a native playback element.
///
/// Commands are fire-and-forget: their effects are only observed through the
/// subsequent [`MediaEvent`] notifications, never synchronously. Getters
/// report the element's current view of itself, which may legitimately lag
/// behind commands already issued.
pub trait MediaAdapter: Send {
    /// Issue a play request
    fn play(&mut self);

    /// Issue a pause request
    fn pause(&mut self);

    /// Whether the element currently considers itself paused
    fn paused(&self) -> bool;

    /// Whether the element has reached the end of the media
    fn ended(&self) -> bool;

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Seek to a position in seconds
    fn set_current_time(&mut self, seconds: f64);

    /// Media duration in seconds; may be NaN until metadata has loaded
    fn duration(&self) -> f64;

    /// Current volume in `[0.0, 1.0]`
    fn volume(&self) -> f64;

    /// Set the volume, clamped by the element to `[0.0, 1.0]`
    fn set_volume(&mut self, volume: f64);

    /// Re-initialize the element with a new source URL
    fn load(&mut self, src: &str);

    /// Downloaded-but-not-yet-played spans, in no guaranteed order
    fn buffered(&self) -> Vec<TimeRange>;
}

/// Lifecycle notification from the adapter (or, for fullscreen, from the
/// process-wide fullscreen target).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Initial media data has arrived; duration is now reported
    LoadedData { duration: f64 },

    /// The element's volume changed
    VolumeChange { volume: f64 },

    /// Playback position advanced
    TimeUpdate { position: f64 },

    /// The element's ended flag changed
    Ended { ended: bool },

    /// Playback started
    Play,

    /// Playback paused
    Pause,

    /// The process-wide fullscreen target changed
    FullscreenChange { active: bool },
}

/// Epoch-stamped event as it travels through the queue.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TaggedEvent {
    pub epoch: u64,
    pub event: MediaEvent,
}

/// Sending half of the notification queue, handed out on attach.
///
/// Clone freely; every clone carries the epoch of the attachment it was
/// created for. Sinks from a detached or swapped-out attachment keep
/// working but their events are dropped on receipt.
#[derive(Debug, Clone)]
pub struct EventSink {
    epoch: u64,
    tx: Sender<TaggedEvent>,
}

impl EventSink {
    /// Deliver a notification to the controller
    pub fn send(&self, event: MediaEvent) {
        // The receiver lives as long as the controller; a send after the
        // controller is gone is simply ignored.
        let _ = self.tx.send(TaggedEvent {
            epoch: self.epoch,
            event,
        });
    }
}

/// Receiving half owned by the controller.
#[derive(Debug)]
pub(crate) struct EventQueue {
    tx: Sender<TaggedEvent>,
    rx: Receiver<TaggedEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Create a sink stamped with the given attachment epoch
    pub fn sink(&self, epoch: u64) -> EventSink {
        EventSink {
            epoch,
            tx: self.tx.clone(),
        }
    }

    /// Drain all queued events in delivery order
    pub fn drain(&self) -> impl Iterator<Item = TaggedEvent> + '_ {
        self.rx.try_iter()
    }
}
