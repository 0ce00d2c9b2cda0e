//! Playback controller implementation for playhead
//!
//! The controller is the single source of truth for [`PlayerState`] and the
//! exclusive owner of all write access to the media adapter. It subscribes
//! to the adapter's lifecycle notifications through the epoch-tagged event
//! queue, folds them into the snapshot in delivery order, and republishes
//! the snapshot to listeners on every change.
//!
//! Commands are fire-and-forget: `play()` issues a play request but
//! `is_playing` only flips once the adapter confirms with a `Play`
//! notification. Every command is a silent no-op while no adapter is
//! attached, because hosts legitimately drive the controller before the
//! underlying element exists.

use crate::adapter::{EventQueue, EventSink, MediaAdapter, MediaEvent, TimeRange};
use crate::player::{ListenerRegistry, PlayerOptions, PlayerState, StateListener};
use crate::utils::clamp;
use crate::utils::error::Result;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handle used by the gesture layer and embedding hosts.
pub type SharedController = Arc<Mutex<PlaybackController>>;

/// Single source of truth for playback state
pub struct PlaybackController {
    /// Currently attached media source, if any
    adapter: Option<Box<dyn MediaAdapter>>,

    /// Canonical snapshot
    state: PlayerState,

    /// Construction-time configuration
    options: PlayerOptions,

    /// Notification queue shared with the sinks handed out on attach
    queue: EventQueue,

    /// Attachment epoch; events stamped with an older epoch are stale
    epoch: u64,

    /// Volume remembered across a mute for restoration
    prev_volume: f64,

    /// Last active caption index, restored on caption re-enable
    prev_captions: Option<usize>,

    /// Seek applied once the next `LoadedData` arrives (quality swap)
    pending_seek: Option<f64>,

    /// While true, adapter time updates are suppressed in favor of the
    /// optimistic progress written by the scrub gesture
    scrubbing: bool,

    /// Snapshot subscribers
    listeners: ListenerRegistry,
}

impl PlaybackController {
    /// Create a controller from validated options.
    ///
    /// This is the crate's only fallible entry point; malformed options are
    /// rejected here rather than tolerated at runtime.
    pub fn new(options: PlayerOptions) -> Result<Self> {
        options.validate()?;

        let mut controller = Self {
            adapter: None,
            state: PlayerState {
                is_playing: false,
                is_loaded: false,
                is_ended: false,
                is_muted: false,
                is_fullscreen: false,
                duration: 0.0,
                progress: 0.0,
                volume: options.initial_volume,
                buffer_ranges: Vec::new(),
                active_quality: None,
                active_captions: None,
            },
            prev_volume: options.initial_volume,
            prev_captions: None,
            pending_seek: None,
            scrubbing: false,
            queue: EventQueue::new(),
            epoch: 0,
            listeners: ListenerRegistry::default(),
            options,
        };
        controller.state.active_quality = controller.default_quality();
        Ok(controller)
    }

    /// Wrap a controller in the shared handle used by the gesture layer.
    pub fn into_shared(self) -> SharedController {
        Arc::new(Mutex::new(self))
    }

    fn default_quality(&self) -> Option<u32> {
        let first = self.options.qualities.first().map(|q| q.id);
        match self.options.initial_quality {
            Some(id) if self.options.qualities.iter().any(|q| q.id == id) => Some(id),
            Some(id) => {
                warn!("Unknown initial quality id {}, falling back to first", id);
                first
            }
            None => first,
        }
    }

    /// Attach a media source adapter, starting a fresh state lifecycle.
    ///
    /// The snapshot is reset to defaults, the configured initial volume is
    /// applied, and `is_playing`/`is_ended` are seeded from the adapter's
    /// own flags since the element may already be mid-playback. Returns the
    /// [`EventSink`] the host must wire to the element's notifications.
    pub fn attach(&mut self, mut adapter: Box<dyn MediaAdapter>) -> EventSink {
        self.epoch += 1;
        self.discard_queued();
        self.pending_seek = None;
        self.scrubbing = false;
        self.prev_volume = self.options.initial_volume;
        self.prev_captions = None;

        adapter.set_volume(self.options.initial_volume);

        self.state = PlayerState {
            is_playing: !adapter.paused(),
            is_loaded: false,
            is_ended: adapter.ended(),
            is_muted: false,
            is_fullscreen: false,
            duration: 0.0,
            progress: 0.0,
            volume: self.options.initial_volume,
            buffer_ranges: Vec::new(),
            active_quality: self.default_quality(),
            active_captions: None,
        };

        if self.options.autoplay {
            adapter.play();
        }

        self.adapter = Some(adapter);
        info!("Adapter attached (epoch {})", self.epoch);
        self.publish();

        self.queue.sink(self.epoch)
    }

    /// Detach the current adapter and neutralize its in-flight events.
    ///
    /// Sinks from the detached attachment keep working but their events are
    /// discarded; the snapshot is reset to initial defaults.
    pub fn detach(&mut self) {
        if self.adapter.take().is_none() {
            return;
        }
        self.epoch += 1;
        self.discard_queued();
        self.pending_seek = None;
        self.scrubbing = false;

        self.state = PlayerState {
            is_playing: false,
            is_loaded: false,
            is_ended: false,
            is_muted: false,
            is_fullscreen: false,
            duration: 0.0,
            progress: 0.0,
            volume: self.options.initial_volume,
            buffer_ranges: Vec::new(),
            active_quality: self.default_quality(),
            active_captions: None,
        };
        info!("Adapter detached");
        self.publish();
    }

    /// Whether an adapter is currently attached
    pub fn is_attached(&self) -> bool {
        self.adapter.is_some()
    }

    /// Borrow the canonical state
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Clone the current snapshot
    pub fn snapshot(&self) -> PlayerState {
        self.state.clone()
    }

    /// Construction options
    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    /// Subscribe to snapshot publications; dropping the guard unsubscribes.
    pub fn subscribe<F>(&self, callback: F) -> StateListener
    where
        F: Fn(&PlayerState) + Send + 'static,
    {
        self.listeners.subscribe(callback)
    }

    /// Drain and apply queued notifications in delivery order.
    ///
    /// Events stamped with a stale attachment epoch are dropped; the
    /// snapshot always reflects the most recent notification, never a
    /// merge.
    pub fn process_events(&mut self) {
        let events: Vec<_> = self.queue.drain().collect();
        for tagged in events {
            if tagged.epoch != self.epoch {
                debug!(
                    "Dropping stale event from epoch {}: {:?}",
                    tagged.epoch, tagged.event
                );
                continue;
            }
            self.apply_event(tagged.event);
        }
    }

    fn apply_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedData { duration } => {
                self.state.is_loaded = true;
                // NaN means the element does not know yet; keep "unknown"
                self.state.duration = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    0.0
                };
                if let Some(target) = self.pending_seek.take() {
                    let target = self.clamp_position(target);
                    if let Some(adapter) = self.adapter.as_mut() {
                        adapter.set_current_time(target);
                    }
                    self.state.progress = target;
                    debug!("Restored position {:.2}s after source swap", target);
                }
                self.refresh_ended();
            }
            MediaEvent::VolumeChange { volume } => {
                self.state.volume = clamp(volume, 0.0, 1.0);
            }
            MediaEvent::TimeUpdate { position } => {
                if self.scrubbing {
                    // The optimistic scrub position wins until the drag ends
                    return;
                }
                self.state.progress = self.clamp_position(position);
                self.refresh_ended();
            }
            MediaEvent::Ended { ended } => {
                self.state.is_ended = ended;
            }
            MediaEvent::Play => {
                // Starting playback always clears ended, even if the
                // adapter's own ended flag briefly lags
                self.state.is_playing = true;
                self.state.is_ended = false;
            }
            MediaEvent::Pause => {
                self.state.is_playing = false;
            }
            MediaEvent::FullscreenChange { active } => {
                self.state.is_fullscreen = active;
            }
        }
        self.publish();
    }

    /// Issue a play request; `is_playing` flips on adapter confirmation
    pub fn play(&mut self) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        adapter.play();
    }

    /// Issue a pause request; `is_playing` flips on adapter confirmation
    pub fn pause(&mut self) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        adapter.pause();
    }

    /// Play if the adapter is paused, else pause. Never both.
    pub fn toggle_playing(&mut self) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        if adapter.paused() {
            adapter.play();
        } else {
            adapter.pause();
        }
    }

    /// Restart from the beginning: reset flags, seek to zero, then play.
    pub fn restart(&mut self) {
        if self.adapter.is_none() {
            return;
        }
        self.reset();
        self.seek_to(0.0);
        if let Some(adapter) = self.adapter.as_mut() {
            adapter.play();
        }
    }

    /// Clear the playing/loaded flags ahead of a source swap
    pub fn reset(&mut self) {
        if self.adapter.is_none() {
            return;
        }
        self.state.is_playing = false;
        self.state.is_loaded = false;
        self.publish();
    }

    /// Advance or rewind by `seconds`, clamped into `[0, duration]`
    pub fn skip(&mut self, seconds: f64) {
        if self.adapter.is_none() {
            return;
        }
        let target = self.state.progress + seconds;
        self.seek_to(target);
    }

    /// Seek to the start of the media
    pub fn go_to_start(&mut self) {
        if self.adapter.is_none() {
            return;
        }
        self.seek_to(0.0);
    }

    /// Seek to the end of the media; no-op while the duration is unknown
    pub fn go_to_end(&mut self) {
        if self.adapter.is_none() || !self.state.duration_known() {
            return;
        }
        self.seek_to(self.state.duration);
    }

    /// Optimistically set `progress` without waiting for the adapter's
    /// confirming time update.
    pub fn set_progress(&mut self, progress: f64) {
        if self.adapter.is_none() {
            return;
        }
        self.state.progress = self.clamp_position(progress);
        self.refresh_ended();
        self.publish();
    }

    /// Seek the adapter and update the snapshot in one step.
    ///
    /// The target is clamped into `[0, duration]` once the duration is
    /// known; seeking clears the ended flag unless the target is itself at
    /// the end.
    pub(crate) fn seek_to(&mut self, target: f64) {
        let target = self.clamp_position(target);
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        adapter.set_current_time(target);
        self.state.progress = target;
        self.state.is_ended = false;
        self.refresh_ended();
        self.publish();
    }

    /// Remember the current volume, silence the adapter, and set the flag.
    /// Already muted is a no-op; remembering again would overwrite the
    /// restore target with zero.
    pub fn mute(&mut self) {
        if self.state.is_muted {
            return;
        }
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        self.prev_volume = adapter.volume();
        adapter.set_volume(0.0);
        self.state.is_muted = true;
        self.publish();
    }

    /// Restore the remembered volume and clear the flag
    pub fn unmute(&mut self) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        adapter.set_volume(self.prev_volume);
        self.state.is_muted = false;
        self.publish();
    }

    /// Unmute if muted, else mute
    pub fn toggle_mute(&mut self) {
        if self.state.is_muted {
            self.unmute();
        } else {
            self.mute();
        }
    }

    /// Explicit volume entry: clamp into `[0, 1]`, unmute, apply.
    ///
    /// Always unmutes so that entering a volume produces audible sound.
    pub fn change_volume(&mut self, volume: f64) {
        if self.adapter.is_none() {
            return;
        }
        self.unmute();
        if let Some(adapter) = self.adapter.as_mut() {
            adapter.set_volume(clamp(volume, 0.0, 1.0));
        }
    }

    /// Nudge the volume by `offset`, clamped into `[0, 1]`.
    ///
    /// Unlike [`change_volume`](Self::change_volume) this never unmutes;
    /// while muted it adjusts the remembered pre-mute volume instead of the
    /// live one, so the restore target tracks the user's intent.
    pub fn bump_volume(&mut self, offset: f64) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        if self.state.is_muted {
            self.prev_volume = clamp(self.prev_volume + offset, 0.0, 1.0);
            debug!("Adjusted pre-mute volume to {:.2}", self.prev_volume);
        } else {
            let volume = clamp(adapter.volume() + offset, 0.0, 1.0);
            adapter.set_volume(volume);
        }
    }

    /// Swap to an alternate source while preserving the playback position.
    ///
    /// Playback pauses across the swap and must be explicitly resumed by
    /// the caller; reloading a source always resets native playback state.
    /// The swap bumps the attachment epoch, so sinks from before the swap
    /// go stale; the host must rewire the element's notifications to the
    /// returned sink. Returns `None` when no swap happened (no adapter,
    /// unknown id, or the id is already active).
    pub fn change_quality(&mut self, id: u32) -> Option<EventSink> {
        if self.adapter.is_none() {
            return None;
        }
        if self.state.active_quality == Some(id) {
            return None;
        }
        let Some(track) = self.options.qualities.iter().find(|q| q.id == id) else {
            warn!("Ignoring quality change to unknown id {}", id);
            return None;
        };
        let src = track.src.clone();
        info!("Switching quality to {} ({})", track.label, id);

        // Notifications from the outgoing source must not apply past this
        // point, whether already queued or still in flight
        self.epoch += 1;
        self.discard_queued();
        let resume_at = self.state.progress;
        self.reset();
        self.pending_seek = Some(resume_at);
        self.state.active_quality = Some(id);
        if let Some(adapter) = self.adapter.as_mut() {
            adapter.load(&src);
        }
        self.publish();
        Some(self.queue.sink(self.epoch))
    }

    /// Select a caption track by index; out-of-range means "no selection".
    pub fn select_captions(&mut self, index: Option<usize>) {
        let index = index.filter(|i| *i < self.options.captions.len());
        if index == self.state.active_captions {
            return;
        }
        if let Some(current) = self.state.active_captions {
            self.prev_captions = Some(current);
        }
        self.state.active_captions = index;
        self.publish();
    }

    /// Toggle captions off and on, restoring the last active track.
    ///
    /// Re-enabling restores the previously active index, defaulting to the
    /// first available track when nothing was remembered.
    pub fn toggle_captions(&mut self) {
        match self.state.active_captions {
            Some(current) => {
                self.prev_captions = Some(current);
                self.state.active_captions = None;
            }
            None => {
                if self.options.captions.is_empty() {
                    return;
                }
                let restore = self
                    .prev_captions
                    .filter(|i| *i < self.options.captions.len())
                    .unwrap_or(0);
                self.state.active_captions = Some(restore);
            }
        }
        self.publish();
    }

    /// Click-to-toggle policy for the media surface: restart when ended,
    /// otherwise toggle play/pause.
    pub fn handle_surface_click(&mut self) {
        if self.state.is_ended {
            self.restart();
        } else {
            self.toggle_playing();
        }
    }

    /// Mark whether a scrub drag is in progress.
    ///
    /// While set, adapter time updates are suppressed so the optimistic
    /// drag position does not race the adapter's asynchronous confirmation.
    pub fn set_scrubbing(&mut self, scrubbing: bool) {
        self.scrubbing = scrubbing;
    }

    /// Recompute buffered spans from the adapter.
    ///
    /// Intended to be driven about once per second by the host's timer
    /// while an adapter is attached.
    pub fn poll_buffered(&mut self) {
        let Some(adapter) = self.adapter.as_ref() else {
            return;
        };
        let ranges = normalize_ranges(adapter.buffered());
        if ranges != self.state.buffer_ranges {
            self.state.buffer_ranges = ranges;
            self.publish();
        }
    }

    fn clamp_position(&self, position: f64) -> f64 {
        if self.state.duration_known() {
            clamp(position, 0.0, self.state.duration)
        } else {
            position.max(0.0)
        }
    }

    /// Safety net: a position at or past a known duration is ended, even if
    /// the adapter never delivered a timely ended notification.
    fn refresh_ended(&mut self) {
        if self.state.duration_known() && self.state.progress >= self.state.duration {
            self.state.is_ended = true;
        }
    }

    fn discard_queued(&mut self) {
        let dropped = self.queue.drain().count();
        if dropped > 0 {
            debug!("Discarded {} queued stale events", dropped);
        }
    }

    fn publish(&self) {
        self.listeners.publish(&self.state);
    }
}

/// Sort buffered spans by start and merge overlapping or touching spans.
fn normalize_ranges(mut ranges: Vec<TimeRange>) -> Vec<TimeRange> {
    ranges.retain(|r| r.start.is_finite() && r.end.is_finite() && r.end > r.start);
    ranges.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<TimeRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}
