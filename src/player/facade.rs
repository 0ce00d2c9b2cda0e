//! High-level player facade
//!
//! [`VideoPlayer`] bundles a shared [`PlaybackController`] with a
//! [`GestureCoordinator`] behind a single object, so a host can wire one
//! value to its element callbacks, input handlers, and render loop.
//! Construction goes through [`VideoPlayerBuilder`].

use crate::adapter::{EventSink, MediaAdapter};
use crate::gesture::{GestureCoordinator, Key, PointerButton, ScrubState, TimelineGeometry};
use crate::player::{
    PlaybackController, PlayerOptions, PlayerState, SharedController, StateListener,
};
use crate::utils::error::Result;
use log::info;

type BoxedListener = Box<dyn Fn(&PlayerState) + Send + 'static>;

/// Builder for [`VideoPlayer`].
///
/// # Example
///
/// ```
/// use playhead::{PlayerOptions, VideoPlayerBuilder};
///
/// let player = VideoPlayerBuilder::new()
///     .with_options(PlayerOptions {
///         initial_volume: 0.8,
///         ..Default::default()
///     })
///     .with_listener(|state| {
///         println!("playing: {}", state.is_playing);
///     })
///     .build()
///     .unwrap();
/// assert!(!player.snapshot().is_playing);
/// ```
pub struct VideoPlayerBuilder {
    options: PlayerOptions,
    listeners: Vec<BoxedListener>,
}

impl Default for VideoPlayerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoPlayerBuilder {
    pub fn new() -> Self {
        Self {
            options: PlayerOptions::default(),
            listeners: Vec::new(),
        }
    }

    /// Replace the default options
    pub fn with_options(mut self, options: PlayerOptions) -> Self {
        self.options = options;
        self
    }

    /// Register a state listener kept alive for the player's lifetime
    pub fn with_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&PlayerState) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Validate the options and assemble the player.
    pub fn build(self) -> Result<VideoPlayer> {
        let controller = PlaybackController::new(self.options)?;

        let subscriptions: Vec<StateListener> = self
            .listeners
            .into_iter()
            .map(|listener| controller.subscribe(listener))
            .collect();

        let controller = controller.into_shared();
        let gestures = GestureCoordinator::new(controller.clone());

        info!("Video player created");
        Ok(VideoPlayer {
            controller,
            gestures,
            _subscriptions: subscriptions,
        })
    }
}

/// Complete player: controller plus gesture coordination.
///
/// The host is responsible for driving [`process_events`](Self::process_events)
/// from its main loop (after forwarding element notifications into the
/// [`EventSink`]) and [`poll_buffered`](Self::poll_buffered) from a roughly
/// once-per-second timer.
pub struct VideoPlayer {
    controller: SharedController,
    gestures: GestureCoordinator,
    _subscriptions: Vec<StateListener>,
}

impl VideoPlayer {
    /// Shared controller handle for hosts that need direct access
    pub fn controller(&self) -> SharedController {
        self.controller.clone()
    }

    /// Attach a media source; returns the sink to wire to its notifications
    pub fn attach(&mut self, adapter: Box<dyn MediaAdapter>) -> EventSink {
        self.gestures.cancel_scrub();
        self.controller.lock().attach(adapter)
    }

    /// Detach the current media source
    pub fn detach(&mut self) {
        self.gestures.cancel_scrub();
        self.controller.lock().detach();
    }

    /// Drain and apply queued media notifications
    pub fn process_events(&mut self) {
        self.controller.lock().process_events();
    }

    /// Refresh the buffered spans from the adapter
    pub fn poll_buffered(&mut self) {
        self.controller.lock().poll_buffered();
    }

    /// Clone the current state snapshot
    pub fn snapshot(&self) -> PlayerState {
        self.controller.lock().snapshot()
    }

    /// Subscribe to snapshot publications; dropping the guard unsubscribes
    pub fn subscribe<F>(&self, callback: F) -> StateListener
    where
        F: Fn(&PlayerState) + Send + 'static,
    {
        self.controller.lock().subscribe(callback)
    }

    // Playback commands

    pub fn play(&mut self) {
        self.controller.lock().play();
    }

    pub fn pause(&mut self) {
        self.controller.lock().pause();
    }

    pub fn toggle_playing(&mut self) {
        self.controller.lock().toggle_playing();
    }

    pub fn restart(&mut self) {
        self.controller.lock().restart();
    }

    pub fn skip(&mut self, seconds: f64) {
        self.controller.lock().skip(seconds);
    }

    pub fn go_to_start(&mut self) {
        self.controller.lock().go_to_start();
    }

    pub fn go_to_end(&mut self) {
        self.controller.lock().go_to_end();
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.controller.lock().set_progress(progress);
    }

    pub fn mute(&mut self) {
        self.controller.lock().mute();
    }

    pub fn unmute(&mut self) {
        self.controller.lock().unmute();
    }

    pub fn toggle_mute(&mut self) {
        self.controller.lock().toggle_mute();
    }

    pub fn change_volume(&mut self, volume: f64) {
        self.controller.lock().change_volume(volume);
    }

    pub fn bump_volume(&mut self, offset: f64) {
        self.controller.lock().bump_volume(offset);
    }

    /// Swap to an alternate source. When a swap happens, the host must
    /// rewire the element's notifications to the returned sink.
    pub fn change_quality(&mut self, id: u32) -> Option<EventSink> {
        self.controller.lock().change_quality(id)
    }

    pub fn select_captions(&mut self, index: Option<usize>) {
        self.controller.lock().select_captions(index);
    }

    pub fn toggle_captions(&mut self) {
        self.controller.lock().toggle_captions();
    }

    // Gesture entry points

    /// Press on the timeline track
    pub fn timeline_pointer_down(
        &mut self,
        x: f64,
        button: PointerButton,
        geometry: TimelineGeometry,
    ) {
        self.gestures.pointer_down(x, button, geometry);
    }

    /// Pointer moved anywhere on screen
    pub fn pointer_move(&mut self, x: f64) {
        self.gestures.pointer_move(x);
    }

    /// Pointer released anywhere on screen
    pub fn pointer_up(&mut self) {
        self.gestures.pointer_up();
    }

    /// Abort an in-flight scrub, e.g. on focus loss
    pub fn cancel_scrub(&mut self) {
        self.gestures.cancel_scrub();
    }

    /// Current phase of the scrub gesture
    pub fn scrub_state(&self) -> ScrubState {
        self.gestures.scrub_state()
    }

    /// Click on the media surface itself
    pub fn surface_click(&mut self) {
        self.gestures.surface_click();
    }

    /// Key press while the player has focus; returns whether it was consumed
    pub fn handle_key(&mut self, key: Key) -> bool {
        self.gestures.handle_key(key)
    }

    /// Direct volume entry from a slider control
    pub fn volume_input(&mut self, volume: f64) {
        self.gestures.volume_input(volume);
    }

    /// Register the host callback invoked by the fullscreen key
    pub fn on_fullscreen_toggle<F>(&mut self, handler: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.gestures.on_fullscreen_toggle(handler);
    }
}
