//! playhead - themeable video player playback core
//!
//! This crate is the headless half of a video player: it owns playback
//! state, input gestures, and the policy connecting them, while the
//! rendering element and the UI chrome stay outside. A host plugs its
//! native playback element in behind the [`MediaAdapter`] trait, forwards
//! the element's notifications through the [`EventSink`], and renders
//! whatever theme it likes from the published [`PlayerState`] snapshots.
//!
//! Architecture:
//! - [`adapter`]: the media source boundary (trait, notifications, queue)
//! - [`player`]: the playback controller, options, and the facade
//! - [`gesture`]: scrub drags and keyboard shortcuts
//! - [`utils`]: formatting and math helpers for control surfaces
//!
//! # Example
//!
//! ```
//! use playhead::{MediaAdapter, MediaEvent, TimeRange, VideoPlayerBuilder};
//!
//! struct NullAdapter;
//!
//! impl MediaAdapter for NullAdapter {
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn paused(&self) -> bool {
//!         true
//!     }
//!     fn ended(&self) -> bool {
//!         false
//!     }
//!     fn current_time(&self) -> f64 {
//!         0.0
//!     }
//!     fn set_current_time(&mut self, _seconds: f64) {}
//!     fn duration(&self) -> f64 {
//!         f64::NAN
//!     }
//!     fn volume(&self) -> f64 {
//!         1.0
//!     }
//!     fn set_volume(&mut self, _volume: f64) {}
//!     fn load(&mut self, _src: &str) {}
//!     fn buffered(&self) -> Vec<TimeRange> {
//!         Vec::new()
//!     }
//! }
//!
//! let mut player = VideoPlayerBuilder::new().build().unwrap();
//! let sink = player.attach(Box::new(NullAdapter));
//!
//! // The host forwards element notifications and pumps the queue
//! sink.send(MediaEvent::LoadedData { duration: 120.0 });
//! player.process_events();
//!
//! assert!(player.snapshot().is_loaded);
//! assert_eq!(player.snapshot().duration, 120.0);
//! ```

pub mod adapter;
pub mod gesture;
pub mod player;
pub mod utils;

pub use adapter::{EventSink, MediaAdapter, MediaEvent, TimeRange};
pub use gesture::{GestureCoordinator, Key, PointerButton, ScrubState, TimelineGeometry};
pub use player::{
    CaptionTrack, PlaybackController, PlayerOptions, PlayerState, QualityTrack, SharedController,
    StateListener, VideoPlayer, VideoPlayerBuilder,
};
pub use utils::{
    clamp, format_progress, progress_percent, volume_icon, PlayerError, Result, VolumeIcon,
};
