//! Gesture coordination for playhead
//!
//! Translates raw pointer and keyboard input into controller commands. The
//! coordinator owns the scrub drag state machine and the keyboard shortcut
//! map; it never touches the adapter directly and mutates playback only
//! through the shared controller handle.

mod keys;
mod scrub;

pub use keys::Key;
pub use scrub::{ScrubState, TimelineGeometry};

use crate::player::SharedController;
use scrub::ScrubHandler;

/// Pointer button reported with a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// The main button, usually left
    Primary,

    /// The secondary button, usually right
    Secondary,

    /// Any other button (middle, back, forward)
    Auxiliary,
}

/// Routes pointer and keyboard input to playback commands.
///
/// While a scrub is active the host must forward pointer moves and the
/// release regardless of where on screen they land, mirroring a
/// document-level pointer capture. [`cancel_scrub`](Self::cancel_scrub)
/// covers teardown paths such as focus loss.
pub struct GestureCoordinator {
    controller: SharedController,
    scrub: ScrubHandler,
    fullscreen: Option<keys::FullscreenHandler>,
}

impl GestureCoordinator {
    pub fn new(controller: SharedController) -> Self {
        Self {
            controller,
            scrub: ScrubHandler::new(),
            fullscreen: None,
        }
    }

    /// Register the host callback invoked by the fullscreen key.
    ///
    /// The fullscreen container is host-owned, so the coordinator can only
    /// signal the intent; without a handler the key is consumed and does
    /// nothing.
    pub fn on_fullscreen_toggle<F>(&mut self, handler: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.fullscreen = Some(Box::new(handler));
    }

    /// Current phase of the scrub gesture
    pub fn scrub_state(&self) -> ScrubState {
        self.scrub.state()
    }

    /// Whether a scrub drag is in progress
    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_scrubbing()
    }

    /// Press on the timeline track.
    ///
    /// Only the primary button starts a scrub; other buttons are ignored so
    /// context-menu clicks never seek. The press seeks immediately to the
    /// proportional position under the pointer.
    pub fn pointer_down(&mut self, x: f64, button: PointerButton, geometry: TimelineGeometry) {
        if button != PointerButton::Primary {
            return;
        }
        self.scrub.begin(&self.controller, x, geometry);
    }

    /// Pointer moved; only meaningful while scrubbing.
    pub fn pointer_move(&mut self, x: f64) {
        self.scrub.update(&self.controller, x);
    }

    /// Pointer released; ends the scrub, keeping the scrubbed position.
    pub fn pointer_up(&mut self) {
        self.scrub.finish(&self.controller);
    }

    /// Abort an in-flight scrub without a release.
    pub fn cancel_scrub(&mut self) {
        self.scrub.cancel(&self.controller);
    }

    /// Click on the media surface itself: restart when ended, otherwise
    /// toggle play/pause.
    pub fn surface_click(&mut self) {
        self.controller.lock().handle_surface_click();
    }

    /// Key press while the player has focus; returns whether the key was
    /// consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        keys::dispatch(&self.controller, &mut self.fullscreen, key)
    }

    /// Direct volume entry from a slider or similar control.
    pub fn volume_input(&mut self, volume: f64) {
        self.controller.lock().change_volume(volume);
    }
}
