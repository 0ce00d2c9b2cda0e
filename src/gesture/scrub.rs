//! Timeline scrub drag state machine
//!
//! A scrub starts with a primary-button press on the timeline, continues
//! through pointer moves anywhere on screen, and ends on release or cancel.
//! The geometry captured at press time is used for every subsequent move, so
//! the drag stays consistent even if the layout reflows mid-gesture.

use crate::player::SharedController;
use crate::utils::clamp;
use log::debug;

/// Horizontal extent of the timeline track, in the same coordinate space as
/// the pointer positions fed to the gesture coordinator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineGeometry {
    /// Left edge of the track
    pub x: f64,

    /// Track width; a zero or negative width disables position mapping
    pub width: f64,
}

impl TimelineGeometry {
    pub fn new(x: f64, width: f64) -> Self {
        Self { x, width }
    }
}

/// Current phase of the scrub gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrubState {
    /// No drag in progress
    Idle,

    /// Dragging; geometry was captured at press time
    Scrubbing { geometry: TimelineGeometry },
}

/// Drives the controller through the phases of a scrub drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScrubHandler {
    state: ScrubState,
}

impl ScrubHandler {
    pub fn new() -> Self {
        Self {
            state: ScrubState::Idle,
        }
    }

    pub fn state(&self) -> ScrubState {
        self.state
    }

    pub fn is_scrubbing(&self) -> bool {
        matches!(self.state, ScrubState::Scrubbing { .. })
    }

    /// Begin a drag at `x` and seek there immediately.
    pub fn begin(&mut self, controller: &SharedController, x: f64, geometry: TimelineGeometry) {
        self.state = ScrubState::Scrubbing { geometry };
        let mut ctrl = controller.lock();
        ctrl.set_scrubbing(true);
        drop(ctrl);
        debug!("Scrub started at x={:.1}", x);
        apply_scrub(controller, &geometry, x);
    }

    /// Follow the pointer while dragging; ignored when idle.
    pub fn update(&mut self, controller: &SharedController, x: f64) {
        let ScrubState::Scrubbing { geometry } = self.state else {
            return;
        };
        apply_scrub(controller, &geometry, x);
    }

    /// End the drag, leaving the last scrubbed position in place.
    pub fn finish(&mut self, controller: &SharedController) {
        if !self.is_scrubbing() {
            return;
        }
        self.state = ScrubState::Idle;
        controller.lock().set_scrubbing(false);
        debug!("Scrub finished");
    }

    /// Abort the drag without a release, e.g. on focus loss.
    pub fn cancel(&mut self, controller: &SharedController) {
        if !self.is_scrubbing() {
            return;
        }
        self.state = ScrubState::Idle;
        controller.lock().set_scrubbing(false);
        debug!("Scrub cancelled");
    }
}

/// Map a pointer position onto the track as a fraction in `[0.0, 1.0]`.
pub(crate) fn track_ratio(x: f64, geometry: &TimelineGeometry) -> f64 {
    if !(geometry.width > 0.0) || !x.is_finite() {
        return 0.0;
    }
    clamp(x - geometry.x, 0.0, geometry.width) / geometry.width
}

fn apply_scrub(controller: &SharedController, geometry: &TimelineGeometry, x: f64) {
    let mut ctrl = controller.lock();
    if !ctrl.state().duration_known() {
        return;
    }
    let target = ctrl.state().duration * track_ratio(x, geometry);
    ctrl.seek_to(target);
}
