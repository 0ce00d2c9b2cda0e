//! Keyboard shortcut dispatch
//!
//! Translates player-focused key presses into controller commands. The
//! dispatch returns whether the key was consumed so the host can stop
//! further handling (in particular the default page-scroll behavior of
//! Space and the arrow keys).

use crate::player::SharedController;

/// Keys the player reacts to while it has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Seek to the start
    Home,

    /// Seek to the end
    End,

    /// Toggle play/pause
    Space,

    /// Seek backward by the configured step
    ArrowLeft,

    /// Seek forward by the configured step
    ArrowRight,

    /// Raise volume by the configured step
    ArrowUp,

    /// Lower volume by the configured step
    ArrowDown,

    /// Toggle mute
    M,

    /// Toggle captions
    C,

    /// Request a fullscreen toggle from the host
    F,
}

/// Host callback invoked when the fullscreen key is pressed. Fullscreen
/// request/exit are scoped to a container the host owns, so the crate can
/// only signal the intent.
pub(crate) type FullscreenHandler = Box<dyn FnMut() + Send>;

/// Apply a key press to the controller. Always consumes the key; every
/// variant maps to a command or a host signal.
pub(crate) fn dispatch(
    controller: &SharedController,
    fullscreen: &mut Option<FullscreenHandler>,
    key: Key,
) -> bool {
    let mut ctrl = controller.lock();
    let seek_step = ctrl.options().seek_step;
    let volume_step = ctrl.options().volume_step;

    match key {
        Key::Home => ctrl.go_to_start(),
        Key::End => ctrl.go_to_end(),
        Key::Space => ctrl.toggle_playing(),
        Key::ArrowLeft => ctrl.skip(-seek_step),
        Key::ArrowRight => ctrl.skip(seek_step),
        Key::ArrowUp => ctrl.bump_volume(volume_step),
        Key::ArrowDown => ctrl.bump_volume(-volume_step),
        Key::M => ctrl.toggle_mute(),
        Key::C => ctrl.toggle_captions(),
        Key::F => {
            drop(ctrl);
            if let Some(handler) = fullscreen.as_mut() {
                handler();
            }
        }
    }
    true
}
