//! Fullscreen toggling against the host environment.

/// What the host environment offers for fullscreen display.
pub trait FullscreenHost {
    fn is_supported(&self) -> bool;
    fn is_fullscreen(&self) -> bool;
    fn request(&mut self);
    fn exit(&mut self);
}

/// Outcome of a fullscreen toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenChange {
    Entered,
    Exited,
    /// The host cannot go fullscreen; nothing happened.
    Unsupported,
}

/// Enters fullscreen, or leaves it if already there.
pub fn toggle_fullscreen<H: FullscreenHost + ?Sized>(host: &mut H) -> FullscreenChange {
    if !host.is_supported() {
        log::debug!("Fullscreen not supported, ignoring toggle");
        return FullscreenChange::Unsupported;
    }

    if host.is_fullscreen() {
        host.exit();
        FullscreenChange::Exited
    } else {
        host.request();
        FullscreenChange::Entered
    }
}

/// A host without a screen to fill, such as a terminal or a test harness.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl FullscreenHost for Headless {
    fn is_supported(&self) -> bool {
        false
    }

    fn is_fullscreen(&self) -> bool {
        false
    }

    fn request(&mut self) {}

    fn exit(&mut self) {}
}
