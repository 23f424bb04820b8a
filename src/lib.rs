//! Rendering core of a PIN-pad screen locker.
//!
//! Everything here is a function of (current state, monitor layout, pointer
//! position): the unlock/auth state machine decides what to draw, the
//! geometry engine places the widget per monitor, the hit tester maps
//! pointer coordinates back to keypad buttons, and the renderer composites
//! the widget into a shared ARGB backing surface. The windowing system,
//! credential verification and the password buffer itself live behind the
//! collaborator seams in [`render`].

use std::sync::atomic::AtomicBool;

/// Global debug flag - can be toggled at runtime by the host process
pub static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

// Debug print macro - only prints if DEBUG_ENABLED is true
// Compiled out entirely in release builds
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if $crate::DEBUG_ENABLED.load(std::sync::atomic::Ordering::Relaxed) {
            println!($($arg)*);
        }
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {};
}

pub mod drawing;
pub mod geometry;
pub mod hit_test;
pub mod render;
pub mod state;
pub mod surface;
pub mod text;
pub mod theme;

pub use geometry::ScreenRect;
pub use hit_test::PadButton;
pub use render::{
    FrameInput, HighlightSeed, Indicator, IndicatorConfig, IndicatorStyle, PresentTarget,
};
pub use state::{AuthState, IndicatorState, UnlockState};
pub use surface::BackingSurface;

/// Hard failures of the rendering core. Everything else degrades visually
/// (missing screen, bad colour string) instead of raising.
#[derive(Debug, thiserror::Error)]
pub enum IndicatorError {
    #[error("failed to allocate a {width}x{height} pixel surface")]
    SurfaceAlloc {
        width: u32,
        height: u32,
        #[source]
        source: std::collections::TryReserveError,
    },
    #[error("presenting the backing surface failed")]
    Present(#[source] anyhow::Error),
}
