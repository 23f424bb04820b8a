//! Widget sizing and placement.
//!
//! The same formulas feed both the renderer and the hit tester; any
//! divergence between the two produces buttons that are drawn in one place
//! and clicked in another, so every sub-region of the widget is derived
//! here and nowhere else.

/// Width : height aspect of the unlock widget. The formulas below always
/// produce a portrait box (height > width), whatever the monitor's
/// orientation.
pub const WIDGET_RATIO_WIDTH: u32 = 11;
pub const WIDGET_RATIO_HEIGHT: u32 = 16;

/// Inset between the widget edge and the keypad / pin-box content.
pub const WIDGET_PADDING: u32 = 16;

/// A pixel rectangle: one per physical monitor (the RandR layout), and the
/// shape of every derived widget region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict containment: a point exactly on the edge is outside.
    pub fn contains_strict(&self, x: i32, y: i32) -> bool {
        x > self.x
            && x < self.x + self.width as i32
            && y > self.y
            && y < self.y + self.height as i32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Widget width/height for a set of screens: sized from the smallest
/// monitor dimensions (the root resolution participates as an upper bound,
/// and stands in alone when `layout` is empty), 11:16 aspect, scaled by
/// `proportion`.
///
/// Callers sizing the widget for one particular monitor pass a
/// single-screen slice, so each monitor's own orientation governs, not the
/// combined desktop.
pub fn widget_dimensions(layout: &[ScreenRect], root: (u32, u32), proportion: f64) -> (u32, u32) {
    let mut smallest_width = root.0;
    let mut smallest_height = root.1;

    for screen in layout {
        if screen.width < smallest_width {
            smallest_width = screen.width;
        }
        if screen.height < smallest_height {
            smallest_height = screen.height;
        }
    }

    let (width, height) = if smallest_width < smallest_height {
        // Portrait
        let height = (smallest_width as f64 * WIDGET_RATIO_HEIGHT as f64
            / WIDGET_RATIO_WIDTH as f64)
            .ceil();
        (smallest_width as f64, height)
    } else {
        // Landscape
        let width = (smallest_height as f64 * WIDGET_RATIO_WIDTH as f64
            / WIDGET_RATIO_HEIGHT as f64)
            .ceil();
        (width, smallest_height as f64)
    };

    ((width * proportion) as u32, (height * proportion) as u32)
}

/// Top-left corner of a widget of the given size, centered on `screen`.
pub fn widget_position(screen: ScreenRect, width: u32, height: u32) -> (i32, i32) {
    let x = screen.x + (screen.width / 2) as i32 - (width / 2) as i32;
    let y = screen.y + (screen.height / 2) as i32 - (height / 2) as i32;
    (x, y)
}

/// Full widget rectangle for one monitor.
pub fn widget_geometry(screen: ScreenRect, root: (u32, u32), proportion: f64) -> ScreenRect {
    let (width, height) = widget_dimensions(std::slice::from_ref(&screen), root, proportion);
    let (x, y) = widget_position(screen, width, height);
    ScreenRect::new(x, y, width, height)
}

/// The keypad occupies the bottom square of the (portrait) widget, inset by
/// [`WIDGET_PADDING`] on all sides. Consumed by the renderer when drawing
/// the 3x4 grid and by the hit tester when resolving clicks.
pub fn keypad_region(widget: ScreenRect) -> ScreenRect {
    let side = widget.width;
    ScreenRect::new(
        widget.x + WIDGET_PADDING as i32,
        widget.y + widget.height.saturating_sub(side) as i32 + WIDGET_PADDING as i32,
        side.saturating_sub(2 * WIDGET_PADDING),
        side.saturating_sub(2 * WIDGET_PADDING),
    )
}

/// The status/clock box above the keypad: whatever the bottom square does
/// not cover, with the same inset.
pub fn pin_box_region(widget: ScreenRect) -> ScreenRect {
    ScreenRect::new(
        widget.x + WIDGET_PADDING as i32,
        widget.y + WIDGET_PADDING as i32,
        widget.width.saturating_sub(2 * WIDGET_PADDING),
        widget
            .height
            .saturating_sub(widget.width)
            .saturating_sub(2 * WIDGET_PADDING),
    )
}
