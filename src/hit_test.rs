//! Pointer-to-button resolution for the pin pad.
//!
//! Reconstructs the widget geometry of the screen under the pointer with
//! the exact formulas the renderer draws with ([`crate::geometry`]), so a
//! click lands on the button the user sees.

use crate::geometry::{self, ScreenRect};

/// One of the twelve logical keypad buttons. Carries no state; derived
/// purely from position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadButton {
    Digit(u8),
    Backspace,
    Submit,
}

impl PadButton {
    /// The grid cell at `col` (0..3) / `row` (0..4). Digit zero sits in the
    /// bottom row between backspace and submit, so the 1-based cell index
    /// does not map to digits in numeric order.
    pub fn from_grid(col: u32, row: u32) -> Option<Self> {
        match 1 + col + 3 * row {
            n @ 1..=9 => Some(PadButton::Digit(n as u8)),
            10 => Some(PadButton::Backspace),
            11 => Some(PadButton::Digit(0)),
            12 => Some(PadButton::Submit),
            _ => None,
        }
    }

    /// The label drawn on the button face.
    pub fn label(&self) -> &'static str {
        match self {
            PadButton::Digit(0) => "0",
            PadButton::Digit(1) => "1",
            PadButton::Digit(2) => "2",
            PadButton::Digit(3) => "3",
            PadButton::Digit(4) => "4",
            PadButton::Digit(5) => "5",
            PadButton::Digit(6) => "6",
            PadButton::Digit(7) => "7",
            PadButton::Digit(8) => "8",
            PadButton::Digit(9) => "9",
            PadButton::Digit(_) => "",
            PadButton::Backspace => "<=",
            PadButton::Submit => ">>",
        }
    }
}

/// Map a raw pointer coordinate to the keypad button under it, or `None`
/// when the pointer is outside the padded keypad region (boundary pixels
/// included: strict inequality on all four edges).
///
/// When the pointer is not strictly inside any screen, the first screen is
/// assumed; with no layout information at all, the root resolution stands
/// in as a single screen. Both fallbacks are logged, not fatal.
pub fn locate_button(
    x: i32,
    y: i32,
    layout: &[ScreenRect],
    root: (u32, u32),
    proportion: f64,
) -> Option<PadButton> {
    let root_screen = ScreenRect::new(0, 0, root.0, root.1);
    let screen = match layout.iter().find(|s| s.contains_strict(x, y)) {
        Some(screen) => *screen,
        None => {
            log::debug!("pointer ({x}, {y}) not inside any screen, assuming screen 0");
            *layout.first().unwrap_or(&root_screen)
        }
    };

    let widget = geometry::widget_geometry(screen, root, proportion);
    let pad = geometry::keypad_region(widget);
    if pad.is_empty() || !pad.contains_strict(x, y) {
        return None;
    }

    let local_x = (x - pad.x) as u32;
    let local_y = (y - pad.y) as u32;
    let col = 3 * local_x / pad.width;
    let row = 4 * local_y / pad.height;
    PadButton::from_grid(col, row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{keypad_region, widget_geometry};

    const ROOT: (u32, u32) = (1920, 1080);

    fn layout() -> Vec<ScreenRect> {
        vec![ScreenRect::new(0, 0, 1920, 1080)]
    }

    /// Centre of grid cell (col, row), computed from the same region the
    /// hit tester uses so drawing and hit testing cannot drift apart.
    fn cell_center(col: u32, row: u32) -> (i32, i32) {
        let widget = widget_geometry(layout()[0], ROOT, 0.6);
        let pad = keypad_region(widget);
        let cx = pad.x + (pad.width * (2 * col + 1) / 6) as i32;
        let cy = pad.y + (pad.height * (2 * row + 1) / 8) as i32;
        (cx, cy)
    }

    #[test]
    fn test_every_button_center_resolves_to_itself() {
        for row in 0..4 {
            for col in 0..3 {
                let (cx, cy) = cell_center(col, row);
                let hit = locate_button(cx, cy, &layout(), ROOT, 0.6);
                assert_eq!(
                    hit,
                    PadButton::from_grid(col, row),
                    "cell ({col}, {row}) at ({cx}, {cy})"
                );
            }
        }
    }

    #[test]
    fn test_bottom_row_remapping() {
        assert_eq!(PadButton::from_grid(0, 3), Some(PadButton::Backspace));
        assert_eq!(PadButton::from_grid(1, 3), Some(PadButton::Digit(0)));
        assert_eq!(PadButton::from_grid(2, 3), Some(PadButton::Submit));
        assert_eq!(PadButton::from_grid(1, 1), Some(PadButton::Digit(5)));
    }

    #[test]
    fn test_keypad_boundary_is_rejected() {
        let pad = keypad_region(widget_geometry(layout()[0], ROOT, 0.6));
        let inside_x = pad.x + pad.width as i32 / 2;
        let inside_y = pad.y + pad.height as i32 / 2;
        // Each edge, with the orthogonal coordinate safely inside
        for (x, y) in [
            (pad.x, inside_y),
            (pad.x + pad.width as i32, inside_y),
            (inside_x, pad.y),
            (inside_x, pad.y + pad.height as i32),
        ] {
            assert_eq!(locate_button(x, y, &layout(), ROOT, 0.6), None, "({x}, {y})");
        }
        assert!(locate_button(inside_x, inside_y, &layout(), ROOT, 0.6).is_some());
    }

    #[test]
    fn test_pointer_outside_widget_is_invalid() {
        assert_eq!(locate_button(1, 1, &layout(), ROOT, 0.6), None);
        assert_eq!(locate_button(1919, 1079, &layout(), ROOT, 0.6), None);
    }

    #[test]
    fn test_unmatched_pointer_falls_back_to_first_screen() {
        let two = vec![
            ScreenRect::new(0, 0, 1920, 1080),
            ScreenRect::new(1920, 0, 1080, 1920),
        ];
        // A coordinate on no screen still hit-tests against screen 0's
        // geometry; the centre of screen 0's pad is used as the probe.
        let widget = widget_geometry(two[0], (3000, 1920), 0.6);
        let pad = keypad_region(widget);
        let hit_inside = locate_button(
            pad.x + pad.width as i32 / 2,
            pad.y + pad.height as i32 / 2,
            &two,
            (3000, 1920),
            0.6,
        );
        assert!(hit_inside.is_some());

        let hit_nowhere = locate_button(-500, -500, &two, (3000, 1920), 0.6);
        assert_eq!(hit_nowhere, None);
    }

    #[test]
    fn test_empty_layout_uses_root_as_screen() {
        let widget = widget_geometry(ScreenRect::new(0, 0, ROOT.0, ROOT.1), ROOT, 0.6);
        let pad = keypad_region(widget);
        let hit = locate_button(
            pad.x + pad.width as i32 / 2,
            pad.y + pad.height as i32 / 2,
            &[],
            ROOT,
            0.6,
        );
        assert!(hit.is_some());
    }

    #[test]
    fn test_degenerate_screen_yields_no_button() {
        let tiny = vec![ScreenRect::new(0, 0, 30, 40)];
        for x in 0..30 {
            for y in 0..40 {
                assert_eq!(locate_button(x, y, &tiny, (30, 40), 0.6), None);
            }
        }
    }

    #[test]
    fn test_second_screen_buttons_resolve_on_second_screen() {
        let two = vec![
            ScreenRect::new(0, 0, 1920, 1080),
            ScreenRect::new(1920, 0, 1080, 1920),
        ];
        let widget = widget_geometry(two[1], (3000, 1920), 0.6);
        let pad = keypad_region(widget);
        // Centre of the submit cell (col 2, row 3) on the portrait monitor
        let cx = pad.x + (pad.width * 5 / 6) as i32;
        let cy = pad.y + (pad.height * 7 / 8) as i32;
        assert_eq!(
            locate_button(cx, cy, &two, (3000, 1920), 0.6),
            Some(PadButton::Submit)
        );
    }
}
