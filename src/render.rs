//! The render pass and the indicator context object.
//!
//! [`Indicator`] owns everything the pass needs (state, config, backing
//! surface cache, text renderer) and exposes the four entry points the
//! collaborators drive: `redraw`, `clear_indicator`, `free_cached_surface`
//! and `locate_button`. All drawing goes to in-memory buffers; the only
//! way pixels leave this module is the [`PresentTarget`] handoff at the
//! end of a pass.

use image::RgbaImage;
use rand::Rng;

use crate::drawing;
use crate::geometry::{self, ScreenRect};
use crate::hit_test::{self, PadButton};
use crate::state::{AuthState, IndicatorState, UnlockState};
use crate::surface::{BackingSurface, RenderCache};
use crate::text::TextRenderer;
use crate::theme;
use crate::IndicatorError;

/// Where the classic highlight arc starts after a keypress.
///
/// `Cursor` reproduces the historic behaviour of deriving the angle from
/// the input-buffer cursor, which ties the visible arc position to the
/// password length. `Random` decouples the two. The choice is deliberately
/// explicit instead of buried in the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightSeed {
    Cursor,
    Random,
}

/// Which indicator variant a pass renders. Both share the geometry and
/// state-machine layers; only the widget interior differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorStyle {
    Classic { highlight: HighlightSeed },
    PinPad,
}

/// Static rendering configuration, owned by the [`Indicator`].
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub style: IndicatorStyle,
    /// Widget size as a fraction of the monitor-derived dimensions.
    pub proportion: f64,
    /// Background fill as a 6-hex-digit colour string.
    pub colour: String,
    pub show_failed_attempts: bool,
    pub show_keyboard_layout: bool,
    /// Tile the background image across the resolution instead of a
    /// single blit at the origin.
    pub tile: bool,
    /// Classic variant only: whether the wheel is drawn at all.
    pub indicator_enabled: bool,
    /// Classic wheel scale, `dpi / 96.0`; supplied by the caller.
    pub dpi_scale: f64,
}

impl IndicatorConfig {
    pub fn classic() -> Self {
        Self {
            style: IndicatorStyle::Classic {
                highlight: HighlightSeed::Random,
            },
            proportion: 0.9,
            colour: "ffffff".to_string(),
            show_failed_attempts: false,
            show_keyboard_layout: false,
            tile: false,
            indicator_enabled: true,
            dpi_scale: 1.0,
        }
    }

    pub fn pin_pad() -> Self {
        Self {
            style: IndicatorStyle::PinPad,
            proportion: 0.6,
            ..Self::classic()
        }
    }
}

/// Everything a single pass consumes from the collaborators. Borrowed per
/// call; never retained. Note the password buffer itself stays outside:
/// only its length and the last typed character cross this boundary.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Monitor rectangles from the windowing system; may be empty.
    pub layout: &'a [ScreenRect],
    /// Root window resolution.
    pub resolution: (u32, u32),
    /// Current password buffer length.
    pub buffer_len: usize,
    /// Last typed character, for pin-pad "pressed" feedback.
    pub last_char: Option<char>,
    pub failed_attempts: u32,
    /// Raw active modifier names as reported by the keyboard layer;
    /// filtered to Caps Lock / Num Lock here.
    pub modifiers: &'a [&'a str],
    /// Active keyboard layout names.
    pub layout_names: &'a [&'a str],
    /// Pre-decoded background image, if any.
    pub background: Option<&'a RgbaImage>,
}

impl<'a> FrameInput<'a> {
    pub fn new(layout: &'a [ScreenRect], resolution: (u32, u32)) -> Self {
        Self {
            layout,
            resolution,
            buffer_len: 0,
            last_char: None,
            failed_attempts: 0,
            modifiers: &[],
            layout_names: &[],
            background: None,
        }
    }
}

/// The windowing collaborator's side of a render pass: swap the surface
/// into the lock window's background and repaint. Called exactly once per
/// pass, strictly after all drawing completed.
pub trait PresentTarget {
    fn present(&mut self, surface: &BackingSurface) -> anyhow::Result<()>;
}

/// The indicator context: explicitly owned state instead of module
/// globals, so every core function is testable in isolation.
pub struct Indicator {
    pub state: IndicatorState,
    pub config: IndicatorConfig,
    cache: RenderCache,
    text: TextRenderer,
}

impl Indicator {
    pub fn new(config: IndicatorConfig) -> Self {
        Self {
            state: IndicatorState::new(),
            config,
            cache: RenderCache::new(),
            text: TextRenderer::new(),
        }
    }

    /// Recompute and push a fresh frame.
    pub fn redraw(
        &mut self,
        frame: &FrameInput,
        target: &mut dyn PresentTarget,
    ) -> Result<(), IndicatorError> {
        crate::debug_println!(
            "redraw(unlock = {:?}, auth = {:?})",
            self.state.unlock,
            self.state.auth
        );
        let Self {
            state,
            config,
            cache,
            text,
        } = self;

        let surface = cache.acquire(frame.resolution)?;
        let stride = surface.width() as usize;
        let pixels = surface.pixels_mut();

        // Get the whole surface back into a defined state first; the
        // previous pass's contents are still in it.
        drawing::clear(pixels, drawing::parse_hex_colour(&config.colour));
        if let Some(img) = frame.background {
            drawing::paint_background(pixels, stride, img, config.tile);
        }

        // With no layout information we place one widget in the middle of
        // the root window and hope for the best.
        let root_screen = ScreenRect::new(0, 0, frame.resolution.0, frame.resolution.1);
        let screens: &[ScreenRect] = if frame.layout.is_empty() {
            std::slice::from_ref(&root_screen)
        } else {
            frame.layout
        };

        for screen in screens {
            let widget = geometry::widget_geometry(*screen, frame.resolution, config.proportion);
            if widget.is_empty() {
                continue;
            }
            let mut widget_pixels = alloc_pixels(widget.width, widget.height)?;
            draw_widget(
                &mut widget_pixels,
                widget.width,
                widget.height,
                state,
                config,
                frame,
                text,
            );
            drawing::composite(
                pixels,
                stride,
                &widget_pixels,
                widget.width as usize,
                widget.x,
                widget.y,
            );
        }

        target.present(surface).map_err(IndicatorError::Present)
    }

    /// Reset to the steady visual state for the current buffer and redraw.
    pub fn clear_indicator(
        &mut self,
        frame: &FrameInput,
        target: &mut dyn PresentTarget,
    ) -> Result<(), IndicatorError> {
        self.state.settle(frame.buffer_len);
        self.redraw(frame, target)
    }

    /// Drop the backing surface so the next redraw allocates one at the
    /// new resolution. Call around resolution changes.
    pub fn free_cached_surface(&mut self) {
        self.cache.invalidate();
    }

    /// Hit-test entry point for the input collaborator.
    pub fn locate_button(&self, x: i32, y: i32, frame: &FrameInput) -> Option<PadButton> {
        hit_test::locate_button(x, y, frame.layout, frame.resolution, self.config.proportion)
    }
}

fn alloc_pixels(width: u32, height: u32) -> Result<Vec<u32>, IndicatorError> {
    let len = width as usize * height as usize;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|source| IndicatorError::SurfaceAlloc {
            width,
            height,
            source,
        })?;
    pixels.resize(len, 0);
    Ok(pixels)
}

/// Render one widget into its off-screen buffer, widget-local coordinates.
fn draw_widget(
    pixels: &mut [u32],
    width: u32,
    height: u32,
    state: &IndicatorState,
    config: &IndicatorConfig,
    frame: &FrameInput,
    text: &mut TextRenderer,
) {
    #[cfg(feature = "debug-render")]
    drawing::clear(pixels, theme::DEBUG_WIDGET);

    let widget = ScreenRect::new(0, 0, width, height);
    match config.style {
        IndicatorStyle::PinPad => {
            draw_pin_pad(pixels, width as usize, widget, state, frame.last_char, text);
            draw_pin_box(pixels, width as usize, widget, state, frame.buffer_len, text);
        }
        IndicatorStyle::Classic { highlight } => {
            draw_classic_wheel(pixels, width, height, state, config, frame, highlight, text);
        }
    }
}

fn draw_pin_pad(
    pixels: &mut [u32],
    stride: usize,
    widget: ScreenRect,
    state: &IndicatorState,
    last_char: Option<char>,
    text: &mut TextRenderer,
) {
    let pad = geometry::keypad_region(widget);
    if pad.is_empty() {
        return;
    }

    #[cfg(feature = "debug-render")]
    drawing::fill_rect(
        pixels,
        stride,
        pad.x,
        pad.y,
        pad.width,
        pad.height,
        theme::DEBUG_KEYPAD,
    );

    for row in 0..4 {
        for col in 0..3 {
            if let Some(button) = PadButton::from_grid(col, row) {
                draw_pad_button(pixels, stride, pad, col, row, button, state, last_char, text);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_pad_button(
    pixels: &mut [u32],
    stride: usize,
    pad: ScreenRect,
    col: u32,
    row: u32,
    button: PadButton,
    state: &IndicatorState,
    last_char: Option<char>,
    text: &mut TextRenderer,
) {
    // Shrink by one so adjacent outlines merge into a single line
    let button_w = (pad.width / 3).saturating_sub(1);
    let button_h = (pad.height / 4).saturating_sub(1);
    if button_w == 0 || button_h == 0 {
        return;
    }
    let x = pad.x + 1 + (col * button_w) as i32;
    let y = pad.y + 3 + (row * button_h) as i32;

    let pressed = button_is_pressed(button, state, last_char);

    drawing::stroke_rect(pixels, stride, x, y, button_w, button_h, 2, theme::PAD_OUTLINE);
    drawing::fill_rect(
        pixels,
        stride,
        x,
        y,
        button_w,
        button_h,
        if pressed {
            theme::PAD_FILL_PRESSED
        } else {
            theme::PAD_FILL
        },
    );

    text.draw_text_center(
        pixels,
        stride,
        button.label(),
        x as f32 + button_w as f32 / 2.0,
        y as f32 + button_h as f32 / 2.0,
        theme::PAD_FONT_SIZE,
        theme::PAD_TEXT,
    );
}

/// Whether the button is drawn in its pressed shade. The only per-key
/// information crossing into the visual layer is whether the last typed
/// character matches this button's face.
fn button_is_pressed(button: PadButton, state: &IndicatorState, last_char: Option<char>) -> bool {
    if state.auth == AuthState::Verifying && button == PadButton::Submit {
        return true;
    }
    match state.unlock {
        UnlockState::PadActive => {
            last_char.is_some() && last_char == button.label().chars().next()
        }
        UnlockState::PadBackspaceActive => button == PadButton::Backspace,
        _ => false,
    }
}

fn draw_pin_box(
    pixels: &mut [u32],
    stride: usize,
    widget: ScreenRect,
    state: &IndicatorState,
    buffer_len: usize,
    text: &mut TextRenderer,
) {
    let region = geometry::pin_box_region(widget);
    if region.is_empty() {
        return;
    }

    #[cfg(feature = "debug-render")]
    drawing::fill_rect(
        pixels,
        stride,
        region.x,
        region.y,
        region.width,
        region.height,
        theme::DEBUG_PIN_BOX,
    );

    let (content, colour) = pin_box_content(state, buffer_len, chrono::Local::now());
    if content.is_empty() {
        return;
    }

    text.draw_text_center(
        pixels,
        stride,
        &content,
        region.x as f32 + region.width as f32 / 2.0,
        region.y as f32 + region.height as f32 / 2.0,
        theme::PIN_BOX_FONT_SIZE,
        colour,
    );
}

/// What the pin box shows for a given state and buffer length. Typed
/// characters never reach this function; the masked line is built from the
/// fixed placeholder glyph and the length alone.
fn pin_box_content(
    state: &IndicatorState,
    buffer_len: usize,
    now: chrono::DateTime<chrono::Local>,
) -> (String, u32) {
    let masked = || theme::PIN_MASK_GLYPH.to_string().repeat(buffer_len);
    match state.auth {
        AuthState::Verifying => (masked(), theme::PIN_BOX_TEXT_VERIFYING),
        AuthState::Locking => ("Locking…".to_string(), theme::PIN_BOX_TEXT),
        AuthState::Wrong => ("Wrong!".to_string(), theme::PIN_BOX_TEXT),
        AuthState::LoadFailed => ("Lock failed!".to_string(), theme::PIN_BOX_TEXT),
        AuthState::Idle => {
            if buffer_len == 0 {
                // Idle with nothing typed doubles as a lock-screen clock
                (now.format("%H:%M").to_string(), theme::PIN_BOX_TEXT)
            } else {
                (masked(), theme::PIN_BOX_TEXT)
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_classic_wheel(
    pixels: &mut [u32],
    width: u32,
    height: u32,
    state: &IndicatorState,
    config: &IndicatorConfig,
    frame: &FrameInput,
    highlight: HighlightSeed,
    text: &mut TextRenderer,
) {
    if !config.indicator_enabled || !state.shows_indicator() {
        return;
    }

    let stride = width as usize;
    let scale = config.dpi_scale;
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let radius = theme::WHEEL_RADIUS * scale;
    let ring_width = theme::WHEEL_RING_WIDTH * scale;

    let nothing_to_delete = state.unlock == UnlockState::NothingToDelete;

    let fill = match state.auth {
        AuthState::Verifying | AuthState::Locking => theme::WHEEL_FILL_VERIFY,
        AuthState::Wrong | AuthState::LoadFailed => theme::WHEEL_FILL_WRONG,
        AuthState::Idle if nothing_to_delete => theme::WHEEL_FILL_WRONG,
        AuthState::Idle => theme::WHEEL_FILL_IDLE,
    };
    drawing::fill_circle(pixels, stride, cx, cy, radius, fill);

    let (ring, use_dark_text) = match state.auth {
        AuthState::Verifying | AuthState::Locking => (theme::WHEEL_RING_VERIFY, true),
        AuthState::Wrong | AuthState::LoadFailed => (theme::WHEEL_RING_WRONG, true),
        AuthState::Idle if nothing_to_delete => (theme::WHEEL_RING_WRONG, true),
        AuthState::Idle => (theme::WHEEL_RING_IDLE, false),
    };
    drawing::stroke_ring(pixels, stride, cx, cy, radius, ring_width, ring);

    // Inner separator line
    drawing::stroke_ring(
        pixels,
        stride,
        cx,
        cy,
        radius - theme::WHEEL_INNER_OFFSET * scale,
        theme::WHEEL_INNER_WIDTH * scale,
        theme::HIGHLIGHT_SEPARATOR,
    );

    let text_colour = if use_dark_text {
        theme::TEXT_DARK
    } else {
        theme::TEXT_LIGHT
    };

    if let Some((status, size, colour)) =
        wheel_status(state, config.show_failed_attempts, frame.failed_attempts, text_colour)
    {
        text.draw_text_center(
            pixels,
            stride,
            &status,
            cx as f32,
            cy as f32,
            size * scale as f32,
            colour,
        );
    }

    if let Some(line) = modifier_line(frame.modifiers) {
        text.draw_text_center(
            pixels,
            stride,
            &line,
            cx as f32,
            (cy + theme::AUX_TEXT_OFFSET * scale) as f32,
            theme::AUX_FONT_SIZE * scale as f32,
            text_colour,
        );
    }
    if config.show_keyboard_layout {
        if let Some(line) = layout_line(frame.layout_names) {
            text.draw_text_center(
                pixels,
                stride,
                &line,
                cx as f32,
                (cy - theme::AUX_TEXT_OFFSET * scale) as f32,
                theme::AUX_FONT_SIZE * scale as f32,
                text_colour,
            );
        }
    }

    // Confirm the keypress by highlighting one arc segment. The arc colour
    // distinguishes key from backspace; its position never encodes which
    // key it was.
    if matches!(
        state.unlock,
        UnlockState::KeyActive | UnlockState::BackspaceActive
    ) {
        let start = highlight_start(highlight, frame.buffer_len);
        let colour = if state.unlock == UnlockState::KeyActive {
            theme::HIGHLIGHT_KEY
        } else {
            theme::HIGHLIGHT_BACKSPACE
        };
        drawing::stroke_arc(
            pixels,
            stride,
            cx,
            cy,
            radius,
            ring_width,
            start,
            start + theme::HIGHLIGHT_SPAN,
            colour,
        );

        // Two little separators bracketing the highlighted part
        for (sep_start, sep_end) in [
            (start, start + theme::HIGHLIGHT_SEPARATOR_SPAN),
            (
                start + theme::HIGHLIGHT_SPAN - theme::HIGHLIGHT_SEPARATOR_SPAN,
                start + theme::HIGHLIGHT_SPAN,
            ),
        ] {
            drawing::stroke_arc(
                pixels,
                stride,
                cx,
                cy,
                radius,
                ring_width,
                sep_start,
                sep_end,
                theme::HIGHLIGHT_SEPARATOR,
            );
        }
    }
}

/// The wheel's centre line: text, font size and colour. The failed-attempt
/// counter overrides the status text while the backend is idle and is
/// always drawn in red.
fn wheel_status(
    state: &IndicatorState,
    show_failed_attempts: bool,
    failed_attempts: u32,
    text_colour: u32,
) -> Option<(String, f32, u32)> {
    if state.auth == AuthState::Idle && show_failed_attempts {
        if let Some(attempts) = failed_attempts_text(failed_attempts) {
            return Some((attempts, theme::ATTEMPTS_FONT_SIZE, theme::ATTEMPTS_TEXT));
        }
    }
    let status = match state.auth {
        AuthState::Verifying => "Verifying…",
        AuthState::Locking => "Locking…",
        AuthState::Wrong => "Wrong!",
        AuthState::LoadFailed => "Lock failed!",
        AuthState::Idle if state.unlock == UnlockState::NothingToDelete => "No input",
        AuthState::Idle => return None,
    };
    Some((status.to_string(), theme::STATUS_FONT_SIZE, text_colour))
}

fn highlight_start(seed: HighlightSeed, buffer_len: usize) -> f64 {
    match seed {
        HighlightSeed::Cursor => (buffer_len % 628) as f64 / 100.0,
        HighlightSeed::Random => rand::thread_rng().gen_range(0.0..std::f64::consts::TAU),
    }
}

/// Failed-attempt counter as display text. More than three digits would
/// not fit the wheel, so the value is capped at "> 999".
pub fn failed_attempts_text(attempts: u32) -> Option<String> {
    match attempts {
        0 => None,
        1..=999 => Some(attempts.to_string()),
        _ => Some("> 999".to_string()),
    }
}

/// Active-modifier line for the wheel. Only Caps Lock and Num Lock are
/// shown; other modifiers (e.g. Shift) leak state about the password.
pub fn modifier_line(modifiers: &[&str]) -> Option<String> {
    let mut line: Option<String> = None;
    for modifier in modifiers {
        let name = match *modifier {
            "Lock" | "Caps Lock" => "Caps Lock",
            "Mod2" | "NumLock" | "Num Lock" => "Num Lock",
            _ => continue,
        };
        match &mut line {
            None => line = Some(name.to_string()),
            Some(line) => {
                line.push_str(", ");
                line.push_str(name);
            }
        }
    }
    line
}

/// Keyboard layout name line, joined when several layouts are active.
pub fn layout_line(names: &[&str]) -> Option<String> {
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}
