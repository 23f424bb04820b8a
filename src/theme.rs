// Indicator colours and fixed drawing metrics
// All colours are u32 in packed ARGB format: 0xAARRGGBB

// Classic wheel disc fill (translucent, composited over the background)
pub const WHEEL_FILL_VERIFY: u32 = 0xBF_00_72_FF;
pub const WHEEL_FILL_WRONG: u32 = 0xBF_FA_00_00;
pub const WHEEL_FILL_IDLE: u32 = 0xBF_00_00_00;

// Classic wheel outer ring
pub const WHEEL_RING_VERIFY: u32 = 0xFF_33_00_FA;
pub const WHEEL_RING_WRONG: u32 = 0xFF_7D_33_00;
pub const WHEEL_RING_IDLE: u32 = 0xFF_33_7D_00;

// Highlight arc after a keypress: green for normal keys, red for backspace
pub const HIGHLIGHT_KEY: u32 = 0xFF_33_DB_00;
pub const HIGHLIGHT_BACKSPACE: u32 = 0xFF_DB_33_00;
pub const HIGHLIGHT_SEPARATOR: u32 = 0xFF_00_00_00;

// Wheel text, chosen per state so it stays readable on the ring colours
pub const TEXT_DARK: u32 = 0xFF_00_00_00;
pub const TEXT_LIGHT: u32 = 0xFF_FF_FF_FF;
// Failed-attempt counter is always red, whatever the wheel state
pub const ATTEMPTS_TEXT: u32 = 0xFF_FF_00_00;

// Pin-pad grid
pub const PAD_OUTLINE: u32 = 0xFF_00_00_00;
pub const PAD_FILL: u32 = 0x1A_00_00_00; // 10% black
pub const PAD_FILL_PRESSED: u32 = 0x66_00_00_00; // 40% black
pub const PAD_TEXT: u32 = 0xFF_00_00_00;

// Pin box text; half opacity while the backend is verifying
pub const PIN_BOX_TEXT: u32 = 0xFF_00_00_00;
pub const PIN_BOX_TEXT_VERIFYING: u32 = 0x80_00_00_00;

// Masked placeholder glyph: fixed, never the typed character
pub const PIN_MASK_GLYPH: char = '\u{25CF}'; // BLACK CIRCLE

#[cfg(feature = "debug-render")]
pub const DEBUG_WIDGET: u32 = 0xFF_FF_00_FF;
#[cfg(feature = "debug-render")]
pub const DEBUG_KEYPAD: u32 = 0xFF_00_FF_FF;
#[cfg(feature = "debug-render")]
pub const DEBUG_PIN_BOX: u32 = 0xFF_FF_FF_00;

// Classic wheel metrics (scaled by the DPI factor at draw time)
pub const WHEEL_RADIUS: f64 = 90.0;
pub const WHEEL_RING_WIDTH: f64 = 10.0;
pub const WHEEL_INNER_OFFSET: f64 = 5.0;
pub const WHEEL_INNER_WIDTH: f64 = 2.0;
pub const AUX_TEXT_OFFSET: f64 = 28.0;

pub const HIGHLIGHT_SPAN: f64 = std::f64::consts::PI / 3.0;
pub const HIGHLIGHT_SEPARATOR_SPAN: f64 = std::f64::consts::PI / 128.0;

// Font sizes
pub const STATUS_FONT_SIZE: f32 = 28.0;
pub const ATTEMPTS_FONT_SIZE: f32 = 32.0;
pub const AUX_FONT_SIZE: f32 = 14.0;
pub const PAD_FONT_SIZE: f32 = 32.0;
pub const PIN_BOX_FONT_SIZE: f32 = 48.0;
