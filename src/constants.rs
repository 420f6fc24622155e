/// Element ids and drawing constants for the web front-end.
///
/// The page layout lives in `index.html`; these ids are the contract between
/// the markup and the wasm module.
// Screens, one per phase
pub const SCREEN_LOCKED: &str = "screen-locked";
pub const SCREEN_REVEAL: &str = "screen-reveal";
pub const SCREEN_CANDLE: &str = "screen-candle";
pub const SCREEN_MESSAGE: &str = "screen-message";

// Global controls
pub const BACK_BUTTON: &str = "back-button";
pub const MUSIC_BUTTON: &str = "music-button";

// Lock pad
pub const PIN_DOTS: &str = "pin-dots";
pub const PIN_DOT_PREFIX: &str = "pin-dot-"; // pin-dot-0 .. pin-dot-3
pub const LOCK_ICON: &str = "lock-icon";
pub const PAD_DELETE: &str = "pad-delete";
pub const PAD_KEY_PREFIX: &str = "pad-key-"; // pad-key-0 .. pad-key-9

// Cake screen
pub const CAKE_CANVAS: &str = "cake-canvas";
pub const RECIPIENT_NAME: &str = "recipient-name";
pub const LIGHT_BUTTON: &str = "light-button";
pub const BLOW_PANEL: &str = "blow-panel";
pub const MIC_ICON: &str = "mic-icon";
pub const VOLUME_BAR: &str = "volume-bar";
pub const HINT_BUTTON: &str = "hint-button";
pub const HINT_TEXT: &str = "hint-text";
pub const WISH_TEXT: &str = "wish-text";

// Message screen
pub const SECRET_BUTTON: &str = "secret-button";
pub const SECRET_NOTE: &str = "secret-note";

// Full-window overlay for confetti
pub const CONFETTI_CANVAS: &str = "confetti-canvas";

// CSS classes toggled from Rust
pub const CLASS_HIDDEN: &str = "hidden";
pub const CLASS_FILLED: &str = "filled";
pub const CLASS_ERROR: &str = "error";
pub const CLASS_PULSE: &str = "pulse";

// Cake drawing (scene units, see greeting_core::scene)
pub const CAKE_BASE_Y: f32 = -1.0;
pub const PLATE_RADIUS: f32 = 1.5;
pub const BOTTOM_TIER: (f32, f32, f32) = (1.2, 0.0, 1.0); // radius, bottom y, height
pub const TOP_TIER: (f32, f32, f32) = (0.9, 0.9, 0.8);
pub const CANDLE_RING_Y: f32 = 1.7;
pub const CANDLE_HEIGHT: f32 = 0.5;
pub const FLAME_RADIUS: f32 = 0.06;

pub const PLATE_COLOR: &str = "#F5F5F5";
pub const TIER_COLOR: &str = "#F48FB1";
pub const TIER_SHADE: &str = "#D9779A";
pub const FROSTING_COLOR: &str = "#FFFFFF";
pub const WICK_COLOR: &str = "#333333";
pub const FLAME_CORE: &str = "#FF5500";
pub const FLAME_GLOW: &str = "rgba(255, 170, 0, 0.35)";
pub const SMOKE_COLOR: &str = "rgba(160, 160, 160, 0.3)";
