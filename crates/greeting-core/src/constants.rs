use std::time::Duration;

// Defaults for the greeting. `GreetingConfig::default()` is built from these.

// Lock screen
pub const PIN_CODE: &str = "2901";
pub const PIN_LENGTH: usize = 4;
pub const PIN_ERROR_DISPLAY: Duration = Duration::from_millis(500); // wrong-code shake before clearing

// Reveal: confetti runs for CONFETTI_DURATION, then waits CONFETTI_SETTLE before the cake
pub const CONFETTI_DURATION: Duration = Duration::from_millis(3000);
pub const CONFETTI_SETTLE: Duration = Duration::from_millis(500);

// Paired bursts fired every frame from the left and right edges
pub const BURST_PARTICLES: u32 = 2;
pub const BURST_SPREAD_DEG: f32 = 55.0;
pub const BURST_LEFT_ANGLE_DEG: f32 = 60.0;
pub const BURST_RIGHT_ANGLE_DEG: f32 = 120.0;
pub const BURST_ORIGIN_Y: f32 = 0.6; // fraction of viewport height
pub const CONFETTI_PALETTE: &[&str] = &["#FFE4E1", "#E6E6FA", "#B0C4DE", "#F0F8FF"];

// Confetti particle physics (per animation tick)
pub const CONFETTI_START_VELOCITY: f32 = 45.0;
pub const CONFETTI_DECAY: f32 = 0.9;
pub const CONFETTI_GRAVITY: f32 = 1.0;
pub const CONFETTI_TICKS: u32 = 200;

// Candle: pause on the smoking cake before the message screen
pub const CANDLE_ADVANCE_DELAY: Duration = Duration::from_millis(3500);

// Blow detection
pub const ANALYSER_FFT_SIZE: u32 = 256; // 128 frequency bins
pub const MAX_BIN_MAGNITUDE: f32 = 255.0;
pub const DEFAULT_BLOW_THRESHOLD: f32 = 50.0;

// Background music
pub const MUSIC_URL: &str = "https://cdn.pixabay.com/download/audio/2022/05/27/audio_1808fbf07a.mp3?filename=lofi-study-112762.mp3";
pub const MUSIC_VOLUME: f64 = 0.4;

// Cake layout (scene units)
pub const CANDLE_COUNT: usize = 8;
pub const CANDLE_RING_RADIUS: f32 = 0.6;
pub const CANDLE_COLORS: &[&str] = &["#F48FB1", "#CE93D8", "#90CAF9", "#80CBC4"];

// Volume meter
pub const METER_GAIN: f32 = 2.5; // percent of bar width per unit of volume
pub const MIC_ACTIVE_VOLUME: f32 = 10.0; // mic icon pulses above this

pub const RECIPIENT_NAME: &str = "बेनिशा";
pub const MIC_DENIED_NOTICE: &str = "Please allow microphone access to blow out the candles!";
