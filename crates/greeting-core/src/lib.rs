//! Platform-agnostic core of the birthday greeting: the screen state machine,
//! the unlock pad, microphone blow detection, the confetti celebration and the
//! background-music state. The wasm front-end drives all of it from
//! `requestAnimationFrame`; everything here takes explicit timestamps so it can
//! be exercised on the host.

pub mod blow;
pub mod candle;
pub mod celebration;
pub mod config;
pub mod confetti;
pub mod constants;
pub mod controller;
pub mod error;
pub mod phase;
pub mod scene;
pub mod track;
pub mod unlock;

pub use blow::*;
pub use candle::*;
pub use celebration::*;
pub use config::*;
pub use confetti::*;
pub use controller::*;
pub use error::*;
pub use phase::*;
pub use scene::*;
pub use track::*;
pub use unlock::*;
