//! Deterministic rain simulation
//!
//! Everything that decides where rings appear and how they grow lives here:
//! - Seeded RNG only
//! - Stable ring order (spawn order)
//! - No rendering or platform dependencies

pub mod config;
pub mod draw;
pub mod ring;
pub mod state;
pub mod tick;

pub use config::{ConfigError, IntRange, RainConfig, RainPreset};
pub use draw::{DrawCall, DrawList};
pub use ring::{Ring, Viewport};
pub use state::RainState;
pub use tick::{advance_and_render, render_only};
