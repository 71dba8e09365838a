//! Neon Rain - expanding, fading rings of color
//!
//! Core modules:
//! - `sim`: Deterministic ring simulation (spawn, grow, retire)
//! - `color`: HSL to RGB mapping for ring tints
//! - `renderer`: Draw list to WebGPU line loops
//! - `host`: Frame cadence and window mode shared by the entry points
//! - `settings`: Persisted preferences

pub mod color;
pub mod host;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use color::{ChannelRange, Rgb, hue_saturation_lightness_to_rgb};
pub use settings::{Settings, SettingsError};

/// Rain constants
pub mod consts {
    /// Maximum rings on screen at a time
    pub const MAX_RINGS: usize = 7;
    /// Ring capacity of the dense classic look
    pub const CLASSIC_MAX_RINGS: usize = 256;

    /// Spawn odds are `RAIN_INTENSITY` out of `SPAWN_ROLL_RANGE` per tick
    pub const SPAWN_ROLL_RANGE: u32 = 256;
    pub const RAIN_INTENSITY: u32 = 25;

    /// Ring tint (hue comes from the ring)
    pub const RING_SATURATION: f32 = 1.0;
    pub const RING_LIGHTNESS: f32 = 0.5;
    pub const RING_ALPHA: f32 = 0.5;

    /// Upper bounds on configurable spawn geometry (exclusive range ends)
    pub const MAX_SPAWN_RADIUS: i32 = 4096;
    pub const MAX_RADIUS_GAP: i32 = 4096;
    pub const MAX_INNER_RATE: i32 = 1024;

    /// Line segments per circle outline
    pub const CIRCLE_SEGMENTS: u32 = 60;

    /// Time between simulation ticks
    pub const FRAME_INTERVAL_MS: u64 = 50;
    /// Maximum ticks caught up in one frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 4;

    /// Windowed-mode size when none is given
    pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (600, 600);
    /// Root-mode size when the host cannot query the screen
    pub const ROOT_FALLBACK_SIZE: (u32, u32) = (1920, 1080);
}
