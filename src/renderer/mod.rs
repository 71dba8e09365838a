//! Rendering surfaces for the rain's draw lists
//!
//! The WebGPU pipeline draws every circle as a line loop; `FrameStats` stands
//! in where no GPU surface exists.

pub mod pipeline;
pub mod shapes;
pub mod stats;
pub mod vertex;

pub use pipeline::{RainRenderState, RenderError};
pub use shapes::{CircleOutline, circle_outline, draw_list_vertices};
pub use stats::FrameStats;
pub use vertex::Vertex;
