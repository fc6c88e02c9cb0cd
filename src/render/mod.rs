//! Terminal rendering
//!
//! The simulation never draws; renderers read `GameState` after a step.

pub mod renderer;
pub mod sink;

pub use renderer::Renderer;
pub use sink::{FrameSink, TerminalSink, TickLimiter};
