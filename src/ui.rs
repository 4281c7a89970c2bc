//! Terminal UI for fsc.
//!
//! - [render]: the frame renderer called by the terminal loop
//! - [widgets]: entry rows, width fitting and the help overlay

pub mod render;
pub mod widgets;

pub use render::render;
