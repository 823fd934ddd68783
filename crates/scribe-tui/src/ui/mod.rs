//! Terminal UI: keyboard input handling and ratatui rendering.

pub mod input;
pub mod render;
pub mod styles;
