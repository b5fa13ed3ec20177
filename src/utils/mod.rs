//! Utility modules shared across the renderer.

pub mod html;
pub mod size;
