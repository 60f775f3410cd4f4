//! Noir City: a top-down stealth shooter over a raster collision map.
//!
//! The binary is a thin wrapper; integration tests in `tests/` build headless
//! apps from the same `game` and `plugins` modules.

pub mod common;
pub mod game;
pub mod plugins;
