//! Mage Craft - digital playtest engine for a trading-card game
//!
//! Implements the turn-resolution and scoring core of Mage Craft:
//! staged card plays, Turn Strength Value (TSV) computation, and a
//! best-response opponent built on the same evaluation rules.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;

pub use error::{MagecraftError, Result};
