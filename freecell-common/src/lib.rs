//! Cards, positions and moves shared by the FreeCell solver and its front ends.
pub mod board;
pub mod card;
pub mod error;
pub mod moves;

pub use crate::error::Error;
