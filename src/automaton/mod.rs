//! Core engine logic: grid stepping, kernel editing, duel ownership.
//!
//! This module contains the actual logic for manipulating grid state,
//! stepping the automaton, and propagating cell ownership. Rendering,
//! input and UI live outside the crate and only consume the buffers
//! exposed here.

pub mod duel;
pub mod grid;
pub mod kernel;

pub use duel::{Cell, DuelConfig, DuelEngine, Phase, PlaceError, Side};
pub use grid::Grid;
pub use kernel::{moore8, KernelMask};
