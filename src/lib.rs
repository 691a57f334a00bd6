//! Duel Automata - generalized cellular-automaton engine with a
//! competitive two-sided ownership variant.
//!
//! The engine evolves a bounded two-dimensional grid of binary cells
//! under configurable survive/birth thresholds and an arbitrary
//! neighbor kernel. On top of the plain grid sits a duel mode where two
//! sides seed pieces and every newly born cell inherits its owner from
//! a majority vote over its neighborhood, with alternating tie-breaks
//! and running score accounting.
//!
//! The engine is synchronous: callers drive it from one periodic tick
//! source and read back cell buffers for rendering. The grid pass
//! itself fans out row-parallel on rayon.

pub mod automaton;
pub mod patterns;


pub use automaton::duel::{Cell, DuelConfig, DuelEngine, Phase, PlaceError, Side};
pub use automaton::grid::Grid;
pub use automaton::kernel::{moore8, KernelMask};
pub use patterns::Pattern;
