//! Frame-loop input state for the fly camera.
//!
//! The windowing layer maps raw keys to [`Action`]s; this crate turns held
//! actions and pointer samples into camera calls.
//!
//! # Invariants
//! - The camera never sees raw pointer positions, only offsets from [`PointerLook`].
//! - The first pointer sample after look control is (re)enabled yields a zero offset.
//! - Toggles fire once per physical press.

pub mod action;
pub mod pointer;
pub mod state;

pub use action::{Action, FillMode};
pub use pointer::PointerLook;
pub use state::InputState;
