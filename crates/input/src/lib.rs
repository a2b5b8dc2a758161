//! Controls: raw key codes and mouse deltas mapped to semantic camera input.
//!
//! # Invariants
//! - The camera never sees raw key codes, only [`Movement`] flags.
//! - Mouse deltas only accumulate while input is engaged (pointer locked).
//! - Releasing engagement keeps the pressed-key state.

pub mod action;
mod controls;
mod layout;

pub use action::{ControlKey, Movement};
pub use controls::{Controls, MovementSource};
pub use layout::KeyLayout;

pub fn crate_info() -> &'static str {
    "cubegrid-input v0.1.0"
}
