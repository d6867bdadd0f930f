//! # Domain Module
//!
//! Core domain types for the ad slot controller: the loading state machine,
//! the visibility filter, value objects and invariants.

pub mod errors;
pub mod invariants;
pub mod state;
pub mod value_objects;
pub mod visibility;

pub use errors::*;
pub use invariants::*;
pub use state::*;
pub use value_objects::*;
pub use visibility::*;
