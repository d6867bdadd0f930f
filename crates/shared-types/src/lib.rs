//! # Shared Types Crate
//!
//! Value types shared by the visibility bus, the ad slot controller and the
//! feed runtime.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a crate boundary is
//!   defined here.
//! - **Wire-compatible payloads**: visibility and renderer payloads use the
//!   camelCase JSON shape the list and the native renderer emit.

pub mod entities;
pub mod errors;
pub mod visibility;

pub use entities::*;
pub use errors::*;
pub use visibility::*;
