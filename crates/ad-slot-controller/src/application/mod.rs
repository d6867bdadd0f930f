//! # Application Layer
//!
//! The slot controller service and the callback handle it gives renderers.

pub mod callbacks;
pub mod controller;

pub use callbacks::RendererCallbacks;
pub use controller::{AdSlotController, InteractionListener, SlotContext};
