//! # Adapters Layer (Hexagonal Architecture)
//!
//! Production implementations of the outbound ports.

mod tracing_logger;

pub use tracing_logger::TracingAdLogger;
