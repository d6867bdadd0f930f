//! # Feed Runtime Library
//!
//! This library exposes the simulator's modules for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Modular Structure
//!
//! - `config` - `FeedConfig` from `FEED_*` environment variables
//! - `feed` - list model and visibility payloads per scroll position
//! - `renderer` - `AdRenderer` with latency and partial fill
//! - `runtime` - slot wiring and the scroll loop

#![warn(missing_docs)]

pub mod config;
pub mod feed;
pub mod renderer;
pub mod runtime;

pub use config::FeedConfig;
pub use feed::{Feed, FeedItem};
pub use renderer::SimulatedRenderer;
pub use runtime::{FeedRuntime, FeedSummary, StatusCounts};
