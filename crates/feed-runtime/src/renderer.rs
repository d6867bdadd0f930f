//! # Simulated Renderer
//!
//! `AdRenderer` adapter standing in for the native ad view: every load is
//! answered from a tokio task after a jittered delay, and a seeded RNG
//! decides fill and creative shape.

use ad_slot_controller::{AdRenderer, AdRequest, RendererCallbacks};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use shared_types::{AdLoadError, AdMetadata, CreativeKind};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Error code the ad network uses for "no fill".
pub const NO_FILL_CODE: i32 = 3;

const IMAGE_RATIOS: [f64; 4] = [1.91, 1.0, 16.0 / 9.0, 0.8];
const VIDEO_RATIOS: [f64; 2] = [16.0 / 9.0, 9.0 / 16.0];

/// Renderer with network latency and partial fill.
pub struct SimulatedRenderer {
    handle: Handle,
    latency: Duration,
    fill_rate: f64,
    rng: StdRng,
    pending: Option<JoinHandle<()>>,
}

impl SimulatedRenderer {
    /// Create a renderer spawning onto `handle`.
    pub fn new(handle: Handle, latency: Duration, fill_rate: f64, seed: u64) -> Self {
        Self {
            handle,
            latency,
            fill_rate,
            rng: StdRng::seed_from_u64(seed),
            pending: None,
        }
    }

    fn draw(&mut self, request: &AdRequest) -> Result<AdMetadata, AdLoadError> {
        if !self.rng.gen_bool(self.fill_rate) {
            return Err(AdLoadError::new("No fill").with_code(NO_FILL_CODE));
        }

        let ratios: &[f64] = match request.kind {
            CreativeKind::Image => &IMAGE_RATIOS,
            CreativeKind::Video => &VIDEO_RATIOS,
        };
        let aspect_ratio = ratios.choose(&mut self.rng).copied().unwrap_or(1.0);

        Ok(AdMetadata {
            headline: Some(format!("Sponsored #{}", request.slot)),
            advertiser: Some("Simulated Advertiser".to_string()),
            call_to_action: Some("Install".to_string()),
            rating: Some(self.rng.gen_range(3.0..5.0)),
            video: request.kind == CreativeKind::Video,
            ..AdMetadata::with_aspect_ratio(aspect_ratio)
        })
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl AdRenderer for SimulatedRenderer {
    fn load(&mut self, request: AdRequest, callbacks: RendererCallbacks) {
        self.cancel_pending();

        let outcome = self.draw(&request);
        let delay = self.latency.mul_f64(self.rng.gen_range(0.5..1.5));
        debug!(
            slot = request.slot,
            cycle = %request.cycle,
            delay_ms = delay.as_millis() as u64,
            filled = outcome.is_ok(),
            "Simulated load scheduled"
        );

        self.pending = Some(self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            match outcome {
                Ok(metadata) => {
                    callbacks.on_ad_served();
                    callbacks.on_loaded(metadata);
                    callbacks.on_impression();
                }
                Err(error) => callbacks.on_failed(error),
            }
        }));
    }

    fn release(&mut self) {
        self.cancel_pending();
    }
}
