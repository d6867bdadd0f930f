//! Ad Slot Controller - core orchestration
//!
//! Owns one slot's state, subscribes it to the visibility channel and turns
//! visibility events and renderer outcomes into state machine events.
//!
//! Locking: the state mutex is never held while calling out. Renderer
//! commands, logger calls and listener calls all run after it is released,
//! so a renderer that answers synchronously from inside `load` is fine.
//! Listener calls raised from inside `load` are held back until `load`
//! returns, so a listener may unmount or recycle the slot it listens to.

use super::callbacks::RendererCallbacks;
use crate::config::AdSlotConfig;
use crate::domain::{
    ads_in_view, invariant_aspect_ratio, invariant_monotonic_cycle, invariant_single_load,
    is_slot_visible, AdInteraction, AdSlotError, AspectRatio, CycleToken, Effect, SlotEvent, SlotSnapshot, SlotSpec, SlotStatus, Transition,
};
use crate::metrics;
use crate::ports::{AdEventLogger, AdLogEvent, AdRenderer, AdRequest, AdSlotApi, UnitIdSource};
use parking_lot::{Mutex, RwLock};
use shared_bus::{EventTopic, Subscription, ViewabilityBus};
use shared_types::{AdLoadError, AdMetadata, CreativeKind, SlotIndex, ViewableItemsChanged};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Presentation hook for pass-through renderer notifications.
pub type InteractionListener = Arc<dyn Fn(SlotIndex, AdInteraction) + Send + Sync>;

/// Collaborators shared by every slot of a list.
#[derive(Clone)]
pub struct SlotContext {
    /// Visibility channel the slots subscribe to.
    pub bus: Arc<ViewabilityBus>,
    /// Controller policy.
    pub config: Arc<AdSlotConfig>,
    /// Log sink.
    pub logger: Arc<dyn AdEventLogger>,
    /// Ad-unit lookup, consulted once per cycle.
    pub unit_ids: Arc<dyn UnitIdSource>,
}

impl SlotContext {
    /// Context whose unit ids come from `config`.
    pub fn new(
        bus: Arc<ViewabilityBus>,
        config: AdSlotConfig,
        logger: Arc<dyn AdEventLogger>,
    ) -> Self {
        let unit_ids: Arc<dyn UnitIdSource> = Arc::new(config.unit_ids.clone());
        Self {
            bus,
            config: Arc::new(config),
            logger,
            unit_ids,
        }
    }

    /// Replace the ad-unit lookup.
    #[must_use]
    pub fn with_unit_ids(mut self, unit_ids: Arc<dyn UnitIdSource>) -> Self {
        self.unit_ids = unit_ids;
        self
    }
}

/// Mutable per-slot state, guarded by `SlotShared::state`.
struct SlotState {
    index: SlotIndex,
    kind: CreativeKind,
    load_on_mount: bool,
    has_media: bool,
    status: SlotStatus,
    cycle: CycleToken,
    loaded_ratio: Option<AspectRatio>,
    error: Option<AdLoadError>,
    loads_in_cycle: u32,
}

impl SlotState {
    fn new(spec: SlotSpec) -> Self {
        Self {
            index: spec.index,
            kind: spec.kind,
            load_on_mount: spec.load_on_mount,
            has_media: spec.has_media,
            status: SlotStatus::Idle,
            cycle: CycleToken::initial(),
            loaded_ratio: None,
            error: None,
            loads_in_cycle: 0,
        }
    }

    fn start_cycle(&mut self) {
        self.cycle = self.cycle.next();
        self.loaded_ratio = None;
        self.error = None;
        self.loads_in_cycle = 0;
    }

    fn snapshot(&self) -> SlotSnapshot {
        let snapshot = SlotSnapshot {
            index: self.index,
            kind: self.kind,
            status: self.status,
            cycle: self.cycle,
            has_media: self.has_media,
            loaded_ratio: self.loaded_ratio,
            error: self.error.clone(),
        };
        debug_assert!(invariant_aspect_ratio(snapshot.status, snapshot.aspect_ratio()));
        snapshot
    }
}

/// Listener calls raised while the renderer is inside `load`.
#[derive(Default)]
struct ListenerGate {
    in_load: bool,
    deferred: Vec<(SlotIndex, AdInteraction)>,
}

/// Work left over after a transition, performed without the state lock.
enum Followup {
    None,
    Load(AdRequest),
    Release,
    Unavailable {
        index: SlotIndex,
        cycle: CycleToken,
        error: AdLoadError,
    },
}

/// State and collaborators of one slot. Renderer callbacks hold it weakly.
pub(crate) struct SlotShared {
    state: Mutex<SlotState>,
    renderer: Mutex<Box<dyn AdRenderer>>,
    logger: Arc<dyn AdEventLogger>,
    unit_ids: Arc<dyn UnitIdSource>,
    config: Arc<AdSlotConfig>,
    listener: RwLock<Option<InteractionListener>>,
    gate: Mutex<ListenerGate>,
}

impl SlotShared {
    fn dispatch(self: &Arc<Self>, event: SlotEvent) -> Transition {
        self.dispatch_with(|_| event)
    }

    /// Pick the event under the state lock, apply it, then perform the
    /// followup outside the lock.
    fn dispatch_with(
        self: &Arc<Self>,
        choose: impl FnOnce(SlotStatus) -> SlotEvent,
    ) -> Transition {
        let (transition, followup) = {
            let mut state = self.state.lock();
            let event = choose(state.status);
            let transition = state.status.next(event);
            debug_assert!(
                invariant_monotonic_cycle(transition.from, transition.to, event).is_ok()
            );

            state.status = transition.to;
            let followup = match transition.effect {
                Effect::IssueLoad => self.issue(&mut state),
                Effect::RestartCycle => {
                    state.start_cycle();
                    self.issue(&mut state)
                }
                Effect::Release => {
                    state.start_cycle();
                    Followup::Release
                }
                Effect::None | Effect::RecordLoaded | Effect::RecordFailure => Followup::None,
            };
            (transition, followup)
        };

        self.perform(followup);
        transition
    }

    fn issue(&self, state: &mut SlotState) -> Followup {
        match self.unit_ids.unit_id(state.kind) {
            Some(unit_id) => {
                state.loads_in_cycle += 1;
                debug_assert!(invariant_single_load(state.loads_in_cycle));
                Followup::Load(AdRequest {
                    slot: state.index,
                    kind: state.kind,
                    unit_id: unit_id.to_string(),
                    refresh_interval: self.config.refresh_interval,
                    cycle: state.cycle,
                })
            }
            None => {
                let error = AdLoadError::new(AdSlotError::MissingUnitId(state.kind).to_string());
                state.status = SlotStatus::Failed;
                state.error = Some(error.clone());
                Followup::Unavailable {
                    index: state.index,
                    cycle: state.cycle,
                    error,
                }
            }
        }
    }

    fn perform(self: &Arc<Self>, followup: Followup) {
        match followup {
            Followup::None => {}
            Followup::Load(request) => {
                info!(
                    slot = request.slot,
                    cycle = %request.cycle,
                    kind = %request.kind,
                    unit_id = %request.unit_id,
                    "Issuing ad load"
                );
                metrics::record_load_requested(request.kind.as_str());
                let callbacks = RendererCallbacks::new(Arc::downgrade(self), request.cycle);
                self.gate.lock().in_load = true;
                self.renderer.lock().load(request, callbacks);
                self.flush_deferred();
            }
            Followup::Release => self.renderer.lock().release(),
            Followup::Unavailable {
                index,
                cycle,
                error,
            } => {
                warn!(slot = index, %cycle, error = %error, "Ad load not attempted");
                metrics::record_load_failed("unconfigured");
                self.log(
                    AdLogEvent::Failed,
                    &error.message,
                    serde_json::to_value(&error).ok().as_ref(),
                );
            }
        }
    }

    fn on_visibility(self: &Arc<Self>, event: &ViewableItemsChanged) {
        let index = self.state.lock().index;
        let marker = &self.config.ad_key_marker;

        if !is_slot_visible(event, index, marker) {
            if !ads_in_view(event, marker).is_empty() {
                self.log(AdLogEvent::NotInView, &index.to_string(), None);
            }
            return;
        }

        let retry_failed = self.config.retry_failed_on_visible;
        let transition = self.dispatch_with(|status| {
            if retry_failed && status == SlotStatus::Failed {
                SlotEvent::Retry
            } else {
                SlotEvent::BecameVisible
            }
        });

        let label = if transition.issues_load() {
            "Loading"
        } else {
            metrics::record_duplicate_trigger();
            debug!(slot = index, status = ?transition.from, "Visibility trigger suppressed");
            match transition.from {
                SlotStatus::Loaded => "Loaded",
                SlotStatus::Failed => "Failed",
                SlotStatus::Idle | SlotStatus::Loading => "Loading",
            }
        };
        self.log(AdLogEvent::InView, &format!("{label} {index}"), None);
    }

    /// Apply a renderer outcome for `cycle`. Outcomes of any other cycle are
    /// stale and dropped.
    pub(crate) fn settle(&self, cycle: CycleToken, outcome: Result<AdMetadata, AdLoadError>) {
        let event = if outcome.is_ok() {
            SlotEvent::RendererLoaded
        } else {
            SlotEvent::RendererFailed
        };

        let mut state = self.state.lock();
        if state.cycle != cycle {
            let current = state.cycle;
            drop(state);
            debug!(%cycle, %current, "Stale renderer outcome discarded");
            metrics::record_stale_callback();
            return;
        }

        let transition = state.status.next(event);
        debug_assert!(invariant_monotonic_cycle(transition.from, transition.to, event).is_ok());
        let (index, kind) = (state.index, state.kind);

        match (transition.effect, outcome) {
            (Effect::RecordLoaded, Ok(metadata)) => {
                let ratio = AspectRatio::new(metadata.aspect_ratio);
                state.status = transition.to;
                state.loaded_ratio = Some(ratio.clone().unwrap_or_default());
                state.error = None;
                drop(state);

                if let Err(err) = ratio {
                    warn!(slot = index, %cycle, error = %err, "Using default aspect ratio");
                }
                if transition.from == SlotStatus::Loading {
                    info!(slot = index, %cycle, %kind, aspect_ratio = metadata.aspect_ratio, "Ad loaded");
                    metrics::record_load_succeeded(kind.as_str());
                } else {
                    debug!(slot = index, %cycle, aspect_ratio = metadata.aspect_ratio, "Ad refreshed");
                }
                self.log(
                    AdLogEvent::Received,
                    "Ad metadata received",
                    serde_json::to_value(&metadata).ok().as_ref(),
                );
            }
            (Effect::RecordFailure, Err(error)) => {
                state.status = transition.to;
                state.error = Some(error.clone());
                drop(state);

                warn!(slot = index, %cycle, %kind, error = %error, "Ad failed to load");
                metrics::record_load_failed(kind.as_str());
                self.log(
                    AdLogEvent::Failed,
                    &error.message,
                    serde_json::to_value(&error).ok().as_ref(),
                );
            }
            (_, outcome) => {
                drop(state);
                debug!(
                    slot = index,
                    %cycle,
                    status = ?transition.from,
                    success = outcome.is_ok(),
                    "Renderer outcome ignored"
                );
            }
        }
    }

    /// Forward a pass-through notification for `cycle`.
    pub(crate) fn interaction(&self, cycle: CycleToken, interaction: AdInteraction) {
        let index = {
            let state = self.state.lock();
            if state.cycle != cycle {
                debug!(%cycle, current = %state.cycle, ?interaction, "Stale notification discarded");
                metrics::record_stale_callback();
                return;
            }
            state.index
        };

        let (event, message) = match interaction {
            AdInteraction::AdServed => (AdLogEvent::Loaded, "Ad has loaded successfully"),
            AdInteraction::Impression => (AdLogEvent::Impression, "Ad impression recorded"),
            AdInteraction::Clicked => (AdLogEvent::Click, "User has clicked the Ad"),
            AdInteraction::LeftApplication => (AdLogEvent::Left, "Ad left application"),
        };
        self.log(event, message, None);

        {
            let mut gate = self.gate.lock();
            if gate.in_load {
                gate.deferred.push((index, interaction));
                return;
            }
        }
        self.notify(index, interaction);
    }

    fn notify(&self, index: SlotIndex, interaction: AdInteraction) {
        let listener = self.listener.read().clone();
        if let Some(listener) = listener {
            listener(index, interaction);
        }
    }

    /// Deliver listener calls held back during `load`. Calls raised while
    /// flushing are queued and delivered by the same loop.
    fn flush_deferred(&self) {
        loop {
            let pending = {
                let mut gate = self.gate.lock();
                if gate.deferred.is_empty() {
                    gate.in_load = false;
                    return;
                }
                std::mem::take(&mut gate.deferred)
            };
            for (index, interaction) in pending {
                self.notify(index, interaction);
            }
        }
    }

    fn log(&self, event: AdLogEvent, message: &str, detail: Option<&serde_json::Value>) {
        self.logger
            .log(&self.config.log_category, event, message, detail);
    }
}

/// Controller for one ad slot.
///
/// Dropping the controller drops its bus subscription; callbacks still held
/// by a renderer become inert.
pub struct AdSlotController {
    shared: Arc<SlotShared>,
    bus: Arc<ViewabilityBus>,
    subscription: Mutex<Option<Subscription>>,
}

impl AdSlotController {
    /// Create an unmounted slot in `Idle`.
    pub fn new(spec: SlotSpec, renderer: Box<dyn AdRenderer>, ctx: &SlotContext) -> Self {
        Self {
            shared: Arc::new(SlotShared {
                state: Mutex::new(SlotState::new(spec)),
                renderer: Mutex::new(renderer),
                logger: Arc::clone(&ctx.logger),
                unit_ids: Arc::clone(&ctx.unit_ids),
                config: Arc::clone(&ctx.config),
                listener: RwLock::new(None),
                gate: Mutex::new(ListenerGate::default()),
            }),
            bus: Arc::clone(&ctx.bus),
            subscription: Mutex::new(None),
        }
    }

    /// Install the presentation hook for click/impression/left-application
    /// (and ad-served) notifications.
    ///
    /// Notifications a renderer raises from inside `load` reach the listener
    /// right after `load` returns.
    pub fn set_interaction_listener<F>(&self, listener: F)
    where
        F: Fn(SlotIndex, AdInteraction) + Send + Sync + 'static,
    {
        *self.shared.listener.write() = Some(Arc::new(listener));
    }

    /// Remove the presentation hook.
    pub fn clear_interaction_listener(&self) {
        *self.shared.listener.write() = None;
    }

    /// Whether the slot is subscribed to visibility events.
    pub fn is_mounted(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// List position owned by the slot.
    pub fn index(&self) -> SlotIndex {
        self.shared.state.lock().index
    }

    /// Current load cycle.
    pub fn cycle(&self) -> CycleToken {
        self.shared.state.lock().cycle
    }

    fn subscribe(&self) {
        let mut subscription = self.subscription.lock();
        if subscription.is_some() {
            return;
        }
        let slot = Arc::downgrade(&self.shared);
        *subscription = Some(self.bus.subscribe_fn(
            EventTopic::ViewableItemsChanged,
            move |event| {
                if let (Some(slot), Some(items)) = (slot.upgrade(), event.viewable_items()) {
                    slot.on_visibility(items);
                }
            },
        ));
    }

    fn reset(&self) {
        let transition = self.shared.dispatch(SlotEvent::Reset);
        debug!(slot = self.index(), from = ?transition.from, cycle = %self.cycle(), "Slot reset");
    }
}

impl AdSlotApi for AdSlotController {
    fn mount(&self) {
        self.subscribe();
        let load_on_mount = self.shared.state.lock().load_on_mount;
        self.shared.dispatch(SlotEvent::Mount { load_on_mount });
    }

    fn handle_viewable_items_changed(&self, event: &ViewableItemsChanged) {
        self.shared.on_visibility(event);
    }

    fn recycle(&self, kind: CreativeKind) {
        self.reset();
        self.shared.state.lock().kind = kind;
        self.mount();
    }

    fn unmount(&self) {
        self.reset();
        // Dropping the guard deregisters the handler.
        self.subscription.lock().take();
    }

    fn retry(&self) -> Result<(), AdSlotError> {
        let transition = self.shared.dispatch(SlotEvent::Retry);
        if transition.issues_load() {
            Ok(())
        } else {
            Err(AdSlotError::InvalidTransition {
                from: transition.from,
                operation: "retry",
            })
        }
    }

    fn snapshot(&self) -> SlotSnapshot {
        self.shared.state.lock().snapshot()
    }
}
