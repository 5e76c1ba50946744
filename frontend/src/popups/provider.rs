use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use super::environment::Environment;
use super::frequency::{now_millis, FrequencyGate};
use super::kind::PopupType;
use super::queue::{PopupData, PopupOrchestrator, PopupRequest, QueueState};
use crate::config::PopupSettings;

pub enum PopupAction {
    Enqueue {
        kind: PopupType,
        data: PopupData,
        env: Environment,
        now_ms: i64,
    },
    Reconcile,
    Close,
    FinishCooldown(u64),
    Clear,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopupQueue {
    pub orchestrator: PopupOrchestrator,
}

impl Reducible for PopupQueue {
    type Action = PopupAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let orchestrator = &mut next.orchestrator;
        match action {
            PopupAction::Enqueue {
                kind,
                data,
                env,
                now_ms,
            } => {
                orchestrator.enqueue(kind, data, env, now_ms);
            }
            PopupAction::Reconcile => {
                if !orchestrator.needs_reconcile() {
                    return self;
                }
                orchestrator.reconcile();
            }
            PopupAction::Close => {
                orchestrator.close();
            }
            PopupAction::FinishCooldown(generation) => {
                if !orchestrator.finish_cooldown(generation) {
                    return self;
                }
            }
            PopupAction::Clear => orchestrator.clear(),
        }
        Rc::new(next)
    }
}

/// Handle to the popup queue, shared through context.
#[derive(Clone)]
pub struct PopupContext {
    queue: UseReducerHandle<PopupQueue>,
    settings: Rc<PopupSettings>,
}

impl PartialEq for PopupContext {
    fn eq(&self, other: &Self) -> bool {
        *self.queue == *other.queue && self.settings == other.settings
    }
}

impl PopupContext {
    pub fn queue_popup(&self, kind: PopupType, data: Option<PopupData>) {
        self.queue.dispatch(PopupAction::Enqueue {
            kind,
            data: data.unwrap_or_default(),
            env: Environment::current(self.settings.mobile_breakpoint_px),
            now_ms: now_millis(),
        });
    }

    pub fn close_popup(&self) {
        self.queue.dispatch(PopupAction::Close);
    }

    pub fn clear_queue(&self) {
        self.queue.dispatch(PopupAction::Clear);
    }

    pub fn active(&self) -> Option<&PopupRequest> {
        self.queue.orchestrator.active()
    }

    pub fn is_open(&self) -> bool {
        self.queue.orchestrator.is_open()
    }

    pub fn state(&self) -> QueueState {
        self.queue.orchestrator.state()
    }

    pub fn settings(&self) -> Rc<PopupSettings> {
        self.settings.clone()
    }
}

#[derive(Properties, PartialEq)]
pub struct PopupProviderProps {
    #[prop_or_default]
    pub settings: PopupSettings,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(PopupProvider)]
pub fn popup_provider(props: &PopupProviderProps) -> Html {
    let queue = use_reducer(PopupQueue::default);
    let settings = use_memo(|settings| settings.clone(), props.settings.clone());

    // Reconciliation follows every change that frees the slot.
    {
        let needs_reconcile = queue.orchestrator.needs_reconcile();
        let dispatcher = queue.dispatcher();
        use_effect_with_deps(
            move |needs_reconcile| {
                if *needs_reconcile {
                    dispatcher.dispatch(PopupAction::Reconcile);
                }
                || ()
            },
            needs_reconcile,
        );
    }

    // Post-close delay so the exit animation finishes before the next popup.
    {
        let cooling_down = queue.orchestrator.is_cooling_down();
        let generation = queue.orchestrator.close_generation();
        let delay = settings.close_delay_ms;
        let dispatcher = queue.dispatcher();
        use_effect_with_deps(
            move |&(cooling_down, generation)| {
                let timeout = cooling_down.then(|| {
                    Timeout::new(delay, move || {
                        dispatcher.dispatch(PopupAction::FinishCooldown(generation));
                    })
                });
                move || drop(timeout)
            },
            (cooling_down, generation),
        );
    }

    let context = PopupContext {
        queue,
        settings: settings.clone(),
    };

    html! {
        <ContextProvider<PopupContext> {context}>
            { for props.children.iter() }
        </ContextProvider<PopupContext>>
    }
}

#[hook]
pub fn use_popups() -> PopupContext {
    use_context::<PopupContext>().expect("use_popups called outside of PopupProvider")
}

/// Frequency decision for a popup that was handed the active slot.
///
/// Gated popups that were shown too recently close themselves right away so
/// the next request can take over; the rest record the display. Returns
/// whether the popup should render.
#[hook]
pub fn use_gated_open(kind: PopupType, is_open: bool, on_close: Callback<()>) -> bool {
    let cooldown_hours = use_popups().settings().cooldown_hours;
    let allowed = use_memo(
        move |&is_open| {
            !is_open || !kind.is_frequency_gated() || FrequencyGate::local(cooldown_hours).can_show(kind.as_str())
        },
        is_open,
    );

    {
        let allowed = *allowed;
        use_effect_with_deps(
            move |&is_open| {
                if is_open && kind.is_frequency_gated() {
                    if allowed {
                        FrequencyGate::local(cooldown_hours).mark_shown(kind.as_str());
                    } else {
                        log::debug!("{} shown too recently, skipping", kind);
                        on_close.emit(());
                    }
                }
                || ()
            },
            is_open,
        );
    }

    is_open && *allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use yew::Reducible;

    const NOW: i64 = 1_760_000_000_000;

    fn enqueue(kind: PopupType) -> PopupAction {
        PopupAction::Enqueue {
            kind,
            data: PopupData::new(),
            env: Environment::default(),
            now_ms: NOW,
        }
    }

    fn active_kind(queue: &PopupQueue) -> Option<PopupType> {
        queue.orchestrator.active().map(|request| request.kind)
    }

    #[test]
    fn idle_reconcile_keeps_the_same_state() {
        let queue = Rc::new(PopupQueue::default());
        let next = queue.clone().reduce(PopupAction::Reconcile);
        assert!(Rc::ptr_eq(&queue, &next));
    }

    #[test]
    fn enqueue_then_reconcile_opens_highest_priority() {
        let queue = Rc::new(PopupQueue::default())
            .reduce(enqueue(PopupType::LeadCapture))
            .reduce(enqueue(PopupType::CookieConsent));
        assert_eq!(active_kind(&queue), None);
        assert_eq!(queue.orchestrator.state(), QueueState::Pending);

        let queue = queue.reduce(PopupAction::Reconcile);
        assert_eq!(active_kind(&queue), Some(PopupType::CookieConsent));

        let again = queue.clone().reduce(PopupAction::Reconcile);
        assert!(Rc::ptr_eq(&queue, &again));
    }

    #[test]
    fn close_waits_for_matching_cooldown() {
        let queue = Rc::new(PopupQueue::default())
            .reduce(enqueue(PopupType::PromoOffer))
            .reduce(enqueue(PopupType::LeadCapture))
            .reduce(PopupAction::Reconcile)
            .reduce(PopupAction::Close);
        let generation = queue.orchestrator.close_generation();
        assert!(!queue.orchestrator.is_open());

        let held = queue.clone().reduce(PopupAction::Reconcile);
        assert!(Rc::ptr_eq(&queue, &held));
        assert_eq!(active_kind(&held), None);

        let stale = held.clone().reduce(PopupAction::FinishCooldown(generation - 1));
        assert!(Rc::ptr_eq(&held, &stale));

        let queue = stale
            .reduce(PopupAction::FinishCooldown(generation))
            .reduce(PopupAction::Reconcile);
        assert_eq!(active_kind(&queue), Some(PopupType::LeadCapture));
        assert!(queue.orchestrator.is_open());
    }

    #[test]
    fn clear_empties_everything() {
        let queue = Rc::new(PopupQueue::default())
            .reduce(enqueue(PopupType::ContactQuote))
            .reduce(enqueue(PopupType::LeadCapture))
            .reduce(PopupAction::Reconcile)
            .reduce(PopupAction::Clear);
        assert_eq!(queue.orchestrator.state(), QueueState::Idle);
        assert!(queue.orchestrator.pending().is_empty());
        assert!(!queue.orchestrator.is_open());
    }
}
