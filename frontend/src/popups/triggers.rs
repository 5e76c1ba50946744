//! Signals that propose popups. Each trigger only ever calls `queue_popup`;
//! none of them know whether something is already open.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use rand::Rng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Event, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use super::consent::{stored_decision, ConsentDecision};
use super::environment::Environment;
use super::frequency::LocalStore;
use super::kind::PopupType;
use super::provider::use_popups;

/// Scroll position as a percentage of the scrollable height. A page that
/// cannot scroll counts as fully scrolled.
pub fn scroll_depth_percent(scroll_top: f64, viewport_height: f64, document_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 100.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn random_delay_ms<R: Rng + ?Sized>(rng: &mut R, min_ms: u32, max_ms: u32) -> u32 {
    if min_ms >= max_ms {
        return min_ms;
    }
    rng.gen_range(min_ms..=max_ms)
}

/// Fires once, on whichever comes first: enough scroll depth or the delay.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTrigger {
    threshold_percent: f64,
    fired: bool,
}

impl ScrollTrigger {
    pub fn new(threshold_percent: f64) -> Self {
        Self {
            threshold_percent,
            fired: false,
        }
    }

    pub fn on_scroll(&mut self, depth_percent: f64) -> bool {
        if self.fired || depth_percent < self.threshold_percent {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn on_delay_elapsed(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Pointer leaving through the top edge arms a short confirmation; coming
/// back before it elapses disarms it. Fires at most once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExitIntentTrigger {
    armed: bool,
    fired: bool,
}

impl ExitIntentTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when a confirmation timer should be started.
    pub fn on_mouse_leave(&mut self, client_y: f64) -> bool {
        if self.fired || self.armed || client_y > 0.0 {
            return false;
        }
        self.armed = true;
        true
    }

    /// Returns true when a pending confirmation was cancelled.
    pub fn on_mouse_enter(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    /// The environment is checked here rather than at registration since the
    /// viewport and route can change after mount.
    pub fn on_confirm(&mut self, env: Environment) -> bool {
        if !std::mem::replace(&mut self.armed, false) || self.fired {
            return false;
        }
        if env.is_mobile || env.is_form_page {
            return false;
        }
        self.fired = true;
        true
    }
}

fn current_scroll_depth() -> Option<f64> {
    let window = window()?;
    let scroll_top = window.scroll_y().ok()?;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    let document_height = window.document()?.document_element()?.scroll_height() as f64;
    Some(scroll_depth_percent(scroll_top, viewport_height, document_height))
}

#[hook]
pub fn use_scroll_trigger(kind: PopupType) {
    let popups = use_popups();
    let settings = popups.settings();
    let trigger = use_mut_ref(|| ScrollTrigger::new(settings.scroll_threshold_percent));

    {
        let trigger = trigger.clone();
        let popups = popups.clone();
        use_event_with_window("scroll", move |_: Event| {
            if trigger.borrow().has_fired() {
                return;
            }
            let Some(depth) = current_scroll_depth() else {
                return;
            };
            if trigger.borrow_mut().on_scroll(depth) {
                debug!("Scroll depth {:.0}% reached, proposing {}", depth, kind);
                popups.queue_popup(kind, None);
            }
        });
    }

    {
        let (min_ms, max_ms) = (settings.scroll_delay_min_ms, settings.scroll_delay_max_ms);
        use_effect_with_deps(
            move |_| {
                let delay = random_delay_ms(&mut rand::thread_rng(), min_ms, max_ms);
                let timeout = Timeout::new(delay, move || {
                    if trigger.borrow_mut().on_delay_elapsed() {
                        debug!("{}ms elapsed, proposing {}", delay, kind);
                        popups.queue_popup(kind, None);
                    }
                });
                move || drop(timeout)
            },
            (),
        );
    }
}

#[hook]
pub fn use_exit_intent_trigger() {
    let popups = use_popups();
    let settings = popups.settings();

    use_effect_with_deps(
        move |_| {
            let trigger = Rc::new(RefCell::new(ExitIntentTrigger::new()));
            let confirmation: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

            let leave = {
                let trigger = trigger.clone();
                let confirmation = confirmation.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if !trigger.borrow_mut().on_mouse_leave(e.client_y() as f64) {
                        return;
                    }
                    let trigger = trigger.clone();
                    let popups = popups.clone();
                    let breakpoint = settings.mobile_breakpoint_px;
                    let timeout = Timeout::new(settings.exit_intent_confirm_ms, move || {
                        if trigger.borrow_mut().on_confirm(Environment::current(breakpoint)) {
                            debug!("Exit intent confirmed");
                            popups.queue_popup(PopupType::ExitIntent, None);
                        }
                    });
                    *confirmation.borrow_mut() = Some(timeout);
                }) as Box<dyn FnMut(MouseEvent)>)
            };

            let enter = {
                let confirmation = confirmation.clone();
                Closure::wrap(Box::new(move |_: MouseEvent| {
                    if trigger.borrow_mut().on_mouse_enter() {
                        // dropping the timeout cancels it
                        confirmation.borrow_mut().take();
                    }
                }) as Box<dyn FnMut(MouseEvent)>)
            };

            let root = window()
                .and_then(|w| w.document())
                .and_then(|d| d.document_element());
            if let Some(root) = &root {
                let _ = root.add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref());
                let _ = root.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref());
            }

            move || {
                if let Some(root) = root {
                    let _ = root.remove_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref());
                    let _ = root.remove_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref());
                }
                confirmation.borrow_mut().take();
            }
        },
        (),
    );
}

/// Proposes the consent banner on mount until a decision is stored.
#[hook]
pub fn use_cookie_consent_trigger() {
    let popups = use_popups();
    use_effect_with_deps(
        move |_| {
            if stored_decision(&LocalStore) == ConsentDecision::Undecided {
                popups.queue_popup(PopupType::CookieConsent, None);
            }
            || ()
        },
        (),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scroll_depth_is_clamped_percentage() {
        assert_eq!(scroll_depth_percent(0.0, 800.0, 2800.0), 0.0);
        assert_eq!(scroll_depth_percent(1000.0, 800.0, 2800.0), 50.0);
        assert_eq!(scroll_depth_percent(5000.0, 800.0, 2800.0), 100.0);
        assert_eq!(scroll_depth_percent(0.0, 800.0, 600.0), 100.0);
    }

    #[test]
    fn scroll_trigger_fires_once_at_threshold() {
        let mut trigger = ScrollTrigger::new(50.0);
        assert!(!trigger.on_scroll(49.9));
        assert!(trigger.on_scroll(50.0));
        assert!(!trigger.on_scroll(80.0));
        assert!(!trigger.on_delay_elapsed());
        assert!(trigger.has_fired());
    }

    #[test]
    fn scroll_trigger_delay_wins_when_first() {
        let mut trigger = ScrollTrigger::new(50.0);
        assert!(trigger.on_delay_elapsed());
        assert!(!trigger.on_scroll(100.0));
    }

    #[test]
    fn random_delay_stays_in_window() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let delay = random_delay_ms(&mut rng, 6000, 8000);
            assert!((6000..=8000).contains(&delay));
        }
        assert_eq!(random_delay_ms(&mut rng, 5000, 5000), 5000);
        assert_eq!(random_delay_ms(&mut rng, 9000, 5000), 9000);
    }

    #[test]
    fn exit_intent_requires_top_edge() {
        let mut trigger = ExitIntentTrigger::new();
        assert!(!trigger.on_mouse_leave(240.0));
        assert!(!trigger.on_confirm(Environment::default()));
        assert!(trigger.on_mouse_leave(0.0));
        assert!(trigger.on_confirm(Environment::default()));
    }

    #[test]
    fn exit_intent_reentry_cancels_confirmation() {
        let mut trigger = ExitIntentTrigger::new();
        assert!(trigger.on_mouse_leave(-3.0));
        assert!(trigger.on_mouse_enter());
        assert!(!trigger.on_confirm(Environment::default()));
        assert!(!trigger.on_mouse_enter());
    }

    #[test]
    fn exit_intent_checks_environment_at_fire_time() {
        let mut trigger = ExitIntentTrigger::new();
        let form = Environment { is_mobile: false, is_form_page: true };
        let mobile = Environment { is_mobile: true, is_form_page: false };

        assert!(trigger.on_mouse_leave(0.0));
        assert!(!trigger.on_confirm(form));
        assert!(trigger.on_mouse_leave(0.0));
        assert!(!trigger.on_confirm(mobile));
        // still eligible once back on a regular page
        assert!(trigger.on_mouse_leave(0.0));
        assert!(trigger.on_confirm(Environment::default()));
    }

    #[test]
    fn exit_intent_fires_once() {
        let mut trigger = ExitIntentTrigger::new();
        assert!(trigger.on_mouse_leave(0.0));
        assert!(trigger.on_confirm(Environment::default()));
        assert!(!trigger.on_mouse_leave(0.0));
        assert!(!trigger.on_confirm(Environment::default()));
    }
}
