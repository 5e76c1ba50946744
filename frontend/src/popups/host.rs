use log::{debug, info};
use web_sys::window;
use yew::prelude::*;

use super::contact_quote::ContactQuotePopup;
use super::cookie_consent::CookieConsentPopup;
use super::exit_intent::ExitIntentPopup;
use super::frequency::FrequencyGate;
use super::kind::PopupType;
use super::lead_capture::LeadCapturePopup;
use super::modal::PopupProps;
use super::promo_offer::PromoOfferPopup;
use super::provider::use_popups;
use super::triggers::{use_cookie_consent_trigger, use_exit_intent_trigger, use_scroll_trigger};

/// Query flag that wipes frequency records and the queue, for support sessions.
const RESET_FLAG: &str = "reset-popups";

enum Reset {
    All,
    One(String),
}

/// `?reset-popups` clears every record, `?reset-popups=<popup id>` just one.
fn parse_reset(search: &str) -> Option<Reset> {
    search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| match pair.split_once('=') {
            Some((RESET_FLAG, "")) => Some(Reset::All),
            Some((RESET_FLAG, id)) => Some(Reset::One(id.to_string())),
            None if pair == RESET_FLAG => Some(Reset::All),
            _ => None,
        })
}

/// Mounts the page-wide triggers and renders whichever popup holds the active slot.
#[function_component(PopupHost)]
pub fn popup_host() -> Html {
    let popups = use_popups();

    {
        let popups = popups.clone();
        use_effect_with_deps(
            move |_| {
                let search = window().and_then(|w| w.location().search().ok());
                let gate = FrequencyGate::local(popups.settings().cooldown_hours);
                match search.as_deref().and_then(parse_reset) {
                    Some(Reset::All) => {
                        info!("Resetting all popup frequency records");
                        gate.clear_all();
                        popups.clear_queue();
                    }
                    Some(Reset::One(id)) => {
                        info!("Resetting frequency record for {}", id);
                        gate.reset(&id);
                    }
                    None => {}
                }
                || ()
            },
            (),
        );
    }

    {
        let state = popups.state();
        use_effect_with_deps(
            |state| {
                debug!("Popup queue is {:?}", state);
                || ()
            },
            state,
        );
    }

    use_cookie_consent_trigger();
    use_scroll_trigger(PopupType::LeadCapture);
    use_exit_intent_trigger();

    let on_close = {
        let popups = popups.clone();
        Callback::from(move |_: ()| popups.close_popup())
    };

    let props_for = |kind: PopupType| {
        let active = popups.active().filter(|request| request.kind == kind);
        PopupProps {
            is_open: active.is_some() && popups.is_open(),
            on_close: on_close.clone(),
            data: active.map(|request| request.data.clone()),
        }
    };

    html! {
        <div class="popup-host">
            <CookieConsentPopup ..props_for(PopupType::CookieConsent) />
            <ContactQuotePopup ..props_for(PopupType::ContactQuote) />
            <ExitIntentPopup ..props_for(PopupType::ExitIntent) />
            <PromoOfferPopup ..props_for(PopupType::PromoOffer) />
            <LeadCapturePopup ..props_for(PopupType::LeadCapture) />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(search: &str) -> Option<String> {
        parse_reset(search).map(|reset| match reset {
            Reset::All => "*".to_string(),
            Reset::One(id) => id,
        })
    }

    #[test]
    fn reset_flag_variants() {
        assert_eq!(parsed("?reset-popups"), Some("*".to_string()));
        assert_eq!(parsed("?utm=x&reset-popups="), Some("*".to_string()));
        assert_eq!(parsed("?reset-popups=exit-intent"), Some("exit-intent".to_string()));
        assert_eq!(parsed("?plan=Growth"), None);
        assert_eq!(parsed(""), None);
    }
}
