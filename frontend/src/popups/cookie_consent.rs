use yew::prelude::*;

use super::consent::{store_decision, ConsentDecision};
use super::frequency::LocalStore;
use super::modal::{ModalShell, PopupProps};

#[function_component(CookieConsentPopup)]
pub fn cookie_consent_popup(props: &PopupProps) -> Html {
    let decide = |decision: ConsentDecision| {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            store_decision(&LocalStore, decision);
            log::info!("Cookie consent: {:?}", decision);
            on_close.emit(());
        })
    };

    html! {
        <ModalShell is_open={props.is_open} on_close={props.on_close.clone()} title="Cookies" class={classes!("cookie-consent")}>
            <p>{"We use a few cookies to understand which pages help people find us. Nothing is sold or shared."}</p>
            <div class="consent-actions">
                <button class="cta-button" onclick={decide(ConsentDecision::Accepted)}>{"Accept"}</button>
                <button class="secondary-button" onclick={decide(ConsentDecision::Declined)}>{"Decline"}</button>
            </div>
        </ModalShell>
    }
}
