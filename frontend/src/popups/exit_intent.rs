use yew::prelude::*;

use super::kind::PopupType;
use super::modal::{ModalShell, PopupProps};
use super::newsletter::NewsletterForm;
use super::provider::use_gated_open;

#[function_component(ExitIntentPopup)]
pub fn exit_intent_popup(props: &PopupProps) -> Html {
    let show = use_gated_open(PopupType::ExitIntent, props.is_open, props.on_close.clone());

    let dismiss = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <ModalShell is_open={show} on_close={props.on_close.clone()} title="Before you go..." class={classes!("exit-intent")}>
            <p>{"Get a free 10-minute video audit of your current site. We'll point out the three changes that would bring you the most leads."}</p>
            <NewsletterForm source="exit-intent" button_label="Send me the audit" />
            <button class="link-button" onclick={dismiss}>{"No thanks, my site is perfect"}</button>
        </ModalShell>
    }
}
