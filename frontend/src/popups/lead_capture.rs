use yew::prelude::*;

use super::kind::PopupType;
use super::modal::{ModalShell, PopupProps};
use super::newsletter::NewsletterForm;
use super::provider::use_gated_open;

#[function_component(LeadCapturePopup)]
pub fn lead_capture_popup(props: &PopupProps) -> Html {
    let show = use_gated_open(PopupType::LeadCapture, props.is_open, props.on_close.clone());

    html! {
        <ModalShell is_open={show} on_close={props.on_close.clone()} title="Free website launch checklist" class={classes!("lead-capture")}>
            <p>{"27 things we check before every client site goes live: speed, SEO basics, forms, analytics and more."}</p>
            <NewsletterForm source="lead-capture" />
            <p class="fine-print">{"One email a month. Unsubscribe anytime."}</p>
        </ModalShell>
    }
}
