use yew::prelude::*;
use yew_router::prelude::*;

use super::kind::PopupType;
use super::modal::{ModalShell, PopupProps};
use super::provider::use_gated_open;
use crate::Route;

const DEFAULT_DISCOUNT: &str = "15%";

#[function_component(PromoOfferPopup)]
pub fn promo_offer_popup(props: &PopupProps) -> Html {
    let show = use_gated_open(PopupType::PromoOffer, props.is_open, props.on_close.clone());

    let discount = props
        .data
        .as_ref()
        .and_then(|data| data.get("discount"))
        .and_then(|value| value.as_str())
        .unwrap_or(DEFAULT_DISCOUNT)
        .to_string();

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <ModalShell is_open={show} on_close={props.on_close.clone()} title="Launch offer" class={classes!("promo-offer")}>
            <p class="promo-headline">{format!("{} off any website package booked this month", discount)}</p>
            <p>{"Includes hosting setup, a contact form and our launch checklist."}</p>
            <div class="promo-actions" onclick={close.clone()}>
                <Link<Route> to={Route::Checkout} classes="cta-button">
                    {"Claim the discount"}
                </Link<Route>>
            </div>
            <button class="link-button" onclick={close}>{"Maybe later"}</button>
        </ModalShell>
    }
}
