use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

const PACKAGES: [(&str, &str); 3] = [
    ("Starter", "$1,900"),
    ("Growth", "$4,800"),
    ("Care", "$149/mo"),
];

/// First step of booking: pick a package, then hand over to business details.
#[function_component(Checkout)]
pub fn checkout() -> Html {
    let navigator = use_navigator();
    let selected = use_state(|| PACKAGES[0].0.to_string());

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            selected.set(input.value());
        })
    };

    let proceed = {
        let selected = selected.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(navigator) = &navigator {
                let query = [("plan", (*selected).clone())];
                if navigator.push_with_query(&Route::BusinessDetails, &query).is_err() {
                    navigator.push(&Route::BusinessDetails);
                }
            }
        })
    };

    html! {
        <div class="form-page checkout-page">
            <h1>{"Book your website"}</h1>
            <fieldset class="package-picker">
                <legend>{"Package"}</legend>
                { for PACKAGES.iter().map(|(name, price)| html! {
                    <label class="package-option">
                        <input
                            type="radio"
                            name="package"
                            value={*name}
                            checked={*selected == *name}
                            onchange={on_select.clone()}
                        />
                        <span>{format!("{} ({})", name, price)}</span>
                    </label>
                }) }
            </fieldset>
            <p>{"We take 50% to reserve your slot. The rest is due at launch."}</p>
            <button class="cta-button" onclick={proceed}>{"Continue"}</button>
        </div>
    }
}
