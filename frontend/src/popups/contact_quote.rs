use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::modal::{ModalShell, PopupProps};
use super::newsletter::FormStatus;
use crate::api::{self, non_empty, QuoteRequest};

const BUDGETS: [&str; 4] = ["Under $2k", "$2k - $5k", "$5k - $10k", "$10k+"];

/// Project inquiry form. Opened on demand from buttons, so it skips the frequency gate.
#[function_component(ContactQuotePopup)]
pub fn contact_quote_popup(props: &PopupProps) -> Html {
    let plan = props
        .data
        .as_ref()
        .and_then(|data| data.get("plan"))
        .and_then(|value| value.as_str())
        .map(str::to_string);

    let name = use_state(String::new);
    let email = use_state(String::new);
    let company = use_state(String::new);
    let budget = use_state(String::new);
    let message = use_state(String::new);
    let status = use_state(|| FormStatus::Idle);

    // Fresh form for every opening.
    {
        let fields = [name.clone(), email.clone(), company.clone(), budget.clone(), message.clone()];
        let status = status.clone();
        use_effect_with_deps(
            move |&is_open| {
                if is_open {
                    for field in &fields {
                        field.set(String::new());
                    }
                    status.set(FormStatus::Idle);
                }
                || ()
            },
            props.is_open,
        );
    }

    let input = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field.set(input.value());
        })
    };

    let on_budget = {
        let budget = budget.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            budget.set(select.value());
        })
    };

    let on_message = {
        let message = message.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            message.set(area.value());
        })
    };

    let onsubmit = {
        let request = QuoteRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            company: non_empty(&company),
            budget: non_empty(&budget),
            plan: plan.clone(),
            message: message.trim().to_string(),
        };
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *status == FormStatus::Submitting {
                return;
            }
            if let Err(problem) = request.validate() {
                status.set(FormStatus::Failed(problem.to_string()));
                return;
            }
            status.set(FormStatus::Submitting);
            let request = request.clone();
            let status = status.clone();
            spawn_local(async move {
                match api::request_quote(&request).await {
                    Ok(()) => {
                        info!("Quote request sent");
                        status.set(FormStatus::Sent);
                    }
                    Err(e) => {
                        error!("Quote request failed: {}", e);
                        status.set(FormStatus::Failed(e.user_message().to_string()));
                    }
                }
            });
        })
    };

    let title = match &plan {
        Some(plan) => format!("Ask about the {} plan", plan),
        None => "Tell us about your project".to_string(),
    };

    let body = if *status == FormStatus::Sent {
        html! {
            <p class="form-success">{"Thanks! We'll get back to you within one business day."}</p>
        }
    } else {
        let submitting = *status == FormStatus::Submitting;
        html! {
            <form class="quote-form" {onsubmit}>
                <label>
                    {"Name"}
                    <input type="text" value={(*name).clone()} oninput={input(&name)} required=true />
                </label>
                <label>
                    {"Email"}
                    <input type="email" value={(*email).clone()} oninput={input(&email)} required=true />
                </label>
                <label>
                    {"Company"}
                    <input type="text" value={(*company).clone()} oninput={input(&company)} />
                </label>
                <label>
                    {"Budget"}
                    <select onchange={on_budget}>
                        <option value="" selected={budget.is_empty()}>{"Not sure yet"}</option>
                        { for BUDGETS.iter().map(|b| html! {
                            <option value={*b} selected={*budget == *b}>{*b}</option>
                        }) }
                    </select>
                </label>
                <label>
                    {"What are you building?"}
                    <textarea rows="4" value={(*message).clone()} oninput={on_message} />
                </label>
                <button type="submit" class="cta-button" disabled={submitting}>
                    { if submitting { "Sending..." } else { "Request a quote" } }
                </button>
                {
                    if let FormStatus::Failed(problem) = &*status {
                        html! { <p class="form-error">{problem}</p> }
                    } else {
                        html! {}
                    }
                }
            </form>
        }
    };

    html! {
        <ModalShell is_open={props.is_open} on_close={props.on_close.clone()} title={AttrValue::from(title)} class={classes!("contact-quote")}>
            { body }
        </ModalShell>
    }
}
