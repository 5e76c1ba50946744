use log::error;
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{self, non_empty, QuoteRequest};

#[derive(Deserialize, Default, Clone, PartialEq)]
struct BookingQuery {
    plan: Option<String>,
}

#[derive(Clone, PartialEq)]
enum Submission {
    Editing,
    Sending,
    Done,
    Failed(String),
}

/// Second booking step. Sends the details as a quote request tagged with the chosen plan.
#[function_component(BusinessDetails)]
pub fn business_details() -> Html {
    let location = use_location();
    let plan = location
        .and_then(|l| l.query::<BookingQuery>().ok())
        .unwrap_or_default()
        .plan;

    let name = use_state(String::new);
    let email = use_state(String::new);
    let company = use_state(String::new);
    let goals = use_state(String::new);
    let submission = use_state(|| Submission::Editing);

    let text_input = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field.set(input.value());
        })
    };

    let on_goals = {
        let goals = goals.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            goals.set(area.value());
        })
    };

    let onsubmit = {
        let request = QuoteRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            company: non_empty(&company),
            budget: None,
            plan: plan.clone(),
            message: goals.trim().to_string(),
        };
        let submission = submission.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(problem) = request.validate() {
                submission.set(Submission::Failed(problem.to_string()));
                return;
            }
            submission.set(Submission::Sending);
            let request = request.clone();
            let submission = submission.clone();
            spawn_local(async move {
                match api::request_quote(&request).await {
                    Ok(()) => submission.set(Submission::Done),
                    Err(e) => {
                        error!("Booking details failed to send: {}", e);
                        submission.set(Submission::Failed(e.user_message().to_string()));
                    }
                }
            });
        })
    };

    if *submission == Submission::Done {
        return html! {
            <div class="form-page business-details-page">
                <h1>{"You're booked in"}</h1>
                <p>{"We'll email you an invoice for the deposit and a link to schedule the kickoff call."}</p>
            </div>
        };
    }

    let sending = *submission == Submission::Sending;

    html! {
        <div class="form-page business-details-page">
            <h1>{"About your business"}</h1>
            {
                if let Some(plan) = &plan {
                    html! { <p class="selected-plan">{format!("Package: {}", plan)}</p> }
                } else {
                    html! {}
                }
            }
            <form {onsubmit}>
                <label>{"Your name"}
                    <input type="text" value={(*name).clone()} oninput={text_input(&name)} required=true />
                </label>
                <label>{"Email"}
                    <input type="email" value={(*email).clone()} oninput={text_input(&email)} required=true />
                </label>
                <label>{"Business name"}
                    <input type="text" value={(*company).clone()} oninput={text_input(&company)} />
                </label>
                <label>{"What should the site achieve?"}
                    <textarea rows="5" value={(*goals).clone()} oninput={on_goals} />
                </label>
                <button type="submit" class="cta-button" disabled={sending}>
                    { if sending { "Sending..." } else { "Confirm booking" } }
                </button>
                {
                    if let Submission::Failed(problem) = &*submission {
                        html! { <p class="form-error">{problem}</p> }
                    } else {
                        html! {}
                    }
                }
            </form>
        </div>
    }
}
