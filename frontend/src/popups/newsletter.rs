use log::error;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::{self, is_valid_email, SubscribeRequest};

#[derive(Clone, Debug, PartialEq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Sent,
    Failed(String),
}

#[derive(Properties, PartialEq)]
pub struct NewsletterFormProps {
    /// Which popup the signup came from, forwarded to the backend.
    pub source: AttrValue,
    #[prop_or(AttrValue::from("Send me the checklist"))]
    pub button_label: AttrValue,
}

#[function_component(NewsletterForm)]
pub fn newsletter_form(props: &NewsletterFormProps) -> Html {
    let email = use_state(String::new);
    let status = use_state(|| FormStatus::Idle);

    let oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onsubmit = {
        let email = email.clone();
        let status = status.clone();
        let source = props.source.to_string();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *status == FormStatus::Submitting {
                return;
            }
            if !is_valid_email(&email) {
                status.set(FormStatus::Failed("Please enter a valid email address".to_string()));
                return;
            }
            status.set(FormStatus::Submitting);
            let request = SubscribeRequest {
                email: email.trim().to_string(),
                source: source.clone(),
            };
            let status = status.clone();
            spawn_local(async move {
                match api::subscribe(&request).await {
                    Ok(()) => status.set(FormStatus::Sent),
                    Err(e) => {
                        error!("Newsletter signup from {} failed: {}", request.source, e);
                        status.set(FormStatus::Failed(e.user_message().to_string()));
                    }
                }
            });
        })
    };

    if *status == FormStatus::Sent {
        return html! {
            <p class="form-success">{"You're in! Check your inbox in a minute."}</p>
        };
    }

    html! {
        <form class="newsletter-form" {onsubmit}>
            <input
                type="email"
                placeholder="you@company.com"
                value={(*email).clone()}
                {oninput}
                required=true
            />
            <button type="submit" class="cta-button" disabled={*status == FormStatus::Submitting}>
                { if *status == FormStatus::Submitting { "Sending..." } else { props.button_label.as_str() } }
            </button>
            {
                if let FormStatus::Failed(message) = &*status {
                    html! { <p class="form-error">{message}</p> }
                } else {
                    html! {}
                }
            }
        </form>
    }
}
