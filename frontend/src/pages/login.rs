use log::error;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::{self, LoginLinkRequest};
use crate::popups::FormStatus;

/// Client portal sign-in. Sends a one-time link to the address on file.
#[function_component(Login)]
pub fn login() -> Html {
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
        let request = LoginLinkRequest {
            email: email.trim().to_string(),
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
                match api::request_login_link(&request).await {
                    Ok(()) => status.set(FormStatus::Sent),
                    Err(e) => {
                        error!("Login link request failed: {}", e);
                        status.set(FormStatus::Failed(e.user_message().to_string()));
                    }
                }
            });
        })
    };

    if *status == FormStatus::Sent {
        return html! {
            <div class="form-page login-page">
                <h1>{"Check your inbox"}</h1>
                <p>{"If that address belongs to a client, a sign-in link is on its way."}</p>
            </div>
        };
    }

    let sending = *status == FormStatus::Submitting;

    html! {
        <div class="form-page login-page">
            <h1>{"Client login"}</h1>
            <form {onsubmit}>
                <label>{"Email"}
                    <input type="email" value={(*email).clone()} {oninput} required=true />
                </label>
                <button type="submit" class="cta-button" disabled={sending}>
                    { if sending { "Sending..." } else { "Email me a sign-in link" } }
                </button>
                {
                    if let FormStatus::Failed(problem) = &*status {
                        html! { <p class="form-error">{problem}</p> }
                    } else {
                        html! {}
                    }
                }
            </form>
        </div>
    }
}
