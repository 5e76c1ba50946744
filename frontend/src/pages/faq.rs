use yew::prelude::*;
use web_sys::MouseEvent;
use yew::{Children, Properties};

use crate::popups::{use_popups, PopupType};

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    question: String,
    children: Children,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let is_open = use_state(|| false);

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            is_open.set(!*is_open);
        })
    };

    html! {
        <div class={classes!("faq-item", if *is_open { "open" } else { "" })}>
            <button class="faq-question" onclick={toggle} aria-expanded={(*is_open).to_string()}>
                <span class="question-text">{&props.question}</span>
                <span class="toggle-icon">{if *is_open { "−" } else { "+" }}</span>
            </button>
            <div class="faq-answer">
                { for props.children.iter() }
            </div>
        </div>
    }
}

#[function_component(Faq)]
pub fn faq() -> Html {
    let popups = use_popups();
    let ask = Callback::from(move |_: MouseEvent| popups.queue_popup(PopupType::ContactQuote, None));

    html! {
        <div class="faq-page">
            <section class="faq-hero">
                <h1>{"Frequently Asked Questions"}</h1>
                <p>{"How we work, what it costs and what happens after launch."}</p>
            </section>

            <section class="faq-section">
                <h2>{"Working with us"}</h2>

                <FaqItem question="How long does a website take?">
                    <p>{"A Starter site usually launches in two weeks. Growth projects take four to six weeks depending on how much content is ready."}</p>
                </FaqItem>

                <FaqItem question="Do I need to write the copy myself?">
                    <p>{"No. Every package includes a copy session where we interview you and draft the text. You review and approve it before anything goes live."}</p>
                </FaqItem>

                <FaqItem question="Can you redesign my existing site?">
                    <p>{"Yes. We start with a short audit of what works today so the redesign keeps your search rankings and existing links."}</p>
                </FaqItem>

                <h2>{"Pricing and payments"}</h2>

                <FaqItem question="How does payment work?">
                    <p>{"Half up front to book your slot, half at launch. Care plans are billed monthly and can be cancelled anytime."}</p>
                </FaqItem>

                <FaqItem question="What's included in the care plan?">
                    <p>{"Hosting, backups, security updates, uptime monitoring and up to an hour of small edits each month."}</p>
                </FaqItem>
            </section>

            <section class="faq-cta">
                <p>{"Still have a question?"}</p>
                <button class="cta-button" onclick={ask}>{"Ask us directly"}</button>
            </section>
        </div>
    }
}
