use serde_json::{json, Map, Value};
use web_sys::MouseEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::popups::{use_popups, PopupType};
use crate::Route;

struct Plan {
    name: &'static str,
    price: &'static str,
    blurb: &'static str,
    features: &'static [&'static str],
}

const PLANS: [Plan; 3] = [
    Plan {
        name: "Starter",
        price: "$1,900",
        blurb: "A fast one-page site that turns visitors into calls.",
        features: &["Single landing page", "Contact form", "Basic SEO setup"],
    },
    Plan {
        name: "Growth",
        price: "$4,800",
        blurb: "Up to eight pages, a blog and booking integration.",
        features: &["Up to 8 pages", "Blog", "Booking or quote forms", "Analytics dashboard"],
    },
    Plan {
        name: "Care",
        price: "$149/mo",
        blurb: "We keep it running, updated and backed up.",
        features: &["Hosting and backups", "Security updates", "1h of edits per month"],
    },
];

const TESTIMONIALS: [(&str, &str); 3] = [
    ("Maria, bakery owner", "Online orders doubled the month the new site went live."),
    ("Jon, physiotherapist", "Patients book themselves now. I stopped playing phone tag."),
    ("Priya, architect", "They wrote better copy about my studio than I ever could."),
];

fn plan_data(plan: &str) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("plan".to_string(), json!(plan));
    data
}

#[function_component(Home)]
pub fn home() -> Html {
    let popups = use_popups();

    let get_quote = {
        let popups = popups.clone();
        Callback::from(move |_: MouseEvent| popups.queue_popup(PopupType::ContactQuote, None))
    };

    let see_offer = {
        let popups = popups.clone();
        Callback::from(move |_: MouseEvent| popups.queue_popup(PopupType::PromoOffer, None))
    };

    let ask_about = |plan: &'static str| {
        let popups = popups.clone();
        Callback::from(move |_: MouseEvent| {
            popups.queue_popup(PopupType::ContactQuote, Some(plan_data(plan)))
        })
    };

    html! {
        <div class="home-page">
            <section class="hero">
                <h1>{"Websites that bring in customers"}</h1>
                <p>{"We design, write and build sites for small businesses. Fixed prices, launched in weeks."}</p>
                <div class="hero-actions">
                    <button class="cta-button" onclick={get_quote}>{"Get a free quote"}</button>
                    <Link<Route> to={Route::Faq} classes="secondary-button">{"How it works"}</Link<Route>>
                </div>
            </section>

            <section class="services">
                <h2>{"What we do"}</h2>
                <div class="service-grid">
                    <div class="service-card">
                        <h3>{"Design"}</h3>
                        <p>{"Clean layouts built around the one action you want visitors to take."}</p>
                    </div>
                    <div class="service-card">
                        <h3>{"Copy"}</h3>
                        <p>{"We interview you and write the words, so the site sounds like you."}</p>
                    </div>
                    <div class="service-card">
                        <h3>{"Build"}</h3>
                        <p>{"Fast, accessible pages with forms that land straight in your inbox."}</p>
                    </div>
                </div>
            </section>

            <section class="pricing" id="pricing">
                <h2>{"Pricing"}</h2>
                <div class="pricing-grid">
                    { for PLANS.iter().map(|plan| html! {
                        <div class="pricing-card">
                            <h3>{plan.name}</h3>
                            <p class="price">{plan.price}</p>
                            <p>{plan.blurb}</p>
                            <ul>
                                { for plan.features.iter().map(|f| html! { <li>{*f}</li> }) }
                            </ul>
                            <button class="cta-button" onclick={ask_about(plan.name)}>
                                {format!("Ask about {}", plan.name)}
                            </button>
                        </div>
                    }) }
                </div>
                <button class="link-button" onclick={see_offer}>{"See this month's launch offer"}</button>
            </section>

            <section class="testimonials">
                <h2>{"Clients say"}</h2>
                <div class="testimonial-grid">
                    { for TESTIMONIALS.iter().map(|(who, quote)| html! {
                        <blockquote class="testimonial">
                            <p>{*quote}</p>
                            <cite>{*who}</cite>
                        </blockquote>
                    }) }
                </div>
            </section>
        </div>
    }
}
