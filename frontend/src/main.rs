use yew::prelude::*;
use yew_router::prelude::*;
use yew_hooks::prelude::*;
use log::{info, Level};
use web_sys::{window, Event, MouseEvent};

mod api;
mod config;
mod popups;
mod pages {
    pub mod business_details;
    pub mod checkout;
    pub mod faq;
    pub mod home;
    pub mod login;
}

use pages::{
    business_details::BusinessDetails,
    checkout::Checkout,
    faq::Faq,
    home::Home,
    login::Login,
};
use popups::{use_popups, PopupHost, PopupProvider, PopupType};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/faq")]
    Faq,
    #[at("/checkout")]
    Checkout,
    #[at("/business-details")]
    BusinessDetails,
    #[at("/auth/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Faq => {
            info!("Rendering FAQ page");
            html! { <Faq /> }
        },
        Route::Checkout => {
            info!("Rendering Checkout page");
            html! { <Checkout /> }
        },
        Route::BusinessDetails => {
            info!("Rendering Business details page");
            html! { <BusinessDetails /> }
        },
        Route::Login => {
            info!("Rendering Login page");
            html! { <Login /> }
        },
        Route::NotFound => html! {
            <div class="not-found">
                <h1>{"Page not found"}</h1>
                <Link<Route> to={Route::Home}>{"Back to the homepage"}</Link<Route>>
            </div>
        },
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let popups = use_popups();
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_event_with_window("scroll", move |_: Event| {
            let scroll_top = window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
            is_scrolled.set(scroll_top > 80.0);
        });
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let contact = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
            popups.queue_popup(PopupType::ContactQuote, None);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"northpoint studio"}
                </Link<Route>>

                <button class="burger-menu" aria-label="Menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Faq} classes="nav-link">
                            {"FAQ"}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Checkout} classes="nav-link">
                            {"Book a project"}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu}>
                        <Link<Route> to={Route::Login} classes="nav-link">
                            {"Client login"}
                        </Link<Route>>
                    </div>
                    <button class="nav-contact-button" onclick={contact}>
                        {"Contact us"}
                    </button>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <PopupProvider>
                <Nav />
                <main>
                    <Switch<Route> render={switch} />
                </main>
                <PopupHost />
            </PopupProvider>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
