use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use super::queue::PopupData;

pub const FOCUSABLE_SELECTOR: &str = "a[href], button:not([disabled]), textarea:not([disabled]), \
    input:not([disabled]), select:not([disabled]), [tabindex]:not([tabindex=\"-1\"])";

/// Props every concrete popup receives from the host.
#[derive(Properties, PartialEq)]
pub struct PopupProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub data: Option<PopupData>,
}

/// Where Tab / Shift+Tab must send focus to stay inside the dialog, or None
/// when the browser's default move already does.
pub fn focus_wrap_target(current: Option<usize>, len: usize, backwards: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    match (current, backwards) {
        (None, false) => Some(0),
        (None, true) => Some(last),
        (Some(0), true) => Some(last),
        (Some(i), false) if i >= last => Some(0),
        _ => None,
    }
}

/// Body scroll lock and focus capture for the lifetime of an open dialog.
/// Dropping it gives both back.
struct OpenDialog {
    previous_focus: Option<HtmlElement>,
    previous_overflow: Option<String>,
}

impl OpenDialog {
    fn engage(dialog: Option<HtmlElement>) -> Self {
        let document = window().and_then(|w| w.document());
        let previous_focus = document
            .as_ref()
            .and_then(|d| d.active_element())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let previous_overflow = document.as_ref().and_then(|d| d.body()).and_then(|body| {
            let style = body.style();
            let previous = style.get_property_value("overflow").ok();
            let _ = style.set_property("overflow", "hidden");
            previous
        });

        if let Some(dialog) = dialog {
            match focusable_elements(&dialog).into_iter().next() {
                Some(first) => {
                    let _ = first.focus();
                }
                None => {
                    let _ = dialog.focus();
                }
            }
        }

        Self {
            previous_focus,
            previous_overflow,
        }
    }
}

impl Drop for OpenDialog {
    fn drop(&mut self) {
        if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
            let style = body.style();
            let _ = match self.previous_overflow.as_deref() {
                Some(value) if !value.is_empty() => style.set_property("overflow", value),
                _ => style.remove_property("overflow").map(|_| ()),
            };
        }
        if let Some(el) = self.previous_focus.take() {
            let _ = el.focus();
        }
    }
}

fn focusable_elements(container: &Element) -> Vec<HtmlElement> {
    let Ok(nodes) = container.query_selector_all(FOCUSABLE_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn trap_focus(dialog: &HtmlElement, e: &KeyboardEvent) {
    let focusables = focusable_elements(dialog);
    if focusables.is_empty() {
        e.prevent_default();
        let _ = dialog.focus();
        return;
    }
    let active = window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element());
    let current = active.and_then(|active| {
        focusables
            .iter()
            .position(|el| el.is_same_node(Some(active.as_ref())))
    });
    if let Some(target) = focus_wrap_target(current, focusables.len(), e.shift_key()) {
        e.prevent_default();
        let _ = focusables[target].focus();
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalShellProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ModalShell)]
pub fn modal_shell(props: &ModalShellProps) -> Html {
    let dialog_ref = use_node_ref();

    {
        let dialog_ref = dialog_ref.clone();
        use_effect_with_deps(
            move |&is_open| {
                let open = is_open.then(|| OpenDialog::engage(dialog_ref.cast::<HtmlElement>()));
                move || drop(open)
            },
            props.is_open,
        );
    }

    {
        let dialog_ref = dialog_ref.clone();
        let is_open = props.is_open;
        let on_close = props.on_close.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if !is_open {
                return;
            }
            match e.key().as_str() {
                "Escape" => on_close.emit(()),
                "Tab" => {
                    if let Some(dialog) = dialog_ref.cast::<HtmlElement>() {
                        trap_focus(&dialog, &e);
                    }
                }
                _ => {}
            }
        });
    }

    if !props.is_open {
        return html! {};
    }

    let close_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={close_backdrop}>
            <div
                ref={dialog_ref}
                class={classes!("modal-dialog", props.class.clone())}
                role="dialog"
                aria-modal="true"
                aria-label={props.title.clone()}
                tabindex="-1"
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
            >
                <button class="modal-close" aria-label="Close" onclick={close_button}>{"×"}</button>
                {
                    if let Some(title) = &props.title {
                        html! { <h2 class="modal-title">{title.clone()}</h2> }
                    } else {
                        html! {}
                    }
                }
                { for props.children.iter() }
            </div>
        </div>
    }
}
