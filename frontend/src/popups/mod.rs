//! Lead-capture popups and the machinery that decides when they appear.
//!
//! Triggers propose popups, the queue shows them one at a time by priority,
//! and each gated popup consults the frequency gate before rendering.

pub mod consent;
pub mod environment;
pub mod frequency;
pub mod kind;
pub mod modal;
pub mod provider;
pub mod queue;
pub mod triggers;

mod contact_quote;
mod cookie_consent;
mod exit_intent;
mod host;
mod lead_capture;
mod newsletter;
mod promo_offer;

pub use host::PopupHost;
pub use kind::PopupType;
pub use newsletter::FormStatus;
pub use provider::{use_popups, PopupProvider};
