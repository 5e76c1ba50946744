use serde::{Deserialize, Serialize};
use std::fmt;

/// Every overlay the site can show. Adding a variant forces a priority decision below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PopupType {
    LeadCapture,
    ContactQuote,
    ExitIntent,
    PromoOffer,
    CookieConsent,
}

impl PopupType {
    pub const ALL: [PopupType; 5] = [
        PopupType::LeadCapture,
        PopupType::ContactQuote,
        PopupType::ExitIntent,
        PopupType::PromoOffer,
        PopupType::CookieConsent,
    ];

    /// Higher is shown first.
    pub fn priority(self) -> i32 {
        match self {
            PopupType::CookieConsent => 100,
            PopupType::ContactQuote => 90,
            PopupType::ExitIntent => 80,
            PopupType::PromoOffer => 70,
            PopupType::LeadCapture => 60,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PopupType::LeadCapture => "lead-capture",
            PopupType::ContactQuote => "contact-quote",
            PopupType::ExitIntent => "exit-intent",
            PopupType::PromoOffer => "promo-offer",
            PopupType::CookieConsent => "cookie-consent",
        }
    }

    /// Whether the popup goes through the frequency gate before rendering.
    /// User-initiated and consent popups are always shown when activated.
    pub fn is_frequency_gated(self) -> bool {
        match self {
            PopupType::LeadCapture | PopupType::ExitIntent | PopupType::PromoOffer => true,
            PopupType::ContactQuote | PopupType::CookieConsent => false,
        }
    }
}

impl fmt::Display for PopupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_are_distinct_and_ordered() {
        let mut by_priority = PopupType::ALL.to_vec();
        by_priority.sort_by_key(|t| std::cmp::Reverse(t.priority()));
        assert_eq!(
            by_priority,
            vec![
                PopupType::CookieConsent,
                PopupType::ContactQuote,
                PopupType::ExitIntent,
                PopupType::PromoOffer,
                PopupType::LeadCapture,
            ]
        );
    }

    #[test]
    fn serde_name_matches_display() {
        for kind in PopupType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
        let parsed: PopupType = serde_json::from_str("\"exit-intent\"").unwrap();
        assert_eq!(parsed, PopupType::ExitIntent);
    }
}
