use log::warn;

use super::frequency::PopupStore;

pub const CONSENT_KEY: &str = "cookie_consent";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentDecision {
    Accepted,
    Declined,
    Undecided,
}

impl ConsentDecision {
    fn as_str(self) -> Option<&'static str> {
        match self {
            ConsentDecision::Accepted => Some("accepted"),
            ConsentDecision::Declined => Some("declined"),
            ConsentDecision::Undecided => None,
        }
    }
}

/// Unreadable storage counts as undecided, so the banner is offered again.
pub fn stored_decision<S: PopupStore>(store: &S) -> ConsentDecision {
    match store.read(CONSENT_KEY) {
        Ok(Some(value)) => match value.as_str() {
            "accepted" => ConsentDecision::Accepted,
            "declined" => ConsentDecision::Declined,
            _ => ConsentDecision::Undecided,
        },
        Ok(None) => ConsentDecision::Undecided,
        Err(e) => {
            warn!("Could not read cookie consent: {}", e);
            ConsentDecision::Undecided
        }
    }
}

pub fn store_decision<S: PopupStore>(store: &S, decision: ConsentDecision) {
    let result = match decision.as_str() {
        Some(value) => store.write(CONSENT_KEY, value),
        None => store.remove(CONSENT_KEY),
    };
    if let Err(e) = result {
        warn!("Could not store cookie consent: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popups::frequency::testing::{BrokenStore, MemoryStore};

    #[test]
    fn decision_round_trips_through_store() {
        let store = MemoryStore::default();
        assert_eq!(stored_decision(&store), ConsentDecision::Undecided);

        store_decision(&store, ConsentDecision::Declined);
        assert_eq!(stored_decision(&store), ConsentDecision::Declined);

        store_decision(&store, ConsentDecision::Accepted);
        assert_eq!(stored_decision(&store), ConsentDecision::Accepted);

        store_decision(&store, ConsentDecision::Undecided);
        assert_eq!(stored_decision(&store), ConsentDecision::Undecided);
    }

    #[test]
    fn unknown_or_unreadable_value_is_undecided() {
        let store = MemoryStore::default();
        store.write(CONSENT_KEY, "maybe").unwrap();
        assert_eq!(stored_decision(&store), ConsentDecision::Undecided);
        assert_eq!(stored_decision(&BrokenStore), ConsentDecision::Undecided);
        store_decision(&BrokenStore, ConsentDecision::Accepted);
    }
}
