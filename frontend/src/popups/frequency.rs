//! Frequency capping for popups.
//!
//! The last display time of each popup id is kept in durable browser storage
//! under `popup_shown_<id>`. Reads that fail for any reason are treated as
//! "never shown": over-showing a popup is preferable to breaking the page.
//! Two open tabs can both pass the gate before either records a display; that
//! race is accepted.

use log::warn;
use thiserror::Error;

pub const KEY_PREFIX: &str = "popup_shown_";

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("storage access failed: {0}")]
    Access(String),
    #[error("stored value for {key} is not a usable timestamp: {value}")]
    Corrupt { key: String, value: String },
}

/// String key/value persistence shared by the frequency gate and consent records.
pub trait PopupStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// `window.localStorage`, looked up on every call since it can disappear
/// (private mode, quota, disabled cookies).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .map_err(|e| StorageError::Access(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl PopupStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let storage = Self::storage()?;
        let len = storage
            .length()
            .map_err(|e| StorageError::Access(format!("{:?}", e)))?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Ok(Some(key)) = storage.key(i) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

pub fn storage_key(popup_id: &str) -> String {
    format!("{}{}", KEY_PREFIX, popup_id)
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyGate<S = LocalStore> {
    store: S,
    cooldown_hours: i64,
}

impl FrequencyGate<LocalStore> {
    pub fn local(cooldown_hours: i64) -> Self {
        Self::new(LocalStore, cooldown_hours)
    }
}

impl<S: PopupStore> FrequencyGate<S> {
    pub fn new(store: S, cooldown_hours: i64) -> Self {
        Self { store, cooldown_hours }
    }

    pub fn can_show(&self, popup_id: &str) -> bool {
        self.can_show_at(popup_id, now_millis())
    }

    pub fn can_show_at(&self, popup_id: &str, now_ms: i64) -> bool {
        match self.elapsed_since_shown(popup_id, now_ms) {
            Ok(None) => true,
            Ok(Some(elapsed_ms)) => {
                let hours_elapsed = elapsed_ms as f64 / MILLIS_PER_HOUR;
                hours_elapsed >= self.cooldown_hours as f64
            }
            Err(e) => {
                warn!("Frequency gate read failed for {}, allowing: {}", popup_id, e);
                true
            }
        }
    }

    pub fn mark_shown(&self, popup_id: &str) {
        self.mark_shown_at(popup_id, now_millis());
    }

    pub fn mark_shown_at(&self, popup_id: &str, now_ms: i64) {
        if let Err(e) = self.store.write(&storage_key(popup_id), &now_ms.to_string()) {
            warn!("Could not record display of {}: {}", popup_id, e);
        }
    }

    pub fn reset(&self, popup_id: &str) {
        if let Err(e) = self.store.remove(&storage_key(popup_id)) {
            warn!("Could not reset frequency record for {}: {}", popup_id, e);
        }
    }

    /// Removes every `popup_shown_*` record, leaving unrelated keys alone.
    pub fn clear_all(&self) {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Could not list frequency records: {}", e);
                return;
            }
        };
        for key in keys.iter().filter(|k| k.starts_with(KEY_PREFIX)) {
            if let Err(e) = self.store.remove(key) {
                warn!("Could not remove {}: {}", key, e);
            }
        }
    }

    /// Milliseconds since the recorded display. Records that don't parse, lie
    /// in the future, or overflow the subtraction are reported as corrupt.
    fn elapsed_since_shown(&self, popup_id: &str, now_ms: i64) -> Result<Option<i64>, StorageError> {
        let key = storage_key(popup_id);
        let Some(value) = self.store.read(&key)? else {
            return Ok(None);
        };
        match value
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|last| now_ms.checked_sub(last))
            .filter(|elapsed| *elapsed >= 0)
        {
            Some(elapsed) => Ok(Some(elapsed)),
            None => Err(StorageError::Corrupt { key, value }),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    #[derive(Default)]
    pub struct MemoryStore {
        pub entries: RefCell<BTreeMap<String, String>>,
    }

    impl PopupStore for MemoryStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entries.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.borrow_mut().remove(key);
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            Ok(self.entries.borrow().keys().cloned().collect())
        }
    }

    /// Every operation fails, as when storage is disabled.
    pub struct BrokenStore;

    impl PopupStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{BrokenStore, MemoryStore};
    use super::*;

    const HOUR: i64 = 3_600_000;
    const T0: i64 = 1_760_000_000_000;

    fn gate() -> FrequencyGate<MemoryStore> {
        FrequencyGate::new(MemoryStore::default(), 24)
    }

    #[test]
    fn unseen_popup_can_show() {
        assert!(gate().can_show_at("lead-capture", T0));
    }

    #[test]
    fn blocked_right_after_mark_shown() {
        let gate = gate();
        gate.mark_shown_at("lead-capture", T0);
        assert!(!gate.can_show_at("lead-capture", T0));
        assert!(!gate.can_show_at("lead-capture", T0 + 23 * HOUR));
    }

    #[test]
    fn allowed_again_after_cooldown() {
        let gate = gate();
        gate.mark_shown_at("lead-capture", T0);
        assert!(gate.can_show_at("lead-capture", T0 + 24 * HOUR));
        assert!(gate.can_show_at("lead-capture", T0 + 72 * HOUR));
    }

    #[test]
    fn ids_are_independent() {
        let gate = gate();
        gate.mark_shown_at("lead-capture", T0);
        assert!(gate.can_show_at("promo-offer", T0));
    }

    #[test]
    fn record_is_stored_as_epoch_millis() {
        let gate = gate();
        gate.mark_shown_at("exit-intent", T0);
        let stored = gate.store.read("popup_shown_exit-intent").unwrap();
        assert_eq!(stored, Some(T0.to_string()));
    }

    #[test]
    fn broken_storage_fails_open() {
        let gate = FrequencyGate::new(BrokenStore, 24);
        gate.mark_shown_at("lead-capture", T0);
        assert!(gate.can_show_at("lead-capture", T0));
        gate.reset("lead-capture");
        gate.clear_all();
    }

    #[test]
    fn corrupt_record_fails_open() {
        let gate = gate();
        gate.store.write("popup_shown_lead-capture", "yesterday").unwrap();
        assert!(gate.can_show_at("lead-capture", T0));
    }

    #[test]
    fn out_of_range_record_fails_open() {
        let gate = gate();
        gate.store
            .write("popup_shown_lead-capture", &i64::MIN.to_string())
            .unwrap();
        assert!(gate.can_show_at("lead-capture", T0));

        gate.store
            .write("popup_shown_lead-capture", &i64::MAX.to_string())
            .unwrap();
        assert!(gate.can_show_at("lead-capture", T0));
    }

    #[test]
    fn future_record_fails_open() {
        let gate = gate();
        gate.mark_shown_at("promo-offer", T0 + 1000 * HOUR);
        assert!(gate.can_show_at("promo-offer", T0));
    }

    #[test]
    fn reset_and_clear_all() {
        let gate = gate();
        gate.store.write("cookie_consent", "accepted").unwrap();
        gate.mark_shown_at("lead-capture", T0);
        gate.mark_shown_at("promo-offer", T0);

        gate.reset("lead-capture");
        assert!(gate.can_show_at("lead-capture", T0));
        assert!(!gate.can_show_at("promo-offer", T0));

        gate.clear_all();
        assert!(gate.can_show_at("promo-offer", T0));
        assert_eq!(
            gate.store.read("cookie_consent").unwrap(),
            Some("accepted".to_string())
        );
    }
}
