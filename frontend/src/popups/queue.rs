//! One-popup-at-a-time queue.
//!
//! Trigger sources enqueue requests; the orchestrator keeps them ordered by
//! priority and promotes the head to the active slot whenever nothing is open.
//! Frequency rules are not its concern: a popup that becomes active may still
//! decline to render and close itself straight away.

use log::debug;
use serde_json::{Map, Value};

use super::environment::Environment;
use super::kind::PopupType;

pub type PopupData = Map<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub struct PopupRequest {
    pub id: String,
    pub kind: PopupType,
    pub priority: i32,
    pub data: PopupData,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Queued(String),
    /// Same type already waiting.
    Duplicate,
    /// Exit intent on a mobile viewport or a form page.
    Suppressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueState {
    Idle,
    Pending,
    Open,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopupOrchestrator {
    pending: Vec<PopupRequest>,
    active: Option<PopupRequest>,
    open: bool,
    cooling_down: bool,
    close_generation: u64,
    sequence: u64,
}

impl PopupOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a request to the pending list. Does not promote anything; callers
    /// run `reconcile` once the current batch of changes is applied.
    pub fn enqueue(
        &mut self,
        kind: PopupType,
        data: PopupData,
        env: Environment,
        now_ms: i64,
    ) -> EnqueueOutcome {
        if kind == PopupType::ExitIntent && (env.is_mobile || env.is_form_page) {
            debug!("Ignoring {} request: {:?}", kind, env);
            return EnqueueOutcome::Suppressed;
        }
        if self.pending.iter().any(|r| r.kind == kind) {
            debug!("{} already pending", kind);
            return EnqueueOutcome::Duplicate;
        }

        self.sequence += 1;
        let id = format!("{}-{}-{}", kind, now_ms, self.sequence);
        self.pending.push(PopupRequest {
            id: id.clone(),
            kind,
            priority: kind.priority(),
            data,
        });
        // sort_by_key is stable, so equal priorities keep insertion order
        self.pending.sort_by_key(|r| std::cmp::Reverse(r.priority));
        debug!("Queued {} ({} pending)", id, self.pending.len());
        EnqueueOutcome::Queued(id)
    }

    /// Promotes the highest-priority pending request when the slot is free.
    /// Returns the newly active request, if any.
    pub fn reconcile(&mut self) -> Option<&PopupRequest> {
        if self.active.is_some() || self.cooling_down || self.pending.is_empty() {
            return None;
        }
        let next = self.pending.remove(0);
        debug!("Opening {}", next.id);
        self.active = Some(next);
        self.open = true;
        self.active.as_ref()
    }

    /// Closes the active popup and starts the post-close cooldown. The returned
    /// generation must be handed back to `finish_cooldown` once the delay elapses.
    pub fn close(&mut self) -> u64 {
        if let Some(closed) = self.active.take() {
            debug!("Closed {}", closed.id);
        }
        self.open = false;
        self.cooling_down = true;
        self.close_generation += 1;
        self.close_generation
    }

    /// Ends the cooldown started by the close with this generation. Completions
    /// from earlier closes, or from before a `clear`, are ignored.
    pub fn finish_cooldown(&mut self, generation: u64) -> bool {
        if !self.cooling_down || generation != self.close_generation {
            return false;
        }
        self.cooling_down = false;
        true
    }

    pub fn clear(&mut self) {
        debug!(
            "Clearing popup queue ({} pending, active: {})",
            self.pending.len(),
            self.active.is_some()
        );
        self.pending.clear();
        self.active = None;
        self.open = false;
        self.cooling_down = false;
        self.close_generation += 1;
    }

    pub fn state(&self) -> QueueState {
        if self.active.is_some() {
            QueueState::Open
        } else if self.pending.is_empty() {
            QueueState::Idle
        } else {
            QueueState::Pending
        }
    }

    pub fn pending(&self) -> &[PopupRequest] {
        &self.pending
    }

    pub fn active(&self) -> Option<&PopupRequest> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooling_down
    }

    pub fn close_generation(&self) -> u64 {
        self.close_generation
    }

    /// True when a `reconcile` call would promote something.
    pub fn needs_reconcile(&self) -> bool {
        self.active.is_none() && !self.cooling_down && !self.pending.is_empty()
    }
}
