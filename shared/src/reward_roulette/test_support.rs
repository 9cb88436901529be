use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::catalog::RewardOption;
use super::clock::FrameTicker;
use super::error::{Result, RewardError};
use super::gateway::{ClaimGateway, ClaimResult, ExistingClaim};

pub fn options(names: &[&str]) -> Vec<RewardOption> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| RewardOption {
            id: 100 + i as i64,
            name: name.to_string(),
            display_order: i,
        })
        .collect()
}

pub type Hook = Box<dyn FnMut()>;

/// Replays fixed timestamps. An optional hook runs right before the frame at
/// `hook_at` is handed out.
pub struct ScriptedTicker {
    frames: VecDeque<f64>,
    served: usize,
    hook_at: usize,
    hook: Option<Hook>,
}

impl ScriptedTicker {
    pub fn new(frames: Vec<f64>) -> Self {
        Self {
            frames: frames.into(),
            served: 0,
            hook_at: 0,
            hook: None,
        }
    }

    /// Evenly spaced frames from 0 to `duration_ms` inclusive.
    pub fn spanning(duration_ms: f64, frames: usize) -> Self {
        let steps = frames.max(2) - 1;
        Self::new(
            (0..=steps)
                .map(|i| duration_ms * i as f64 / steps as f64)
                .collect(),
        )
    }

    pub fn with_hook(mut self, at: usize, hook: impl FnMut() + 'static) -> Self {
        self.hook_at = at;
        self.hook = Some(Box::new(hook));
        self
    }
}

impl FrameTicker for ScriptedTicker {
    async fn next_frame(&mut self) -> Option<f64> {
        if self.served == self.hook_at {
            if let Some(hook) = self.hook.as_mut() {
                hook();
            }
        }
        self.served += 1;
        self.frames.pop_front()
    }
}

/// In-memory backend that records every call.
pub struct FakeGateway {
    pub existing: Result<Option<ExistingClaim>>,
    pub options: Result<Vec<RewardOption>>,
    pub claim_error: Option<RewardError>,
    pub existing_calls: Cell<usize>,
    pub list_calls: Cell<usize>,
    pub submitted: RefCell<Vec<(i64, i64)>>,
    pub on_submit: RefCell<Option<Hook>>,
}

impl FakeGateway {
    pub fn with_options(options: Vec<RewardOption>) -> Self {
        Self {
            existing: Ok(None),
            options: Ok(options),
            claim_error: None,
            existing_calls: Cell::new(0),
            list_calls: Cell::new(0),
            submitted: RefCell::new(Vec::new()),
            on_submit: RefCell::new(None),
        }
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.borrow().len()
    }
}

impl ClaimGateway for FakeGateway {
    async fn get_existing_claim(&self, _mission_set_id: i64) -> Result<Option<ExistingClaim>> {
        self.existing_calls.set(self.existing_calls.get() + 1);
        self.existing.clone()
    }

    async fn list_options(&self, _mission_set_id: i64) -> Result<Vec<RewardOption>> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.options.clone()
    }

    async fn submit_claim(&self, mission_set_id: i64, option_id: i64) -> Result<ClaimResult> {
        self.submitted.borrow_mut().push((mission_set_id, option_id));
        if let Some(hook) = self.on_submit.borrow_mut().as_mut() {
            hook();
        }
        if let Some(err) = &self.claim_error {
            return Err(err.clone());
        }

        let name = self
            .options
            .as_ref()
            .ok()
            .and_then(|options| options.iter().find(|o| o.id == option_id))
            .map(|o| o.name.clone())
            .unwrap_or_default();
        Ok(ClaimResult {
            option_id,
            option_name: name,
        })
    }
}
