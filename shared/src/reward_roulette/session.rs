use std::cell::Cell;
use std::rc::Rc;

use super::catalog::{RewardCatalog, RewardOption};
use super::clock::SpinSettings;
use super::error::{Result, RewardError};
use super::gateway::{ClaimGateway, ClaimResult, ExistingClaim};
use super::resolver::{normalize_angle, resolve};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
    Resolving,
    Settled,
    Failed,
}

/// Why a spin request was ignored. Rejection never changes the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinRejected {
    PriorClaim { option_name: Option<String> },
    NotIdle(SpinPhase),
    Closed,
}

/// Cancellation token shared by everything working on behalf of a session.
#[derive(Debug, Clone)]
pub struct SessionLiveness(Rc<Cell<bool>>);

impl SessionLiveness {
    fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    fn end(&self) {
        self.0.set(false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub start_angle: f64,
    pub spin_angle: f64,
}

impl SpinPlan {
    pub fn target_angle(&self) -> f64 {
        self.start_angle + self.spin_angle
    }

    pub fn angle_at(&self, eased_progress: f64) -> f64 {
        self.start_angle + self.spin_angle * eased_progress
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpin {
    pub index: usize,
    pub option: RewardOption,
    pub landed_angle: f64,
}

/// Render-ready copy of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub mission_set_id: i64,
    pub phase: SpinPhase,
    pub base_angle: f64,
    pub option_names: Vec<String>,
    pub already_claimed: bool,
    pub prior_prize: Option<String>,
    pub resolved: Option<ResolvedSpin>,
    pub result: Option<ClaimResult>,
    pub failure: Option<RewardError>,
    pub can_spin: bool,
}

/// One open roulette dialog: a frozen option snapshot plus the spin state
/// machine `Idle -> Spinning -> Resolving -> Settled | Failed`.
#[derive(Debug)]
pub struct SpinSession {
    catalog: RewardCatalog,
    prior_claim: Option<ExistingClaim>,
    settings: SpinSettings,
    base_angle: f64,
    phase: SpinPhase,
    plan: Option<SpinPlan>,
    resolved: Option<ResolvedSpin>,
    result: Option<ClaimResult>,
    failure: Option<RewardError>,
    liveness: SessionLiveness,
}

impl SpinSession {
    /// Fetches prior-claim status and the option set. A failed prior-claim
    /// lookup counts as "no claim"; the server still rejects duplicates.
    pub async fn open<G: ClaimGateway>(
        gateway: &G,
        mission_set_id: i64,
        settings: SpinSettings,
    ) -> Result<Self> {
        let prior_claim = match gateway.get_existing_claim(mission_set_id).await {
            Ok(claim) => claim,
            Err(e) => {
                log::warn!(
                    "Existing claim lookup failed for mission set {}, assuming none: {}",
                    mission_set_id,
                    e
                );
                None
            }
        };

        let catalog = RewardCatalog::load(gateway, mission_set_id).await?;
        let session = Self::new(catalog, prior_claim, settings);

        log::info!(
            "Opened reward session for mission set {} ({} options, already claimed: {})",
            mission_set_id,
            session.catalog.len(),
            session.is_already_claimed()
        );
        Ok(session)
    }

    pub fn new(
        catalog: RewardCatalog,
        prior_claim: Option<ExistingClaim>,
        settings: SpinSettings,
    ) -> Self {
        Self {
            catalog,
            prior_claim: prior_claim.filter(|claim| claim.status),
            settings,
            base_angle: 0.0,
            phase: SpinPhase::Idle,
            plan: None,
            resolved: None,
            result: None,
            failure: None,
            liveness: SessionLiveness::new(),
        }
    }

    pub fn mission_set_id(&self) -> i64 {
        self.catalog.mission_set_id()
    }

    pub fn settings(&self) -> SpinSettings {
        self.settings
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn base_angle(&self) -> f64 {
        self.base_angle
    }

    pub fn is_already_claimed(&self) -> bool {
        self.prior_claim.is_some()
    }

    pub fn result(&self) -> Option<&ClaimResult> {
        self.result.as_ref()
    }

    pub fn liveness(&self) -> SessionLiveness {
        self.liveness.clone()
    }

    pub fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    pub fn can_spin(&self) -> bool {
        self.is_alive() && !self.is_already_claimed() && self.phase == SpinPhase::Idle
    }

    /// `Idle -> Spinning`. Inert unless the session is open, unclaimed and idle.
    pub fn begin_spin(&mut self, spin_angle: f64) -> std::result::Result<SpinPlan, SpinRejected> {
        if !self.is_alive() {
            return Err(SpinRejected::Closed);
        }
        if let Some(prior) = &self.prior_claim {
            return Err(SpinRejected::PriorClaim {
                option_name: prior.option_name.clone(),
            });
        }
        if self.phase != SpinPhase::Idle {
            return Err(SpinRejected::NotIdle(self.phase));
        }

        let plan = SpinPlan {
            start_angle: self.base_angle,
            spin_angle,
        };
        self.plan = Some(plan);
        self.phase = SpinPhase::Spinning;
        Ok(plan)
    }

    /// `Spinning -> Idle` when the frame source died before the animation
    /// finished. `base_angle` is untouched.
    pub fn cancel_spin(&mut self) {
        if self.phase == SpinPhase::Spinning {
            self.plan = None;
            self.phase = SpinPhase::Idle;
        }
    }

    /// `Spinning -> Resolving` after the final frame. Persists the landed angle
    /// and picks the option under the pointer.
    pub fn complete_animation(&mut self) -> Option<ResolvedSpin> {
        if !self.is_alive() || self.phase != SpinPhase::Spinning {
            return None;
        }
        let plan = self.plan.take()?;

        let target = plan.target_angle();
        let index = resolve(target, self.catalog.len());
        let option = self.catalog.get(index)?.clone();

        self.base_angle = normalize_angle(target);
        self.phase = SpinPhase::Resolving;

        let resolved = ResolvedSpin {
            index,
            option,
            landed_angle: self.base_angle,
        };
        self.resolved = Some(resolved.clone());
        Some(resolved)
    }

    /// `Resolving -> Settled | Failed`. The landed angle is kept either way.
    pub fn settle(&mut self, outcome: Result<ClaimResult>) -> SpinPhase {
        if self.phase != SpinPhase::Resolving {
            return self.phase;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.phase = SpinPhase::Settled;
            }
            Err(e) => {
                self.failure = Some(e);
                self.phase = SpinPhase::Failed;
            }
        }
        self.phase
    }

    /// Ends the session. Pending frames and claim results are dropped by their
    /// owners once they see the liveness token flip.
    pub fn close(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.liveness.end();
        self.plan = None;
        log::debug!(
            "Closed reward session for mission set {} in phase {:?}",
            self.mission_set_id(),
            self.phase
        );
    }

    pub fn snapshot(&self) -> SessionView {
        SessionView {
            mission_set_id: self.mission_set_id(),
            phase: self.phase,
            base_angle: self.base_angle,
            option_names: self.catalog.names(),
            already_claimed: self.is_already_claimed(),
            prior_prize: self.prior_claim.as_ref().and_then(|c| c.option_name.clone()),
            resolved: self.resolved.clone(),
            result: self.result.clone(),
            failure: self.failure.clone(),
            can_spin: self.can_spin(),
        }
    }
}
