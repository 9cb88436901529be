use std::cell::RefCell;
use std::rc::Rc;

use super::clock::{AnimationClock, FrameTicker};
use super::error::RewardError;
use super::gateway::{ClaimGateway, ClaimResult};
use super::session::{ResolvedSpin, SpinRejected, SpinSession};

/// A session as held by its dialog. Borrows are never kept across an await.
pub type SharedSession = Rc<RefCell<SpinSession>>;

#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    /// The spin trigger was inert; nothing changed.
    Rejected(SpinRejected),
    /// The session closed, or frames stopped, before the wheel landed.
    Cancelled,
    /// The claim went out but the session closed before the answer arrived.
    Discarded,
    Settled(ClaimResult),
    Failed(RewardError),
}

/// Progress reported by [`run_spin`] while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinEvent {
    /// Wheel angle for one animation frame.
    Frame(f64),
    /// The wheel has landed and the claim is about to be sent. The session is
    /// already in `Resolving`.
    Landed(ResolvedSpin),
}

pub fn share(session: SpinSession) -> SharedSession {
    Rc::new(RefCell::new(session))
}

/// Runs one spin end to end: animate over `ticker`, resolve the landing
/// sector, then submit exactly one claim for it.
///
/// `on_event` receives the wheel angle for every frame, including the final
/// landed angle, then the landing itself before the claim request starts.
pub async fn run_spin<G, T, F>(
    session: &SharedSession,
    gateway: &G,
    ticker: T,
    spin_angle: f64,
    mut on_event: F,
) -> SpinOutcome
where
    G: ClaimGateway,
    T: FrameTicker,
    F: FnMut(SpinEvent),
{
    let started = session.borrow_mut().begin_spin(spin_angle);
    let plan = match started {
        Ok(plan) => plan,
        Err(rejected) => {
            log::warn!("Spin request ignored: {:?}", rejected);
            return SpinOutcome::Rejected(rejected);
        }
    };

    let (liveness, mission_set_id, duration_ms) = {
        let session = session.borrow();
        (
            session.liveness(),
            session.mission_set_id(),
            session.settings().duration_ms,
        )
    };
    log::info!(
        "Spinning reward wheel for mission set {} by {:.1} degrees",
        mission_set_id,
        spin_angle
    );

    let mut clock = AnimationClock::new(ticker, duration_ms);
    while let Some(sample) = clock.next_sample().await {
        if !liveness.is_alive() {
            log::debug!("Session closed mid-spin, dropping animation");
            return SpinOutcome::Cancelled;
        }
        on_event(SpinEvent::Frame(plan.angle_at(sample.eased)));
    }

    if !liveness.is_alive() {
        return SpinOutcome::Cancelled;
    }
    if !clock.is_complete() {
        log::warn!("Frame source stopped before the wheel landed");
        session.borrow_mut().cancel_spin();
        return SpinOutcome::Cancelled;
    }

    let resolved = session.borrow_mut().complete_animation();
    let Some(resolved) = resolved else {
        return SpinOutcome::Cancelled;
    };
    log::info!(
        "Wheel landed at {:.1} degrees on sector {} ({})",
        resolved.landed_angle,
        resolved.index,
        resolved.option.name
    );
    let option_id = resolved.option.id;
    on_event(SpinEvent::Landed(resolved));

    let outcome = gateway.submit_claim(mission_set_id, option_id).await;

    if !liveness.is_alive() {
        log::debug!("Session closed before claim answer, discarding {:?}", outcome);
        return SpinOutcome::Discarded;
    }

    session.borrow_mut().settle(outcome.clone());
    match outcome {
        Ok(result) => {
            log::info!("Reward granted: {}", result.option_name);
            SpinOutcome::Settled(result)
        }
        Err(e) => {
            log::warn!("Reward claim failed: {}", e);
            SpinOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward_roulette::clock::SpinSettings;
    use crate::reward_roulette::gateway::ExistingClaim;
    use crate::reward_roulette::session::SpinPhase;
    use crate::reward_roulette::test_support::{options, FakeGateway, ScriptedTicker};
    use futures::executor::block_on;

    fn open(gateway: &FakeGateway) -> SharedSession {
        share(block_on(SpinSession::open(gateway, 4, SpinSettings::default())).unwrap())
    }

    fn full_ticker() -> ScriptedTicker {
        ScriptedTicker::spanning(SpinSettings::default().duration_ms, 30)
    }

    #[test]
    fn test_four_option_spin_claims_third_option() {
        let gateway = FakeGateway::with_options(options(&["Sticker", "Mug", "Coupon", "Pin"]));
        let session = open(&gateway);
        let mut frames = Vec::new();

        let outcome = block_on(run_spin(&session, &gateway, full_ticker(), 1810.0, |event| {
            if let SpinEvent::Frame(angle) = event {
                frames.push(angle)
            }
        }));

        assert_eq!(
            outcome,
            SpinOutcome::Settled(ClaimResult { option_id: 102, option_name: "Coupon".into() })
        );
        assert_eq!(*gateway.submitted.borrow(), vec![(4, 102)]);
        assert_eq!(frames.first().copied(), Some(0.0));
        assert_eq!(frames.last().copied(), Some(1810.0));
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));

        let session = session.borrow();
        assert_eq!(session.phase(), SpinPhase::Settled);
        assert_eq!(session.base_angle(), 10.0);
    }

    #[test]
    fn test_prior_claim_never_animates_or_submits() {
        let mut gateway = FakeGateway::with_options(options(&["Sticker", "Mug"]));
        gateway.existing = Ok(Some(ExistingClaim {
            status: true,
            option_name: Some("Sticker".into()),
        }));
        let session = open(&gateway);
        let mut frames = 0;

        let outcome = block_on(run_spin(&session, &gateway, full_ticker(), 1900.0, |_| frames += 1));

        assert_eq!(
            outcome,
            SpinOutcome::Rejected(SpinRejected::PriorClaim { option_name: Some("Sticker".into()) })
        );
        assert_eq!(frames, 0);
        assert_eq!(gateway.submit_count(), 0);
    }

    #[test]
    fn test_closing_mid_spin_prevents_claim() {
        let gateway = FakeGateway::with_options(options(&["A", "B", "C"]));
        let session = open(&gateway);
        let closer = session.clone();
        let ticker = full_ticker().with_hook(10, move || closer.borrow_mut().close());
        let mut frames = 0;

        let outcome = block_on(run_spin(&session, &gateway, ticker, 2000.0, |_| frames += 1));

        assert_eq!(outcome, SpinOutcome::Cancelled);
        assert_eq!(frames, 10);
        assert_eq!(gateway.submit_count(), 0);
        assert_eq!(session.borrow().base_angle(), 0.0);
    }

    #[test]
    fn test_spin_requests_during_animation_are_inert() {
        let gateway = FakeGateway::with_options(options(&["A", "B", "C", "D"]));
        let session = open(&gateway);
        let rejected = Rc::new(RefCell::new(None));
        let ticker = {
            let session = session.clone();
            let rejected = rejected.clone();
            full_ticker().with_hook(5, move || {
                let snapshot = session.borrow().base_angle();
                *rejected.borrow_mut() = Some((session.borrow_mut().begin_spin(720.0), snapshot));
            })
        };

        let outcome = block_on(run_spin(&session, &gateway, ticker, 1810.0, |_| {}));

        assert!(matches!(outcome, SpinOutcome::Settled(_)));
        assert_eq!(
            rejected.borrow().clone(),
            Some((Err(SpinRejected::NotIdle(SpinPhase::Spinning)), 0.0))
        );
        assert_eq!(gateway.submit_count(), 1);
    }

    #[test]
    fn test_conflict_after_landing_fails_session() {
        let mut gateway = FakeGateway::with_options(options(&["A", "B", "C", "D"]));
        gateway.claim_error = Some(RewardError::AlreadyClaimed { option_name: None });
        let session = open(&gateway);
        let mut last_frame = None;

        let outcome = block_on(run_spin(&session, &gateway, full_ticker(), 1810.0, |event| {
            if let SpinEvent::Frame(angle) = event {
                last_frame = Some(angle)
            }
        }));

        assert_eq!(
            outcome,
            SpinOutcome::Failed(RewardError::AlreadyClaimed { option_name: None })
        );
        assert_eq!(last_frame, Some(1810.0));

        let view = session.borrow().snapshot();
        assert_eq!(view.phase, SpinPhase::Failed);
        assert_eq!(view.base_angle, 10.0);
        assert!(view.result.is_none());
        assert!(!view.can_spin);

        let again = block_on(run_spin(&session, &gateway, full_ticker(), 1800.0, |_| {}));
        assert_eq!(again, SpinOutcome::Rejected(SpinRejected::NotIdle(SpinPhase::Failed)));
        assert_eq!(gateway.submit_count(), 1);
    }

    #[test]
    fn test_claim_answer_after_close_is_discarded() {
        let gateway = FakeGateway::with_options(options(&["A", "B"]));
        let session = open(&gateway);
        let closer = session.clone();
        *gateway.on_submit.borrow_mut() = Some(Box::new(move || closer.borrow_mut().close()));

        let outcome = block_on(run_spin(&session, &gateway, full_ticker(), 1800.0, |_| {}));

        assert_eq!(outcome, SpinOutcome::Discarded);
        assert_eq!(gateway.submit_count(), 1);
        let session = session.borrow();
        assert_eq!(session.phase(), SpinPhase::Resolving);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_stalled_frames_return_session_to_idle() {
        let gateway = FakeGateway::with_options(options(&["A", "B"]));
        let session = open(&gateway);
        let ticker = ScriptedTicker::new(vec![0.0, 16.0, 32.0]);

        let outcome = block_on(run_spin(&session, &gateway, ticker, 1900.0, |_| {}));

        assert_eq!(outcome, SpinOutcome::Cancelled);
        assert_eq!(gateway.submit_count(), 0);
        let session = session.borrow();
        assert_eq!(session.phase(), SpinPhase::Idle);
        assert_eq!(session.base_angle(), 0.0);
    }

    #[test]
    fn test_landing_is_reported_before_claim() {
        let gateway = FakeGateway::with_options(options(&["Sticker", "Mug", "Coupon", "Pin"]));
        let session = open(&gateway);
        let observer = session.clone();
        let mut landings = Vec::new();

        block_on(run_spin(&session, &gateway, full_ticker(), 1810.0, |event| {
            if let SpinEvent::Landed(resolved) = event {
                let view = observer.borrow().snapshot();
                landings.push((resolved.index, view.phase, gateway.submit_count()));
            }
        }));

        assert_eq!(landings, vec![(2, SpinPhase::Resolving, 0)]);
        assert_eq!(gateway.submit_count(), 1);
    }

    #[test]
    fn test_cancelled_spin_never_reports_landing() {
        let gateway = FakeGateway::with_options(options(&["A", "B"]));
        let session = open(&gateway);
        let ticker = ScriptedTicker::new(vec![0.0, 16.0]);
        let mut landed = false;

        block_on(run_spin(&session, &gateway, ticker, 1900.0, |event| {
            landed |= matches!(event, SpinEvent::Landed(_));
        }));

        assert!(!landed);
    }
}
