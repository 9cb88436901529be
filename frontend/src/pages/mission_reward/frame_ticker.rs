use futures::channel::oneshot;
use gloo_render::{request_animation_frame, AnimationFrame};
use shared::reward_roulette::{FrameTicker, SessionLiveness};

/// `requestAnimationFrame` as a frame source. Stops asking for frames once the
/// owning session is closed; dropping the ticker cancels the pending frame.
pub struct RafTicker {
    liveness: SessionLiveness,
    pending: Option<AnimationFrame>,
}

impl RafTicker {
    pub fn new(liveness: SessionLiveness) -> Self {
        Self { liveness, pending: None }
    }
}

impl FrameTicker for RafTicker {
    async fn next_frame(&mut self) -> Option<f64> {
        if !self.liveness.is_alive() {
            return None;
        }

        let (tx, rx) = oneshot::channel();
        self.pending = Some(request_animation_frame(move |timestamp| {
            let _ = tx.send(timestamp);
        }));

        let timestamp = rx.await.ok();
        self.pending = None;
        timestamp
    }
}
