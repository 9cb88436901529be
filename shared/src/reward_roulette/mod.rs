//! Mission reward roulette: option catalog, backend port, angle resolution,
//! animation clock and the spin session state machine.

pub mod catalog;
pub mod clock;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod resolver;
pub mod session;

#[cfg(test)]
mod test_support;

pub use catalog::{RewardCatalog, RewardOption};
pub use clock::{draw_spin_angle, ease_out_cubic, AnimationClock, ClockSample, FrameTicker, SpinSettings};
pub use engine::{run_spin, share, SharedSession, SpinEvent, SpinOutcome};
pub use error::{ErrorKind, Result, RewardError};
pub use gateway::{ClaimGateway, ClaimRequest, ClaimResult, ExistingClaim, OptionListing};
pub use resolver::{resolve, sector_center_angle, sector_start_angle, sector_width, POINTER_ANGLE};
pub use session::{ResolvedSpin, SessionLiveness, SessionView, SpinPhase, SpinPlan, SpinRejected, SpinSession};
