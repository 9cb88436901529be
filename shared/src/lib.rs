pub mod constants;
pub mod reward_roulette;
