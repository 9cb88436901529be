pub const REWARDS_EXISTING_CLAIM_ENDPOINT: &str = "/rewards/my";
pub const REWARDS_OPTIONS_ENDPOINT: &str = "/rewards/options";
pub const REWARDS_CLAIM_ENDPOINT: &str = "/rewards/claim";

pub const CATALOG_UNAVAILABLE_ERROR: &str = "Could not load the reward wheel. Please try again later";
pub const EMPTY_CATALOG_ERROR: &str = "There are no rewards to spin for in this mission set yet";
pub const ALREADY_CLAIMED_ERROR: &str = "A reward has already been claimed for this mission set";
pub const CLAIM_REJECTED_ERROR: &str = "The server did not accept this prize. The spin was not counted";
pub const CLAIM_NETWORK_ERROR: &str = "We could not confirm your prize. The wheel result may not reflect a granted reward";

pub const SPIN_DURATION_MS: f64 = 4000.0;
pub const MIN_FULL_TURNS: u32 = 5;
pub const MIN_LOADING_MS: u32 = 800;

pub fn existing_claim_path(mission_set_id: i64) -> String {
    format!("{}/{}", REWARDS_EXISTING_CLAIM_ENDPOINT, mission_set_id)
}

pub fn options_path(mission_set_id: i64) -> String {
    format!("{}/{}", REWARDS_OPTIONS_ENDPOINT, mission_set_id)
}
