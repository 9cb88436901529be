use serde::{Deserialize, Serialize};

use super::catalog::RewardOption;
use super::error::{Result, RewardError};

/// Prior grant for a mission set, as reported by `GET /rewards/my/{id}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExistingClaim {
    pub status: bool,
    #[serde(default)]
    pub option_name: Option<String>,
}

/// One entry of `GET /rewards/options/{id}`. Position in the array is the sector.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OptionListing {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    pub mission_set_id: i64,
    pub option_id: i64,
}

/// Authoritative grant returned by a successful `POST /rewards/claim`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResult {
    pub option_id: i64,
    pub option_name: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ClaimConflictBody {
    #[serde(default)]
    option_name: Option<String>,
}

/// Backend port used by the spin engine. Implementations own no wheel state.
///
/// Futures are not required to be `Send`; the engine runs on a single-threaded
/// executor.
#[allow(async_fn_in_trait)]
pub trait ClaimGateway {
    /// `Ok(None)` when the server has nothing on record. Callers treat an `Err`
    /// the same way.
    async fn get_existing_claim(&self, mission_set_id: i64) -> Result<Option<ExistingClaim>>;

    async fn list_options(&self, mission_set_id: i64) -> Result<Vec<RewardOption>>;

    /// Fails with `AlreadyClaimed`, `InvalidOption` or `NetworkFailure`.
    async fn submit_claim(&self, mission_set_id: i64, option_id: i64) -> Result<ClaimResult>;
}

/// Turns a listing into options whose `display_order` is their array position.
pub fn into_options(listing: Vec<OptionListing>) -> Vec<RewardOption> {
    listing
        .into_iter()
        .enumerate()
        .map(|(display_order, entry)| RewardOption {
            id: entry.id,
            name: entry.name,
            display_order,
        })
        .collect()
}

/// Empty or undecodable bodies count as "no claim".
pub fn parse_existing_claim(body: &str) -> Option<ExistingClaim> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return None;
    }

    match serde_json::from_str::<ExistingClaim>(trimmed) {
        Ok(claim) => Some(claim),
        Err(e) => {
            log::warn!("Ignoring unreadable existing-claim payload: {}", e);
            None
        }
    }
}

/// Maps a non-success `POST /rewards/claim` status to the claim error taxonomy.
pub fn classify_claim_failure(status: u16, body: &str) -> RewardError {
    match status {
        409 => {
            let conflict = serde_json::from_str::<ClaimConflictBody>(body).unwrap_or_default();
            RewardError::AlreadyClaimed {
                option_name: conflict.option_name,
            }
        }
        400 | 404 | 422 => {
            let reason = if body.trim().is_empty() {
                format!("status {}", status)
            } else {
                body.trim().to_string()
            };
            RewardError::InvalidOption(reason)
        }
        _ => RewardError::NetworkFailure(format!("Error status: {}", status)),
    }
}
