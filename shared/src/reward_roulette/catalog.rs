use serde::{Deserialize, Serialize};

use super::error::{Result, RewardError};
use super::gateway::ClaimGateway;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RewardOption {
    pub id: i64,
    pub name: String,
    /// Sector index on the wheel, `0..n`.
    pub display_order: usize,
}

/// Ordered options of one mission set, frozen for the lifetime of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardCatalog {
    mission_set_id: i64,
    options: Vec<RewardOption>,
}

impl RewardCatalog {
    /// Builds a catalog from options in server order. Sector positions are
    /// re-stamped from that order so `options()[i].display_order == i`.
    pub fn new(mission_set_id: i64, options: Vec<RewardOption>) -> Result<Self> {
        if options.is_empty() {
            return Err(RewardError::EmptyCatalog);
        }

        let options = options
            .into_iter()
            .enumerate()
            .map(|(display_order, option)| RewardOption { display_order, ..option })
            .collect();

        Ok(Self { mission_set_id, options })
    }

    pub async fn load<G: ClaimGateway>(gateway: &G, mission_set_id: i64) -> Result<Self> {
        let options = match gateway.list_options(mission_set_id).await {
            Ok(options) => options,
            Err(RewardError::CatalogUnavailable(reason)) => {
                return Err(RewardError::CatalogUnavailable(reason))
            }
            Err(e) => return Err(RewardError::CatalogUnavailable(e.to_string())),
        };

        let catalog = Self::new(mission_set_id, options)?;
        log::debug!(
            "Loaded {} reward options for mission set {}",
            catalog.len(),
            mission_set_id
        );
        Ok(catalog)
    }

    pub fn mission_set_id(&self) -> i64 {
        self.mission_set_id
    }

    pub fn options(&self) -> &[RewardOption] {
        &self.options
    }

    pub fn get(&self, index: usize) -> Option<&RewardOption> {
        self.options.get(index)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.options.iter().map(|o| o.name.clone()).collect()
    }
}
