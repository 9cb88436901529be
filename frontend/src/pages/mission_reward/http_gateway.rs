use gloo_net::http::{Request, RequestBuilder};
use shared::constants::{existing_claim_path, options_path, REWARDS_CLAIM_ENDPOINT};
use shared::reward_roulette::gateway::{classify_claim_failure, into_options, parse_existing_claim};
use shared::reward_roulette::{
    ClaimGateway, ClaimRequest, ClaimResult, ExistingClaim, OptionListing, Result, RewardError,
    RewardOption,
};

use super::wheel_utils::get_auth_token;
use crate::config::get_api_base_url;

/// Talks to the rewards endpoints of the marketplace API.
pub struct HttpClaimGateway {
    base_url: String,
}

impl HttpClaimGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for HttpClaimGateway {
    fn default() -> Self {
        Self::new(get_api_base_url())
    }
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match get_auth_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn network_error(e: gloo_net::Error) -> RewardError {
    RewardError::NetworkFailure(format!("{:?}", e))
}

impl ClaimGateway for HttpClaimGateway {
    async fn get_existing_claim(&self, mission_set_id: i64) -> Result<Option<ExistingClaim>> {
        let response = authorized(Request::get(&self.url(&existing_claim_path(mission_set_id))))
            .send()
            .await
            .map_err(network_error)?;

        if !response.ok() {
            return Err(RewardError::NetworkFailure(format!("Error status: {}", response.status())));
        }

        let body = response.text().await.map_err(network_error)?;
        Ok(parse_existing_claim(&body))
    }

    async fn list_options(&self, mission_set_id: i64) -> Result<Vec<RewardOption>> {
        let response = authorized(Request::get(&self.url(&options_path(mission_set_id))))
            .send()
            .await
            .map_err(|e| RewardError::CatalogUnavailable(format!("{:?}", e)))?;

        if !response.ok() {
            return Err(RewardError::CatalogUnavailable(format!("Error status: {}", response.status())));
        }

        let listing = response
            .json::<Vec<OptionListing>>()
            .await
            .map_err(|e| RewardError::CatalogUnavailable(format!("Error parsing options: {:?}", e)))?;
        Ok(into_options(listing))
    }

    async fn submit_claim(&self, mission_set_id: i64, option_id: i64) -> Result<ClaimResult> {
        let request = authorized(Request::post(&self.url(REWARDS_CLAIM_ENDPOINT)))
            .json(&ClaimRequest { mission_set_id, option_id })
            .map_err(|e| RewardError::NetworkFailure(format!("Failed to build request: {:?}", e)))?;

        let response = request.send().await.map_err(network_error)?;

        if response.ok() {
            return response
                .json::<ClaimResult>()
                .await
                .map_err(|e| RewardError::NetworkFailure(format!("Error parsing claim response: {:?}", e)));
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(classify_claim_failure(status, &body))
    }
}
