use thiserror::Error;

use crate::constants::{
    ALREADY_CLAIMED_ERROR, CATALOG_UNAVAILABLE_ERROR, CLAIM_NETWORK_ERROR, CLAIM_REJECTED_ERROR,
    EMPTY_CATALOG_ERROR,
};

pub type Result<T> = std::result::Result<T, RewardError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewardError {
    #[error("Reward catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Reward catalog is empty")]
    EmptyCatalog,

    #[error("Reward already claimed")]
    AlreadyClaimed { option_name: Option<String> },

    #[error("Invalid reward option: {0}")]
    InvalidOption(String),

    #[error("Network failure: {0}")]
    NetworkFailure(String),
}

/// User-facing failure category. `InvalidOption` surfaces as `ClaimRejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CatalogUnavailable,
    EmptyCatalog,
    AlreadyClaimed,
    ClaimRejected,
    NetworkFailure,
}

impl RewardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CatalogUnavailable(_) => ErrorKind::CatalogUnavailable,
            Self::EmptyCatalog => ErrorKind::EmptyCatalog,
            Self::AlreadyClaimed { .. } => ErrorKind::AlreadyClaimed,
            Self::InvalidOption(_) => ErrorKind::ClaimRejected,
            Self::NetworkFailure(_) => ErrorKind::NetworkFailure,
        }
    }

    /// The single message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::CatalogUnavailable(_) => CATALOG_UNAVAILABLE_ERROR.to_string(),
            Self::EmptyCatalog => EMPTY_CATALOG_ERROR.to_string(),
            Self::AlreadyClaimed { option_name: Some(name) } => {
                format!("{} ({})", ALREADY_CLAIMED_ERROR, name)
            }
            Self::AlreadyClaimed { option_name: None } => ALREADY_CLAIMED_ERROR.to_string(),
            Self::InvalidOption(_) => CLAIM_REJECTED_ERROR.to_string(),
            Self::NetworkFailure(_) => CLAIM_NETWORK_ERROR.to_string(),
        }
    }
}
