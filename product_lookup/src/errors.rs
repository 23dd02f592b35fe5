use crate::notification::Alert;
use crate::product::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("No product found for id {0:?}")]
    NotFound(ProductId),
    /// Network failure, non-success status and undecodable payloads all land here.
    #[error("Product lookup failed")]
    RequestFailed(#[source] anyhow::Error),
}

impl LookupError {
    pub fn alert(&self) -> Alert {
        match self {
            LookupError::NotFound(_) => Alert::ProductNotFound,
            LookupError::RequestFailed(_) => Alert::LookupFailed,
        }
    }
}
