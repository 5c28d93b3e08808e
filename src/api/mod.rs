//! Sweepstakes backend integration.
//!
//! This module provides a typed interface to the sweepstakes REST API,
//! handling timeouts, retries, rate limiting and response decoding.

mod client;
mod response;

pub use client::{ApiClient, ApiClientBuilder};
pub use response::{decode_body, error_detail};

use crate::error::Result;
use crate::state::{CreateSweepstakeRequest, EventType, MarketInfo, Sweepstake, SweepstakeHistory};
use async_trait::async_trait;

/// One method per backend operation.
///
/// Every failure is one of the API variants of [`crate::Error`]: `NotFound`,
/// `Validation`, `ServerFault`, `Transport` or `Decode`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SweepstakeApi: Send + Sync {
    /// `GET /api/sweepstakes/{id}`
    async fn get_sweepstake(&self, id: &str) -> Result<Sweepstake>;

    /// `GET /api/sweepstakes`, open sweepstakes only.
    async fn get_all_sweepstakes(&self) -> Result<Vec<Sweepstake>> {
        self.list_sweepstakes(false).await
    }

    /// `GET /api/sweepstakes?include_closed=...`
    async fn list_sweepstakes(&self, include_closed: bool) -> Result<Vec<Sweepstake>>;

    /// `POST /api/sweepstakes`
    async fn create_sweepstake(&self, request: &CreateSweepstakeRequest) -> Result<Sweepstake>;

    /// `POST /api/sweepstakes/{id}/refresh`
    async fn refresh_sweepstake(&self, id: &str) -> Result<Sweepstake>;

    /// `POST /api/sweepstakes/{id}/close`. The response body is ignored.
    async fn close_sweepstake(&self, id: &str) -> Result<()>;

    /// `GET /api/event-types`
    async fn get_event_types(&self) -> Result<Vec<EventType>>;

    /// `GET /api/markets/{event_type}`
    async fn get_markets(&self, event_type: &str) -> Result<Vec<MarketInfo>>;

    /// `GET /api/sweepstakes/{id}/history`
    async fn get_sweepstake_history(&self, id: &str) -> Result<SweepstakeHistory>;
}
