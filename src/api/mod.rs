//! Access to the homework status API.
//!
//! The poll loop only sees the [`StatusApi`] trait, so it can run against the
//! real [`PracticumClient`] or a scripted fake.

mod client;
mod response;

pub use client::{PracticumClient, PracticumClientBuilder, DEFAULT_ENDPOINT};
pub use response::{current_date, validate, Homework, CURRENT_DATE, HOMEWORKS};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::PollError;

/// A source of homework status responses.
#[async_trait]
pub trait StatusApi: Send + Sync {
    /// Query items changed after `cursor` (Unix seconds).
    ///
    /// Returns the decoded body as-is; shape checks are left to
    /// [`validate`]. Implementations must not retry.
    async fn fetch(&self, cursor: i64) -> Result<Value, PollError>;
}
