//! HTTP GET job.
//!
//! Each call opens a fresh client, so no connection is reused across work
//! items. Non-2xx responses are not errors: the status is reported as-is.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::job::{Job, JobError};

/// Outcome of one GET request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fetched {
    /// HTTP status code.
    pub status: u16,
    /// Length of the decoded body text, in characters.
    pub length: usize,
}

impl Fetched {
    fn from_body(status: u16, body: &str) -> Self {
        Self {
            status,
            length: body.chars().count(),
        }
    }
}

/// Job fetching one URL per item.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FetchJob;

impl Job for FetchJob {
    type Item = String;
    type Output = Fetched;
    const NAME: &'static str = "fetch";

    fn execute(&self, url: &String) -> Result<Fetched, JobError> {
        let response = reqwest::blocking::get(url.as_str())?;
        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(%url, status, "fetched");
        Ok(Fetched::from_body(status, &body))
    }

    fn execute_async<'a>(&'a self, url: &'a String) -> BoxFuture<'a, Result<Fetched, JobError>> {
        Box::pin(async move {
            let response = reqwest::get(url.as_str()).await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            debug!(%url, status, "fetched");
            Ok(Fetched::from_body(status, &body))
        })
    }
}
