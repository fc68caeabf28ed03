//! A `ListRefresher` that re-runs a fixed list query.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use ecnflow_contracts::{
    error::{EcnflowError, EcnflowResult},
    page::{ListQuery, Page, ResourceKind},
};

use crate::traits::{ListRefresher, ListSource};

/// Re-fetches one list screen and keeps the latest page.
///
/// Every refresh is a full re-fetch of the same query; nothing is cached
/// between calls apart from the last result, which replaces the previous one.
pub struct PageRefresher {
    source: Arc<dyn ListSource>,
    kind: ResourceKind,
    query: ListQuery,
    latest: Mutex<Option<Page<serde_json::Value>>>,
}

impl PageRefresher {
    pub fn new(source: Arc<dyn ListSource>, kind: ResourceKind, query: ListQuery) -> Self {
        Self {
            source,
            kind,
            query,
            latest: Mutex::new(None),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The most recently fetched page, if any refresh has succeeded.
    pub fn latest(&self) -> Option<Page<serde_json::Value>> {
        self.latest.lock().ok().and_then(|guard| guard.clone())
    }

    /// The latest page decoded into `T`.
    pub fn latest_as<T: DeserializeOwned>(&self) -> EcnflowResult<Option<Page<T>>> {
        self.latest().map(decode_page::<T>).transpose()
    }
}

#[async_trait]
impl ListRefresher for PageRefresher {
    async fn refresh(&self) -> EcnflowResult<()> {
        let page = self.source.list(self.kind, &self.query).await?;
        debug!(
            resource = %self.kind,
            items = page.len(),
            total = page.total,
            "list refreshed"
        );
        let mut latest = self.latest.lock().map_err(|_| EcnflowError::Decode {
            reason: "refresher state poisoned".to_string(),
        })?;
        *latest = Some(page);
        Ok(())
    }
}

/// Decode every item of a raw page into `T`.
pub fn decode_page<T: DeserializeOwned>(page: Page<serde_json::Value>) -> EcnflowResult<Page<T>> {
    let items = page
        .items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| EcnflowError::Decode {
            reason: format!("list item did not match the expected shape: {}", e),
        })?;
    Ok(Page {
        items,
        total: page.total,
    })
}
