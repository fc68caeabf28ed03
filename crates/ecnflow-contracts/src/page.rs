//! List endpoints and the `{items, total}` pagination envelope.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The envelope every list endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of matching rows on the server, across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl ListQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Render as `(name, value)` pairs in a stable order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(keyword) = &self.keyword {
            pairs.push(("keyword", keyword.clone()));
        }
        pairs
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
            status: None,
            keyword: None,
        }
    }
}

/// The list screens the client can refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Ecns,
    Evaluations,
    Tasks,
    PurchaseOrders,
    DispatchOrders,
    IssueTemplates,
    SalesTemplates,
    Approvals,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Ecns,
        ResourceKind::Evaluations,
        ResourceKind::Tasks,
        ResourceKind::PurchaseOrders,
        ResourceKind::DispatchOrders,
        ResourceKind::IssueTemplates,
        ResourceKind::SalesTemplates,
        ResourceKind::Approvals,
    ];

    /// Path of the list endpoint, relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Ecns => "/ecns",
            ResourceKind::Evaluations => "/ecn-evaluations",
            ResourceKind::Tasks => "/ecn-tasks",
            ResourceKind::PurchaseOrders => "/purchase-orders",
            ResourceKind::DispatchOrders => "/dispatch-orders",
            ResourceKind::IssueTemplates => "/issue-templates",
            ResourceKind::SalesTemplates => "/sales-templates",
            ResourceKind::Approvals => "/approvals",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().trim_start_matches('/'))
    }
}
