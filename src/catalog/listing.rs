//! Shared list pipeline: sort key, order type, then page window.

use crate::catalog::page::{DEFAULT_PAGE, DEFAULT_SIZE, PageRequest};
use crate::catalog::sort::{EntityGroup, SortSpec};
use crate::config::PaginationMode;
use crate::error::Result;
use serde::Deserialize;

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Public sort key, defaults to the group identifier.
    pub sort_by: Option<String>,
    /// `asc` or `desc`, defaults to `asc`.
    pub order_type: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Records per page.
    pub size: Option<i64>,
    /// Whether to window at all, defaults to `true`.
    pub pagination: Option<bool>,
}

/// Raw ordering parameters for endpoints without pagination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParams {
    /// Public sort key, defaults to the group identifier.
    pub sort_by: Option<String>,
    /// `asc` or `desc`, defaults to `asc`.
    pub order_type: Option<String>,
}

impl OrderParams {
    /// Resolve into an ordering for `group`.
    pub fn resolve(&self, group: EntityGroup) -> Result<SortSpec> {
        SortSpec::parse(
            group,
            self.sort_by.as_deref().unwrap_or(group.default_sort_key()),
            self.order_type.as_deref().unwrap_or("asc"),
        )
    }
}

impl ListParams {
    /// Validate into a [`ListQuery`] for `group`.
    ///
    /// Page and size are validated even when pagination is disabled.
    pub fn resolve(&self, group: EntityGroup) -> Result<ListQuery> {
        let sort = OrderParams {
            sort_by: self.sort_by.clone(),
            order_type: self.order_type.clone(),
        }
        .resolve(group)?;

        let page = PageRequest::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.size.unwrap_or(DEFAULT_SIZE),
        )?;

        Ok(ListQuery {
            sort,
            page: self.pagination.unwrap_or(true).then_some(page),
        })
    }
}

/// Validated ordering plus optional window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// Ordering to apply.
    pub sort: SortSpec,
    /// Window to apply, `None` when pagination is disabled.
    pub page: Option<PageRequest>,
}

impl ListQuery {
    /// Run `fetch` with the window pushed into storage, or fetch everything
    /// and window in memory, depending on `mode`.
    pub fn fetch<T, F>(&self, mode: PaginationMode, fetch: F) -> Result<Vec<T>>
    where
        F: FnOnce(&SortSpec, Option<&PageRequest>) -> Result<Vec<T>>,
    {
        match (mode, self.page.as_ref()) {
            (PaginationMode::Memory, Some(page)) => Ok(page.apply(fetch(&self.sort, None)?)),
            (_, page) => fetch(&self.sort, page),
        }
    }
}
