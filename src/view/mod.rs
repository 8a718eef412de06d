//! Immutable view state and its transition function.
//!
//! A [`ViewState`] is never mutated in place: every [`Intent`] produces a new
//! value. Search, filter and sort intents recompute the derived collection from
//! the raw one and reset the page; page intents reuse the derived collection.

use std::sync::Arc;

use tracing::debug;

use crate::country::Country;
use crate::pipeline::{self, FilterSelector, Query, ReferenceLookupError, SortKey, PAGE_SIZE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    Loaded(Vec<Country>),
    LoadFailed(String),
    SearchChanged(String),
    FilterChanged(FilterSelector),
    SortChanged(SortKey),
    PageChanged(usize),
    NextPage,
    PreviousPage,
}

#[derive(Clone, Debug)]
pub struct ViewState {
    status: LoadStatus,
    raw: Arc<[Country]>,
    query: Query,
    derived: Arc<[Country]>,
    page: usize,
    warning: Option<ReferenceLookupError>,
}

/// What the presenter needs to draw one frame.
#[derive(Clone, Debug)]
pub struct ViewSnapshot<'a> {
    pub countries: &'a [Country],
    pub current_page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub warning: Option<&'a ReferenceLookupError>,
    pub query: &'a Query,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::loading(Query::default())
    }
}

impl ViewState {
    /// Initial state while the loader is still running.
    pub fn loading(query: Query) -> Self {
        Self {
            status: LoadStatus::Loading,
            raw: Arc::from(Vec::new()),
            query,
            derived: Arc::from(Vec::new()),
            page: 1,
            warning: None,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn raw(&self) -> &[Country] {
        &self.raw
    }

    pub fn derived(&self) -> &[Country] {
        &self.derived
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        pipeline::total_pages(self.derived.len(), PAGE_SIZE)
    }

    pub fn warning(&self) -> Option<&ReferenceLookupError> {
        self.warning.as_ref()
    }

    pub fn apply(&self, intent: Intent) -> ViewState {
        match intent {
            Intent::Loaded(records) => {
                if self.status != LoadStatus::Loading {
                    return self.clone();
                }
                self.with_query(Arc::from(records), self.query.clone(), LoadStatus::Ready)
            }
            Intent::LoadFailed(message) => {
                if self.status != LoadStatus::Loading {
                    return self.clone();
                }
                Self {
                    status: LoadStatus::Failed(message),
                    raw: Arc::from(Vec::new()),
                    query: self.query.clone(),
                    derived: Arc::from(Vec::new()),
                    page: 0,
                    warning: None,
                }
            }
            Intent::SearchChanged(search) => self.requery(Query {
                search,
                ..self.query.clone()
            }),
            Intent::FilterChanged(filter) => self.requery(Query {
                filter,
                ..self.query.clone()
            }),
            Intent::SortChanged(sort) => self.requery(Query {
                sort,
                ..self.query.clone()
            }),
            Intent::PageChanged(page) => self.with_page(page),
            Intent::NextPage => self.with_page(self.page.saturating_add(1)),
            Intent::PreviousPage => self.with_page(self.page.saturating_sub(1)),
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        let total_pages = self.total_pages();
        let countries = match self.status {
            LoadStatus::Ready => pipeline::paginate(&self.derived[..], PAGE_SIZE, self.page).items,
            _ => &self.derived[..0],
        };
        ViewSnapshot {
            countries,
            current_page: self.page,
            total_pages,
            total_records: self.derived.len(),
            loading: self.status == LoadStatus::Loading,
            error: match &self.status {
                LoadStatus::Failed(message) => Some(message.as_str()),
                _ => None,
            },
            warning: self.warning.as_ref(),
            query: &self.query,
        }
    }

    fn requery(&self, query: Query) -> ViewState {
        match self.status {
            LoadStatus::Ready => self.with_query(self.raw.clone(), query, LoadStatus::Ready),
            // Remember the controls so they apply once (if ever) data arrives.
            _ => Self {
                query,
                ..self.clone()
            },
        }
    }

    fn with_query(&self, raw: Arc<[Country]>, query: Query, status: LoadStatus) -> ViewState {
        let derived = pipeline::derive(&raw, &query);
        debug!(
            raw = raw.len(),
            derived = derived.records.len(),
            search = %query.search,
            filter = %query.filter,
            sort = %query.sort,
            "recomputed derived collection"
        );
        Self {
            status,
            raw,
            query,
            derived: Arc::from(derived.records),
            page: 1,
            warning: derived.fallback,
        }
    }

    fn with_page(&self, page: usize) -> ViewState {
        if self.status != LoadStatus::Ready {
            return self.clone();
        }
        let page = pipeline::clamp_page(page, self.total_pages());
        debug!(page, total_pages = self.total_pages(), "page changed");
        Self {
            page,
            ..self.clone()
        }
    }
}
