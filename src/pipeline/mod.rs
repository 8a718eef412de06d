//! Search, filter, sort and paginate stages over the raw country collection.
//!
//! Every stage is a pure function. [`derive`] composes search, filter and sort
//! starting from the raw collection each time; pagination is applied separately
//! so that changing pages never re-runs the other stages.

mod filters;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::country::Country;

pub use filters::{
    filter, reference_area, Filtered, ReferenceLookupError, OCEANIA_REGION, REFERENCE_COUNTRY,
};

pub const PAGE_SIZE: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("unknown filter '{value}', expected one of: all, smaller_than_lithuania, oceania_region")]
    UnknownFilter { value: String },

    #[error("unknown sort '{value}', expected one of: name_asc, name_desc, area_asc, area_desc")]
    UnknownSort { value: String },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterSelector {
    #[default]
    All,
    SmallerThanLithuania,
    OceaniaRegion,
}

impl FilterSelector {
    pub const ALL: [FilterSelector; 3] = [
        FilterSelector::All,
        FilterSelector::SmallerThanLithuania,
        FilterSelector::OceaniaRegion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::SmallerThanLithuania => "smaller_than_lithuania",
            Self::OceaniaRegion => "oceania_region",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::SmallerThanLithuania => "Smaller than Lithuania",
            Self::OceaniaRegion => "Oceania Region",
        }
    }
}

impl FromStr for FilterSelector {
    type Err = SelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "smaller_than_lithuania" => Ok(Self::SmallerThanLithuania),
            "oceania_region" => Ok(Self::OceaniaRegion),
            _ => Err(SelectorError::UnknownFilter {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for FilterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Name,
    Area,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortKey {
    fn default() -> Self {
        Self::NAME_ASC
    }
}

impl SortKey {
    pub const NAME_ASC: SortKey = SortKey::new(SortField::Name, SortOrder::Asc);
    pub const NAME_DESC: SortKey = SortKey::new(SortField::Name, SortOrder::Desc);
    pub const AREA_ASC: SortKey = SortKey::new(SortField::Area, SortOrder::Asc);
    pub const AREA_DESC: SortKey = SortKey::new(SortField::Area, SortOrder::Desc);

    pub const ALL: [SortKey; 4] = [
        SortKey::NAME_ASC,
        SortKey::NAME_DESC,
        SortKey::AREA_ASC,
        SortKey::AREA_DESC,
    ];

    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn as_str(self) -> &'static str {
        match (self.field, self.order) {
            (SortField::Name, SortOrder::Asc) => "name_asc",
            (SortField::Name, SortOrder::Desc) => "name_desc",
            (SortField::Area, SortOrder::Asc) => "area_asc",
            (SortField::Area, SortOrder::Desc) => "area_desc",
        }
    }

    pub fn label(self) -> &'static str {
        match (self.field, self.order) {
            (SortField::Name, SortOrder::Asc) => "Name (A-Z)",
            (SortField::Name, SortOrder::Desc) => "Name (Z-A)",
            (SortField::Area, SortOrder::Asc) => "Area (Smallest to Largest)",
            (SortField::Area, SortOrder::Desc) => "Area (Largest to Smallest)",
        }
    }

    pub fn compare(self, a: &Country, b: &Country) -> Ordering {
        let natural = match self.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Area => compare_area(a.area, b.area),
        };
        match self.order {
            SortOrder::Asc => natural,
            SortOrder::Desc => natural.reverse(),
        }
    }
}

impl FromStr for SortKey {
    type Err = SelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| SelectorError::UnknownSort {
                value: value.to_string(),
            })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Records without an area sort before every record that has one.
fn compare_area(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

/// The search, filter and sort inputs of a derivation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub filter: FilterSelector,
    pub sort: SortKey,
}

#[derive(Clone, Debug, Default)]
pub struct Derived {
    pub records: Vec<Country>,
    pub fallback: Option<ReferenceLookupError>,
}

/// Keeps records whose name contains `term`, ignoring case. An empty term keeps
/// everything.
pub fn search<'a>(records: Vec<&'a Country>, term: &str) -> Vec<&'a Country> {
    if term.is_empty() {
        return records;
    }
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort: records with equal keys keep their input order in both
/// directions.
pub fn sort<'a>(mut records: Vec<&'a Country>, key: SortKey) -> Vec<&'a Country> {
    records.sort_by(|a, b| key.compare(a, b));
    records
}

pub fn derive(raw: &[Country], query: &Query) -> Derived {
    let searched = search(raw.iter().collect(), &query.search);
    let filtered = filter(searched, raw, query.filter);
    let sorted = sort(filtered.records, query.sort);
    Derived {
        records: sorted.into_iter().cloned().collect(),
        fallback: filtered.fallback,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub total_pages: usize,
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Clamps `page` into `[1, total_pages]`. With no pages at all the result is 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn paginate<T>(records: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    let total_pages = total_pages(records.len(), page_size);
    let number = clamp_page(page, total_pages);
    let start = ((number - 1) * page_size).min(records.len());
    let end = (start + page_size).min(records.len());
    Page {
        items: &records[start..end],
        number,
        total_pages,
    }
}
