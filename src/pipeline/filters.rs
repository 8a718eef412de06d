use thiserror::Error;
use tracing::warn;

use super::FilterSelector;
use crate::country::Country;

pub const REFERENCE_COUNTRY: &str = "Lithuania";
pub const OCEANIA_REGION: &str = "Oceania";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReferenceLookupError {
    #[error("reference country '{name}' is not in the dataset")]
    Missing { name: String },

    #[error("reference country '{name}' has no area")]
    NoArea { name: String },
}

/// Output of the filter stage. `fallback` is set when the selector could not
/// be applied and the input was passed through unfiltered.
#[derive(Clone, Debug)]
pub struct Filtered<'a> {
    pub records: Vec<&'a Country>,
    pub fallback: Option<ReferenceLookupError>,
}

/// Area of the first record named `name` in `raw`.
pub fn reference_area(raw: &[Country], name: &str) -> Result<f64, ReferenceLookupError> {
    let reference = raw
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| ReferenceLookupError::Missing {
            name: name.to_string(),
        })?;
    reference.area.ok_or_else(|| ReferenceLookupError::NoArea {
        name: name.to_string(),
    })
}

/// Applies `selector` to `records`. Reference lookups always go to `raw`, never
/// to the already narrowed `records`.
pub fn filter<'a>(
    records: Vec<&'a Country>,
    raw: &[Country],
    selector: FilterSelector,
) -> Filtered<'a> {
    match selector {
        FilterSelector::All => Filtered {
            records,
            fallback: None,
        },
        FilterSelector::SmallerThanLithuania => match reference_area(raw, REFERENCE_COUNTRY) {
            Ok(limit) => Filtered {
                records: records
                    .into_iter()
                    .filter(|c| c.area.map_or(false, |area| area < limit))
                    .collect(),
                fallback: None,
            },
            Err(e) => {
                warn!(error = %e, "filter '{}' disabled, showing all records", selector);
                Filtered {
                    records,
                    fallback: Some(e),
                }
            }
        },
        FilterSelector::OceaniaRegion => Filtered {
            records: records
                .into_iter()
                .filter(|c| c.region == OCEANIA_REGION)
                .collect(),
            fallback: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> Vec<Country> {
        vec![
            Country::new("Aland Islands", "Europe", Some(1580.0)),
            Country::new("Lithuania", "Europe", Some(65300.0)),
            Country::new("Fiji", "Oceania", Some(18272.0)),
            Country::new("Bouvet Island", "Antarctic", None),
            Country::new("Poland", "Europe", Some(312679.0)),
        ]
    }

    fn names(records: &[&Country]) -> Vec<String> {
        records.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn smaller_than_reference_is_strict_and_skips_missing_area() {
        let raw = raw();
        let out = filter(raw.iter().collect(), &raw, FilterSelector::SmallerThanLithuania);
        assert_eq!(names(&out.records), vec!["Aland Islands", "Fiji"]);
        assert!(out.fallback.is_none());
    }

    #[test]
    fn reference_is_looked_up_in_raw_collection() {
        let raw = raw();
        let narrowed: Vec<&Country> = raw.iter().filter(|c| c.name != "Lithuania").collect();
        let out = filter(narrowed, &raw, FilterSelector::SmallerThanLithuania);
        assert_eq!(names(&out.records), vec!["Aland Islands", "Fiji"]);
    }

    #[test]
    fn missing_reference_falls_back_to_input() {
        let raw: Vec<Country> = raw().into_iter().filter(|c| c.name != "Lithuania").collect();
        let out = filter(raw.iter().collect(), &raw, FilterSelector::SmallerThanLithuania);
        assert_eq!(out.records.len(), raw.len());
        assert_eq!(
            out.fallback,
            Some(ReferenceLookupError::Missing {
                name: "Lithuania".to_string()
            })
        );
    }

    #[test]
    fn reference_without_area_falls_back() {
        let raw = vec![
            Country::new("Lithuania", "Europe", None),
            Country::new("Fiji", "Oceania", Some(18272.0)),
        ];
        let out = filter(raw.iter().collect(), &raw, FilterSelector::SmallerThanLithuania);
        assert_eq!(out.records.len(), 2);
        assert!(matches!(
            out.fallback,
            Some(ReferenceLookupError::NoArea { .. })
        ));
    }

    #[test]
    fn first_reference_match_wins() {
        let raw = vec![
            Country::new("Lithuania", "Europe", Some(100.0)),
            Country::new("Lithuania", "Europe", Some(1_000_000.0)),
        ];
        assert_eq!(reference_area(&raw, "Lithuania"), Ok(100.0));
    }

    #[test]
    fn oceania_region_is_exact_match() {
        let mut raw = raw();
        raw.push(Country::new("Nowhere", "oceania", Some(1.0)));
        let out = filter(raw.iter().collect(), &raw, FilterSelector::OceaniaRegion);
        assert_eq!(names(&out.records), vec!["Fiji"]);
    }
}
