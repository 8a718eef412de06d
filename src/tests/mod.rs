use std::collections::HashSet;

use crate::country::Country;
use crate::pipeline::{self, FilterSelector, Query, SortKey, PAGE_SIZE};
use crate::view::{Intent, ViewState};

fn scenario() -> Vec<Country> {
    vec![
        Country::new("Aland Islands", "Europe", Some(1580.0)),
        Country::new("Lithuania", "Europe", Some(65300.0)),
        Country::new("Fiji", "Oceania", Some(18272.0)),
    ]
}

fn names(records: &[Country]) -> HashSet<&str> {
    records.iter().map(|c| c.name.as_str()).collect()
}

fn loaded(records: Vec<Country>) -> ViewState {
    ViewState::default().apply(Intent::Loaded(records))
}

#[test]
fn smaller_than_lithuania_scenario() {
    let state = loaded(scenario()).apply(Intent::FilterChanged(FilterSelector::SmallerThanLithuania));
    assert_eq!(names(state.derived()), HashSet::from(["Aland Islands", "Fiji"]));
    assert!(state.warning().is_none());
}

#[test]
fn oceania_region_scenario() {
    let state = loaded(scenario()).apply(Intent::FilterChanged(FilterSelector::OceaniaRegion));
    assert_eq!(names(state.derived()), HashSet::from(["Fiji"]));
}

#[test]
fn search_land_scenario() {
    let state = loaded(scenario()).apply(Intent::SearchChanged("land".to_string()));
    assert_eq!(names(state.derived()), HashSet::from(["Aland Islands"]));

    let shouting = loaded(scenario()).apply(Intent::SearchChanged("LAND".to_string()));
    assert_eq!(names(shouting.derived()), HashSet::from(["Aland Islands"]));
}

#[test]
fn forty_five_records_make_three_pages() {
    let records: Vec<Country> = (0..45)
        .map(|i| Country::new(format!("Country {i:02}"), "Europe", Some(i as f64)))
        .collect();
    let state = loaded(records);
    assert_eq!(state.total_pages(), 3);

    let third = state.apply(Intent::PageChanged(3));
    assert_eq!(third.snapshot().countries.len(), 5);

    let fourth = state.apply(Intent::PageChanged(4));
    assert_eq!(fourth.current_page(), 3);
    assert_eq!(fourth.snapshot().countries, third.snapshot().countries);
}

#[test]
fn page_changes_never_change_the_matching_set() {
    let records: Vec<Country> = (0..70)
        .map(|i| Country::new(format!("Island {i:02}"), "Oceania", Some(i as f64)))
        .collect();
    let state = loaded(records)
        .apply(Intent::SearchChanged("island 1".to_string()))
        .apply(Intent::SortChanged(SortKey::AREA_DESC));
    let before = state.derived().to_vec();
    for page in [0, 1, 2, 3, 99] {
        let paged = state.apply(Intent::PageChanged(page));
        assert_eq!(paged.derived(), before.as_slice());
    }
}

#[test]
fn every_control_change_resets_to_first_page() {
    let records: Vec<Country> = (0..60)
        .map(|i| Country::new(format!("Land {i:02}"), "Oceania", Some(i as f64)))
        .collect();
    let on_page_three = loaded(records).apply(Intent::PageChanged(3));
    assert_eq!(on_page_three.current_page(), 3);

    for intent in [
        Intent::SearchChanged("land".to_string()),
        Intent::FilterChanged(FilterSelector::OceaniaRegion),
        Intent::SortChanged(SortKey::NAME_DESC),
    ] {
        assert_eq!(on_page_three.apply(intent).current_page(), 1);
    }
}

#[test]
fn derived_pages_are_a_partition_without_duplicates() {
    let mut records: Vec<Country> = (0..53)
        .map(|i| Country::new(format!("C{i:02}"), "Europe", Some((i % 7) as f64)))
        .collect();
    records.push(Country::new("Lithuania", "Europe", Some(65300.0)));
    let state = loaded(records).apply(Intent::SortChanged(SortKey::AREA_ASC));
    let total = state.total_pages();

    let mut seen = Vec::new();
    for page in 1..=total {
        let paged = state.apply(Intent::PageChanged(page));
        let snap = paged.snapshot();
        assert!(snap.countries.len() <= PAGE_SIZE);
        seen.extend(snap.countries.iter().cloned());
    }
    assert_eq!(seen, state.derived());
    assert_eq!(names(&seen).len(), seen.len());
}

#[test]
fn missing_reference_country_keeps_view_usable() {
    let records: Vec<Country> = scenario()
        .into_iter()
        .filter(|c| c.name != "Lithuania")
        .collect();
    let state = loaded(records).apply(Intent::FilterChanged(FilterSelector::SmallerThanLithuania));
    assert_eq!(names(state.derived()), HashSet::from(["Aland Islands", "Fiji"]));
    assert!(state
        .snapshot()
        .warning
        .map(|w| w.to_string().contains("Lithuania"))
        .unwrap_or(false));
}

#[test]
fn search_and_filter_both_start_from_raw_collection() {
    let raw = scenario();
    let state = loaded(raw.clone())
        .apply(Intent::SearchChanged("i".to_string()))
        .apply(Intent::FilterChanged(FilterSelector::SmallerThanLithuania))
        .apply(Intent::SearchChanged(String::new()));
    let expected = pipeline::derive(
        &raw,
        &Query {
            filter: FilterSelector::SmallerThanLithuania,
            ..Query::default()
        },
    );
    assert_eq!(state.derived(), expected.records.as_slice());
}

#[test]
fn payload_to_first_page() {
    let payload = r#"[
        {"name": "Lithuania", "region": "Europe", "area": 65300, "population": 2794700,
         "flags": {"png": "https://flagcdn.com/w320/lt.png"}, "languages": [{"name": "Lithuanian"}]},
        {"name": "Fiji", "region": "Oceania", "area": 18272, "population": 896444},
        {"name": "Aland Islands", "region": "Europe", "area": 1580}
    ]"#;
    let records = crate::loader::parse_payload(payload).unwrap();
    let state = loaded(records);
    let snap = state.snapshot();
    let order: Vec<&str> = snap.countries.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(order, vec!["Aland Islands", "Fiji", "Lithuania"]);
    assert_eq!(snap.total_pages, 1);
    assert!(!snap.loading);
}
