//! Query codec behavior as seen by the listing page.
//!
//! These tests drive the public API the way the filter sidebar and sort
//! dropdown do: parse the current URL, transform, navigate to the result.

use bijema_commerce::prelude::*;
use bijema_commerce::query::{CATEGORY, PRICE_MAX, PRICE_MIN, SORT};
use serde_json::json;

#[test]
fn round_trip_preserves_state() {
    let queries = [
        "category=Kitchen&category=Bath&price_min=100&sort=price_desc",
        "category=Home+Decor&price_max=2500",
        "sort=newest&page=2",
    ];
    for query in queries {
        let state = query::parse(query);
        let again = query::parse(&query::stringify(&state));
        assert!(state.equivalent(&again), "round trip changed {query}");
    }
}

#[test]
fn round_trip_built_states() {
    let category_lists: [&[&str]; 3] = [
        &["Kitchen"],
        &["Home & Garden", "Bath"],
        &["Vyakula/Chakula", "50% off", "a=b+c"],
    ];
    for categories in category_lists {
        let mut state = FilterState::new();
        state.set("page", "2");
        state.set(CATEGORY, categories.to_vec());
        state.set("utm_source", "news letter?");
        state.set(PRICE_MIN, "100");
        state.set("q", "sufuria ya chai");
        state.set(SORT, "price_asc");

        let encoded = query::stringify(&state);
        let again = query::parse(&encoded);
        assert!(state.equivalent(&again), "round trip changed {encoded}");
        assert_eq!(again.categories().len(), categories.len());
        assert!(again.contains("utm_source", "news letter?"));
    }
}

#[test]
fn empty_input_yields_empty_state() {
    assert!(query::parse("").is_empty());
    assert!(query::parse("?").is_empty());
    assert!(FilterState::parse_optional(None).is_empty());
    assert_eq!(query::stringify(&FilterState::new()), "");
}

#[test]
fn repeated_keys_become_lists() {
    let state = query::parse("?category=Kitchen&category=Bath&sort=price_asc");
    assert_eq!(
        state.get(CATEGORY),
        Some(&FilterValue::Multi(vec!["Kitchen".into(), "Bath".into()]))
    );
    assert_eq!(state.get(SORT), Some(&FilterValue::Scalar("price_asc".into())));
    assert_eq!(state.sort(), SortKey::PriceAsc);
}

#[test]
fn toggle_adds_then_removes() {
    let empty = FilterState::new();
    let added = query::toggle_filter(&empty, CATEGORY, "Kitchen");
    assert_eq!(added, "category=Kitchen");

    let state = query::parse("category=Kitchen&category=Bath");
    assert_eq!(query::toggle_filter(&state, CATEGORY, "Bath"), "category=Kitchen");

    let state = query::parse("category=Kitchen&sort=newest");
    assert_eq!(
        query::toggle_filter(&state, CATEGORY, "Bath"),
        "category=Kitchen&category=Bath&sort=newest"
    );
}

#[test]
fn toggle_last_value_drops_key() {
    let state = query::parse("category=Kitchen&sort=newest");
    assert_eq!(query::toggle_filter(&state, CATEGORY, "Kitchen"), "sort=newest");
}

#[test]
fn toggle_twice_restores_state() {
    let state = query::parse("category=Kitchen&category=Bath&price_min=100");
    let once = state.toggled(CATEGORY, "Garden");
    let twice = once.toggled(CATEGORY, "Garden");
    assert!(twice.equivalent(&state));
}

#[test]
fn remove_single_value_and_whole_key() {
    let state = query::parse("category=Kitchen&category=Bath&price_min=100");
    assert_eq!(
        query::remove_filter(&state, CATEGORY, Some("Kitchen")),
        "category=Bath&price_min=100"
    );
    assert_eq!(query::remove_filter(&state, CATEGORY, None), "price_min=100");
    assert_eq!(query::remove_filter(&state, PRICE_MIN, Some("100")), "category=Kitchen&category=Bath");
}

#[test]
fn remove_is_idempotent() {
    let state = query::parse("category=Kitchen&sort=newest");
    let once = state.without(CATEGORY, Some("Kitchen"));
    let twice = once.without(CATEGORY, Some("Kitchen"));
    assert_eq!(once, twice);
    assert_eq!(query::remove_filter(&state, PRICE_MAX, None), "category=Kitchen&sort=newest");
}

#[test]
fn update_merges_and_deletes() {
    let state = query::parse("category=Kitchen&price_min=100&price_max=900");
    let patch = FilterPatch::new()
        .set(PRICE_MIN, "200")
        .unset(PRICE_MAX)
        .set(SORT, "price_asc");
    assert_eq!(
        query::update_query(&state, &patch),
        "category=Kitchen&price_min=200&sort=price_asc"
    );
}

#[test]
fn clear_keeps_unrelated_keys() {
    let state = query::parse("category=Kitchen&price_min=100&price_max=900&sort=newest&page=3");
    assert_eq!(query::clear_all_filters(&state), "page=3");
    assert_eq!(query::clear_all_filters(&FilterState::new()), "");
}

#[test]
fn transforms_leave_input_untouched() {
    let state = query::parse("category=Kitchen");
    let snapshot = state.clone();
    let _ = query::toggle_filter(&state, CATEGORY, "Bath");
    let _ = query::remove_filter(&state, CATEGORY, None);
    let _ = query::clear_all_filters(&state);
    assert_eq!(state, snapshot);
}

#[test]
fn special_characters_are_encoded() {
    let state = FilterState::new().toggled(CATEGORY, "Bath & Body");
    let encoded = query::stringify(&state);
    assert_eq!(encoded, "category=Bath+%26+Body");
    assert!(query::parse(&encoded).contains(CATEGORY, "Bath & Body"));
}

#[test]
fn state_from_json_object() {
    let state = FilterState::from_json(&json!({
        "category": ["Kitchen", "Bath"],
        "price_min": 100,
        "sort": null
    }))
    .unwrap();
    assert_eq!(query::stringify(&state), "category=Kitchen&category=Bath&price_min=100");

    assert!(FilterState::from_json(&json!("category=Kitchen")).is_err());
    assert!(FilterState::from_json_or_empty(&json!(42)).is_empty());
}

#[test]
fn listing_follows_the_query() {
    let kes = |major: i64| Money::new(major * 100, Currency::KES);
    let products = vec![
        Product::new("p1", "Kettle", "Kitchen", kes(2500)),
        Product::new("p2", "Towel", "Bath", kes(450)),
        Product::new("p3", "Sufuria", "Kitchen", kes(1200)),
        Product::new("p4", "Rug", "Living", kes(6000)),
    ];

    let filters = query::parse("category=Kitchen&category=Bath&price_max=2000&sort=price_desc");
    let listing = Listing::apply(&products, &filters, Currency::KES);
    let names: Vec<&str> = listing.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Sufuria", "Towel"]);
    assert_eq!(listing.summary(), "Showing 2 of 4 products");
}
