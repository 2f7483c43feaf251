use common::filter_request::{FilterClause, FilterGroup, FilterRequest};
use common::hash_state::{CategoryHashState, CategoryView, SortOption, SortOrder, SortRequest};
use proptest::prelude::*;
use proptest::test_runner::Config;
use url_state::hash_codec::{build_hash, deserialize_hash_state, serialize_hash_state};
use url_state::lz_string::compress_to_base64;


fn sample_state() -> CategoryHashState {
    CategoryHashState {
        filters: Some(FilterRequest {
            filters: vec![
                FilterClause::term("brand", ["Nudger", "Open"]),
                FilterClause::range("price.minPrice.price", Some(10.0), Some(100.0)),
            ],
            filter_groups: vec![FilterGroup::should(vec![FilterClause::range("price.min", None, Some(500.0))])],
        }),
        search: Some("oled 55".to_string()),
        sort: Some(SortRequest {
            sorts: vec![SortOption { field: "price.minPrice.price".to_string(), order: SortOrder::Asc }],
        }),
        page_number: Some(3),
        view: Some(CategoryView::Table),
        active_subsets: vec!["price_lower_500".to_string()],
        impact_expanded: Some(true),
        technical_expanded: Some(false),
    }
}

#[test]
fn full_state_round_trips() {
    let state = sample_state();
    let token = serialize_hash_state(&state);
    assert!(!token.is_empty());
    assert_eq!(deserialize_hash_state(Some(&token)), Some(state));
}

#[test]
fn empty_state_serializes_to_empty_string() {
    assert_eq!(serialize_hash_state(&CategoryHashState::default()), "");
    assert_eq!(build_hash(&CategoryHashState::default()), "");
}

#[test]
fn state_with_only_empty_containers_is_no_state() {
    let state = CategoryHashState {
        filters: Some(FilterRequest::default()),
        sort: Some(SortRequest::default()),
        active_subsets: Vec::new(),
        ..Default::default()
    };
    assert_eq!(serialize_hash_state(&state), "");
}

#[test]
fn missing_blank_and_malformed_tokens_decode_to_none() {
    assert_eq!(deserialize_hash_state(None), None);
    assert_eq!(deserialize_hash_state(Some("")), None);
    assert_eq!(deserialize_hash_state(Some("   ")), None);
    assert_eq!(deserialize_hash_state(Some("#")), None);
    assert_eq!(deserialize_hash_state(Some("invalid-base64")), None);
}

#[test]
fn valid_compression_of_non_state_json_decodes_to_none() {
    let not_json = compress_to_base64("definitely not json");
    assert_eq!(deserialize_hash_state(Some(&not_json)), None);
    let wrong_shape = compress_to_base64(r#"[1,2,3]"#);
    assert_eq!(deserialize_hash_state(Some(&wrong_shape)), None);
    let wrong_view = compress_to_base64(r#"{"view":"mosaic"}"#);
    assert_eq!(deserialize_hash_state(Some(&wrong_view)), None);
}

#[test]
fn build_hash_prefixes_token() {
    let state = CategoryHashState { view: Some(CategoryView::List), ..Default::default() };
    let hash = build_hash(&state);
    assert_eq!(hash, format!("#{}", serialize_hash_state(&state)));
    assert_eq!(deserialize_hash_state(Some(&hash)), Some(state));
}

#[test]
fn percent_encoded_token_round_trips() {
    let state = sample_state();
    let token = serialize_hash_state(&state);
    let encoded = urlencoding_escape(&token);
    assert_eq!(deserialize_hash_state(Some(&encoded)), Some(state));
}

#[test]
fn tokens_written_by_the_browser_decode() {
    // JSON.stringify output, field order as the storefront writes it
    let token = compress_to_base64(
        r#"{"filters":{"filters":[{"field":"price.min","operator":"range","max":500}]},"pageNumber":2,"view":"cards","activeSubsets":["small_screens"]}"#,
    );
    let state = deserialize_hash_state(Some(&token)).unwrap();
    assert_eq!(state.page_number, Some(2));
    assert_eq!(state.view, Some(CategoryView::Cards));
    assert_eq!(state.active_subsets, vec!["small_screens".to_string()]);
    assert_eq!(
        state.filters.unwrap().filters,
        vec![FilterClause::range("price.min", None, Some(500.0))]
    );
}

#[test]
fn zero_page_number_is_dropped() {
    let token = compress_to_base64(r#"{"pageNumber":0,"search":"tv"}"#);
    let state = deserialize_hash_state(Some(&token)).unwrap();
    assert_eq!(state.page_number, None);
    assert_eq!(state.search.as_deref(), Some("tv"));
}

#[test]
fn negative_or_fractional_page_number_is_dropped_alone() {
    for raw in [r#"{"pageNumber":-1,"view":"list"}"#, r#"{"pageNumber":2.5,"view":"list"}"#] {
        let token = compress_to_base64(raw);
        let expected = CategoryHashState { view: Some(CategoryView::List), ..Default::default() };
        assert_eq!(deserialize_hash_state(Some(&token)), Some(expected), "{raw}");
    }
}

fn urlencoding_escape(token: &str) -> String {
    token.replace('+', "%2B").replace('/', "%2F").replace('=', "%3D")
}


fn clause_strategy() -> impl Strategy<Value = FilterClause> {
    prop_oneof![
        ("[a-z]{1,8}(\\.[a-z]{1,6})?", prop::collection::vec("[A-Za-z0-9 éè]{0,6}", 0..4))
            .prop_map(|(field, terms)| FilterClause::term(field, terms)),
        (
            "[a-z]{1,8}(\\.[a-z]{1,6})?",
            prop::option::of(-10_000_i32..10_000),
            prop::option::of(-10_000_i32..10_000)
        )
            .prop_map(|(field, min, max)| {
                FilterClause::range(field, min.map(|v| v as f64 / 4.0), max.map(|v| v as f64 / 4.0))
            }),
    ]
}

fn state_strategy() -> impl Strategy<Value = CategoryHashState> {
    (
        prop::collection::vec(clause_strategy(), 0..4),
        prop::collection::vec(
            (prop::collection::vec(clause_strategy(), 0..3), prop::collection::vec(clause_strategy(), 0..3))
                .prop_map(|(must, should)| FilterGroup { must, should }),
            0..3,
        ),
        prop::option::of("[a-z0-9 ]{0,12}"),
        prop::option::of(1_u32..500),
        prop::option::of(prop_oneof![Just(CategoryView::Cards), Just(CategoryView::List), Just(CategoryView::Table)]),
        prop::collection::vec("[a-z_]{1,12}", 0..3),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(filters, filter_groups, search, page_number, view, active_subsets, impact, technical)| {
            let filters = FilterRequest { filters, filter_groups };
            CategoryHashState {
                filters: if filters.is_empty() { None } else { Some(filters) },
                search,
                sort: None,
                page_number,
                view,
                active_subsets,
                impact_expanded: impact,
                technical_expanded: technical,
            }
        })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn serialize_deserialize_roundtrip(state in state_strategy()) {
        let token = serialize_hash_state(&state);
        let is_default = state == CategoryHashState::default();
        prop_assert_eq!(token.is_empty(), is_default);
        prop_assert_eq!(build_hash(&state).starts_with('#'), !token.is_empty());
        if !is_default {
            prop_assert_eq!(deserialize_hash_state(Some(&token)), Some(state));
        }
    }
}
