use chrono::NaiveDate;
use ndl_canonical::{
    fingerprint, AnyComponentSelector, CanonicalDocument, Canonicalizer, Document,
    FloatRoundNormalizer, IsoDateEncoder, LastComponentSelector, NoSortSorter, Policies,
    PolicyConfig, RegexSelector, Scalar, StrTodayDateNormalizer, TodayDateNormalizer,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeMap;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

fn canonicalize(canonicalizer: &Canonicalizer, value: Value) -> CanonicalDocument {
    canonicalizer.canonicalize_on(&Document::from(value), today())
}

fn sample() -> Value {
    json!({
        "id": 7,
        "tags": ["b", "a", "c"],
        "steps": [{"n": 3}, {"n": 1}, {"n": 2}],
        "nested": {"z": [[3, 2], [1]], "a": {"price": 10.456, "when": "2001-09-09"}},
        "mixed": [null, {"k": [2, 1]}, 3.5, "s", [], false]
    })
}

#[test]
fn canonicalization_is_idempotent() {
    let canonicalizer = Canonicalizer::new(
        Policies::new()
            .with_normalizer(FloatRoundNormalizer::new(1))
            .with_normalizer(StrTodayDateNormalizer::new())
            .with_sorter(NoSortSorter::new().with_selector(LastComponentSelector::new(["steps"]))),
    );
    let once = canonicalize(&canonicalizer, sample());
    let twice = canonicalizer.canonicalize_on(once.as_document(), today());
    assert_eq!(once, twice);
}

fn arb_scalar() -> impl Strategy<Value = Document> {
    prop_oneof![
        Just(Document::null()),
        any::<bool>().prop_map(Document::from),
        any::<i64>().prop_map(Document::from),
        (-1.0e6..1.0e6f64).prop_map(Document::from),
        "[a-z0-9]{0,6}".prop_map(Document::from),
    ]
}

fn arb_document() -> impl Strategy<Value = Document> {
    arb_scalar().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Document::Sequence),
            prop::collection::btree_map("[a-c]{1,2}", inner, 0..5).prop_map(Document::Mapping),
        ]
    })
}

fn rounding_policy() -> Canonicalizer {
    Canonicalizer::new(
        Policies::new()
            .with_normalizer(FloatRoundNormalizer::new(2))
            .with_sorter(NoSortSorter::new().with_selector(LastComponentSelector::new(["a"]))),
    )
}

proptest! {
    #[test]
    fn any_document_canonicalizes_idempotently(doc in arb_document()) {
        for canonicalizer in [Canonicalizer::default(), rounding_policy()] {
            let once = canonicalizer.canonicalize_on(&doc, today());
            let twice = canonicalizer.canonicalize_on(once.as_document(), today());
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn shuffled_sequences_canonicalize_alike(
        (elements, shuffled) in prop::collection::vec(arb_document(), 0..8)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let canonicalizer = Canonicalizer::default();
        prop_assert_eq!(
            canonicalizer.canonicalize_on(&Document::Sequence(elements), today()),
            canonicalizer.canonicalize_on(&Document::Sequence(shuffled), today())
        );
    }
}

#[test]
fn key_insertion_order_does_not_matter() {
    let canonicalizer = Canonicalizer::default();
    let forward: BTreeMap<String, Document> = [("a", 1i64), ("b", 2), ("c", 3)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Document::from(v)))
        .collect();
    let backward = Document::mapping(vec![
        ("c", Document::from(3i64)),
        ("b", Document::from(2i64)),
        ("a", Document::from(1i64)),
    ]);
    assert_eq!(
        canonicalizer.canonicalize_on(&Document::Mapping(forward), today()),
        canonicalizer.canonicalize_on(&backward, today())
    );
    assert_eq!(
        canonicalize(&canonicalizer, json!({"b": 2, "a": 1})),
        canonicalize(&canonicalizer, json!({"a": 1, "b": 2}))
    );
}

#[test]
fn sequence_order_does_not_matter_by_default() {
    let canonicalizer = Canonicalizer::default();
    let pairs = [
        (json!(1), json!("1")),
        (json!({"a": 1}), json!([1])),
        (json!([2, 1]), json!([1, 2, 0])),
        (json!(null), json!(false)),
        (json!(1.5), json!(1)),
    ];
    for (a, b) in pairs {
        assert_eq!(
            canonicalize(&canonicalizer, json!([a.clone(), b.clone()])),
            canonicalize(&canonicalizer, json!([b, a]))
        );
    }
}

#[test]
fn no_sort_preserves_order_at_its_path_only() {
    let canonicalizer = Canonicalizer::new(
        Policies::new()
            .with_sorter(NoSortSorter::new().with_selector(LastComponentSelector::new(["steps"]))),
    );
    let result = canonicalize(&canonicalizer, sample()).into_document();
    assert_eq!(
        result.get("steps").unwrap(),
        &Document::from(json!([{"n": 3}, {"n": 1}, {"n": 2}]))
    );
    assert_eq!(result.get("tags").unwrap(), &Document::from(json!(["a", "b", "c"])));
}

#[test]
fn no_sort_on_whole_subtree() {
    let canonicalizer = Canonicalizer::new(
        Policies::new()
            .with_sorter(NoSortSorter::new().with_selector(AnyComponentSelector::new(["nested"]))),
    );
    let result = canonicalize(&canonicalizer, sample()).into_document();
    assert_eq!(
        result.get("nested").unwrap().get("z").unwrap(),
        &Document::from(json!([[3, 2], [1]]))
    );
    // Elements of "mixed" are still sorted, including the inner list.
    assert_eq!(
        result.get("mixed").unwrap(),
        &Document::from(json!([null, false, 3.5, "s", [], {"k": [1, 2]}]))
    );
}

#[test]
fn regex_selects_by_joined_path() {
    let selector = RegexSelector::new("^nested/a/").unwrap();
    let canonicalizer = Canonicalizer::new(
        Policies::new().with_normalizer(FloatRoundNormalizer::new(0).with_selector(selector)),
    );
    let result = canonicalize(&canonicalizer, sample()).into_document();
    let price = result.get("nested").unwrap().get("a").unwrap().get("price").unwrap();
    assert_eq!(price, &Document::from(10.0));
}

#[test]
fn declining_normalizer_falls_through_to_next() {
    let canonicalizer = Canonicalizer::new(
        Policies::new()
            .with_normalizer(TodayDateNormalizer::new())
            .with_normalizer(FloatRoundNormalizer::new(1)),
    );
    let result = canonicalize(&canonicalizer, json!({"x": 2.04})).into_document();
    assert_eq!(result.get("x").unwrap(), &Document::from(2.0));
}

#[test]
fn date_leaves_collapse_to_the_snapshot() {
    let canonicalizer =
        Canonicalizer::new(Policies::new().with_normalizer(TodayDateNormalizer::new()));
    let left = Document::mapping([
        ("date", Document::from(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap())),
        ("float", Document::from(1.0)),
    ]);
    let right = Document::mapping([
        ("date", Document::from(NaiveDate::from_ymd_opt(1999, 2, 2).unwrap())),
        ("float", Document::from(1.0)),
    ]);
    let left = canonicalizer.canonicalize_on(&left, today());
    assert_eq!(left, canonicalizer.canonicalize_on(&right, today()));
    assert_eq!(
        left.as_document().get("date").unwrap(),
        &Document::Scalar(Scalar::Date(today()))
    );
}

#[test]
fn config_policies_match_hand_built_ones() {
    let config = PolicyConfig::from_json(
        r#"{
            "normalizers": [{"kind": "float_round", "places": 1}, {"kind": "str_today_date"}],
            "sorters": [{
                "kind": "no_sort",
                "selectors": [{"kind": "last_component", "names": ["steps"]}]
            }]
        }"#,
    )
    .unwrap();
    let from_config = Canonicalizer::new(config.build().unwrap());
    let by_hand = Canonicalizer::new(
        Policies::new()
            .with_normalizer(FloatRoundNormalizer::new(1))
            .with_normalizer(StrTodayDateNormalizer::new())
            .with_sorter(NoSortSorter::new().with_selector(LastComponentSelector::new(["steps"]))),
    );
    assert_eq!(canonicalize(&from_config, sample()), canonicalize(&by_hand, sample()));
}

#[test]
fn equal_canonical_forms_share_a_fingerprint() {
    let canonicalizer = Canonicalizer::default();
    let a = canonicalize(&canonicalizer, json!({"b": [2, 1], "a": "x"}));
    let b = canonicalize(&canonicalizer, json!({"a": "x", "b": [1, 2]}));
    let c = canonicalize(&canonicalizer, json!({"a": "y", "b": [1, 2]}));

    let fa = fingerprint(&a, None).unwrap();
    let fb = fingerprint(&b, None).unwrap();
    let fc = fingerprint(&c, None).unwrap();
    assert_eq!(fa, fb);
    assert_ne!(fa.digest, fc.digest);
    assert_eq!(fa.bytes, br#"{"a":"x","b":[1,2]}"#.to_vec());

    let decoded = base64_decode(&fa.digest.b64);
    assert_eq!(hex::encode(decoded), sha256_hex(&fa.bytes));
}

#[test]
fn fingerprint_needs_an_encoder_for_dates() {
    let canonicalizer = Canonicalizer::default();
    let doc = Document::mapping([("d", Document::from(today()))]);
    let canonical = canonicalizer.canonicalize_on(&doc, today());
    assert!(fingerprint(&canonical, None).is_err());
    let fp = fingerprint(&canonical, Some(&IsoDateEncoder)).unwrap();
    assert_eq!(fp.bytes, br#"{"d":"2025-03-14"}"#.to_vec());
}

fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest as _, Sha256};
    hex::encode(Sha256::digest(bytes))
}

fn base64_decode(b64: &str) -> Vec<u8> {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    URL_SAFE_NO_PAD.decode(b64).unwrap()
}
