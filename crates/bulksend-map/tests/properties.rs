use std::collections::BTreeSet;

use bulksend_map::{MatchOptions, match_fields};
use bulksend_model::{FieldDefinition, ParamCounts};
use proptest::prelude::*;

const HEADER_POOL: &[&str] = &[
    "Phone",
    "phone_number",
    "Mobile",
    "Name",
    "Full Name",
    "Email",
    "E-mail",
    "contact",
    "Order Number",
    "Tracking URL",
    "City",
    "param1",
    "Prenom",
];

fn unique_headers() -> impl Strategy<Value = Vec<String>> {
    (
        prop::sample::subsequence(HEADER_POOL.to_vec(), 0..=HEADER_POOL.len()),
        prop::collection::vec("[A-Za-z_ ]{1,12}", 0..5),
    )
        .prop_map(|(known, random)| {
            let mut seen = BTreeSet::new();
            known
                .into_iter()
                .map(String::from)
                .chain(random)
                .filter(|h| seen.insert(h.clone()))
                .collect()
        })
}

fn fields() -> impl Strategy<Value = Vec<FieldDefinition>> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(phone_required, name, custom)| {
        let mut fields = vec![
            FieldDefinition {
                key: "phone".to_string(),
                label: "Phone".to_string(),
                required: phone_required,
            },
            FieldDefinition::new("email", "Email"),
        ];
        if name {
            fields.push(FieldDefinition::new("fullname", "Full Name"));
        }
        if custom {
            fields.push(FieldDefinition::new("custom.city", "City"));
        }
        fields
    })
}

fn param_counts() -> impl Strategy<Value = ParamCounts> {
    (0usize..3, 0usize..4, 0usize..3).prop_map(|(h, b, bt)| ParamCounts::new(h, b, bt))
}

fn options() -> impl Strategy<Value = MatchOptions> {
    (any::<bool>(), any::<bool>(), 0.5f64..0.95).prop_map(|(prioritize, fuzzy, min)| {
        MatchOptions::default()
            .with_prioritize_required(prioritize)
            .with_fuzzy_matching(fuzzy)
            .with_min_confidence(min)
    })
}

proptest! {
    #[test]
    fn matching_is_idempotent(
        headers in unique_headers(),
        fields in fields(),
        counts in param_counts(),
        options in options(),
    ) {
        let first = match_fields(&headers, &fields, counts, &options);
        let second = match_fields(&headers, &fields, counts, &options);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn columns_are_never_assigned_twice(
        headers in unique_headers(),
        fields in fields(),
        counts in param_counts(),
        options in options(),
    ) {
        let result = match_fields(&headers, &fields, counts, &options);
        let mut used = BTreeSet::new();
        for column in result.mappings.values() {
            prop_assert!(used.insert(column.clone()), "column {} assigned twice", column);
            prop_assert!(headers.contains(column));
        }
    }

    #[test]
    fn every_mapping_has_a_confidence(
        headers in unique_headers(),
        fields in fields(),
        counts in param_counts(),
        options in options(),
    ) {
        let result = match_fields(&headers, &fields, counts, &options);
        let mapped: BTreeSet<&String> = result.mappings.keys().collect();
        let scored: BTreeSet<&String> = result.confidence.keys().collect();
        prop_assert_eq!(mapped, scored);
        for score in result.confidence.values() {
            prop_assert!((0.0..=1.0).contains(score));
        }
        for suggestion in &result.suggestions {
            prop_assert!(suggestion.score > 0.0);
            prop_assert!(suggestion.score < options.min_confidence_score);
        }
    }

    #[test]
    fn slots_are_filled_while_columns_remain(
        headers in unique_headers(),
        counts in param_counts(),
    ) {
        let result = match_fields(&headers, &[], counts, &MatchOptions::default());
        prop_assert_eq!(result.mappings.len(), counts.total().min(headers.len()));
    }
}
