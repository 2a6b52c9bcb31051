use std::collections::BTreeMap;

use bulksend_model::{CsvRow, ParamCounts, ParamKind};
use bulksend_transform::{TransformOptions, is_valid_phone_number, transform_recipients};
use proptest::prelude::*;

const COLUMNS: &[&str] = &["Mobile", "Name", "A", "B", "C", "D"];

fn rows() -> impl Strategy<Value = Vec<CsvRow>> {
    let cell = prop_oneof![Just(String::new()), "[ +0-9a-z-]{0,16}"];
    prop::collection::vec(
        prop::collection::btree_map(prop::sample::select(COLUMNS.to_vec()), cell, 0..4)
            .prop_map(|cells| {
                cells
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect::<CsvRow>()
            }),
        0..8,
    )
}

fn mappings(counts: ParamCounts) -> impl Strategy<Value = BTreeMap<String, String>> {
    let keys: Vec<String> = std::iter::once("phone".to_string())
        .chain(counts.slots().map(|(kind, index)| kind.slot_key(index)))
        .collect();
    prop::collection::vec(prop::option::of(prop::sample::select(COLUMNS.to_vec())), keys.len())
        .prop_map(move |columns| {
            keys.iter()
                .zip(columns)
                .filter_map(|(key, column)| column.map(|c| (key.clone(), c.to_string())))
                .collect()
        })
}

fn case() -> impl Strategy<Value = (ParamCounts, BTreeMap<String, String>, Vec<CsvRow>)> {
    (0usize..3, 0usize..5, 0usize..3)
        .prop_map(|(h, b, k)| ParamCounts::new(h, b, k))
        .prop_flat_map(|counts| (Just(counts), mappings(counts), rows()))
}

proptest! {
    #[test]
    fn parameter_lists_match_slot_counts(
        (counts, mappings, rows) in case(),
        skip in any::<bool>(),
    ) {
        let options = TransformOptions::default().with_skip_invalid_rows(skip);
        let result = transform_recipients(&rows, &mappings, counts, &options);

        for recipient in &result.recipients {
            for kind in ParamKind::ALL {
                prop_assert_eq!(recipient.template_params.get(kind).len(), counts.count(kind));
            }
        }
    }

    #[test]
    fn counts_add_up((counts, mappings, rows) in case(), skip in any::<bool>()) {
        let options = TransformOptions::default().with_skip_invalid_rows(skip);
        let result = transform_recipients(&rows, &mappings, counts, &options);

        prop_assert_eq!(result.valid_count, result.recipients.len());
        prop_assert_eq!(result.valid_count + result.invalid_count, rows.len());
        if skip {
            prop_assert_eq!(result.invalid_count, result.rows_with_errors());
        } else {
            prop_assert_eq!(result.invalid_count, 0);
        }
        prop_assert!(result.errors.iter().all(|e| e.row >= 1 && e.row <= rows.len()));
    }

    #[test]
    fn e164_numbers_are_valid(digits in "[0-9]{8,15}") {
        let number = format!("+{digits}");
        prop_assert!(is_valid_phone_number(&number));
    }
}
