// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;
use proptest::test_runner::Config;
use storecap_model::{parse_store_id, StoreId};

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn store_id_display_parse_roundtrip(id in 0_u64..10_000_000_000_u64) {
        let parsed = parse_store_id(&StoreId::new(id).to_string()).expect("store id parse");
        prop_assert_eq!(parsed.get(), id);
    }

    #[test]
    fn store_id_ignores_trailing_garbage(id in 0_u64..1_000_000_u64, tail in "[a-z ]{1,8}") {
        let parsed = parse_store_id(&format!(" {id}{tail}")).expect("store id prefix parse");
        prop_assert_eq!(parsed.get(), id);
    }

    #[test]
    fn store_id_rejects_input_without_leading_digit(raw in "[a-zA-Z\\-][a-zA-Z0-9]{0,8}") {
        prop_assert!(parse_store_id(&raw).is_err());
    }
}
