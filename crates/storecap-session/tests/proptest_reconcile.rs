// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;
use proptest::test_runner::Config;
use storecap_model::FlagValue;
use storecap_session::{changed_flags, has_changes, FlagState};

fn flag_value() -> impl Strategy<Value = FlagValue> {
    prop_oneof![
        Just(FlagValue::On),
        Just(FlagValue::Off),
        Just(FlagValue::Unset)
    ]
}

fn snapshots() -> impl Strategy<Value = (FlagState, FlagState)> {
    proptest::collection::vec(("[a-z]{1,6}", flag_value(), flag_value()), 0..12).prop_map(
        |entries| {
            let mut initial = FlagState::new();
            let mut current = FlagState::new();
            for (name, before, after) in entries {
                initial.insert(name.clone(), before);
                current.insert(name, after);
            }
            (initial, current)
        },
    )
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn resnapshot_clears_the_diff((initial, current) in snapshots()) {
        let frozen_initial = initial.clone();
        let frozen_current = current.clone();
        let changed = changed_flags(&initial, &current);
        prop_assert_eq!(&initial, &frozen_initial);
        prop_assert_eq!(&current, &frozen_current);
        for name in &changed {
            prop_assert_ne!(initial.get(name), current.get(name));
        }

        let initial = current.clone();
        prop_assert!(changed_flags(&initial, &current).is_empty());
        prop_assert!(!has_changes(&initial, &current, false, false));
    }
}
