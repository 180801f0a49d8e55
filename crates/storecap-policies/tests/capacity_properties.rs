// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;
use proptest::test_runner::Config;
use storecap_model::{DayCapacity, PoolInput, Weekday};
use storecap_policies::{
    apply_pool_input, reconcile, reconcile_split, validate_capacity_settings, CapacityField,
    CapacityReconciliation,
};

#[test]
fn reconcile_reference_table() {
    let table = [
        ((0, 0), 100, true),
        ((50, 50), 0, true),
        ((60, 60), -20, false),
        ((100, 1), -1, false),
    ];
    for ((c2, c3), cap_pool1, is_valid) in table {
        assert_eq!(
            reconcile(c2, c3),
            CapacityReconciliation {
                cap_pool1,
                is_valid
            },
            "reconcile({c2}, {c3})"
        );
    }
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn reconcile_derives_first_pool_without_clamping(c2 in 0_i64..=100, c3 in 0_i64..=100) {
        let out = reconcile(c2, c3);
        prop_assert_eq!(out.cap_pool1, 100 - c2 - c3);
        prop_assert_eq!(out.is_valid, (0..=100).contains(&out.cap_pool1));
        prop_assert_eq!(reconcile_split(c2, c3).total(), 100);
    }

    #[test]
    fn typed_pools_always_land_in_range(c2 in -500_i64..500, c3 in -500_i64..500) {
        let day = apply_pool_input(DayCapacity::default(), CapacityField::CapPool2, &c2.to_string());
        let day = apply_pool_input(day, CapacityField::CapPool3, &c3.to_string());
        let c2 = day.cap_pool2.value().expect("pool2 set");
        let c3 = day.cap_pool3.value().expect("pool3 set");
        prop_assert!((0..=100).contains(&c2));
        prop_assert!((0..=100).contains(&c3));
        prop_assert_eq!(day.cap_pool1, PoolInput::Value(100 - c2 - c3));
        let errors = validate_capacity_settings(&[Weekday::Tuesday], &day);
        prop_assert_eq!(errors.is_empty(), c2 + c3 <= 100);
    }
}
