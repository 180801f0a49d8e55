// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;
use proptest::test_runner::Config;
use serde_json::{json, Value};
use storecap_model::{RawSpecialValues, SpecialFlag};
use storecap_policies::{format, format_by_name, is_complete, validate_raw_fields};

#[test]
fn unknown_flag_formats_to_empty_object() {
    assert_eq!(format_by_name("doesNotExist", &json!({})), json!({}));
}

#[test]
fn every_special_flag_has_an_empty_form_shape() {
    let expected = [
        (SpecialFlag::Gf2ag, json!({"tpl": [{"seqId": "1", "ventor": "Door"}]})),
        (SpecialFlag::ThirdParty, json!({"tplP": []})),
        (SpecialFlag::Wfc, json!({"wfcId": null})),
        (SpecialFlag::OAmanda, json!({"editLevel": null})),
        (SpecialFlag::PipSp, json!({"slow": null})),
        (SpecialFlag::Inter, json!({"intraConfig": null})),
    ];
    assert_eq!(expected.len(), SpecialFlag::ALL.len());
    for (flag, shape) in expected {
        assert_eq!(format_by_name(flag.as_str(), &json!({})), shape, "{flag}");
    }
}

#[test]
fn wfc_completeness_gate() {
    let cases = [
        (json!({}), false),
        (json!({"wfcId": "12345678"}), true),
        (json!({"wfcId": "123456789"}), false),
    ];
    for (raw, complete) in cases {
        let values: RawSpecialValues = serde_json::from_value(raw.clone()).expect("raw");
        assert_eq!(is_complete(&format(SpecialFlag::Wfc, &values)), complete, "{raw}");
        assert_eq!(validate_raw_fields(SpecialFlag::Wfc, &values).is_empty(), complete);
    }
}

fn raw_values() -> impl Strategy<Value = Value> {
    (
        proptest::option::of("[0-9a-z]{0,4}"),
        proptest::option::of(-5_i64..120),
        proptest::option::of(-5_i64..120),
        proptest::option::of(-5_i64..120),
        proptest::collection::vec("[a-z]{1,6}", 0..3),
    )
        .prop_map(|(text, a, b, c, list)| {
            json!({
                "seqId": text,
                "wfcId": text,
                "editLevel": text,
                "risk": a,
                "highrisk": b,
                "lowrisk": c,
                "hours": a,
                "perc": b,
                "items": c,
                "tplP": list,
            })
        })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn formatting_is_idempotent(index in 0_usize..6, raw in raw_values()) {
        let flag = SpecialFlag::ALL[index];
        let first = format_by_name(flag.as_str(), &raw);
        let second = format_by_name(flag.as_str(), &raw);
        prop_assert_eq!(first, second);
    }
}
