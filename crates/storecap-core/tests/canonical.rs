// SPDX-License-Identifier: Apache-2.0

use serde_json::json;
use storecap_core::{canonical, sha256_hex};

#[test]
fn stable_json_bytes_are_key_order_deterministic() {
    let a = json!({"idList": ["1"], "divCode": null, "flags": [{"flagName": "x"}]});
    let b = json!({"flags": [{"flagName": "x"}], "divCode": null, "idList": ["1"]});
    let ba = canonical::stable_json_bytes(&a).expect("stable json a");
    let bb = canonical::stable_json_bytes(&b).expect("stable json b");
    assert_eq!(ba, bb);
}

#[test]
fn nested_objects_are_sorted_but_arrays_keep_order() {
    let value = json!({"slow": {"risk": 2, "highrisk": 9}, "tplP": ["b", "a"]});
    let bytes = canonical::stable_json_bytes(&value).expect("stable json");
    let text = String::from_utf8(bytes).expect("utf8");
    assert_eq!(text, r#"{"slow":{"highrisk":9,"risk":2},"tplP":["b","a"]}"#);
}

#[test]
fn sha256_matches_known_vector() {
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn stable_json_hash_repeatable_across_invocations() {
    let value = json!({"k2": 2, "k1": 1, "nested": {"b": 2, "a": 1}});
    let h1 = canonical::stable_json_hash_hex(&value).expect("hash1");
    let h2 = canonical::stable_json_hash_hex(&value).expect("hash2");
    assert_eq!(h1, h2);
    assert_eq!(h1.len(), 64);
}
