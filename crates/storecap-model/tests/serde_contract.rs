// SPDX-License-Identifier: Apache-2.0

use storecap_model::{
    FlagLevel, FlagValue, RawSpecialValues, RequestRecord, RequestStatus, SpecialFlag, StoreConfig,
};

const STORE_GET: &str = r#"{
  "div": [
    {"value": "d1", "viewValue": "Division 1"},
    {"value": "d2", "viewValue": "Division 2"}
  ],
  "flags": [
    {"flagName": "isGF2agEnabled", "flagViewName": "GF2ag", "flagLevel": "root", "flagValue": true},
    {"flagName": "isWfcFlagEnabled", "flagViewName": "WFC", "flagLevel": "sFeature", "flagValue": false},
    {"flagName": "isPickupEnabled", "flagViewName": "Pickup", "flagLevel": "root"}
  ],
  "textField": [
    {"textName": "displayDays", "textViewName": "Display days", "textLevel": "root", "textType": "number"}
  ]
}"#;

#[test]
fn store_get_document_decodes() {
    let config: StoreConfig = serde_json::from_str(STORE_GET).expect("storeGet decode");
    assert_eq!(config.div.len(), 2);
    assert_eq!(config.division("d2").map(|d| d.view_value.as_str()), Some("Division 2"));
    assert_eq!(config.flag("isGF2agEnabled").map(|f| f.flag_value), Some(FlagValue::On));
    assert_eq!(config.flag("isWfcFlagEnabled").map(|f| f.flag_value), Some(FlagValue::Off));
    assert_eq!(config.flag("isPickupEnabled").map(|f| f.flag_value), Some(FlagValue::Unset));
    assert_eq!(config.text_field("displayDays").map(|t| t.text_type.as_str()), Some("number"));
}

#[test]
fn missing_sections_default_to_empty() {
    let config: StoreConfig = serde_json::from_str("{}").expect("empty decode");
    assert!(config.div.is_empty());
    assert!(config.flags.is_empty());
    assert!(config.text_field.is_empty());
}

#[test]
fn flags_at_level_filters_by_case_insensitive_search() {
    let config: StoreConfig = serde_json::from_str(STORE_GET).expect("storeGet decode");
    let root: Vec<&str> = config
        .flags_at_level(&FlagLevel::Root, "")
        .into_iter()
        .map(|f| f.flag_name.as_str())
        .collect();
    assert_eq!(root, vec!["isGF2agEnabled", "isPickupEnabled"]);

    let searched = config.flags_at_level(&FlagLevel::Root, "PICK");
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].flag_name, "isPickupEnabled");

    assert_eq!(config.flags_at_level(&FlagLevel::SFeature, "wfc").len(), 1);
}

#[test]
fn special_flag_serializes_as_its_wire_name() {
    let json = serde_json::to_string(&SpecialFlag::PipSp).expect("encode");
    assert_eq!(json, "\"isPipSpFlagEnabled\"");
    let decoded: SpecialFlag = serde_json::from_str("\"is3PFlagEnabled\"").expect("decode");
    assert_eq!(decoded, SpecialFlag::ThirdParty);
    assert!(serde_json::from_str::<SpecialFlag>("\"isPickupEnabled\"").is_err());
}

#[test]
fn raw_special_values_accept_array_or_single_third_party_value() {
    let many: RawSpecialValues =
        serde_json::from_str(r#"{"tplP": ["a", "b"]}"#).expect("array decode");
    assert_eq!(many.tpl_p, vec!["a".to_string(), "b".to_string()]);
    let none: RawSpecialValues = serde_json::from_str(r#"{"tplP": null}"#).expect("null decode");
    assert!(none.tpl_p.is_empty());
}

#[test]
fn request_history_decodes_completed_rows() {
    let raw = r#"[{
      "requestId": "098765456722287654567890",
      "date": "2025-05-12",
      "storeId": 1,
      "hours": ["0200", "0100"],
      "currentTotalPieceCount": 21,
      "modifiedCapacity": 2,
      "scheduledHeadCount": 1,
      "ScheduledModifiedCapacity": 24,
      "virtualHeadCount": 4,
      "modifiedVirtualHeadhount": 1,
      "reason": ["Reason is nothing"],
      "other": null,
      "changedBy": "Yo YO",
      "changedOn": "2025-01-01 05:00:10.06",
      "completedOn": "2025-02-02 07:10:40.09",
      "status": "completed"
    }]"#;
    let rows: Vec<RequestRecord> = serde_json::from_str(raw).expect("history decode");
    assert_eq!(rows[0].status, RequestStatus::Completed);
    assert_eq!(rows[0].completed_on.as_deref(), Some("2025-02-02 07:10:40.09"));
    assert_eq!(rows[0].scheduled_modified_capacity, 24);
}
