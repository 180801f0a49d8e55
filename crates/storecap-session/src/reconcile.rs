// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use storecap_model::FlagValue;

/// Flag name to tri-state value.
pub type FlagState = BTreeMap<String, FlagValue>;

/// Names present in both snapshots whose values differ, in name order.
/// `Unset` and `Off` count as different values.
#[must_use]
pub fn changed_flags(initial: &FlagState, current: &FlagState) -> Vec<String> {
    current
        .iter()
        .filter(|(name, value)| initial.get(*name).is_some_and(|before| before != *value))
        .map(|(name, _)| name.clone())
        .collect()
}

#[must_use]
pub fn has_changes(
    initial: &FlagState,
    current: &FlagState,
    selection_changed: bool,
    special_payload_pending: bool,
) -> bool {
    selection_changed || special_payload_pending || !changed_flags(initial, current).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(entries: &[(&str, FlagValue)]) -> FlagState {
        entries
            .iter()
            .map(|(name, value)| ((*name).to_string(), *value))
            .collect()
    }

    #[test]
    fn unset_to_off_is_a_change() {
        let initial = state(&[("a", FlagValue::Unset), ("b", FlagValue::On)]);
        let current = state(&[("a", FlagValue::Off), ("b", FlagValue::On)]);
        assert_eq!(changed_flags(&initial, &current), vec!["a".to_string()]);
    }

    #[test]
    fn keys_missing_from_one_side_are_ignored() {
        let initial = state(&[("a", FlagValue::On)]);
        let current = state(&[("a", FlagValue::On), ("new", FlagValue::Off)]);
        assert!(changed_flags(&initial, &current).is_empty());
        assert!(!has_changes(&initial, &current, false, false));
        assert!(has_changes(&initial, &current, true, false));
        assert!(has_changes(&initial, &current, false, true));
    }
}
