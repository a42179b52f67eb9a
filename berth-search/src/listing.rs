use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use berth_catalog::Train;
use berth_core::ClassType;
use crate::filter::{filter, TimeWindow};
use crate::sort::{sort, SortKey};

/// Filter and sort selections on the train list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingState {
    #[serde(default)]
    pub class_types: BTreeSet<ClassType>,
    #[serde(default)]
    pub time_windows: Vec<TimeWindow>,
    #[serde(default)]
    pub sort_key: SortKey,
}

impl ListingState {
    pub fn toggle_class(&mut self, class_type: ClassType) {
        if !self.class_types.remove(&class_type) {
            self.class_types.insert(class_type);
        }
    }

    /// Add the window, or remove it if one with the same id is already set.
    pub fn toggle_window(&mut self, window: TimeWindow) {
        let before = self.time_windows.len();
        self.time_windows.retain(|w| w.id != window.id);
        if self.time_windows.len() == before {
            self.time_windows.push(window);
        }
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    /// Back to departure order with no filters.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_filtered(&self) -> bool {
        !self.class_types.is_empty() || !self.time_windows.is_empty() || self.sort_key != SortKey::Departure
    }

    pub fn apply(&self, trains: &[Train]) -> Vec<Train> {
        sort(filter(trains, &self.class_types, &self.time_windows), self.sort_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::standard_window;
    use crate::fixtures::{self, numbers};

    #[test]
    fn test_toggle_and_clear() {
        let mut state = ListingState::default();
        assert!(!state.is_filtered());

        state.toggle_class(ClassType::AcFirstClass);
        state.toggle_window(standard_window("afternoon").unwrap());
        state.set_sort(SortKey::Fare);
        assert!(state.is_filtered());

        let result = state.apply(&fixtures::trains());
        assert_eq!(numbers(&result), vec!["12301", "12953"]);

        state.toggle_class(ClassType::AcFirstClass);
        state.toggle_window(standard_window("afternoon").unwrap());
        assert!(state.class_types.is_empty());
        assert!(state.time_windows.is_empty());

        state.clear();
        assert_eq!(state, ListingState::default());
    }

    #[test]
    fn test_default_orders_by_departure() {
        let result = ListingState::default().apply(&fixtures::trains());
        assert_eq!(numbers(&result), vec!["12908", "12259", "12909", "12301", "12953"]);
    }
}
