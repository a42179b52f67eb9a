use serde::{Deserialize, Serialize};
use berth_catalog::Train;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Departure,
    Duration,
    Fare,
}

/// Stable sort: trains with equal keys keep their relative order.
pub fn sort(mut trains: Vec<Train>, key: SortKey) -> Vec<Train> {
    match key {
        SortKey::Departure => trains.sort_by_key(|t| t.departure_minutes()),
        SortKey::Duration => trains.sort_by_key(duration_key),
        SortKey::Fare => trains.sort_by_key(|t| t.min_fare().unwrap_or(u32::MAX)),
    }
    trains
}

// Unparseable durations sort last.
fn duration_key(train: &Train) -> u32 {
    match train.duration_minutes() {
        Ok(minutes) => minutes,
        Err(e) => {
            tracing::warn!(train = %train.number, "{}", e);
            u32::MAX
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, numbers};

    #[test]
    fn test_sort_by_departure() {
        let sorted = sort(fixtures::trains(), SortKey::Departure);
        assert_eq!(numbers(&sorted), vec!["12908", "12259", "12909", "12301", "12953"]);
    }

    #[test]
    fn test_sort_by_duration_is_stable() {
        // 12259 and 12908 both take 17h 25m
        let sorted = sort(fixtures::trains(), SortKey::Duration);
        assert_eq!(numbers(&sorted), vec!["12301", "12953", "12259", "12908", "12909"]);

        let mut reversed = fixtures::trains();
        reversed.reverse();
        let sorted = sort(reversed, SortKey::Duration);
        assert_eq!(numbers(&sorted), vec!["12301", "12953", "12908", "12259", "12909"]);
    }

    #[test]
    fn test_sort_by_fare_non_decreasing() {
        let sorted = sort(fixtures::trains(), SortKey::Fare);
        assert_eq!(numbers(&sorted), vec!["12259", "12908", "12301", "12953", "12909"]);

        let fares: Vec<u32> = sorted.iter().filter_map(|t| t.min_fare()).collect();
        assert!(fares.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_bad_duration_sorts_last() {
        let mut trains = fixtures::trains();
        trains[0].duration = "unknown".to_string();
        let sorted = sort(trains, SortKey::Duration);
        assert_eq!(sorted.last().unwrap().number, "12301");
    }

    #[test]
    fn test_sort_key_serde() {
        let key: SortKey = serde_json::from_str("\"fare\"").unwrap();
        assert_eq!(key, SortKey::Fare);
    }
}
