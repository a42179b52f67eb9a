use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use chrono::NaiveTime;
use berth_catalog::train::{hhmm, minutes_since_midnight};
use berth_catalog::Train;
use berth_core::ClassType;

/// Departure-time bucket. Half-open `[start, end)`; when `end < start` the
/// window wraps past midnight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    pub id: String,
    pub label: String,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(id: &str, label: &str, start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap_or_default(),
        }
    }

    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    pub fn contains_minutes(&self, minutes: u32) -> bool {
        let start = minutes_since_midnight(self.start);
        let end = minutes_since_midnight(self.end);
        if self.is_overnight() {
            minutes >= start || minutes < end
        } else {
            minutes >= start && minutes < end
        }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.contains_minutes(minutes_since_midnight(time))
    }
}

/// Morning, afternoon, evening and night buckets offered on the train list.
pub fn standard_windows() -> Vec<TimeWindow> {
    vec![
        TimeWindow::new("morning", "Morning (06:00 - 12:00)", (6, 0), (12, 0)),
        TimeWindow::new("afternoon", "Afternoon (12:00 - 18:00)", (12, 0), (18, 0)),
        TimeWindow::new("evening", "Evening (18:00 - 00:00)", (18, 0), (0, 0)),
        TimeWindow::new("night", "Night (00:00 - 06:00)", (0, 0), (6, 0)),
    ]
}

pub fn standard_window(id: &str) -> Option<TimeWindow> {
    standard_windows().into_iter().find(|w| w.id == id)
}

/// Keep trains offering at least one of `class_types` and departing inside at
/// least one of `windows`. Empty inputs disable that half of the filter.
/// Relative order is preserved.
pub fn filter(trains: &[Train], class_types: &BTreeSet<ClassType>, windows: &[TimeWindow]) -> Vec<Train> {
    trains
        .iter()
        .filter(|t| t.offers_any(class_types))
        .filter(|t| windows.is_empty() || windows.iter().any(|w| w.contains(t.departure_time)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, numbers};

    fn classes(types: &[ClassType]) -> BTreeSet<ClassType> {
        types.iter().copied().collect()
    }

    #[test]
    fn test_no_filters_is_identity() {
        let trains = fixtures::trains();
        assert_eq!(filter(&trains, &BTreeSet::new(), &[]), trains);
    }

    #[test]
    fn test_class_filter_keeps_matching_trains() {
        let trains = fixtures::trains();
        let wanted = classes(&[ClassType::AcFirstClass]);
        let result = filter(&trains, &wanted, &[]);
        assert_eq!(numbers(&result), vec!["12301", "12953"]);

        let wanted = classes(&[ClassType::ChairCar, ClassType::ExecutiveClass]);
        assert!(filter(&trains, &wanted, &[]).is_empty());

        for t in filter(&trains, &classes(&[ClassType::Sleeper]), &[]) {
            assert!(t.class(ClassType::Sleeper).is_some());
        }
    }

    #[test]
    fn test_time_windows() {
        let trains = fixtures::trains();
        let afternoon = standard_window("afternoon").unwrap();
        let morning = standard_window("morning").unwrap();

        let result = filter(&trains, &BTreeSet::new(), &[afternoon.clone()]);
        assert_eq!(numbers(&result), vec!["12301", "12909", "12953"]);

        let result = filter(&trains, &BTreeSet::new(), &[morning.clone()]);
        assert_eq!(numbers(&result), vec!["12259", "12908"]);

        let result = filter(&trains, &BTreeSet::new(), &[morning, afternoon]);
        assert_eq!(result, trains);

        let night = standard_window("night").unwrap();
        assert!(filter(&trains, &BTreeSet::new(), &[night]).is_empty());
    }

    #[test]
    fn test_window_boundaries_half_open() {
        let morning = standard_window("morning").unwrap();
        assert!(morning.contains_minutes(6 * 60));
        assert!(morning.contains_minutes(12 * 60 - 1));
        assert!(!morning.contains_minutes(12 * 60));
    }

    #[test]
    fn test_overnight_window_wraps() {
        let late = TimeWindow::new("late", "Late (22:00 - 06:00)", (22, 0), (6, 0));
        assert!(late.is_overnight());
        assert!(late.contains_minutes(23 * 60));
        assert!(late.contains_minutes(0));
        assert!(late.contains_minutes(5 * 60 + 59));
        assert!(!late.contains_minutes(6 * 60));
        assert!(!late.contains_minutes(12 * 60));

        let evening = standard_window("evening").unwrap();
        assert!(evening.is_overnight());
        assert!(evening.contains_minutes(18 * 60));
        assert!(evening.contains_minutes(23 * 60 + 59));
        assert!(!evening.contains_minutes(17 * 60 + 59));
        assert!(!evening.contains_minutes(0));
    }
}
