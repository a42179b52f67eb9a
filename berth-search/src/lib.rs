pub mod query;
pub mod filter;
pub mod sort;
pub mod listing;
pub mod stations;

pub use query::{query, TrainQuery};
pub use filter::{filter, standard_windows, TimeWindow};
pub use sort::{sort, SortKey};
pub use listing::ListingState;
pub use stations::search_stations;

use berth_catalog::CatalogError;
use berth_core::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid search criteria")]
    InvalidCriteria(Vec<ValidationError>),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
pub(crate) mod fixtures {
    use berth_catalog::{Train, TrainClass};
    use berth_core::{ClassType, Station};
    use chrono::NaiveTime;

    pub fn delhi() -> Station {
        Station::new("1", "New Delhi", "NDLS")
    }

    pub fn mumbai() -> Station {
        Station::new("2", "Mumbai Central", "MMCT")
    }

    pub fn train(id: &str, number: &str, dep: (u32, u32), duration: &str, classes: &[(ClassType, u32, u32)]) -> Train {
        Train {
            id: id.to_string(),
            name: format!("Express {}", number),
            number: number.to_string(),
            departure_station: delhi(),
            arrival_station: mumbai(),
            departure_time: NaiveTime::from_hms_opt(dep.0, dep.1, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            duration: duration.to_string(),
            classes: classes
                .iter()
                .map(|(t, fare, seats)| TrainClass::new(*t, *fare, *seats).unwrap())
                .collect(),
        }
    }

    /// The five demo trains in catalog order.
    pub fn trains() -> Vec<Train> {
        use ClassType::*;
        vec![
            train("1", "12301", (16, 25), "15h 50m", &[(Sleeper, 745, 126), (AcThreeTier, 1965, 64), (AcTwoTier, 2860, 28), (AcFirstClass, 4850, 3)]),
            train("2", "12259", (11, 0), "17h 25m", &[(Sleeper, 720, 0), (AcThreeTier, 1890, 12), (AcTwoTier, 2750, 0)]),
            train("3", "12909", (15, 35), "17h 35m", &[(AcThreeTier, 1245, 87)]),
            train("4", "12953", (17, 40), "17h 15m", &[(Sleeper, 765, 145), (AcThreeTier, 2050, 54), (AcTwoTier, 2950, 6), (AcFirstClass, 5100, 0)]),
            train("5", "12908", (7, 20), "17h 25m", &[(Sleeper, 740, 194), (AcThreeTier, 1935, 76), (AcTwoTier, 2810, 42)]),
        ]
    }

    pub fn numbers(trains: &[Train]) -> Vec<&str> {
        trains.iter().map(|t| t.number.as_str()).collect()
    }
}
