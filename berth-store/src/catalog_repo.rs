use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use berth_catalog::{CatalogError, ClassType, Station, Train, TrainClass, TrainRepository};

struct TrainTemplate {
    name: &'static str,
    number: &'static str,
    departure: (u32, u32),
    arrival: (u32, u32),
    duration: &'static str,
    classes: &'static [(ClassType, u32, u32)],
}

const STATIONS: [(&str, &str, &str); 10] = [
    ("1", "New Delhi", "NDLS"),
    ("2", "Mumbai Central", "MMCT"),
    ("3", "Chennai Central", "MAS"),
    ("4", "Kolkata Howrah", "HWH"),
    ("5", "Bangalore City", "SBC"),
    ("6", "Hyderabad Deccan", "HYD"),
    ("7", "Ahmedabad Junction", "ADI"),
    ("8", "Pune Junction", "PUNE"),
    ("9", "Jaipur Junction", "JP"),
    ("10", "Lucknow Junction", "LKO"),
];

const TEMPLATES: [TrainTemplate; 5] = [
    TrainTemplate {
        name: "Rajdhani Express",
        number: "12301",
        departure: (16, 25),
        arrival: (8, 15),
        duration: "15h 50m",
        classes: &[
            (ClassType::Sleeper, 745, 126),
            (ClassType::AcThreeTier, 1965, 64),
            (ClassType::AcTwoTier, 2860, 28),
            (ClassType::AcFirstClass, 4850, 3),
        ],
    },
    TrainTemplate {
        name: "Duronto Express",
        number: "12259",
        departure: (11, 0),
        arrival: (4, 25),
        duration: "17h 25m",
        classes: &[
            (ClassType::Sleeper, 720, 0),
            (ClassType::AcThreeTier, 1890, 12),
            (ClassType::AcTwoTier, 2750, 0),
        ],
    },
    TrainTemplate {
        name: "Garib Rath Express",
        number: "12909",
        departure: (15, 35),
        arrival: (9, 10),
        duration: "17h 35m",
        classes: &[(ClassType::AcThreeTier, 1245, 87)],
    },
    TrainTemplate {
        name: "August Kranti Rajdhani",
        number: "12953",
        departure: (17, 40),
        arrival: (10, 55),
        duration: "17h 15m",
        classes: &[
            (ClassType::Sleeper, 765, 145),
            (ClassType::AcThreeTier, 2050, 54),
            (ClassType::AcTwoTier, 2950, 6),
            (ClassType::AcFirstClass, 5100, 0),
        ],
    },
    TrainTemplate {
        name: "Sampark Kranti Express",
        number: "12908",
        departure: (7, 20),
        arrival: (0, 45),
        duration: "17h 25m",
        classes: &[
            (ClassType::Sleeper, 740, 194),
            (ClassType::AcThreeTier, 1935, 76),
            (ClassType::AcTwoTier, 2810, 42),
        ],
    },
];

/// Demo catalog: a fixed station list and five trains that run on every
/// route and date asked for.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog;

impl MemoryCatalog {
    pub fn new() -> Self {
        Self
    }

    fn build(
        index: usize,
        template: &TrainTemplate,
        origin: &Station,
        destination: &Station,
    ) -> Result<Train, CatalogError> {
        let clock = |(h, m): (u32, u32)| {
            NaiveTime::from_hms_opt(h, m, 0)
                .ok_or_else(|| CatalogError::InvalidClockTime(format!("{:02}:{:02}", h, m)))
        };

        let classes = template
            .classes
            .iter()
            .map(|&(class_type, fare, seats)| TrainClass::new(class_type, fare, seats))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Train {
            id: (index + 1).to_string(),
            name: template.name.to_string(),
            number: template.number.to_string(),
            departure_station: origin.clone(),
            arrival_station: destination.clone(),
            departure_time: clock(template.departure)?,
            arrival_time: clock(template.arrival)?,
            duration: template.duration.to_string(),
            classes,
        })
    }
}

#[async_trait]
impl TrainRepository for MemoryCatalog {
    async fn list_stations(&self) -> Result<Vec<Station>, CatalogError> {
        Ok(STATIONS
            .iter()
            .map(|&(id, name, code)| Station::new(id, name, code))
            .collect())
    }

    async fn trains_between(
        &self,
        origin: &Station,
        destination: &Station,
        date: NaiveDate,
    ) -> Result<Vec<Train>, CatalogError> {
        let trains = TEMPLATES
            .iter()
            .enumerate()
            .map(|(i, t)| Self::build(i, t, origin, destination))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            origin = %origin.code,
            destination = %destination.code,
            %date,
            count = trains.len(),
            "Catalog lookup"
        );
        Ok(trains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    #[tokio::test]
    async fn test_stations() {
        let catalog = MemoryCatalog::new();
        let stations = catalog.list_stations().await.unwrap();
        assert_eq!(stations.len(), 10);

        let found = catalog.find_station("sbc").await.unwrap().unwrap();
        assert_eq!(found.name, "Bangalore City");
        assert!(catalog.find_station("XYZ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_trains_bound_to_route() {
        let catalog = MemoryCatalog::new();
        let origin = Station::new("1", "New Delhi", "NDLS");
        let destination = Station::new("4", "Kolkata Howrah", "HWH");

        let trains = catalog.trains_between(&origin, &destination, date()).await.unwrap();
        assert_eq!(trains.len(), 5);
        assert!(trains.iter().all(|t| t.departure_station == origin));
        assert!(trains.iter().all(|t| t.arrival_station == destination));

        let duronto = catalog
            .find_train("12259", &origin, &destination, date())
            .await
            .unwrap()
            .unwrap();
        assert!(duronto.class(ClassType::Sleeper).unwrap().is_sold_out());
        assert_eq!(duronto.min_fare(), Some(720));
    }
}
