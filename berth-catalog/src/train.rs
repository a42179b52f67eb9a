use serde::{Deserialize, Serialize};
use chrono::{NaiveTime, Timelike};
use std::collections::BTreeSet;
use berth_core::{ClassType, Station};
use crate::CatalogError;

/// `"HH:MM"` wall-clock serialization for departure/arrival times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

/// One bookable class on a train, e.g. "AC 3 Tier" at 1965.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainClass {
    pub id: String,
    #[serde(rename = "type")]
    pub class_type: ClassType,
    pub name: String,
    pub fare: u32,
    pub available_seats: u32,
}

impl TrainClass {
    pub fn new(class_type: ClassType, fare: u32, available_seats: u32) -> Result<Self, CatalogError> {
        if fare == 0 {
            return Err(CatalogError::InvalidFare(class_type));
        }
        Ok(Self {
            id: class_type.code().to_string(),
            class_type,
            name: class_type.display_name().to_string(),
            fare,
            available_seats,
        })
    }

    pub fn is_sold_out(&self) -> bool {
        self.available_seats == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Train {
    pub id: String,
    pub name: String,
    pub number: String,
    pub departure_station: Station,
    pub arrival_station: Station,
    #[serde(with = "hhmm")]
    pub departure_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub arrival_time: NaiveTime,
    pub duration: String, // "15h 50m"
    pub classes: Vec<TrainClass>,
}

impl Train {
    /// Cheapest class fare; `None` for a train with no classes.
    pub fn min_fare(&self) -> Option<u32> {
        self.classes.iter().map(|c| c.fare).min()
    }

    pub fn departure_minutes(&self) -> u32 {
        minutes_since_midnight(self.departure_time)
    }

    pub fn duration_minutes(&self) -> Result<u32, CatalogError> {
        parse_duration(&self.duration)
    }

    pub fn class(&self, class_type: ClassType) -> Option<&TrainClass> {
        self.classes.iter().find(|c| c.class_type == class_type)
    }

    /// True when any class on the train is in `wanted`. An empty set matches
    /// every train.
    pub fn offers_any(&self, wanted: &BTreeSet<ClassType>) -> bool {
        wanted.is_empty() || self.classes.iter().any(|c| wanted.contains(&c.class_type))
    }
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Parse `"Xh Ym"`, `"Xh"` or `"Ym"` into total minutes.
pub fn parse_duration(raw: &str) -> Result<u32, CatalogError> {
    let invalid = || CatalogError::InvalidDuration(raw.to_string());
    let text = raw.trim();

    let parse_minutes = |part: &str| -> Result<u32, CatalogError> {
        let part = part.trim();
        if part.is_empty() {
            return Ok(0);
        }
        part.strip_suffix('m')
            .unwrap_or(part)
            .trim()
            .parse::<u32>()
            .map_err(|_| invalid())
    };

    if text.is_empty() {
        return Err(invalid());
    }

    match text.split_once('h') {
        Some((hours, rest)) => {
            let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
            let minutes = parse_minutes(rest)?;
            Ok(hours * 60 + minutes)
        }
        None => {
            if !text.ends_with('m') {
                return Err(invalid());
            }
            parse_minutes(text)
        }
    }
}
