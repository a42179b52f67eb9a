use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::class::ClassFilter;
use crate::validation::{into_result, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub code: String,
}

impl Station {
    pub fn new(id: &str, name: &str, code: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            code: code.to_string(),
        }
    }
}

/// What the booking form has collected so far. Every field stays optional
/// until the user submits, at which point `validate` reports everything
/// still missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCriteria {
    pub origin: Option<Station>,
    pub destination: Option<Station>,
    pub travel_date: Option<NaiveDate>, // ISO YYYY-MM-DD on the wire
    #[serde(default)]
    pub class_filter: ClassFilter,
}

impl SearchCriteria {
    pub fn new(origin: Station, destination: Station, travel_date: NaiveDate) -> Self {
        Self {
            origin: Some(origin),
            destination: Some(destination),
            travel_date: Some(travel_date),
            class_filter: ClassFilter::All,
        }
    }

    pub fn with_class(mut self, class_filter: ClassFilter) -> Self {
        self.class_filter = class_filter;
        self
    }

    /// Collect every problem with the criteria; never stops at the first.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.origin.is_none() {
            errors.push(ValidationError::MissingOriginStation);
        }
        if self.destination.is_none() {
            errors.push(ValidationError::MissingDestinationStation);
        }
        if let (Some(origin), Some(destination)) = (&self.origin, &self.destination) {
            if origin.id == destination.id {
                errors.push(ValidationError::SameOriginDestination);
            }
        }
        if self.travel_date.is_none() {
            errors.push(ValidationError::MissingTravelDate);
        }

        into_result(errors)
    }

    /// Swap origin and destination. Only applies when both are set.
    pub fn swap_stations(&mut self) {
        if self.origin.is_some() && self.destination.is_some() {
            std::mem::swap(&mut self.origin, &mut self.destination);
        }
    }

    /// Move the travel date by `days` (negative goes back). No-op without a date.
    pub fn shift_date(&mut self, days: i64) {
        if let Some(date) = self.travel_date {
            self.travel_date = date.checked_add_signed(chrono::Duration::days(days));
        }
    }
}
