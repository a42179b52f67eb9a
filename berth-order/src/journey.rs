use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveTime};
use berth_catalog::train::hhmm;
use crate::checkout::BookingConfirmation;
use crate::RepositoryError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JourneyStatus {
    Completed,
    Upcoming,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JourneyPassenger {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub seat: Option<String>,
}

/// A past or future trip as shown in the booking history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Journey {
    pub id: String,
    pub pnr: String,
    pub train_number: String,
    pub train_name: String,
    pub date: NaiveDate,
    pub from: String,
    pub to: String,
    #[serde(with = "hhmm")]
    pub departure_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub arrival_time: NaiveTime,
    pub status: JourneyStatus,
    pub class_type: String,
    pub fare: u64,
    pub passengers: Vec<JourneyPassenger>,
}

impl Journey {
    /// History entry for a freshly paid booking. Bookings without a journey
    /// date fall back to the confirmation day.
    pub fn from_confirmation(confirmation: &BookingConfirmation) -> Self {
        let seats = &confirmation.seats;
        let passengers = confirmation
            .passengers
            .iter()
            .enumerate()
            .map(|(i, p)| JourneyPassenger {
                name: p.name.clone(),
                age: u32::try_from(p.age).unwrap_or(0),
                seat: seats.get(i).cloned(),
            })
            .collect();

        Self {
            id: confirmation.booking_id.to_string(),
            pnr: confirmation.pnr.clone(),
            train_number: confirmation.train_number.clone(),
            train_name: confirmation.train_name.clone(),
            date: confirmation
                .journey_date
                .unwrap_or_else(|| confirmation.confirmed_at.date_naive()),
            from: confirmation.from.clone(),
            to: confirmation.to.clone(),
            departure_time: confirmation.departure_time,
            arrival_time: confirmation.arrival_time,
            status: JourneyStatus::Upcoming,
            class_type: confirmation.class_name.clone(),
            fare: confirmation.fare.total,
            passengers,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Upcoming,
    Cancelled,
}

impl StatusFilter {
    pub fn admits(&self, status: JourneyStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => status == JourneyStatus::Completed,
            StatusFilter::Upcoming => status == JourneyStatus::Upcoming,
            StatusFilter::Cancelled => status == JourneyStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    #[default]
    Newest,
    Oldest,
}

/// Journeys matching `status`, ordered by travel date.
pub fn list_journeys(journeys: &[Journey], status: StatusFilter, order: DateOrder) -> Vec<Journey> {
    let mut out: Vec<Journey> = journeys
        .iter()
        .filter(|j| status.admits(j.status))
        .cloned()
        .collect();

    match order {
        DateOrder::Newest => out.sort_by(|a, b| b.date.cmp(&a.date)),
        DateOrder::Oldest => out.sort_by(|a, b| a.date.cmp(&b.date)),
    }
    out
}

#[async_trait]
pub trait JourneyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Journey>, RepositoryError>;
    async fn record(&self, journey: Journey) -> Result<(), RepositoryError>;
    async fn find_by_pnr(&self, pnr: &str) -> Result<Option<Journey>, RepositoryError>;
}
