use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::RwLock;
use berth_order::{Journey, JourneyPassenger, JourneyRepository, JourneyStatus, RepositoryError};

/// Booking history kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryJourneyStore {
    journeys: RwLock<Vec<Journey>>,
}

impl MemoryJourneyStore {
    pub fn new(journeys: Vec<Journey>) -> Self {
        Self {
            journeys: RwLock::new(journeys),
        }
    }

    /// Store preloaded with the demo booking history.
    pub fn seeded() -> Self {
        Self::new(demo_journeys())
    }
}

#[async_trait]
impl JourneyRepository for MemoryJourneyStore {
    async fn list(&self) -> Result<Vec<Journey>, RepositoryError> {
        Ok(self.journeys.read().await.clone())
    }

    async fn record(&self, journey: Journey) -> Result<(), RepositoryError> {
        let mut journeys = self.journeys.write().await;
        if journeys.iter().any(|j| j.pnr == journey.pnr) {
            return Err(RepositoryError::Storage(format!("PNR {} already recorded", journey.pnr)));
        }
        tracing::info!(pnr = %journey.pnr, train = %journey.train_number, "Journey recorded");
        journeys.push(journey);
        Ok(())
    }

    async fn find_by_pnr(&self, pnr: &str) -> Result<Option<Journey>, RepositoryError> {
        Ok(self.journeys.read().await.iter().find(|j| j.pnr == pnr).cloned())
    }
}

fn passenger(name: &str, age: u32, seat: Option<&str>) -> JourneyPassenger {
    JourneyPassenger {
        name: name.to_string(),
        age,
        seat: seat.map(str::to_string),
    }
}

#[allow(clippy::too_many_arguments)]
fn journey(
    id: &str,
    pnr: &str,
    train: (&str, &str),
    date: (i32, u32, u32),
    route: (&str, &str),
    times: ((u32, u32), (u32, u32)),
    status: JourneyStatus,
    class_type: &str,
    fare: u64,
    passengers: Vec<JourneyPassenger>,
) -> Option<Journey> {
    Some(Journey {
        id: id.to_string(),
        pnr: pnr.to_string(),
        train_number: train.0.to_string(),
        train_name: train.1.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
        from: route.0.to_string(),
        to: route.1.to_string(),
        departure_time: NaiveTime::from_hms_opt(times.0 .0, times.0 .1, 0)?,
        arrival_time: NaiveTime::from_hms_opt(times.1 .0, times.1 .1, 0)?,
        status,
        class_type: class_type.to_string(),
        fare,
        passengers,
    })
}

pub fn demo_journeys() -> Vec<Journey> {
    [
        journey(
            "1",
            "4235621897",
            ("12301", "Rajdhani Express"),
            (2025, 4, 5),
            ("New Delhi", "Mumbai Central"),
            ((16, 25), (8, 15)),
            JourneyStatus::Completed,
            "AC 3 Tier",
            1965,
            vec![
                passenger("Amit Kumar", 32, Some("B1, 32")),
                passenger("Priya Kumar", 28, Some("B1, 33")),
            ],
        ),
        journey(
            "2",
            "7892345016",
            ("12259", "Duronto Express"),
            (2025, 5, 15),
            ("New Delhi", "Kolkata Howrah"),
            ((11, 0), (4, 25)),
            JourneyStatus::Upcoming,
            "AC 2 Tier",
            2750,
            vec![passenger("Rahul Singh", 45, Some("A3, 15"))],
        ),
        journey(
            "3",
            "3452109876",
            ("12953", "August Kranti Rajdhani"),
            (2025, 3, 10),
            ("Mumbai Central", "New Delhi"),
            ((17, 40), (10, 55)),
            JourneyStatus::Completed,
            "AC First Class",
            5100,
            vec![
                passenger("Neha Sharma", 29, Some("H1, 4")),
                passenger("Rohit Sharma", 32, Some("H1, 5")),
                passenger("Aarav Sharma", 8, Some("H1, 6")),
            ],
        ),
        journey(
            "4",
            "9876543210",
            ("12909", "Garib Rath Express"),
            (2025, 2, 20),
            ("Bangalore City", "New Delhi"),
            ((15, 35), (9, 10)),
            JourneyStatus::Cancelled,
            "AC 3 Tier",
            1245,
            vec![
                passenger("Rajesh Khanna", 55, None),
                passenger("Sunita Khanna", 50, None),
            ],
        ),
        journey(
            "5",
            "6543217890",
            ("12908", "Sampark Kranti Express"),
            (2025, 6, 1),
            ("New Delhi", "Mumbai Central"),
            ((7, 20), (0, 45)),
            JourneyStatus::Upcoming,
            "Sleeper Class",
            740,
            vec![
                passenger("Vikram Patel", 40, Some("S5, 42")),
                passenger("Meera Patel", 38, Some("S5, 43")),
                passenger("Arjun Patel", 12, Some("S5, 44")),
            ],
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_order::{list_journeys, DateOrder, StatusFilter};

    #[tokio::test]
    async fn test_seeded_history() {
        let store = MemoryJourneyStore::seeded();
        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 5);

        let upcoming = list_journeys(&all, StatusFilter::Upcoming, DateOrder::Newest);
        let pnrs: Vec<&str> = upcoming.iter().map(|j| j.pnr.as_str()).collect();
        assert_eq!(pnrs, vec!["6543217890", "7892345016"]);
    }

    #[tokio::test]
    async fn test_record_and_find() {
        let store = MemoryJourneyStore::default();
        let mut journey = demo_journeys().remove(0);
        journey.pnr = "1111111111".to_string();

        store.record(journey.clone()).await.unwrap();
        assert!(store.record(journey).await.is_err());

        let found = store.find_by_pnr("1111111111").await.unwrap().unwrap();
        assert_eq!(found.train_number, "12301");
        assert!(store.find_by_pnr("2222222222").await.unwrap().is_none());
    }
}
