use async_trait::async_trait;
use chrono::NaiveDate;
use berth_order::{RepositoryError, TicketStatus, WaitingTicket, WaitlistRepository, WaitlistedPassenger};

/// Read-only waiting-list tickets held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWaitlist {
    tickets: Vec<WaitingTicket>,
}

impl MemoryWaitlist {
    pub fn new(tickets: Vec<WaitingTicket>) -> Self {
        Self { tickets }
    }

    pub fn seeded() -> Self {
        Self::new(demo_tickets())
    }
}

#[async_trait]
impl WaitlistRepository for MemoryWaitlist {
    async fn list_tickets(&self) -> Result<Vec<WaitingTicket>, RepositoryError> {
        Ok(self.tickets.clone())
    }
}

fn ticket(
    pnr: &str,
    train: (&str, &str),
    date: (i32, u32, u32),
    route: (&str, &str),
    waiting_number: u32,
    status: TicketStatus,
    passengers: &[(&str, u32, &str)],
) -> Option<WaitingTicket> {
    Some(WaitingTicket {
        pnr: pnr.to_string(),
        train_number: train.0.to_string(),
        train_name: train.1.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
        from: route.0.to_string(),
        to: route.1.to_string(),
        waiting_number,
        status,
        passengers: passengers
            .iter()
            .map(|&(name, age, current_status)| WaitlistedPassenger {
                name: name.to_string(),
                age,
                current_status: current_status.to_string(),
            })
            .collect(),
    })
}

pub fn demo_tickets() -> Vec<WaitingTicket> {
    [
        ticket(
            "4235621897",
            ("12301", "Rajdhani Express"),
            (2025, 5, 1),
            ("New Delhi", "Mumbai Central"),
            5,
            TicketStatus::Waiting,
            &[("Amit Kumar", 32, "WL/5"), ("Priya Kumar", 28, "WL/6")],
        ),
        ticket(
            "7892345016",
            ("12259", "Duronto Express"),
            (2025, 5, 3),
            ("New Delhi", "Kolkata Howrah"),
            2,
            TicketStatus::Rac,
            &[("Rahul Singh", 45, "RAC/2")],
        ),
        ticket(
            "3452109876",
            ("12953", "August Kranti Rajdhani"),
            (2025, 5, 5),
            ("Mumbai Central", "New Delhi"),
            12,
            TicketStatus::Waiting,
            &[
                ("Neha Sharma", 29, "WL/12"),
                ("Rohit Sharma", 32, "WL/13"),
                ("Aarav Sharma", 8, "WL/14"),
            ],
        ),
        ticket(
            "9876543210",
            ("12909", "Garib Rath Express"),
            (2025, 4, 30),
            ("Bangalore City", "New Delhi"),
            1,
            TicketStatus::Confirmed,
            &[
                ("Rajesh Khanna", 55, "Confirmed (S4, 16)"),
                ("Sunita Khanna", 50, "Confirmed (S4, 17)"),
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
    use berth_order::PassengerStatus;

    #[tokio::test]
    async fn test_lookup_through_repository() {
        let waitlist = MemoryWaitlist::seeded();
        assert_eq!(waitlist.lookup("").await.unwrap().len(), 4);

        let hits = waitlist.lookup("98765").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].status, TicketStatus::Confirmed);
        assert_eq!(
            hits[0].passengers[1].status(),
            PassengerStatus::Confirmed { coach: "S4".to_string(), berth: "17".to_string() }
        );
    }
}
