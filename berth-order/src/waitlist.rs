use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::RepositoryError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Confirmed,
    Rac,
    Waiting,
}

/// Per-passenger status as printed on the ticket: "WL/5", "RAC/2",
/// "Confirmed (S4, 16)".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassengerStatus {
    Confirmed { coach: String, berth: String },
    Rac { position: u32 },
    Waiting { position: u32 },
    Unknown { raw: String },
}

impl PassengerStatus {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let unknown = || PassengerStatus::Unknown { raw: trimmed.to_string() };

        if let Some(n) = trimmed.strip_prefix("WL/") {
            return match n.trim().parse() {
                Ok(position) => PassengerStatus::Waiting { position },
                Err(_) => unknown(),
            };
        }
        if let Some(n) = trimmed.strip_prefix("RAC/") {
            return match n.trim().parse() {
                Ok(position) => PassengerStatus::Rac { position },
                Err(_) => unknown(),
            };
        }
        if let Some(rest) = trimmed.strip_prefix("Confirmed") {
            let inner = rest.trim().trim_start_matches('(').trim_end_matches(')');
            return match inner.split_once(',') {
                Some((coach, berth)) if !coach.trim().is_empty() && !berth.trim().is_empty() => {
                    PassengerStatus::Confirmed {
                        coach: coach.trim().to_string(),
                        berth: berth.trim().to_string(),
                    }
                }
                _ => unknown(),
            };
        }
        unknown()
    }

    /// Display tone for the status badge.
    pub fn tone(&self) -> &'static str {
        match self {
            PassengerStatus::Confirmed { .. } => "success",
            PassengerStatus::Rac { .. } => "warning",
            PassengerStatus::Waiting { .. } => "danger",
            PassengerStatus::Unknown { .. } => "neutral",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitlistedPassenger {
    pub name: String,
    pub age: u32,
    pub current_status: String,
}

impl WaitlistedPassenger {
    pub fn status(&self) -> PassengerStatus {
        PassengerStatus::parse(&self.current_status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitingTicket {
    pub pnr: String,
    pub train_number: String,
    pub train_name: String,
    pub date: NaiveDate,
    pub from: String,
    pub to: String,
    pub waiting_number: u32,
    pub status: TicketStatus,
    pub passengers: Vec<WaitlistedPassenger>,
}

/// Tickets whose PNR contains `pnr`. A blank query matches everything.
pub fn lookup(tickets: &[WaitingTicket], pnr: &str) -> Vec<WaitingTicket> {
    let query = pnr.trim();
    tickets
        .iter()
        .filter(|t| query.is_empty() || t.pnr.contains(query))
        .cloned()
        .collect()
}

#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    async fn list_tickets(&self) -> Result<Vec<WaitingTicket>, RepositoryError>;

    async fn lookup(&self, pnr: &str) -> Result<Vec<WaitingTicket>, RepositoryError> {
        let tickets = self.list_tickets().await?;
        Ok(lookup(&tickets, pnr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(pnr: &str, status: TicketStatus) -> WaitingTicket {
        WaitingTicket {
            pnr: pnr.to_string(),
            train_number: "12301".to_string(),
            train_name: "Rajdhani Express".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            from: "New Delhi".to_string(),
            to: "Mumbai Central".to_string(),
            waiting_number: 5,
            status,
            passengers: vec![],
        }
    }

    #[test]
    fn test_parse_statuses() {
        assert_eq!(PassengerStatus::parse("WL/5"), PassengerStatus::Waiting { position: 5 });
        assert_eq!(PassengerStatus::parse("RAC/2"), PassengerStatus::Rac { position: 2 });
        assert_eq!(
            PassengerStatus::parse("Confirmed (S4, 16)"),
            PassengerStatus::Confirmed { coach: "S4".to_string(), berth: "16".to_string() }
        );
        assert_eq!(
            PassengerStatus::parse("WL/x"),
            PassengerStatus::Unknown { raw: "WL/x".to_string() }
        );
        assert_eq!(PassengerStatus::parse("RAC/2").tone(), "warning");
    }

    #[test]
    fn test_lookup_by_partial_pnr() {
        let tickets = vec![
            ticket("4235621897", TicketStatus::Waiting),
            ticket("7892345016", TicketStatus::Rac),
        ];

        assert_eq!(lookup(&tickets, "").len(), 2);
        assert_eq!(lookup(&tickets, "  ").len(), 2);

        let hits = lookup(&tickets, "7892");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].status, TicketStatus::Rac);

        assert!(lookup(&tickets, "0000").is_empty());
    }

    #[test]
    fn test_ticket_status_serde() {
        assert_eq!(serde_json::to_string(&TicketStatus::Rac).unwrap(), "\"rac\"");
    }
}
