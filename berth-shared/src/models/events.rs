use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct TrainSearchEvent {
    pub origin: String,
    pub destination: String,
    pub travel_date: String,
    pub result_count: usize,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct SeatSelectionEvent {
    pub session_id: Uuid,
    pub train_number: String,
    pub seat_id: String,
    pub selected: bool,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmedEvent {
    pub booking_id: Uuid,
    pub pnr: String,
    pub train_number: String,
    pub class_code: String,
    pub seat_count: usize,
    pub total_fare: u64,
    pub payment_method: String,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    TrainSearch(TrainSearchEvent),
    SeatSelection(SeatSelectionEvent),
    BookingConfirmed(BookingConfirmedEvent),
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::TrainSearch(_) => "train_search",
            DomainEvent::SeatSelection(_) => "seat_selection",
            DomainEvent::BookingConfirmed(_) => "booking_confirmed",
        }
    }
}
