use serde::{Deserialize, Serialize};
use berth_catalog::Seat;
use crate::BookingError;

/// Seats the user has tentatively picked, in pick order. Never holds an
/// unavailable seat or two seats with the same id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<Seat>", into = "Vec<Seat>")]
pub struct SeatSelection {
    seats: Vec<Seat>,
}

impl TryFrom<Vec<Seat>> for SeatSelection {
    type Error = BookingError;

    fn try_from(seats: Vec<Seat>) -> Result<Self, Self::Error> {
        let mut selection = SeatSelection::new();
        for seat in &seats {
            selection.select(seat)?;
        }
        Ok(selection)
    }
}

impl From<SeatSelection> for Vec<Seat> {
    fn from(selection: SeatSelection) -> Self {
        selection.seats
    }
}

impl SeatSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a seat. Unavailable seats and seats already present are rejected
    /// without touching the selection.
    pub fn select(&mut self, seat: &Seat) -> Result<(), BookingError> {
        if !seat.is_available {
            return Err(BookingError::SeatUnavailable(seat.id.clone()));
        }
        if self.contains(&seat.id) {
            return Err(BookingError::AlreadySelected(seat.id.clone()));
        }
        self.seats.push(seat.clone());
        Ok(())
    }

    /// Remove by id. Returns whether anything was removed; a missing id is
    /// not an error.
    pub fn deselect(&mut self, seat_id: &str) -> bool {
        let before = self.seats.len();
        self.seats.retain(|s| s.id != seat_id);
        self.seats.len() != before
    }

    /// Seat-map click: remove if selected, otherwise select. Returns whether
    /// the seat ends up selected.
    pub fn toggle(&mut self, seat: &Seat) -> Result<bool, BookingError> {
        if self.deselect(&seat.id) {
            return Ok(false);
        }
        self.select(seat)?;
        Ok(true)
    }

    pub fn contains(&self, seat_id: &str) -> bool {
        self.seats.iter().any(|s| s.id == seat_id)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn ids(&self) -> Vec<String> {
        self.seats.iter().map(|s| s.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn clear(&mut self) {
        self.seats.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_catalog::{BerthType, Position};

    fn seat(id: &str, is_available: bool) -> Seat {
        Seat {
            id: id.to_string(),
            number: id.to_string(),
            berth_type: BerthType::Lower,
            is_available,
            is_ladies_only: false,
            position: Position { x: 0.0, y: 0.0, z: 0.0 },
        }
    }

    #[test]
    fn test_select_then_deselect_round_trip() {
        let mut selection = SeatSelection::new();
        selection.select(&seat("1L", true)).unwrap();
        let before = selection.clone();

        selection.select(&seat("2L", true)).unwrap();
        assert!(selection.deselect("2L"));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_unavailable_seat_never_added() {
        let mut selection = SeatSelection::new();
        selection.select(&seat("1L", true)).unwrap();

        let err = selection.select(&seat("4U", false)).unwrap_err();
        assert_eq!(err, BookingError::SeatUnavailable("4U".to_string()));
        assert_eq!(selection.ids(), vec!["1L"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut selection = SeatSelection::new();
        selection.select(&seat("1L", true)).unwrap();
        assert_eq!(
            selection.select(&seat("1L", true)).unwrap_err(),
            BookingError::AlreadySelected("1L".to_string())
        );
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_double_deselect_is_noop() {
        let mut selection = SeatSelection::new();
        selection.select(&seat("5M", true)).unwrap();

        assert!(selection.deselect("5M"));
        assert!(!selection.deselect("5M"));
        assert_eq!(selection.len(), 0);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_deserialize_enforces_selection_rules() {
        let ok = serde_json::to_value(vec![seat("1L", true), seat("2L", true)]).unwrap();
        let selection: SeatSelection = serde_json::from_value(ok).unwrap();
        assert_eq!(selection.ids(), vec!["1L", "2L"]);
        assert_eq!(serde_json::to_value(&selection).unwrap().as_array().unwrap().len(), 2);

        let taken = serde_json::to_value(vec![seat("1L", true), seat("4U", false)]).unwrap();
        let err = serde_json::from_value::<SeatSelection>(taken).unwrap_err();
        assert!(err.to_string().contains("4U is not available"));

        let twice = serde_json::to_value(vec![seat("1L", true), seat("1L", true)]).unwrap();
        let err = serde_json::from_value::<SeatSelection>(twice).unwrap_err();
        assert!(err.to_string().contains("1L is already selected"));
    }

    #[test]
    fn test_toggle() {
        let mut selection = SeatSelection::new();
        assert!(selection.toggle(&seat("3L", true)).unwrap());
        assert!(!selection.toggle(&seat("3L", true)).unwrap());
        assert!(selection.toggle(&seat("3U", false)).is_err());
        assert!(selection.is_empty());
    }
}
