use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use berth_catalog::{FareBreakdown, FareCalculator, Seat, Train, TrainClass};
use berth_core::{ClassType, Passenger};
use crate::selection::SeatSelection;
use crate::BookingError;

/// Everything picked so far in one booking session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingDetails {
    pub train: Option<Train>,
    pub selected_class: Option<TrainClass>,
    pub selected_seats: SeatSelection,
    pub departure_date: Option<NaiveDate>,
    pub passengers: Vec<Passenger>,
    pub fare: FareBreakdown,
}

impl BookingDetails {
    pub fn seat_count(&self) -> usize {
        self.selected_seats.len()
    }

    pub fn is_ready_for_checkout(&self) -> bool {
        self.train.is_some() && self.selected_class.is_some() && !self.selected_seats.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingAction {
    SelectTrain { train: Train, departure_date: Option<NaiveDate> },
    SelectClass { class_type: ClassType },
    SelectSeat { seat: Seat },
    DeselectSeat { seat_id: String },
    ToggleSeat { seat: Seat },
    UpdatePassengers { passengers: Vec<Passenger> },
    Reset,
}

impl BookingAction {
    pub fn name(&self) -> &'static str {
        match self {
            BookingAction::SelectTrain { .. } => "SELECT_TRAIN",
            BookingAction::SelectClass { .. } => "SELECT_CLASS",
            BookingAction::SelectSeat { .. } => "SELECT_SEAT",
            BookingAction::DeselectSeat { .. } => "DESELECT_SEAT",
            BookingAction::ToggleSeat { .. } => "TOGGLE_SEAT",
            BookingAction::UpdatePassengers { .. } => "UPDATE_PASSENGERS",
            BookingAction::Reset => "RESET",
        }
    }
}

/// Next booking state for `action`. `state` is left untouched; on error the
/// caller keeps the old state. Fare is recomputed on every transition.
pub fn reduce(
    state: &BookingDetails,
    action: BookingAction,
    fares: &FareCalculator,
) -> Result<BookingDetails, BookingError> {
    let mut next = state.clone();

    match action {
        BookingAction::SelectTrain { train, departure_date } => {
            next = BookingDetails {
                train: Some(train),
                departure_date,
                ..BookingDetails::default()
            };
        }
        BookingAction::SelectClass { class_type } => {
            let train = state.train.as_ref().ok_or(BookingError::NoTrainSelected)?;
            let class = train.class(class_type).ok_or_else(|| BookingError::ClassNotOffered {
                train: train.number.clone(),
                class: class_type,
            })?;
            if class.is_sold_out() {
                return Err(BookingError::ClassSoldOut(class_type));
            }
            next.selected_class = Some(class.clone());
            next.selected_seats.clear();
            next.passengers.clear();
        }
        BookingAction::SelectSeat { seat } => {
            require_class(state)?;
            next.selected_seats.select(&seat)?;
        }
        BookingAction::DeselectSeat { seat_id } => {
            next.selected_seats.deselect(&seat_id);
        }
        BookingAction::ToggleSeat { seat } => {
            require_class(state)?;
            next.selected_seats.toggle(&seat)?;
        }
        BookingAction::UpdatePassengers { passengers } => {
            next.passengers = passengers;
        }
        BookingAction::Reset => {
            next = BookingDetails::default();
        }
    }

    next.fare = fares.compute_fare(next.selected_class.as_ref(), next.seat_count());
    Ok(next)
}

fn require_class(state: &BookingDetails) -> Result<(), BookingError> {
    if state.train.is_none() {
        return Err(BookingError::NoTrainSelected);
    }
    if state.selected_class.is_none() {
        return Err(BookingError::NoClassSelected);
    }
    Ok(())
}

/// Owns the booking state for one user plus the coach layout currently on
/// screen. All mutation goes through `apply`.
#[derive(Debug, Clone, Default)]
pub struct BookingSession {
    details: BookingDetails,
    coach: Vec<Seat>,
    fares: FareCalculator,
}

impl BookingSession {
    pub fn new(fares: FareCalculator) -> Self {
        Self {
            details: BookingDetails::default(),
            coach: Vec::new(),
            fares,
        }
    }

    pub fn details(&self) -> &BookingDetails {
        &self.details
    }

    pub fn apply(&mut self, action: BookingAction) -> Result<&BookingDetails, BookingError> {
        let name = action.name();
        let resets_coach = matches!(
            action,
            BookingAction::SelectTrain { .. } | BookingAction::SelectClass { .. } | BookingAction::Reset
        );

        match reduce(&self.details, action, &self.fares) {
            Ok(next) => {
                self.details = next;
                if resets_coach {
                    self.coach.clear();
                }
                tracing::debug!(
                    action = name,
                    seats = self.details.seat_count(),
                    total = self.details.fare.total,
                    "Booking updated"
                );
                Ok(&self.details)
            }
            Err(e) => {
                tracing::warn!(action = name, error = %e, "Booking action rejected");
                Err(e)
            }
        }
    }

    pub fn coach(&self) -> &[Seat] {
        &self.coach
    }

    pub fn set_coach(&mut self, seats: Vec<Seat>) {
        self.coach = seats;
    }

    pub fn coach_seat(&self, seat_id: &str) -> Result<&Seat, BookingError> {
        self.coach
            .iter()
            .find(|s| s.id == seat_id)
            .ok_or_else(|| BookingError::UnknownSeat(seat_id.to_string()))
    }

    pub fn fare(&self) -> FareBreakdown {
        self.details.fare
    }

    pub fn reset(&mut self) {
        self.details = BookingDetails::default();
        self.coach.clear();
    }
}
