use berth_core::validation::into_result;
use berth_core::{Passenger, ValidationError};

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 120;
pub const NATIONAL_ID_LENGTH: usize = 12;

/// All field problems for one passenger row.
pub fn validate_passenger(index: usize, passenger: &Passenger) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if passenger.name.trim().is_empty() {
        errors.push(ValidationError::NameRequired { passenger: index });
    }

    if !(MIN_AGE..=MAX_AGE).contains(&passenger.age) {
        errors.push(ValidationError::AgeOutOfRange {
            passenger: index,
            age: passenger.age,
        });
    }

    let id = passenger.national_id.expose();
    if id.len() != NATIONAL_ID_LENGTH || !id.bytes().all(|b| b.is_ascii_digit()) {
        errors.push(ValidationError::InvalidIdFormat { passenger: index });
    }

    errors
}

/// Check every passenger; the error list covers every field of every row.
pub fn validate(passengers: &[Passenger]) -> Result<(), Vec<ValidationError>> {
    into_result(
        passengers
            .iter()
            .enumerate()
            .flat_map(|(i, p)| validate_passenger(i, p))
            .collect(),
    )
}

/// `validate` plus the one-passenger-per-seat rule.
pub fn validate_for_seats(passengers: &[Passenger], seat_count: usize) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    if passengers.len() != seat_count {
        errors.push(ValidationError::PassengerCountMismatch {
            expected: seat_count,
            actual: passengers.len(),
        });
    }
    if let Err(field_errors) = validate(passengers) {
        errors.extend(field_errors);
    }
    into_result(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_violations_reported() {
        let passengers = vec![Passenger::new("", 200, "123")];
        let errors = validate(&passengers).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::NameRequired { passenger: 0 },
                ValidationError::AgeOutOfRange { passenger: 0, age: 200 },
                ValidationError::InvalidIdFormat { passenger: 0 },
            ]
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let passengers = vec![
            Passenger::new("Amit Kumar", 32, "123456789012"),
            Passenger::new("   ", 0, "12345678901a"),
        ];
        let first = validate(&passengers);
        let second = validate(&passengers);
        assert_eq!(first, second);
        assert_eq!(first.unwrap_err().len(), 3);
    }

    #[test]
    fn test_boundaries() {
        assert!(validate(&[Passenger::new("A", 1, "000000000000")]).is_ok());
        assert!(validate(&[Passenger::new("A", 120, "999999999999")]).is_ok());
        assert!(validate(&[Passenger::new("A", 0, "000000000000")]).is_err());
        assert!(validate(&[Passenger::new("A", 121, "000000000000")]).is_err());
        assert_eq!(
            validate(&[Passenger::new("A", -5, "000000000000")]).unwrap_err(),
            vec![ValidationError::AgeOutOfRange { passenger: 0, age: -5 }]
        );
        assert!(validate(&[Passenger::new("A", 30, "0000000000000")]).is_err());
        assert!(validate(&[Passenger::new("A", 30, "00000000000٣")]).is_err());
        assert!(validate(&[]).is_ok());
    }

    #[test]
    fn test_errors_carry_row_index() {
        let passengers = vec![
            Passenger::new("Amit Kumar", 32, "123456789012"),
            Passenger::new("Priya Kumar", 28, "bad"),
        ];
        let errors = validate(&passengers).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidIdFormat { passenger: 1 }]);
        assert_eq!(errors[0].field(), "passenger1_nationalId");
    }

    #[test]
    fn test_count_must_match_seats() {
        let passengers = vec![Passenger::new("", 32, "123456789012")];
        let errors = validate_for_seats(&passengers, 2).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::PassengerCountMismatch { expected: 2, actual: 1 },
                ValidationError::NameRequired { passenger: 0 },
            ]
        );
    }
}
