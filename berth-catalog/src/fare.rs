use serde::{Deserialize, Serialize};
use crate::train::TrainClass;

/// Price breakdown shown at checkout. All amounts in whole currency units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FareBreakdown {
    pub base: u64,
    pub tax: u64,
    pub fee: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareConfig {
    /// Tax in basis points (500 = 5%)
    pub tax_rate_bps: u32,

    /// Flat convenience fee charged per seat
    pub convenience_fee_per_seat: u32,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            tax_rate_bps: 500,
            convenience_fee_per_seat: 20,
        }
    }
}

impl FareConfig {
    /// Build from a fractional rate such as `0.05`.
    pub fn from_rate(tax_rate: f64, convenience_fee_per_seat: u32) -> Self {
        Self {
            tax_rate_bps: (tax_rate.max(0.0) * 10_000.0).round() as u32,
            convenience_fee_per_seat,
        }
    }
}

/// Derives the fare breakdown from the selected class and seat count.
#[derive(Debug, Clone, Default)]
pub struct FareCalculator {
    config: FareConfig,
}

impl FareCalculator {
    pub fn new(config: FareConfig) -> Self {
        Self { config }
    }

    pub fn compute_fare(&self, class: Option<&TrainClass>, seat_count: usize) -> FareBreakdown {
        let seats = seat_count as u128;
        let base = class.map(|c| c.fare as u128 * seats).unwrap_or(0);

        // round half up on the whole unit
        let tax = (base * self.config.tax_rate_bps as u128 + 5_000) / 10_000;
        let fee = self.config.convenience_fee_per_seat as u128 * seats;

        FareBreakdown {
            base: saturate(base),
            tax: saturate(tax),
            fee: saturate(fee),
            total: saturate(base + tax + fee),
        }
    }
}

fn saturate(amount: u128) -> u64 {
    u64::try_from(amount).unwrap_or(u64::MAX)
}

/// Fare with the standard 5% tax and 20-per-seat fee.
pub fn compute_fare(class: Option<&TrainClass>, seat_count: usize) -> FareBreakdown {
    FareCalculator::default().compute_fare(class, seat_count)
}
