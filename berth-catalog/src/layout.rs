use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::train::{Train, TrainClass};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum BerthType {
    Window,
    Middle,
    Aisle,
    Upper,
    Lower,
    SideUpper,
    SideLower,
}

impl BerthType {
    /// Suffix used in seat numbers, e.g. `3SL`.
    pub fn suffix(&self) -> &'static str {
        match self {
            BerthType::Window => "W",
            BerthType::Middle => "M",
            BerthType::Aisle => "A",
            BerthType::Upper => "U",
            BerthType::Lower => "L",
            BerthType::SideUpper => "SU",
            BerthType::SideLower => "SL",
        }
    }

    fn height(&self) -> f32 {
        match self {
            BerthType::Lower | BerthType::SideLower => 0.0,
            BerthType::Middle => 0.8,
            _ => 1.6,
        }
    }

    fn is_side(&self) -> bool {
        matches!(self, BerthType::SideUpper | BerthType::SideLower)
    }
}

/// Rendering hint only. Nothing outside the 3D view reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seat {
    pub id: String,
    pub number: String,
    #[serde(rename = "type")]
    pub berth_type: BerthType,
    pub is_available: bool,
    pub is_ladies_only: bool,
    pub position: Position,
}

/// Knobs for the coach layout. The defaults reproduce the demo coach: nine
/// rows, side berths on every third row, ladies quota on rows 3 and 7.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutPolicy {
    pub rows: u32,
    pub side_berth_every: u32,
    pub ladies_rows: Vec<u32>,
    pub unavailable_ratio: f64,
    pub seed: Option<u64>,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            rows: 9,
            side_berth_every: 3,
            ladies_rows: vec![3, 7],
            unavailable_ratio: 0.3,
            seed: None,
        }
    }
}

impl LayoutPolicy {
    fn is_ladies_row(&self, row: u32) -> bool {
        self.ladies_rows.contains(&row)
    }

    fn has_side_berths(&self, row: u32) -> bool {
        self.side_berth_every > 0 && row % self.side_berth_every == 0
    }
}

/// Where seat availability comes from. The generator asks once per seat and
/// the answer is frozen into the returned layout.
pub trait AvailabilitySource {
    fn is_available(&mut self, seat_id: &str) -> bool;
}

/// Pseudo-random availability from a seeded generator.
pub struct SeededAvailability {
    rng: StdRng,
    unavailable_ratio: f64,
}

impl SeededAvailability {
    pub fn new(seed: u64, unavailable_ratio: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            unavailable_ratio: unavailable_ratio.clamp(0.0, 1.0),
        }
    }

    /// Seed derived from the policy seed plus train and class, so the same
    /// coach comes back identical for the same seed.
    pub fn for_coach(policy: &LayoutPolicy, train: &Train, class: &TrainClass) -> Self {
        let base = policy.seed.unwrap_or_else(rand::random::<u64>);
        let key = format!("{}:{}:{}", train.id, train.number, class.class_type.code());
        let seed = key
            .bytes()
            .fold(base, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        Self::new(seed, policy.unavailable_ratio)
    }
}

impl AvailabilitySource for SeededAvailability {
    fn is_available(&mut self, _seat_id: &str) -> bool {
        self.rng.gen::<f64>() >= self.unavailable_ratio
    }
}

/// Availability from a known set of booked seat ids.
#[derive(Debug, Clone, Default)]
pub struct FixedAvailability {
    booked: HashSet<String>,
}

impl FixedAvailability {
    pub fn new<I, S>(booked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            booked: booked.into_iter().map(Into::into).collect(),
        }
    }
}

impl AvailabilitySource for FixedAvailability {
    fn is_available(&mut self, seat_id: &str) -> bool {
        !self.booked.contains(seat_id)
    }
}

/// Builds the seat map for one coach of a train/class.
#[derive(Debug, Clone, Default)]
pub struct LayoutGenerator {
    policy: LayoutPolicy,
}

impl LayoutGenerator {
    pub fn new(policy: LayoutPolicy) -> Self {
        Self { policy }
    }

    /// Layout with availability from the policy's seeded generator.
    pub fn generate_layout(&self, train: &Train, class: &TrainClass) -> Vec<Seat> {
        let mut source = SeededAvailability::for_coach(&self.policy, train, class);
        self.generate(train, class, &mut source)
    }

    /// Lower/middle/upper on every row plus side-lower/side-upper on the side
    /// berth rows, in row order.
    pub fn generate(
        &self,
        train: &Train,
        class: &TrainClass,
        availability: &mut dyn AvailabilitySource,
    ) -> Vec<Seat> {
        let mut seats = Vec::new();

        for row in 1..=self.policy.rows {
            let mut berths = vec![BerthType::Lower, BerthType::Middle, BerthType::Upper];
            if self.policy.has_side_berths(row) {
                berths.push(BerthType::SideLower);
                berths.push(BerthType::SideUpper);
            }

            for berth_type in berths {
                let id = format!("{}{}", row, berth_type.suffix());
                let is_ladies_only = self.policy.is_ladies_row(row)
                    && matches!(berth_type, BerthType::Lower | BerthType::Middle);
                seats.push(Seat {
                    is_available: availability.is_available(&id),
                    number: id.clone(),
                    id,
                    berth_type,
                    is_ladies_only,
                    position: Position {
                        x: row as f32 * 2.0,
                        y: berth_type.height(),
                        z: if berth_type.is_side() { 2.0 } else { 0.0 },
                    },
                });
            }
        }

        tracing::debug!(
            train = %train.number,
            class = %class.class_type,
            seats = seats.len(),
            available = seats.iter().filter(|s| s.is_available).count(),
            "Generated coach layout"
        );

        seats
    }
}

/// Display state of a seat, in priority order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatState {
    Unavailable,
    Selected,
    LadiesOnly,
    Available,
}

impl SeatState {
    pub fn of(seat: &Seat, is_selected: bool) -> Self {
        if !seat.is_available {
            SeatState::Unavailable
        } else if is_selected {
            SeatState::Selected
        } else if seat.is_ladies_only {
            SeatState::LadiesOnly
        } else {
            SeatState::Available
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SeatState::Unavailable => "red",
            SeatState::Selected => "blue",
            SeatState::LadiesOnly => "purple",
            SeatState::Available => "green",
        }
    }
}

/// Narrowing applied to a layout before display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatFilter {
    #[serde(default)]
    pub berth_types: BTreeSet<BerthType>,
    #[serde(default = "default_only_available")]
    pub only_available: bool,
    #[serde(default)]
    pub only_ladies: bool,
}

fn default_only_available() -> bool {
    true
}

impl Default for SeatFilter {
    fn default() -> Self {
        Self {
            berth_types: BTreeSet::new(),
            only_available: true,
            only_ladies: false,
        }
    }
}

impl SeatFilter {
    pub fn matches(&self, seat: &Seat) -> bool {
        if self.only_available && !seat.is_available {
            return false;
        }
        if self.only_ladies && !seat.is_ladies_only {
            return false;
        }
        self.berth_types.is_empty() || self.berth_types.contains(&seat.berth_type)
    }

    pub fn apply<'a>(&self, seats: &'a [Seat]) -> Vec<&'a Seat> {
        seats.iter().filter(|s| self.matches(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_core::{ClassType, Station};
    use chrono::NaiveTime;

    fn train() -> Train {
        Train {
            id: "1".to_string(),
            name: "Rajdhani Express".to_string(),
            number: "12301".to_string(),
            departure_station: Station::new("1", "New Delhi", "NDLS"),
            arrival_station: Station::new("2", "Mumbai Central", "MMCT"),
            departure_time: NaiveTime::from_hms_opt(16, 25, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(8, 15, 0).unwrap(),
            duration: "15h 50m".to_string(),
            classes: vec![TrainClass::new(ClassType::Sleeper, 745, 126).unwrap()],
        }
    }

    #[test]
    fn test_default_coach_shape() {
        let train = train();
        let generator = LayoutGenerator::default();
        let seats = generator.generate(&train, &train.classes[0], &mut FixedAvailability::default());

        // 9 rows x 3 berths + side pairs on rows 3, 6, 9
        assert_eq!(seats.len(), 27 + 6);
        assert!(seats.iter().all(|s| s.is_available));

        let ids: HashSet<_> = seats.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), seats.len());
        assert!(ids.contains("3SL") && ids.contains("9SU"));
        assert!(!ids.contains("1SL"));
    }

    #[test]
    fn test_ladies_rule_and_positions() {
        let train = train();
        let seats = LayoutGenerator::default().generate(
            &train,
            &train.classes[0],
            &mut FixedAvailability::default(),
        );
        let find = |id: &str| seats.iter().find(|s| s.id == id).unwrap();

        assert!(find("3L").is_ladies_only);
        assert!(find("7M").is_ladies_only);
        assert!(!find("3U").is_ladies_only);
        assert!(!find("3SL").is_ladies_only);
        assert!(!find("4L").is_ladies_only);

        assert_eq!(find("2U").position, Position { x: 4.0, y: 1.6, z: 0.0 });
        assert_eq!(find("6SL").position, Position { x: 12.0, y: 0.0, z: 2.0 });
    }

    #[test]
    fn test_fixed_availability() {
        let train = train();
        let mut booked = FixedAvailability::new(["1L", "5U"]);
        let seats = LayoutGenerator::default().generate(&train, &train.classes[0], &mut booked);
        let unavailable: Vec<_> = seats.iter().filter(|s| !s.is_available).map(|s| s.id.as_str()).collect();
        assert_eq!(unavailable, vec!["1L", "5U"]);
    }

    #[test]
    fn test_seeded_layout_is_reproducible() {
        let train = train();
        let policy = LayoutPolicy { seed: Some(42), ..Default::default() };
        let generator = LayoutGenerator::new(policy);

        let first = generator.generate_layout(&train, &train.classes[0]);
        let second = generator.generate_layout(&train, &train.classes[0]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ratio_extremes() {
        let train = train();
        let class = &train.classes[0];

        let none_booked = LayoutGenerator::new(LayoutPolicy {
            unavailable_ratio: 0.0,
            seed: Some(7),
            ..Default::default()
        });
        assert!(none_booked.generate_layout(&train, class).iter().all(|s| s.is_available));

        let all_booked = LayoutGenerator::new(LayoutPolicy {
            unavailable_ratio: 1.0,
            seed: Some(7),
            ..Default::default()
        });
        assert!(all_booked.generate_layout(&train, class).iter().all(|s| !s.is_available));
    }

    #[test]
    fn test_seat_state_priority() {
        let train = train();
        let seats = LayoutGenerator::default().generate(
            &train,
            &train.classes[0],
            &mut FixedAvailability::new(["3L"]),
        );
        let find = |id: &str| seats.iter().find(|s| s.id == id).unwrap();

        assert_eq!(SeatState::of(find("3L"), true), SeatState::Unavailable);
        assert_eq!(SeatState::of(find("3M"), true), SeatState::Selected);
        assert_eq!(SeatState::of(find("3M"), false), SeatState::LadiesOnly);
        assert_eq!(SeatState::of(find("1U"), false).color(), "green");
    }

    #[test]
    fn test_seat_filter() {
        let train = train();
        let seats = LayoutGenerator::default().generate(
            &train,
            &train.classes[0],
            &mut FixedAvailability::new(["3L"]),
        );

        let ladies = SeatFilter { only_ladies: true, ..Default::default() };
        let ids: Vec<_> = ladies.apply(&seats).iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["3M", "7L", "7M"]);

        let side = SeatFilter {
            berth_types: [BerthType::SideUpper].into_iter().collect(),
            only_available: false,
            only_ladies: false,
        };
        assert_eq!(side.apply(&seats).len(), 3);
    }
}
