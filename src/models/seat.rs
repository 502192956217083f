use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Cabin class of a seat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, JsonSchema, sqlx::Type, Display, EnumString,
)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SeatClass {
    Bus,
    Eco,
}

/// Row count and letters of one cabin class.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClassLayout {
    pub seat_class: SeatClass,
    pub rows: i32,
    pub letters: Vec<char>,
}

impl ClassLayout {
    pub fn capacity(&self) -> i64 {
        self.rows as i64 * self.letters.len() as i64
    }
}

/// Seat grid used when a flight is created.
///
/// Classes are listed in cabin order; seats are generated row by row,
/// letter by letter within each class.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SeatLayout {
    pub classes: Vec<ClassLayout>,
}

impl Default for SeatLayout {
    fn default() -> Self {
        let letters = vec!['A', 'B', 'C', 'D'];
        SeatLayout {
            classes: vec![
                ClassLayout {
                    seat_class: SeatClass::Bus,
                    rows: 3,
                    letters: letters.clone(),
                },
                ClassLayout {
                    seat_class: SeatClass::Eco,
                    rows: 10,
                    letters,
                },
            ],
        }
    }
}

impl SeatLayout {
    pub fn class(&self, seat_class: SeatClass) -> Option<&ClassLayout> {
        self.classes.iter().find(|c| c.seat_class == seat_class)
    }

    /// Structural check of a (class, row, letter) triple. Case-insensitive.
    pub fn validate_seat(&self, seat_class: &str, row_number: i32, seat_letter: &str) -> bool {
        let Ok(seat_class) = seat_class.trim().parse::<SeatClass>() else {
            return false;
        };
        let Some(config) = self.class(seat_class) else {
            return false;
        };

        if row_number < 1 || row_number > config.rows {
            return false;
        }

        let mut chars = seat_letter.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => config.letters.contains(&letter.to_ascii_uppercase()),
            _ => false,
        }
    }

    /// Every seat of one flight, in cabin order.
    pub fn generate(&self, flight_id: i64) -> Vec<NewSeat> {
        let mut seats = Vec::new();
        for class in &self.classes {
            for row_number in 1..=class.rows {
                for letter in &class.letters {
                    seats.push(NewSeat {
                        flight_id,
                        seat_class: class.seat_class,
                        row_number,
                        seat_letter: letter.to_string(),
                        seat_label: seat_label(row_number, *letter),
                    });
                }
            }
        }
        seats
    }
}

/// Display label of a seat, e.g. `10C`.
pub fn seat_label(row_number: i32, seat_letter: char) -> String {
    format!("{}{}", row_number, seat_letter)
}

/// Split a label like `12a` into `(12, 'A')`.
pub fn parse_seat_label(label: &str) -> Option<(i32, char)> {
    let label = label.trim().to_ascii_uppercase();
    let split = label.find(|c: char| !c.is_ascii_digit())?;
    let (digits, rest) = label.split_at(split);
    let mut letters = rest.chars();
    let letter = letters.next()?;
    if digits.is_empty() || !letter.is_ascii_uppercase() || letters.next().is_some() {
        return None;
    }
    Some((digits.parse().ok()?, letter))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeat {
    pub flight_id: i64,
    pub seat_class: SeatClass,
    pub row_number: i32,
    pub seat_letter: String,
    pub seat_label: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Seat {
    pub id: i64,
    pub flight_id: i64,
    pub seat_class: SeatClass,
    pub row_number: i32,
    pub seat_letter: String,
    pub seat_label: String,
}

// Seat as rendered in booking forms: "1A (BUS)"
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct AvailableSeat {
    pub id: i64,
    pub seat_class: SeatClass,
    pub row_number: i32,
    pub seat_letter: String,
    pub display_name: String,
}

#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct SeatMapEntry {
    pub id: i64,
    pub seat_class: SeatClass,
    pub row_number: i32,
    pub seat_letter: String,
    pub seat_label: String,
    pub occupied: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SeatCheckQuery {
    pub seat_class: String,
    pub row_number: i32,
    pub seat_letter: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SeatCheckResponse {
    pub seat_id: i64,
    pub seat_label: String,
    pub available: bool,
}

/// Occupancy of one class on one flight.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ClassStatistics {
    pub seat_class: SeatClass,
    pub total: i64,
    pub booked: i64,
    pub available: i64,
    #[schemars(with = "String")]
    pub percentage: Decimal,
}

impl ClassStatistics {
    pub fn new(seat_class: SeatClass, total: i64, booked: i64) -> Self {
        ClassStatistics {
            seat_class,
            total,
            booked,
            available: total - booked,
            percentage: occupancy_percentage(booked, total),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SeatStatisticsResponse {
    pub flight_id: i64,
    pub classes: Vec<ClassStatistics>,
}

/// booked / total as a percentage with two decimals; 0 for an empty class.
pub fn occupancy_percentage(booked: i64, total: i64) -> Decimal {
    let mut percentage = if total <= 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(booked) * Decimal::from(100) / Decimal::from(total)).round_dp(2)
    };
    percentage.rescale(2);
    percentage
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_layout_generates_fixed_grid() {
        let seats = SeatLayout::default().generate(7);
        assert_eq!(seats.len(), 52);

        let business: Vec<_> = seats.iter().filter(|s| s.seat_class == SeatClass::Bus).collect();
        let economy: Vec<_> = seats.iter().filter(|s| s.seat_class == SeatClass::Eco).collect();
        assert_eq!(business.len(), 12);
        assert_eq!(economy.len(), 40);
        assert!(business.iter().all(|s| (1..=3).contains(&s.row_number)));
        assert!(economy.iter().all(|s| (1..=10).contains(&s.row_number)));

        let triples: HashSet<_> = seats
            .iter()
            .map(|s| (s.seat_class, s.row_number, s.seat_letter.clone()))
            .collect();
        assert_eq!(triples.len(), seats.len());
        assert!(seats.iter().all(|s| s.flight_id == 7));
        assert_eq!(seats[0].seat_label, "1A");
        assert_eq!(seats.last().map(|s| s.seat_label.as_str()), Some("10D"));
    }

    #[test]
    fn validate_seat_checks_class_row_and_letter() {
        let layout = SeatLayout::default();
        assert!(layout.validate_seat("BUS", 1, "A"));
        assert!(layout.validate_seat("ECO", 10, "D"));
        assert!(layout.validate_seat("eco", 5, "c"));
        assert!(!layout.validate_seat("BUS", 4, "A"));
        assert!(!layout.validate_seat("BUS", 0, "A"));
        assert!(!layout.validate_seat("ECO", 1, "Z"));
        assert!(!layout.validate_seat("ECO", 1, "AB"));
        assert!(!layout.validate_seat("FIRST", 1, "A"));
    }

    #[test]
    fn percentage_is_rounded_to_two_decimals() {
        assert_eq!(occupancy_percentage(0, 12).to_string(), "0.00");
        assert_eq!(occupancy_percentage(6, 12).to_string(), "50.00");
        assert_eq!(occupancy_percentage(1, 3).to_string(), "33.33");
        assert_eq!(occupancy_percentage(0, 0), Decimal::ZERO);
    }

    #[test]
    fn parses_seat_labels() {
        assert_eq!(parse_seat_label("2b"), Some((2, 'B')));
        assert_eq!(parse_seat_label(" 10C "), Some((10, 'C')));
        assert_eq!(parse_seat_label("C10"), None);
        assert_eq!(parse_seat_label("10"), None);
        assert_eq!(parse_seat_label("10CD"), None);
    }

    #[test]
    fn class_names_round_trip_through_strum() {
        assert_eq!(SeatClass::Bus.to_string(), "BUS");
        assert_eq!("eco".parse::<SeatClass>().ok(), Some(SeatClass::Eco));
    }
}
