use core::fmt;
use serde::{Deserialize, Serialize};

/// Highest face value printed on a Number card.
pub const MAX_NUMBER: u8 = 12;

/// Number of distinct Number values (0 through 12).
pub const NUMBER_VALUES: usize = MAX_NUMBER as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Card {
    Number(u8),
    Modifier(u8),
    Multiplier,
}

impl Card {
    pub const MODIFIER_BONUSES: [u8; 3] = [1, 2, 3];

    pub const fn number(value: u8) -> Option<Self> {
        if value <= MAX_NUMBER {
            Some(Card::Number(value))
        } else {
            None
        }
    }

    pub const fn modifier(bonus: u8) -> Option<Self> {
        match bonus {
            1..=3 => Some(Card::Modifier(bonus)),
            _ => None,
        }
    }

    pub const fn number_value(self) -> Option<u8> {
        match self {
            Card::Number(value) => Some(value),
            _ => None,
        }
    }

    pub const fn is_number(self) -> bool {
        matches!(self, Card::Number(_))
    }

    pub const fn is_multiplier(self) -> bool {
        matches!(self, Card::Multiplier)
    }

    /// Points this card adds before any multiplier is applied.
    pub const fn face_points(self) -> u32 {
        match self {
            Card::Number(value) | Card::Modifier(value) => value as u32,
            Card::Multiplier => 0,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Number(value) => write!(f, "{value}"),
            Card::Modifier(bonus) => write!(f, "+{bonus}"),
            Card::Multiplier => f.write_str("x2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Card;

    #[test]
    fn constructors_reject_out_of_range_values() {
        assert_eq!(Card::number(12), Some(Card::Number(12)));
        assert_eq!(Card::number(13), None);
        assert_eq!(Card::modifier(3), Some(Card::Modifier(3)));
        assert_eq!(Card::modifier(0), None);
        assert_eq!(Card::modifier(4), None);
    }

    #[test]
    fn display_uses_table_notation() {
        assert_eq!(Card::Number(7).to_string(), "7");
        assert_eq!(Card::Modifier(2).to_string(), "+2");
        assert_eq!(Card::Multiplier.to_string(), "x2");
    }

    #[test]
    fn multiplier_has_no_face_points() {
        assert_eq!(Card::Number(9).face_points(), 9);
        assert_eq!(Card::Modifier(3).face_points(), 3);
        assert_eq!(Card::Multiplier.face_points(), 0);
        assert_eq!(Card::Multiplier.number_value(), None);
    }

    #[test]
    fn serializes_with_tagged_layout() {
        let json = serde_json::to_string(&Card::Modifier(2)).expect("serialize");
        assert_eq!(json, r#"{"type":"modifier","value":2}"#);
        let back: Card = serde_json::from_str(r#"{"type":"multiplier"}"#).expect("deserialize");
        assert_eq!(back, Card::Multiplier);
    }
}
