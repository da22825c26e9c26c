use crate::model::card::{Card, MAX_NUMBER};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Cards in a fresh deck: 79 numbers, 6 modifiers and one multiplier.
pub const STANDARD_DECK_SIZE: usize = 86;

const MODIFIER_COPIES: usize = 2;

/// How many copies of a Number value a fresh deck holds.
pub const fn copies_of(value: u8) -> usize {
    match value {
        0 | 1 => 1,
        v if v <= MAX_NUMBER => v as usize,
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);
        for value in 0..=MAX_NUMBER {
            for _ in 0..copies_of(value) {
                cards.push(Card::Number(value));
            }
        }
        for bonus in Card::MODIFIER_BONUSES {
            for _ in 0..MODIFIER_COPIES {
                cards.push(Card::Modifier(bonus));
            }
        }
        cards.push(Card::Multiplier);
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::{Deck, STANDARD_DECK_SIZE, copies_of};
    use crate::model::card::Card;

    #[test]
    fn standard_deck_has_86_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), STANDARD_DECK_SIZE);

        let numbers = deck.cards().iter().filter(|c| c.is_number()).count();
        let modifiers = deck
            .cards()
            .iter()
            .filter(|c| matches!(c, Card::Modifier(_)))
            .count();
        let multipliers = deck.cards().iter().filter(|c| c.is_multiplier()).count();
        assert_eq!((numbers, modifiers, multipliers), (79, 6, 1));
    }

    #[test]
    fn number_copies_follow_face_value() {
        let deck = Deck::standard();
        for value in 0..=12u8 {
            let found = deck
                .cards()
                .iter()
                .filter(|c| c.number_value() == Some(value))
                .count();
            assert_eq!(found, copies_of(value), "value {value}");
        }
        assert_eq!(copies_of(0), 1);
        assert_eq!(copies_of(1), 1);
        assert_eq!(copies_of(12), 12);
        assert_eq!(copies_of(13), 0);
    }

    #[test]
    fn each_modifier_appears_twice() {
        let deck = Deck::standard();
        for bonus in Card::MODIFIER_BONUSES {
            let found = deck
                .cards()
                .iter()
                .filter(|&&c| c == Card::Modifier(bonus))
                .count();
            assert_eq!(found, 2, "+{bonus}");
        }
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffling_preserves_the_multiset() {
        let mut expected = Deck::standard().into_cards();
        let mut shuffled = Deck::shuffled_with_seed(7).into_cards();
        let key = |c: &Card| match *c {
            Card::Number(v) => (0u8, v),
            Card::Modifier(b) => (1, b),
            Card::Multiplier => (2, 0),
        };
        expected.sort_by_key(key);
        shuffled.sort_by_key(key);
        assert_eq!(expected, shuffled);
    }
}
