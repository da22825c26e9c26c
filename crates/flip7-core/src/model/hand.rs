use crate::model::card::{Card, MAX_NUMBER};

/// Cards one player holds during the current round, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Empties the hand and returns what it held.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn holds_number(&self, value: u8) -> bool {
        value <= MAX_NUMBER && self.number_mask() & (1 << value) != 0
    }

    /// Bit `v` is set when a Number card of value `v` is held.
    pub fn number_mask(&self) -> u16 {
        self.cards
            .iter()
            .filter_map(|card| card.number_value())
            .fold(0u16, |mask, value| mask | (1 << value))
    }

    pub fn distinct_numbers(&self) -> usize {
        self.number_mask().count_ones() as usize
    }

    pub fn has_multiplier(&self) -> bool {
        self.cards.iter().any(|card| card.is_multiplier())
    }

    /// Number and modifier points, doubled when the x2 card is held.
    /// Excludes the Flip 7 bonus, which only applies once the round ends.
    pub fn running_score(&self) -> u32 {
        let base: u32 = self.cards.iter().map(|card| card.face_points()).sum();
        if self.has_multiplier() { base * 2 } else { base }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;

    #[test]
    fn add_preserves_draw_order() {
        let mut hand = Hand::new();
        hand.add(Card::Number(9));
        hand.add(Card::Modifier(1));
        hand.add(Card::Number(2));
        assert_eq!(
            hand.cards(),
            &[Card::Number(9), Card::Modifier(1), Card::Number(2)]
        );
    }

    #[test]
    fn distinct_numbers_ignore_modifiers() {
        let hand = Hand::with_cards(vec![
            Card::Number(0),
            Card::Number(12),
            Card::Modifier(3),
            Card::Multiplier,
        ]);
        assert_eq!(hand.distinct_numbers(), 2);
        assert!(hand.holds_number(0));
        assert!(hand.holds_number(12));
        assert!(!hand.holds_number(3));
    }

    #[test]
    fn running_score_doubles_modifiers_with_numbers() {
        let hand = Hand::with_cards(vec![Card::Number(5), Card::Modifier(2), Card::Multiplier]);
        assert_eq!(hand.running_score(), 14);
    }

    #[test]
    fn take_all_leaves_hand_empty() {
        let mut hand = Hand::with_cards(vec![Card::Number(4), Card::Multiplier]);
        let taken = hand.take_all();
        assert_eq!(taken.len(), 2);
        assert!(hand.is_empty());
        assert_eq!(hand.number_mask(), 0);
    }
}
