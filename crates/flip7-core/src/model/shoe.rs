use crate::model::card::{Card, NUMBER_VALUES};
use crate::model::deck::Deck;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Undealt Number cards keyed by face value. Modifier and multiplier cards
/// are never counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemainingCounts {
    counts: [u32; NUMBER_VALUES],
}

impl RemainingCounts {
    pub fn from_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut counts = [0u32; NUMBER_VALUES];
        for value in cards.into_iter().filter_map(|card| card.number_value()) {
            counts[value as usize] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, value: u8) -> u32 {
        self.counts.get(value as usize).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// `(value, count)` pairs for every Number value, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(value, &count)| (value as u8, count))
    }
}

/// Draw pile plus discard pile. Cards are drawn from the front of the draw
/// pile; an empty draw pile is refilled from the discards.
#[derive(Debug, Clone, Default)]
pub struct Shoe {
    cards: Vec<Card>,
    next: usize,
    discard: Vec<Card>,
}

impl Shoe {
    pub fn new(deck: Deck) -> Self {
        Self {
            cards: deck.into_cards(),
            next: 0,
            discard: Vec::new(),
        }
    }

    /// Replaces the draw pile with `deck` and empties the discard pile.
    pub fn refill(&mut self, deck: Deck) {
        self.cards = deck.into_cards();
        self.next = 0;
        self.discard.clear();
    }

    pub fn draw<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.remaining().is_empty() {
            self.reshuffle(rng);
        }
        let card = self.cards.get(self.next).copied()?;
        self.next += 1;
        Some(card)
    }

    /// Moves every discarded card into the draw pile and shuffles it.
    pub fn reshuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.drain(..self.next);
        self.next = 0;
        self.cards.append(&mut self.discard);
        self.cards.shuffle(rng);
    }

    pub fn discard(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard.extend(cards);
    }

    /// Undealt cards, next draw first.
    pub fn remaining(&self) -> &[Card] {
        &self.cards[self.next..]
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn remaining_counts(&self) -> RemainingCounts {
        RemainingCounts::from_cards(self.remaining())
    }

    /// True when neither pile can supply another card.
    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_empty() && self.discard.is_empty()
    }
}
