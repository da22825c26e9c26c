use crate::model::hand::Hand;

/// Distinct Number values needed for a Flip 7.
pub const FLIP7_DISTINCT: usize = 7;

/// Flat bonus for a Flip 7, added after the multiplier and never doubled.
pub const FLIP7_BONUS: u32 = 15;

/// Cumulative score that ends a game.
pub const DEFAULT_TARGET_SCORE: u32 = 200;

pub fn is_flip7(hand: &Hand) -> bool {
    hand.distinct_numbers() == FLIP7_DISTINCT
}

/// Final round score for a hand. Bust hands score nothing.
pub fn round_score(hand: &Hand, is_bust: bool) -> u32 {
    if is_bust {
        return 0;
    }
    let bonus = if is_flip7(hand) { FLIP7_BONUS } else { 0 };
    hand.running_score() + bonus
}
