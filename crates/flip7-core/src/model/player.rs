use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat index of a player at the table, stable for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(usize);

impl PlayerId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for PlayerId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    id: PlayerId,
    hand: Hand,
    is_bust: bool,
    has_stood: bool,
    game_score: u32,
}

impl PlayerState {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: Hand::new(),
            is_bust: false,
            has_stood: false,
            game_score: 0,
        }
    }

    /// Builds a player mid-game, e.g. to evaluate a strategy against a
    /// constructed position.
    pub fn from_parts(id: PlayerId, hand: Hand, game_score: u32) -> Self {
        Self {
            id,
            hand,
            is_bust: false,
            has_stood: false,
            game_score,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn is_bust(&self) -> bool {
        self.is_bust
    }

    pub fn has_stood(&self) -> bool {
        self.has_stood
    }

    /// Still taking decisions this round.
    pub fn is_active(&self) -> bool {
        !self.is_bust && !self.has_stood
    }

    pub fn game_score(&self) -> u32 {
        self.game_score
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub(crate) fn mark_bust(&mut self) {
        self.is_bust = true;
    }

    pub(crate) fn mark_stood(&mut self) {
        self.has_stood = true;
    }

    pub(crate) fn add_game_points(&mut self, points: u32) {
        self.game_score += points;
    }

    pub(crate) fn reset_round(&mut self) {
        self.hand.clear();
        self.is_bust = false;
        self.has_stood = false;
    }
}
