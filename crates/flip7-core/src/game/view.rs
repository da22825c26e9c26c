use crate::model::card::Card;
use crate::model::player::{PlayerId, PlayerState};

/// Read-only view of the table handed to strategies. Holding it borrows the
/// engine immutably, so nothing can change underneath a decision.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    players: &'a [PlayerState],
    deck: &'a [Card],
    discard: &'a [Card],
}

impl<'a> TableView<'a> {
    pub fn new(players: &'a [PlayerState], deck: &'a [Card], discard: &'a [Card]) -> Self {
        Self {
            players,
            deck,
            discard,
        }
    }

    pub fn players(&self) -> &'a [PlayerState] {
        self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&'a PlayerState> {
        self.players.get(id.index())
    }

    pub fn opponents(&self, id: PlayerId) -> impl Iterator<Item = &'a PlayerState> + 'a {
        self.players.iter().filter(move |player| player.id() != id)
    }

    /// Highest cumulative score among everyone but `id`; 0 when alone.
    pub fn max_opponent_score(&self, id: PlayerId) -> u32 {
        self.opponents(id)
            .map(PlayerState::game_score)
            .max()
            .unwrap_or(0)
    }

    /// Undealt cards, next draw first.
    pub fn deck(&self) -> &'a [Card] {
        self.deck
    }

    pub fn discard_pile(&self) -> &'a [Card] {
        self.discard
    }
}
