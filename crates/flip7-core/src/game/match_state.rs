use crate::game::view::TableView;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::decision::Decision;
use crate::model::player::{PlayerId, PlayerState};
use crate::model::score::{is_flip7, round_score};
use crate::model::shoe::{RemainingCounts, Shoe};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

/// Rules engine for one game: every player's state, the shoe and the
/// generator that shuffles it.
#[derive(Debug, Clone)]
pub struct MatchState {
    players: Vec<PlayerState>,
    shoe: Shoe,
    rng: StdRng,
    seed: u64,
    round_number: u32,
    round_scored: bool,
}

impl MatchState {
    pub fn new(player_count: usize) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(player_count, seed)
    }

    pub fn with_seed(player_count: usize, seed: u64) -> Self {
        let players = (0..player_count)
            .map(|index| PlayerState::new(PlayerId::new(index)))
            .collect();
        Self {
            players,
            shoe: Shoe::default(),
            rng: StdRng::seed_from_u64(seed),
            seed,
            round_number: 0,
            round_scored: false,
        }
    }

    /// Starts from a stacked, unshuffled deck. Reshuffles still use the
    /// seeded generator.
    pub fn with_deck(player_count: usize, deck: Deck, seed: u64) -> Self {
        let mut state = Self::with_seed(player_count, seed);
        state.shoe.refill(deck);
        state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(id.index())
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Gathers every card, held ones included, into a freshly shuffled
    /// standard deck. The discard pile and all hands end up empty.
    pub fn create_deck(&mut self) {
        for player in &mut self.players {
            player.hand_mut().clear();
        }
        let deck = Deck::shuffled(&mut self.rng);
        self.shoe.refill(deck);
    }

    /// Clears hands and round flags. Cards still held go to the discard
    /// pile. Cumulative scores are untouched.
    pub fn start_new_round(&mut self) {
        for player in &mut self.players {
            self.shoe.discard(player.hand_mut().take_all());
            player.reset_round();
        }
        self.round_number += 1;
        self.round_scored = false;
    }

    pub fn deal_initial_card(&mut self) {
        for player in self.players.iter_mut().filter(|p| p.is_active()) {
            if let Some(card) = self.shoe.draw(&mut self.rng) {
                player.hand_mut().add(card);
            }
        }
    }

    pub fn hit(&mut self, id: PlayerId) -> Result<HitOutcome, ActionError> {
        let player = self
            .players
            .get(id.index())
            .ok_or(ActionError::UnknownPlayer(id))?;
        if player.is_bust() {
            return Err(ActionError::AlreadyBust(id));
        }
        if player.has_stood() {
            return Err(ActionError::AlreadyStood(id));
        }

        let Some(card) = self.shoe.draw(&mut self.rng) else {
            return Ok(HitOutcome::NoCard);
        };

        let player = &mut self.players[id.index()];
        if let Some(value) = card.number_value()
            && player.hand().holds_number(value)
        {
            player.mark_bust();
            let mut busted = player.hand_mut().take_all();
            busted.push(card);
            self.shoe.discard(busted);
            return Ok(HitOutcome::Bust(card));
        }

        player.hand_mut().add(card);
        Ok(HitOutcome::Drew(card))
    }

    pub fn stand(&mut self, id: PlayerId) -> Result<(), ActionError> {
        let player = self
            .players
            .get_mut(id.index())
            .ok_or(ActionError::UnknownPlayer(id))?;
        player.mark_stood();
        Ok(())
    }

    pub fn apply(&mut self, id: PlayerId, decision: Decision) -> Result<ActionOutcome, ActionError> {
        match decision {
            Decision::Hit => self.hit(id).map(ActionOutcome::Hit),
            Decision::Stand => self.stand(id).map(|()| ActionOutcome::Stood),
        }
    }

    pub fn has_flip7(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|player| is_flip7(player.hand()))
    }

    /// This round's score for `id`; unknown players score 0.
    pub fn calculate_score(&self, id: PlayerId) -> u32 {
        self.player(id)
            .map(|player| round_score(player.hand(), player.is_bust()))
            .unwrap_or(0)
    }

    pub fn is_round_over(&self) -> bool {
        self.players.iter().any(|p| is_flip7(p.hand()))
            || !self.players.iter().any(PlayerState::is_active)
    }

    /// Adds the finished round's scores to every player's cumulative total.
    /// Each round can be scored once, and only after it is over.
    pub fn score_round(&mut self) -> Result<RoundTally, RoundError> {
        if self.round_scored {
            return Err(RoundError::AlreadyScored {
                round: self.round_number,
            });
        }
        if !self.is_round_over() {
            return Err(RoundError::InProgress {
                round: self.round_number,
            });
        }

        let mut results = Vec::with_capacity(self.players.len());
        for player in &mut self.players {
            let flip7 = is_flip7(player.hand());
            let points = round_score(player.hand(), player.is_bust());
            player.add_game_points(points);
            results.push(PlayerRoundResult {
                id: player.id(),
                round_score: points,
                game_score: player.game_score(),
                flip7,
                bust: player.is_bust(),
            });
        }
        self.round_scored = true;

        Ok(RoundTally {
            round: self.round_number,
            results,
        })
    }

    pub fn cards_remaining(&self) -> RemainingCounts {
        self.shoe.remaining_counts()
    }

    pub fn view(&self) -> TableView<'_> {
        TableView::new(
            &self.players,
            self.shoe.remaining(),
            self.shoe.discard_pile(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Drew(Card),
    /// Duplicate number: the hand and the drawn card went to the discard pile.
    Bust(Card),
    /// Deck and discard pile were both empty.
    NoCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Hit(HitOutcome),
    Stood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),
    #[error("player {0} has already bust this round")]
    AlreadyBust(PlayerId),
    #[error("player {0} has already stood this round")]
    AlreadyStood(PlayerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("round {round} is still in progress")]
    InProgress { round: u32 },
    #[error("round {round} has already been scored")]
    AlreadyScored { round: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRoundResult {
    pub id: PlayerId,
    pub round_score: u32,
    pub game_score: u32,
    pub flip7: bool,
    pub bust: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTally {
    pub round: u32,
    pub results: Vec<PlayerRoundResult>,
}

impl RoundTally {
    /// Player with the highest cumulative score. Ties go to the lowest id.
    pub fn leader(&self) -> Option<&PlayerRoundResult> {
        self.results.iter().fold(None, |best, candidate| match best {
            Some(current) if current.game_score >= candidate.game_score => Some(current),
            _ => Some(candidate),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionError, ActionOutcome, HitOutcome, MatchState, RoundError};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::decision::Decision;
    use crate::model::player::PlayerId;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn stacked(player_count: usize, cards: &[Card]) -> MatchState {
        MatchState::with_deck(player_count, Deck::from_cards(cards.to_vec()), 5)
    }

    #[test]
    fn initial_deal_gives_each_active_player_one_card() {
        let mut state = MatchState::with_seed(3, 9);
        state.create_deck();
        state.start_new_round();
        state.deal_initial_card();

        for player in state.players() {
            assert_eq!(player.hand().len(), 1);
        }
        assert_eq!(state.shoe().remaining().len(), 86 - 3);
        assert_eq!(state.round_number(), 1);
    }

    #[test]
    fn deal_skips_players_who_stood() {
        let mut state = stacked(2, &[Card::Number(4), Card::Number(6)]);
        state.stand(P0).unwrap();
        state.deal_initial_card();
        assert!(state.player(P0).unwrap().hand().is_empty());
        assert_eq!(state.player(P1).unwrap().hand().cards(), &[Card::Number(4)]);
    }

    #[test]
    fn duplicate_number_busts_and_discards_hand() {
        let mut state = stacked(1, &[Card::Number(7), Card::Modifier(2), Card::Number(7)]);
        assert_eq!(state.hit(P0), Ok(HitOutcome::Drew(Card::Number(7))));
        assert_eq!(state.hit(P0), Ok(HitOutcome::Drew(Card::Modifier(2))));
        assert_eq!(state.hit(P0), Ok(HitOutcome::Bust(Card::Number(7))));

        let player = state.player(P0).unwrap();
        assert!(player.is_bust());
        assert!(player.hand().is_empty());
        assert_eq!(
            state.shoe().discard_pile(),
            &[Card::Number(7), Card::Modifier(2), Card::Number(7)]
        );
        assert_eq!(state.calculate_score(P0), 0);
    }

    #[test]
    fn modifiers_never_bust() {
        let mut state = stacked(1, &[Card::Modifier(1), Card::Modifier(1)]);
        state.hit(P0).unwrap();
        assert_eq!(state.hit(P0), Ok(HitOutcome::Drew(Card::Modifier(1))));
        assert!(!state.player(P0).unwrap().is_bust());
    }

    #[test]
    fn hit_rejects_unknown_bust_and_stood_players() {
        let mut state = stacked(2, &[Card::Number(1), Card::Number(1), Card::Number(2)]);
        assert_eq!(
            state.hit(PlayerId::new(5)),
            Err(ActionError::UnknownPlayer(PlayerId::new(5)))
        );

        state.hit(P0).unwrap();
        state.hit(P0).unwrap();
        assert_eq!(state.hit(P0), Err(ActionError::AlreadyBust(P0)));

        state.stand(P1).unwrap();
        assert_eq!(state.hit(P1), Err(ActionError::AlreadyStood(P1)));
        assert_eq!(state.shoe().remaining(), &[Card::Number(2)]);
    }

    #[test]
    fn stand_on_unknown_player_is_an_error_without_side_effects() {
        let mut state = MatchState::with_seed(2, 1);
        assert_eq!(
            state.stand(PlayerId::new(2)),
            Err(ActionError::UnknownPlayer(PlayerId::new(2)))
        );
        assert!(state.players().iter().all(|p| p.is_active()));
    }

    #[test]
    fn hit_with_exhausted_shoe_deals_nothing() {
        let mut state = stacked(1, &[]);
        assert_eq!(state.hit(P0), Ok(HitOutcome::NoCard));
        assert!(state.player(P0).unwrap().is_active());
        assert!(state.player(P0).unwrap().hand().is_empty());
    }

    #[test]
    fn flip7_ends_round_while_others_still_active() {
        let cards: Vec<Card> = (0..=6).map(Card::Number).collect();
        let mut state = stacked(3, &cards);
        for _ in 0..6 {
            state.hit(P0).unwrap();
        }
        assert!(!state.is_round_over());
        state.hit(P0).unwrap();

        assert!(state.has_flip7(P0));
        assert!(state.is_round_over());
        assert!(state.player(P1).unwrap().is_active());
        assert_eq!(state.calculate_score(P0), 21 + 15);
    }

    #[test]
    fn round_over_when_everyone_is_terminal() {
        let mut state = stacked(2, &[Card::Number(3), Card::Number(3)]);
        state.hit(P0).unwrap();
        state.hit(P0).unwrap();
        assert!(!state.is_round_over());
        state.stand(P1).unwrap();
        assert!(state.is_round_over());
    }

    #[test]
    fn apply_dispatches_decisions() {
        let mut state = stacked(1, &[Card::Number(10)]);
        assert_eq!(
            state.apply(P0, Decision::Hit),
            Ok(ActionOutcome::Hit(HitOutcome::Drew(Card::Number(10))))
        );
        assert_eq!(state.apply(P0, Decision::Stand), Ok(ActionOutcome::Stood));
        assert!(state.player(P0).unwrap().has_stood());
    }

    #[test]
    fn score_round_accumulates_once() {
        let mut state = stacked(2, &[Card::Number(5), Card::Number(10), Card::Modifier(3)]);
        state.hit(P0).unwrap();
        state.hit(P0).unwrap();
        state.hit(P0).unwrap();
        assert_eq!(
            state.score_round(),
            Err(RoundError::InProgress { round: 0 })
        );

        state.stand(P0).unwrap();
        state.stand(P1).unwrap();
        let tally = state.score_round().expect("round over");
        assert_eq!(tally.results[0].round_score, 18);
        assert_eq!(tally.results[0].game_score, 18);
        assert_eq!(tally.results[1].round_score, 0);
        assert_eq!(tally.leader().map(|r| r.id), Some(P0));

        assert_eq!(
            state.score_round(),
            Err(RoundError::AlreadyScored { round: 0 })
        );
        assert_eq!(state.player(P0).unwrap().game_score(), 18);
    }

    #[test]
    fn new_round_resets_hands_but_not_scores() {
        let mut state = stacked(1, &[Card::Number(12), Card::Number(12)]);
        state.hit(P0).unwrap();
        state.stand(P0).unwrap();
        state.score_round().unwrap();

        state.start_new_round();
        let player = state.player(P0).unwrap();
        assert!(player.hand().is_empty());
        assert!(player.is_active());
        assert_eq!(player.game_score(), 12);
        assert_eq!(state.round_number(), 1);
        assert_eq!(state.shoe().discard_pile(), &[Card::Number(12)]);
    }

    #[test]
    fn fresh_deck_takes_back_held_cards_in_either_order() {
        for deck_first in [true, false] {
            let mut state = stacked(2, &[Card::Number(9), Card::Number(11), Card::Multiplier]);
            state.deal_initial_card();
            state.hit(P0).unwrap();
            state.stand(P0).unwrap();
            state.stand(P1).unwrap();
            state.score_round().unwrap();

            if deck_first {
                state.create_deck();
                state.start_new_round();
            } else {
                state.start_new_round();
                state.create_deck();
            }

            assert!(state.shoe().discard_pile().is_empty(), "deck_first={deck_first}");
            assert_eq!(state.shoe().remaining().len(), 86);
            assert!(state.players().iter().all(|p| p.hand().is_empty()));
        }
    }

    #[test]
    fn leader_ties_go_to_lowest_id() {
        let mut state = stacked(3, &[Card::Number(4), Card::Number(4), Card::Number(9)]);
        state.deal_initial_card();
        for index in 0..3 {
            state.stand(PlayerId::new(index)).unwrap();
        }
        let tally = state.score_round().unwrap();
        let leader = tally.leader().unwrap();
        assert_eq!(leader.id, PlayerId::new(2));

        let mut tied = stacked(2, &[Card::Number(4), Card::Modifier(2), Card::Modifier(2)]);
        tied.hit(P0).unwrap();
        tied.hit(P1).unwrap();
        tied.hit(P1).unwrap();
        tied.stand(P0).unwrap();
        tied.stand(P1).unwrap();
        let tally = tied.score_round().unwrap();
        assert_eq!(tally.results[0].game_score, tally.results[1].game_score);
        assert_eq!(tally.leader().unwrap().id, P0);
    }

    #[test]
    fn cards_remaining_tracks_undealt_numbers() {
        let mut state = stacked(1, &[Card::Number(2), Card::Number(2), Card::Multiplier]);
        assert_eq!(state.cards_remaining().get(2), 2);
        state.hit(P0).unwrap();
        assert_eq!(state.cards_remaining().get(2), 1);
        assert_eq!(state.cards_remaining().total(), 1);
        assert_eq!(state.view().deck(), &[Card::Number(2), Card::Multiplier]);
    }
}
