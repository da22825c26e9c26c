use flip7_core::model::hand::Hand;
use flip7_core::model::shoe::RemainingCounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandSummary {
    pub distinct: usize,
    /// Score if the round ended now, without the Flip 7 bonus.
    pub running_score: u32,
}

impl HandSummary {
    pub fn of(hand: &Hand) -> Self {
        Self {
            distinct: hand.distinct_numbers(),
            running_score: hand.running_score(),
        }
    }
}

pub fn bust_risk(held_mask: u16, remaining: &RemainingCounts) -> Option<f64> {
    let total = remaining.total();
    if total == 0 {
        return None;
    }
    let busting: u32 = remaining
        .iter()
        .filter(|&(value, _)| held_mask & (1 << value) != 0)
        .map(|(_, count)| count)
        .sum();
    Some(f64::from(busting) / f64::from(total))
}

#[cfg(test)]
mod tests {
    use super::{HandSummary, bust_risk};
    use flip7_core::model::card::Card;
    use flip7_core::model::hand::Hand;
    use flip7_core::model::shoe::RemainingCounts;

    #[test]
    fn risk_counts_cards_matching_held_values() {
        let cards = [Card::Number(5), Card::Number(5), Card::Number(6), Card::Number(9)];
        let remaining = RemainingCounts::from_cards(cards.iter());
        let hand = Hand::with_cards(vec![Card::Number(5), Card::Multiplier]);
        assert_eq!(bust_risk(hand.number_mask(), &remaining), Some(0.5));
    }

    #[test]
    fn empty_hand_has_no_risk() {
        let cards = [Card::Number(1), Card::Number(2)];
        let remaining = RemainingCounts::from_cards(cards.iter());
        assert_eq!(bust_risk(0, &remaining), Some(0.0));
    }

    #[test]
    fn no_remaining_numbers_has_undefined_risk() {
        let remaining = RemainingCounts::default();
        assert_eq!(bust_risk(0b111, &remaining), None);
    }

    #[test]
    fn summary_reports_distinct_values_and_running_score() {
        let hand = Hand::with_cards(vec![
            Card::Number(3),
            Card::Number(8),
            Card::Modifier(1),
            Card::Multiplier,
        ]);
        assert_eq!(
            HandSummary::of(&hand),
            HandSummary {
                distinct: 2,
                running_score: 24,
            }
        );
    }
}
