use proptest::prelude::*;

use crate::domain::state::{RoomState, Seat};
use crate::domain::tricks::resolve_current_trick;
use crate::domain::{test_gens, test_prelude};
/// Property-based tests for trick winner resolution
use crate::domain::{Card, Suit};

/// Independent winner oracle: highest trump if any trump was played,
/// otherwise highest card of the led suit. Returns the play index.
fn oracle_trick_winner(plays: &[(Seat, Card)], trump: Suit) -> usize {
    let lead = plays[0].1.suit;
    let candidate_suit = if plays.iter().any(|(_, c)| c.suit == trump) {
        trump
    } else {
        lead
    };
    plays
        .iter()
        .enumerate()
        .filter(|(_, (_, c))| c.suit == candidate_suit)
        .max_by_key(|(_, (_, c))| c.rank)
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn trick_state(plays: &[(Seat, Card)], trump: Suit) -> RoomState {
    let mut state = RoomState::new("PROPS0");
    state.trick_plays = plays.to_vec();
    state.trick_lead = Some(plays[0].1.suit);
    state.trump = Some(trump);
    state
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: Winner oracle cross-check
    /// resolve_current_trick must match an independent oracle implementation.
    #[test]
    fn prop_winner_oracle_cross_check(
        trick_data in test_gens::complete_trick(),
    ) {
        let (_, plays, trump, _) = trick_data;
        let state = trick_state(&plays, trump);

        let winner = resolve_current_trick(&state);
        prop_assert!(winner.is_some(), "Complete trick must have a winner");
        let winner_seat = winner.unwrap();

        let oracle_seat = plays[oracle_trick_winner(&plays, trump)].0;
        prop_assert_eq!(winner_seat, oracle_seat,
            "Winner {:?} must match oracle {:?}. Trump={:?}, plays={:?}",
            winner_seat, oracle_seat, trump, plays);
    }

    /// Property: Trump dominance
    /// When at least one trump card is played, the winner holds the
    /// highest trump in the trick, regardless of the led suit.
    #[test]
    fn prop_highest_trump_wins(
        trick_data in test_gens::complete_trick(),
    ) {
        let (_, plays, trump, _) = trick_data;
        let state = trick_state(&plays, trump);

        let winner_seat = resolve_current_trick(&state).unwrap();
        let winner_card = plays.iter().find(|(s, _)| *s == winner_seat).unwrap().1;

        let trump_cards: Vec<_> = plays.iter().filter(|(_, c)| c.suit == trump).collect();
        if !trump_cards.is_empty() {
            prop_assert_eq!(winner_card.suit, trump,
                "Winner must hold trump when trump was played");
            for (_, card) in &trump_cards {
                prop_assert!(winner_card.rank >= card.rank,
                    "Winner rank {:?} must be >= all trump ranks", winner_card.rank);
            }
        }
    }

    /// Property: Lead suit decides trump-free tricks
    /// With no trump in the trick, the winner holds the highest card of
    /// the led suit; off-suit cards cannot win.
    #[test]
    fn prop_highest_lead_wins_without_trump(
        trick_data in test_gens::complete_trick_without_trump(),
    ) {
        let (_, plays, trump) = trick_data;
        let lead = plays[0].1.suit;
        let state = trick_state(&plays, trump);

        let winner_seat = resolve_current_trick(&state).unwrap();
        let winner_card = plays.iter().find(|(s, _)| *s == winner_seat).unwrap().1;

        prop_assert_eq!(winner_card.suit, lead,
            "Winner must hold the led suit when no trump was played");
        for (_, card) in plays.iter().filter(|(_, c)| c.suit == lead) {
            prop_assert!(winner_card.rank >= card.rank,
                "Winner rank {:?} must be >= all led-suit ranks", winner_card.rank);
        }
    }

    /// Property: Resolution is order-independent among seats
    /// Rotating which seat led (keeping the same card order) never
    /// changes the winning card.
    #[test]
    fn prop_winner_card_ignores_seat_labels(
        trick_data in test_gens::complete_trick(),
        shift in 0usize..4,
    ) {
        let (_, plays, trump, _) = trick_data;
        let rotated: Vec<(Seat, Card)> = plays
            .iter()
            .map(|&(seat, card)| ((seat + shift) % 4, card))
            .collect();

        let state_a = trick_state(&plays, trump);
        let state_b = trick_state(&rotated, trump);

        let winner_a = resolve_current_trick(&state_a).unwrap();
        let winner_b = resolve_current_trick(&state_b).unwrap();

        let card_a = plays.iter().find(|(s, _)| *s == winner_a).unwrap().1;
        let card_b = rotated.iter().find(|(s, _)| *s == winner_b).unwrap().1;
        prop_assert_eq!(card_a, card_b,
            "Same cards in the same order must pick the same winning card");
    }
}
