/// Property-based tests for follow-suit legality rules
use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::state::{Phase, RoomState};
use crate::domain::tricks::legal_moves;
use crate::domain::{test_gens, test_prelude, Card, Suit};

const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

fn playing_state(hand: Vec<Card>, lead: Option<Suit>) -> RoomState {
    let mut state = RoomState::new("PROPS0");
    state.phase = Phase::Playing;
    state.hands[0] = hand;
    state.trick_lead = lead;
    state
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: Follow-suit legality
    /// If a hand contains cards of the lead suit, every legal play must be of that suit.
    #[test]
    fn prop_follow_suit_legality(
        lead_suit in test_gens::suit(),
        lead_rank in test_gens::rank(),
        other_cards in test_gens::unique_cards_up_to(7),
    ) {
        // Build hand with at least one card of lead_suit
        let mut hand = vec![Card { suit: lead_suit, rank: lead_rank }];
        for card in other_cards {
            if !(card.suit == lead_suit && card.rank == lead_rank) {
                hand.push(card);
            }
        }
        let lead_count = hand.iter().filter(|c| c.suit == lead_suit).count();

        let state = playing_state(hand, Some(lead_suit));
        let legal = legal_moves(&state, 0);

        for card in &legal {
            prop_assert_eq!(card.suit, lead_suit,
                "Legal play {:?} must be of lead suit {:?}", card, lead_suit);
        }
        prop_assert_eq!(legal.len(), lead_count,
            "Legal moves count must match lead suit cards in hand");
    }

    /// Property: Follow-suit legality (void in lead suit)
    /// If hand has no cards of the lead suit, all cards in hand are legal.
    #[test]
    fn prop_follow_suit_when_void((lead_suit, hand_without) in test_gens::suit().prop_flat_map(|s| {
        (Just(s), test_gens::hand_without_suit(s))
    })) {
        let mut expected = hand_without.clone();
        expected.sort();

        let state = playing_state(hand_without, Some(lead_suit));
        let legal = legal_moves(&state, 0);

        prop_assert_eq!(legal, expected,
            "When void in lead suit, all hand cards must be legal");
    }

    /// Property: Nothing forces a trump
    /// A hand void in the led suit may play any card; holding trumps
    /// never narrows the legal set to them.
    #[test]
    fn prop_trumps_are_never_forced(
        (lead_idx, offset) in (0usize..4, 1usize..4),
        raw_hand in test_gens::hand(),
    ) {
        let lead_suit = SUITS[lead_idx];
        let trump = SUITS[(lead_idx + offset) % 4];
        let hand: Vec<Card> = raw_hand
            .into_iter()
            .filter(|c| c.suit != lead_suit)
            .collect();

        let mut state = playing_state(hand.clone(), Some(lead_suit));
        state.trump = Some(trump);
        let legal = legal_moves(&state, 0);

        for card in &hand {
            prop_assert!(legal.contains(card),
                "Void hand must keep {:?} legal even with trump {:?} held", card, trump);
        }
    }

    /// Property: Legal plays subset
    /// Legal plays must always be a subset of the hand, with no duplicates.
    #[test]
    fn prop_legal_plays_subset(
        hand in test_gens::hand(),
        lead_suit_opt in proptest::option::of(test_gens::suit()),
    ) {
        let state = playing_state(hand.clone(), lead_suit_opt);
        let legal = legal_moves(&state, 0);

        let legal_set: HashSet<Card> = legal.iter().copied().collect();
        prop_assert_eq!(legal_set.len(), legal.len(),
            "Legal plays must have no duplicates");

        for card in &legal {
            prop_assert!(hand.contains(card),
                "Legal play {:?} must be in hand", card);
        }
    }

    /// Property: No legal plays outside the Playing phase
    #[test]
    fn prop_no_moves_outside_playing(
        hand in test_gens::hand(),
        lead_suit_opt in proptest::option::of(test_gens::suit()),
    ) {
        let mut state = playing_state(hand, lead_suit_opt);
        state.phase = Phase::TeamSelection;

        prop_assert!(legal_moves(&state, 0).is_empty(),
            "Only the Playing phase has legal plays");
    }
}
