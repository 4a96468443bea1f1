//! Deck construction and the two-phase deal.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::cards_types::{Card, Rank, Suit};
use crate::domain::rules::{DECK_CARDS, PLAYERS};
use crate::errors::domain::GameError;

/// The canonical 32-card deck in build order.
pub fn full_deck() -> Vec<Card> {
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
    let ranks = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    let mut deck = Vec::with_capacity(DECK_CARDS);
    for suit in suits {
        for rank in ranks {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Build a fresh deck and shuffle it with a uniform permutation.
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = full_deck();
    deck.shuffle(rng);
    deck
}

/// Split `cards_each` cards per seat off the front of the pile,
/// consecutive prefixes in seat order. The pile shrinks by exactly
/// `PLAYERS * cards_each`.
pub fn deal_to_each(
    pile: &mut Vec<Card>,
    cards_each: usize,
) -> Result<[Vec<Card>; PLAYERS], GameError> {
    let needed = PLAYERS * cards_each;
    if pile.len() < needed {
        return Err(GameError::invariant(format!(
            "draw pile has {} cards, dealing needs {needed}",
            pile.len()
        )));
    }

    let mut packets: [Vec<Card>; PLAYERS] = Default::default();
    for packet in packets.iter_mut() {
        *packet = pile.drain(..cards_each).collect();
    }
    Ok(packets)
}
