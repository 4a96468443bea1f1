use std::mem;

use crate::domain::cards_logic::{card_beats, hand_has_suit};
use crate::domain::cards_types::Card;
use crate::domain::rules::{self, PLAYERS};
use crate::domain::state::{
    next_seat, require_dealer_team, require_trump, require_turn, GameWinner, Phase, RoomState,
    Seat, TeamId, TrickTally,
};
use crate::errors::domain::GameError;

/// A trick that just closed, with everything callers need to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTrick {
    /// The four plays in order (leader first).
    pub plays: Vec<(Seat, Card)>,
    pub winner: Seat,
    pub winning_team: TeamId,
    /// Tally after counting this trick.
    pub tricks_won: TrickTally,
    /// Set when this trick decided the hand.
    pub game_over: Option<GameWinner>,
}

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Seat to act next (None once the hand is decided).
    pub next_turn: Option<Seat>,
    /// Present only on the fourth play of a trick.
    pub completed: Option<CompletedTrick>,
}

/// Compute legal cards the player may play, independent of turn enforcement.
pub fn legal_moves(state: &RoomState, seat: Seat) -> Vec<Card> {
    if !matches!(state.phase, Phase::Playing) {
        return Vec::new();
    }

    let hand = &state.hands[seat];
    if hand.is_empty() {
        return Vec::new();
    }

    // Holding the led suit forces following it. Void hands may play
    // anything; nothing ever forces a trump.
    if let Some(lead) = state.trick_lead {
        if hand_has_suit(hand, lead) {
            let mut v: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead).collect();
            v.sort();
            return v;
        }
    }

    let mut any = hand.clone();
    any.sort();
    any
}

/// Play a card into the current trick, enforcing phase, turn, and
/// suit-following. Resolves the trick on the fourth play and closes the
/// hand when a team reaches its target.
pub fn play_card(state: &mut RoomState, seat: Seat, card: Card) -> Result<PlayOutcome, GameError> {
    if !matches!(state.phase, Phase::Playing) {
        return Err(GameError::WrongPhase {
            expected: "Playing",
            found: state.phase.name(),
        });
    }

    let turn = require_turn(state, "play_card")?;
    if turn != seat {
        return Err(GameError::not_your_turn(format!(
            "it is {}'s turn",
            state.player_id(turn)
        )));
    }

    let pos_opt = state.hands[seat].iter().position(|&c| c == card);
    let Some(pos) = pos_opt else {
        return Err(GameError::card_not_in_hand(card.to_string()));
    };

    let legal = legal_moves(state, seat);
    if !legal.contains(&card) {
        let lead = state.trick_lead.map(|s| s.as_char()).unwrap_or('?');
        return Err(GameError::must_follow_suit(format!(
            "must follow the led suit ({lead})"
        )));
    }

    if state.trick_plays.is_empty() {
        state.trick_lead = Some(card.suit);
        state.trick_leader = Some(seat);
    }

    let removed = state.hands[seat].remove(pos);
    state.trick_plays.push((seat, removed));
    state.turn = Some(next_seat(seat));

    if state.trick_plays.len() < PLAYERS {
        return Ok(PlayOutcome {
            next_turn: state.turn,
            completed: None,
        });
    }

    require_trump(state, "play_card")?;
    let winner = resolve_current_trick(state)
        .ok_or_else(|| GameError::invariant("completed trick did not resolve"))?;
    let winning_team = state.players[winner]
        .team
        .ok_or_else(|| GameError::invariant("winning seat has no team"))?;

    state.tricks_won.add(winning_team);
    state.rounds_played += 1;

    // The closed trick stays visible until the scheduled clear runs.
    let plays = mem::take(&mut state.trick_plays);
    state.last_trick = Some(plays.clone());
    state.trick_lead = None;

    // Winner leads the next trick
    state.turn = Some(winner);
    state.trick_leader = Some(winner);

    let dealer_team = require_dealer_team(state, "play_card")?;
    let game_over = rules::hand_winner(dealer_team, state.tricks_won, state.rounds_played);
    if let Some(result) = game_over {
        state.phase = Phase::GameOver { winner: result };
        state.turn = None;
        state.trick_leader = None;
        state.bump_epoch();
    }

    Ok(PlayOutcome {
        next_turn: state.turn,
        completed: Some(CompletedTrick {
            plays,
            winner,
            winning_team,
            tricks_won: state.tricks_won,
            game_over,
        }),
    })
}

/// Resolve the current trick winner if complete.
pub fn resolve_current_trick(state: &RoomState) -> Option<Seat> {
    if state.trick_plays.len() < PLAYERS {
        return None;
    }
    let lead = state.trick_lead?;
    let trump = state.trump?;

    let mut best_idx = 0usize;
    for i in 1..PLAYERS {
        let (_, card_i) = state.trick_plays[i];
        let (_, card_best) = state.trick_plays[best_idx];
        if card_beats(card_i, card_best, lead, trump) {
            best_idx = i;
        }
    }
    Some(state.trick_plays[best_idx].0)
}
