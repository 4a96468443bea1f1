use std::cmp::Ordering;

use crate::domain::state::{GameWinner, TeamId, TrickTally};

pub const PLAYERS: usize = 4;
pub const TEAM_SIZE: usize = 2;
pub const DECK_CARDS: usize = 32;
pub const HAND_CARDS: usize = 8;
/// Cards dealt to each player before trump is chosen.
pub const FIRST_DEAL: usize = 4;
pub const SECOND_DEAL: usize = HAND_CARDS - FIRST_DEAL;
pub const TRICKS_PER_HAND: u8 = 8;

/// The dealing team must take an outright majority; the other team only
/// needs four.
pub const DEALER_TEAM_TARGET: u8 = 5;
pub const OTHER_TEAM_TARGET: u8 = 4;

/// Win check evaluated after each trick resolution. Returns the hand
/// outcome once one is decided, None while play continues.
pub fn hand_winner(
    dealer_team: TeamId,
    tricks_won: TrickTally,
    rounds_played: u8,
) -> Option<GameWinner> {
    let other_team = dealer_team.other();
    let dealer_tricks = tricks_won.team(dealer_team);
    let other_tricks = tricks_won.team(other_team);

    if dealer_tricks >= DEALER_TEAM_TARGET {
        return Some(GameWinner::Team(dealer_team));
    }
    if other_tricks >= OTHER_TEAM_TARGET {
        return Some(GameWinner::Team(other_team));
    }
    if rounds_played >= TRICKS_PER_HAND {
        // With 5/4 targets a played-out hand is always decided above;
        // the majority rule is still stated in full.
        return Some(match dealer_tricks.cmp(&other_tricks) {
            Ordering::Greater => GameWinner::Team(dealer_team),
            Ordering::Less => GameWinner::Team(other_team),
            Ordering::Equal => GameWinner::Draw,
        });
    }
    None
}
