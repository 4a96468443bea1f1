use tracing::{debug, info};

use super::GameFlowService;
use crate::domain::cards_types::Card;
use crate::domain::snapshot::team_rosters;
use crate::domain::state::Phase;
use crate::domain::tricks;
use crate::errors::domain::GameError;
use crate::protocol::Event;

impl GameFlowService {
    /// Play a card for the acting player. Legality (phase, turn,
    /// ownership, follow-suit) is enforced by the trick logic; a
    /// rejection leaves the trick untouched.
    pub fn play_card(&self, player_id: &str, room_code: &str, card: Card) -> Result<(), GameError> {
        let room = self.inner.registry.get(room_code)?;
        let mut state = room.state.lock();

        let seat = state
            .seat_of(player_id)
            .ok_or_else(|| GameError::not_in_room(player_id))?;
        let outcome = tricks::play_card(&mut state, seat, card)?;
        state.touch();
        debug!(room = %state.code, player = %player_id, card = %card, "Card played");

        let next_turn = outcome.next_turn.map(|s| state.player_id(s).to_string());
        self.send_to_room(
            &state,
            Event::CardPlayed {
                player_id: player_id.to_string(),
                card,
                next_turn,
            },
        );

        if let Some(trick) = outcome.completed {
            let winner_id = state.player_id(trick.winner).to_string();
            info!(
                room = %state.code,
                winner = %winner_id,
                tricks = state.rounds_played,
                "Trick resolved"
            );
            self.send_to_room(
                &state,
                Event::TrickResolved {
                    winner: winner_id,
                    winning_team: trick.winning_team,
                    tricks_won: trick.tricks_won,
                },
            );

            match trick.game_over {
                Some(winner) => {
                    info!(room = %state.code, winner = ?winner, "Hand over");
                    self.send_to_room(
                        &state,
                        Event::GameOver {
                            winner,
                            tricks_won: trick.tricks_won,
                        },
                    );
                }
                None => {
                    // Leave the finished trick on display for a moment.
                    self.schedule_trick_clear(&room, state.epoch, state.rounds_played);
                }
            }
        }

        self.broadcast_state(&state);
        Ok(())
    }

    /// Remove the player from any room they sit in.
    ///
    /// A hand cannot continue three-handed, so a room mid-hand falls
    /// back to TeamSelection; remaining players keep their seats and
    /// team choices. Rooms left empty are dropped. Unknown ids are a
    /// no-op.
    pub fn disconnect(&self, player_id: &str) {
        for room in self.inner.registry.all() {
            let mut state = room.state.lock();
            let Some(seat) = state.seat_of(player_id) else {
                continue;
            };

            let player = state.remove_player(seat);
            state.touch();
            info!(room = %state.code, player = %player_id, "Player left");
            self.send_to_room(
                &state,
                Event::PlayerLeft {
                    player_id: player.id,
                    display_name: player.display_name,
                },
            );

            if state.players.is_empty() {
                let code = state.code.clone();
                drop(state);
                self.inner.registry.remove(&code);
                continue;
            }

            if matches!(
                state.phase,
                Phase::ChoosingDealer | Phase::ChoosingTrump | Phase::Playing
            ) {
                let from = state.phase.name();
                state.reset_hand();
                debug!(room = %state.code, from, "Hand aborted, back to TeamSelection");
            }
            self.send_to_room(
                &state,
                Event::TeamsUpdated {
                    teams: team_rosters(&state),
                },
            );
            self.broadcast_state(&state);
        }
    }
}
