use rand::Rng;
use tracing::{debug, info};

use super::GameFlowService;
use crate::domain::cards_logic::hand_has_suit;
use crate::domain::cards_types::Suit;
use crate::domain::dealing::{deal_to_each, shuffled_deck};
use crate::domain::rules::{FIRST_DEAL, PLAYERS, SECOND_DEAL};
use crate::domain::state::{
    nth_from, require_dealer, require_dealer_team, require_trump_chooser, Phase, RoomState, Seat,
    TeamId,
};
use crate::errors::domain::GameError;
use crate::protocol::Event;
use crate::registry::Room;

impl GameFlowService {
    /// Draw the dealer team at random and hand the choice of dealing
    /// player to them. Caller holds the room lock and has verified the
    /// room is ready.
    pub(super) fn begin_choosing_dealer(&self, state: &mut RoomState) {
        let dealer_team = {
            let mut rng = self.inner.rng.lock();
            if rng.random_bool(0.5) {
                TeamId::A
            } else {
                TeamId::B
            }
        };

        state.dealer_team = Some(dealer_team);
        state.phase = Phase::ChoosingDealer;
        state.bump_epoch();
        state.touch();
        debug!(
            room = %state.code,
            team = %dealer_team.as_char(),
            "Transition: TeamSelection -> ChoosingDealer"
        );

        self.send_to_room(state, Event::PromptChooseDealer { dealer_team });
        self.broadcast_state(state);
    }

    /// Fix the dealing player and deal the first four cards to everyone.
    ///
    /// Any member of the dealer team may act; the chosen `dealer_id`
    /// must also sit on that team. The trump choice then goes to a
    /// random member of the opposing team, based on first-half cards
    /// only.
    pub fn choose_dealer_player(
        &self,
        player_id: &str,
        room_code: &str,
        dealer_id: &str,
    ) -> Result<(), GameError> {
        let room = self.inner.registry.get(room_code)?;
        let mut state = room.state.lock();

        if !matches!(state.phase, Phase::ChoosingDealer) {
            return Err(GameError::WrongPhase {
                expected: "ChoosingDealer",
                found: state.phase.name(),
            });
        }
        let actor_seat = state
            .seat_of(player_id)
            .ok_or_else(|| GameError::not_in_room(player_id))?;
        let dealer_team = require_dealer_team(&state, "choose_dealer_player")?;
        if state.players[actor_seat].team != Some(dealer_team) {
            return Err(GameError::not_your_turn(
                "only the dealer team picks its dealer",
            ));
        }
        let dealer_seat = state
            .seat_of(dealer_id)
            .ok_or_else(|| GameError::not_in_room(dealer_id))?;
        if state.players[dealer_seat].team != Some(dealer_team) {
            return Err(GameError::not_your_turn(format!(
                "{dealer_id} is not on team {}",
                dealer_team.as_char()
            )));
        }

        let (mut deck, chooser) = {
            let mut rng = self.inner.rng.lock();
            let deck = shuffled_deck(&mut *rng);
            let opponents: Vec<Seat> = (0..PLAYERS)
                .filter(|&s| state.players[s].team != Some(dealer_team))
                .collect();
            let chooser = opponents[rng.random_range(0..opponents.len())];
            (deck, chooser)
        };
        let packets = deal_to_each(&mut deck, FIRST_DEAL)?;

        for (seat, mut hand) in packets.into_iter().enumerate() {
            hand.sort();
            state.hands[seat] = hand;
        }
        state.draw_pile = deck;
        state.dealer = Some(dealer_seat);
        state.trump_chooser = Some(chooser);
        state.phase = Phase::ChoosingTrump;
        state.bump_epoch();
        state.touch();

        info!(
            room = %state.code,
            dealer = %dealer_id,
            chooser = %state.player_id(chooser),
            "First half dealt"
        );
        debug!(room = %state.code, "Transition: ChoosingDealer -> ChoosingTrump");

        for seat in 0..PLAYERS {
            self.send_to_seat(
                &state,
                seat,
                Event::DealtFirstHalf {
                    cards: state.hands[seat].clone(),
                },
            );
        }
        let chooser_id = state.player_id(chooser).to_string();
        self.send_to_player(&state, &chooser_id, Event::PromptChooseTrump);
        self.broadcast_state(&state);
        Ok(())
    }

    /// Declare the trump suit. Only the prompted chooser may act, and
    /// only with a suit present among their first four cards. The rest
    /// of the deck goes out after the reveal pause.
    pub fn choose_trump(
        &self,
        player_id: &str,
        room_code: &str,
        suit: Suit,
    ) -> Result<(), GameError> {
        let room = self.inner.registry.get(room_code)?;
        let mut state = room.state.lock();

        if !matches!(state.phase, Phase::ChoosingTrump) {
            return Err(GameError::WrongPhase {
                expected: "ChoosingTrump",
                found: state.phase.name(),
            });
        }
        if state.trump.is_some() {
            // Declared already; the second-half deal is pending.
            return Err(GameError::WrongPhase {
                expected: "ChoosingTrump",
                found: "DealingSecondHalf",
            });
        }
        let seat = state
            .seat_of(player_id)
            .ok_or_else(|| GameError::not_in_room(player_id))?;
        let chooser = require_trump_chooser(&state, "choose_trump")?;
        if seat != chooser {
            return Err(GameError::not_your_turn(format!(
                "only {} declares trump",
                state.player_id(chooser)
            )));
        }
        if !hand_has_suit(&state.hands[seat], suit) {
            return Err(GameError::invalid_suit(format!(
                "{suit:?} is not among your first four cards"
            )));
        }

        state.trump = Some(suit);
        state.touch();
        info!(room = %state.code, chooser = %player_id, suit = ?suit, "Trump declared");

        self.broadcast_state(&state);
        let epoch = state.epoch;
        drop(state);
        self.schedule_second_half(&room, epoch);
        Ok(())
    }

    /// Delayed continuation of `choose_trump`: deal the remaining four
    /// cards to everyone and open play.
    ///
    /// The lead goes to the first opposing-team player clockwise from
    /// the dealer. No-ops when the room moved on during the pause.
    pub(super) fn deal_second_half(
        &self,
        room: &Room,
        scheduled_epoch: u64,
    ) -> Result<(), GameError> {
        let mut state = room.state.lock();

        if state.epoch != scheduled_epoch
            || !matches!(state.phase, Phase::ChoosingTrump)
            || state.trump.is_none()
        {
            debug!(room = %state.code, "Stale second-half timer ignored");
            return Ok(());
        }

        let packets = deal_to_each(&mut state.draw_pile, SECOND_DEAL)?;
        for (seat, packet) in packets.into_iter().enumerate() {
            self.send_to_seat(
                &state,
                seat,
                Event::DealtSecondHalf {
                    cards: packet.clone(),
                },
            );
            state.hands[seat].extend(packet);
            state.hands[seat].sort();
        }

        let dealer = require_dealer(&state, "deal_second_half")?;
        let dealer_team = require_dealer_team(&state, "deal_second_half")?;
        let opener = (1..PLAYERS)
            .map(|step| nth_from(dealer, step))
            .find(|&s| state.players[s].team != Some(dealer_team))
            .ok_or_else(|| GameError::invariant("no opposing player seated after the dealer"))?;

        state.phase = Phase::Playing;
        state.turn = Some(opener);
        state.trick_leader = Some(opener);
        state.bump_epoch();
        state.touch();

        info!(
            room = %state.code,
            opener = %state.player_id(opener),
            "Second half dealt, play begins"
        );
        debug!(room = %state.code, "Transition: ChoosingTrump -> Playing");

        self.broadcast_state(&state);
        for seat in 0..PLAYERS {
            self.send_to_seat(
                &state,
                seat,
                Event::FullHand {
                    cards: state.hands[seat].clone(),
                },
            );
        }
        Ok(())
    }
}
