//! Snapshot API tests covering redaction and phase views.

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::cards_types::{Card, Suit};
use crate::domain::snapshot::{snapshot_for, PhaseSnapshot};
use crate::domain::state::{GameWinner, Phase, Player, RoomState, TeamId, TrickTally};

fn parse_cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).expect("hardcoded valid card tokens")
}

fn card(token: &str) -> Card {
    token.parse::<Card>().expect("hardcoded valid card token")
}

fn seated(id: &str, team: Option<TeamId>) -> Player {
    Player {
        id: id.to_string(),
        display_name: id.to_uppercase(),
        team,
    }
}

fn full_room() -> RoomState {
    let mut state = RoomState::new("SNAP42");
    state.players.push(seated("p0", Some(TeamId::A)));
    state.players.push(seated("p1", Some(TeamId::B)));
    state.players.push(seated("p2", Some(TeamId::A)));
    state.players.push(seated("p3", Some(TeamId::B)));
    state
}

#[test]
fn team_selection_snapshot_lists_players_and_rosters() {
    let mut state = RoomState::new("SNAP42");
    state.players.push(seated("p0", Some(TeamId::A)));
    state.players.push(seated("p1", None));

    let snap = snapshot_for(&state, None);
    assert_eq!(snap.room.room_code, "SNAP42");
    assert_eq!(snap.room.players.len(), 2);
    assert_eq!(snap.room.teams.a, vec!["p0".to_string()]);
    assert!(snap.room.teams.b.is_empty());
    assert!(matches!(snap.phase, PhaseSnapshot::TeamSelection));
    assert_eq!(snap.hand, None);

    let v = serde_json::to_value(&snap).unwrap();
    assert_eq!(v["phase"]["phase"], "teamSelection");
    assert_eq!(v["room"]["roomCode"], "SNAP42");
    assert!(v.get("hand").is_none(), "absent hand must not serialize");
}

#[test]
fn own_hand_attached_sorted_for_seated_viewers_only() {
    let mut state = full_room();
    state.phase = Phase::Playing;
    state.dealer_team = Some(TeamId::A);
    state.dealer = Some(0);
    state.trump = Some(Suit::Hearts);
    state.hands[0] = parse_cards(&["AS", "7C", "KH"]);
    state.hands[1] = parse_cards(&["KD", "9C"]);

    let own = snapshot_for(&state, Some("p0"));
    assert_eq!(own.hand, Some(parse_cards(&["7C", "KH", "AS"])));

    assert_eq!(snapshot_for(&state, None).hand, None);
    assert_eq!(snapshot_for(&state, Some("ghost")).hand, None);
}

#[test]
fn snapshots_never_leak_other_hands() {
    let mut state = full_room();
    state.phase = Phase::Playing;
    state.dealer_team = Some(TeamId::A);
    state.dealer = Some(0);
    state.trump = Some(Suit::Hearts);
    state.hands[0] = parse_cards(&["AS"]);
    state.hands[1] = parse_cards(&["KD"]);

    let json = serde_json::to_string(&snapshot_for(&state, Some("p0"))).unwrap();
    assert!(json.contains("\"AS\""));
    assert!(!json.contains("\"KD\""), "another player's card leaked");
}

#[test]
fn playing_snapshot_reports_trick_by_player_id() {
    let mut state = full_room();
    state.phase = Phase::Playing;
    state.dealer_team = Some(TeamId::A);
    state.dealer = Some(0);
    state.trump = Some(Suit::Spades);
    state.turn = Some(1);
    state.trick_leader = Some(0);
    state.trick_lead = Some(Suit::Diamonds);
    state.trick_plays.push((0, card("TD")));
    state.tricks_won = TrickTally { a: 2, b: 1 };
    state.rounds_played = 3;

    let snap = snapshot_for(&state, None);
    let PhaseSnapshot::Playing(playing) = snap.phase else {
        panic!("Expected Playing phase");
    };
    assert_eq!(playing.trump, Some(Suit::Spades));
    assert_eq!(playing.turn.as_deref(), Some("p1"));
    assert_eq!(playing.trick_leader.as_deref(), Some("p0"));
    assert_eq!(playing.current_trick.len(), 1);
    assert_eq!(playing.current_trick[0].player_id, "p0");
    assert_eq!(playing.rounds_played, 3);

    let v = serde_json::to_value(&playing).unwrap();
    assert_eq!(v["currentTrick"][0]["playerId"], "p0");
    assert_eq!(v["currentTrick"][0]["card"], "TD");
    assert_eq!(v["tricksWon"]["A"], 2);
}

#[test]
fn choosing_trump_snapshot_shows_chooser_and_pending_trump() {
    let mut state = full_room();
    state.phase = Phase::ChoosingTrump;
    state.dealer_team = Some(TeamId::A);
    state.dealer = Some(2);
    state.trump_chooser = Some(1);
    state.trump = Some(Suit::Clubs);

    let snap = snapshot_for(&state, None);
    let PhaseSnapshot::ChoosingTrump(choosing) = snap.phase else {
        panic!("Expected ChoosingTrump phase");
    };
    assert_eq!(choosing.dealer.as_deref(), Some("p2"));
    assert_eq!(choosing.trump_chooser.as_deref(), Some("p1"));
    assert_eq!(choosing.trump, Some(Suit::Clubs));

    let v = serde_json::to_value(&choosing).unwrap();
    assert_eq!(v["trumpChooser"], "p1");
    assert_eq!(v["trump"], "CLUBS");
}

#[test]
fn game_over_snapshot_carries_winner_and_tally() {
    let mut state = full_room();
    state.phase = Phase::GameOver {
        winner: GameWinner::Team(TeamId::B),
    };
    state.tricks_won = TrickTally { a: 3, b: 4 };

    let snap = snapshot_for(&state, None);
    let PhaseSnapshot::GameOver(over) = snap.phase else {
        panic!("Expected GameOver phase");
    };
    assert_eq!(over.winner, GameWinner::Team(TeamId::B));

    let v = serde_json::to_value(&over).unwrap();
    assert_eq!(v["winner"], "B");
    assert_eq!(v["tricksWon"]["B"], 4);
}
