use std::time::Instant;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::rules::{PLAYERS, TEAM_SIZE};
use crate::errors::domain::GameError;

/// Index into the join-ordered player list, 0..=3. Turn order is seat
/// order. Only meaningful while the roster is frozen (deal to end of
/// hand); wire payloads always use player ids.
pub type Seat = usize;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TeamId {
    A,
    B,
}

impl TeamId {
    pub const fn other(self) -> TeamId {
        match self {
            TeamId::A => TeamId::B,
            TeamId::B => TeamId::A,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            TeamId::A => 'A',
            TeamId::B => 'B',
        }
    }
}

/// Outcome of a finished hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameWinner {
    Team(TeamId),
    Draw,
}

// Wire form is "A" | "B" | "DRAW".
impl Serialize for GameWinner {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            GameWinner::Team(TeamId::A) => "A",
            GameWinner::Team(TeamId::B) => "B",
            GameWinner::Draw => "DRAW",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for GameWinner {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "A" => Ok(GameWinner::Team(TeamId::A)),
            "B" => Ok(GameWinner::Team(TeamId::B)),
            "DRAW" => Ok(GameWinner::Draw),
            _ => Err(serde::de::Error::custom(format!("Invalid winner: {s}"))),
        }
    }
}

/// Tricks won per team in the current hand.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TrickTally {
    #[serde(rename = "A")]
    pub a: u8,
    #[serde(rename = "B")]
    pub b: u8,
}

impl TrickTally {
    pub const fn team(&self, team: TeamId) -> u8 {
        match team {
            TeamId::A => self.a,
            TeamId::B => self.b,
        }
    }

    pub fn add(&mut self, team: TeamId) {
        match team {
            TeamId::A => self.a += 1,
            TeamId::B => self.b += 1,
        }
    }
}

/// Room progression phases. The terminal phase carries the winner so a
/// finished room without one is unrepresentable.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Players join and pick teams.
    TeamSelection,
    /// Dealer team drawn; waiting for them to pick the dealing player.
    ChoosingDealer,
    /// First half dealt; waiting for the trump-chooser (and, once trump
    /// is declared, for the scheduled second-half deal).
    ChoosingTrump,
    /// Tricks are being played.
    Playing,
    /// Hand finished.
    GameOver { winner: GameWinner },
}

impl Phase {
    pub const fn name(&self) -> &'static str {
        match self {
            Phase::TeamSelection => "TeamSelection",
            Phase::ChoosingDealer => "ChoosingDealer",
            Phase::ChoosingTrump => "ChoosingTrump",
            Phase::Playing => "Playing",
            Phase::GameOver { .. } => "GameOver",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Player {
    pub id: String,
    pub display_name: String,
    pub team: Option<TeamId>,
}

/// The per-room aggregate. All mutation goes through the lifecycle
/// machine; everything here assumes the caller holds the room lock.
#[derive(Debug, Clone)]
pub struct RoomState {
    pub code: String,
    pub phase: Phase,
    /// Join-ordered players, max 4.
    pub players: Vec<Player>,
    pub dealer_team: Option<TeamId>,
    pub dealer: Option<Seat>,
    pub trump_chooser: Option<Seat>,
    pub trump: Option<Suit>,
    /// Per-seat hands, aligned with `players`.
    pub hands: [Vec<Card>; PLAYERS],
    /// Undealt remainder of the shuffled deck between the two deal halves.
    pub draw_pile: Vec<Card>,
    /// Ordered plays of the trick in progress (seat, card).
    pub trick_plays: Vec<(Seat, Card)>,
    /// Lead suit of the trick in progress.
    pub trick_lead: Option<Suit>,
    /// Last completed trick, kept for display until the clear pause runs.
    pub last_trick: Option<Vec<(Seat, Card)>>,
    pub turn: Option<Seat>,
    pub trick_leader: Option<Seat>,
    /// Completed tricks this hand, 0..=8.
    pub rounds_played: u8,
    pub tricks_won: TrickTally,
    /// Bumped on every phase transition and hand reset; scheduled
    /// continuations capture it and no-op on mismatch.
    pub epoch: u64,
    /// For the registry's idle sweep.
    pub last_action_at: Instant,
}

impl RoomState {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            phase: Phase::TeamSelection,
            players: Vec::with_capacity(PLAYERS),
            dealer_team: None,
            dealer: None,
            trump_chooser: None,
            trump: None,
            hands: Default::default(),
            draw_pile: Vec::new(),
            trick_plays: Vec::with_capacity(PLAYERS),
            trick_lead: None,
            last_trick: None,
            turn: None,
            trick_leader: None,
            rounds_played: 0,
            tricks_won: TrickTally::default(),
            epoch: 0,
            last_action_at: Instant::now(),
        }
    }

    pub fn seat_of(&self, player_id: &str) -> Option<Seat> {
        self.players.iter().position(|p| p.id == player_id)
    }

    pub fn player_id(&self, seat: Seat) -> &str {
        &self.players[seat].id
    }

    pub fn roster(&self, team: TeamId) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.team == Some(team))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= PLAYERS
    }

    pub fn ready_to_start(&self) -> bool {
        self.players.len() == PLAYERS
            && self.roster(TeamId::A).len() == TEAM_SIZE
            && self.roster(TeamId::B).len() == TEAM_SIZE
    }

    pub fn winner(&self) -> Option<GameWinner> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    pub fn touch(&mut self) {
        self.last_action_at = Instant::now();
    }

    /// Clear everything belonging to the hand in progress and return to
    /// TeamSelection. Players keep their seats and team choices.
    pub fn reset_hand(&mut self) {
        self.phase = Phase::TeamSelection;
        self.dealer_team = None;
        self.dealer = None;
        self.trump_chooser = None;
        self.trump = None;
        for hand in &mut self.hands {
            hand.clear();
        }
        self.draw_pile.clear();
        self.trick_plays.clear();
        self.trick_lead = None;
        self.last_trick = None;
        self.turn = None;
        self.trick_leader = None;
        self.rounds_played = 0;
        self.tricks_won = TrickTally::default();
        self.bump_epoch();
    }

    /// Remove a player, keeping `hands` aligned with the shrunk list.
    pub fn remove_player(&mut self, seat: Seat) -> Player {
        let player = self.players.remove(seat);
        self.hands[seat].clear();
        self.hands[seat..].rotate_left(1);
        player
    }
}

/// Seat / turn math (4 fixed seats: 0..=3).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % PLAYERS
}

/// Returns the seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: usize) -> Seat {
    (start + n) % PLAYERS
}

pub fn require_turn(state: &RoomState, ctx: &'static str) -> Result<Seat, GameError> {
    state
        .turn
        .ok_or_else(|| GameError::invariant(format!("turn must be set ({ctx})")))
}

pub fn require_dealer(state: &RoomState, ctx: &'static str) -> Result<Seat, GameError> {
    state
        .dealer
        .ok_or_else(|| GameError::invariant(format!("dealer must be set ({ctx})")))
}

pub fn require_dealer_team(state: &RoomState, ctx: &'static str) -> Result<TeamId, GameError> {
    state
        .dealer_team
        .ok_or_else(|| GameError::invariant(format!("dealer_team must be set ({ctx})")))
}

pub fn require_trump(state: &RoomState, ctx: &'static str) -> Result<Suit, GameError> {
    state
        .trump
        .ok_or_else(|| GameError::invariant(format!("trump must be set ({ctx})")))
}

pub fn require_trump_chooser(state: &RoomState, ctx: &'static str) -> Result<Seat, GameError> {
    state
        .trump_chooser
        .ok_or_else(|| GameError::invariant(format!("trump_chooser must be set ({ctx})")))
}
