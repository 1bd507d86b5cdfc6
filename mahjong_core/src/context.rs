use crate::tile::{Tile, Wind};
use serde::{Deserialize, Serialize};

/// What happened right before the winning tile arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LastEvent {
    #[default]
    Discard,
    Flower,
    Kong,
    DoubleKong,
    RobbedKong,
    KongAfterRobbedKong,
}

/// Situation of a win. Seats are absolute; the head seat of the round is East
/// at its own table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinContext {
    pub prevailing_wind: Wind,
    pub dealer_seat: Wind,
    pub winner_seat: Wind,
    /// Same as `winner_seat` on a self-draw.
    pub loser_seat: Wind,
    pub win_tile: Tile,
    /// Undrawn tiles, the reserved tail included.
    pub tiles_left: u32,
    pub discards: Vec<Tile>,
    pub multiple_winners: bool,
    pub dealer_streak: u32,
    pub last_event: LastEvent,
    /// Discards made since the round started.
    pub discard_count: u32,
}

impl WinContext {
    /// Self-draw win with no special circumstances, deep in the wall.
    pub fn self_draw(seat: Wind, win_tile: Tile) -> Self {
        WinContext {
            prevailing_wind: Wind::East,
            dealer_seat: Wind::East,
            winner_seat: seat,
            loser_seat: seat,
            win_tile,
            tiles_left: 60,
            discards: vec![],
            multiple_winners: false,
            dealer_streak: 0,
            last_event: LastEvent::Discard,
            discard_count: 20,
        }
    }

    /// Win off `loser`'s discard, otherwise like [`WinContext::self_draw`].
    pub fn claimed(winner: Wind, loser: Wind, win_tile: Tile) -> Self {
        WinContext {
            loser_seat: loser,
            ..Self::self_draw(winner, win_tile)
        }
    }

    pub fn is_self_draw(&self) -> bool {
        self.winner_seat == self.loser_seat
    }

    /// Winner's wind at this table.
    pub fn table_wind(&self) -> Wind {
        self.winner_seat.relative_to(self.dealer_seat)
    }

    pub fn dealer_involved(&self) -> bool {
        self.winner_seat == self.dealer_seat || self.loser_seat == self.dealer_seat
    }
}
