use serde::{Deserialize, Serialize};

pub use category::Category;
pub use context::{LastEvent, WinContext};
pub use decompose::{enumerate_decompositions, Decomposition};
pub use engine::{best_score, ScoredHand};
pub use error::{HandError, ScoreError};
pub use hand::{FlowerBonus, HandState};
pub use meld::Meld;
pub use points::settle;
pub use rules::{score_decomposition, ScoredCategory, Tally};
pub use score::score;
pub use tile::{Suit, Tile, Wind};
pub use win::{is_winning_shape, is_winning_shape_with_claim};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeldType {
    Pong,
    Sheung,
    BrightKong,
    DarkKong,
}

/// A revealed group as sent by a client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MeldSpec {
    #[serde(rename = "type")]
    pub meld_type: MeldType,
    pub tiles: Vec<String>,
    /// Bright kongs only: upgraded from an exposed pong.
    #[serde(default)]
    pub self_extended: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreRequest {
    pub prevailing_wind: Wind,
    pub dealer_seat: Wind,
    pub winner_seat: Wind,
    /// Equal to `winner_seat` on a self-draw.
    pub loser_seat: Wind,

    /// Concealed tiles, the winning tile included.
    pub concealed: Vec<String>,
    pub win_tile: String,

    #[serde(default)]
    pub melds: Vec<MeldSpec>,
    #[serde(default)]
    pub flowers: Vec<String>,

    pub tiles_left: u32,
    #[serde(default)]
    pub discards: Vec<String>,
    #[serde(default)]
    pub multiple_winners: bool,
    #[serde(default)]
    pub dealer_streak: u32,
    #[serde(default)]
    pub last_event: LastEvent,
    pub discard_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category: Category,
    /// 中文名
    pub name: String,
    pub description: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: u32,
    pub categories: Vec<CategoryEntry>,
    /// Concealed groups of the winning reading, as tile codes.
    pub groups: Vec<Vec<String>>,
}

mod canonical;
mod category;
mod context;
mod decompose;
mod engine;
mod error;
mod hand;
mod meld;
mod points;
mod rules;
mod score;
mod special;
mod tile;
mod win;

pub use canonical::{sort_by_rank, sort_groups, sort_tiles};
pub use special::SpecialShape;
pub use tile::{parse_tiles, TileCounts};
