use crate::tile::Tile;
use std::fmt;

/// Rejected hand-state mutation. The hand is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    /// 手牌にない牌を切ろうとした
    TileNotHeld(Tile),
    /// ポン・カンに必要な枚数が足りない
    NotEnoughTiles { tile: Tile, needed: u8, held: u8 },
    /// 加槓の元になる明刻がない
    NoPongToExtend(Tile),
    NotAFlower(Tile),
    /// 上家の捨て牌と手牌の2枚で順子にならない
    InvalidSheung { claimed: Tile, with: [Tile; 2] },
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::TileNotHeld(t) => write!(f, "tile {} is not in the concealed hand", t),
            HandError::NotEnoughTiles { tile, needed, held } => write!(
                f,
                "need {} concealed copies of {} but hold {}",
                needed, tile, held
            ),
            HandError::NoPongToExtend(t) => write!(f, "no exposed pong of {} to extend", t),
            HandError::NotAFlower(t) => write!(f, "{} is not a flower tile", t),
            HandError::InvalidSheung { claimed, with } => write!(
                f,
                "{} with {} {} is not a sheung",
                claimed, with[0], with[1]
            ),
        }
    }
}

impl std::error::Error for HandError {}

/// Failure of the request-level `score` entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// 牌コード・副露の形が読めない
    Parse { input: String, message: String },
    NoWinningShape,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Parse { input, message } => {
                write!(f, "Parse error on '{}': {}", input, message)
            }
            ScoreError::NoWinningShape => write!(f, "no winning shape"),
        }
    }
}

impl std::error::Error for ScoreError {}

