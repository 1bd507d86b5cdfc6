use crate::context::WinContext;
use crate::engine::best_score;
use crate::error::ScoreError;
use crate::hand::HandState;
use crate::meld::Meld;
use crate::rules::GROUPS_PER_HAND;
use crate::tile::Tile;
use crate::{CategoryEntry, MeldSpec, MeldType, ScoreRequest, ScoreResult};

pub fn score(req: &ScoreRequest) -> Result<ScoreResult, ScoreError> {
    let concealed = parse_all(&req.concealed)?;
    let win_tile = parse_one(&req.win_tile)?;
    if !concealed.contains(&win_tile) {
        return Err(ScoreError::Parse {
            input: req.win_tile.clone(),
            message: "winning tile is not among the concealed tiles".into(),
        });
    }

    let mut hand = HandState::with_concealed(&concealed);
    for m in &req.melds {
        hand.reveal(meld_from_spec(m)?);
    }
    for code in &req.flowers {
        hand.add_flower(parse_one(code)?)
            .map_err(|e| ScoreError::Parse {
                input: code.clone(),
                message: e.to_string(),
            })?;
    }

    // 副露1組ごとに手牌は3枚減る（槓も1組）
    let expected = 3 * (GROUPS_PER_HAND - hand.revealed_group_count().min(GROUPS_PER_HAND)) + 2;
    if hand.revealed_group_count() > GROUPS_PER_HAND || concealed.len() != expected {
        return Err(ScoreError::Parse {
            input: format!("{} concealed, {} melds", concealed.len(), req.melds.len()),
            message: format!("expected {} concealed tiles for the given melds", expected),
        });
    }

    let ctx = WinContext {
        prevailing_wind: req.prevailing_wind,
        dealer_seat: req.dealer_seat,
        winner_seat: req.winner_seat,
        loser_seat: req.loser_seat,
        win_tile,
        tiles_left: req.tiles_left,
        discards: parse_all(&req.discards)?,
        multiple_winners: req.multiple_winners,
        dealer_streak: req.dealer_streak,
        last_event: req.last_event,
        discard_count: req.discard_count,
    };

    let best = best_score(&concealed, &hand, &ctx).ok_or(ScoreError::NoWinningShape)?;

    Ok(ScoreResult {
        score: best.score,
        categories: best
            .categories
            .iter()
            .map(|c| CategoryEntry {
                category: c.category,
                name: c.category.chinese_name().to_string(),
                description: c.category.description().to_string(),
                value: c.value,
            })
            .collect(),
        groups: best
            .decomposition
            .canonical_key()
            .iter()
            .map(|g| g.iter().map(Tile::code).collect())
            .collect(),
    })
}

fn parse_one(code: &str) -> Result<Tile, ScoreError> {
    Tile::from_code(code).map_err(|message| ScoreError::Parse {
        input: code.to_string(),
        message,
    })
}

fn parse_all(codes: &[String]) -> Result<Vec<Tile>, ScoreError> {
    codes.iter().map(|c| parse_one(c)).collect()
}

fn meld_from_spec(spec: &MeldSpec) -> Result<Meld, ScoreError> {
    let tiles = parse_all(&spec.tiles)?;
    let shape = Meld::from_tiles(&tiles);

    let meld = match (spec.meld_type, shape) {
        (MeldType::Pong, Some(m @ Meld::Pong(_))) => Some(m),
        (MeldType::Sheung, Some(m @ Meld::Sheung(_))) => Some(m),
        (MeldType::BrightKong, Some(Meld::DarkKong(tile))) => Some(Meld::BrightKong {
            tile,
            self_extended: spec.self_extended,
        }),
        (MeldType::DarkKong, Some(m @ Meld::DarkKong(_))) => Some(m),
        _ => None,
    };

    meld.ok_or_else(|| ScoreError::Parse {
        input: spec.tiles.join(" "),
        message: format!("not a valid {:?}", spec.meld_type),
    })
}
