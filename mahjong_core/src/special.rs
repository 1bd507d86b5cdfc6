use crate::decompose::Decomposition;
use crate::meld::Meld;
use crate::tile::{thirteen_orphans, Tile, TileCounts};

/// Size of a concealed set that can hold a special shape.
pub const SPECIAL_SIZE: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialShape {
    SixteenDisjoint,
    ThirteenOrphans,
    LikKuLikKu,
}

impl SpecialShape {
    pub fn of(d: &Decomposition) -> Option<Self> {
        match d {
            Decomposition::Standard { .. } => None,
            Decomposition::SixteenDisjoint { .. } => Some(SpecialShape::SixteenDisjoint),
            Decomposition::ThirteenOrphans { .. } => Some(SpecialShape::ThirteenOrphans),
            Decomposition::LikKuLikKu { .. } => Some(SpecialShape::LikKuLikKu),
        }
    }
}

/// Checked in table order: 十六不搭, 十三么, 嚦咕嚦咕.
pub fn detect_special(tiles: &[Tile]) -> Option<Decomposition> {
    if tiles.len() != SPECIAL_SIZE {
        return None;
    }
    let counts = TileCounts::from_tiles(tiles)?;

    sixteen_disjoint(&counts)
        .or_else(|| thirteen_orphans_shape(&counts))
        .or_else(|| lik_ku_lik_ku(&counts))
}

fn sixteen_disjoint(counts: &TileCounts) -> Option<Decomposition> {
    let mut pair = None;
    let mut singles = vec![];

    for (t, n) in counts.kinds() {
        match n {
            1 => singles.push(t),
            2 if pair.is_none() => pair = Some(t),
            _ => return None,
        }
    }

    // 同じ数牌で1つ・2つ違いがあれば搭子になる
    let mut held: Vec<Tile> = singles.clone();
    held.extend(pair);
    held.sort();
    for (i, a) in held.iter().enumerate() {
        for b in &held[i + 1..] {
            if a.is_numbered() && a.same_suit(b) && b.num - a.num <= 2 {
                return None;
            }
        }
    }

    Some(Decomposition::SixteenDisjoint {
        singles,
        pair: pair?,
    })
}

fn thirteen_orphans_shape(counts: &TileCounts) -> Option<Decomposition> {
    let orphans = thirteen_orphans();
    let mut rest = *counts;
    for &o in &orphans {
        rest = rest.without(o, 1)?;
    }

    let mut extra: Vec<Tile> = vec![];
    for (t, n) in rest.kinds() {
        extra.extend(std::iter::repeat(t).take(n as usize));
    }

    // 残り4枚のうち3枚で面子、余り1枚が么九牌なら雀頭
    for i in 0..4 {
        for j in i + 1..4 {
            for k in j + 1..4 {
                let group = match Meld::from_tiles(&[extra[i], extra[j], extra[k]]) {
                    Some(m @ (Meld::Pong(_) | Meld::Sheung(_))) => m,
                    _ => continue,
                };
                let left = extra[6 - i - j - k];
                if !orphans.contains(&left) {
                    continue;
                }
                let kept = orphans.iter().copied().filter(|&o| o != left).collect();
                return Some(Decomposition::ThirteenOrphans {
                    orphans: kept,
                    group,
                    pair: left,
                });
            }
        }
    }
    None
}

fn lik_ku_lik_ku(counts: &TileCounts) -> Option<Decomposition> {
    let mut pong = None;
    let mut pairs = vec![];

    for (t, n) in counts.kinds() {
        match n {
            2 => pairs.push(t),
            4 => pairs.extend([t, t]),
            3 if pong.is_none() => pong = Some(t),
            _ => return None,
        }
    }

    Some(Decomposition::LikKuLikKu { pong: pong?, pairs })
}
