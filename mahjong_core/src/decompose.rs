use crate::canonical::sort_groups;
use crate::meld::Meld;
use crate::special::detect_special;
use crate::tile::{Tile, TileCounts};
use std::collections::BTreeMap;
use tracing::trace;

/// One way to read a winning concealed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decomposition {
    /// Pair plus pongs/sheungs covering every concealed tile.
    Standard { pair: Tile, melds: Vec<Meld> },
    /// 十六不搭: fifteen unrelated singles and the pair.
    SixteenDisjoint { singles: Vec<Tile>, pair: Tile },
    /// 十三么: twelve orphans, one pong/sheung, and the orphan pair.
    ThirteenOrphans {
        orphans: Vec<Tile>,
        group: Meld,
        pair: Tile,
    },
    /// 嚦咕嚦咕: one pong and seven pairs.
    LikKuLikKu { pong: Tile, pairs: Vec<Tile> },
}

impl Decomposition {
    pub fn is_special(&self) -> bool {
        !matches!(self, Decomposition::Standard { .. })
    }

    /// The raw groups, tiles included, in no particular order.
    pub fn groups(&self) -> Vec<Vec<Tile>> {
        match self {
            Decomposition::Standard { pair, melds } => {
                let mut v: Vec<Vec<Tile>> = melds.iter().map(|m| m.tiles()).collect();
                v.push(vec![*pair; 2]);
                v
            }
            Decomposition::SixteenDisjoint { singles, pair } => {
                vec![singles.clone(), vec![*pair; 2]]
            }
            Decomposition::ThirteenOrphans {
                orphans,
                group,
                pair,
            } => vec![orphans.clone(), group.tiles(), vec![*pair; 2]],
            Decomposition::LikKuLikKu { pong, pairs } => {
                let mut v = vec![vec![*pong; 3]];
                v.extend(pairs.iter().map(|p| vec![*p; 2]));
                v
            }
        }
    }

    /// Dedup key: groups sorted internally, then by size and tile order.
    pub fn canonical_key(&self) -> Vec<Vec<Tile>> {
        let mut g = self.groups();
        sort_groups(&mut g);
        g
    }

    pub fn tile_count(&self) -> usize {
        self.groups().iter().map(|g| g.len()).sum()
    }
}

/// Every distinct reading of `tiles`. Empty when the set is not winning.
/// Special shapes win outright and yield only themselves.
pub fn enumerate_decompositions(tiles: &[Tile]) -> Vec<Decomposition> {
    if let Some(sp) = detect_special(tiles) {
        return vec![sp];
    }

    let counts = match TileCounts::from_tiles(tiles) {
        Some(c) => c,
        None => return vec![],
    };
    if counts.total() % 3 != 2 {
        return vec![];
    }

    let mut found: BTreeMap<Vec<Vec<Tile>>, Decomposition> = BTreeMap::new();

    for (pair, n) in counts.kinds() {
        if n < 2 {
            continue;
        }
        if let Some(rest) = counts.without(pair, 2) {
            let mut melds = vec![];
            dfs_melds(rest, &mut melds, &mut |melds| {
                let d = Decomposition::Standard {
                    pair,
                    melds: melds.to_vec(),
                };
                found.entry(d.canonical_key()).or_insert(d);
            });
        }
    }

    trace!(candidates = found.len(), "enumerated decompositions");
    found.into_values().collect()
}

/// Whether `counts` splits into one pair and any number of pongs/sheungs.
pub fn can_form_groups(counts: TileCounts) -> bool {
    if counts.total() % 3 != 2 {
        return false;
    }
    counts.kinds().any(|(pair, n)| {
        n >= 2
            && counts
                .without(pair, 2)
                .map(can_clear)
                .unwrap_or(false)
    })
}

fn can_clear(counts: TileCounts) -> bool {
    let t = match counts.min_tile() {
        Some(t) => t,
        None => return true,
    };
    if let Some(rest) = counts.without(t, 3) {
        if can_clear(rest) {
            return true;
        }
    }
    match remove_sheung(counts, t) {
        Some(rest) => can_clear(rest),
        None => false,
    }
}

// 残り牌のうち最小の牌を必ず使う。最小牌は刻子か順子の先頭にしかなれない。
fn dfs_melds(counts: TileCounts, melds: &mut Vec<Meld>, emit: &mut dyn FnMut(&[Meld])) {
    let t = match counts.min_tile() {
        Some(t) => t,
        None => {
            emit(melds);
            return;
        }
    };

    // 刻子
    if let Some(rest) = counts.without(t, 3) {
        melds.push(Meld::Pong(t));
        dfs_melds(rest, melds, emit);
        melds.pop();
    }

    // 順子
    if let Some(rest) = remove_sheung(counts, t) {
        melds.push(Meld::Sheung(t));
        dfs_melds(rest, melds, emit);
        melds.pop();
    }
}

fn remove_sheung(counts: TileCounts, starter: Tile) -> Option<TileCounts> {
    let (t2, t3) = (starter.next()?, starter.next2()?);
    counts
        .without(starter, 1)?
        .without(t2, 1)?
        .without(t3, 1)
}
