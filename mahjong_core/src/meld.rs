use crate::tile::Tile;

/// A scoring group. Runs are keyed by their starter tile, sets by their tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Meld {
    Pair(Tile),
    Pong(Tile),
    Sheung(Tile),
    /// `self_extended`: upgraded from an exposed pong rather than claimed whole.
    BrightKong { tile: Tile, self_extended: bool },
    DarkKong(Tile),
}

impl Meld {
    /// Run starting at `starter`, if the two tiles above it exist.
    pub fn sheung(starter: Tile) -> Option<Meld> {
        starter.next2().map(|_| Meld::Sheung(starter))
    }

    /// Build from three or four loose tiles, in any order.
    pub fn from_tiles(tiles: &[Tile]) -> Option<Meld> {
        let mut v = tiles.to_vec();
        v.sort();
        match v.as_slice() {
            [a, b] if a == b => Some(Meld::Pair(*a)),
            [a, b, c] if a == b && b == c => Some(Meld::Pong(*a)),
            [a, b, c] if a.next() == Some(*b) && b.next() == Some(*c) => Some(Meld::Sheung(*a)),
            [a, b, c, d] if a == b && b == c && c == d => Some(Meld::DarkKong(*a)),
            _ => None,
        }
    }

    /// Identifying tile: the set tile, or the starter of a run.
    pub fn tile(&self) -> Tile {
        match *self {
            Meld::Pair(t) | Meld::Pong(t) | Meld::Sheung(t) | Meld::DarkKong(t) => t,
            Meld::BrightKong { tile, .. } => tile,
        }
    }

    pub fn tiles(&self) -> Vec<Tile> {
        let t = self.tile();
        match self {
            Meld::Pair(_) => vec![t; 2],
            Meld::Pong(_) => vec![t; 3],
            Meld::Sheung(_) => {
                let mut v = vec![t];
                v.extend(t.next());
                v.extend(t.next2());
                v
            }
            Meld::BrightKong { .. } | Meld::DarkKong(_) => vec![t; 4],
        }
    }

    pub fn is_pong(&self) -> bool {
        matches!(self, Meld::Pong(_))
    }

    pub fn is_kong(&self) -> bool {
        matches!(self, Meld::BrightKong { .. } | Meld::DarkKong(_))
    }

    /// Pong or kong.
    pub fn is_set(&self) -> bool {
        self.is_pong() || self.is_kong()
    }
}
