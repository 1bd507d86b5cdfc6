use crate::canonical::sort_tiles;
use crate::error::HandError;
use crate::meld::Meld;
use crate::tile::{Suit, Tile};
use crate::win::{is_winning_shape, is_winning_shape_with_claim};

/// Result of laying a flower. The turn engine pays new sets/rows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowerBonus {
    /// A new four-position set (one flower per seat position, mixed kinds) was completed.
    pub new_set: bool,
    /// A full season row or plant row was completed.
    pub new_row: bool,
}

/// One player's tiles for the current hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandState {
    concealed: Vec<Tile>,
    /// Pongs and sheungs claimed from discards.
    locked: Vec<Meld>,
    bright_kongs: Vec<Meld>,
    dark_kongs: Vec<Meld>,
    flowers: Vec<Tile>,
    last_drawn: Option<Tile>,
}

impl HandState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concealed(tiles: &[Tile]) -> Self {
        let mut h = Self::new();
        h.concealed = tiles.to_vec();
        sort_tiles(&mut h.concealed);
        h
    }

    pub fn concealed(&self) -> &[Tile] {
        &self.concealed
    }

    pub fn locked(&self) -> &[Meld] {
        &self.locked
    }

    pub fn bright_kongs(&self) -> &[Meld] {
        &self.bright_kongs
    }

    pub fn dark_kongs(&self) -> &[Meld] {
        &self.dark_kongs
    }

    pub fn flowers(&self) -> &[Tile] {
        &self.flowers
    }

    pub fn last_drawn(&self) -> Option<Tile> {
        self.last_drawn
    }

    /// Locked groups plus kongs. Each kong is one group.
    pub fn revealed_group_count(&self) -> usize {
        self.locked.len() + self.bright_kongs.len() + self.dark_kongs.len()
    }

    pub fn kong_count(&self) -> usize {
        self.bright_kongs.len() + self.dark_kongs.len()
    }

    fn held(&self, t: Tile) -> u8 {
        self.concealed.iter().filter(|&&c| c == t).count() as u8
    }

    fn require(&self, t: Tile, needed: u8) -> Result<(), HandError> {
        let held = self.held(t);
        if held < needed {
            return Err(HandError::NotEnoughTiles {
                tile: t,
                needed,
                held,
            });
        }
        Ok(())
    }

    fn take(&mut self, t: Tile, n: u8) {
        for _ in 0..n {
            if let Some(pos) = self.concealed.iter().position(|&c| c == t) {
                self.concealed.remove(pos);
            }
        }
    }

    /// Record an already-formed group, e.g. when rebuilding a hand from a request.
    pub fn reveal(&mut self, meld: Meld) {
        match meld {
            Meld::Pong(_) | Meld::Sheung(_) => self.locked.push(meld),
            Meld::BrightKong { .. } => self.bright_kongs.push(meld),
            Meld::DarkKong(_) => self.dark_kongs.push(meld),
            Meld::Pair(_) => {}
        }
    }

    // ===== 摸打 =====

    pub fn draw(&mut self, tile: Tile) {
        self.concealed.push(tile);
        sort_tiles(&mut self.concealed);
        self.last_drawn = Some(tile);
    }

    pub fn discard(&mut self, tile: Tile) -> Result<(), HandError> {
        if self.held(tile) == 0 {
            return Err(HandError::TileNotHeld(tile));
        }
        self.take(tile, 1);
        Ok(())
    }

    // ===== 碰 =====

    pub fn can_pong(&self, tile: Tile) -> bool {
        self.held(tile) >= 2
    }

    pub fn claim_pong(&mut self, tile: Tile) -> Result<(), HandError> {
        self.require(tile, 2)?;
        self.take(tile, 2);
        self.locked.push(Meld::Pong(tile));
        Ok(())
    }

    // ===== 上 =====

    /// Every distinct sheung `tile` could complete with two concealed tiles,
    /// ascending by starter.
    pub fn sheung_options(&self, tile: Tile) -> Vec<Meld> {
        if !tile.is_numbered() {
            return vec![];
        }
        let mut v = vec![];
        for lo in [tile.num.saturating_sub(2), tile.num.saturating_sub(1), tile.num] {
            if lo == 0 || lo + 2 > 9 {
                continue;
            }
            let starter = Tile::new(tile.suit, lo);
            let others: Vec<Tile> = (lo..lo + 3)
                .filter(|&n| n != tile.num)
                .map(|n| Tile::new(tile.suit, n))
                .collect();
            if others.iter().all(|&o| self.held(o) >= 1) {
                if let Some(m) = Meld::sheung(starter) {
                    if !v.contains(&m) {
                        v.push(m);
                    }
                }
            }
        }
        v
    }

    pub fn claim_sheung(&mut self, tile: Tile, with: [Tile; 2]) -> Result<(), HandError> {
        let meld = match Meld::from_tiles(&[tile, with[0], with[1]]) {
            Some(m @ Meld::Sheung(_)) => m,
            _ => {
                return Err(HandError::InvalidSheung {
                    claimed: tile,
                    with,
                })
            }
        };
        for t in with {
            if self.held(t) == 0 {
                return Err(HandError::TileNotHeld(t));
            }
        }
        for t in with {
            self.take(t, 1);
        }
        self.locked.push(meld);
        Ok(())
    }

    // ===== 槓 =====

    pub fn can_dark_kong(&self, tile: Tile) -> bool {
        self.held(tile) >= 4
    }

    pub fn dark_kong(&mut self, tile: Tile) -> Result<(), HandError> {
        self.require(tile, 4)?;
        self.take(tile, 4);
        self.dark_kongs.push(Meld::DarkKong(tile));
        Ok(())
    }

    /// 加槓: an exposed pong plus the concealed fourth copy.
    pub fn can_extend_kong(&self, tile: Tile) -> bool {
        self.locked.contains(&Meld::Pong(tile)) && self.held(tile) >= 1
    }

    pub fn extend_kong(&mut self, tile: Tile) -> Result<(), HandError> {
        let pos = self
            .locked
            .iter()
            .position(|m| *m == Meld::Pong(tile))
            .ok_or(HandError::NoPongToExtend(tile))?;
        if self.held(tile) == 0 {
            return Err(HandError::TileNotHeld(tile));
        }
        self.take(tile, 1);
        self.locked.remove(pos);
        self.bright_kongs.push(Meld::BrightKong {
            tile,
            self_extended: true,
        });
        Ok(())
    }

    pub fn can_kong_from_discard(&self, tile: Tile) -> bool {
        self.held(tile) >= 3
    }

    pub fn kong_from_discard(&mut self, tile: Tile) -> Result<(), HandError> {
        self.require(tile, 3)?;
        self.take(tile, 3);
        self.bright_kongs.push(Meld::BrightKong {
            tile,
            self_extended: false,
        });
        Ok(())
    }

    // ===== 花 =====

    pub fn add_flower(&mut self, tile: Tile) -> Result<FlowerBonus, HandError> {
        if !tile.is_bonus() {
            return Err(HandError::NotAFlower(tile));
        }
        let (sets, rows) = (count_flower_sets(&self.flowers), count_flower_rows(&self.flowers));
        self.flowers.push(tile);
        sort_tiles(&mut self.flowers);
        Ok(FlowerBonus {
            new_set: count_flower_sets(&self.flowers) != sets,
            new_row: count_flower_rows(&self.flowers) != rows,
        })
    }

    // ===== 和了判定 =====

    pub fn is_winning(&self) -> bool {
        is_winning_shape(&self.concealed)
    }

    pub fn is_winning_with(&self, claimed: Tile) -> bool {
        is_winning_shape_with_claim(&self.concealed, claimed)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// 4枚組: 席の位置(番号 mod 4)がすべて異なり、季と植物が混ざっているもの
fn count_flower_sets(flowers: &[Tile]) -> usize {
    let n = flowers.len();
    let mut count = 0;
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                for l in k + 1..n {
                    let four = [flowers[i], flowers[j], flowers[k], flowers[l]];
                    let mut pos: Vec<u8> = four.iter().map(|t| t.num % 4).collect();
                    pos.sort();
                    pos.dedup();
                    let one_kind = four.iter().all(|t| t.suit == four[0].suit);
                    if pos.len() == 4 && !one_kind {
                        count += 1;
                    }
                }
            }
        }
    }
    count
}

fn count_flower_rows(flowers: &[Tile]) -> usize {
    [Suit::Season, Suit::Plant]
        .iter()
        .filter(|&&s| flowers.iter().filter(|t| t.suit == s).count() == 4)
        .count()
}
