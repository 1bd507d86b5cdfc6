use serde::{Deserialize, Serialize};
use std::fmt;

/// Suits in table order. The derived `Ord` is the suit-major part of the
/// canonical tile order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suit {
    Tung,
    Sok,
    Maan,
    Wind,
    Dragon,
    Season,
    Plant,
}

impl Suit {
    pub const NUMBERED: [Suit; 3] = [Suit::Tung, Suit::Sok, Suit::Maan];

    pub fn is_numbered(self) -> bool {
        matches!(self, Suit::Tung | Suit::Sok | Suit::Maan)
    }

    pub fn is_word(self) -> bool {
        matches!(self, Suit::Wind | Suit::Dragon)
    }

    pub fn is_bonus(self) -> bool {
        matches!(self, Suit::Season | Suit::Plant)
    }
}

/// Seat and prevailing winds. The head seat of a round always sits East.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Wind {
    East,
    South,
    West,
    North,
}

impl Wind {
    pub const ALL: [Wind; 4] = [Wind::East, Wind::South, Wind::West, Wind::North];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(i: u8) -> Self {
        Self::ALL[(i % 4) as usize]
    }

    /// Wind of `seat` at a table where `head` is East.
    pub fn relative_to(self, head: Wind) -> Wind {
        Wind::from_index(self.index() + 4 - head.index())
    }

    pub fn tile(self) -> Tile {
        Tile::new(Suit::Wind, self.index() + 1)
    }
}

/// A tile value. Word and bonus tiles keep the table numbering: winds 1-4,
/// dragons 5-7 (Zhong, Fat, Bat), seasons 1-4, plants 5-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub suit: Suit,
    pub num: u8,
}

/// Number of concealable tile kinds (numbered + words).
pub const KINDS: usize = 34;

impl Tile {
    pub const EAST: Tile = Tile::new(Suit::Wind, 1);
    pub const SOUTH: Tile = Tile::new(Suit::Wind, 2);
    pub const WEST: Tile = Tile::new(Suit::Wind, 3);
    pub const NORTH: Tile = Tile::new(Suit::Wind, 4);
    pub const ZHONG: Tile = Tile::new(Suit::Dragon, 5);
    pub const FAT: Tile = Tile::new(Suit::Dragon, 6);
    pub const BAT: Tile = Tile::new(Suit::Dragon, 7);

    pub const fn new(suit: Suit, num: u8) -> Self {
        Tile { suit, num }
    }

    pub fn tung(n: u8) -> Self {
        Tile::new(Suit::Tung, n)
    }

    pub fn sok(n: u8) -> Self {
        Tile::new(Suit::Sok, n)
    }

    pub fn maan(n: u8) -> Self {
        Tile::new(Suit::Maan, n)
    }

    pub fn from_code(code: &str) -> Result<Self, String> {
        match code {
            "E" => return Ok(Self::EAST),
            "S" => return Ok(Self::SOUTH),
            "W" => return Ok(Self::WEST),
            "N" => return Ok(Self::NORTH),
            "C" => return Ok(Self::ZHONG),
            "F" => return Ok(Self::FAT),
            "P" => return Ok(Self::BAT),
            _ => {}
        }

        let bytes = code.as_bytes();
        if bytes.len() != 2 {
            return Err(format!("invalid tile code: {}", code));
        }

        let n = (bytes[0] as char)
            .to_digit(10)
            .ok_or_else(|| format!("invalid number: {}", code))? as u8;

        let suit = match bytes[1] as char {
            't' => Suit::Tung,
            's' => Suit::Sok,
            'm' => Suit::Maan,
            'f' => {
                return match n {
                    1..=4 => Ok(Tile::new(Suit::Season, n)),
                    5..=8 => Ok(Tile::new(Suit::Plant, n)),
                    _ => Err(format!("invalid flower: {}", code)),
                };
            }
            _ => return Err(format!("invalid suit: {}", code)),
        };

        if !(1..=9).contains(&n) {
            return Err(format!("invalid number: {}", code));
        }
        Ok(Tile::new(suit, n))
    }

    pub fn code(&self) -> String {
        match self.suit {
            Suit::Tung => format!("{}t", self.num),
            Suit::Sok => format!("{}s", self.num),
            Suit::Maan => format!("{}m", self.num),
            Suit::Season | Suit::Plant => format!("{}f", self.num),
            Suit::Wind | Suit::Dragon => match *self {
                Tile::EAST => "E".into(),
                Tile::SOUTH => "S".into(),
                Tile::WEST => "W".into(),
                Tile::NORTH => "N".into(),
                Tile::ZHONG => "C".into(),
                Tile::FAT => "F".into(),
                _ => "P".into(),
            },
        }
    }

    pub fn is_numbered(&self) -> bool {
        self.suit.is_numbered()
    }

    pub fn is_word(&self) -> bool {
        self.suit.is_word()
    }

    pub fn is_bonus(&self) -> bool {
        self.suit.is_bonus()
    }

    /// 1 or 9 of a numbered suit.
    pub fn is_terminal(&self) -> bool {
        self.is_numbered() && (self.num == 1 || self.num == 9)
    }

    pub fn same_suit(&self, other: &Tile) -> bool {
        self.suit == other.suit
    }

    /// Slot in a `TileCounts` array; bonus tiles have none.
    pub fn index(&self) -> Option<usize> {
        let n = self.num as usize;
        match self.suit {
            Suit::Tung => Some(n - 1),
            Suit::Sok => Some(9 + n - 1),
            Suit::Maan => Some(18 + n - 1),
            Suit::Wind => Some(27 + n - 1),
            Suit::Dragon => Some(31 + n - 5),
            Suit::Season | Suit::Plant => None,
        }
    }

    pub fn from_index(i: usize) -> Self {
        match i {
            0..=8 => Tile::tung(i as u8 + 1),
            9..=17 => Tile::sok((i - 9) as u8 + 1),
            18..=26 => Tile::maan((i - 18) as u8 + 1),
            27..=30 => Tile::new(Suit::Wind, (i - 27) as u8 + 1),
            _ => Tile::new(Suit::Dragon, (i - 31) as u8 + 5),
        }
    }

    pub fn next(&self) -> Option<Self> {
        if !self.is_numbered() || self.num >= 9 {
            None
        } else {
            Some(Tile::new(self.suit, self.num + 1))
        }
    }

    pub fn next2(&self) -> Option<Self> {
        if !self.is_numbered() || self.num >= 8 {
            None
        } else {
            Some(Tile::new(self.suit, self.num + 2))
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// The 13 orphan kinds: 1 and 9 of every numbered suit, every word.
pub fn thirteen_orphans() -> Vec<Tile> {
    let mut v = vec![];
    for s in Suit::NUMBERED {
        v.push(Tile::new(s, 1));
        v.push(Tile::new(s, 9));
    }
    v.extend([
        Tile::EAST,
        Tile::SOUTH,
        Tile::WEST,
        Tile::NORTH,
        Tile::ZHONG,
        Tile::FAT,
        Tile::BAT,
    ]);
    v
}

pub fn parse_tiles(codes: &[String]) -> Result<Vec<Tile>, String> {
    codes.iter().map(|c| Tile::from_code(c)).collect()
}

/// Per-kind multiplicities of a concealed tile set. `Copy`, so search code
/// branches on a fresh copy instead of undoing edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCounts([u8; KINDS]);

impl TileCounts {
    /// `None` when a bonus tile is present; those never sit in a concealed set.
    pub fn from_tiles(tiles: &[Tile]) -> Option<Self> {
        let mut c = [0u8; KINDS];
        for t in tiles {
            c[t.index()?] += 1;
        }
        Some(TileCounts(c))
    }

    pub fn get(&self, t: Tile) -> u8 {
        t.index().map(|i| self.0[i]).unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Lowest tile still held, in canonical order.
    pub fn min_tile(&self) -> Option<Tile> {
        self.0.iter().position(|&c| c > 0).map(Tile::from_index)
    }

    /// Copy with `n` of `t` removed, if that many are held.
    pub fn without(&self, t: Tile, n: u8) -> Option<Self> {
        let i = t.index()?;
        if self.0[i] < n {
            return None;
        }
        let mut next = *self;
        next.0[i] -= n;
        Some(next)
    }

    pub fn kinds(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, &c)| (Tile::from_index(i), c))
    }
}
