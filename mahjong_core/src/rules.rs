use crate::canonical::sort_by_rank;
use crate::category::Category;
use crate::context::{LastEvent, WinContext};
use crate::decompose::Decomposition;
use crate::hand::HandState;
use crate::meld::Meld;
use crate::special::SpecialShape;
use crate::tile::{Suit, Tile, Wind};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::trace;

/// Groups in a finished hand: one pair plus five pongs/sheungs/kongs.
pub const GROUPS_PER_HAND: usize = 5;
/// Undrawn tail kept back from play.
pub const WALL_RESERVE: u32 = 8;
pub const TSAT_TSEK_LOI_TILES: u32 = 11;
pub const SAP_TSEK_LOI_TILES: u32 = 14;
/// Discards within which 人糊 still applies.
pub const YAN_WU_DISCARDS: u32 = 4;
/// A hand worth exactly this much before 雞糊 is a chicken hand.
pub const CHICKEN_TOTAL: u32 = 1;

/// A category credited by one evaluation, with its value for this win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredCategory {
    pub category: Category,
    pub value: u32,
}

/// Running list of credited categories. Duplicates are allowed and counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<ScoredCategory>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: Category) {
        self.add_valued(category, category.base_value());
    }

    pub fn add_valued(&mut self, category: Category, value: u32) {
        self.entries.push(ScoredCategory { category, value });
    }

    pub fn contains(&self, category: Category) -> bool {
        self.entries.iter().any(|e| e.category == category)
    }

    /// Drop the first occurrence. Returns whether one was found.
    pub fn remove(&mut self, category: Category) -> bool {
        match self.entries.iter().position(|e| e.category == category) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Drop the first `old` and append `new`.
    pub fn replace(&mut self, old: Category, new: Category) {
        self.remove(old);
        self.add(new);
    }

    pub fn total(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |acc, e| acc.saturating_add(e.value))
    }

    pub fn entries(&self) -> &[ScoredCategory] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ScoredCategory> {
        self.entries
    }
}

/// Everything a rule may look at. Runs and sets are keyed by their tile
/// (run starter / set tile) and kept sorted.
struct Facts<'a> {
    ctx: &'a WinContext,
    hand: &'a HandState,
    self_draw: bool,
    table_wind: Wind,
    pair: Tile,
    dark_sheungs: Vec<Tile>,
    bright_sheungs: Vec<Tile>,
    dark_pongs: Vec<Tile>,
    bright_pongs: Vec<Tile>,
    bright_kongs: Vec<Tile>,
    dark_kongs: Vec<Tile>,
    /// Bright and dark sheungs together.
    sheungs: Vec<Tile>,
    /// Pongs and kongs together.
    sets: Vec<Tile>,
    seasons: usize,
    plants: usize,
}

impl<'a> Facts<'a> {
    fn situational(pair: Tile, hand: &'a HandState, ctx: &'a WinContext) -> Self {
        Facts {
            ctx,
            hand,
            self_draw: ctx.is_self_draw(),
            table_wind: ctx.table_wind(),
            pair,
            dark_sheungs: vec![],
            bright_sheungs: vec![],
            dark_pongs: vec![],
            bright_pongs: vec![],
            bright_kongs: vec![],
            dark_kongs: vec![],
            sheungs: vec![],
            sets: vec![],
            seasons: hand.flowers().iter().filter(|t| t.suit == Suit::Season).count(),
            plants: hand.flowers().iter().filter(|t| t.suit == Suit::Plant).count(),
        }
    }

    fn classify(pair: Tile, melds: &[Meld], hand: &'a HandState, ctx: &'a WinContext) -> Self {
        let mut f = Facts::situational(pair, hand, ctx);

        for m in melds {
            match m {
                Meld::Sheung(t) => f.dark_sheungs.push(*t),
                Meld::Pong(t) => f.dark_pongs.push(*t),
                _ => {}
            }
        }
        for m in hand.locked() {
            match m {
                Meld::Sheung(t) => f.bright_sheungs.push(*t),
                Meld::Pong(t) => f.bright_pongs.push(*t),
                _ => {}
            }
        }
        f.bright_kongs = hand.bright_kongs().iter().map(|m| m.tile()).collect();
        f.dark_kongs = hand.dark_kongs().iter().map(|m| m.tile()).collect();

        for v in [
            &mut f.dark_sheungs,
            &mut f.bright_sheungs,
            &mut f.dark_pongs,
            &mut f.bright_pongs,
            &mut f.bright_kongs,
            &mut f.dark_kongs,
        ] {
            v.sort();
        }

        f.sheungs = f.bright_sheungs.iter().chain(&f.dark_sheungs).copied().collect();
        f.sheungs.sort();
        f.sets = f
            .bright_pongs
            .iter()
            .chain(&f.dark_pongs)
            .chain(&f.bright_kongs)
            .chain(&f.dark_kongs)
            .copied()
            .collect();
        f.sets.sort();
        f
    }

    fn win_tile(&self) -> Tile {
        self.ctx.win_tile
    }

    fn kong_count(&self) -> usize {
        self.bright_kongs.len() + self.dark_kongs.len()
    }

    fn is_kong(&self, t: Tile) -> bool {
        self.bright_kongs.contains(&t) || self.dark_kongs.contains(&t)
    }

    /// Every group with its tiles, the pair last.
    fn all_groups(&self) -> Vec<Vec<Tile>> {
        let mut v: Vec<Vec<Tile>> = self
            .sheungs
            .iter()
            .map(|&s| Meld::Sheung(s).tiles())
            .collect();
        for &t in &self.sets {
            v.push(vec![t; if self.is_kong(t) { 4 } else { 3 }]);
        }
        v.push(vec![self.pair; 2]);
        v
    }

    fn has_suit(&self, suit: Suit) -> bool {
        self.pair.suit == suit
            || self.sheungs.iter().any(|t| t.suit == suit)
            || self.sets.iter().any(|t| t.suit == suit)
    }
}

type Rule = fn(&Facts<'_>, &mut Tally);

/// Standard hands run every stage in this order.
const STANDARD_RULES: &[(&str, Rule)] = &[
    ("self_draw", self_draw),
    ("multiple_winners", multiple_winners),
    ("flowers", flowers),
    ("winds", winds),
    ("dragons", dragons),
    ("ping_wu", ping_wu),
    ("tseung_an", tseung_an),
    ("lou_siu", lou_siu),
    ("no_words", no_words),
    ("concealed", concealed),
    ("kongs", kongs),
    ("suits", suits),
    ("all_sets", all_sets),
    ("single_wait", single_wait),
    ("dui_pong", dui_pong),
    ("terminals", terminals),
    ("four_of_a_kind", four_of_a_kind),
    ("concealed_sets", concealed_sets),
    ("same_rank_sheungs", same_rank_sheungs),
    ("same_rank_sets", same_rank_sets),
    ("adjacent_sets", adjacent_sets),
    ("lung", lung),
    ("zhap_lung", zhap_lung),
    ("kau_yan", kau_yan),
    ("after_event", after_event),
    ("wall", wall),
    ("first_discards", first_discards),
    ("chicken", chicken),
    ("zhong", zhong),
];

/// Special shapes skip every grouping-dependent stage.
const SITUATIONAL_RULES: &[(&str, Rule)] = &[
    ("self_draw", self_draw),
    ("multiple_winners", multiple_winners),
    ("flowers", flowers),
    ("after_event", after_event),
    ("wall", wall),
    ("first_discards", first_discards),
    ("chicken", chicken),
    ("zhong", zhong),
];

/// Score one reading of the hand.
///
/// Panics if a standard reading plus the revealed groups is not exactly
/// five groups; callers only pass readings of a finished hand.
pub fn score_decomposition(
    d: &Decomposition,
    hand: &HandState,
    ctx: &WinContext,
) -> Vec<ScoredCategory> {
    let mut tally = Tally::new();

    let (facts, rules) = match d {
        Decomposition::Standard { pair, melds } => {
            assert!(
                melds.len() + hand.revealed_group_count() == GROUPS_PER_HAND,
                "hand has {} concealed and {} revealed groups, expected {}",
                melds.len(),
                hand.revealed_group_count(),
                GROUPS_PER_HAND
            );
            (Facts::classify(*pair, melds, hand, ctx), STANDARD_RULES)
        }
        Decomposition::SixteenDisjoint { pair, .. }
        | Decomposition::ThirteenOrphans { pair, .. } => {
            (Facts::situational(*pair, hand, ctx), SITUATIONAL_RULES)
        }
        Decomposition::LikKuLikKu { pong, .. } => {
            (Facts::situational(*pong, hand, ctx), SITUATIONAL_RULES)
        }
    };

    // ===== 十三么, 十六不搭, 嚦咕嚦咕 =====
    match SpecialShape::of(d) {
        Some(SpecialShape::SixteenDisjoint) => tally.add(Category::SapLukBatDap),
        Some(SpecialShape::ThirteenOrphans) => tally.add(Category::SapSamYiu),
        Some(SpecialShape::LikKuLikKu) => tally.add(Category::LikKuLikKu),
        None => {}
    }

    for (name, rule) in rules {
        rule(&facts, &mut tally);
        trace!(rule = *name, total = tally.total(), "rule applied");
    }
    tally.into_entries()
}

// ===== 自摸, 雙響 =====

fn self_draw(f: &Facts, t: &mut Tally) {
    if f.self_draw {
        t.add(Category::SelfDraw);
    }
}

fn multiple_winners(f: &Facts, t: &mut Tally) {
    if f.ctx.multiple_winners {
        t.add(Category::MultipleWinners);
    }
}

// ===== 花 =====

fn flowers(f: &Facts, t: &mut Tally) {
    let flowers = f.hand.flowers();
    if flowers.is_empty() {
        t.add(Category::MoFa);
        return;
    }
    let own = (f.table_wind.index() + 1) % 4;
    for fl in flowers {
        if fl.num % 4 == own {
            t.add(Category::ZengFa);
        } else {
            t.add(Category::LanFa);
        }
    }

    if f.seasons == 4 && f.plants == 4 {
        for _ in 0..2 {
            t.remove(Category::ZengFa);
        }
        for _ in 0..6 {
            t.remove(Category::LanFa);
        }
        t.add(Category::LeungToiFa);
    } else if f.seasons == 4 || f.plants == 4 {
        t.remove(Category::ZengFa);
        for _ in 0..3 {
            t.remove(Category::LanFa);
        }
        t.add(Category::YatToiFa);
    }
}

// ===== 東南西北, 三風四喜 =====

fn wind_category(w: Wind) -> Category {
    match w {
        Wind::East => Category::East,
        Wind::South => Category::South,
        Wind::West => Category::West,
        Wind::North => Category::North,
    }
}

fn winds(f: &Facts, t: &mut Tally) {
    let held: Vec<(Category, u32)> = f
        .sets
        .iter()
        .filter(|s| s.suit == Suit::Wind)
        .map(|s| {
            let w = Wind::from_index(s.num - 1);
            let mut value = 1;
            if w == f.table_wind {
                value += 1;
            }
            if w == f.ctx.prevailing_wind {
                value += 1;
            }
            (wind_category(w), value)
        })
        .collect();
    let pair_is_wind = f.pair.suit == Suit::Wind;

    match held.len() {
        4 => t.add(Category::DaiSeiHei),
        3 if pair_is_wind => t.add(Category::SiuSeiHei),
        3 => t.add(Category::DaiSamFung),
        2 if pair_is_wind => t.add(Category::SiuSamFung),
        _ => {
            for (c, v) in held {
                t.add_valued(c, v);
            }
        }
    }
}

// ===== 中發白, 大小三元 =====

fn dragons(f: &Facts, t: &mut Tally) {
    let held: Vec<Category> = f
        .sets
        .iter()
        .filter_map(|&s| match s {
            Tile::ZHONG => Some(Category::RedDragon),
            Tile::FAT => Some(Category::GreenDragon),
            Tile::BAT => Some(Category::WhiteDragon),
            _ => None,
        })
        .collect();

    match held.len() {
        3 => t.add(Category::DaiSamYuen),
        2 if f.pair.suit == Suit::Dragon => t.add(Category::SiuSamYuen),
        _ => {
            for c in held {
                t.add(c);
            }
        }
    }
}

// ===== 平糊, 將眼, 老少 =====

fn ping_wu(f: &Facts, t: &mut Tally) {
    if f.sheungs.len() == GROUPS_PER_HAND {
        t.add(Category::PingWu);
    }
}

fn tseung_an(f: &Facts, t: &mut Tally) {
    if f.pair.is_numbered() && matches!(f.pair.num, 2 | 5 | 8) {
        t.add(Category::TseungAn);
    }
}

fn lou_siu(f: &Facts, t: &mut Tally) {
    // 各グループにつき最初の相方だけ数える
    for (i, a) in f.sheungs.iter().enumerate() {
        for b in &f.sheungs[i + 1..] {
            if a.same_suit(b) && a.num == 1 && b.num == 7 {
                t.add(Category::LouSiu);
                break;
            }
        }
    }
    for (i, a) in f.sets.iter().enumerate() {
        for b in &f.sets[i + 1..] {
            if a.is_numbered() && a.same_suit(b) && a.num == 1 && b.num == 9 {
                t.add(Category::LouSiu);
                break;
            }
        }
    }
}

// ===== 無字, 無字花, 大平糊 =====

fn no_words(f: &Facts, t: &mut Tally) {
    if !f.has_suit(Suit::Wind) && !f.has_suit(Suit::Dragon) {
        t.add(Category::MoZi);
    }
    if t.contains(Category::MoFa) && t.contains(Category::MoZi) {
        t.remove(Category::MoFa);
        t.remove(Category::MoZi);
        t.add(Category::MoZiFa);
    }
    if t.contains(Category::MoZiFa) && t.contains(Category::PingWu) {
        t.remove(Category::MoZiFa);
        t.remove(Category::PingWu);
        t.add(Category::MoZiFaPingWu);
    }
}

// ===== 門前清, 門清自摸 =====

fn concealed(f: &Facts, t: &mut Tally) {
    if !f.bright_sheungs.is_empty() || !f.bright_pongs.is_empty() {
        return;
    }
    if f.self_draw {
        t.replace(Category::SelfDraw, Category::MunTsingSelfDraw);
    } else {
        t.add(Category::MunTsing);
    }
}

// ===== 明摃, 暗摃 =====

fn kongs(f: &Facts, t: &mut Tally) {
    for _ in &f.bright_kongs {
        t.add(Category::BrightKong);
    }
    for _ in &f.dark_kongs {
        t.add(Category::DarkKong);
    }
}

// ===== 五門齊, 七門齊, 缺一門, 混一色, 清一色 =====

fn suits(f: &Facts, t: &mut Tally) {
    let numbered = Suit::NUMBERED.iter().filter(|&&s| f.has_suit(s)).count();
    let winds = f.has_suit(Suit::Wind);
    let dragons = f.has_suit(Suit::Dragon);

    if numbered == 3 && winds && dragons {
        if f.seasons > 0 && f.plants > 0 {
            t.add(Category::TsatMunChai);
        } else {
            t.add(Category::MmMunChai);
        }
    } else if numbered == 2 && !winds && !dragons {
        t.add(Category::KutYatMun);
    } else if numbered == 1 {
        if !winds && !dragons {
            t.add(Category::TsingYatSik);
        } else {
            t.add(Category::WunYatSik);
        }
    }
}

// ===== 對對糊, 坎坎糊 =====

fn all_sets(f: &Facts, t: &mut Tally) {
    if f.sets.len() != GROUPS_PER_HAND {
        return;
    }
    if t.contains(Category::MunTsingSelfDraw) {
        t.replace(Category::MunTsingSelfDraw, Category::KanKanWu);
    } else {
        t.add(Category::DuiDuiWu);
    }
}

// ===== 獨獨, 假獨, 對碰 =====

fn single_wait(f: &Facts, t: &mut Tally) {
    let w = f.win_tile();

    if w == f.pair {
        for &s in &f.dark_sheungs {
            let e = Tile::new(s.suit, s.num + 2);
            if (w == s && w.num != 7)
                || (w == e && w.num != 3)
                || (w.same_suit(&s) && (w.num + 1 == s.num || w.num == s.num + 3))
            {
                t.add(Category::GaDuk);
            } else if w.same_suit(&s) {
                for q in &f.dark_pongs {
                    if q.same_suit(&w)
                        && ((w.num + 1 == q.num && w.num + 2 == s.num)
                            || (w.num == q.num + 1 && w.num == s.num + 4))
                    {
                        t.add(Category::GaDuk);
                        break;
                    }
                }
            }
            if t.contains(Category::GaDuk) {
                break;
            }
        }
        if !t.contains(Category::GaDuk) {
            t.add(Category::DukDuk);
        }
        return;
    }

    for &s in &f.dark_sheungs {
        let m = Tile::new(s.suit, s.num + 1);
        let e = Tile::new(s.suit, s.num + 2);
        if w == m {
            t.add(Category::DukDuk);
            break;
        } else if w == e && w.num == 3 {
            if f.dark_sheungs.contains(&w) {
                t.add(Category::GaDuk);
            }
            if !t.contains(Category::GaDuk) {
                t.add(Category::DukDuk);
                break;
            }
        } else if w == s && w.num == 7 {
            if f.dark_sheungs.iter().any(|o| Tile::new(o.suit, o.num + 2) == w) {
                t.add(Category::GaDuk);
            }
            if !t.contains(Category::GaDuk) {
                t.add(Category::DukDuk);
                break;
            }
        }
    }
}

fn dui_pong(f: &Facts, t: &mut Tally) {
    if f.dark_pongs.contains(&f.win_tile()) {
        t.add(Category::DuiPong);
    }
}

// ===== 斷么, 全帶么, 混么, 清么 =====

fn terminals(f: &Facts, t: &mut Tally) {
    let groups = f.all_groups();
    let (mut terminal, mut word, mut plain) = (0, 0, 0);
    let (mut with_terminal, mut with_word) = (0, 0);

    for g in &groups {
        let mut has_terminal = false;
        let mut has_word = false;
        for tile in g {
            if tile.is_word() {
                word += 1;
                has_word = true;
            } else if tile.is_terminal() {
                terminal += 1;
                has_terminal = true;
            } else {
                plain += 1;
            }
        }
        with_terminal += has_terminal as usize;
        with_word += has_word as usize;
    }

    if terminal + word == 0 {
        t.add(Category::DuenYiu);
    } else if word + plain == 0 {
        t.add(Category::TsingYiu);
    } else if plain == 0 {
        t.add(Category::WunYiu);
    } else if with_terminal == groups.len() {
        t.add(Category::TsuenDaiYiu);
    } else if with_terminal + with_word == groups.len() {
        t.add(Category::TsuenDaiWunYiu);
    }
}

// ===== 四歸一, 四歸二, 四歸四 =====

fn four_of_a_kind(f: &Facts, t: &mut Tally) {
    let mut copies: BTreeMap<Tile, u32> = BTreeMap::new();
    let mut spread: BTreeMap<Tile, u32> = BTreeMap::new();

    for &s in &f.sheungs {
        for tile in Meld::Sheung(s).tiles() {
            *copies.entry(tile).or_insert(0) += 1;
            *spread.entry(tile).or_insert(0) += 1;
        }
    }
    for &s in &f.sets {
        *spread.entry(s).or_insert(0) += 1;
        *copies.entry(s).or_insert(0) += if f.is_kong(s) { 4 } else { 3 };
    }
    *copies.entry(f.pair).or_insert(0) += 2;
    *spread.entry(f.pair).or_insert(0) += 1;

    for (tile, n) in copies {
        if n != 4 {
            continue;
        }
        match spread.get(&tile).copied().unwrap_or(0) {
            4 => t.add(Category::SeiKwaiSei),
            3 => t.add(Category::SeiKwaiYee),
            2 => t.add(Category::SeiKwaiYat),
            _ => {}
        }
    }
}

// ===== 暗刻 =====

fn concealed_sets(f: &Facts, t: &mut Tally) {
    if t.contains(Category::KanKanWu) {
        return;
    }
    // ロンした牌で完成した暗刻は数えない
    let dark = f.kong_count()
        + f.dark_pongs
            .iter()
            .filter(|&&p| p != f.win_tile() || f.self_draw)
            .count();
    match dark {
        5 => t.add(Category::MmUmHak),
        4 => t.add(Category::SeiUmHak),
        3 => t.add(Category::SamUmHak),
        2 => t.add(Category::YeeUmHak),
        _ => {}
    }
}

// ===== 同順, 般高, 相逢 =====

fn same_rank_sheungs(f: &Facts, t: &mut Tally) {
    let mut by_rank: BTreeMap<u8, u32> = BTreeMap::new();
    let mut by_tile: BTreeMap<Tile, u32> = BTreeMap::new();
    for &s in &f.sheungs {
        *by_rank.entry(s.num).or_insert(0) += 1;
        *by_tile.entry(s).or_insert(0) += 1;
    }

    for &n in by_rank.values() {
        match n {
            5 => t.add(Category::MmTongShun),
            4 => t.add(Category::SeiTongShun),
            _ => {}
        }
    }
    if t.contains(Category::MmTongShun) || t.contains(Category::SeiTongShun) {
        return;
    }

    for &n in by_tile.values() {
        match n {
            4 => t.add(Category::SeiPunKo),
            3 => t.add(Category::SamPunKo),
            2 => t.add(Category::YatPunKo),
            _ => {}
        }
    }

    let s = &f.sheungs;
    let mut unused = s.clone();
    for i in 0..s.len() {
        if !unused.contains(&s[i]) {
            continue;
        }
        for j in i + 1..s.len() {
            if !unused.contains(&s[j]) {
                continue;
            }
            let mut three = false;
            for k in j + 1..s.len() {
                let trio = [s[i], s[j], s[k]];
                if unused.contains(&s[k]) && distinct_suits(&trio) && same_rank(&trio) {
                    t.add(Category::SamSheungFung);
                    for g in trio {
                        remove_first(&mut unused, g);
                    }
                    three = true;
                }
            }
            let duo = [s[i], s[j]];
            if !three && distinct_suits(&duo) && same_rank(&duo) {
                t.add(Category::YeeSheungFung);
                for g in duo {
                    remove_first(&mut unused, g);
                }
            }
        }
    }
}

// ===== 兄弟 =====

fn same_rank_sets(f: &Facts, t: &mut Tally) {
    let mut by_rank: BTreeMap<u8, u32> = BTreeMap::new();
    for s in f.sets.iter().filter(|s| s.is_numbered()) {
        *by_rank.entry(s.num).or_insert(0) += 1;
    }
    for (&rank, &n) in &by_rank {
        match n {
            3 => t.add(Category::DaiSamHingDai),
            2 if f.pair.is_numbered() && f.pair.num == rank => t.add(Category::SiuSamHingDai),
            2 => t.add(Category::YeeHingDai),
            _ => {}
        }
    }
}

// ===== 姊妹 =====

fn adjacent_sets(f: &Facts, t: &mut Tally) {
    let s = &f.sets;
    for i in 0..s.len() {
        for j in i + 1..s.len() {
            let (a, b) = (s[i], s[j]);
            if !(a.is_numbered() && a.same_suit(&b) && a.num + 1 == b.num) {
                continue;
            }
            let mut three = false;
            for &c in &s[j + 1..] {
                if a.same_suit(&c) && b.num + 1 == c.num {
                    t.add(Category::DaiSamTszMui);
                    three = true;
                }
            }
            let p = f.pair;
            if !three && a.same_suit(&p) && (p.num + 1 == a.num || p.num == b.num + 1) {
                t.add(Category::SiuSamTszMui);
            }
        }
    }
}

// ===== 暗龍, 明龍 =====

fn lung(f: &Facts, t: &mut Tally) {
    let mut unused = f.sheungs.clone();
    let mut um_suits: Vec<Suit> = vec![];

    let d = &f.dark_sheungs;
    for i in 0..d.len() {
        for j in i + 1..d.len() {
            if !(d[i].same_suit(&d[j]) && d[i].num + 3 == d[j].num) {
                continue;
            }
            for k in j + 1..d.len() {
                let (a, b, c) = (d[i], d[j], d[k]);
                if a.same_suit(&c)
                    && b.num + 3 == c.num
                    && unused.contains(&a)
                    && unused.contains(&b)
                    && unused.contains(&c)
                {
                    t.add(Category::UmLung);
                    um_suits.push(a.suit);
                    for g in [a, b, c] {
                        remove_first(&mut unused, g);
                    }
                    credit_leftover_pair(&mut unused, [a, b, c], t, Category::UmLung);
                }
            }
        }
    }

    for suit in Suit::NUMBERED {
        if um_suits.contains(&suit) {
            let mut starts = vec![1u8, 4, 7];
            for b in f.bright_sheungs.iter().filter(|b| b.suit == suit) {
                if let Some(pos) = starts.iter().position(|&n| n == b.num) {
                    starts.remove(pos);
                }
            }
            if starts.len() == 1 {
                t.add(Category::MingLung);
            }
            continue;
        }

        let s = &f.sheungs;
        let mut unused = s.clone();
        for i in 0..s.len() {
            if s[i].suit != suit {
                continue;
            }
            for j in i + 1..s.len() {
                if !(s[i].same_suit(&s[j]) && s[i].num + 3 == s[j].num) {
                    continue;
                }
                for k in j + 1..s.len() {
                    let (a, b, c) = (s[i], s[j], s[k]);
                    if a.same_suit(&c) && b.num + 3 == c.num {
                        t.add(Category::MingLung);
                        for g in [a, b, c] {
                            remove_first(&mut unused, g);
                        }
                        credit_leftover_pair(&mut unused, [a, b, c], t, Category::MingLung);
                    }
                }
            }
        }
    }
}

/// After a run trio is consumed, two duplicates still unused earn the run again.
fn credit_leftover_pair(unused: &mut Vec<Tile>, [a, b, c]: [Tile; 3], t: &mut Tally, cat: Category) {
    for (x, y) in [(a, b), (a, c), (b, c)] {
        if unused.contains(&x) && unused.contains(&y) {
            remove_first(unused, x);
            remove_first(unused, y);
            t.add(cat);
            return;
        }
    }
}

// ===== 暗雜龍, 明雜龍 =====

fn zhap_lung(f: &Facts, t: &mut Tally) {
    let mut dark = f.dark_sheungs.clone();
    sort_by_rank(&mut dark);
    let mut um_combos: Vec<[usize; 3]> = vec![];
    let mut um_starters: Vec<[Tile; 3]> = vec![];

    for_each_zhap_trio(&dark, |idx, trio| {
        if overlaps(&um_combos, idx) {
            return;
        }
        um_combos.push(idx);
        um_starters.push(trio);
        t.add(Category::UmZhapLung);
    });

    let mut all = f.sheungs.clone();
    sort_by_rank(&mut all);
    let mut combos: Vec<[usize; 3]> = vec![];
    let mut unused = f.sheungs.clone();

    for_each_zhap_trio(&all, |idx, trio| {
        if overlaps(&combos, idx) {
            return;
        }
        if um_starters.contains(&trio) {
            for g in trio {
                remove_first(&mut unused, g);
            }
            let [a, b, c] = trio;
            if [(a, b), (a, c), (b, c)]
                .iter()
                .any(|(x, y)| unused.contains(x) && unused.contains(y))
            {
                t.add(Category::MingZhapLung);
            }
        } else {
            combos.push(idx);
            t.add(Category::MingZhapLung);
        }
    });
}

/// 1-4-7 starters in three different suits, scanned i < j < k over `starters`.
fn for_each_zhap_trio(starters: &[Tile], mut visit: impl FnMut([usize; 3], [Tile; 3])) {
    for i in 0..starters.len() {
        for j in i + 1..starters.len() {
            let (a, b) = (starters[i], starters[j]);
            if !(distinct_suits(&[a, b]) && a.num + 3 == b.num) {
                continue;
            }
            for k in j + 1..starters.len() {
                let c = starters[k];
                if distinct_suits(&[a, b, c]) && b.num + 3 == c.num {
                    visit([i, j, k], [a, b, c]);
                }
            }
        }
    }
}

/// Whether two of `idx` already belong to one recorded combination.
fn overlaps(combos: &[[usize; 3]], [i, j, k]: [usize; 3]) -> bool {
    combos.iter().any(|c| {
        (c.contains(&i) && c.contains(&j))
            || (c.contains(&i) && c.contains(&k))
            || (c.contains(&j) && c.contains(&k))
    })
}

// ===== 全求人, 半求人 =====

fn kau_yan(f: &Facts, t: &mut Tally) {
    let bright = f.bright_sheungs.len() + f.bright_pongs.len() + f.bright_kongs.len();
    if bright != GROUPS_PER_HAND {
        return;
    }
    if f.self_draw {
        t.add(Category::BoonKauYan);
    } else {
        t.add(Category::TsuenKauYan);
    }
}

// ===== 花上自摸, 摃上自摸, 搶摃 =====

fn after_event(f: &Facts, t: &mut Tally) {
    let cat = match (f.ctx.last_event, f.self_draw) {
        (LastEvent::Flower, true) => Category::FaSheungSelfDraw,
        (LastEvent::DoubleKong, true) => Category::KongSheungKongSelfDraw,
        (LastEvent::Kong, true) => Category::KongSheungSelfDraw,
        (LastEvent::KongAfterRobbedKong, true) => Category::CheungKongSheungKongSelfDraw,
        (LastEvent::RobbedKong, false) => Category::CheungKongSikWu,
        _ => return,
    };
    t.add(cat);
}

// ===== 海底撈月, 七只內, 十只內 =====

fn wall(f: &Facts, t: &mut Tally) {
    let left = f.ctx.tiles_left;
    if left == WALL_RESERVE && f.self_draw {
        t.add(Category::HoiDaiLaoYuet);
    } else if left <= TSAT_TSEK_LOI_TILES {
        t.add(Category::TsatTsekLoi);
    } else if left <= SAP_TSEK_LOI_TILES {
        t.add(Category::SapTsekLoi);
    }
}

// ===== 天糊, 地糊, 人糊 =====

fn first_discards(f: &Facts, t: &mut Tally) {
    let n = f.ctx.discard_count;
    if f.ctx.winner_seat == f.ctx.dealer_seat && n == 0 && f.hand.kong_count() == 0 {
        t.add(Category::TinWu);
    } else if n == 1 && !f.self_draw {
        t.add(Category::DeiWu);
    } else if n <= YAN_WU_DISCARDS {
        t.add(Category::YanWu);
    }
}

// ===== 雞糊, 莊 =====

fn chicken(_f: &Facts, t: &mut Tally) {
    if t.total() == CHICKEN_TOTAL {
        t.add(Category::ChickenHand);
    }
}

fn zhong(f: &Facts, t: &mut Tally) {
    if f.ctx.dealer_involved() {
        let value = f.ctx.dealer_streak.saturating_mul(2).saturating_add(1);
        t.add_valued(Category::Zhong, value);
    }
}

fn distinct_suits(tiles: &[Tile]) -> bool {
    tiles
        .iter()
        .enumerate()
        .all(|(i, a)| tiles[i + 1..].iter().all(|b| !a.same_suit(b)))
}

fn same_rank(tiles: &[Tile]) -> bool {
    tiles.iter().all(|t| t.is_numbered() && t.num == tiles[0].num)
}

fn remove_first(v: &mut Vec<Tile>, t: Tile) {
    if let Some(pos) = v.iter().position(|&x| x == t) {
        v.remove(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special::detect_special;

    fn tile(code: &str) -> Tile {
        Tile::from_code(code).unwrap()
    }

    fn pong(code: &str) -> Meld {
        Meld::Pong(tile(code))
    }

    fn sheung(code: &str) -> Meld {
        Meld::Sheung(tile(code))
    }

    /// South wins off West; East deals and is the prevailing wind.
    fn claimed(win: &str) -> WinContext {
        WinContext::claimed(Wind::South, Wind::West, tile(win))
    }

    fn run(
        rule: Rule,
        pair: &str,
        melds: &[Meld],
        hand: &HandState,
        ctx: &WinContext,
        seed: &[Category],
    ) -> Tally {
        let f = Facts::classify(tile(pair), melds, hand, ctx);
        let mut t = Tally::new();
        for &c in seed {
            t.add(c);
        }
        rule(&f, &mut t);
        t
    }

    fn cats(t: &Tally) -> Vec<Category> {
        t.entries().iter().map(|e| e.category).collect()
    }

    fn fired(rule: Rule, pair: &str, melds: &[Meld]) -> Vec<Category> {
        cats(&run(rule, pair, melds, &HandState::new(), &claimed("9m"), &[]))
    }

    fn with_flowers(codes: &[&str]) -> HandState {
        let mut h = HandState::new();
        for c in codes {
            h.add_flower(tile(c)).unwrap();
        }
        h
    }

    // ===== Tally =====

    #[test]
    fn tally_remove_takes_first_only() {
        let mut t = Tally::new();
        t.add(Category::LanFa);
        t.add(Category::ZengFa);
        t.add(Category::LanFa);
        assert!(t.remove(Category::LanFa));
        assert_eq!(t.entries()[0].category, Category::ZengFa);
        assert!(t.contains(Category::LanFa));
        assert_eq!(t.total(), 3);
        t.replace(Category::ZengFa, Category::YatToiFa);
        assert_eq!(t.entries().last().unwrap().category, Category::YatToiFa);
        assert!(!t.remove(Category::MoFa));
    }

    #[test]
    fn valued_entries_keep_their_value() {
        let mut t = Tally::new();
        t.add_valued(Category::East, 3);
        t.add_valued(Category::Zhong, 5);
        assert_eq!(t.total(), 8);
        t.add_valued(Category::Zhong, u32::MAX);
        assert_eq!(t.total(), u32::MAX);
    }

    #[test]
    fn overlap_needs_two_shared_indices() {
        let combos = [[0, 1, 2]];
        assert!(overlaps(&combos, [0, 2, 4]));
        assert!(!overlaps(&combos, [2, 3, 4]));
    }

    #[test]
    fn suit_checks() {
        assert!(distinct_suits(&[Tile::tung(1), Tile::sok(1), Tile::maan(1)]));
        assert!(!distinct_suits(&[Tile::tung(1), Tile::sok(1), Tile::tung(4)]));
        assert!(same_rank(&[Tile::tung(4), Tile::maan(4)]));
        assert!(!same_rank(&[Tile::tung(4), Tile::maan(5)]));
    }

    // ===== 花 =====

    #[test]
    fn no_flowers() {
        let m = [sheung("1t"), sheung("4t"), sheung("7t"), sheung("2s"), sheung("6m")];
        assert_eq!(fired(flowers, "5s", &m), vec![Category::MoFa]);
    }

    #[test]
    fn full_season_row_replaces_its_flowers() {
        // South sits at position 2: 2f is own, the rest are not
        let m = [sheung("1t"), sheung("4t"), sheung("7t"), sheung("2s"), sheung("6m")];
        let h = with_flowers(&["1f", "2f", "3f", "4f", "5f"]);
        let t = run(flowers, "5s", &m, &h, &claimed("9m"), &[]);
        assert_eq!(cats(&t), vec![Category::LanFa, Category::YatToiFa]);
    }

    #[test]
    fn both_rows_replace_every_flower() {
        let m = [sheung("1t"), sheung("4t"), sheung("7t"), sheung("2s"), sheung("6m")];
        let h = with_flowers(&["1f", "2f", "3f", "4f", "5f", "6f", "7f", "8f"]);
        let t = run(flowers, "5s", &m, &h, &claimed("9m"), &[]);
        assert_eq!(cats(&t), vec![Category::LeungToiFa]);
    }

    // ===== 風, 三元 =====

    #[test]
    fn wind_sets_combine() {
        let four = [pong("E"), pong("S"), pong("W"), pong("N"), sheung("1t")];
        assert_eq!(fired(winds, "5s", &four), vec![Category::DaiSeiHei]);

        let three = [pong("E"), pong("S"), pong("W"), sheung("1t"), sheung("4t")];
        assert_eq!(fired(winds, "N", &three), vec![Category::SiuSeiHei]);
        assert_eq!(fired(winds, "5s", &three), vec![Category::DaiSamFung]);

        let two = [pong("E"), pong("S"), sheung("1t"), sheung("4t"), sheung("7t")];
        assert_eq!(fired(winds, "W", &two), vec![Category::SiuSamFung]);
    }

    #[test]
    fn single_winds_carry_seat_values() {
        let m = [pong("E"), pong("S"), sheung("1t"), sheung("4t"), sheung("7t")];
        let mut ctx = claimed("9m");
        ctx.prevailing_wind = Wind::South;
        let t = run(winds, "5s", &m, &HandState::new(), &ctx, &[]);
        assert_eq!(
            t.entries(),
            &[
                ScoredCategory {
                    category: Category::East,
                    value: 1
                },
                ScoredCategory {
                    category: Category::South,
                    value: 3
                },
            ]
        );
    }

    #[test]
    fn dragon_sets_combine() {
        let three = [pong("C"), pong("F"), pong("P"), sheung("1t"), sheung("4t")];
        assert_eq!(fired(dragons, "5s", &three), vec![Category::DaiSamYuen]);

        let two = [pong("C"), pong("F"), sheung("1t"), sheung("4t"), sheung("7t")];
        assert_eq!(fired(dragons, "P", &two), vec![Category::SiuSamYuen]);
        assert_eq!(
            fired(dragons, "5s", &two),
            vec![Category::RedDragon, Category::GreenDragon]
        );
    }

    // ===== 無字, 門清 =====

    #[test]
    fn no_words_merges_with_no_flowers_and_ping_wu() {
        let m = [sheung("1t"), sheung("4t"), sheung("7t"), sheung("2s"), sheung("6m")];
        let h = HandState::new();
        let ctx = claimed("9m");

        let t = run(no_words, "5s", &m, &h, &ctx, &[Category::MoFa, Category::PingWu]);
        assert_eq!(cats(&t), vec![Category::MoZiFaPingWu]);

        let t = run(no_words, "5s", &m, &h, &ctx, &[Category::MoFa]);
        assert_eq!(cats(&t), vec![Category::MoZiFa]);

        let t = run(no_words, "E", &m, &h, &ctx, &[Category::MoFa]);
        assert_eq!(cats(&t), vec![Category::MoFa]);
    }

    #[test]
    fn concealed_hand() {
        let m = [sheung("1t"), sheung("4t"), sheung("7t"), sheung("2s"), pong("9s")];
        let h = HandState::new();

        let drawn = WinContext::self_draw(Wind::South, tile("9s"));
        let t = run(concealed, "E", &m, &h, &drawn, &[Category::SelfDraw]);
        assert_eq!(cats(&t), vec![Category::MunTsingSelfDraw]);

        let t = run(concealed, "E", &m, &h, &claimed("9s"), &[]);
        assert_eq!(cats(&t), vec![Category::MunTsing]);

        let mut open = HandState::new();
        open.reveal(pong("9s"));
        let t = run(concealed, "E", &m[..4], &open, &claimed("9s"), &[]);
        assert!(cats(&t).is_empty());
    }

    #[test]
    fn single_category_stages() {
        let runs = [sheung("1t"), sheung("4t"), sheung("7t"), sheung("2s"), sheung("6m")];
        assert_eq!(fired(ping_wu, "5s", &runs), vec![Category::PingWu]);
        assert_eq!(fired(tseung_an, "5s", &runs), vec![Category::TseungAn]);
        assert!(fired(tseung_an, "9s", &runs).is_empty());
        assert!(fired(self_draw, "5s", &runs).is_empty());

        let m = [pong("3t"), sheung("1t"), sheung("4s"), sheung("2m"), pong("E")];
        let t = run(dui_pong, "5s", &m, &HandState::new(), &claimed("3t"), &[]);
        assert_eq!(cats(&t), vec![Category::DuiPong]);
        assert!(fired(ping_wu, "5s", &m).is_empty());

        let mut ctx = WinContext::self_draw(Wind::South, tile("6m"));
        ctx.multiple_winners = true;
        let t = run(self_draw, "5s", &runs, &HandState::new(), &ctx, &[]);
        assert_eq!(cats(&t), vec![Category::SelfDraw]);
        let t = run(multiple_winners, "5s", &runs, &HandState::new(), &ctx, &[]);
        assert_eq!(cats(&t), vec![Category::MultipleWinners]);
    }

    #[test]
    fn each_kong_counts() {
        let mut h = HandState::new();
        h.reveal(Meld::BrightKong {
            tile: tile("5t"),
            self_extended: false,
        });
        h.reveal(Meld::DarkKong(tile("E")));
        let m = [sheung("1s"), sheung("4s"), sheung("7m")];
        let t = run(kongs, "5s", &m, &h, &claimed("9m"), &[]);
        assert_eq!(cats(&t), vec![Category::BrightKong, Category::DarkKong]);
    }

    // ===== 門 =====

    #[test]
    fn suit_mix() {
        let tung = [sheung("1t"), sheung("4t"), pong("9t"), pong("2t"), sheung("6t")];
        assert_eq!(fired(suits, "5t", &tung), vec![Category::TsingYatSik]);
        assert_eq!(fired(suits, "E", &tung), vec![Category::WunYatSik]);

        let two = [sheung("1t"), sheung("4t"), pong("9s"), pong("2s"), sheung("6t")];
        assert_eq!(fired(suits, "5s", &two), vec![Category::KutYatMun]);
        assert!(fired(suits, "E", &two).is_empty());

        let all = [sheung("1t"), sheung("2s"), sheung("3m"), pong("E"), pong("9m")];
        assert_eq!(fired(suits, "C", &all), vec![Category::MmMunChai]);

        let h = with_flowers(&["1f", "5f"]);
        let t = run(suits, "C", &all, &h, &claimed("9m"), &[]);
        assert_eq!(cats(&t), vec![Category::TsatMunChai]);
    }

    #[test]
    fn five_sets() {
        let m = [pong("1t"), pong("3s"), pong("5m"), pong("E"), pong("C")];
        assert_eq!(fired(all_sets, "9m", &m), vec![Category::DuiDuiWu]);

        let t = run(
            all_sets,
            "9m",
            &m,
            &HandState::new(),
            &WinContext::self_draw(Wind::South, tile("9m")),
            &[Category::MunTsingSelfDraw],
        );
        assert_eq!(cats(&t), vec![Category::KanKanWu]);
    }

    // ===== 獨獨, 假獨 =====

    fn wait(pair: &str, melds: &[Meld], win: &str) -> Vec<Category> {
        cats(&run(single_wait, pair, melds, &HandState::new(), &claimed(win), &[]))
    }

    #[test]
    fn middle_wait() {
        let m = [sheung("4t"), sheung("1s"), pong("E"), pong("S"), pong("W")];
        assert_eq!(wait("9m", &m, "5t"), vec![Category::DukDuk]);
    }

    #[test]
    fn edge_waits() {
        let low = [sheung("1t"), sheung("1s"), pong("E"), pong("S"), pong("W")];
        assert_eq!(wait("9m", &low, "3t"), vec![Category::DukDuk]);

        let high = [sheung("7t"), sheung("1s"), pong("E"), pong("S"), pong("W")];
        assert_eq!(wait("9m", &high, "7t"), vec![Category::DukDuk]);
    }

    #[test]
    fn three_closing_one_run_and_opening_another_is_false() {
        let m = [sheung("1t"), sheung("3t"), pong("E"), pong("S"), pong("W")];
        assert_eq!(wait("9m", &m, "3t"), vec![Category::GaDuk]);
    }

    #[test]
    fn seven_opening_one_run_and_closing_another_is_false() {
        let m = [sheung("5t"), sheung("7t"), pong("E"), pong("S"), pong("W")];
        assert_eq!(wait("9m", &m, "7t"), vec![Category::GaDuk]);
    }

    #[test]
    fn two_sided_wait_is_not_single() {
        let m = [sheung("4t"), sheung("1s"), pong("E"), pong("S"), pong("W")];
        assert!(wait("9m", &m, "4t").is_empty());
    }

    #[test]
    fn pair_waits() {
        let m = [sheung("1t"), sheung("7m"), pong("E"), pong("S"), pong("W")];
        assert_eq!(wait("5s", &m, "5s"), vec![Category::DukDuk]);

        // 4t 5t 6t 7t also waits on 7t
        let m = [sheung("5t"), sheung("1s"), pong("E"), pong("S"), pong("W")];
        assert_eq!(wait("4t", &m, "4t"), vec![Category::GaDuk]);
    }

    // ===== 么九 =====

    #[test]
    fn terminal_categories() {
        let plain = [sheung("2t"), sheung("3s"), sheung("4m"), pong("5t"), pong("6s")];
        assert_eq!(fired(terminals, "8m", &plain), vec![Category::DuenYiu]);

        let ends = [pong("1t"), pong("9t"), pong("1s"), pong("9s"), pong("1m")];
        assert_eq!(fired(terminals, "9m", &ends), vec![Category::TsingYiu]);

        let mixed = [pong("1t"), pong("9t"), pong("E"), pong("C"), pong("1s")];
        assert_eq!(fired(terminals, "9s", &mixed), vec![Category::WunYiu]);

        let carried = [sheung("1t"), sheung("7s"), sheung("1m"), pong("9t"), pong("1s")];
        assert_eq!(fired(terminals, "9m", &carried), vec![Category::TsuenDaiYiu]);

        let with_words = [sheung("1t"), sheung("7s"), pong("E"), pong("9m"), pong("C")];
        assert_eq!(
            fired(terminals, "1s", &with_words),
            vec![Category::TsuenDaiWunYiu]
        );
    }

    // ===== 四歸 =====

    #[test]
    fn four_copies_by_spread() {
        let m = [sheung("1t"), sheung("2t"), pong("E"), pong("S"), pong("W")];
        assert_eq!(fired(four_of_a_kind, "2t", &m), vec![Category::SeiKwaiYee]);

        // a kong is one group
        let mut h = HandState::new();
        h.reveal(Meld::DarkKong(tile("2t")));
        let m = [sheung("4t"), pong("E"), pong("S"), pong("W")];
        let t = run(four_of_a_kind, "5s", &m, &h, &claimed("9m"), &[]);
        assert!(cats(&t).is_empty());
    }

    // ===== 暗刻 =====

    #[test]
    fn claimed_tile_does_not_conceal_its_pong() {
        let m = [pong("1t"), pong("2s"), pong("3m"), sheung("5t"), sheung("6s")];
        let h = HandState::new();

        let t = run(concealed_sets, "E", &m, &h, &claimed("3m"), &[]);
        assert_eq!(cats(&t), vec![Category::YeeUmHak]);

        let drawn = WinContext::self_draw(Wind::South, tile("3m"));
        let t = run(concealed_sets, "E", &m, &h, &drawn, &[]);
        assert_eq!(cats(&t), vec![Category::SamUmHak]);

        let t = run(concealed_sets, "E", &m, &h, &drawn, &[Category::KanKanWu]);
        assert_eq!(cats(&t), vec![Category::KanKanWu]);
    }

    // ===== 同順, 般高, 相逢 =====

    #[test]
    fn same_rank_runs() {
        let four = [sheung("2t"), sheung("2s"), sheung("2m"), sheung("2t"), pong("E")];
        assert_eq!(fired(same_rank_sheungs, "5s", &four), vec![Category::SeiTongShun]);

        let five = [sheung("2t"), sheung("2s"), sheung("2m"), sheung("2t"), sheung("2s")];
        assert_eq!(fired(same_rank_sheungs, "E", &five), vec![Category::MmTongShun]);

        let fung = [sheung("2t"), sheung("5t"), sheung("2s"), sheung("2m"), pong("E")];
        assert_eq!(fired(same_rank_sheungs, "5s", &fung), vec![Category::SamSheungFung]);

        let ko = [sheung("3t"), sheung("3t"), sheung("3t"), sheung("6s"), pong("E")];
        assert_eq!(fired(same_rank_sheungs, "5s", &ko), vec![Category::SamPunKo]);
    }

    // ===== 兄弟, 姊妹 =====

    #[test]
    fn sets_of_one_rank() {
        let m = [pong("3t"), pong("3s"), pong("3m"), sheung("5t"), sheung("6s")];
        assert_eq!(fired(same_rank_sets, "E", &m), vec![Category::DaiSamHingDai]);

        let m = [pong("3t"), pong("3s"), sheung("5t"), sheung("6s"), pong("E")];
        assert_eq!(fired(same_rank_sets, "3m", &m), vec![Category::SiuSamHingDai]);
        assert_eq!(fired(same_rank_sets, "5m", &m), vec![Category::YeeHingDai]);
    }

    #[test]
    fn consecutive_sets() {
        let m = [pong("3t"), pong("4t"), pong("5t"), sheung("1s"), sheung("1m")];
        assert_eq!(fired(adjacent_sets, "E", &m), vec![Category::DaiSamTszMui]);

        let m = [pong("3t"), pong("4t"), sheung("1s"), sheung("1m"), pong("E")];
        assert_eq!(fired(adjacent_sets, "5t", &m), vec![Category::SiuSamTszMui]);
        assert_eq!(fired(adjacent_sets, "2t", &m), vec![Category::SiuSamTszMui]);

        let words = [pong("E"), pong("S"), sheung("1s"), sheung("1m"), sheung("4m")];
        assert!(fired(adjacent_sets, "W", &words).is_empty());
    }

    #[test]
    fn sets_of_one_and_nine() {
        let m = [pong("1t"), pong("9t"), sheung("2s"), sheung("3m"), pong("E")];
        assert_eq!(fired(lou_siu, "5s", &m), vec![Category::LouSiu]);

        let m = [pong("E"), pong("N"), sheung("2s"), sheung("3m"), pong("C")];
        assert!(fired(lou_siu, "5s", &m).is_empty());
    }

    // ===== 龍 =====

    #[test]
    fn revealed_run_makes_a_bright_lung() {
        let mut h = HandState::new();
        h.reveal(sheung("1t"));
        let m = [sheung("4t"), sheung("7t"), pong("E"), pong("S")];
        let t = run(lung, "5s", &m, &h, &claimed("9m"), &[]);
        assert_eq!(cats(&t), vec![Category::MingLung]);
    }

    #[test]
    fn zhap_lung_dark_or_bright() {
        let m = [sheung("1t"), sheung("4s"), sheung("7m"), pong("E"), pong("S")];
        assert_eq!(fired(zhap_lung, "5s", &m), vec![Category::UmZhapLung]);

        let mut h = HandState::new();
        h.reveal(sheung("1t"));
        let t = run(zhap_lung, "5s", &m[1..], &h, &claimed("9m"), &[]);
        assert_eq!(cats(&t), vec![Category::MingZhapLung]);
    }

    // ===== 求人 =====

    #[test]
    fn every_group_revealed() {
        let mut h = HandState::new();
        for m in [pong("E"), pong("S"), sheung("1t"), sheung("4s"), pong("9m")] {
            h.reveal(m);
        }
        let t = run(kau_yan, "5s", &[], &h, &claimed("5s"), &[]);
        assert_eq!(cats(&t), vec![Category::TsuenKauYan]);

        let drawn = WinContext::self_draw(Wind::South, tile("5s"));
        let t = run(kau_yan, "5s", &[], &h, &drawn, &[]);
        assert_eq!(cats(&t), vec![Category::BoonKauYan]);
    }

    // ===== 場況 =====

    fn situation(ctx: &WinContext, rule: Rule, seed: &[Category]) -> Vec<Category> {
        let m = [sheung("1t"), sheung("4t"), sheung("7t"), sheung("2s"), sheung("6m")];
        cats(&run(rule, "5s", &m, &HandState::new(), ctx, seed))
    }

    #[test]
    fn after_events() {
        let cases = [
            (LastEvent::Flower, true, Some(Category::FaSheungSelfDraw)),
            (LastEvent::Kong, true, Some(Category::KongSheungSelfDraw)),
            (LastEvent::DoubleKong, true, Some(Category::KongSheungKongSelfDraw)),
            (
                LastEvent::KongAfterRobbedKong,
                true,
                Some(Category::CheungKongSheungKongSelfDraw),
            ),
            (LastEvent::RobbedKong, false, Some(Category::CheungKongSikWu)),
            (LastEvent::RobbedKong, true, None),
            (LastEvent::Kong, false, None),
            (LastEvent::Discard, true, None),
        ];
        for (event, drawn, want) in cases {
            let mut ctx = if drawn {
                WinContext::self_draw(Wind::South, tile("6m"))
            } else {
                claimed("6m")
            };
            ctx.last_event = event;
            let got = situation(&ctx, after_event, &[]);
            assert_eq!(got, want.into_iter().collect::<Vec<_>>(), "{:?}", event);
        }
    }

    #[test]
    fn wall_depth() {
        let mut drawn = WinContext::self_draw(Wind::South, tile("6m"));
        drawn.tiles_left = WALL_RESERVE;
        assert_eq!(situation(&drawn, wall, &[]), vec![Category::HoiDaiLaoYuet]);

        for (left, want) in [
            (8, vec![Category::TsatTsekLoi]),
            (11, vec![Category::TsatTsekLoi]),
            (12, vec![Category::SapTsekLoi]),
            (14, vec![Category::SapTsekLoi]),
            (15, vec![]),
        ] {
            let mut ctx = claimed("6m");
            ctx.tiles_left = left;
            assert_eq!(situation(&ctx, wall, &[]), want, "{} left", left);
        }
    }

    #[test]
    fn early_wins() {
        let mut ctx = claimed("6m");
        ctx.discard_count = 3;
        assert_eq!(situation(&ctx, first_discards, &[]), vec![Category::YanWu]);

        let mut drawn = WinContext::self_draw(Wind::South, tile("6m"));
        drawn.discard_count = 1;
        assert_eq!(situation(&drawn, first_discards, &[]), vec![Category::YanWu]);

        drawn.discard_count = 5;
        assert!(situation(&drawn, first_discards, &[]).is_empty());
    }

    #[test]
    fn chicken_only_at_one() {
        let ctx = claimed("6m");
        assert_eq!(
            situation(&ctx, chicken, &[Category::MoFa]),
            vec![Category::MoFa, Category::ChickenHand]
        );
        assert_eq!(
            situation(&ctx, chicken, &[Category::MoFa, Category::MunTsing]),
            vec![Category::MoFa, Category::MunTsing]
        );
    }

    #[test]
    fn dealer_streak_value() {
        let mut ctx = WinContext::claimed(Wind::South, Wind::East, tile("6m"));
        ctx.dealer_streak = 2;
        let m = [sheung("1t"), sheung("4t"), sheung("7t"), sheung("2s"), sheung("6m")];
        let t = run(zhong, "5s", &m, &HandState::new(), &ctx, &[]);
        assert_eq!(t.entries()[0].value, 5);

        ctx.dealer_streak = u32::MAX;
        let t = run(zhong, "5s", &m, &HandState::new(), &ctx, &[]);
        assert_eq!(t.entries()[0].value, u32::MAX);
    }

    // ===== 全体 =====

    #[test]
    fn small_four_winds_hand() {
        let d = Decomposition::Standard {
            pair: Tile::NORTH,
            melds: vec![pong("E"), pong("S"), pong("W"), sheung("1t"), pong("5s")],
        };
        let got: Vec<Category> = score_decomposition(&d, &HandState::new(), &claimed("N"))
            .iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(
            got,
            vec![
                Category::MoFa,
                Category::SiuSeiHei,
                Category::MunTsing,
                Category::DukDuk,
                Category::SeiUmHak,
            ]
        );
    }

    #[test]
    fn special_shapes_score_their_own_category() {
        let tiles = |codes: &str| -> Vec<Tile> { codes.split_whitespace().map(tile).collect() };

        let orphans =
            detect_special(&tiles("1t 9t 1s 9s 1m 9m E S W N C F P 1t 2t 3t 4t")).unwrap();
        let got: Vec<Category> = score_decomposition(&orphans, &HandState::new(), &claimed("4t"))
            .iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(got, vec![Category::SapSamYiu, Category::MoFa]);

        let lik = detect_special(&tiles("1t 1t 1t 2t 2t 3s 3s 4m 4m E E S S C C P P")).unwrap();
        let got: Vec<Category> = score_decomposition(&lik, &HandState::new(), &claimed("P"))
            .iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(got, vec![Category::LikKuLikKu, Category::MoFa]);
    }
}
