use serde::{Deserialize, Serialize};

/// Every named scoring category. The table is fixed; seat- and
/// streak-dependent values are worked out per evaluation (see `rules`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Zhong,
    SelfDraw,
    FaSheungSelfDraw,
    KongSheungSelfDraw,
    CheungKongSikWu,
    KongSheungKongSelfDraw,
    CheungKongSheungKongSelfDraw,
    MultipleWinners,
    MoFa,
    ZengFa,
    LanFa,
    YatToiFa,
    LeungToiFa,
    MoZi,
    MoZiFa,
    East,
    South,
    West,
    North,
    RedDragon,
    GreenDragon,
    WhiteDragon,
    ChickenHand,
    DuiPong,
    GaDuk,
    DukDuk,
    TseungAn,
    LouSiu,
    BrightKong,
    DarkKong,
    PingWu,
    MoZiFaPingWu,
    MunTsing,
    MunTsingSelfDraw,
    KutYatMun,
    MmMunChai,
    TsatMunChai,
    YeeUmHak,
    SamUmHak,
    SeiUmHak,
    MmUmHak,
    YatPunKo,
    SamPunKo,
    SeiPunKo,
    YeeSheungFung,
    SamSheungFung,
    SeiTongShun,
    MmTongShun,
    YeeHingDai,
    SiuSamHingDai,
    DaiSamHingDai,
    SiuSamTszMui,
    DaiSamTszMui,
    SeiKwaiYat,
    SeiKwaiYee,
    SeiKwaiSei,
    MingLung,
    UmLung,
    MingZhapLung,
    UmZhapLung,
    DuiDuiWu,
    WunYatSik,
    TsingYatSik,
    DuenYiu,
    TsuenDaiWunYiu,
    TsuenDaiYiu,
    WunYiu,
    TsingYiu,
    TsuenKauYan,
    BoonKauYan,
    SapTsekLoi,
    TsatTsekLoi,
    HoiDaiLaoYuet,
    SiuSamYuen,
    DaiSamYuen,
    SiuSamFung,
    DaiSamFung,
    SiuSeiHei,
    DaiSeiHei,
    SapSamYiu,
    SapLukBatDap,
    LikKuLikKu,
    KanKanWu,
    TinWu,
    DeiWu,
    YanWu,
}

impl Category {
    pub const ALL: [Category; 86] = [
        Category::Zhong,
        Category::SelfDraw,
        Category::FaSheungSelfDraw,
        Category::KongSheungSelfDraw,
        Category::CheungKongSikWu,
        Category::KongSheungKongSelfDraw,
        Category::CheungKongSheungKongSelfDraw,
        Category::MultipleWinners,
        Category::MoFa,
        Category::ZengFa,
        Category::LanFa,
        Category::YatToiFa,
        Category::LeungToiFa,
        Category::MoZi,
        Category::MoZiFa,
        Category::East,
        Category::South,
        Category::West,
        Category::North,
        Category::RedDragon,
        Category::GreenDragon,
        Category::WhiteDragon,
        Category::ChickenHand,
        Category::DuiPong,
        Category::GaDuk,
        Category::DukDuk,
        Category::TseungAn,
        Category::LouSiu,
        Category::BrightKong,
        Category::DarkKong,
        Category::PingWu,
        Category::MoZiFaPingWu,
        Category::MunTsing,
        Category::MunTsingSelfDraw,
        Category::KutYatMun,
        Category::MmMunChai,
        Category::TsatMunChai,
        Category::YeeUmHak,
        Category::SamUmHak,
        Category::SeiUmHak,
        Category::MmUmHak,
        Category::YatPunKo,
        Category::SamPunKo,
        Category::SeiPunKo,
        Category::YeeSheungFung,
        Category::SamSheungFung,
        Category::SeiTongShun,
        Category::MmTongShun,
        Category::YeeHingDai,
        Category::SiuSamHingDai,
        Category::DaiSamHingDai,
        Category::SiuSamTszMui,
        Category::DaiSamTszMui,
        Category::SeiKwaiYat,
        Category::SeiKwaiYee,
        Category::SeiKwaiSei,
        Category::MingLung,
        Category::UmLung,
        Category::MingZhapLung,
        Category::UmZhapLung,
        Category::DuiDuiWu,
        Category::WunYatSik,
        Category::TsingYatSik,
        Category::DuenYiu,
        Category::TsuenDaiWunYiu,
        Category::TsuenDaiYiu,
        Category::WunYiu,
        Category::TsingYiu,
        Category::TsuenKauYan,
        Category::BoonKauYan,
        Category::SapTsekLoi,
        Category::TsatTsekLoi,
        Category::HoiDaiLaoYuet,
        Category::SiuSamYuen,
        Category::DaiSamYuen,
        Category::SiuSamFung,
        Category::DaiSamFung,
        Category::SiuSeiHei,
        Category::DaiSeiHei,
        Category::SapSamYiu,
        Category::SapLukBatDap,
        Category::LikKuLikKu,
        Category::KanKanWu,
        Category::TinWu,
        Category::DeiWu,
        Category::YanWu,
    ];

    /// Base value. `Zhong` and the four winds are recomputed per win.
    pub fn base_value(self) -> u32 {
        self.entry().2
    }

    pub fn chinese_name(self) -> &'static str {
        self.entry().0
    }

    pub fn description(self) -> &'static str {
        self.entry().1
    }

    fn entry(self) -> (&'static str, &'static str, u32) {
        use Category::*;
        match self {
            Zhong => ("莊", "Zhong", 1),
            SelfDraw => ("自摸", "Self-Draw", 1),
            FaSheungSelfDraw => ("花上自摸", "Self-Draw after flower draw", 1),
            KongSheungSelfDraw => ("摃上自摸", "Self-Draw after Kong", 1),
            CheungKongSikWu => ("搶摃吃糊", "Win by stealing from opponent Kong", 1),
            KongSheungKongSelfDraw => ("摃上摃自摸", "Self-Draw after two consecutive Kongs", 30),
            CheungKongSheungKongSelfDraw => ("搶摃上摃自摸", "Self-Draw after Kong after stealing from Kong", 30),
            MultipleWinners => ("雙響", "Multiple winners", 10),
            MoFa => ("無花", "No flowers", 1),
            ZengFa => ("正花", "Flower corresponding to seat", 2),
            LanFa => ("爛花", "Flower not corresponding to seat", 1),
            YatToiFa => ("一台花", "Four flower tiles of the same type", 10),
            LeungToiFa => ("兩台花", "All flower tiles", 30),
            MoZi => ("無字", "No word tiles", 1),
            MoZiFa => ("無字花", "No word or flower tiles", 5),
            East => ("東風", "East Wind", 1),
            South => ("南風", "South Wind", 1),
            West => ("西風", "West Wind", 1),
            North => ("北風", "North Wind", 1),
            RedDragon => ("紅中", "Red Dragon", 2),
            GreenDragon => ("發財", "Green Dragon", 2),
            WhiteDragon => ("白板", "White Dragon", 2),
            ChickenHand => ("雞糊", "Chicken Hand", 10),
            DuiPong => ("對碰", "Call with two pairs", 1),
            GaDuk => ("假獨", "Call on one tile (sort of)", 1),
            DukDuk => ("獨獨", "Call on one tile", 2),
            TseungAn => ("將眼", "Eye is 2/5/8", 1),
            LouSiu => ("老少", "123 and 789, or 111 and 999, same type", 2),
            BrightKong => ("明摃", "Bright Kong", 1),
            DarkKong => ("暗摃", "Dark Kong", 2),
            PingWu => ("平糊", "All groups are Sheungs", 3),
            MoZiFaPingWu => ("大平糊", "No word or flower tiles, all groups are Sheungs", 10),
            MunTsing => ("門前清", "No revealed groups", 3),
            MunTsingSelfDraw => ("門清自摸", "Self-draw and no revealed groups", 5),
            KutYatMun => ("缺一門", "Only contains two of the following: Tung, Sok, Maan", 5),
            MmMunChai => ("五門齊", "Contains all of Tung, Sok, Maan, Wind, and Dragon", 5),
            TsatMunChai => ("七門齊", "Contains all of Tung, Sok, Maan, Wind, Dragon, and both flower types", 10),
            YeeUmHak => ("二暗刻", "Two groups of 3+ identical tiles, unrevealed", 3),
            SamUmHak => ("三暗刻", "Three groups of 3+ identical tiles, unrevealed", 10),
            SeiUmHak => ("四暗刻", "Four groups of 3+ identical tiles, unrevealed", 30),
            MmUmHak => ("五暗刻", "Five groups of 3+ identical tiles, unrevealed", 80),
            YatPunKo => ("一般高", "Two identical Sheungs", 3),
            SamPunKo => ("三般高", "Three identical Sheungs", 15),
            SeiPunKo => ("四般高", "Four identical Sheungs", 30),
            YeeSheungFung => ("二相逢", "Two Sheungs of same numbers but different types", 2),
            SamSheungFung => ("三相逢", "Three Sheungs of same numbers but different types", 10),
            SeiTongShun => ("四同順", "Four Sheungs of same numbers", 20),
            MmTongShun => ("五同順", "Five Sheungs of same numbers", 40),
            YeeHingDai => ("二兄弟", "Two Pongs/Kongs of same number", 3),
            SiuSamHingDai => ("小三兄弟", "Two Pongs/Kongs plus a pair of same number", 10),
            DaiSamHingDai => ("大三兄弟", "Three Pongs/Kongs of same number", 15),
            SiuSamTszMui => ("小三姊妹", "Two Pongs/Kongs of same type and adjacent numbers, plus a pair adjacent to it", 8),
            DaiSamTszMui => ("大三姊妹", "Three Pongs/Kongs of same type and adjacent numbers", 15),
            SeiKwaiYat => ("四歸一", "Four identical tiles used in two different groups", 5),
            SeiKwaiYee => ("四歸二", "Four identical tiles used in three different groups", 10),
            SeiKwaiSei => ("四歸四", "Four identical tiles used in four different groups", 20),
            MingLung => ("明龍", "123, 456, 789 groups of the same type", 10),
            UmLung => ("暗龍", "123, 456, 789 groups of the same type, none revealed", 20),
            MingZhapLung => ("明雜龍", "123, 456, 789 groups of three different types", 8),
            UmZhapLung => ("暗雜龍", "123, 456, 789 groups of three different types, none revealed", 15),
            DuiDuiWu => ("對對糊", "All groups are Pongs/Kongs", 30),
            WunYatSik => ("混一色", "Only contains word tiles and one of the following: Tung, Sok, Maan", 30),
            TsingYatSik => ("清一色", "Only contains one of the following: Tung, Sok, Maan", 80),
            DuenYiu => ("斷么", "No 1, 9, or word tiles", 5),
            TsuenDaiWunYiu => ("全帶混么", "Every group/pair has 1, 9, or word tiles", 10),
            TsuenDaiYiu => ("全帶么", "Every group/pair has 1 or 9, no word tiles", 15),
            WunYiu => ("混么", "All tiles are 1, 9, or word tiles", 30),
            TsingYiu => ("清么", "All tiles are 1 or 9", 80),
            TsuenKauYan => ("全求人", "All groups are revealed, and won off another player", 15),
            BoonKauYan => ("半求人", "All groups are revealed, and won off self-draw", 8),
            SapTsekLoi => ("十只內", "Only ten or less tiles to draw", 10),
            TsatTsekLoi => ("七只內", "Only seven or less tiles to draw", 20),
            HoiDaiLaoYuet => ("海底撈月", "Win on last tile draw", 20),
            SiuSamYuen => ("小三元", "Contains two Pongs/Kongs and one pair of the three Dragon tiles", 20),
            DaiSamYuen => ("大三元", "Contains three Pongs/Kongs of the three Dragon tiles", 40),
            SiuSamFung => ("小三風", "Contains two Pongs/Kongs and one pair of the four Wind tiles", 15),
            DaiSamFung => ("大三風", "Contains three Pongs/Kongs of the four Wind tiles", 30),
            SiuSeiHei => ("小四喜", "Contains three Pongs/Kongs and one pair of the four Wind tiles", 60),
            DaiSeiHei => ("大四喜", "Contains four Pongs/Kongs of the four Wind tiles", 80),
            SapSamYiu => ("十三么", "The thirteen orphan tiles with one duplicate tile, plus any unrevealed group", 80),
            SapLukBatDap => ("十六不搭", "Sixteen tiles that cannot form any group with one another, with one duplicate tile", 40),
            LikKuLikKu => ("嚦咕嚦咕", "Seven pairs and one Pong, all unrevealed", 40),
            KanKanWu => ("坎坎糊", "Self-draw, no revealed groups, and all Pongs/Kongs", 100),
            TinWu => ("天糊", "Zhong win on first draw", 100),
            DeiWu => ("地糊", "Win on first discard", 80),
            YanWu => ("人糊", "Win within four discards", 80),
        }
    }
}
