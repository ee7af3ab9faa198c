//! 花札卡牌定義
//!
//! 48 張牌以聲明式 `CARD_DEFS` 表定義，`CardId` 即表中索引（按月份排列）。
//! 卡牌本身永不改變，只有所在位置會變。

use serde::{Deserialize, Serialize};

use super::constants::{CARDS_PER_MONTH, DECK_SIZE, MONTH_COUNT};

/// 卡牌 ID（0..48，按月份排列）
pub type CardId = u8;

/// 卡牌類別
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Bright,          // 光
    Seed,            // 種
    RedPoemRibbon,   // 赤短
    BluePoemRibbon,  // 青短
    PlainRibbon,     // 短冊
    Chaff,           // 滓
    SakeCup,         // 菊上杯（計入種）
}

impl Category {
    /// 是否計入「種」
    pub fn counts_as_seed(&self) -> bool {
        matches!(self, Category::Seed | Category::SakeCup)
    }

    /// 是否為短冊
    pub fn is_ribbon(&self) -> bool {
        matches!(
            self,
            Category::RedPoemRibbon | Category::BluePoemRibbon | Category::PlainRibbon
        )
    }
}

/// 卡牌定義
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardDef {
    pub id: CardId,
    pub name: &'static str,
    pub month: u8, // 1..=12
    pub category: Category,
    pub points: u8,
}

const fn def(id: CardId, name: &'static str, month: u8, category: Category, points: u8) -> CardDef {
    CardDef { id, name, month, category, points }
}

use Category::{Bright, BluePoemRibbon, Chaff, PlainRibbon, RedPoemRibbon, SakeCup, Seed};

/// 卡牌定義表（順序與 CardId 一致）
pub static CARD_DEFS: [CardDef; DECK_SIZE] = [
    // 1: 松
    def(0, "Pine Crane", 1, Bright, 20),
    def(1, "Pine Red Poem Ribbon", 1, RedPoemRibbon, 5),
    def(2, "Pine Chaff 1", 1, Chaff, 1),
    def(3, "Pine Chaff 2", 1, Chaff, 1),
    // 2: 梅
    def(4, "Plum Bush Warbler", 2, Seed, 10),
    def(5, "Plum Red Poem Ribbon", 2, RedPoemRibbon, 5),
    def(6, "Plum Chaff 1", 2, Chaff, 1),
    def(7, "Plum Chaff 2", 2, Chaff, 1),
    // 3: 櫻
    def(8, "Cherry Curtain", 3, Bright, 20),
    def(9, "Cherry Red Poem Ribbon", 3, RedPoemRibbon, 5),
    def(10, "Cherry Chaff 1", 3, Chaff, 1),
    def(11, "Cherry Chaff 2", 3, Chaff, 1),
    // 4: 藤
    def(12, "Wisteria Cuckoo", 4, Seed, 10),
    def(13, "Wisteria Ribbon", 4, PlainRibbon, 5),
    def(14, "Wisteria Chaff 1", 4, Chaff, 1),
    def(15, "Wisteria Chaff 2", 4, Chaff, 1),
    // 5: 菖蒲
    def(16, "Iris Eight-Plank Bridge", 5, Seed, 10),
    def(17, "Iris Ribbon", 5, PlainRibbon, 5),
    def(18, "Iris Chaff 1", 5, Chaff, 1),
    def(19, "Iris Chaff 2", 5, Chaff, 1),
    // 6: 牡丹
    def(20, "Peony Butterflies", 6, Seed, 10),
    def(21, "Peony Blue Poem Ribbon", 6, BluePoemRibbon, 5),
    def(22, "Peony Chaff 1", 6, Chaff, 1),
    def(23, "Peony Chaff 2", 6, Chaff, 1),
    // 7: 萩
    def(24, "Bush Clover Boar", 7, Seed, 10),
    def(25, "Bush Clover Ribbon", 7, PlainRibbon, 5),
    def(26, "Bush Clover Chaff 1", 7, Chaff, 1),
    def(27, "Bush Clover Chaff 2", 7, Chaff, 1),
    // 8: 芒
    def(28, "Pampas Moon", 8, Bright, 20),
    def(29, "Pampas Geese", 8, Seed, 10),
    def(30, "Pampas Chaff 1", 8, Chaff, 1),
    def(31, "Pampas Chaff 2", 8, Chaff, 1),
    // 9: 菊
    def(32, "Chrysanthemum Sake Cup", 9, SakeCup, 10),
    def(33, "Chrysanthemum Blue Poem Ribbon", 9, BluePoemRibbon, 5),
    def(34, "Chrysanthemum Chaff 1", 9, Chaff, 1),
    def(35, "Chrysanthemum Chaff 2", 9, Chaff, 1),
    // 10: 楓
    def(36, "Maple Deer", 10, Seed, 10),
    def(37, "Maple Blue Poem Ribbon", 10, BluePoemRibbon, 5),
    def(38, "Maple Chaff 1", 10, Chaff, 1),
    def(39, "Maple Chaff 2", 10, Chaff, 1),
    // 11: 柳
    def(40, "Willow Rain Man", 11, Bright, 20),
    def(41, "Willow Swallow", 11, Seed, 10),
    def(42, "Willow Ribbon", 11, PlainRibbon, 5),
    def(43, "Willow Lightning", 11, Chaff, 1),
    // 12: 桐
    def(44, "Paulownia Phoenix", 12, Bright, 20),
    def(45, "Paulownia Chaff 1", 12, Chaff, 1),
    def(46, "Paulownia Chaff 2", 12, Chaff, 1),
    def(47, "Paulownia Chaff 3", 12, Chaff, 1),
];

// 役判定用到的特定卡牌
pub const PINE_CRANE: CardId = 0;
pub const PINE_RED_POEM: CardId = 1;
pub const PLUM_RED_POEM: CardId = 5;
pub const CHERRY_CURTAIN: CardId = 8;
pub const CHERRY_RED_POEM: CardId = 9;
pub const PEONY_BUTTERFLIES: CardId = 20;
pub const PEONY_BLUE_POEM: CardId = 21;
pub const BOAR: CardId = 24;
pub const PAMPAS_MOON: CardId = 28;
pub const SAKE_CUP: CardId = 32;
pub const CHRYSANTHEMUM_BLUE_POEM: CardId = 33;
pub const DEER: CardId = 36;
pub const MAPLE_BLUE_POEM: CardId = 37;
pub const RAIN_MAN: CardId = 40;
pub const PHOENIX: CardId = 44;

/// 五張光牌
pub const BRIGHTS: [CardId; 5] = [PINE_CRANE, CHERRY_CURTAIN, PAMPAS_MOON, RAIN_MAN, PHOENIX];

/// 取得卡牌定義
///
/// `id` 超出範圍屬於呼叫端錯誤，直接 panic。
pub fn card(id: CardId) -> &'static CardDef {
    &CARD_DEFS[id as usize]
}

pub fn month_of(id: CardId) -> u8 {
    card(id).month
}

/// 依名稱查詢卡牌（對手協定使用名稱作為識別）
pub fn card_by_name(name: &str) -> Option<&'static CardDef> {
    CARD_DEFS.iter().find(|c| c.name == name)
}

/// 完整 48 張牌組（按 CardId 順序）
pub fn full_deck() -> Vec<CardId> {
    (0..DECK_SIZE as CardId).collect()
}

/// 指定月份的四張牌
pub fn cards_of_month(month: u8) -> impl Iterator<Item = CardId> {
    CARD_DEFS.iter().filter(move |c| c.month == month).map(|c| c.id)
}

/// 同月份的牌
pub fn same_month(a: CardId, b: CardId) -> bool {
    month_of(a) == month_of(b)
}

/// 手牌中是否有某月份四張（手四）
pub fn four_of_a_month(hand: &[CardId]) -> Option<u8> {
    (1..=MONTH_COUNT).find(|&m| hand.iter().filter(|&&id| month_of(id) == m).count() == CARDS_PER_MONTH)
}

// ============================================================================
// 單元測試
// ============================================================================
