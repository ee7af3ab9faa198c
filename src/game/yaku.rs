//! 役定義與判定
//!
//! # 架構
//!
//! 使用聲明式 `YAKU_DEFS` 表定義可由得牌判定的 12 種役，順序即判定順序：
//! 基礎分數由高到低，同分時要求張數較多者在前，滓最後。
//!
//! 判定規則是封閉的 `YakuRule` 枚舉，以 `match` 分派：
//! - `ExactSet`: 指定卡牌全部到手
//! - `Count`: 某類別張數達門檻，1 + 超出張數
//! - `Bright`: 光牌系列（三光 / 四光 / 雨四光 / 五光）
//! - `SakePair`: 菊上杯 + 指定光牌
//!
//! 手四與親權是局事件，不經 `evaluate` 產生。

use serde::{Deserialize, Serialize};

use super::cards::{
    card, CardId, Category, BOAR, BRIGHTS, CHERRY_CURTAIN, CHERRY_RED_POEM,
    CHRYSANTHEMUM_BLUE_POEM, DEER, MAPLE_BLUE_POEM, PAMPAS_MOON, PEONY_BLUE_POEM,
    PEONY_BUTTERFLIES, PINE_RED_POEM, PLUM_RED_POEM, RAIN_MAN, SAKE_CUP,
};
use super::constants::{CHAFF_THRESHOLD, RIBBON_THRESHOLD, SEED_THRESHOLD};

/// 役 ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YakuId {
    Goko,
    Shiko,
    AmeShiko,
    Sanko,
    InoShikaCho,
    Akatan,
    Aotan,
    HanamiZake,
    TsukimiZake,
    Tane,
    Tanzaku,
    Kasu,
    // 局事件
    Teshi,
    OyaKen,
}

/// 計數類別
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountFamily {
    Seed,
    Ribbon,
    Chaff,
}

impl CountFamily {
    fn includes(&self, category: Category) -> bool {
        match self {
            CountFamily::Seed => category.counts_as_seed(),
            CountFamily::Ribbon => category.is_ribbon(),
            CountFamily::Chaff => category == Category::Chaff,
        }
    }
}

/// 光牌系列等級
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrightTier {
    Three,     // 三光：不含雨中人的光牌 >= 3
    Four,      // 四光：不含雨中人的光牌 >= 4
    RainyFour, // 雨四光：含雨中人的光牌 >= 4
    Five,      // 五光：五張全到手
}

/// 役判定規則
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YakuRule {
    ExactSet(&'static [CardId]),
    Count { family: CountFamily, threshold: usize },
    Bright(BrightTier),
    SakePair(CardId),
}

/// 役定義
#[derive(Clone, Copy, Debug)]
pub struct YakuDef {
    pub id: YakuId,
    pub name: &'static str,
    pub description: &'static str,
    pub points: u32,
    pub rule: YakuRule,
}

/// 役定義表（判定順序）
pub static YAKU_DEFS: [YakuDef; 12] = [
    YakuDef { id: YakuId::Goko, name: "Goko", description: "All five bright cards.", points: 10, rule: YakuRule::Bright(BrightTier::Five) },
    YakuDef { id: YakuId::Shiko, name: "Shiko", description: "Four bright cards, not counting the Rain Man.", points: 8, rule: YakuRule::Bright(BrightTier::Four) },
    YakuDef { id: YakuId::AmeShiko, name: "Ame-Shiko", description: "Four bright cards including the Rain Man.", points: 7, rule: YakuRule::Bright(BrightTier::RainyFour) },
    YakuDef { id: YakuId::Sanko, name: "Sanko", description: "Three bright cards, not counting the Rain Man.", points: 5, rule: YakuRule::Bright(BrightTier::Three) },
    YakuDef { id: YakuId::InoShikaCho, name: "Ino-Shika-Cho", description: "Boar, Deer and Butterflies.", points: 5, rule: YakuRule::ExactSet(&[BOAR, DEER, PEONY_BUTTERFLIES]) },
    YakuDef { id: YakuId::Akatan, name: "Akatan", description: "The three red poem ribbons.", points: 5, rule: YakuRule::ExactSet(&[PINE_RED_POEM, PLUM_RED_POEM, CHERRY_RED_POEM]) },
    YakuDef { id: YakuId::Aotan, name: "Aotan", description: "The three blue poem ribbons.", points: 5, rule: YakuRule::ExactSet(&[PEONY_BLUE_POEM, CHRYSANTHEMUM_BLUE_POEM, MAPLE_BLUE_POEM]) },
    YakuDef { id: YakuId::HanamiZake, name: "Hanami-zake", description: "Cherry Curtain and the Sake Cup.", points: 5, rule: YakuRule::SakePair(CHERRY_CURTAIN) },
    YakuDef { id: YakuId::TsukimiZake, name: "Tsukimi-zake", description: "Pampas Moon and the Sake Cup.", points: 5, rule: YakuRule::SakePair(PAMPAS_MOON) },
    YakuDef { id: YakuId::Tane, name: "Tane", description: "Five seed cards, +1 per extra.", points: 1, rule: YakuRule::Count { family: CountFamily::Seed, threshold: SEED_THRESHOLD } },
    YakuDef { id: YakuId::Tanzaku, name: "Tanzaku", description: "Five ribbon cards, +1 per extra.", points: 1, rule: YakuRule::Count { family: CountFamily::Ribbon, threshold: RIBBON_THRESHOLD } },
    YakuDef { id: YakuId::Kasu, name: "Kasu", description: "Ten chaff cards, +1 per extra.", points: 1, rule: YakuRule::Count { family: CountFamily::Chaff, threshold: CHAFF_THRESHOLD } },
];

impl YakuId {
    /// 顯示名稱
    pub fn name(&self) -> &'static str {
        match self {
            YakuId::Teshi => "Teshi",
            YakuId::OyaKen => "Oya-ken",
            other => other.def().map(|d| d.name).unwrap_or("?"),
        }
    }

    /// 對應的判定定義（局事件沒有）
    pub fn def(&self) -> Option<&'static YakuDef> {
        YAKU_DEFS.iter().find(|d| d.id == *self)
    }

    /// 光牌系列
    pub fn is_bright_family(&self) -> bool {
        matches!(self, YakuId::Goko | YakuId::Shiko | YakuId::AmeShiko | YakuId::Sanko)
    }
}

/// 已成立的役
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievedYaku {
    pub id: YakuId,
    pub points: u32,
    pub cards: Vec<CardId>,
}

fn check_rule(rule: &YakuRule, base_points: u32, pile: &[CardId]) -> Option<(u32, Vec<CardId>)> {
    let has = |id: CardId| pile.contains(&id);
    match *rule {
        YakuRule::ExactSet(required) => {
            if required.iter().all(|&id| has(id)) {
                Some((base_points, required.to_vec()))
            } else {
                None
            }
        }
        YakuRule::Count { family, threshold } => {
            let cards: Vec<CardId> = pile
                .iter()
                .copied()
                .filter(|&id| family.includes(card(id).category))
                .collect();
            if cards.len() >= threshold {
                Some((1 + (cards.len() - threshold) as u32, cards))
            } else {
                None
            }
        }
        YakuRule::Bright(tier) => {
            let brights: Vec<CardId> = BRIGHTS.iter().copied().filter(|&id| has(id)).collect();
            let plain: Vec<CardId> = brights.iter().copied().filter(|&id| id != RAIN_MAN).collect();
            let (achieved, cards) = match tier {
                BrightTier::Five => (brights.len() == BRIGHTS.len(), brights),
                BrightTier::Four => (plain.len() >= 4, plain),
                BrightTier::RainyFour => (brights.len() >= 4 && has(RAIN_MAN), brights),
                BrightTier::Three => (plain.len() >= 3, plain),
            };
            achieved.then_some((base_points, cards))
        }
        YakuRule::SakePair(partner) => {
            (has(SAKE_CUP) && has(partner)).then(|| (base_points, vec![partner, SAKE_CUP]))
        }
    }
}

/// 判定得牌堆中所有成立的役
///
/// 純函數，與得牌順序無關。光牌系列互斥：五光成立時不列三光與兩種四光；
/// 四光或雨四光成立時不列三光。
pub fn evaluate(pile: &[CardId]) -> Vec<AchievedYaku> {
    let mut achieved: Vec<AchievedYaku> = Vec::new();

    for def in YAKU_DEFS.iter() {
        // YAKU_DEFS 中光牌系列由高到低排列，先成立者壓過後面的
        let superseded =
            def.id.is_bright_family() && achieved.iter().any(|a| a.id.is_bright_family());
        if superseded {
            continue;
        }

        if let Some((points, cards)) = check_rule(&def.rule, def.points, pile) {
            achieved.push(AchievedYaku { id: def.id, points, cards });
        }
    }

    achieved
}

/// 單一役是否成立（不套用互斥，練習模式用）
pub fn is_satisfied(def: &YakuDef, pile: &[CardId]) -> bool {
    check_rule(&def.rule, def.points, pile).is_some()
}

/// 役點總和
pub fn total_points(achieved: &[AchievedYaku]) -> u32 {
    achieved.iter().map(|a| a.points).sum()
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::{CARD_DEFS, PHOENIX, PINE_CRANE};

    fn ids(achieved: &[AchievedYaku]) -> Vec<YakuId> {
        achieved.iter().map(|a| a.id).collect()
    }

    fn of_category(pred: fn(Category) -> bool, n: usize) -> Vec<CardId> {
        CARD_DEFS.iter().filter(|c| pred(c.category)).map(|c| c.id).take(n).collect()
    }

    #[test]
    fn test_catalog_is_sorted_by_points() {
        for pair in YAKU_DEFS.windows(2) {
            assert!(pair[0].points >= pair[1].points);
        }
        assert_eq!(YAKU_DEFS.last().map(|d| d.id), Some(YakuId::Kasu));
    }

    #[test]
    fn test_empty_pile_has_no_yaku() {
        assert!(evaluate(&[]).is_empty());
    }

    #[test]
    fn test_five_brights_only_goko() {
        let result = evaluate(&BRIGHTS);
        assert_eq!(ids(&result), vec![YakuId::Goko]);
        assert_eq!(total_points(&result), 10);
    }

    #[test]
    fn test_rain_man_turns_shiko_into_goko() {
        let mut pile = vec![PINE_CRANE, CHERRY_CURTAIN, PAMPAS_MOON, PHOENIX];
        let before = evaluate(&pile);
        assert_eq!(ids(&before), vec![YakuId::Shiko]);
        assert_eq!(total_points(&before), 8);

        pile.push(RAIN_MAN);
        let after = evaluate(&pile);
        assert_eq!(ids(&after), vec![YakuId::Goko]);
        assert_eq!(total_points(&after), 10);
    }

    #[test]
    fn test_ame_shiko_suppresses_sanko() {
        let pile = [PINE_CRANE, CHERRY_CURTAIN, PAMPAS_MOON, RAIN_MAN];
        assert_eq!(ids(&evaluate(&pile)), vec![YakuId::AmeShiko]);
    }

    #[test]
    fn test_rain_man_does_not_count_for_sanko() {
        let pile = [PINE_CRANE, CHERRY_CURTAIN, RAIN_MAN];
        assert!(evaluate(&pile).is_empty());

        let pile = [PINE_CRANE, CHERRY_CURTAIN, PHOENIX];
        assert_eq!(ids(&evaluate(&pile)), vec![YakuId::Sanko]);
    }

    #[test]
    fn test_seed_threshold() {
        let seeds = of_category(|c| c == Category::Seed, 6);
        assert!(evaluate(&seeds[..4]).is_empty());

        let five = evaluate(&seeds[..5]);
        assert_eq!(ids(&five), vec![YakuId::Tane]);
        assert_eq!(total_points(&five), 1);

        let six = evaluate(&seeds);
        assert_eq!(total_points(&six), 2);
    }

    #[test]
    fn test_sake_cup_counts_as_seed() {
        let mut pile = of_category(|c| c == Category::Seed, 4);
        pile.push(SAKE_CUP);
        assert_eq!(ids(&evaluate(&pile)), vec![YakuId::Tane]);
    }

    #[test]
    fn test_chaff_threshold_is_uncapped() {
        let chaff = of_category(|c| c == Category::Chaff, 24);
        assert!(evaluate(&chaff[..9]).is_empty());
        assert_eq!(total_points(&evaluate(&chaff[..10])), 1);
        assert_eq!(total_points(&evaluate(&chaff)), 15);
    }

    #[test]
    fn test_ribbon_sets_stack_with_tanzaku() {
        let pile = [
            PINE_RED_POEM, PLUM_RED_POEM, CHERRY_RED_POEM,
            PEONY_BLUE_POEM, CHRYSANTHEMUM_BLUE_POEM, MAPLE_BLUE_POEM,
        ];
        let result = evaluate(&pile);
        assert_eq!(ids(&result), vec![YakuId::Akatan, YakuId::Aotan, YakuId::Tanzaku]);
        assert_eq!(total_points(&result), 12);
    }

    #[test]
    fn test_sake_pairs_and_order_independence() {
        let pile = [SAKE_CUP, PAMPAS_MOON, CHERRY_CURTAIN];
        let reversed = [CHERRY_CURTAIN, PAMPAS_MOON, SAKE_CUP];
        let result = evaluate(&pile);
        assert_eq!(ids(&result), vec![YakuId::HanamiZake, YakuId::TsukimiZake]);
        assert_eq!(result, evaluate(&reversed));
    }

    #[test]
    fn test_ino_shika_cho_contributing_cards() {
        let result = evaluate(&[DEER, PEONY_BUTTERFLIES, BOAR, 2]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].cards, vec![BOAR, DEER, PEONY_BUTTERFLIES]);
    }

    #[test]
    fn test_is_satisfied_ignores_suppression() {
        let sanko = YakuId::Sanko.def().unwrap();
        assert!(is_satisfied(sanko, &BRIGHTS));
        assert!(!is_satisfied(sanko, &[PINE_CRANE, RAIN_MAN]));
    }

    #[test]
    fn test_round_event_names() {
        assert_eq!(YakuId::Teshi.name(), "Teshi");
        assert_eq!(YakuId::OyaKen.name(), "Oya-ken");
        assert!(YakuId::Teshi.def().is_none());
        assert_eq!(YakuId::Goko.def().map(|d| d.points), Some(10));
    }
}
