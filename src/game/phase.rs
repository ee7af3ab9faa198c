//! 回合階段與局結算定義

use serde::{Deserialize, Serialize};

use super::cards::CardId;
use super::yaku::{AchievedYaku, YakuId};

/// 對局雙方
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// 用於 `[T; 2]` 陣列索引
    pub fn index(&self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn both() -> [Side; 2] {
        [Side::Player, Side::Opponent]
    }
}

/// 回合階段
///
/// 發牌、翻牌與役判定在狀態機內部完成，對外只停在需要決策的階段。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum Phase {
    /// 尚未開局
    NotStarted,
    /// 等待該方從手牌出牌
    SelectHandCard { side: Side },
    /// 翻出的牌在場上有兩張同月可選，等待指定
    MatchDrawnToField { side: Side, drawn: CardId },
    /// 該方成役，等待來來 / 勝負決定
    KoiKoiDecision { side: Side },
    /// 本局結束，等待下一局
    RoundOver,
    /// 整場結束
    GameOver,
}

impl Phase {
    /// 目前需要行動的一方
    pub fn acting_side(&self) -> Option<Side> {
        match *self {
            Phase::SelectHandCard { side }
            | Phase::MatchDrawnToField { side, .. }
            | Phase::KoiKoiDecision { side } => Some(side),
            _ => None,
        }
    }
}

/// 局結束原因
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundEndReason {
    /// 開局手四
    Teshi,
    /// 成役後選擇勝負
    Settled,
    /// 手牌用盡時成役，強制勝負
    HandExhausted,
    /// 牌用盡，比較役點
    Exhaustion,
    /// 雙方整局無役，親得分
    OyaKen,
    /// 平手，無人得分
    Draw,
}

/// 結算用的役摘要
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredYaku {
    pub id: YakuId,
    pub name: String,
    pub points: u32,
}

impl ScoredYaku {
    pub fn new(id: YakuId, points: u32) -> Self {
        Self { id, name: id.name().to_string(), points }
    }
}

impl From<&AchievedYaku> for ScoredYaku {
    fn from(a: &AchievedYaku) -> Self {
        ScoredYaku::new(a.id, a.points)
    }
}

/// 一局的結算（持久化層只需要這個值）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub winner: Option<Side>,
    /// 已乘上倍數的得分
    pub points: u32,
    pub yaku: Vec<ScoredYaku>,
    pub reason: RoundEndReason,
    pub multiplier: u32,
    pub next_dealer: Side,
}

/// 整場結算
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub final_scores: [i32; 2],
    pub rounds_played: u32,
    /// 分數較高者；同分為 None
    pub leader: Option<Side>,
    pub abandoned: bool,
}

// ============================================================================
// 單元測試
// ============================================================================
