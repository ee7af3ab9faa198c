//! 對手觀察快照
//!
//! 交給對手服務的唯讀視角。牌以名稱表示，對手的提案也用名稱回覆，
//! 由 `opponent` 模組再轉回 `CardId` 並重新驗證。

use serde::Serialize;

use crate::game::{card, AchievedYaku, CardId, Category, Phase, Side};

use super::state::GameState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub name: &'static str,
    pub month: u8,
    pub category: Category,
    pub points: u8,
}

impl CardView {
    pub fn of(id: CardId) -> Self {
        let def = card(id);
        Self { name: def.name, month: def.month, category: def.category, points: def.points }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YakuView {
    pub name: &'static str,
    pub points: u32,
}

impl From<&AchievedYaku> for YakuView {
    fn from(a: &AchievedYaku) -> Self {
        Self { name: a.id.name(), points: a.points }
    }
}

/// 對手服務的輸入
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentSnapshot {
    pub hand: Vec<CardView>,
    pub field: Vec<CardView>,
    pub own_captured: Vec<CardView>,
    pub opponent_captured: Vec<CardView>,
    pub draw_pile_size: usize,
    pub own_running_score: i32,
    pub opponent_running_score: i32,
    pub current_multiplier: u32,
    pub opponent_called_koi_koi: bool,
    pub own_current_yaku: Vec<YakuView>,
    pub opponent_current_yaku: Vec<YakuView>,
    /// 只在等待指定翻牌目標時出現
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawn_card: Option<CardView>,
}

fn views(ids: &[CardId]) -> Vec<CardView> {
    ids.iter().map(|&id| CardView::of(id)).collect()
}

/// 以 `side` 的視角建立快照（看不到對方手牌與牌堆內容）
pub fn snapshot_for(state: &GameState, side: Side) -> OpponentSnapshot {
    let own = side.index();
    let other = side.other().index();
    let drawn_card = match state.phase {
        Phase::MatchDrawnToField { side: s, drawn } if s == side => Some(CardView::of(drawn)),
        _ => None,
    };

    OpponentSnapshot {
        hand: views(&state.hands[own]),
        field: views(&state.field),
        own_captured: views(&state.captured[own]),
        opponent_captured: views(&state.captured[other]),
        draw_pile_size: state.draw_pile.len(),
        own_running_score: state.scores[own],
        opponent_running_score: state.scores[other],
        current_multiplier: state.round.multiplier,
        opponent_called_koi_koi: state.round.koikoi_called[other],
        own_current_yaku: state.current_yaku(side).iter().map(YakuView::from).collect(),
        opponent_current_yaku: state.current_yaku(side.other()).iter().map(YakuView::from).collect(),
        drawn_card,
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RuleConfig;

    #[test]
    fn test_snapshot_is_from_own_side() {
        let mut state = GameState::new(5, RuleConfig::default());
        state.hands = [vec![0, 4], vec![20, 24]];
        state.field = vec![2];
        state.captured = [vec![0, 8, 28, 40], Vec::new()];
        state.draw_pile = vec![47];
        state.scores = [40, 20];
        state.round.koikoi_called[0] = true;

        let snapshot = snapshot_for(&state, Side::Opponent);
        let hand: Vec<_> = snapshot.hand.iter().map(|c| c.name).collect();
        assert_eq!(hand, vec!["Peony Butterflies", "Bush Clover Boar"]);
        assert_eq!(snapshot.own_running_score, 20);
        assert_eq!(snapshot.opponent_running_score, 40);
        assert!(snapshot.opponent_called_koi_koi);
        assert_eq!(snapshot.opponent_current_yaku.len(), 1);
        assert_eq!(snapshot.opponent_current_yaku[0].name, "Ame-Shiko");
        assert!(snapshot.own_current_yaku.is_empty());
        assert_eq!(snapshot.drawn_card, None);
    }

    #[test]
    fn test_snapshot_json_uses_camel_case() {
        let mut state = GameState::new(5, RuleConfig::default());
        state.phase = Phase::MatchDrawnToField { side: Side::Opponent, drawn: 47 };
        let json = serde_json::to_value(snapshot_for(&state, Side::Opponent)).unwrap();
        assert_eq!(json["drawPileSize"], 48);
        assert_eq!(json["currentMultiplier"], 1);
        assert!(json["drawnCard"]["name"].is_string());
        assert!(json.get("ownCurrentYaku").is_some());
    }
}
