//! 吃牌判定
//!
//! 同一個 resolver 每回合呼叫兩次：手牌出牌一次、牌堆翻牌一次。
//! 翻牌必須用出牌之後的場牌，這樣出牌造成場上三張同月時翻牌才能一次吃四張。

use log::debug;
use serde::{Deserialize, Serialize};

use super::cards::{card, month_of, same_month, CardId};

/// 吃牌結果
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CaptureOutcome {
    /// 無配對，放到場上
    Placed,
    /// 與一張場牌配對
    Paired { target: CardId },
    /// 場上三張同月，全部吃下
    Swept { taken: [CardId; 3] },
}

impl CaptureOutcome {
    /// 此次吃進得牌堆的張數
    pub fn captured_count(&self) -> usize {
        match self {
            CaptureOutcome::Placed => 0,
            CaptureOutcome::Paired { .. } => 2,
            CaptureOutcome::Swept { .. } => 4,
        }
    }
}

/// 場上與 `played` 同月份的牌
pub fn field_matches(played: CardId, field: &[CardId]) -> Vec<CardId> {
    field.iter().copied().filter(|&id| same_month(id, played)).collect()
}

/// 解析一次出牌或翻牌
///
/// 優先順序：掃月 > 指定配對 > 放到場上。掃月時忽略 `match_target`。
///
/// 呼叫端必須先驗證 `match_target` 在場上且同月份；違反時直接 panic，
/// 以免破壞 48 張牌的守恆。
pub fn resolve_play(
    played: CardId,
    match_target: Option<CardId>,
    field: &mut Vec<CardId>,
    captured: &mut Vec<CardId>,
) -> CaptureOutcome {
    let same_month = field_matches(played, field);

    if same_month.len() == 3 {
        let taken = [same_month[0], same_month[1], same_month[2]];
        field.retain(|id| !taken.contains(id));
        captured.push(played);
        captured.extend_from_slice(&taken);
        debug!("{} sweeps month {}", card(played).name, month_of(played));
        return CaptureOutcome::Swept { taken };
    }

    if let Some(target) = match_target {
        let pos = field
            .iter()
            .position(|&id| id == target)
            .unwrap_or_else(|| panic!("capture target {} is not on the field", card(target).name));
        assert_eq!(
            month_of(played),
            month_of(target),
            "capture target must share the played card's month"
        );
        field.remove(pos);
        captured.push(played);
        captured.push(target);
        debug!("{} captures {}", card(played).name, card(target).name);
        return CaptureOutcome::Paired { target };
    }

    field.push(played);
    debug!("{} placed on field", card(played).name);
    CaptureOutcome::Placed
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_on_empty_field() {
        let mut field = Vec::new();
        let mut captured = Vec::new();
        let outcome = resolve_play(24, None, &mut field, &mut captured);
        assert_eq!(outcome, CaptureOutcome::Placed);
        assert_eq!(field, vec![24]);
        assert!(captured.is_empty());
    }

    #[test]
    fn test_paired_capture() {
        let mut field = vec![0, 4, 26];
        let mut captured = Vec::new();
        let outcome = resolve_play(24, Some(26), &mut field, &mut captured);
        assert_eq!(outcome, CaptureOutcome::Paired { target: 26 });
        assert_eq!(field, vec![0, 4]);
        assert_eq!(captured, vec![24, 26]);
    }

    #[test]
    fn test_sweep_ignores_target() {
        let mut field = vec![8, 9, 10, 44];
        let mut captured = vec![1];
        let outcome = resolve_play(11, Some(9), &mut field, &mut captured);
        assert_eq!(outcome, CaptureOutcome::Swept { taken: [8, 9, 10] });
        assert_eq!(field, vec![44]);
        assert_eq!(captured.len(), 5);
        assert_eq!(outcome.captured_count(), 4);
        assert!(field_matches(11, &field).is_empty());
    }

    #[test]
    fn test_second_resolve_sees_updated_field() {
        // 第二次判定看到的是第一次放牌之後的場牌
        let mut field = vec![28, 29];
        let mut captured = Vec::new();
        resolve_play(30, None, &mut field, &mut captured);
        let outcome = resolve_play(31, None, &mut field, &mut captured);
        assert!(matches!(outcome, CaptureOutcome::Swept { .. }));
        assert!(field.is_empty());
        assert_eq!(captured.len(), 4);
    }

    #[test]
    #[should_panic(expected = "not on the field")]
    fn test_missing_target_panics() {
        let mut field = vec![0];
        let mut captured = Vec::new();
        resolve_play(2, Some(3), &mut field, &mut captured);
    }

    #[test]
    #[should_panic(expected = "month")]
    fn test_month_mismatch_panics() {
        let mut field = vec![4];
        let mut captured = Vec::new();
        resolve_play(2, Some(4), &mut field, &mut captured);
    }
}
