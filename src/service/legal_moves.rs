//! 合法走法與預設走法
//!
//! 人類輸入與對手提案共用同一套驗證。這裡只看手牌與場牌切片，
//! 對局模式與練習模式都能用。

use crate::error::EngineError;
use crate::game::{card, field_matches, month_of, CardId};

/// 驗證一次手牌出牌，回傳實際要配對的場牌
///
/// - 場上三張同月：掃月，忽略指定目標
/// - 指定目標：必須在場上且同月份
/// - 未指定：場上一張同月自動配對，兩張要求指定，沒有則放到場上
pub fn validate_hand_play(
    hand: &[CardId],
    field: &[CardId],
    played: CardId,
    target: Option<CardId>,
) -> Result<Option<CardId>, EngineError> {
    if !hand.contains(&played) {
        return Err(EngineError::CardNotInHand(played));
    }
    validate_field_match(field, played, target)
}

/// 驗證翻出的牌要配對的場牌（規則同手牌）
pub fn validate_field_match(
    field: &[CardId],
    played: CardId,
    target: Option<CardId>,
) -> Result<Option<CardId>, EngineError> {
    let matches = field_matches(played, field);
    if matches.len() == 3 {
        return Ok(None);
    }

    match target {
        Some(t) => {
            if !field.contains(&t) {
                return Err(EngineError::TargetNotOnField(t));
            }
            if month_of(t) != month_of(played) {
                return Err(EngineError::MonthMismatch { played, target: t });
            }
            Ok(Some(t))
        }
        None => match matches.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            [a, b] => Err(EngineError::AmbiguousMatch { played, candidates: [*a, *b] }),
            // 場上不可能同月超過三張，除非狀態已壞
            _ => panic!("field holds {} cards of month {}", matches.len(), month_of(played)),
        },
    }
}

/// 場上同月牌中分數最高者（同分取 CardId 小者）
pub fn best_target(played: CardId, field: &[CardId]) -> Option<CardId> {
    field_matches(played, field)
        .into_iter()
        .max_by(|&a, &b| card(a).points.cmp(&card(b).points).then(b.cmp(&a)))
}

/// 所有合法的手牌出牌（掃月不帶目標；兩張同月時各算一種）
pub fn legal_hand_plays(hand: &[CardId], field: &[CardId]) -> Vec<(CardId, Option<CardId>)> {
    let mut plays = Vec::new();
    for &played in hand {
        let matches = field_matches(played, field);
        match matches.len() {
            0 | 3 => plays.push((played, None)),
            _ => plays.extend(matches.into_iter().map(|t| (played, Some(t)))),
        }
    }
    plays
}

/// 預設走法：掃月優先，其次任一配對，否則打出第一張手牌
///
/// 手牌為空時回傳 None。
pub fn fallback_hand_play(hand: &[CardId], field: &[CardId]) -> Option<(CardId, Option<CardId>)> {
    if let Some(&sweep) = hand.iter().find(|&&id| field_matches(id, field).len() == 3) {
        return Some((sweep, None));
    }

    for &played in hand {
        if let Some(target) = best_target(played, field) {
            return Some((played, Some(target)));
        }
    }

    hand.first().map(|&first| (first, None))
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_not_in_hand() {
        let err = validate_hand_play(&[0, 4], &[2], 1, None).unwrap_err();
        assert_eq!(err, EngineError::CardNotInHand(1));
    }

    #[test]
    fn test_target_checks() {
        assert_eq!(
            validate_hand_play(&[0], &[4], 0, Some(2)),
            Err(EngineError::TargetNotOnField(2))
        );
        assert_eq!(
            validate_hand_play(&[0], &[4], 0, Some(4)),
            Err(EngineError::MonthMismatch { played: 0, target: 4 })
        );
        assert_eq!(validate_hand_play(&[0], &[2, 4], 0, Some(2)), Ok(Some(2)));
    }

    #[test]
    fn test_single_match_is_automatic() {
        assert_eq!(validate_hand_play(&[0], &[2, 4], 0, None), Ok(Some(2)));
        assert_eq!(validate_hand_play(&[0], &[4], 0, None), Ok(None));
    }

    #[test]
    fn test_two_matches_need_a_target() {
        assert_eq!(
            validate_hand_play(&[0], &[2, 3], 0, None),
            Err(EngineError::AmbiguousMatch { played: 0, candidates: [2, 3] })
        );
    }

    #[test]
    fn test_sweep_ignores_any_target() {
        assert_eq!(validate_hand_play(&[0], &[1, 2, 3], 0, Some(44)), Ok(None));
    }

    #[test]
    fn test_best_target_prefers_points() {
        assert_eq!(best_target(3, &[2, 1, 4]), Some(1));
        assert_eq!(best_target(3, &[2, 47]), Some(2));
        assert_eq!(best_target(3, &[4]), None);
    }

    #[test]
    fn test_fallback_order() {
        // 掃月
        assert_eq!(fallback_hand_play(&[4, 11], &[8, 9, 10, 5]), Some((11, None)));
        // 配對
        assert_eq!(fallback_hand_play(&[0, 6], &[5, 7]), Some((6, Some(5))));
        // 無配對
        assert_eq!(fallback_hand_play(&[0, 6], &[44]), Some((0, None)));
        assert_eq!(fallback_hand_play(&[], &[44]), None);
    }

    #[test]
    fn test_legal_hand_plays() {
        let plays = legal_hand_plays(&[0, 4, 11], &[2, 3, 8, 9, 10]);
        assert_eq!(plays, vec![(0, Some(2)), (0, Some(3)), (4, None), (11, None)]);
    }
}
