//! 局結算
//!
//! 只讀取狀態、產生 `RoundSummary`，分數轉移由 `GameState::end_round` 處理。

use crate::game::{
    evaluate, total_points, RoundEndReason, RoundSummary, ScoredYaku, Side, YakuId,
};

use super::state::GameState;

/// 手四：該方直接得固定分數並成為親
pub fn teshi(state: &GameState, side: Side) -> RoundSummary {
    let points = state.config.teshi_points;
    RoundSummary {
        round: state.round_number,
        winner: Some(side),
        points,
        yaku: vec![ScoredYaku::new(YakuId::Teshi, points)],
        reason: RoundEndReason::Teshi,
        multiplier: state.round.multiplier,
        next_dealer: side,
    }
}

/// 勝負（主動或手牌用盡強制）：役點 × 倍數
pub fn settle(state: &GameState, side: Side, reason: RoundEndReason) -> RoundSummary {
    let achieved = evaluate(&state.captured[side.index()]);
    let multiplier = state.round.multiplier;
    RoundSummary {
        round: state.round_number,
        winner: Some(side),
        points: total_points(&achieved) * multiplier,
        yaku: achieved.iter().map(ScoredYaku::from).collect(),
        reason,
        multiplier,
        next_dealer: side,
    }
}

/// 牌用盡且無人勝負
///
/// 喊過來來之後役點沒有再提升者，本局役點歸零。
/// 役點高者得分並成為親；同分（含雙方歸零）為平手，親不變；
/// 雙方整局都沒成過役時由親取得親權分數。
pub fn exhaustion(state: &GameState) -> RoundSummary {
    let multiplier = state.round.multiplier;
    let mut finals = [(0u32, Vec::new()), (0u32, Vec::new())];

    for side in Side::both() {
        let i = side.index();
        let achieved = evaluate(&state.captured[i]);
        let total = total_points(&achieved);
        let busted = state.round.koikoi_called[i] && total <= state.round.points_at_koikoi[i];
        if !busted {
            finals[i] = (total, achieved.iter().map(ScoredYaku::from).collect());
        }
    }

    let (player_total, opponent_total) = (finals[0].0, finals[1].0);
    let winner = if player_total > opponent_total {
        Some(Side::Player)
    } else if opponent_total > player_total {
        Some(Side::Opponent)
    } else {
        None
    };

    if let Some(side) = winner {
        let (total, yaku) = std::mem::take(&mut finals[side.index()]);
        return RoundSummary {
            round: state.round_number,
            winner: Some(side),
            points: total * multiplier,
            yaku,
            reason: RoundEndReason::Exhaustion,
            multiplier,
            next_dealer: side,
        };
    }

    let nobody_formed = !state.round.yaku_formed.iter().any(|&formed| formed);
    if nobody_formed {
        let points = state.config.oya_ken_points;
        return RoundSummary {
            round: state.round_number,
            winner: Some(state.dealer),
            points,
            yaku: vec![ScoredYaku::new(YakuId::OyaKen, points)],
            reason: RoundEndReason::OyaKen,
            multiplier,
            next_dealer: state.dealer,
        };
    }

    RoundSummary {
        round: state.round_number,
        winner: None,
        points: 0,
        yaku: Vec::new(),
        reason: RoundEndReason::Draw,
        multiplier,
        next_dealer: state.dealer,
    }
}

// ============================================================================
// 單元測試
// ============================================================================
