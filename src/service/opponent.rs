//! 對手走法邊界
//!
//! 對手服務（遠端模型、腳本或內建啟發式）只提出建議，引擎會重新驗證。
//! 服務失敗、逾時、回覆格式錯誤或提案不合法時，一律改用確定性的預設走法，
//! 所以一局永遠推進得下去。

use std::future::Future;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ProviderError};
use crate::game::{card_by_name, CardId, Phase, Side, HEURISTIC_KOIKOI_MAX_POINTS, HEURISTIC_KOIKOI_MIN_PILE};

use super::legal_moves::{best_target, fallback_hand_play};
use super::observation::{snapshot_for, CardView, OpponentSnapshot};
use super::state::GameState;

// ============================================================================
// 提案格式
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandPlayProposal {
    pub card_name: String,
    #[serde(default, alias = "matchWithFieldCardName", skip_serializing_if = "Option::is_none")]
    pub match_target_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawProposal {
    #[serde(default, alias = "matchWithFieldCardName", skip_serializing_if = "Option::is_none")]
    pub match_target_name: Option<String>,
}

/// 對手服務的回覆；每個欄位都可省略
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedMove {
    #[serde(default)]
    pub play_card_from_hand: Option<HandPlayProposal>,
    #[serde(default)]
    pub draw_card_action: Option<DrawProposal>,
    #[serde(default)]
    pub call_koi_koi: Option<bool>,
    #[serde(default, alias = "aiThoughtProcess")]
    pub rationale: String,
}

impl ProposedMove {
    pub fn from_json(text: &str) -> Result<Self, ProviderError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// 對手服務
///
/// 每個需要對手決策的階段呼叫一次，快照反映當下狀態。
pub trait OpponentProvider {
    fn propose_move(
        &self,
        snapshot: &OpponentSnapshot,
    ) -> impl Future<Output = Result<ProposedMove, ProviderError>> + Send;
}

/// 一次對手回合的結果
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentTurnReport {
    /// 最後一個提案附帶的說明
    pub rationale: Option<String>,
    /// 本回合是否有任一步改用預設走法
    pub used_fallback: bool,
}

// ============================================================================
// 內建啟發式
// ============================================================================

/// 確定性的內建對手
///
/// 出牌：掃月 > 價值最高的配對 > 丟出分數最低的牌。
/// 來來：牌堆還夠深且目前役點不高時才喊。
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicProvider;

impl OpponentProvider for HeuristicProvider {
    async fn propose_move(&self, snapshot: &OpponentSnapshot) -> Result<ProposedMove, ProviderError> {
        Ok(heuristic_move(snapshot))
    }
}

fn same_month<'a>(played: &CardView, field: &'a [CardView]) -> Vec<&'a CardView> {
    field.iter().filter(|c| c.month == played.month).collect()
}

fn most_valuable<'a>(candidates: &[&'a CardView]) -> Option<&'a CardView> {
    // 同分時保留先出現的
    candidates.iter().copied().fold(None, |best, c| match best {
        Some(b) if b.points >= c.points => Some(b),
        _ => Some(c),
    })
}

pub fn heuristic_move(snapshot: &OpponentSnapshot) -> ProposedMove {
    let mut best: Option<(u32, &CardView, Option<&CardView>)> = None;
    for played in &snapshot.hand {
        let matches = same_month(played, &snapshot.field);
        let (value, target) = match matches.len() {
            0 => continue,
            // 掃月優先於任何配對
            3 => (matches.iter().map(|c| c.points as u32).sum::<u32>() + played.points as u32 + 100, None),
            _ => {
                let target = most_valuable(&matches);
                (played.points as u32 + target.map_or(0, |t| t.points as u32), target)
            }
        };
        if best.map_or(true, |(v, _, _)| value > v) {
            best = Some((value, played, target));
        }
    }

    let play_card_from_hand = match best {
        Some((_, played, target)) => Some(HandPlayProposal {
            card_name: played.name.to_string(),
            match_target_name: target.map(|t| t.name.to_string()),
        }),
        None => snapshot
            .hand
            .iter()
            .fold(None::<&CardView>, |cheapest, c| match cheapest {
                Some(b) if b.points <= c.points => Some(b),
                _ => Some(c),
            })
            .map(|c| HandPlayProposal { card_name: c.name.to_string(), match_target_name: None }),
    };

    let draw_card_action = snapshot.drawn_card.as_ref().map(|drawn| DrawProposal {
        match_target_name: most_valuable(&same_month(drawn, &snapshot.field)).map(|t| t.name.to_string()),
    });

    let own_points: u32 = snapshot.own_current_yaku.iter().map(|y| y.points).sum();
    let call_koi_koi = own_points > 0
        && own_points < HEURISTIC_KOIKOI_MAX_POINTS
        && snapshot.draw_pile_size >= HEURISTIC_KOIKOI_MIN_PILE;

    ProposedMove {
        play_card_from_hand,
        draw_card_action,
        call_koi_koi: Some(call_koi_koi),
        rationale: format!("heuristic: {} yaku points, {} cards left", own_points, snapshot.draw_pile_size),
    }
}

// ============================================================================
// 驗證與預設走法
// ============================================================================

fn card_id(name: &str) -> Result<CardId, EngineError> {
    card_by_name(name)
        .map(|c| c.id)
        .ok_or_else(|| EngineError::UnknownCardName(name.to_string()))
}

fn optional_card_id(name: Option<&String>) -> Result<Option<CardId>, EngineError> {
    name.map(|n| card_id(n)).transpose()
}

/// 嘗試套用提案中與目前階段相關的部分
///
/// 回傳 `Ok(false)` 表示提案沒有涵蓋此階段；`Err` 表示提案不合法，狀態不變。
fn apply_proposal(state: &mut GameState, proposal: &ProposedMove) -> Result<bool, EngineError> {
    match state.phase {
        Phase::SelectHandCard { .. } => {
            let Some(play) = &proposal.play_card_from_hand else {
                return Ok(false);
            };
            let played = card_id(&play.card_name)?;
            let target = optional_card_id(play.match_target_name.as_ref())?;
            state.play_hand_card(played, target)?;
            Ok(true)
        }
        Phase::MatchDrawnToField { .. } => {
            let Some(target) = proposal
                .draw_card_action
                .as_ref()
                .and_then(|d| d.match_target_name.as_ref())
            else {
                return Ok(false);
            };
            state.choose_drawn_match(card_id(target)?)?;
            Ok(true)
        }
        Phase::KoiKoiDecision { .. } => match proposal.call_koi_koi {
            Some(call) => {
                state.decide_koikoi(call)?;
                Ok(true)
            }
            None => Ok(false),
        },
        other => Err(EngineError::WrongPhase(other)),
    }
}

/// 確定性的預設走法，對目前階段一定合法
fn apply_fallback(state: &mut GameState) {
    let result = match state.phase {
        Phase::SelectHandCard { side } => {
            let Some((played, target)) = fallback_hand_play(&state.hands[side.index()], &state.field)
            else {
                panic!("{:?} must select a hand card but holds none", side);
            };
            state.play_hand_card(played, target).map(|_| ())
        }
        Phase::MatchDrawnToField { drawn, .. } => match best_target(drawn, &state.field) {
            Some(target) => state.choose_drawn_match(target).map(|_| ()),
            None => panic!("drawn card has no match on the field"),
        },
        Phase::KoiKoiDecision { .. } => state.decide_koikoi(false),
        _ => Ok(()),
    };
    if let Err(err) = result {
        panic!("fallback move rejected: {}", err);
    }
}

/// 由 `provider` 代替 `side` 完成它目前擁有的所有決策
///
/// 每個階段都重新取一次提案；提案失敗或不合法就用預設走法。
/// 回合交給另一方或局結束時返回。
pub async fn take_provider_turn<P: OpponentProvider>(
    state: &mut GameState,
    side: Side,
    provider: &P,
) -> OpponentTurnReport {
    let mut report = OpponentTurnReport::default();
    let timeout = state.config.provider_timeout();

    while state.phase.acting_side() == Some(side) {
        let snapshot = snapshot_for(state, side);
        let proposal = match tokio::time::timeout(timeout, provider.propose_move(&snapshot)).await {
            Ok(Ok(proposal)) => Some(proposal),
            Ok(Err(err)) => {
                warn!("{:?} provider failed: {}", side, err);
                None
            }
            Err(_) => {
                warn!("{:?} provider failed: {}", side, ProviderError::Timeout);
                None
            }
        };

        let applied = match &proposal {
            Some(proposal) => {
                if !proposal.rationale.is_empty() {
                    report.rationale = Some(proposal.rationale.clone());
                }
                match apply_proposal(state, proposal) {
                    Ok(applied) => applied,
                    Err(err) => {
                        warn!("{:?} proposal rejected: {}", side, err);
                        false
                    }
                }
            }
            None => false,
        };

        if !applied {
            debug!("{:?} falls back to default move in {:?}", side, state.phase);
            report.used_fallback = true;
            apply_fallback(state);
        }
    }

    report
}

/// 對手（非玩家方）的一個回合
pub async fn take_opponent_turn<P: OpponentProvider>(
    state: &mut GameState,
    provider: &P,
) -> OpponentTurnReport {
    take_provider_turn(state, Side::Opponent, provider).await
}

// ============================================================================
// 單元測試
// ============================================================================
