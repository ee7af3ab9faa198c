//! 錯誤類型
//!
//! `EngineError` 是可恢復的請求錯誤：狀態不變，呼叫端重新提示（人類）
//! 或改用預設走法（對手）。狀態不一致屬於程式錯誤，直接 panic。

use thiserror::Error;

use crate::game::{card, CardId, Phase, YakuId};
use crate::service::trainer::TrainerPhase;

fn name_of(id: &CardId) -> &'static str {
    card(*id).name
}

fn yaku_name(id: &YakuId) -> &'static str {
    id.name()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("card '{}' is not in hand", name_of(.0))]
    CardNotInHand(CardId),

    #[error("match target '{}' is not on the field", name_of(.0))]
    TargetNotOnField(CardId),

    #[error("'{}' cannot capture '{}': months differ", name_of(.played), name_of(.target))]
    MonthMismatch { played: CardId, target: CardId },

    #[error("'{}' matches two field cards; choose one", name_of(.played))]
    AmbiguousMatch { played: CardId, candidates: [CardId; 2] },

    #[error("action not allowed in phase {0:?}")]
    WrongPhase(Phase),

    #[error("unknown card name '{0}'")]
    UnknownCardName(String),

    #[error("the match is over")]
    MatchOver,

    #[error("{} cannot be practised in the trainer", yaku_name(.0))]
    UnsupportedTrainerTarget(YakuId),

    #[error("trainer action not allowed in phase {0:?}")]
    WrongTrainerPhase(TrainerPhase),
}

/// 對手服務錯誤（引擎吸收後改用預設走法，不會往外傳）
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed provider response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("provider timed out")]
    Timeout,
}
