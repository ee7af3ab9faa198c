//! 遊戲核心模組
//!
//! 包含 Koi-Koi 規則的純資料與純函數：
//! - `constants`: 遊戲常量
//! - `cards`: 48 張花札定義
//! - `yaku`: 役定義與判定
//! - `capture`: 吃牌判定（配對 / 掃月 / 放置）
//! - `phase`: 雙方、回合階段、局結算
//! - `rules`: 規則設定
//!
//! 注意：這裡沒有隨機數也沒有狀態，狀態機在 `service::state`

pub mod constants;
pub mod cards;
pub mod yaku;
pub mod capture;
pub mod phase;
pub mod rules;

// Re-export 常用類型
pub use constants::*;
pub use cards::{card, card_by_name, full_deck, month_of, CardDef, CardId, Category, CARD_DEFS};
pub use yaku::{evaluate, is_satisfied, total_points, AchievedYaku, YakuDef, YakuId, YakuRule, YAKU_DEFS};
pub use capture::{field_matches, resolve_play, CaptureOutcome};
pub use phase::{MatchSummary, Phase, RoundEndReason, RoundSummary, ScoredYaku, Side};
pub use rules::RuleConfig;
