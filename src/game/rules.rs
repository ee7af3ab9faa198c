//! 規則設定
//!
//! 所有欄位都有預設值（來自 `constants`），JSON 設定檔只需寫要覆寫的欄位。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants::{INITIAL_SCORE, OYA_KEN_POINTS, PROVIDER_TIMEOUT_MS, TESHI_POINTS};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// 每方起始分數
    pub initial_score: i32,
    /// 手四得分
    pub teshi_points: u32,
    /// 親權得分
    pub oya_ken_points: u32,
    /// 對手提案逾時（毫秒）
    pub provider_timeout_ms: u64,
    /// 局數上限，None 表示打到一方歸零
    pub max_rounds: Option<u32>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            initial_score: INITIAL_SCORE,
            teshi_points: TESHI_POINTS,
            oya_ken_points: OYA_KEN_POINTS,
            provider_timeout_ms: PROVIDER_TIMEOUT_MS,
            max_rounds: None,
        }
    }
}

impl RuleConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }
}

// ============================================================================
// 單元測試
// ============================================================================
