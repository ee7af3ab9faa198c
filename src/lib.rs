//! Koi-Koi 花札規則引擎
//!
//! - `game`: 牌、役、吃牌、規則設定等純資料與純函數
//! - `service`: 對局狀態機、對手邊界、練習模式

pub mod error;
pub mod game;
pub mod service;

pub use error::{EngineError, ProviderError};
pub use game::{Phase, RuleConfig, Side};
pub use service::{GameState, HeuristicProvider, OpponentProvider};
