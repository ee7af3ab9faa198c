//! 遊戲常量定義

// ============================================================================
// 牌組與發牌常量
// ============================================================================

pub const DECK_SIZE: usize = 48;         // 花札總張數
pub const MONTH_COUNT: u8 = 12;          // 月份數
pub const CARDS_PER_MONTH: usize = 4;    // 每月張數
pub const HAND_SIZE: usize = 8;          // 每方手牌數量
pub const FIELD_SIZE: usize = 8;         // 開局場牌數量
pub const DRAW_PILE_SIZE: usize = DECK_SIZE - 2 * HAND_SIZE - FIELD_SIZE; // 24

// ============================================================================
// 役計數門檻
// ============================================================================

pub const SEED_THRESHOLD: usize = 5;     // 種：5 張起算
pub const RIBBON_THRESHOLD: usize = 5;   // 短冊：5 張起算
pub const CHAFF_THRESHOLD: usize = 10;   // 滓：10 張起算

// ============================================================================
// 計分常量
// ============================================================================

pub const INITIAL_SCORE: i32 = 30;       // 每方起始分數
pub const TESHI_POINTS: u32 = 6;         // 手四固定得分
pub const OYA_KEN_POINTS: u32 = 6;       // 親權固定得分
pub const BASE_MULTIPLIER: u32 = 1;      // 每局起始倍數

// ============================================================================
// 對手服務
// ============================================================================

pub const PROVIDER_TIMEOUT_MS: u64 = 5_000; // 對手提案逾時
pub const HEURISTIC_KOIKOI_MIN_PILE: usize = 10; // 牌堆少於此數時啟發式對手不再喊來來
pub const HEURISTIC_KOIKOI_MAX_POINTS: u32 = 6;  // 役點達此數以上時啟發式對手直接勝負
