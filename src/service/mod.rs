//! 服務層模組
//!
//! 對局狀態機、走法驗證、局結算、對手邊界與練習模式

pub mod legal_moves;
pub mod observation;
pub mod opponent;
pub mod settlement;
pub mod state;
pub mod trainer;

pub use legal_moves::{best_target, fallback_hand_play, legal_hand_plays};
pub use observation::{snapshot_for, OpponentSnapshot};
pub use opponent::{
    heuristic_move, take_opponent_turn, take_provider_turn, HeuristicProvider, OpponentProvider,
    OpponentTurnReport, ProposedMove,
};
pub use state::{GameState, Location, RoundState};
pub use trainer::{TrainerOutcome, TrainerPhase, TrainerSession, TRAINER_TARGETS};
