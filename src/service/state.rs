//! 對局狀態機
//!
//! 一個 `GameState` 擁有整場比賽的所有牌位置與分數。對外的轉移函數只有
//! `start_round` / `play_hand_card` / `choose_drawn_match` / `decide_koikoi` /
//! `next_round` / `abandon`，翻牌、役判定、局結束都在內部推進，
//! 直到下一個需要決策的階段。

use std::collections::BTreeMap;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::game::cards::four_of_a_month;
use crate::game::{
    card, evaluate, field_matches, full_deck, resolve_play, total_points, AchievedYaku,
    CaptureOutcome, CardId, MatchSummary, Phase, RoundEndReason, RoundSummary, RuleConfig, Side,
    BASE_MULTIPLIER, DECK_SIZE, FIELD_SIZE, HAND_SIZE,
};

use super::legal_moves::{validate_field_match, validate_hand_play};
use super::settlement;

/// 每局重置的狀態
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// 倍數：起始 1，任一方每喊一次來來 +1
    pub multiplier: u32,
    pub koikoi_called: [bool; 2],
    /// 最後一次喊來來時的役點
    pub points_at_koikoi: [u32; 2],
    /// 本局是否曾經成役（親權判定用）
    pub yaku_formed: [bool; 2],
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            multiplier: BASE_MULTIPLIER,
            koikoi_called: [false; 2],
            points_at_koikoi: [0; 2],
            yaku_formed: [false; 2],
        }
    }
}

/// 一張牌目前所在位置
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "zone", content = "side", rename_all = "kebab-case")]
pub enum Location {
    Hand(Side),
    Field,
    DrawPile,
    Captured(Side),
}

/// 整場比賽狀態
pub struct GameState {
    pub rng: StdRng,
    pub config: RuleConfig,

    // 牌位置
    pub hands: [Vec<CardId>; 2],
    pub field: Vec<CardId>,
    /// 牌堆，最後一張是頂牌
    pub draw_pile: Vec<CardId>,
    pub captured: [Vec<CardId>; 2],

    // 流程
    pub phase: Phase,
    pub round: RoundState,
    pub dealer: Side,

    // 比賽
    pub scores: [i32; 2],
    pub round_number: u32,
    pub round_history: Vec<RoundSummary>,
    pub match_summary: Option<MatchSummary>,
}

impl GameState {
    /// 建立新比賽，48 張牌都在牌堆中，玩家為第一局的親
    pub fn new(seed: u64, config: RuleConfig) -> Self {
        let initial = config.initial_score;
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
            hands: [Vec::new(), Vec::new()],
            field: Vec::new(),
            draw_pile: full_deck(),
            captured: [Vec::new(), Vec::new()],
            phase: Phase::NotStarted,
            round: RoundState::default(),
            dealer: Side::Player,
            scores: [initial; 2],
            round_number: 0,
            round_history: Vec::new(),
            match_summary: None,
        }
    }

    /// 開始第一局
    pub fn start_round(&mut self) -> Result<(), EngineError> {
        match self.phase {
            Phase::NotStarted => {}
            Phase::GameOver => return Err(EngineError::MatchOver),
            other => return Err(EngineError::WrongPhase(other)),
        }
        self.deal();
        Ok(())
    }

    /// 局結束後開始下一局
    pub fn next_round(&mut self) -> Result<(), EngineError> {
        match self.phase {
            Phase::RoundOver => {}
            Phase::GameOver => return Err(EngineError::MatchOver),
            other => return Err(EngineError::WrongPhase(other)),
        }
        self.deal();
        Ok(())
    }

    /// 洗牌、發 8/8/8，其餘進牌堆，然後檢查手四
    fn deal(&mut self) {
        self.round_number += 1;
        self.round = RoundState::default();

        let mut deck = full_deck();
        deck.shuffle(&mut self.rng);

        let mut player_hand = deck[..HAND_SIZE].to_vec();
        let mut opponent_hand = deck[HAND_SIZE..HAND_SIZE * 2].to_vec();
        player_hand.sort_unstable();
        opponent_hand.sort_unstable();

        self.hands = [player_hand, opponent_hand];
        self.field = deck[HAND_SIZE * 2..HAND_SIZE * 2 + FIELD_SIZE].to_vec();
        self.draw_pile = deck[HAND_SIZE * 2 + FIELD_SIZE..].to_vec();
        self.captured = [Vec::new(), Vec::new()];

        info!(
            "round {} dealt, dealer {:?}, scores {:?}",
            self.round_number, self.dealer, self.scores
        );

        if !self.settle_teshi() {
            self.begin_turn(self.dealer);
        }
    }

    /// 手四判定，親先。成立時直接結束本局並回傳 `true`
    fn settle_teshi(&mut self) -> bool {
        let holder = [self.dealer, self.dealer.other()]
            .into_iter()
            .find_map(|side| four_of_a_month(&self.hands[side.index()]).map(|month| (side, month)));
        let Some((side, month)) = holder else {
            return false;
        };
        info!("{:?} holds four cards of month {} (teshi)", side, month);
        let summary = settlement::teshi(self, side);
        self.end_round(summary);
        true
    }

    /// 從手牌出一張牌，之後自動翻牌並判定役
    ///
    /// 回傳手牌這一步的吃牌結果。請求無效時狀態不變。
    pub fn play_hand_card(
        &mut self,
        played: CardId,
        target: Option<CardId>,
    ) -> Result<CaptureOutcome, EngineError> {
        let side = match self.phase {
            Phase::SelectHandCard { side } => side,
            Phase::GameOver => return Err(EngineError::MatchOver),
            other => return Err(EngineError::WrongPhase(other)),
        };
        let i = side.index();
        let target = validate_hand_play(&self.hands[i], &self.field, played, target)?;

        self.hands[i].retain(|&id| id != played);
        let outcome = resolve_play(played, target, &mut self.field, &mut self.captured[i]);
        debug!("{:?} plays {}: {:?}", side, card(played).name, outcome);

        self.draw_step(side);
        Ok(outcome)
    }

    /// 翻出的牌在場上有兩張同月時，指定要吃哪一張
    pub fn choose_drawn_match(&mut self, target: CardId) -> Result<CaptureOutcome, EngineError> {
        let (side, drawn) = match self.phase {
            Phase::MatchDrawnToField { side, drawn } => (side, drawn),
            Phase::GameOver => return Err(EngineError::MatchOver),
            other => return Err(EngineError::WrongPhase(other)),
        };
        let target = validate_field_match(&self.field, drawn, Some(target))?;

        let top = self.draw_pile.pop();
        assert_eq!(top, Some(drawn), "drawn card must still be on top of the pile");
        let outcome = resolve_play(drawn, target, &mut self.field, &mut self.captured[side.index()]);
        debug!("{:?} draws {}: {:?}", side, card(drawn).name, outcome);

        self.check_yaku(side);
        Ok(outcome)
    }

    /// 成役後的決定：`true` 喊來來，`false` 勝負
    pub fn decide_koikoi(&mut self, call: bool) -> Result<(), EngineError> {
        let side = match self.phase {
            Phase::KoiKoiDecision { side } => side,
            Phase::GameOver => return Err(EngineError::MatchOver),
            other => return Err(EngineError::WrongPhase(other)),
        };
        let i = side.index();

        if call {
            let total = self.current_total(side);
            self.round.multiplier += 1;
            self.round.koikoi_called[i] = true;
            self.round.points_at_koikoi[i] = total;
            info!(
                "{:?} calls koi-koi at {} points, multiplier now {}",
                side, total, self.round.multiplier
            );
            self.begin_turn(side.other());
        } else {
            let summary = settlement::settle(self, side, RoundEndReason::Settled);
            self.end_round(summary);
        }
        Ok(())
    }

    /// 放棄比賽，以目前分數結束
    pub fn abandon(&mut self) -> MatchSummary {
        if let Some(summary) = &self.match_summary {
            return summary.clone();
        }
        info!("match abandoned after {} rounds", self.round_number);
        self.finish_match(true)
    }

    /// 某方目前成立的役（含抑制）
    pub fn current_yaku(&self, side: Side) -> Vec<AchievedYaku> {
        evaluate(&self.captured[side.index()])
    }

    pub fn current_total(&self, side: Side) -> u32 {
        total_points(&self.current_yaku(side))
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    // ========================================================================
    // 內部轉移
    // ========================================================================

    /// 輪到 `side`：有手牌就等出牌，沒手牌就只翻牌
    fn begin_turn(&mut self, side: Side) {
        if !self.hands[side.index()].is_empty() {
            self.phase = Phase::SelectHandCard { side };
            return;
        }
        if !self.draw_pile.is_empty() {
            debug!("{:?} has no hand cards, draw only", side);
            self.draw_step(side);
            return;
        }
        if self.hands[side.other().index()].is_empty() {
            let summary = settlement::exhaustion(self);
            self.end_round(summary);
            return;
        }
        self.phase = Phase::SelectHandCard { side: side.other() };
    }

    /// 翻牌步驟，用出牌後的場牌判定
    fn draw_step(&mut self, side: Side) {
        let Some(&drawn) = self.draw_pile.last() else {
            self.check_yaku(side);
            return;
        };

        let matches = field_matches(drawn, &self.field);
        if matches.len() == 2 {
            // 頂牌留在牌堆直到指定目標
            self.phase = Phase::MatchDrawnToField { side, drawn };
            return;
        }

        self.draw_pile.pop();
        let target = if matches.len() == 1 { Some(matches[0]) } else { None };
        let outcome = resolve_play(drawn, target, &mut self.field, &mut self.captured[side.index()]);
        debug!("{:?} draws {}: {:?}", side, card(drawn).name, outcome);

        self.check_yaku(side);
    }

    /// 役判定，決定是否提供來來 / 勝負
    fn check_yaku(&mut self, side: Side) {
        let i = side.index();
        let total = self.current_total(side);
        if total > 0 {
            self.round.yaku_formed[i] = true;
        }

        let offer = total > 0
            && (!self.round.koikoi_called[i] || total > self.round.points_at_koikoi[i]);
        if !offer {
            self.begin_turn(side.other());
            return;
        }

        if self.hands[i].is_empty() {
            info!("{:?} forms yaku with an empty hand, forced settle", side);
            let summary = settlement::settle(self, side, RoundEndReason::HandExhausted);
            self.end_round(summary);
            return;
        }

        self.phase = Phase::KoiKoiDecision { side };
    }

    /// 套用局結算、移交親，必要時結束比賽
    fn end_round(&mut self, summary: RoundSummary) {
        if let Some(winner) = summary.winner {
            let points = summary.points as i32;
            self.scores[winner.index()] += points;
            self.scores[winner.other().index()] -= points;
        }
        self.dealer = summary.next_dealer;

        info!(
            "round {} over: {:?} winner={:?} points={} multiplier={} scores={:?}",
            summary.round,
            summary.reason,
            summary.winner,
            summary.points,
            summary.multiplier,
            self.scores
        );
        self.round_history.push(summary);

        let busted = self.scores.iter().any(|&score| score <= 0);
        let capped = self.config.max_rounds.is_some_and(|max| self.round_number >= max);
        if busted || capped {
            self.finish_match(false);
        } else {
            self.phase = Phase::RoundOver;
        }
    }

    fn finish_match(&mut self, abandoned: bool) -> MatchSummary {
        let [player, opponent] = self.scores;
        let leader = if player > opponent {
            Some(Side::Player)
        } else if opponent > player {
            Some(Side::Opponent)
        } else {
            None
        };
        let summary = MatchSummary {
            final_scores: self.scores,
            rounds_played: self.round_history.len() as u32,
            leader,
            abandoned,
        };
        info!("match over: {:?}", summary);
        self.phase = Phase::GameOver;
        self.match_summary = Some(summary.clone());
        summary
    }

    // ========================================================================
    // 守恆檢查
    // ========================================================================

    fn zones(&self) -> [(Location, &[CardId]); 6] {
        [
            (Location::Hand(Side::Player), &self.hands[0]),
            (Location::Hand(Side::Opponent), &self.hands[1]),
            (Location::Field, &self.field),
            (Location::DrawPile, &self.draw_pile),
            (Location::Captured(Side::Player), &self.captured[0]),
            (Location::Captured(Side::Opponent), &self.captured[1]),
        ]
    }

    /// 每張牌目前的位置
    pub fn locations(&self) -> BTreeMap<CardId, Location> {
        self.zones()
            .into_iter()
            .flat_map(|(location, cards)| cards.iter().map(move |&id| (id, location)))
            .collect()
    }

    /// 48 張牌每張恰好出現一次，否則 panic
    pub fn assert_conservation(&self) {
        let mut seen = [0u8; DECK_SIZE];
        for (_, cards) in self.zones() {
            for &id in cards {
                seen[id as usize] += 1;
            }
        }
        for (id, &count) in seen.iter().enumerate() {
            assert_eq!(count, 1, "card '{}' appears {} times", card(id as CardId).name, count);
        }
    }
}

// ============================================================================
// 單元測試
// ============================================================================
