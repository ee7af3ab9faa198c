//! 役練習模式
//!
//! 單人練習收集指定的役。發牌經過安排：每張目標牌與一張同月份的搭檔牌
//! 分別放在手牌與場上，剩下的牌依 CardId 順序補滿手牌、場牌，其餘成為牌堆。
//! 吃牌規則與對局相同，只是沒有對手也沒有來來。

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::game::cards::{
    cards_of_month, BRIGHTS, CHERRY_CURTAIN, PAMPAS_MOON, PHOENIX, PINE_CRANE, RAIN_MAN, SAKE_CUP,
};
use crate::game::{
    card, field_matches, full_deck, is_satisfied, month_of, resolve_play, CaptureOutcome, CardId,
    YakuDef, YakuId, YakuRule, FIELD_SIZE, HAND_SIZE,
};

use super::legal_moves::{validate_field_match, validate_hand_play};

/// 可以練習的役
pub const TRAINER_TARGETS: [YakuId; 9] = [
    YakuId::InoShikaCho,
    YakuId::Akatan,
    YakuId::Aotan,
    YakuId::Sanko,
    YakuId::HanamiZake,
    YakuId::TsukimiZake,
    YakuId::AmeShiko,
    YakuId::Shiko,
    YakuId::Goko,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum TrainerPhase {
    SelectHandCard,
    MatchDrawnToField { drawn: CardId },
    /// 目標役已成立
    YakuFormed,
    /// 手牌與牌堆都用完仍未成役
    NoMovesLeft,
}

/// 練習結果
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerOutcome {
    pub target: YakuId,
    pub formed: bool,
    pub captured: Vec<CardId>,
}

/// 目標役需要收集的牌
fn target_cards(def: &YakuDef) -> Result<Vec<CardId>, EngineError> {
    let cards = match (def.id, def.rule) {
        (YakuId::Sanko, _) => vec![PINE_CRANE, CHERRY_CURTAIN, PAMPAS_MOON],
        (YakuId::Shiko, _) => vec![PINE_CRANE, CHERRY_CURTAIN, PAMPAS_MOON, PHOENIX],
        (YakuId::AmeShiko, _) => vec![RAIN_MAN, PINE_CRANE, CHERRY_CURTAIN, PAMPAS_MOON],
        (YakuId::Goko, _) => BRIGHTS.to_vec(),
        (_, YakuRule::ExactSet(required)) => required.to_vec(),
        (_, YakuRule::SakePair(partner)) => vec![partner, SAKE_CUP],
        (id, _) => return Err(EngineError::UnsupportedTrainerTarget(id)),
    };
    Ok(cards)
}

/// 往 `zone` 放一張牌，滿了就改放 `overflow`
fn place(zone: &mut Vec<CardId>, limit: usize, overflow: &mut Vec<CardId>, id: CardId) {
    if zone.len() < limit {
        zone.push(id);
    } else {
        overflow.push(id);
    }
}

pub struct TrainerSession {
    pub target: YakuId,
    def: &'static YakuDef,
    pub hand: Vec<CardId>,
    pub field: Vec<CardId>,
    /// 牌堆，最後一張是頂牌
    pub draw_pile: Vec<CardId>,
    pub captured: Vec<CardId>,
    pub phase: TrainerPhase,
}

impl TrainerSession {
    /// 為 `target` 安排一副練習牌局
    pub fn new(target: YakuId) -> Result<Self, EngineError> {
        let def = target.def().ok_or(EngineError::UnsupportedTrainerTarget(target))?;
        let targets = target_cards(def)?;

        let mut hand = Vec::with_capacity(HAND_SIZE);
        let mut field = Vec::with_capacity(FIELD_SIZE);
        let mut overflow = Vec::new();
        let mut used = targets.clone();

        for (i, &id) in targets.iter().enumerate() {
            let partner = cards_of_month(month_of(id))
                .into_iter()
                .find(|c| !used.contains(c));
            if let Some(p) = partner {
                used.push(p);
            }

            let (own_zone, own_limit, partner_zone, partner_limit) = if i % 2 == 0 {
                (&mut hand, HAND_SIZE, &mut field, FIELD_SIZE)
            } else {
                (&mut field, FIELD_SIZE, &mut hand, HAND_SIZE)
            };
            place(own_zone, own_limit, &mut overflow, id);
            if let Some(p) = partner {
                place(partner_zone, partner_limit, &mut overflow, p);
            }
        }

        let mut rest: Vec<CardId> = overflow;
        rest.extend(full_deck().into_iter().filter(|c| !used.contains(c)));
        rest.sort_unstable();

        let mut rest = rest.into_iter();
        hand.extend(rest.by_ref().take(HAND_SIZE - hand.len()));
        field.extend(rest.by_ref().take(FIELD_SIZE - field.len()));
        // pop 先取到 CardId 最小的牌
        let mut draw_pile: Vec<CardId> = rest.collect();
        draw_pile.reverse();

        hand.sort_unstable();
        field.sort_unstable();

        info!("trainer session for {} dealt", target.name());
        Ok(Self {
            target,
            def,
            hand,
            field,
            draw_pile,
            captured: Vec::new(),
            phase: TrainerPhase::SelectHandCard,
        })
    }

    pub fn play_hand_card(
        &mut self,
        played: CardId,
        target: Option<CardId>,
    ) -> Result<CaptureOutcome, EngineError> {
        if self.phase != TrainerPhase::SelectHandCard {
            return Err(EngineError::WrongTrainerPhase(self.phase));
        }
        let target = validate_hand_play(&self.hand, &self.field, played, target)?;
        self.hand.retain(|&id| id != played);
        let outcome = resolve_play(played, target, &mut self.field, &mut self.captured);
        debug!("trainer plays {}: {:?}", card(played).name, outcome);

        if !self.check_formed() {
            self.draw();
        }
        Ok(outcome)
    }

    pub fn choose_drawn_match(&mut self, target: CardId) -> Result<CaptureOutcome, EngineError> {
        let TrainerPhase::MatchDrawnToField { drawn } = self.phase else {
            return Err(EngineError::WrongTrainerPhase(self.phase));
        };
        let target = validate_field_match(&self.field, drawn, Some(target))?;
        self.draw_pile.pop();
        let outcome = resolve_play(drawn, target, &mut self.field, &mut self.captured);
        self.after_draw();
        Ok(outcome)
    }

    /// 翻牌；手牌用完時持續只翻牌
    fn draw(&mut self) {
        let Some(&drawn) = self.draw_pile.last() else {
            self.after_draw();
            return;
        };
        let matches = field_matches(drawn, &self.field);
        if matches.len() == 2 {
            self.phase = TrainerPhase::MatchDrawnToField { drawn };
            return;
        }
        self.draw_pile.pop();
        let target = if matches.len() == 1 { Some(matches[0]) } else { None };
        let outcome = resolve_play(drawn, target, &mut self.field, &mut self.captured);
        debug!("trainer draws {}: {:?}", card(drawn).name, outcome);
        self.after_draw();
    }

    fn after_draw(&mut self) {
        if self.check_formed() {
            return;
        }
        if !self.hand.is_empty() {
            self.phase = TrainerPhase::SelectHandCard;
        } else if !self.draw_pile.is_empty() {
            self.draw();
        } else {
            info!("trainer ran out of cards without {}", self.target.name());
            self.phase = TrainerPhase::NoMovesLeft;
        }
    }

    fn check_formed(&mut self) -> bool {
        if is_satisfied(self.def, &self.captured) {
            info!("trainer formed {}", self.target.name());
            self.phase = TrainerPhase::YakuFormed;
            return true;
        }
        false
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, TrainerPhase::YakuFormed | TrainerPhase::NoMovesLeft)
    }

    pub fn outcome(&self) -> Option<TrainerOutcome> {
        self.is_finished().then(|| TrainerOutcome {
            target: self.target,
            formed: self.phase == TrainerPhase::YakuFormed,
            captured: self.captured.clone(),
        })
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::{BOAR, DEER, PEONY_BUTTERFLIES};
    use crate::game::DECK_SIZE;

    fn conserved(session: &TrainerSession) -> bool {
        let mut all: Vec<CardId> = session
            .hand
            .iter()
            .chain(&session.field)
            .chain(&session.draw_pile)
            .chain(&session.captured)
            .copied()
            .collect();
        all.sort_unstable();
        all == full_deck()
    }

    #[test]
    fn test_all_targets_deal() {
        for target in TRAINER_TARGETS {
            let session = TrainerSession::new(target).unwrap();
            assert_eq!(session.hand.len(), HAND_SIZE, "{:?}", target);
            assert_eq!(session.field.len(), FIELD_SIZE, "{:?}", target);
            assert_eq!(session.draw_pile.len(), DECK_SIZE - HAND_SIZE - FIELD_SIZE);
            assert!(conserved(&session));
        }
    }

    #[test]
    fn test_unsupported_target() {
        assert_eq!(
            TrainerSession::new(YakuId::Kasu).err(),
            Some(EngineError::UnsupportedTrainerTarget(YakuId::Kasu))
        );
        assert!(TrainerSession::new(YakuId::Teshi).is_err());
    }

    #[test]
    fn test_targets_split_between_hand_and_field() {
        let session = TrainerSession::new(YakuId::InoShikaCho).unwrap();
        assert!(session.hand.contains(&BOAR));
        assert!(session.field.contains(&DEER));
        assert!(session.hand.contains(&PEONY_BUTTERFLIES));
        // 每張目標牌都有同月份的牌可以配對
        for id in [BOAR, DEER, PEONY_BUTTERFLIES] {
            let zone = if session.hand.contains(&id) { &session.field } else { &session.hand };
            assert!(zone.iter().any(|&c| month_of(c) == month_of(id)));
        }
    }

    #[test]
    fn test_hanami_zake_formed_in_two_plays() {
        // 手牌 0-5 8 33，場上 6 7 9 10 11 12 13 32，牌堆頂是 14
        let mut session = TrainerSession::new(YakuId::HanamiZake).unwrap();
        assert_eq!(session.hand, vec![0, 1, 2, 3, 4, 5, 8, 33]);
        assert_eq!(session.field, vec![6, 7, 9, 10, 11, 12, 13, 32]);

        let outcome = session.play_hand_card(CHERRY_CURTAIN, None).unwrap();
        assert_eq!(outcome, CaptureOutcome::Swept { taken: [9, 10, 11] });
        assert_eq!(session.phase, TrainerPhase::MatchDrawnToField { drawn: 14 });
        session.choose_drawn_match(12).unwrap();
        assert_eq!(session.phase, TrainerPhase::SelectHandCard);

        session.play_hand_card(33, None).unwrap();
        assert_eq!(session.phase, TrainerPhase::YakuFormed);
        assert!(session.outcome().unwrap().formed);
        assert!(conserved(&session));
    }

    #[test]
    fn test_session_runs_to_completion() {
        let mut session = TrainerSession::new(YakuId::Aotan).unwrap();
        while !session.is_finished() {
            match session.phase {
                TrainerPhase::SelectHandCard => {
                    let played = session.hand[0];
                    let matches = field_matches(played, &session.field);
                    let target = if matches.len() == 3 { None } else { matches.first().copied() };
                    session.play_hand_card(played, target).unwrap();
                }
                TrainerPhase::MatchDrawnToField { drawn } => {
                    let target = field_matches(drawn, &session.field)[0];
                    session.choose_drawn_match(target).unwrap();
                }
                _ => unreachable!(),
            }
            assert!(conserved(&session));
        }
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.target, YakuId::Aotan);
        assert_eq!(outcome.formed, session.phase == TrainerPhase::YakuFormed);
    }

    #[test]
    fn test_wrong_phase_after_finish() {
        let mut session = TrainerSession::new(YakuId::Akatan).unwrap();
        session.phase = TrainerPhase::NoMovesLeft;
        let first = session.hand[0];
        assert_eq!(
            session.play_hand_card(first, None),
            Err(EngineError::WrongTrainerPhase(TrainerPhase::NoMovesLeft))
        );
        assert!(session.choose_drawn_match(0).is_err());
    }
}
