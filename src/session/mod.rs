//! Game session: the round state machine.
//!
//! A [`GameSession`] owns everything a round needs - board, selection
//! state, scoring, scheduled steps, and the best-score store - and is
//! driven entirely through three operations:
//!
//! - [`start_round`](GameSession::start_round) builds a fresh shuffled
//!   board and begins the scripted preview
//! - [`select_card`](GameSession::select_card) submits one pick; illegal
//!   picks are silent no-ops so stray input never corrupts a round
//! - [`advance`](GameSession::advance) feeds elapsed time to the delay
//!   queue, firing the preview, resolution, and round-over steps
//!
//! State changes surface as [`SessionEvent`]s on an internal queue the
//! caller drains. The session never touches a wall clock and never
//! renders; a presentation layer decides what a second of game time means.

use std::time::Duration;

use tracing::{debug, info};

use crate::board::{Board, CardPosition};
use crate::core::{GameError, GameRng};
use crate::store::{self, BestScoreStore};
use crate::timer::{DelayQueue, TimerId};

pub mod config;
pub mod event;
pub mod phase;
pub mod scoring;

pub use config::SessionConfig;
pub use event::SessionEvent;
pub use phase::SessionPhase;
pub use scoring::ScoreState;

/// Scripted step living on the session's delay queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimedAction {
    /// Turn every card face up for the preview.
    RevealPreview,
    /// End the preview: hide every card, open play.
    EndPreview,
    /// Compare the two picks and apply consequences.
    Resolve,
    /// Leave `RoundComplete` for `Idle`.
    ReturnToIdle,
}

/// The memory game state machine.
///
/// Generic over the best-score store so tests run against
/// [`MemoryBestScore`](crate::store::MemoryBestScore) and applications can
/// plug in [`FileBestScore`](crate::store::FileBestScore) or their own.
#[derive(Debug)]
pub struct GameSession<S> {
    config: SessionConfig,
    store: S,
    rng: GameRng,
    phase: SessionPhase,
    board: Option<Board>,
    first_pick: Option<CardPosition>,
    second_pick: Option<CardPosition>,
    score: ScoreState,
    timers: DelayQueue<TimedAction>,
    pending: Option<TimerId>,
    events: Vec<SessionEvent>,
}

impl<S: BestScoreStore> GameSession<S> {
    /// Create a session with an explicit RNG seed.
    #[must_use]
    pub fn new(config: SessionConfig, store: S, seed: u64) -> Self {
        Self::with_rng(config, store, GameRng::new(seed))
    }

    /// Create a session seeded from system entropy.
    #[must_use]
    pub fn from_entropy(config: SessionConfig, store: S) -> Self {
        Self::with_rng(config, store, GameRng::from_entropy())
    }

    fn with_rng(config: SessionConfig, store: S, rng: GameRng) -> Self {
        Self {
            config,
            store,
            rng,
            phase: SessionPhase::Idle,
            board: None,
            first_pick: None,
            second_pick: None,
            score: ScoreState::default(),
            timers: DelayQueue::new(),
            pending: None,
            events: Vec::new(),
        }
    }

    // === Inbound operations ===

    /// Start a round on a `rows x columns` board.
    ///
    /// Cancels whatever the previous round still had scheduled, discards
    /// its board and undrained events, resets scoring, and schedules the
    /// preview. Valid from any phase.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfiguration`] if either dimension is zero or
    /// the card count is odd; the session state is left untouched.
    pub fn start_round(&mut self, rows: usize, columns: usize) -> Result<(), GameError> {
        if rows == 0 || columns == 0 || (rows * columns) % 2 != 0 {
            return Err(GameError::InvalidConfiguration { rows, columns });
        }

        let board = Board::generate(rows, columns, &mut self.rng)?;

        // A stale step from the previous round must never touch the new board.
        self.cancel_pending();

        info!(
            rows,
            columns,
            pairs = board.total_pairs(),
            seed = self.rng.seed(),
            "round started"
        );

        self.score = ScoreState::new(board.total_pairs());
        self.board = Some(board);
        self.first_pick = None;
        self.second_pick = None;
        self.events.clear();
        self.emit_score();

        self.phase = SessionPhase::Previewing;
        self.schedule(self.config.preview_delay, TimedAction::RevealPreview);

        Ok(())
    }

    /// Submit a pick.
    ///
    /// Accepted only in the two awaiting phases, on a face-down card that
    /// is on the board. Everything else is a silent no-op.
    pub fn select_card(&mut self, position: CardPosition) {
        if !self.phase.accepts_selection() {
            debug!(%position, phase = %self.phase, "selection rejected: not accepting input");
            return;
        }
        let picking_first = self.phase == SessionPhase::AwaitingFirstPick;

        let Some(board) = self.board.as_mut() else {
            return;
        };
        let Some(card) = board.card_mut(position) else {
            debug!(%position, "selection rejected: off the board");
            return;
        };
        if !card.is_selectable() {
            debug!(%position, state = ?card.state(), "selection rejected: card not selectable");
            return;
        }

        card.reveal();
        self.events.push(SessionEvent::CardRevealed { position });

        if picking_first {
            self.first_pick = Some(position);
            self.phase = SessionPhase::AwaitingSecondPick;
        } else {
            self.second_pick = Some(position);
            self.phase = SessionPhase::Resolving;
            self.schedule(self.config.resolve_delay, TimedAction::Resolve);
        }
    }

    /// Feed elapsed time to the session, firing any step that comes due.
    ///
    /// Steps never telescope: a step that schedules a follow-up only sees
    /// that follow-up fire on a later call, however large `elapsed` is.
    pub fn advance(&mut self, elapsed: Duration) {
        for action in self.timers.advance(elapsed) {
            self.pending = None;
            self.handle_timed(action);
        }
    }

    /// Remove and return every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // === Read accessors ===

    /// Get the current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Get the active board, if a round is running.
    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Get the current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.score()
    }

    /// Get the current combo streak.
    #[must_use]
    pub fn combo_streak(&self) -> u32 {
        self.score.combo_streak()
    }

    /// Get the number of completed pick-pairs this round.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.score.moves()
    }

    /// Get the number of pairs found this round.
    #[must_use]
    pub fn matches_found(&self) -> u32 {
        self.score.matches_found()
    }

    /// Get the number of pairs on the board.
    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.score.total_pairs()
    }

    /// Read the persisted best score, treating an unreadable store as 0.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        store::best_or_default(&self.store)
    }

    /// Get the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // === Scripted steps ===

    fn handle_timed(&mut self, action: TimedAction) {
        match action {
            TimedAction::RevealPreview => self.reveal_preview(),
            TimedAction::EndPreview => self.end_preview(),
            TimedAction::Resolve => self.resolve_picks(),
            TimedAction::ReturnToIdle => self.return_to_idle(),
        }
    }

    fn reveal_preview(&mut self) {
        let Some(board) = self.board.as_mut() else {
            return;
        };

        let mut revealed = Vec::with_capacity(board.card_count());
        for card in board.cards_mut() {
            card.reveal();
            revealed.push(card.position());
        }
        self.events.extend(
            revealed
                .into_iter()
                .map(|position| SessionEvent::CardRevealed { position }),
        );

        self.schedule(self.config.preview_duration, TimedAction::EndPreview);
    }

    fn end_preview(&mut self) {
        let Some(board) = self.board.as_mut() else {
            return;
        };

        let mut hidden = Vec::with_capacity(board.card_count());
        for card in board.cards_mut() {
            card.conceal();
            hidden.push(card.position());
        }
        self.events.extend(
            hidden
                .into_iter()
                .map(|position| SessionEvent::CardHidden { position }),
        );

        self.phase = SessionPhase::AwaitingFirstPick;
    }

    fn resolve_picks(&mut self) {
        let (Some(first), Some(second)) = (self.first_pick.take(), self.second_pick.take())
        else {
            return;
        };
        let Some(board) = self.board.as_mut() else {
            return;
        };
        let matched = match (board.card(first), board.card(second)) {
            (Some(a), Some(b)) => a.identity() == b.identity(),
            _ => return,
        };

        if matched {
            for position in [first, second] {
                if let Some(card) = board.card_mut(position) {
                    card.set_matched();
                }
                self.events.push(SessionEvent::CardMatched { position });
            }
            self.score.complete_move(true);
            self.score.apply_award(self.config.match_award);
        } else {
            for position in [first, second] {
                if let Some(card) = board.card_mut(position) {
                    card.conceal();
                }
                self.events.push(SessionEvent::CardHidden { position });
            }
            self.score.complete_move(false);
            self.score.apply_award(0);
        }
        self.emit_score();

        if self.score.is_round_won() {
            let final_score = self.score.score();
            info!(final_score, moves = self.score.moves(), "round complete");

            self.events
                .push(SessionEvent::RoundComplete { final_score });
            store::record_if_higher(&mut self.store, final_score);

            self.phase = SessionPhase::RoundComplete;
            self.schedule(self.config.round_over_delay, TimedAction::ReturnToIdle);
        } else {
            self.phase = SessionPhase::AwaitingFirstPick;
        }
    }

    fn return_to_idle(&mut self) {
        debug!("returning to idle");
        self.board = None;
        self.phase = SessionPhase::Idle;
    }

    // === Internals ===

    fn schedule(&mut self, delay: Duration, action: TimedAction) {
        debug_assert!(self.pending.is_none(), "one scripted step at a time");
        self.pending = Some(self.timers.schedule(delay, action));
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }
    }

    fn emit_score(&mut self) {
        self.events.push(SessionEvent::ScoreChanged {
            score: self.score.score(),
            combo_streak: self.score.combo_streak(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CardState;
    use crate::store::MemoryBestScore;

    fn session() -> GameSession<MemoryBestScore> {
        GameSession::new(SessionConfig::default(), MemoryBestScore::new(), 42)
    }

    /// Run the preview to completion so play is open.
    fn past_preview(session: &mut GameSession<MemoryBestScore>) {
        session.advance(session.config().preview_delay);
        session.advance(session.config().preview_duration);
        assert_eq!(session.phase(), SessionPhase::AwaitingFirstPick);
    }

    /// Positions of the two cards sharing each face, in face order.
    fn pairs_on_board(session: &GameSession<MemoryBestScore>) -> Vec<(CardPosition, CardPosition)> {
        let board = session.board().expect("active board");
        let mut by_face: Vec<(u32, Vec<CardPosition>)> = Vec::new();
        for card in board.cards() {
            match by_face.iter_mut().find(|(f, _)| *f == card.identity().raw()) {
                Some((_, positions)) => positions.push(card.position()),
                None => by_face.push((card.identity().raw(), vec![card.position()])),
            }
        }
        by_face.sort_unstable_by_key(|(f, _)| *f);
        by_face
            .into_iter()
            .map(|(_, positions)| (positions[0], positions[1]))
            .collect()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.board().is_none());
        assert_eq!(session.best_score(), 0);
    }

    #[test]
    fn test_start_round_validates_layout() {
        let mut session = session();

        assert!(matches!(
            session.start_round(3, 3),
            Err(GameError::InvalidConfiguration { rows: 3, columns: 3 })
        ));
        assert!(session.start_round(0, 4).is_err());
        assert_eq!(session.phase(), SessionPhase::Idle);

        assert!(session.start_round(2, 2).is_ok());
        assert_eq!(session.phase(), SessionPhase::Previewing);
        assert_eq!(session.total_pairs(), 2);
    }

    #[test]
    fn test_start_round_emits_score_reset() {
        let mut session = session();
        session.start_round(2, 2).unwrap();

        let events = session.drain_events();
        assert_eq!(
            events,
            vec![SessionEvent::ScoreChanged {
                score: 0,
                combo_streak: 1
            }]
        );
    }

    #[test]
    fn test_preview_sequence() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        session.drain_events();

        // Nothing happens until the preview delay has fully elapsed.
        session.advance(Duration::from_millis(999));
        assert!(session.drain_events().is_empty());

        session.advance(Duration::from_millis(1));
        let events = session.drain_events();
        assert_eq!(events.len(), 4);
        assert!(events
            .iter()
            .all(|e| matches!(e, SessionEvent::CardRevealed { .. })));
        assert!(session
            .board()
            .unwrap()
            .cards()
            .all(|c| c.state() == CardState::FaceUp));

        session.advance(Duration::from_millis(2500));
        let events = session.drain_events();
        assert_eq!(events.len(), 4);
        assert!(events
            .iter()
            .all(|e| matches!(e, SessionEvent::CardHidden { .. })));
        assert_eq!(session.phase(), SessionPhase::AwaitingFirstPick);
    }

    #[test]
    fn test_selection_rejected_during_preview() {
        let mut session = session();
        session.start_round(2, 2).unwrap();

        session.select_card(CardPosition::new(0));
        assert_eq!(session.phase(), SessionPhase::Previewing);
        assert_eq!(
            session
                .board()
                .unwrap()
                .card(CardPosition::new(0))
                .unwrap()
                .state(),
            CardState::FaceDown
        );
    }

    #[test]
    fn test_first_pick_reveals_card() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        past_preview(&mut session);
        session.drain_events();

        session.select_card(CardPosition::new(1));

        assert_eq!(session.phase(), SessionPhase::AwaitingSecondPick);
        assert_eq!(
            session.drain_events(),
            vec![SessionEvent::CardRevealed {
                position: CardPosition::new(1)
            }]
        );
    }

    #[test]
    fn test_reselecting_first_pick_is_noop() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        past_preview(&mut session);

        session.select_card(CardPosition::new(0));
        session.drain_events();

        session.select_card(CardPosition::new(0));
        assert_eq!(session.phase(), SessionPhase::AwaitingSecondPick);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_out_of_bounds_selection_is_noop() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        past_preview(&mut session);

        session.select_card(CardPosition::new(99));
        assert_eq!(session.phase(), SessionPhase::AwaitingFirstPick);
    }

    #[test]
    fn test_selection_locked_while_resolving() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        past_preview(&mut session);
        let pairs = pairs_on_board(&session);

        session.select_card(pairs[0].0);
        session.select_card(pairs[0].1);
        assert_eq!(session.phase(), SessionPhase::Resolving);
        session.drain_events();

        // A third pick while the resolution timer runs changes nothing.
        session.select_card(pairs[1].0);
        assert!(session.drain_events().is_empty());
        assert_eq!(
            session.board().unwrap().card(pairs[1].0).unwrap().state(),
            CardState::FaceDown
        );
    }

    #[test]
    fn test_match_resolution() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        past_preview(&mut session);
        let pairs = pairs_on_board(&session);

        session.select_card(pairs[0].0);
        session.select_card(pairs[0].1);
        session.drain_events();

        session.advance(Duration::from_secs(1));

        assert_eq!(session.score(), 5);
        assert_eq!(session.moves(), 1);
        assert_eq!(session.matches_found(), 1);
        assert_eq!(session.phase(), SessionPhase::AwaitingFirstPick);

        let events = session.drain_events();
        assert_eq!(
            events,
            vec![
                SessionEvent::CardMatched { position: pairs[0].0 },
                SessionEvent::CardMatched { position: pairs[0].1 },
                SessionEvent::ScoreChanged {
                    score: 5,
                    combo_streak: 2
                },
            ]
        );
    }

    #[test]
    fn test_mismatch_resolution() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        past_preview(&mut session);
        let pairs = pairs_on_board(&session);

        // One card from each pair: guaranteed mismatch.
        session.select_card(pairs[0].0);
        session.select_card(pairs[1].0);
        session.drain_events();

        session.advance(Duration::from_secs(1));

        assert_eq!(session.score(), 0);
        assert_eq!(session.moves(), 1);
        assert_eq!(session.matches_found(), 0);
        assert_eq!(session.phase(), SessionPhase::AwaitingFirstPick);

        let events = session.drain_events();
        assert_eq!(
            events,
            vec![
                SessionEvent::CardHidden { position: pairs[0].0 },
                SessionEvent::CardHidden { position: pairs[1].0 },
                SessionEvent::ScoreChanged {
                    score: 0,
                    combo_streak: 1
                },
            ]
        );

        // Both cards are selectable again.
        assert!(session
            .board()
            .unwrap()
            .card(pairs[0].0)
            .unwrap()
            .is_selectable());
    }

    #[test]
    fn test_matched_card_cannot_be_reselected() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        past_preview(&mut session);
        let pairs = pairs_on_board(&session);

        session.select_card(pairs[0].0);
        session.select_card(pairs[0].1);
        session.advance(Duration::from_secs(1));
        session.drain_events();

        session.select_card(pairs[0].0);
        assert_eq!(session.phase(), SessionPhase::AwaitingFirstPick);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_round_completion_and_return_to_idle() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        past_preview(&mut session);
        let pairs = pairs_on_board(&session);

        for (a, b) in pairs {
            session.select_card(a);
            session.select_card(b);
            session.advance(Duration::from_secs(1));
        }

        assert_eq!(session.phase(), SessionPhase::RoundComplete);
        // Two consecutive matches: 5 + 5.
        assert_eq!(session.score(), 10);
        assert_eq!(session.best_score(), 10);

        let events = session.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, SessionEvent::RoundComplete { .. }))
                .count(),
            1
        );
        assert!(events.contains(&SessionEvent::RoundComplete { final_score: 10 }));

        // Selection stays dead in RoundComplete.
        session.select_card(CardPosition::new(0));
        assert!(session.drain_events().is_empty());

        session.advance(Duration::from_secs(4));
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.board().is_none());
    }

    #[test]
    fn test_start_round_cancels_stale_resolution() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        past_preview(&mut session);
        let pairs = pairs_on_board(&session);

        // Leave a resolution pending, then restart.
        session.select_card(pairs[0].0);
        session.select_card(pairs[0].1);
        assert_eq!(session.phase(), SessionPhase::Resolving);

        session.start_round(2, 2).unwrap();
        assert_eq!(session.phase(), SessionPhase::Previewing);
        session.drain_events();

        // The stale resolution must not fire into the new round; the only
        // thing due is the new preview reveal.
        session.advance(Duration::from_secs(1));
        assert_eq!(session.phase(), SessionPhase::Previewing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves(), 0);
        assert!(session
            .drain_events()
            .iter()
            .all(|e| matches!(e, SessionEvent::CardRevealed { .. })));
    }

    #[test]
    fn test_restart_from_round_complete() {
        let mut session = session();
        session.start_round(2, 2).unwrap();
        past_preview(&mut session);

        for (a, b) in pairs_on_board(&session) {
            session.select_card(a);
            session.select_card(b);
            session.advance(Duration::from_secs(1));
        }
        assert_eq!(session.phase(), SessionPhase::RoundComplete);

        // Restart before the round-over delay elapses.
        session.start_round(2, 2).unwrap();
        assert_eq!(session.phase(), SessionPhase::Previewing);

        // The cancelled return-to-idle never fires mid-round.
        session.advance(Duration::from_secs(10));
        assert_ne!(session.phase(), SessionPhase::Idle);
        assert!(session.board().is_some());
    }
}
