//! Stage sequencer: puzzle, then scramble, then the card.
//!
//! The sequencer owns every engine and every timer. Hosts forward input
//! and the current time, call [`StageSequencer::tick`] from their frame or
//! timer loop, and render from the accessors or from [`FlowEvent`]s
//! delivered to subscribers.
//!
//! Input that does not belong to the current stage is ignored and reported
//! as `None`. After [`StageSequencer::teardown`] every pending timer is
//! cancelled and all input is ignored.

use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{EngineResult, FlowConfig, GameRng, Vec2};
use crate::evasion::{
    AcceptOutcome, EvasionEngine, EvasionPhase, EvasionState, MessageDeck, PhaseTransition,
    ProximityEvent, ProximityOutcome,
};
use crate::puzzle::{SlideOutcome, TileBoard, TilePuzzleEngine};
use crate::scramble::{CheckOutcome, WordScramble};

use super::letter::{LetterReveal, LetterState};
use super::scheduler::{Millis, Scheduler, TaskId};
use super::stage::{progress, Stage, StageStatus};

/// Timers the sequencer schedules on itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FlowTimer {
    /// Move from the solved stage to `to`.
    AdvanceStage { to: Stage },
    /// Hide "try again" feedback.
    ClearFeedback,
    /// Show the letter inside the opened envelope.
    RevealLetter,
    /// Remove the envelope after the letter was hidden.
    FinishClose,
}

/// Notifications for view layers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum FlowEvent {
    StageChanged { from: Stage, to: Stage },
    TileMoved { index: usize, move_count: u32 },
    PuzzleSolved { move_count: u32 },
    ScrambleChecked { outcome: CheckOutcome, attempts: u32 },
    FeedbackCleared,
    DeclineEscaped { position: Vec2, attempt_count: usize },
    EvasionPhaseChanged(PhaseTransition),
    Accepted { phase: EvasionPhase },
    LetterChanged(LetterState),
    TornDown { cancelled: usize },
}

type Listener = Box<dyn FnMut(&FlowEvent)>;

/// Drives the whole card from the first puzzle to the letter.
pub struct StageSequencer {
    config: FlowConfig,
    stage: Stage,
    torn_down: bool,

    puzzle_engine: TilePuzzleEngine,
    board: TileBoard,

    scramble: WordScramble,
    feedback: Option<CheckOutcome>,

    evasion_engine: EvasionEngine,
    evasion: EvasionState,
    deck: MessageDeck,
    evasion_rng: GameRng,

    letter: LetterReveal,

    scheduler: Scheduler<FlowTimer>,
    advance_task: Option<TaskId>,
    feedback_task: Option<TaskId>,
    letter_task: Option<TaskId>,

    listeners: Vec<Listener>,
}

impl std::fmt::Debug for StageSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageSequencer")
            .field("stage", &self.stage)
            .field("torn_down", &self.torn_down)
            .field("board", &self.board)
            .field("scramble", &self.scramble)
            .field("evasion", &self.evasion)
            .field("letter", &self.letter)
            .field("pending_timers", &self.scheduler.pending())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl StageSequencer {
    /// Build every engine from `config`. Fails on any invalid configuration.
    pub fn new(config: FlowConfig) -> EngineResult<Self> {
        let root = GameRng::new(config.seed);

        let puzzle_engine = TilePuzzleEngine::new(config.puzzle.clone())?;
        let board = puzzle_engine.initialize(&mut root.for_context("puzzle"))?;

        let scramble = WordScramble::from_config(&config.scramble, &mut root.for_context("scramble"))?;

        let evasion_engine = EvasionEngine::new(config.evasion.clone())?;
        let deck = MessageDeck::new(config.decline_messages.iter().cloned(), config.evasion.message_count)?;
        let evasion = evasion_engine.initialize();

        debug!(seed = config.seed, grid_size = config.puzzle.grid_size, "stage sequencer ready");

        Ok(Self {
            stage: Stage::Puzzle,
            torn_down: false,
            puzzle_engine,
            board,
            scramble,
            feedback: None,
            evasion_engine,
            evasion,
            deck,
            evasion_rng: root.for_context("evasion"),
            letter: LetterReveal::new(),
            scheduler: Scheduler::new(),
            advance_task: None,
            feedback_task: None,
            letter_task: None,
            listeners: Vec::new(),
            config,
        })
    }

    /// Receive every [`FlowEvent`] from now on.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&FlowEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Progress dots, one per stage.
    #[must_use]
    pub fn progress(&self) -> [StageStatus; 3] {
        progress(self.stage)
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    #[must_use]
    pub fn board(&self) -> &TileBoard {
        &self.board
    }

    #[must_use]
    pub fn scramble(&self) -> &WordScramble {
        &self.scramble
    }

    /// Feedback currently shown under the scramble.
    #[must_use]
    pub fn feedback(&self) -> Option<CheckOutcome> {
        self.feedback
    }

    #[must_use]
    pub fn evasion(&self) -> &EvasionState {
        &self.evasion
    }

    #[must_use]
    pub fn evasion_engine(&self) -> &EvasionEngine {
        &self.evasion_engine
    }

    /// Current decline-button label.
    #[must_use]
    pub fn decline_label(&self) -> &str {
        self.evasion_engine.message_for(&self.evasion, &self.deck)
    }

    /// Footer text under the card buttons.
    #[must_use]
    pub fn status_line(&self) -> &'static str {
        self.evasion_engine.status_line(&self.evasion)
    }

    #[must_use]
    pub fn letter_state(&self) -> LetterState {
        self.letter.state()
    }

    /// Letter text, once the letter is readable.
    #[must_use]
    pub fn letter_text(&self) -> Option<&str> {
        self.letter
            .is_letter_visible()
            .then_some(self.config.letter_text.as_str())
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// When the next timer fires.
    #[must_use]
    pub fn next_timer(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    // === Puzzle ===

    /// The player clicked the tile at `index`.
    pub fn click_tile(&mut self, index: usize, now: Millis) -> Option<SlideOutcome> {
        if !self.accepts_input(Stage::Puzzle) {
            return None;
        }

        let outcome = self.puzzle_engine.attempt_slide(&mut self.board, index);
        if outcome.is_accepted() {
            self.emit(FlowEvent::TileMoved {
                index,
                move_count: self.board.move_count(),
            });
        }
        if outcome == SlideOutcome::Solved {
            self.emit(FlowEvent::PuzzleSolved {
                move_count: self.board.move_count(),
            });
            self.schedule_advance(Stage::Scramble, now);
        }
        Some(outcome)
    }

    /// Next tile to click, for the hint button.
    #[must_use]
    pub fn puzzle_hint(&self) -> Option<usize> {
        if self.stage != Stage::Puzzle || self.torn_down {
            return None;
        }
        self.puzzle_engine.hint(&self.board)
    }

    // === Scramble ===

    /// Drag a word from `from` to `to`.
    pub fn move_word(&mut self, from: usize, to: usize) -> bool {
        self.accepts_input(Stage::Scramble) && self.scramble.move_word(from, to)
    }

    /// Replace the word order wholesale.
    pub fn reorder_words(&mut self, order: Vec<String>) -> bool {
        self.accepts_input(Stage::Scramble) && self.scramble.reorder(order)
    }

    /// The player pressed "check answer".
    pub fn check_answer(&mut self, now: Millis) -> Option<CheckOutcome> {
        if !self.accepts_input(Stage::Scramble) {
            return None;
        }

        let outcome = self.scramble.check_answer();
        self.emit(FlowEvent::ScrambleChecked {
            outcome,
            attempts: self.scramble.attempts(),
        });

        match outcome {
            CheckOutcome::Correct => {
                self.cancel_task(TaskSlot::Feedback);
                self.feedback = Some(CheckOutcome::Correct);
                self.schedule_advance(Stage::Valentine, now);
            }
            CheckOutcome::Incorrect => {
                self.cancel_task(TaskSlot::Feedback);
                self.feedback = Some(CheckOutcome::Incorrect);
                let id = self
                    .scheduler
                    .schedule(now, self.config.feedback_delay_ms, FlowTimer::ClearFeedback);
                self.feedback_task = Some(id);
            }
            CheckOutcome::AlreadySolved => {}
        }
        Some(outcome)
    }

    // === Valentine card ===

    /// The pointer moved over the card.
    ///
    /// Applies the proximity threshold, then lets the decline button escape.
    pub fn pointer_moved(&mut self, event: &ProximityEvent) -> Option<ProximityOutcome> {
        if !self.accepts_input(Stage::Valentine) {
            return None;
        }
        if !self
            .evasion_engine
            .is_within_threshold(event.pointer, event.button_center)
        {
            return None;
        }
        Some(self.escape(event))
    }

    /// The decline button itself was clicked. It escapes regardless of distance.
    pub fn decline_clicked(&mut self, event: &ProximityEvent) -> Option<ProximityOutcome> {
        if !self.accepts_input(Stage::Valentine) {
            return None;
        }
        Some(self.escape(event))
    }

    /// The accept button was clicked.
    pub fn accept(&mut self) -> Option<AcceptOutcome> {
        if !self.accepts_input(Stage::Valentine) {
            return None;
        }
        let outcome = self.evasion_engine.on_accept(&mut self.evasion);
        self.after_accept(outcome);
        Some(outcome)
    }

    /// A click anywhere on the takeover screen.
    pub fn takeover_clicked(&mut self) -> Option<AcceptOutcome> {
        if !self.accepts_input(Stage::Valentine) {
            return None;
        }
        let outcome = self.evasion_engine.on_takeover_click(&mut self.evasion);
        self.after_accept(outcome);
        Some(outcome)
    }

    // === Letter ===

    /// Open the letter. Only available once the card was accepted.
    pub fn open_letter(&mut self, now: Millis) -> bool {
        if !self.accepts_input(Stage::Valentine) || !self.evasion.is_accepted() {
            return false;
        }
        if !self.letter.open() {
            return false;
        }
        self.cancel_task(TaskSlot::Letter);
        let id = self
            .scheduler
            .schedule(now, self.config.letter_delay_ms, FlowTimer::RevealLetter);
        self.letter_task = Some(id);
        self.emit(FlowEvent::LetterChanged(self.letter.state()));
        true
    }

    /// Close the letter.
    pub fn close_letter(&mut self, now: Millis) -> bool {
        if !self.accepts_input(Stage::Valentine) || !self.letter.close() {
            return false;
        }
        self.cancel_task(TaskSlot::Letter);
        let id = self
            .scheduler
            .schedule(now, self.config.close_delay_ms, FlowTimer::FinishClose);
        self.letter_task = Some(id);
        self.emit(FlowEvent::LetterChanged(self.letter.state()));
        true
    }

    // === Time ===

    /// Fire every timer due at or before `now`. Returns how many fired.
    pub fn tick(&mut self, now: Millis) -> usize {
        if self.torn_down {
            return 0;
        }

        let mut fired = 0;
        while let Some((id, timer)) = self.scheduler.pop_due(now) {
            fired += 1;
            trace!(task = %id, ?timer, %now, "timer fired");
            self.fire(id, timer);
        }
        fired
    }

    /// Cancel every pending timer and stop accepting input.
    pub fn teardown(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        let cancelled = self.scheduler.cancel_all();
        self.advance_task = None;
        self.feedback_task = None;
        self.letter_task = None;
        self.torn_down = true;
        debug!(cancelled, stage = %self.stage, "stage sequencer torn down");
        self.emit(FlowEvent::TornDown { cancelled });
        cancelled
    }

    // === Internals ===

    fn accepts_input(&self, stage: Stage) -> bool {
        if self.torn_down {
            trace!(%stage, "input after teardown ignored");
            return false;
        }
        if self.stage != stage {
            debug!(expected = %stage, current = %self.stage, "input for another stage ignored");
            return false;
        }
        true
    }

    fn escape(&mut self, event: &ProximityEvent) -> ProximityOutcome {
        let outcome =
            self.evasion_engine
                .on_proximity_event(&mut self.evasion, event, &mut self.evasion_rng);
        if let ProximityOutcome::Escaped {
            position,
            transition,
        } = outcome
        {
            self.emit(FlowEvent::DeclineEscaped {
                position,
                attempt_count: self.evasion.attempt_count(),
            });
            if let Some(t) = transition {
                self.emit(FlowEvent::EvasionPhaseChanged(t));
            }
        }
        outcome
    }

    fn after_accept(&mut self, outcome: AcceptOutcome) {
        if let AcceptOutcome::Accepted(phase) = outcome {
            self.emit(FlowEvent::Accepted { phase });
        }
    }

    fn schedule_advance(&mut self, to: Stage, now: Millis) {
        self.cancel_task(TaskSlot::Advance);
        let delay = self.config.advance_delay_ms();
        let id = self
            .scheduler
            .schedule(now, delay, FlowTimer::AdvanceStage { to });
        self.advance_task = Some(id);
        debug!(%to, due = %now.after(delay), "stage advance scheduled");
    }

    fn fire(&mut self, id: TaskId, timer: FlowTimer) {
        match timer {
            FlowTimer::AdvanceStage { to } => {
                clear_if(&mut self.advance_task, id);
                if self.stage.next() == Some(to) {
                    let from = self.stage;
                    self.stage = to;
                    self.feedback = None;
                    debug!(%from, %to, "stage advanced");
                    self.emit(FlowEvent::StageChanged { from, to });
                }
            }
            FlowTimer::ClearFeedback => {
                clear_if(&mut self.feedback_task, id);
                if self.feedback == Some(CheckOutcome::Incorrect) {
                    self.feedback = None;
                    self.emit(FlowEvent::FeedbackCleared);
                }
            }
            FlowTimer::RevealLetter => {
                clear_if(&mut self.letter_task, id);
                if self.letter.reveal() {
                    self.emit(FlowEvent::LetterChanged(self.letter.state()));
                }
            }
            FlowTimer::FinishClose => {
                clear_if(&mut self.letter_task, id);
                if self.letter.finish_close() {
                    self.emit(FlowEvent::LetterChanged(self.letter.state()));
                }
            }
        }
    }

    fn cancel_task(&mut self, slot: TaskSlot) {
        let task = match slot {
            TaskSlot::Advance => self.advance_task.take(),
            TaskSlot::Feedback => self.feedback_task.take(),
            TaskSlot::Letter => self.letter_task.take(),
        };
        if let Some(id) = task {
            if self.scheduler.cancel(id) {
                trace!(task = %id, "timer superseded");
            }
        }
    }

    fn emit(&mut self, event: FlowEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

#[derive(Clone, Copy)]
enum TaskSlot {
    Advance,
    Feedback,
    Letter,
}

fn clear_if(slot: &mut Option<TaskId>, id: TaskId) {
    if *slot == Some(id) {
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EvasionConfig, PuzzleConfig, Size};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sequencer() -> StageSequencer {
        StageSequencer::new(FlowConfig::default()).unwrap()
    }

    fn solve_puzzle(seq: &mut StageSequencer, now: Millis) {
        while let Some(target) = seq.puzzle_hint() {
            seq.click_tile(target, now);
        }
        assert!(seq.board().is_solved());
    }

    fn near_event() -> ProximityEvent {
        ProximityEvent {
            pointer: Vec2::new(590.0, 400.0),
            button_center: Vec2::new(600.0, 400.0),
            button_size: Size::new(80.0, 40.0),
            zone: Size::new(400.0, 160.0),
            zone_center: Vec2::ZERO,
            viewport: Size::new(1200.0, 800.0),
        }
    }

    #[test]
    fn test_starts_on_puzzle() {
        let seq = sequencer();
        assert_eq!(seq.stage(), Stage::Puzzle);
        assert!(!seq.board().is_solved());
        assert_eq!(seq.decline_label(), "No");
        assert_eq!(seq.pending_timers(), 0);
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = FlowConfig::default().with_puzzle(PuzzleConfig::default().with_grid_size(1));
        assert!(StageSequencer::new(config).is_err());

        let config = FlowConfig::default().with_decline_messages(Vec::<String>::new());
        assert!(StageSequencer::new(config).is_err());

        let config = FlowConfig::default()
            .with_decline_messages(["No"])
            .with_evasion(EvasionConfig::default());
        assert!(StageSequencer::new(config).is_err());
    }

    #[test]
    fn test_wrong_stage_input_ignored() {
        let mut seq = sequencer();
        assert_eq!(seq.check_answer(Millis(0)), None);
        assert!(!seq.move_word(0, 1));
        assert_eq!(seq.pointer_moved(&near_event()), None);
        assert_eq!(seq.accept(), None);
        assert!(!seq.open_letter(Millis(0)));
    }

    #[test]
    fn test_puzzle_advances_after_delay() {
        let mut seq = sequencer();
        solve_puzzle(&mut seq, Millis(1000));

        assert_eq!(seq.next_timer(), Some(Millis(3000)));
        assert_eq!(seq.tick(Millis(2999)), 0);
        assert_eq!(seq.stage(), Stage::Puzzle);

        assert_eq!(seq.tick(Millis(3000)), 1);
        assert_eq!(seq.stage(), Stage::Scramble);
        assert_eq!(
            seq.progress(),
            [StageStatus::Completed, StageStatus::Current, StageStatus::Upcoming]
        );
    }

    #[test]
    fn test_teardown_cancels_advance() {
        let mut seq = sequencer();
        solve_puzzle(&mut seq, Millis(0));
        assert_eq!(seq.pending_timers(), 1);

        assert_eq!(seq.teardown(), 1);
        assert_eq!(seq.tick(Millis(10_000)), 0);
        assert_eq!(seq.stage(), Stage::Puzzle);
        assert_eq!(seq.teardown(), 0);
    }

    #[test]
    fn test_events_delivered() {
        let mut seq = sequencer();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        seq.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        solve_puzzle(&mut seq, Millis(0));
        seq.tick(Millis(2000));

        let events = log.borrow();
        assert!(matches!(events.first(), Some(FlowEvent::TileMoved { move_count: 1, .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, FlowEvent::PuzzleSolved { .. })));
        assert_eq!(
            events.last(),
            Some(&FlowEvent::StageChanged {
                from: Stage::Puzzle,
                to: Stage::Scramble,
            })
        );
    }
}
