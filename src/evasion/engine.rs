//! The evasive decline button.
//!
//! Every time the pointer comes close, the button jumps away from it and
//! the accept button grows a little. After enough escapes inside its zone
//! the button breaks out and wanders the whole viewport; after a few more
//! it is captured and the accept action takes over the screen.
//!
//! ## Coordinate frames
//!
//! While `Confined`, `position` is relative to the zone centre. On the
//! switch to `Wandering` the stored offset is translated into the viewport
//! frame by adding `zone_center` (zone centre relative to viewport centre)
//! and clamped to the viewport, so the button does not visibly jump.

use tracing::{debug, trace};

use crate::core::{clamp_offset, EngineResult, EvasionConfig, RandomSource, Vec2};

use super::messages::MessageDeck;
use super::phase::{EvasionPhase, PhaseTransition};
use super::state::{AcceptOutcome, EvasionState, ProximityEvent, ProximityOutcome};

/// Escape direction when the pointer sits exactly on the button centre.
pub const FALLBACK_DIRECTION: Vec2 = Vec2::new(0.0, -1.0);

/// Footer shown before the first escape.
pub const STATUS_UNTOUCHED: &str = "Choose wisely... 💭";

/// Footer shown once the button has escaped.
pub const STATUS_SHY: &str = "\"No\" seems a bit shy 😈";

/// Applies pointer events to an [`EvasionState`].
///
/// ```
/// use valentine_engine::core::{EvasionConfig, GameRng, Size, Vec2};
/// use valentine_engine::evasion::{EvasionEngine, EvasionPhase, ProximityEvent};
///
/// let engine = EvasionEngine::new(EvasionConfig::default()).unwrap();
/// let mut state = engine.initialize();
/// let mut rng = GameRng::new(3);
///
/// let event = ProximityEvent {
///     pointer: Vec2::new(590.0, 400.0),
///     button_center: Vec2::new(600.0, 400.0),
///     button_size: Size::new(80.0, 40.0),
///     zone: Size::new(400.0, 160.0),
///     zone_center: Vec2::ZERO,
///     viewport: Size::new(1200.0, 800.0),
/// };
/// engine.on_proximity_event(&mut state, &event, &mut rng);
///
/// assert_eq!(state.attempt_count(), 1);
/// assert_eq!(state.phase(), EvasionPhase::Confined);
/// assert!(state.position().x > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct EvasionEngine {
    config: EvasionConfig,
}

impl EvasionEngine {
    /// Create an engine, rejecting unusable configurations.
    pub fn new(config: EvasionConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &EvasionConfig {
        &self.config
    }

    /// Highest attempt count.
    #[must_use]
    pub fn attempt_cap(&self) -> usize {
        self.config.message_count.saturating_sub(1)
    }

    /// Fresh state: confined, centred, nothing attempted.
    #[must_use]
    pub fn initialize(&self) -> EvasionState {
        EvasionState::new()
    }

    /// Should a pointer at `pointer` trigger an escape?
    ///
    /// Callers evaluate this before calling [`Self::on_proximity_event`].
    #[must_use]
    pub fn is_within_threshold(&self, pointer: Vec2, button_center: Vec2) -> bool {
        pointer.distance(button_center) < self.config.proximity_threshold
    }

    /// Move the button away from the pointer.
    ///
    /// The caller has already decided the pointer is close enough. Never
    /// fails: hostile geometry is clamped, not rejected.
    pub fn on_proximity_event<R: RandomSource>(
        &self,
        state: &mut EvasionState,
        event: &ProximityEvent,
        rng: &mut R,
    ) -> ProximityOutcome {
        if state.accepted || !state.phase.is_evasive() {
            trace!(phase = %state.phase, accepted = state.accepted, "proximity ignored");
            return ProximityOutcome::Ignored;
        }

        let started_in = state.phase;
        let direction = (event.button_center - event.pointer)
            .normalized()
            .unwrap_or(FALLBACK_DIRECTION);

        let mut distance = self.config.min_move + rng.gen_unit() * self.config.move_jitter;
        if started_in == EvasionPhase::Wandering {
            distance += self.config.wander_bonus;
        }

        let tentative = state.position + direction.scale(distance);
        state.position = clamp_offset(tentative, self.extent_for(started_in, event));

        state.attempt_count = (state.attempt_count + 1).min(self.attempt_cap());

        let mut transition = None;
        match started_in {
            EvasionPhase::Confined if state.attempt_count >= self.attempt_cap() => {
                let translated = state.position + event.zone_center;
                state.position =
                    clamp_offset(translated, self.extent_for(EvasionPhase::Wandering, event));
                state.phase = EvasionPhase::Wandering;
                transition = Some(PhaseTransition {
                    from: EvasionPhase::Confined,
                    to: EvasionPhase::Wandering,
                });
            }
            EvasionPhase::Wandering => {
                state.wander_escape_count += 1;
                if state.wander_escape_count >= self.config.wander_limit {
                    state.phase = EvasionPhase::Captured;
                    transition = Some(PhaseTransition {
                        from: EvasionPhase::Wandering,
                        to: EvasionPhase::Captured,
                    });
                }
            }
            _ => {}
        }

        state.yes_emphasis =
            (state.yes_emphasis + self.config.emphasis_step).min(self.config.emphasis_max);

        if let Some(t) = transition {
            debug!(
                from = %t.from,
                to = %t.to,
                attempts = state.attempt_count,
                wander_escapes = state.wander_escape_count,
                "decline button phase changed"
            );
        }
        trace!(position = %state.position, distance, "decline button escaped");

        ProximityOutcome::Escaped {
            position: state.position,
            transition,
        }
    }

    /// Label for the decline button.
    #[must_use]
    pub fn message_for<'a>(&self, state: &EvasionState, deck: &'a MessageDeck) -> &'a str {
        deck.get(state.attempt_count)
    }

    /// Footer text under the buttons.
    #[must_use]
    pub fn status_line(&self, state: &EvasionState) -> &'static str {
        if state.attempt_count > 0 {
            STATUS_SHY
        } else {
            STATUS_UNTOUCHED
        }
    }

    /// The accept button was clicked. Terminal from any phase.
    pub fn on_accept(&self, state: &mut EvasionState) -> AcceptOutcome {
        if state.accepted {
            return AcceptOutcome::AlreadyAccepted;
        }
        state.accepted = true;
        debug!(phase = %state.phase, attempts = state.attempt_count, "valentine accepted");
        AcceptOutcome::Accepted(state.phase)
    }

    /// A click anywhere on the takeover surface. Accepts once captured.
    pub fn on_takeover_click(&self, state: &mut EvasionState) -> AcceptOutcome {
        if state.accepted {
            return AcceptOutcome::AlreadyAccepted;
        }
        if state.phase != EvasionPhase::Captured {
            return AcceptOutcome::NotCaptured;
        }
        self.on_accept(state)
    }

    /// Largest offset allowed in `phase` for this event's geometry.
    #[must_use]
    pub fn extent_for(&self, phase: EvasionPhase, event: &ProximityEvent) -> Vec2 {
        let bounds = match phase {
            EvasionPhase::Confined => event.zone,
            EvasionPhase::Wandering | EvasionPhase::Captured => event.viewport,
        };
        bounds.inner_half_extent(event.button_size, self.config.edge_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, Size};

    /// Random source that always returns the same unit value.
    struct FixedRng(f64);

    impl RandomSource for FixedRng {
        fn gen_index(&mut self, _len: usize) -> usize {
            0
        }

        fn gen_unit(&mut self) -> f64 {
            self.0
        }
    }

    fn event(pointer: Vec2, button_center: Vec2) -> ProximityEvent {
        ProximityEvent {
            pointer,
            button_center,
            button_size: Size::new(80.0, 40.0),
            zone: Size::new(400.0, 160.0),
            zone_center: Vec2::new(100.0, 50.0),
            viewport: Size::new(1200.0, 800.0),
        }
    }

    fn engine() -> EvasionEngine {
        EvasionEngine::new(EvasionConfig::default()).unwrap()
    }

    #[test]
    fn test_initialize() {
        let state = engine().initialize();
        assert_eq!(state.phase(), EvasionPhase::Confined);
        assert_eq!(state.position(), Vec2::ZERO);
        assert_eq!(state.attempt_count(), 0);
        assert_eq!(state.wander_escape_count(), 0);
        assert_eq!(state.yes_emphasis(), 1.0);
        assert!(!state.is_accepted());
    }

    #[test]
    fn test_moves_away_from_pointer() {
        let engine = engine();
        let mut state = engine.initialize();
        let mut rng = FixedRng(0.0);

        // Pointer to the left: button moves right by exactly min_move.
        let outcome = engine.on_proximity_event(
            &mut state,
            &event(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0)),
            &mut rng,
        );
        assert_eq!(state.position(), Vec2::new(100.0, 0.0));
        assert_eq!(outcome.transition(), None);
        assert!((state.yes_emphasis() - 1.08).abs() < 1e-12);
    }

    #[test]
    fn test_clamped_to_zone() {
        let engine = engine();
        let mut state = engine.initialize();
        let mut rng = FixedRng(0.99);

        for _ in 0..3 {
            engine.on_proximity_event(
                &mut state,
                &event(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)),
                &mut rng,
            );
        }
        // Zone 400x160, button 80x40, margin 10 -> extent (150, 50).
        assert_eq!(state.position(), Vec2::new(150.0, 50.0));
    }

    #[test]
    fn test_fallback_direction() {
        let engine = engine();
        let mut state = engine.initialize();
        let mut rng = FixedRng(0.0);
        let here = Vec2::new(20.0, 20.0);

        engine.on_proximity_event(&mut state, &event(here, here), &mut rng);
        assert_eq!(state.position(), Vec2::new(0.0, -50.0));
    }

    #[test]
    fn test_translate_on_wandering() {
        let engine = EvasionEngine::new(EvasionConfig::default().with_message_count(2)).unwrap();
        let mut state = engine.initialize();
        let mut rng = FixedRng(0.0);

        let outcome = engine.on_proximity_event(
            &mut state,
            &event(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0)),
            &mut rng,
        );
        assert_eq!(
            outcome.transition(),
            Some(PhaseTransition {
                from: EvasionPhase::Confined,
                to: EvasionPhase::Wandering,
            })
        );
        // (100, 0) in the zone frame plus the zone centre (100, 50).
        assert_eq!(state.position(), Vec2::new(200.0, 50.0));
        assert_eq!(state.wander_escape_count(), 0);
    }

    #[test]
    fn test_wander_bonus() {
        let engine = EvasionEngine::new(EvasionConfig::default().with_message_count(1)).unwrap();
        let mut state = engine.initialize();
        let mut rng = FixedRng(0.0);
        let ev = ProximityEvent {
            zone_center: Vec2::ZERO,
            ..event(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0))
        };

        // Cap is zero, so the very first escape breaks out.
        engine.on_proximity_event(&mut state, &ev, &mut rng);
        assert_eq!(state.phase(), EvasionPhase::Wandering);
        assert_eq!(state.position(), Vec2::new(100.0, 0.0));

        engine.on_proximity_event(&mut state, &ev, &mut rng);
        assert_eq!(state.position(), Vec2::new(250.0, 0.0));
        assert_eq!(state.wander_escape_count(), 1);
    }

    #[test]
    fn test_captured_ignores_events() {
        let engine = EvasionEngine::new(
            EvasionConfig::default()
                .with_message_count(1)
                .with_wander_limit(1),
        )
        .unwrap();
        let mut state = engine.initialize();
        let mut rng = GameRng::new(1);
        let ev = event(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0));

        engine.on_proximity_event(&mut state, &ev, &mut rng);
        let outcome = engine.on_proximity_event(&mut state, &ev, &mut rng);
        assert_eq!(
            outcome.transition().map(|t| t.to),
            Some(EvasionPhase::Captured)
        );
        assert!(state.is_takeover());

        let frozen = state.clone();
        assert_eq!(
            engine.on_proximity_event(&mut state, &ev, &mut rng),
            ProximityOutcome::Ignored
        );
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_emphasis_caps() {
        let engine = engine();
        let mut state = engine.initialize();
        let mut rng = GameRng::new(2);
        let ev = event(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0));

        for _ in 0..20 {
            engine.on_proximity_event(&mut state, &ev, &mut rng);
        }
        assert_eq!(state.yes_emphasis(), 2.0);
    }

    #[test]
    fn test_accept_is_terminal() {
        let engine = engine();
        let mut state = engine.initialize();
        let mut rng = GameRng::new(2);

        assert_eq!(
            engine.on_accept(&mut state),
            AcceptOutcome::Accepted(EvasionPhase::Confined)
        );
        assert_eq!(engine.on_accept(&mut state), AcceptOutcome::AlreadyAccepted);

        let frozen = state.clone();
        let ev = event(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0));
        assert_eq!(
            engine.on_proximity_event(&mut state, &ev, &mut rng),
            ProximityOutcome::Ignored
        );
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_takeover_click_requires_capture() {
        let engine = engine();
        let mut state = engine.initialize();
        assert_eq!(engine.on_takeover_click(&mut state), AcceptOutcome::NotCaptured);
        assert!(!state.is_accepted());

        state.phase = EvasionPhase::Captured;
        assert_eq!(
            engine.on_takeover_click(&mut state),
            AcceptOutcome::Accepted(EvasionPhase::Captured)
        );
        assert!(state.is_accepted());
        assert!(!state.is_takeover());
    }

    #[test]
    fn test_messages_and_status() {
        let engine = engine();
        let deck = MessageDeck::default();
        let mut state = engine.initialize();
        assert_eq!(engine.message_for(&state, &deck), "No");
        assert_eq!(engine.status_line(&state), STATUS_UNTOUCHED);

        let mut rng = GameRng::new(2);
        let ev = event(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0));
        engine.on_proximity_event(&mut state, &ev, &mut rng);
        assert_eq!(engine.message_for(&state, &deck), "Are you sure?");
        assert_eq!(engine.status_line(&state), STATUS_SHY);
    }

    #[test]
    fn test_threshold() {
        let engine = engine();
        let center = Vec2::new(100.0, 100.0);
        assert!(engine.is_within_threshold(Vec2::new(150.0, 100.0), center));
        assert!(!engine.is_within_threshold(Vec2::new(200.0, 100.0), center));
    }
}
