//! Episode participants: external seats and scripted policies.
//!
//! Each player seat is either *external* (decisions arrive through
//! [`GymEnv::step`](crate::env::GymEnv::step)) or *scripted* (an internal
//! policy the environment queries during auto-resolution). Mixed seatings
//! are the normal case when training one agent against built-in opponents.

use crate::core::{Action, GameRng, GameState};

/// A scripted decision-maker occupying one seat.
pub trait Policy: Send {
    /// Pick one of `legal`. The slice is never empty.
    fn choose(&mut self, state: &GameState, legal: &[Action]) -> Action;

    /// Notification of a decision point resolved without a choice (forced
    /// single action or no-op). Default ignores it.
    fn observe(&mut self, state: &GameState) {
        let _ = state;
    }
}

/// Who controls a seat.
pub enum Controller {
    /// Decisions come from outside, via `step`.
    External,
    /// Decisions come from the boxed policy.
    Scripted(Box<dyn Policy>),
}

/// One seat in an episode.
pub struct Participant {
    pub(crate) controller: Controller,
    /// Forced single-action decision points are still surfaced to this
    /// seat instead of auto-played.
    pub(crate) interactive: bool,
}

impl Participant {
    /// An externally controlled seat.
    #[must_use]
    pub fn external() -> Self {
        Self {
            controller: Controller::External,
            interactive: false,
        }
    }

    /// A seat driven by a scripted policy.
    #[must_use]
    pub fn scripted(policy: impl Policy + 'static) -> Self {
        Self {
            controller: Controller::Scripted(Box::new(policy)),
            interactive: false,
        }
    }

    /// Surface forced single-action decisions instead of auto-playing them.
    #[must_use]
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Whether this seat's decisions arrive through `step`.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self.controller, Controller::External)
    }
}

/// Uniform-random baseline policy, seeded for reproducibility.
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    /// Create a random policy with its own seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, _state: &GameState, legal: &[Action]) -> Action {
        let index = self.rng.gen_range_usize(0..legal.len());
        legal[index].clone()
    }
}

/// Deterministic baseline that always takes the first legal action.
pub struct FirstActionPolicy;

impl Policy for FirstActionPolicy {
    fn choose(&mut self, _state: &GameState, legal: &[Action]) -> Action {
        legal[0].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, TemplateId};

    fn legal() -> Vec<Action> {
        vec![
            Action::new(TemplateId::new(0)),
            Action::with_args(TemplateId::new(1), &[2]),
            Action::with_args(TemplateId::new(1), &[3]),
        ]
    }

    #[test]
    fn test_participant_kinds() {
        assert!(Participant::external().is_external());
        assert!(!Participant::scripted(FirstActionPolicy).is_external());
        assert!(Participant::external().interactive().interactive);
    }

    #[test]
    fn test_first_action_policy() {
        let state = GameState::new(&GameConfig::new(2), 1);
        let legal = legal();

        let chosen = FirstActionPolicy.choose(&state, &legal);
        assert_eq!(chosen, legal[0]);
    }

    #[test]
    fn test_random_policy_is_seeded() {
        let state = GameState::new(&GameConfig::new(2), 1);
        let legal = legal();

        let picks = |seed| {
            let mut policy = RandomPolicy::new(seed);
            (0..20)
                .map(|_| policy.choose(&state, &legal))
                .collect::<Vec<_>>()
        };

        assert_eq!(picks(5), picks(5));
        assert!(picks(5).iter().all(|a| legal.contains(a)));
    }
}
