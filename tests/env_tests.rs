//! Gym environment integration tests.
//!
//! Runs full episodes of the bundled quarry game through `GymEnv` with a
//! mixed seating: one external seat driven by the test, one scripted
//! opponent resolved internally.

use boardgym::core::{Action, GameConfig, GameState, Outcome, PlayerId, PlayerMap, TemplateId};
use boardgym::env::{EnvError, EpisodeRecord, FirstActionPolicy, GymEnv, Participant, RandomPolicy};
use boardgym::games::Quarry;
use boardgym::obs::Vectorizable;
use boardgym::rules::ForwardModel;
use boardgym::space::{DecodeError, OrderedActionSpace};

fn quarry_env(master_seed: u64) -> GymEnv<Quarry> {
    let game = Quarry::builder(2).rounds(2).build();
    GymEnv::new(
        game,
        vec![
            Participant::external(),
            Participant::scripted(RandomPolicy::new(99)),
        ],
        master_seed,
    )
    .unwrap()
}

fn first_legal(mask: &[bool]) -> usize {
    mask.iter().position(|&m| m).expect("no legal index in mask")
}

// =============================================================================
// Protocol
// =============================================================================

#[test]
fn test_step_before_reset_is_rejected() {
    let mut env = quarry_env(1);
    assert!(matches!(env.step(0), Err(EnvError::NotReset)));
    assert!(matches!(env.action_mask(), Err(EnvError::NotReset)));
    assert!(matches!(env.current_player(), Err(EnvError::NotReset)));
    assert!(!env.is_done());
}

#[test]
fn test_reset_hands_control_to_the_external_seat() {
    let mut env = quarry_env(1);
    let obs = env.reset().unwrap();

    assert!(!obs.done);
    assert_eq!(obs.player, PlayerId::new(0));
    assert_eq!(obs.vector.len(), env.model().observation_space());
    assert_eq!(obs.mask.len(), env.model().action_space_size());
    assert!(obs.mask.iter().any(|&m| m));
    // The external seat opens, so nothing was resolved internally yet.
    assert_eq!(env.tick(), 0);
}

#[test]
fn test_reset_auto_resolves_scripted_seats_before_the_external_one() {
    let game = Quarry::builder(2).rounds(2).build();
    let mut env = GymEnv::new(
        game,
        vec![
            Participant::scripted(FirstActionPolicy),
            Participant::external(),
        ],
        1,
    )
    .unwrap();

    let obs = env.reset().unwrap();

    // The scripted opener already took its turn inside reset.
    assert!(!obs.done);
    assert_eq!(obs.player, PlayerId::new(1));
    assert_eq!(env.current_player().unwrap(), PlayerId::new(1));
    assert_eq!(env.tick(), 1);
    assert_eq!(env.state().unwrap().turn_counter(), 1);
}

#[test]
fn test_masked_index_is_rejected_without_substitution() {
    let mut env = quarry_env(1);
    let obs = env.reset().unwrap();
    let masked = obs
        .mask
        .iter()
        .position(|&m| !m)
        .expect("quarry never has a full mask at the opening decision");

    let tick_before = env.tick();
    let err = env.step(masked).unwrap_err();

    assert!(matches!(
        err,
        EnvError::Decode(DecodeError::Masked { index }) if index == masked
    ));
    // The episode did not advance.
    assert_eq!(env.tick(), tick_before);
    assert!(!env.is_done());
}

#[test]
fn test_out_of_range_index_is_rejected() {
    let mut env = quarry_env(1);
    env.reset().unwrap();
    let size = env.model().action_space_size();

    let err = env.step(size + 5).unwrap_err();
    assert!(matches!(
        err,
        EnvError::Decode(DecodeError::OutOfRange { index, .. }) if index == size + 5
    ));
}

#[test]
fn test_step_after_episode_end_is_rejected() {
    let mut env = quarry_env(1);
    let mut obs = env.reset().unwrap();

    while !obs.done {
        obs = env.step(first_legal(&obs.mask)).unwrap().observation;
    }

    assert!(matches!(env.step(0), Err(EnvError::EpisodeOver)));
}

#[test]
fn test_participant_count_is_validated() {
    let game = Quarry::builder(3).build();
    let result = GymEnv::new(game, vec![Participant::external()], 1);
    assert!(matches!(
        result,
        Err(EnvError::ParticipantCount {
            expected: 3,
            actual: 1
        })
    ));
}

// =============================================================================
// Episode flow
// =============================================================================

#[test]
fn test_internal_seats_are_resolved_between_steps() {
    let mut env = quarry_env(1);
    let obs = env.reset().unwrap();

    let result = env.step(first_legal(&obs.mask)).unwrap();

    // The external action plus at least the opponent's turn were applied.
    assert!(env.tick() >= 2);
    if !result.done {
        assert_eq!(result.observation.player, PlayerId::new(0));
        assert_eq!(env.current_player().unwrap(), PlayerId::new(0));
    }
}

#[test]
fn test_episode_terminates_with_decided_results() {
    let mut env = quarry_env(7);
    let mut obs = env.reset().unwrap();
    let mut steps = 0;

    while !obs.done {
        obs = env.step(first_legal(&obs.mask)).unwrap().observation;
        steps += 1;
        assert!(steps < 1000, "episode failed to terminate");
    }

    assert!(env.is_done());
    assert!(obs.mask.iter().all(|&m| !m));
    let results = env.player_results().unwrap();
    assert!(results.iter().all(|(_, o)| o.is_decided()));
    assert_eq!(env.episode_record().unwrap().steps.len(), steps);
}

#[test]
fn test_runs_are_deterministic_from_the_master_seed() {
    let run = |master_seed| {
        let mut env = quarry_env(master_seed);
        let mut obs = env.reset().unwrap();
        let mut trace = vec![obs.vector.clone()];
        while !obs.done {
            obs = env.step(first_legal(&obs.mask)).unwrap().observation;
            trace.push(obs.vector.clone());
        }
        (env.last_seed().unwrap(), env.tick(), trace)
    };

    assert_eq!(run(42), run(42));
    assert_ne!(run(42).0, run(43).0);
}

#[test]
fn test_each_reset_draws_a_fresh_seed() {
    let mut env = quarry_env(5);
    env.reset().unwrap();
    let first = env.last_seed().unwrap();
    env.reset().unwrap();
    let second = env.last_seed().unwrap();

    assert_ne!(first, second);
    assert_eq!(env.tick(), 0);
}

#[test]
fn test_score_reflects_the_acting_seat() {
    let mut env = quarry_env(3);
    let obs = env.reset().unwrap();
    let build_mask = obs.mask.clone();

    let result = env.step(first_legal(&build_mask)).unwrap();
    let state_score = env.score(PlayerId::new(0)).unwrap();
    assert_eq!(result.score, state_score);
}

#[test]
fn test_episode_record_serializes() {
    let mut env = quarry_env(11);
    let mut obs = env.reset().unwrap();
    for _ in 0..3 {
        if obs.done {
            break;
        }
        obs = env.step(first_legal(&obs.mask)).unwrap().observation;
    }

    let record = env.episode_record().unwrap();
    let bytes = bincode::serialize(record).unwrap();
    let restored: EpisodeRecord = bincode::deserialize(&bytes).unwrap();

    assert_eq!(&restored, record);
    assert_eq!(restored.seed, env.last_seed().unwrap());
}

// =============================================================================
// Forced decisions
// =============================================================================

const ONLY: TemplateId = TemplateId::new(0);

/// Every decision point has exactly one legal action; the game ends after
/// four turns. Exists to pin down forced-action handling.
struct ForcedGame {
    config: GameConfig,
}

impl ForcedGame {
    fn new() -> Self {
        Self {
            config: GameConfig::new(2),
        }
    }
}

impl ForwardModel for ForcedGame {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn setup(&mut self, _state: &mut GameState) {}

    fn compute_legal_actions(&self, _state: &GameState) -> Vec<Action> {
        vec![Action::new(ONLY)]
    }

    fn execute(&mut self, _state: &mut GameState, _action: &Action) {}

    fn outcomes(&self, state: &GameState) -> Option<PlayerMap<Outcome>> {
        (state.turn_counter() >= 4).then(|| PlayerMap::with_value(2, Outcome::Draw))
    }

    fn score(&self, _state: &GameState, _player: PlayerId) -> f64 {
        0.0
    }
}

impl OrderedActionSpace for ForcedGame {
    fn action_space_size(&self) -> usize {
        1
    }

    fn action_index(&self, _state: &GameState, _action: &Action) -> usize {
        0
    }
}

impl Vectorizable for ForcedGame {
    fn observation_space(&self) -> usize {
        1
    }

    fn observation_vector(&self, state: &GameState) -> Vec<f32> {
        vec![state.turn_counter() as f32]
    }
}

#[test]
fn test_forced_actions_are_auto_played_for_external_seats() {
    let mut env = GymEnv::new(
        ForcedGame::new(),
        vec![
            Participant::external(),
            Participant::scripted(FirstActionPolicy),
        ],
        1,
    )
    .unwrap();

    // Every decision is forced, so reset plays the whole episode out.
    let obs = env.reset().unwrap();
    assert!(obs.done);
    assert_eq!(env.tick(), 4);
    assert!(env
        .player_results()
        .unwrap()
        .iter()
        .all(|(_, &o)| o == Outcome::Draw));
}

#[test]
fn test_interactive_seats_still_see_forced_decisions() {
    let mut env = GymEnv::new(
        ForcedGame::new(),
        vec![
            Participant::external().interactive(),
            Participant::scripted(FirstActionPolicy),
        ],
        1,
    )
    .unwrap();

    let obs = env.reset().unwrap();
    assert!(!obs.done);
    assert_eq!(obs.player, PlayerId::new(0));
    assert_eq!(obs.mask, vec![true]);
    assert_eq!(env.tick(), 0);

    // Two external decisions, each followed by the scripted opponent.
    let mid = env.step(0).unwrap();
    assert!(!mid.done);
    assert_eq!(env.tick(), 2);

    let last = env.step(0).unwrap();
    assert!(last.done);
    assert_eq!(env.tick(), 4);
}

#[test]
fn test_timers_count_external_decisions() {
    let mut env = quarry_env(1);
    let obs = env.reset().unwrap();
    env.step(first_legal(&obs.mask)).unwrap();

    let state = env.state().unwrap();
    assert_eq!(state.timers[PlayerId::new(0)].action_count(), 1);
    // Control is back at the external seat, so its timer is measuring again.
    assert!(state.timers[PlayerId::new(0)].is_running());
}
