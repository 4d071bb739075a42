//! Game configuration types.
//!
//! Games configure the engine at startup by providing:
//! - `TemplateConfig`: Declares the action types the game uses
//! - `GameConfig`: Player count, templates, phases, turn-order defaults
//!
//! The engine never interprets template or phase IDs - games assign meaning.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Action template identifier. Games define what action types exist.
///
/// The engine doesn't interpret template IDs - they're opaque identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u16);

impl TemplateId {
    /// Create a new template ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Template({})", self.0)
    }
}

/// Configuration for an action template.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Unique identifier for this template.
    pub id: TemplateId,

    /// Human-readable name (for debugging and action-tree labels).
    pub name: String,
}

impl TemplateConfig {
    /// Create a new template configuration.
    pub fn new(id: TemplateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Opaque phase identifier. Games define their own phases.
///
/// The engine doesn't interpret phase IDs - they're just compared
/// for equality. Games define phase transitions in their rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseId(pub u32);

impl PhaseId {
    /// Create a new phase ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Complete game configuration.
///
/// Games provide this at startup to configure the engine.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Action template configurations.
    pub templates: Vec<TemplateConfig>,

    /// Initial game phase.
    pub initial_phase: PhaseId,

    /// Player who opens each round.
    pub first_player: PlayerId,

    /// Template applied when the active player has no legal action.
    ///
    /// When absent, an empty legal-action set for the active player is an
    /// unrecoverable rules gap.
    pub no_op_template: Option<TemplateId>,

    /// Safety net: finish the episode with an all-draw result once this
    /// many rounds have completed. `None` leaves termination entirely to
    /// the game rules.
    pub round_limit: Option<u32>,
}

impl GameConfig {
    /// Create a new game configuration.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            templates: Vec::new(),
            initial_phase: PhaseId::default(),
            first_player: PlayerId::new(0),
            no_op_template: None,
            round_limit: None,
        }
    }

    /// Add a template configuration.
    #[must_use]
    pub fn with_template(mut self, template: TemplateConfig) -> Self {
        self.templates.push(template);
        self
    }

    /// Set the initial phase.
    #[must_use]
    pub fn with_initial_phase(mut self, phase: PhaseId) -> Self {
        self.initial_phase = phase;
        self
    }

    /// Set the first player.
    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    /// Declare the no-op template applied when no legal action exists.
    #[must_use]
    pub fn with_no_op_template(mut self, template: TemplateId) -> Self {
        self.no_op_template = Some(template);
        self
    }

    /// Set the round safety limit.
    #[must_use]
    pub fn with_round_limit(mut self, rounds: u32) -> Self {
        self.round_limit = Some(rounds);
        self
    }

    /// Get a template config by ID.
    #[must_use]
    pub fn get_template(&self, id: TemplateId) -> Option<&TemplateConfig> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Get a template's name, falling back to the raw ID display.
    #[must_use]
    pub fn template_name(&self, id: TemplateId) -> String {
        self.get_template(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id() {
        let id = TemplateId::new(3);
        assert_eq!(id.raw(), 3);
        assert_eq!(format!("{}", id), "Template(3)");
    }

    #[test]
    fn test_template_config() {
        let pass = TemplateConfig::new(TemplateId::new(0), "Pass");
        assert_eq!(pass.id, TemplateId::new(0));
        assert_eq!(pass.name, "Pass");
    }

    #[test]
    fn test_game_config() {
        let config = GameConfig::new(2)
            .with_template(TemplateConfig::new(TemplateId::new(0), "Pass"))
            .with_template(TemplateConfig::new(TemplateId::new(1), "Gather"))
            .with_initial_phase(PhaseId::new(1))
            .with_no_op_template(TemplateId::new(0))
            .with_round_limit(50);

        assert_eq!(config.player_count, 2);
        assert_eq!(config.templates.len(), 2);
        assert_eq!(config.initial_phase, PhaseId::new(1));
        assert_eq!(config.no_op_template, Some(TemplateId::new(0)));
        assert_eq!(config.round_limit, Some(50));

        assert!(config.get_template(TemplateId::new(0)).is_some());
        assert!(config.get_template(TemplateId::new(99)).is_none());
        assert_eq!(config.template_name(TemplateId::new(1)), "Gather");
        assert_eq!(config.template_name(TemplateId::new(9)), "Template(9)");
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_game_config_zero_players() {
        GameConfig::new(0);
    }

    #[test]
    fn test_phase_id() {
        let phase = PhaseId::new(5);
        assert_eq!(phase.0, 5);
        assert_eq!(PhaseId::default().0, 0);
    }
}
