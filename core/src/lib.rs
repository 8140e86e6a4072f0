pub mod catalog;
pub mod effect;
pub mod game;
pub mod geom;
pub mod scenario;
pub mod state;

pub use catalog::builtin_scenarios;
pub use effect::{AnimationConfig, EffectTag, VisualEffect, VisualKind};
pub use game::{DecideOutcome, DropOutcome};
pub use geom::{
    clamp_to_surface, distance, home_position, proximity, within_target, Position, ITEM_SIZE,
};
pub use scenario::{
    scenarios_from_json, validate_scenarios, PuzzleStep, Scenario, ScenarioError, ScenarioOption,
    TargetArea,
};
pub use state::{Choice, Decision, DragState, GameState};
