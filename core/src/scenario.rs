use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::effect::{EffectTag, VisualEffect};
use crate::geom::Position;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetArea {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl TargetArea {
    pub fn center(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleStep {
    /// Emoji shown on the draggable item.
    pub item: String,
    pub hint: String,
    pub target: TargetArea,
    #[serde(default)]
    pub required: Vec<EffectTag>,
    pub effect: EffectTag,
    pub visual: VisualEffect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOption {
    pub text: String,
    pub victims: String,
    pub count: u32,
    pub emoji: String,
    pub dead_emoji: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: u32,
    pub description: String,
    pub green: ScenarioOption,
    pub blue: ScenarioOption,
    pub steps: Vec<PuzzleStep>,
    pub final_hint: String,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario set is empty")]
    EmptySet,
    #[error("scenario {id} has no puzzle steps")]
    NoSteps { id: u32 },
    #[error("scenario {id} step {step} has a non-positive target radius")]
    BadRadius { id: u32, step: usize },
    #[error("scenario {id} does not end with a save step")]
    MissingSave { id: u32 },
    #[error("scenario {id} step {step} produces a save before the final step")]
    EarlySave { id: u32, step: usize },
    #[error("scenario {id} step {step} repeats effect {tag:?}")]
    DuplicateEffect { id: u32, step: usize, tag: EffectTag },
    #[error("scenario {id} step {step} requires {tag:?} which no earlier step produces")]
    UnsatisfiableRequirement { id: u32, step: usize, tag: EffectTag },
    #[error("scenario set could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Checks the structural rules every playable scenario set must satisfy.
pub fn validate_scenarios(scenarios: &[Scenario]) -> Result<(), ScenarioError> {
    if scenarios.is_empty() {
        return Err(ScenarioError::EmptySet);
    }
    for scenario in scenarios {
        let id = scenario.id;
        let last = match scenario.steps.len().checked_sub(1) {
            Some(last) => last,
            None => return Err(ScenarioError::NoSteps { id }),
        };
        if scenario.steps[last].effect != EffectTag::Save {
            return Err(ScenarioError::MissingSave { id });
        }
        let mut produced: Vec<EffectTag> = Vec::with_capacity(scenario.steps.len());
        for (index, step) in scenario.steps.iter().enumerate() {
            if step.target.radius <= 0.0 {
                return Err(ScenarioError::BadRadius { id, step: index });
            }
            if step.effect == EffectTag::Save && index != last {
                return Err(ScenarioError::EarlySave { id, step: index });
            }
            if produced.contains(&step.effect) {
                return Err(ScenarioError::DuplicateEffect {
                    id,
                    step: index,
                    tag: step.effect,
                });
            }
            for tag in &step.required {
                if !produced.contains(tag) {
                    return Err(ScenarioError::UnsatisfiableRequirement {
                        id,
                        step: index,
                        tag: *tag,
                    });
                }
            }
            produced.push(step.effect);
        }
    }
    Ok(())
}

/// Loads a replacement scenario set from JSON and validates it.
pub fn scenarios_from_json(raw: &str) -> Result<Vec<Scenario>, ScenarioError> {
    let scenarios: Vec<Scenario> = serde_json::from_str(raw)?;
    validate_scenarios(&scenarios)?;
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_scenarios;

    #[test]
    fn builtin_set_is_valid() {
        assert!(validate_scenarios(&builtin_scenarios()).is_ok());
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(
            validate_scenarios(&[]),
            Err(ScenarioError::EmptySet)
        ));
    }

    #[test]
    fn save_must_be_last() {
        let mut scenarios = builtin_scenarios();
        scenarios[0].steps.swap(0, 2);
        assert!(matches!(
            validate_scenarios(&scenarios),
            Err(ScenarioError::EarlySave { .. })
        ));
    }

    #[test]
    fn forward_requirement_is_rejected() {
        let mut scenarios = builtin_scenarios();
        scenarios[0].steps[0].required.push(EffectTag::Lilypad);
        assert!(matches!(
            validate_scenarios(&scenarios),
            Err(ScenarioError::UnsatisfiableRequirement {
                tag: EffectTag::Lilypad,
                ..
            })
        ));
    }

    #[test]
    fn json_round_trip_stays_valid() {
        let raw = serde_json::to_string(&builtin_scenarios()).expect("serialize");
        let loaded = scenarios_from_json(&raw).expect("load");
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].steps[0].effect, EffectTag::Rain);
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        assert!(matches!(
            scenarios_from_json("[{\"id\": 1}]"),
            Err(ScenarioError::Parse(_))
        ));
    }
}
