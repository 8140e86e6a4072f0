use crate::effect::EffectTag;
use crate::geom::{proximity, within_target, Position};
use crate::scenario::{PuzzleStep, Scenario};
use crate::state::{Choice, Decision, DragState, GameState};

/// Delay before a drop rejected for unmet prerequisites snaps home.
pub const REJECT_FEEDBACK_MS: u32 = 500;
/// Trolley run duration after a green/blue decision.
pub const TROLLEY_ANIMATION_MS: u32 = 3000;
/// Idle time before the hint bubble is revealed.
pub const HINT_IDLE_MS: u32 = 15_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Completed(EffectTag),
    /// The release missed or prerequisites were unmet. The drag stays in a
    /// settling phase for `feedback_ms` before the item snaps home.
    Rejected { feedback_ms: u32 },
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecideOutcome {
    Saved,
    Animating { duration_ms: u32 },
    Ignored,
}

pub fn current_scenario<'a>(state: &GameState, scenarios: &'a [Scenario]) -> Option<&'a Scenario> {
    scenarios.get(state.scenario_index)
}

pub fn is_last_scenario(state: &GameState, scenarios: &[Scenario]) -> bool {
    !scenarios.is_empty() && state.scenario_index == scenarios.len() - 1
}

pub fn step_completed(state: &GameState, step: &PuzzleStep) -> bool {
    state.completed_steps.contains(&step.effect)
}

pub fn requirements_met(state: &GameState, step: &PuzzleStep) -> bool {
    step.required
        .iter()
        .all(|tag| state.completed_steps.contains(tag))
}

/// Starts a drag for a not-yet-completed step. Items with unmet
/// prerequisites can still be picked up; the drop is what gets rejected.
pub fn begin_drag(
    state: &mut GameState,
    scenarios: &[Scenario],
    item_index: usize,
    position: Position,
) -> bool {
    if state.drag.is_some() {
        return false;
    }
    let Some(scenario) = current_scenario(state, scenarios) else {
        return false;
    };
    let Some(step) = scenario.steps.get(item_index) else {
        return false;
    };
    if step_completed(state, step) {
        return false;
    }
    state.drag = Some(DragState {
        item_index,
        position,
        settling: false,
    });
    true
}

pub fn move_drag(state: &mut GameState, position: Position) {
    if let Some(drag) = state.drag.as_mut() {
        if !drag.settling {
            drag.position = position;
        }
    }
}

/// Resolves a release. Success requires both an inclusive hit on the
/// target circle and all prerequisite effects already completed.
pub fn end_drag(state: &mut GameState, scenarios: &[Scenario]) -> DropOutcome {
    let Some(drag) = state.drag else {
        return DropOutcome::Ignored;
    };
    if drag.settling {
        return DropOutcome::Ignored;
    }
    let step = current_scenario(state, scenarios)
        .and_then(|scenario| scenario.steps.get(drag.item_index))
        .cloned();
    let Some(step) = step else {
        state.drag = None;
        return DropOutcome::Ignored;
    };
    let hit = within_target(drag.position, &step.target);
    let reqs_met = requirements_met(state, &step);
    if hit && reqs_met {
        if !state.completed_steps.contains(&step.effect) {
            state.completed_steps.push(step.effect);
        }
        state.drag = None;
        return DropOutcome::Completed(step.effect);
    }
    if let Some(drag) = state.drag.as_mut() {
        drag.settling = true;
    }
    let feedback_ms = if reqs_met { 0 } else { REJECT_FEEDBACK_MS };
    DropOutcome::Rejected { feedback_ms }
}

/// Settle-timer completion: the rejected item snaps back to its home slot.
pub fn settle_rejected_drag(state: &mut GameState) {
    if matches!(state.drag, Some(drag) if drag.settling) {
        state.drag = None;
    }
}

/// Pressing a button. When the scenario's save chain has been completed the
/// choice is overridden and everyone lives; otherwise the decision takes
/// effect immediately and the trolley starts rolling.
pub fn decide(state: &mut GameState, scenarios: &[Scenario], choice: Choice) -> DecideOutcome {
    if state.decision.is_some() || state.animating {
        return DecideOutcome::Ignored;
    }
    let Some(scenario) = current_scenario(state, scenarios) else {
        return DecideOutcome::Ignored;
    };
    let saved = scenario
        .steps
        .last()
        .map(|step| state.completed_steps.contains(&step.effect))
        .unwrap_or(false);
    if saved {
        state.decision = Some(Decision::Saved);
        return DecideOutcome::Saved;
    }
    state.decision = Some(choice.into());
    state.animating = true;
    DecideOutcome::Animating {
        duration_ms: TROLLEY_ANIMATION_MS,
    }
}

/// Trolley-timer completion: the run is over and the scenario is marked
/// completed.
pub fn finish_decision(state: &mut GameState) {
    state.animating = false;
    let index = state.scenario_index;
    if let Some(flag) = state.completed.get_mut(index) {
        *flag = true;
    }
}

/// Moves to the next scenario, wrapping to the first after the last.
pub fn advance(state: &mut GameState, scenarios: &[Scenario]) {
    if scenarios.is_empty() {
        return;
    }
    state.scenario_index = (state.scenario_index + 1) % scenarios.len();
    clear_scenario_progress(state);
}

pub fn reset_scenario(state: &mut GameState) {
    clear_scenario_progress(state);
}

fn clear_scenario_progress(state: &mut GameState) {
    state.decision = None;
    state.animating = false;
    state.drag = None;
    state.show_hint = false;
    state.completed_steps.clear();
    state.timer_epoch = state.timer_epoch.wrapping_add(1);
}

/// Idle-timer completion: hints only appear while the dilemma is still open.
pub fn reveal_hint_if_idle(state: &mut GameState) -> bool {
    if state.decision.is_none() && !state.animating {
        state.show_hint = true;
        true
    } else {
        false
    }
}

/// The hint worth showing right now: the first step that is still open and
/// whose prerequisites are met, falling back to the first step.
pub fn hint_text<'a>(state: &GameState, scenarios: &'a [Scenario]) -> Option<&'a str> {
    let scenario = current_scenario(state, scenarios)?;
    let first = scenario.steps.first()?;
    if state.completed_steps.is_empty() {
        return Some(&first.hint);
    }
    let next = scenario
        .steps
        .iter()
        .find(|step| !step_completed(state, step) && requirements_met(state, step));
    Some(next.map(|step| step.hint.as_str()).unwrap_or(&first.hint))
}

/// Glow intensity while dragging: proximity to the active item's target,
/// but only once that item's prerequisites are met.
pub fn vignette_for_drag(state: &GameState, scenarios: &[Scenario]) -> f32 {
    let Some(drag) = state.drag else {
        return 0.0;
    };
    if drag.settling {
        return 0.0;
    }
    let Some(step) = current_scenario(state, scenarios)
        .and_then(|scenario| scenario.steps.get(drag.item_index))
    else {
        return 0.0;
    };
    if !requirements_met(state, step) {
        return 0.0;
    }
    proximity(drag.position, &step.target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_scenarios;

    #[test]
    fn move_drag_ignored_while_settling() {
        let scenarios = builtin_scenarios();
        let mut state = GameState::new(scenarios.len());
        assert!(begin_drag(
            &mut state,
            &scenarios,
            1,
            Position::new(100.0, 150.0)
        ));
        let outcome = end_drag(&mut state, &scenarios);
        assert_eq!(
            outcome,
            DropOutcome::Rejected {
                feedback_ms: REJECT_FEEDBACK_MS
            }
        );
        move_drag(&mut state, Position::new(0.0, 0.0));
        assert_eq!(
            state.drag.map(|drag| drag.position),
            Some(Position::new(100.0, 150.0))
        );
        settle_rejected_drag(&mut state);
        assert!(state.drag.is_none());
    }

    #[test]
    fn begin_drag_rejected_for_completed_step() {
        let scenarios = builtin_scenarios();
        let mut state = GameState::new(scenarios.len());
        state.completed_steps.push(EffectTag::Rain);
        assert!(!begin_drag(
            &mut state,
            &scenarios,
            0,
            Position::new(10.0, 10.0)
        ));
    }

    #[test]
    fn hint_follows_progress() {
        let scenarios = builtin_scenarios();
        let mut state = GameState::new(scenarios.len());
        assert_eq!(
            hint_text(&state, &scenarios),
            Some("The clouds look heavy with rain...")
        );
        state.completed_steps.push(EffectTag::Rain);
        assert_eq!(
            hint_text(&state, &scenarios),
            Some("A lily pad might float on the new puddle...")
        );
    }

    #[test]
    fn vignette_requires_met_prerequisites() {
        let scenarios = builtin_scenarios();
        let mut state = GameState::new(scenarios.len());
        // The lily pad needs rain first, so no glow near its target.
        assert!(begin_drag(
            &mut state,
            &scenarios,
            1,
            Position::new(100.0, 150.0)
        ));
        assert_eq!(vignette_for_drag(&state, &scenarios), 0.0);
        state.completed_steps.push(EffectTag::Rain);
        assert_eq!(vignette_for_drag(&state, &scenarios), 1.0);
    }
}
