use torokko_core::game::{
    advance, begin_drag, decide, end_drag, finish_decision, move_drag, reset_scenario,
    reveal_hint_if_idle, settle_rejected_drag, DecideOutcome, DropOutcome, REJECT_FEEDBACK_MS,
    TROLLEY_ANIMATION_MS,
};
use torokko_core::{builtin_scenarios, Choice, Decision, EffectTag, GameState, Position, Scenario};

fn new_game(scenarios: &[Scenario]) -> GameState {
    GameState::new(scenarios.len())
}

fn drop_at(state: &mut GameState, scenarios: &[Scenario], item: usize, x: f32, y: f32) -> DropOutcome {
    assert!(begin_drag(state, scenarios, item, Position::new(0.0, 0.0)));
    move_drag(state, Position::new(x, y));
    end_drag(state, scenarios)
}

#[test]
fn storm_scenario_chain_completes_in_order() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    let outcome = drop_at(&mut state, &scenarios, 0, 150.0, 50.0);
    assert_eq!(outcome, DropOutcome::Completed(EffectTag::Rain));

    let outcome = drop_at(&mut state, &scenarios, 1, 100.0, 150.0);
    assert_eq!(outcome, DropOutcome::Completed(EffectTag::Lilypad));

    let outcome = drop_at(&mut state, &scenarios, 2, 100.0, 150.0);
    assert_eq!(outcome, DropOutcome::Completed(EffectTag::Save));

    assert_eq!(
        state.completed_steps,
        vec![EffectTag::Rain, EffectTag::Lilypad, EffectTag::Save]
    );
}

#[test]
fn save_is_rejected_before_prerequisites() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    // The fly lands exactly on its target but nothing has been set up yet.
    let outcome = drop_at(&mut state, &scenarios, 2, 100.0, 150.0);
    assert_eq!(
        outcome,
        DropOutcome::Rejected {
            feedback_ms: REJECT_FEEDBACK_MS
        }
    );
    assert!(state.completed_steps.is_empty());
    assert!(state.drag.expect("drag settling").settling);

    settle_rejected_drag(&mut state);
    assert!(state.drag.is_none());
}

#[test]
fn missed_drop_with_met_prerequisites_settles_immediately() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    let outcome = drop_at(&mut state, &scenarios, 0, 300.0, 300.0);
    assert_eq!(outcome, DropOutcome::Rejected { feedback_ms: 0 });
}

#[test]
fn drop_on_target_boundary_counts() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    // Radius 40 around (150, 50); release exactly 40 away.
    let outcome = drop_at(&mut state, &scenarios, 0, 190.0, 50.0);
    assert_eq!(outcome, DropOutcome::Completed(EffectTag::Rain));
}

#[test]
fn decide_sets_decision_and_animates_synchronously() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    let outcome = decide(&mut state, &scenarios, Choice::Blue);
    assert_eq!(
        outcome,
        DecideOutcome::Animating {
            duration_ms: TROLLEY_ANIMATION_MS
        }
    );
    assert_eq!(state.decision, Some(Decision::Blue));
    assert!(state.animating);
    assert!(!state.completed[0]);

    finish_decision(&mut state);
    assert!(!state.animating);
    assert!(state.completed[0]);
}

#[test]
fn decide_after_full_chain_saves_everyone() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    drop_at(&mut state, &scenarios, 0, 150.0, 50.0);
    drop_at(&mut state, &scenarios, 1, 100.0, 150.0);
    drop_at(&mut state, &scenarios, 2, 100.0, 150.0);

    let outcome = decide(&mut state, &scenarios, Choice::Green);
    assert_eq!(outcome, DecideOutcome::Saved);
    assert_eq!(state.decision, Some(Decision::Saved));
    assert!(!state.animating);
}

#[test]
fn second_decide_is_ignored() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    decide(&mut state, &scenarios, Choice::Green);
    let outcome = decide(&mut state, &scenarios, Choice::Blue);
    assert_eq!(outcome, DecideOutcome::Ignored);
    assert_eq!(state.decision, Some(Decision::Green));
}

#[test]
fn advance_wraps_to_first_scenario() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    advance(&mut state, &scenarios);
    assert_eq!(state.scenario_index, 1);
    advance(&mut state, &scenarios);
    assert_eq!(state.scenario_index, 2);
    advance(&mut state, &scenarios);
    assert_eq!(state.scenario_index, 0);
}

#[test]
fn advance_clears_scenario_progress_and_bumps_epoch() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    drop_at(&mut state, &scenarios, 0, 150.0, 50.0);
    decide(&mut state, &scenarios, Choice::Green);
    let epoch = state.timer_epoch;

    advance(&mut state, &scenarios);
    assert_eq!(state.scenario_index, 1);
    assert_eq!(state.decision, None);
    assert!(!state.animating);
    assert!(state.completed_steps.is_empty());
    assert!(!state.show_hint);
    assert_ne!(state.timer_epoch, epoch);
}

#[test]
fn reset_keeps_index_but_clears_progress() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    advance(&mut state, &scenarios);
    drop_at(&mut state, &scenarios, 0, 200.0, 100.0);
    reset_scenario(&mut state);
    assert_eq!(state.scenario_index, 1);
    assert!(state.completed_steps.is_empty());
    assert_eq!(state.decision, None);
}

#[test]
fn stale_timer_epoch_detected_after_reset() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    // A rejected fly drop leaves a settle timer pending at this epoch.
    drop_at(&mut state, &scenarios, 2, 100.0, 150.0);
    let scheduled_epoch = state.timer_epoch;

    reset_scenario(&mut state);
    assert_ne!(state.timer_epoch, scheduled_epoch);
    // The delivery is stale; the drag was already cleared by the reset.
    assert!(state.drag.is_none());
}

#[test]
fn hint_reveal_only_while_dilemma_open() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    assert!(reveal_hint_if_idle(&mut state));
    assert!(state.show_hint);

    reset_scenario(&mut state);
    decide(&mut state, &scenarios, Choice::Green);
    assert!(!reveal_hint_if_idle(&mut state));
    assert!(!state.show_hint);
}

#[test]
fn completing_a_step_twice_is_not_possible() {
    let scenarios = builtin_scenarios();
    let mut state = new_game(&scenarios);

    drop_at(&mut state, &scenarios, 0, 150.0, 50.0);
    // The cloud is gone once completed; a new drag on it is refused.
    assert!(!begin_drag(
        &mut state,
        &scenarios,
        0,
        Position::new(0.0, 0.0)
    ));
    assert_eq!(state.completed_steps, vec![EffectTag::Rain]);
}
