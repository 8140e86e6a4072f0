use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use gloo::timers::callback::Timeout;

use torokko_core::game::{self, DecideOutcome, DropOutcome};
#[cfg(target_arch = "wasm32")]
use torokko_core::game::HINT_IDLE_MS;
use torokko_core::{
    builtin_scenarios, home_position, validate_scenarios, Choice, Decision, EffectTag, GameState,
    Position, Scenario,
};

use crate::runtime::CoreAction;

pub(crate) type AppSubscriber = Rc<dyn Fn()>;

pub(crate) struct AppCore {
    state: RefCell<AppState>,
    snapshots: RefCell<SnapshotBuffer>,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        if let Some(index) = subscribers
            .iter()
            .position(|entry| Rc::ptr_eq(entry, &self.subscriber))
        {
            subscribers.remove(index);
        }
    }
}

/// Per-item display data derived for the view.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ItemView {
    pub emoji: String,
    pub position: Position,
    pub dragging: bool,
    /// Prerequisites met; rendered at full opacity.
    pub available: bool,
    pub completed: bool,
}

#[derive(Clone)]
pub(crate) struct AppSnapshot {
    pub scenarios: Rc<Vec<Scenario>>,
    pub scenario_index: usize,
    pub decision: Option<Decision>,
    pub animating: bool,
    pub completed: Vec<bool>,
    pub completed_steps: Vec<EffectTag>,
    pub items: Vec<ItemView>,
    /// An item is actively following the pointer (not settling).
    pub dragging: bool,
    /// Touch identifier that owns the drag; `None` for the mouse.
    pub drag_pointer: Option<i32>,
    pub show_hint: bool,
    pub hint: String,
    pub vignette: f32,
    pub is_last: bool,
}

impl AppSnapshot {
    pub(crate) fn scenario(&self) -> Option<&Scenario> {
        self.scenarios.get(self.scenario_index)
    }

    pub(crate) fn saved_chain_complete(&self) -> bool {
        self.completed_steps.contains(&EffectTag::Save)
    }
}

struct SnapshotBuffer {
    front: AppSnapshot,
    back: AppSnapshot,
}

impl SnapshotBuffer {
    fn new(state: &AppState) -> Self {
        let snapshot = build_snapshot_from_state(state);
        Self {
            front: snapshot.clone(),
            back: snapshot,
        }
    }

    fn refresh_from_state(&mut self, state: &AppState) {
        fill_snapshot_from_state(state, &mut self.back);
        std::mem::swap(&mut self.front, &mut self.back);
    }
}

struct AppState {
    scenarios: Rc<Vec<Scenario>>,
    game: GameState,
    vignette: f32,
    /// Touch identifier that owns the current drag; `None` for the mouse.
    drag_pointer: Option<i32>,
    #[cfg(target_arch = "wasm32")]
    settle_timer: Option<Timeout>,
    #[cfg(target_arch = "wasm32")]
    trolley_timer: Option<Timeout>,
    #[cfg(target_arch = "wasm32")]
    hint_timer: Option<Timeout>,
}

impl AppState {
    fn new(scenarios: Vec<Scenario>) -> Self {
        let game = GameState::new(scenarios.len());
        Self {
            scenarios: Rc::new(scenarios),
            game,
            vignette: 0.0,
            drag_pointer: None,
            #[cfg(target_arch = "wasm32")]
            settle_timer: None,
            #[cfg(target_arch = "wasm32")]
            trolley_timer: None,
            #[cfg(target_arch = "wasm32")]
            hint_timer: None,
        }
    }
}

thread_local! {
    static APP_CORE: RefCell<Option<Rc<AppCore>>> = RefCell::new(None);
}

impl AppCore {
    pub(crate) fn new() -> Rc<Self> {
        Self::with_scenarios(builtin_scenarios())
    }

    pub(crate) fn with_scenarios(scenarios: Vec<Scenario>) -> Rc<Self> {
        // A broken set never satisfies its own prerequisites; surface that
        // at startup instead of leaving a step silently unreachable.
        if let Err(error) = validate_scenarios(&scenarios) {
            #[cfg(target_arch = "wasm32")]
            gloo::console::warn!(format!("invalid scenario set: {error}"));
            #[cfg(not(target_arch = "wasm32"))]
            let _ = error;
        }
        let state = AppState::new(scenarios);
        let snapshots = SnapshotBuffer::new(&state);
        Rc::new(Self {
            state: RefCell::new(state),
            snapshots: RefCell::new(snapshots),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// Process-wide controller instance. Timer callbacks resolve it again
    /// instead of capturing the core, so no reference cycles form.
    pub(crate) fn shared() -> Rc<Self> {
        APP_CORE.with(|slot| {
            let mut slot = slot.borrow_mut();
            if let Some(core) = slot.as_ref() {
                return Rc::clone(core);
            }
            let core = Self::new();
            *slot = Some(Rc::clone(&core));
            core
        })
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        {
            let state = self.state.borrow();
            let mut snapshots = self.snapshots.borrow_mut();
            snapshots.refresh_from_state(&state);
        }
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    pub(crate) fn snapshot(&self) -> AppSnapshot {
        self.snapshots.borrow().front.clone()
    }

    pub(crate) fn apply_action(&self, action: CoreAction) {
        match action {
            CoreAction::BeginDrag {
                item_index,
                x,
                y,
                pointer_id,
            } => self.begin_drag(item_index, x, y, pointer_id),
            CoreAction::DragMove { x, y } => self.drag_move(x, y),
            CoreAction::DragEnd { pointer_id } => self.drag_end(pointer_id),
            CoreAction::Decide { choice } => self.decide(choice),
            CoreAction::NextScenario => self.next_scenario(),
            CoreAction::ResetScenario => self.reset_scenario(),
            CoreAction::RevealHint => self.reveal_hint(),
        }
    }

    pub(crate) fn begin_drag(&self, item_index: usize, x: f32, y: f32, pointer_id: Option<i32>) {
        let mut state = self.state.borrow_mut();
        let scenarios = Rc::clone(&state.scenarios);
        if !game::begin_drag(&mut state.game, &scenarios, item_index, Position::new(x, y)) {
            return;
        }
        state.drag_pointer = pointer_id;
        state.vignette = game::vignette_for_drag(&state.game, &scenarios);
        drop(state);
        self.notify();
    }

    pub(crate) fn drag_move(&self, x: f32, y: f32) {
        let mut state = self.state.borrow_mut();
        if !state.game.is_dragging() {
            return;
        }
        let scenarios = Rc::clone(&state.scenarios);
        game::move_drag(&mut state.game, Position::new(x, y));
        state.vignette = game::vignette_for_drag(&state.game, &scenarios);
        drop(state);
        self.notify();
    }

    pub(crate) fn drag_end(&self, pointer_id: Option<i32>) {
        let mut state = self.state.borrow_mut();
        if state.game.drag.is_none() || state.drag_pointer != pointer_id {
            return;
        }
        let scenarios = Rc::clone(&state.scenarios);
        let outcome = game::end_drag(&mut state.game, &scenarios);
        state.vignette = 0.0;
        state.drag_pointer = None;
        match outcome {
            DropOutcome::Completed(_) => {}
            DropOutcome::Rejected { feedback_ms } => {
                if feedback_ms == 0 {
                    game::settle_rejected_drag(&mut state.game);
                } else {
                    #[cfg(target_arch = "wasm32")]
                    {
                        let epoch = state.game.timer_epoch;
                        state.settle_timer = Some(Timeout::new(feedback_ms, move || {
                            AppCore::shared().settle_fired(epoch);
                        }));
                    }
                    #[cfg(not(target_arch = "wasm32"))]
                    let _ = feedback_ms;
                }
            }
            DropOutcome::Ignored => {}
        }
        drop(state);
        self.notify();
    }

    fn settle_fired(&self, epoch: u64) {
        let mut state = self.state.borrow_mut();
        #[cfg(target_arch = "wasm32")]
        {
            state.settle_timer = None;
        }
        if state.game.timer_epoch != epoch {
            #[cfg(target_arch = "wasm32")]
            gloo::console::warn!("dropping stale settle timer");
            return;
        }
        game::settle_rejected_drag(&mut state.game);
        drop(state);
        self.notify();
    }

    pub(crate) fn decide(&self, choice: Choice) {
        let mut state = self.state.borrow_mut();
        let scenarios = Rc::clone(&state.scenarios);
        let outcome = game::decide(&mut state.game, &scenarios, choice);
        match outcome {
            DecideOutcome::Ignored => return,
            DecideOutcome::Saved => {}
            DecideOutcome::Animating { duration_ms } => {
                #[cfg(target_arch = "wasm32")]
                {
                    let epoch = state.game.timer_epoch;
                    state.trolley_timer = Some(Timeout::new(duration_ms, move || {
                        AppCore::shared().trolley_fired(epoch);
                    }));
                }
                #[cfg(not(target_arch = "wasm32"))]
                let _ = duration_ms;
            }
        }
        restart_hint_timer(&mut state);
        drop(state);
        self.notify();
    }

    fn trolley_fired(&self, epoch: u64) {
        let mut state = self.state.borrow_mut();
        #[cfg(target_arch = "wasm32")]
        {
            state.trolley_timer = None;
        }
        if state.game.timer_epoch != epoch {
            #[cfg(target_arch = "wasm32")]
            gloo::console::warn!("dropping stale trolley timer");
            return;
        }
        game::finish_decision(&mut state.game);
        restart_hint_timer(&mut state);
        drop(state);
        self.notify();
    }

    pub(crate) fn next_scenario(&self) {
        let mut state = self.state.borrow_mut();
        let scenarios = Rc::clone(&state.scenarios);
        self.clear_transient(&mut state);
        game::advance(&mut state.game, &scenarios);
        restart_hint_timer(&mut state);
        drop(state);
        self.notify();
    }

    pub(crate) fn reset_scenario(&self) {
        let mut state = self.state.borrow_mut();
        self.clear_transient(&mut state);
        game::reset_scenario(&mut state.game);
        restart_hint_timer(&mut state);
        drop(state);
        self.notify();
    }

    fn clear_transient(&self, state: &mut AppState) {
        state.vignette = 0.0;
        state.drag_pointer = None;
        #[cfg(target_arch = "wasm32")]
        {
            state.settle_timer = None;
            state.trolley_timer = None;
        }
    }

    pub(crate) fn reveal_hint(&self) {
        let mut state = self.state.borrow_mut();
        let changed = game::reveal_hint_if_idle(&mut state.game);
        drop(state);
        if changed {
            self.notify();
        }
    }

    /// Arms the idle hint timer. Also called once at startup.
    pub(crate) fn arm_hint_timer(&self) {
        let mut state = self.state.borrow_mut();
        restart_hint_timer(&mut state);
    }
}

/// Replacing the handle cancels any previous pending reveal, so the idle
/// clock restarts from zero on every state change that owns it.
#[cfg(target_arch = "wasm32")]
fn restart_hint_timer(state: &mut AppState) {
    state.hint_timer = Some(Timeout::new(HINT_IDLE_MS, || {
        AppCore::shared().reveal_hint();
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn restart_hint_timer(_state: &mut AppState) {}

fn build_snapshot_from_state(state: &AppState) -> AppSnapshot {
    let mut snapshot = AppSnapshot {
        scenarios: Rc::clone(&state.scenarios),
        scenario_index: 0,
        decision: None,
        animating: false,
        completed: Vec::new(),
        completed_steps: Vec::new(),
        items: Vec::new(),
        dragging: false,
        drag_pointer: None,
        show_hint: false,
        hint: String::new(),
        vignette: 0.0,
        is_last: false,
    };
    fill_snapshot_from_state(state, &mut snapshot);
    snapshot
}

fn fill_snapshot_from_state(state: &AppState, snapshot: &mut AppSnapshot) {
    snapshot.scenarios = Rc::clone(&state.scenarios);
    snapshot.scenario_index = state.game.scenario_index;
    snapshot.decision = state.game.decision;
    snapshot.animating = state.game.animating;
    snapshot.completed.clone_from(&state.game.completed);
    snapshot
        .completed_steps
        .clone_from(&state.game.completed_steps);
    snapshot.dragging = matches!(state.game.drag, Some(drag) if !drag.settling);
    snapshot.drag_pointer = state.drag_pointer;
    snapshot.show_hint = state.game.show_hint;
    snapshot.hint = game::hint_text(&state.game, &state.scenarios)
        .unwrap_or_default()
        .to_string();
    snapshot.vignette = state.vignette;
    snapshot.is_last = game::is_last_scenario(&state.game, &state.scenarios);

    snapshot.items.clear();
    let Some(scenario) = state.scenarios.get(state.game.scenario_index) else {
        return;
    };
    for (index, step) in scenario.steps.iter().enumerate() {
        let position = match state.game.drag {
            Some(drag) if drag.item_index == index => drag.position,
            _ => home_position(index),
        };
        let dragging = matches!(
            state.game.drag,
            Some(drag) if drag.item_index == index && !drag.settling
        );
        snapshot.items.push(ItemView {
            emoji: step.item.clone(),
            position,
            dragging,
            available: game::requirements_met(&state.game, step),
            completed: game::step_completed(&state.game, step),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_actions_flow_into_the_snapshot() {
        let core = AppCore::new();
        core.apply_action(CoreAction::BeginDrag {
            item_index: 0,
            x: 20.0,
            y: 20.0,
            pointer_id: None,
        });
        core.apply_action(CoreAction::DragMove { x: 150.0, y: 50.0 });

        let snapshot = core.snapshot();
        assert!(snapshot.items[0].dragging);
        assert_eq!(snapshot.items[0].position, Position::new(150.0, 50.0));
        assert_eq!(snapshot.vignette, 1.0);

        core.apply_action(CoreAction::DragEnd { pointer_id: None });
        let snapshot = core.snapshot();
        assert!(snapshot.items[0].completed);
        assert_eq!(snapshot.completed_steps, vec![EffectTag::Rain]);
        assert_eq!(snapshot.vignette, 0.0);
    }

    #[test]
    fn drag_end_from_another_pointer_is_ignored() {
        let core = AppCore::new();
        core.apply_action(CoreAction::BeginDrag {
            item_index: 0,
            x: 20.0,
            y: 20.0,
            pointer_id: Some(7),
        });
        core.apply_action(CoreAction::DragEnd {
            pointer_id: Some(9),
        });
        assert!(core.snapshot().items[0].dragging);

        core.apply_action(CoreAction::DragEnd {
            pointer_id: Some(7),
        });
        assert!(!core.snapshot().items[0].dragging);
    }

    #[test]
    fn decide_updates_snapshot_synchronously() {
        let core = AppCore::new();
        core.apply_action(CoreAction::Decide {
            choice: Choice::Blue,
        });
        let snapshot = core.snapshot();
        assert_eq!(snapshot.decision, Some(Decision::Blue));
        assert!(snapshot.animating);
    }

    #[test]
    fn stale_settle_delivery_is_dropped() {
        let core = AppCore::new();
        // A save drop without prerequisites leaves a settling drag behind.
        core.apply_action(CoreAction::BeginDrag {
            item_index: 2,
            x: 100.0,
            y: 150.0,
            pointer_id: None,
        });
        core.apply_action(CoreAction::DragEnd { pointer_id: None });
        let scheduled_epoch = core.state.borrow().game.timer_epoch;

        core.apply_action(CoreAction::ResetScenario);
        core.settle_fired(scheduled_epoch);
        assert!(core.snapshot().completed_steps.is_empty());
    }

    #[test]
    fn subscription_drops_cleanly() {
        let core = AppCore::new();
        let count = Rc::new(std::cell::Cell::new(0));
        let seen = Rc::clone(&count);
        let subscription = core.subscribe(Rc::new(move || {
            seen.set(seen.get() + 1);
        }));
        core.apply_action(CoreAction::RevealHint);
        assert_eq!(count.get(), 1);
        drop(subscription);
        core.apply_action(CoreAction::ResetScenario);
        assert_eq!(count.get(), 1);
    }
}
