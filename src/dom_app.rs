use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, MouseEvent, TouchEvent};

use crate::app_core::{AppCore, AppSnapshot, AppSubscription};
use crate::boot;
use crate::input::{
    detect_input_mode, mouse_sample, surface_point, touch_sample, InputMode, PointerSample,
};
use crate::runtime::CoreAction;
use torokko_core::{Choice, Decision, Position, Scenario, VisualKind, ITEM_SIZE};

const TITLE_TEXT: &str = "The Trolley Problem: Puzzle Edition";
const PROMPT_TEXT: &str = "What do you choose? Or can you find another way?";
const MARKER_OFFSET: f32 = 24.0;
const PUDDLE_HALF_WIDTH: f32 = 40.0;
const PUDDLE_HALF_HEIGHT: f32 = 20.0;
const RAIN_BAND_HEIGHT: f32 = 150.0;
const SPARKLE_COUNT: u32 = 10;

const STYLE_SHEET: &str = "\
.app.game { display: flex; flex-direction: column; align-items: center; font-family: sans-serif; }\n\
.game-title { margin: 16px 0 8px; }\n\
.scenario { position: relative; width: 100%; max-width: 900px; min-height: 600px; \
background: #f4f9f4; border-radius: 12px; padding: 16px; box-sizing: border-box; overflow: hidden; }\n\
.progress { font-weight: bold; text-align: right; }\n\
.secret-hint { position: absolute; top: 90px; left: 50%; transform: translateX(-50%); \
background: #fff8d6; border-radius: 8px; padding: 8px 14px; box-shadow: 0 2px 6px rgba(0,0,0,0.2); z-index: 5; }\n\
.vignette { position: absolute; inset: 0; pointer-events: none; border-radius: 12px; z-index: 4; }\n\
.draggable-item { position: absolute; width: 50px; height: 50px; font-size: 2rem; line-height: 50px; \
text-align: center; cursor: grab; user-select: none; touch-action: none; z-index: 6; }\n\
.draggable-item.dragging { cursor: grabbing; }\n\
.puzzle-effect { position: absolute; font-size: 2rem; pointer-events: none; z-index: 3; }\n\
.rain-band { position: absolute; left: 0; right: 0; top: 0; pointer-events: none; z-index: 2; \
background: repeating-linear-gradient(180deg, rgba(120, 160, 220, 0.25) 0px, transparent 18px); }\n\
.puddle { position: absolute; border-radius: 50%; background: rgba(100, 150, 220, 0.45); \
pointer-events: none; z-index: 2; }\n\
.track { position: relative; height: 20px; width: 90%; margin: 24px auto; \
background: repeating-linear-gradient(90deg, #8d6e63 0 24px, #5d4037 24px 30px); border-radius: 4px; }\n\
.trolley { position: absolute; top: -28px; left: 0; font-size: 2rem; }\n\
.trolley.moving { transition: left 3s cubic-bezier(0.4, 0, 0.2, 1); }\n\
.animals { font-size: 1.6rem; min-height: 40px; text-align: center; }\n\
.button-row { display: flex; gap: 12px; justify-content: center; margin: 12px 0; }\n\
.decide-button { border: none; border-radius: 8px; color: white; padding: 10px 18px; \
font-size: 1rem; cursor: pointer; }\n\
.decide-button.green { background: #28a745; }\n\
.decide-button.blue { background: #007bff; }\n\
.nav-button { border: none; border-radius: 8px; color: white; padding: 8px 16px; cursor: pointer; }\n\
.nav-button.advance { background: #28a745; }\n\
.nav-button.retry { background: #6c757d; }\n\
.result { background: white; border-radius: 8px; padding: 12px; margin-top: 12px; \
box-shadow: 0 2px 6px rgba(0,0,0,0.15); }\n";

/// All DOM nodes built once at startup. Per-scenario children live under
/// `items_group` and `effects_group` and are rebuilt on scenario change.
struct SceneNodes {
    surface: Element,
    progress: Element,
    hint_bubble: Element,
    vignette: Element,
    effects_group: Element,
    items_group: Element,
    description: Element,
    trolley: Element,
    green_box: Element,
    blue_box: Element,
    green_option_line: Element,
    blue_option_line: Element,
    buttons_row: Element,
    green_button: Element,
    blue_button: Element,
    result_panel: Element,
    result_heading: Element,
    result_text: Element,
    advance_button: Element,
    retry_button: Element,
}

struct GameView {
    core: Rc<AppCore>,
    document: Document,
    nodes: SceneNodes,
    input_mode: InputMode,
    item_nodes: RefCell<Vec<Element>>,
    last_scenario: Cell<Option<usize>>,
    subscription: RefCell<Option<AppSubscription>>,
    listeners: RefCell<Vec<EventListener>>,
    pending_snapshot: RefCell<Option<AppSnapshot>>,
    frame_handle: RefCell<Option<AnimationFrame>>,
}

thread_local! {
    static GAME_VIEW: RefCell<Option<Rc<GameView>>> = RefCell::new(None);
}

pub(crate) fn run() {
    boot::set_phase("dom", "building game surface");
    #[cfg(target_arch = "wasm32")]
    {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let Some(root) = document.get_element_by_id("game-root") else {
            boot::fail(
                "dom",
                "game-root element missing",
                "the host page must provide a #game-root container",
            );
            return;
        };
        root.set_class_name("app game");
        ensure_stylesheet(&document);

        let nodes = build_scene(&document, &root);
        let core = AppCore::shared();
        let view = Rc::new(GameView {
            core: core.clone(),
            document: document.clone(),
            nodes,
            input_mode: detect_input_mode(),
            item_nodes: RefCell::new(Vec::new()),
            last_scenario: Cell::new(None),
            subscription: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            pending_snapshot: RefCell::new(None),
            frame_handle: RefCell::new(None),
        });
        *view.subscription.borrow_mut() = Some(core.subscribe(Rc::new({
            let view = Rc::clone(&view);
            let core = core.clone();
            move || {
                view.queue_render_snapshot(core.snapshot());
            }
        })));
        view.install_listeners();
        core.arm_hint_timer();
        view.queue_render_snapshot(core.snapshot());
        GAME_VIEW.with(|slot| {
            *slot.borrow_mut() = Some(view);
        });
        boot::ready();
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("the game view is only supported on wasm32 targets");
    }
}

fn ensure_stylesheet(document: &Document) {
    let Some(head) = document.head() else {
        return;
    };
    let style = document.create_element("style").expect("create style");
    style.set_text_content(Some(STYLE_SHEET));
    let _ = head.append_child(&style);
}

fn build_scene(document: &Document, root: &Element) -> SceneNodes {
    let title = create_element(document, "h1", "game-title");
    title.set_text_content(Some(TITLE_TEXT));
    let _ = root.append_child(&title);

    let surface = create_element(document, "div", "scenario");
    let progress = create_element(document, "div", "progress");
    let hint_bubble = create_element(document, "div", "secret-hint");
    let vignette = create_element(document, "div", "vignette");
    let effects_group = create_element(document, "div", "effects");
    let items_group = create_element(document, "div", "items");
    let description = create_element(document, "p", "description");

    let track = create_element(document, "div", "track");
    let trolley = create_element(document, "div", "trolley");
    trolley.set_text_content(Some("🚃"));
    let _ = track.append_child(&trolley);

    let green_box = create_element(document, "div", "animals green");
    let blue_box = create_element(document, "div", "animals blue");
    let green_option_line = create_element(document, "p", "option-line green");
    let blue_option_line = create_element(document, "p", "option-line blue");
    let prompt = create_element(document, "p", "prompt");
    prompt.set_text_content(Some(PROMPT_TEXT));

    let buttons_row = create_element(document, "div", "button-row decide");
    let green_button = create_element(document, "button", "decide-button green");
    green_button.set_text_content(Some("Green Button"));
    let blue_button = create_element(document, "button", "decide-button blue");
    blue_button.set_text_content(Some("Blue Button"));
    let _ = buttons_row.append_child(&green_button);
    let _ = buttons_row.append_child(&blue_button);

    let result_panel = create_element(document, "div", "result");
    let result_heading = create_element(document, "h3", "result-heading");
    let result_text = create_element(document, "p", "result-text");
    let nav_row = create_element(document, "div", "button-row nav");
    let advance_button = create_element(document, "button", "nav-button advance");
    let retry_button = create_element(document, "button", "nav-button retry");
    retry_button.set_text_content(Some("Try Again"));
    let _ = nav_row.append_child(&advance_button);
    let _ = nav_row.append_child(&retry_button);
    let _ = result_panel.append_child(&result_heading);
    let _ = result_panel.append_child(&result_text);
    let _ = result_panel.append_child(&nav_row);

    let _ = surface.append_child(&progress);
    let _ = surface.append_child(&hint_bubble);
    let _ = surface.append_child(&vignette);
    let _ = surface.append_child(&effects_group);
    let _ = surface.append_child(&items_group);
    let _ = surface.append_child(&description);
    let _ = surface.append_child(&track);
    let _ = surface.append_child(&green_box);
    let _ = surface.append_child(&blue_box);
    let _ = surface.append_child(&green_option_line);
    let _ = surface.append_child(&blue_option_line);
    let _ = surface.append_child(&prompt);
    let _ = surface.append_child(&buttons_row);
    let _ = surface.append_child(&result_panel);
    let _ = root.append_child(&surface);

    SceneNodes {
        surface,
        progress,
        hint_bubble,
        vignette,
        effects_group,
        items_group,
        description,
        trolley,
        green_box,
        blue_box,
        green_option_line,
        blue_option_line,
        buttons_row,
        green_button,
        blue_button,
        result_panel,
        result_heading,
        result_text,
        advance_button,
        retry_button,
    }
}

impl GameView {
    fn queue_render_snapshot(self: &Rc<Self>, snapshot: AppSnapshot) {
        *self.pending_snapshot.borrow_mut() = Some(snapshot);
        if self.frame_handle.borrow().is_some() {
            return;
        }
        let view = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            view.frame_handle.borrow_mut().take();
            let pending = view.pending_snapshot.borrow_mut().take();
            if let Some(snapshot) = pending {
                view.render_snapshot(&snapshot);
            }
        });
        *self.frame_handle.borrow_mut() = Some(handle);
    }

    fn dispatch_action(&self, action: CoreAction) {
        self.core.apply_action(action);
    }

    /// Topmost not-yet-completed item whose square contains the point.
    fn pick_item(&self, point: Position, snapshot: &AppSnapshot) -> Option<usize> {
        snapshot
            .items
            .iter()
            .enumerate()
            .rev()
            .find(|(_, item)| {
                !item.completed
                    && point.x >= item.position.x
                    && point.x <= item.position.x + ITEM_SIZE
                    && point.y >= item.position.y
                    && point.y <= item.position.y + ITEM_SIZE
            })
            .map(|(index, _)| index)
    }

    fn pointer_down(&self, sample: PointerSample, event: &Event) {
        let snapshot = self.core.snapshot();
        let Some(point) = surface_point(sample, &self.nodes.surface) else {
            return;
        };
        if let Some(item_index) = self.pick_item(point, &snapshot) {
            self.dispatch_action(CoreAction::BeginDrag {
                item_index,
                x: point.x,
                y: point.y,
                pointer_id: sample.id,
            });
            event.prevent_default();
        }
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        let window = web_sys::window().expect("window available");
        let surface = self.nodes.surface.clone();

        match self.input_mode {
            InputMode::Mouse => {
                let view = Rc::clone(self);
                let listener = EventListener::new_with_options(
                    &surface,
                    "mousedown",
                    EventListenerOptions {
                        phase: EventListenerPhase::Bubble,
                        passive: false,
                    },
                    move |event: &Event| {
                        let Some(event) = event.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        if event.button() != 0 {
                            return;
                        }
                        view.pointer_down(mouse_sample(event), event);
                    },
                );
                listeners.push(listener);

                let view = Rc::clone(self);
                let core = self.core.clone();
                let listener = EventListener::new_with_options(
                    &window,
                    "mousemove",
                    EventListenerOptions {
                        phase: EventListenerPhase::Capture,
                        passive: false,
                    },
                    move |event: &Event| {
                        let Some(event) = event.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        if !core.snapshot().dragging {
                            return;
                        }
                        let sample = mouse_sample(event);
                        if let Some(point) = surface_point(sample, &view.nodes.surface) {
                            view.dispatch_action(CoreAction::DragMove {
                                x: point.x,
                                y: point.y,
                            });
                        }
                        event.prevent_default();
                    },
                );
                listeners.push(listener);

                let view = Rc::clone(self);
                let core = self.core.clone();
                let listener = EventListener::new_with_options(
                    &window,
                    "mouseup",
                    EventListenerOptions {
                        phase: EventListenerPhase::Capture,
                        passive: false,
                    },
                    move |event: &Event| {
                        let Some(event) = event.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        let snapshot = core.snapshot();
                        if snapshot.dragging {
                            let sample = mouse_sample(event);
                            if let Some(point) = surface_point(sample, &view.nodes.surface) {
                                view.dispatch_action(CoreAction::DragMove {
                                    x: point.x,
                                    y: point.y,
                                });
                            }
                        }
                        view.dispatch_action(CoreAction::DragEnd { pointer_id: None });
                    },
                );
                listeners.push(listener);
            }
            InputMode::Touch => {
                let view = Rc::clone(self);
                let listener = EventListener::new_with_options(
                    &surface,
                    "touchstart",
                    EventListenerOptions {
                        phase: EventListenerPhase::Bubble,
                        passive: false,
                    },
                    move |event: &Event| {
                        let Some(event) = event.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        let Some(sample) = touch_sample(event, None, false) else {
                            return;
                        };
                        view.pointer_down(sample, event);
                    },
                );
                listeners.push(listener);

                let view = Rc::clone(self);
                let core = self.core.clone();
                let listener = EventListener::new_with_options(
                    &window,
                    "touchmove",
                    EventListenerOptions {
                        phase: EventListenerPhase::Capture,
                        passive: false,
                    },
                    move |event: &Event| {
                        let Some(event) = event.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        let snapshot = core.snapshot();
                        if !snapshot.dragging {
                            return;
                        }
                        let Some(sample) = touch_sample(event, snapshot.drag_pointer, false)
                        else {
                            return;
                        };
                        if let Some(point) = surface_point(sample, &view.nodes.surface) {
                            view.dispatch_action(CoreAction::DragMove {
                                x: point.x,
                                y: point.y,
                            });
                        }
                        event.prevent_default();
                    },
                );
                listeners.push(listener);

                let view = Rc::clone(self);
                let core = self.core.clone();
                let listener = EventListener::new_with_options(
                    &window,
                    "touchend",
                    EventListenerOptions {
                        phase: EventListenerPhase::Capture,
                        passive: false,
                    },
                    move |event: &Event| {
                        let Some(event) = event.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        let snapshot = core.snapshot();
                        // Only the finger that started the drag may end it.
                        let Some(sample) = touch_sample(event, snapshot.drag_pointer, true)
                        else {
                            return;
                        };
                        if snapshot.dragging {
                            if let Some(point) = surface_point(sample, &view.nodes.surface) {
                                view.dispatch_action(CoreAction::DragMove {
                                    x: point.x,
                                    y: point.y,
                                });
                            }
                        }
                        view.dispatch_action(CoreAction::DragEnd {
                            pointer_id: snapshot.drag_pointer,
                        });
                    },
                );
                listeners.push(listener);

                let view = Rc::clone(self);
                let core = self.core.clone();
                let listener = EventListener::new_with_options(
                    &window,
                    "touchcancel",
                    EventListenerOptions {
                        phase: EventListenerPhase::Capture,
                        passive: false,
                    },
                    move |_event: &Event| {
                        let snapshot = core.snapshot();
                        view.dispatch_action(CoreAction::DragEnd {
                            pointer_id: snapshot.drag_pointer,
                        });
                    },
                );
                listeners.push(listener);
            }
        }

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.nodes.green_button, "click", move |_event| {
            view.dispatch_action(CoreAction::Decide {
                choice: Choice::Green,
            });
        });
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.nodes.blue_button, "click", move |_event| {
            view.dispatch_action(CoreAction::Decide {
                choice: Choice::Blue,
            });
        });
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.nodes.advance_button, "click", move |_event| {
            view.dispatch_action(CoreAction::NextScenario);
        });
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.nodes.retry_button, "click", move |_event| {
            view.dispatch_action(CoreAction::ResetScenario);
        });
        listeners.push(listener);

        *self.listeners.borrow_mut() = listeners;
    }

    fn render_snapshot(self: &Rc<Self>, snapshot: &AppSnapshot) {
        let Some(scenario) = snapshot.scenario() else {
            return;
        };
        self.ensure_scene(snapshot, scenario);
        self.render_progress(snapshot);
        self.render_hint(snapshot);
        self.render_vignette(snapshot);
        self.render_effects(snapshot, scenario);
        self.render_items(snapshot);
        self.render_trolley(snapshot);
        self.render_animals(snapshot, scenario);
        self.render_buttons(snapshot);
        self.render_result(snapshot, scenario);
    }

    /// Rebuilds the per-scenario children when the scenario changes.
    fn ensure_scene(&self, snapshot: &AppSnapshot, scenario: &Scenario) {
        if self.last_scenario.get() == Some(snapshot.scenario_index) {
            return;
        }
        self.last_scenario.set(Some(snapshot.scenario_index));

        self.nodes
            .description
            .set_text_content(Some(&scenario.description));
        self.nodes.green_option_line.set_text_content(Some(&format!(
            "Press the green button: {}",
            scenario.green.text
        )));
        self.nodes.blue_option_line.set_text_content(Some(&format!(
            "Press the blue button: {}",
            scenario.blue.text
        )));
        self.nodes.advance_button.set_text_content(Some(if snapshot.is_last {
            "Start Over"
        } else {
            "Next Scenario"
        }));

        clear_children(&self.nodes.items_group);
        let mut item_nodes = self.item_nodes.borrow_mut();
        item_nodes.clear();
        for step in &scenario.steps {
            let node = create_element(&self.document, "div", "draggable-item");
            node.set_text_content(Some(&step.item));
            let _ = self.nodes.items_group.append_child(&node);
            item_nodes.push(node);
        }
    }

    fn render_progress(&self, snapshot: &AppSnapshot) {
        self.nodes.progress.set_text_content(Some(&format!(
            "Scenario {} of {}",
            snapshot.scenario_index + 1,
            snapshot.scenarios.len()
        )));
    }

    fn render_hint(&self, snapshot: &AppSnapshot) {
        if snapshot.show_hint && !snapshot.hint.is_empty() {
            self.nodes.hint_bubble.set_text_content(Some(&snapshot.hint));
            let _ = self.nodes.hint_bubble.remove_attribute("style");
        } else {
            let _ = self
                .nodes
                .hint_bubble
                .set_attribute("style", "display: none;");
        }
    }

    fn render_vignette(&self, snapshot: &AppSnapshot) {
        if snapshot.vignette <= 0.0 {
            let _ = self.nodes.vignette.set_attribute("style", "display: none;");
            return;
        }
        let style = format!(
            "background: radial-gradient(circle, transparent {}%, rgba(76, 175, 80, {}) 100%);",
            fmt_f32(100.0 - snapshot.vignette * 50.0),
            fmt_f32(snapshot.vignette * 0.5),
        );
        let _ = self.nodes.vignette.set_attribute("style", &style);
    }

    /// One node per completed step, shaped by that step's visual kind.
    fn render_effects(&self, snapshot: &AppSnapshot, scenario: &Scenario) {
        clear_children(&self.nodes.effects_group);
        for step in &scenario.steps {
            if !snapshot.completed_steps.contains(&step.effect) {
                continue;
            }
            let center = step.target.center();
            let emoji = step
                .visual
                .emoji
                .as_deref()
                .unwrap_or_else(|| step.effect.marker_emoji());
            match step.visual.kind {
                VisualKind::Rain => {
                    let band = create_element(&self.document, "div", "rain-band");
                    let _ = band.set_attribute(
                        "style",
                        &format!("height: {}px;", fmt_f32(RAIN_BAND_HEIGHT)),
                    );
                    let _ = self.nodes.effects_group.append_child(&band);
                }
                VisualKind::Puddle => {
                    let puddle = create_element(&self.document, "div", "puddle");
                    let style = format!(
                        "left: {}px; top: {}px; width: {}px; height: {}px;",
                        fmt_f32(center.x - PUDDLE_HALF_WIDTH),
                        fmt_f32(center.y - PUDDLE_HALF_HEIGHT),
                        fmt_f32(PUDDLE_HALF_WIDTH * 2.0),
                        fmt_f32(PUDDLE_HALF_HEIGHT * 2.0),
                    );
                    let _ = puddle.set_attribute("style", &style);
                    puddle.set_text_content(Some(emoji));
                    let _ = self.nodes.effects_group.append_child(&puddle);
                }
                VisualKind::Sparkle => {
                    let count = step
                        .visual
                        .animation
                        .and_then(|config| config.particle_count)
                        .unwrap_or(SPARKLE_COUNT);
                    for index in 0..count {
                        let sparkle = create_element(&self.document, "span", "puzzle-effect");
                        let angle = index as f32 / count.max(1) as f32
                            * std::f32::consts::TAU;
                        let style = format!(
                            "left: {}px; top: {}px;",
                            fmt_f32(center.x - MARKER_OFFSET + angle.cos() * 30.0),
                            fmt_f32(center.y - MARKER_OFFSET + angle.sin() * 30.0),
                        );
                        let _ = sparkle.set_attribute("style", &style);
                        sparkle.set_text_content(Some(emoji));
                        let _ = self.nodes.effects_group.append_child(&sparkle);
                    }
                }
                VisualKind::Static => {
                    let marker = create_element(&self.document, "span", "puzzle-effect");
                    let style = format!(
                        "left: {}px; top: {}px;",
                        fmt_f32(center.x - MARKER_OFFSET),
                        fmt_f32(center.y - MARKER_OFFSET),
                    );
                    let _ = marker.set_attribute("style", &style);
                    marker.set_text_content(Some(emoji));
                    let _ = self.nodes.effects_group.append_child(&marker);
                }
            }
        }
    }

    fn render_items(&self, snapshot: &AppSnapshot) {
        let item_nodes = self.item_nodes.borrow();
        for (index, node) in item_nodes.iter().enumerate() {
            let Some(item) = snapshot.items.get(index) else {
                let _ = node.set_attribute("style", "display: none;");
                continue;
            };
            if item.completed {
                let _ = node.set_attribute("style", "display: none;");
                continue;
            }
            let mut style = format!(
                "left: {}px; top: {}px;",
                fmt_f32(item.position.x),
                fmt_f32(item.position.y),
            );
            if !item.available {
                style.push_str(" opacity: 0.7;");
            }
            if item.dragging {
                style.push_str(" transform: scale(1.1);");
                node.set_class_name("draggable-item dragging");
            } else {
                node.set_class_name("draggable-item");
            }
            let _ = node.set_attribute("style", &style);
            if item.available {
                let _ = node.remove_attribute("title");
            } else {
                let _ = node.set_attribute("title", "Complete previous steps first");
            }
        }
    }

    fn render_trolley(&self, snapshot: &AppSnapshot) {
        if snapshot.animating {
            self.nodes.trolley.set_class_name("trolley moving");
            let _ = self
                .nodes
                .trolley
                .set_attribute("style", "left: calc(100% - 48px);");
        } else {
            self.nodes.trolley.set_class_name("trolley");
            let _ = self.nodes.trolley.remove_attribute("style");
        }
    }

    fn render_animals(&self, snapshot: &AppSnapshot, scenario: &Scenario) {
        let saved = snapshot.saved_chain_complete();
        let green = animals_text(
            snapshot.decision,
            saved,
            Decision::Green,
            &scenario.green.emoji,
            &scenario.green.dead_emoji,
            scenario.green.count,
        );
        let blue = animals_text(
            snapshot.decision,
            saved,
            Decision::Blue,
            &scenario.blue.emoji,
            &scenario.blue.dead_emoji,
            scenario.blue.count,
        );
        self.nodes.green_box.set_text_content(Some(&green));
        self.nodes.blue_box.set_text_content(Some(&blue));
    }

    fn render_buttons(&self, snapshot: &AppSnapshot) {
        if snapshot.decision.is_some() || snapshot.animating {
            let _ = self
                .nodes
                .buttons_row
                .set_attribute("style", "display: none;");
        } else {
            let _ = self.nodes.buttons_row.remove_attribute("style");
        }
    }

    fn render_result(&self, snapshot: &AppSnapshot, scenario: &Scenario) {
        let Some(decision) = snapshot.decision else {
            let _ = self
                .nodes
                .result_panel
                .set_attribute("style", "display: none;");
            return;
        };
        let _ = self.nodes.result_panel.remove_attribute("style");
        match decision {
            Decision::Green => {
                self.nodes
                    .result_heading
                    .set_text_content(Some("You chose to press the green button"));
                self.nodes.result_text.set_text_content(Some(&format!(
                    "{} {} were sacrificed. Was it the right choice?",
                    scenario.green.count, scenario.green.victims
                )));
            }
            Decision::Blue => {
                self.nodes
                    .result_heading
                    .set_text_content(Some("You chose to press the blue button"));
                self.nodes.result_text.set_text_content(Some(&format!(
                    "{} {} were sacrificed. Was it the right choice?",
                    scenario.blue.count, scenario.blue.victims
                )));
            }
            Decision::Saved => {
                self.nodes
                    .result_heading
                    .set_text_content(Some("Brilliant solution! 🎉"));
                self.nodes
                    .result_text
                    .set_text_content(Some(&scenario.final_hint));
            }
        }
    }
}

fn animals_text(
    decision: Option<Decision>,
    saved: bool,
    side: Decision,
    emoji: &str,
    dead_emoji: &str,
    count: u32,
) -> String {
    if saved {
        return "✨".to_string();
    }
    match decision {
        Some(chosen) if chosen == side => dead_emoji.repeat(count as usize),
        Some(_) => emoji.repeat(count as usize),
        None => emoji.repeat(count as usize),
    }
}

fn create_element(document: &Document, tag: &str, class: &str) -> Element {
    let element = document.create_element(tag).expect("create element");
    element.set_class_name(class);
    element
}

fn clear_children(parent: &Element) {
    while let Some(child) = parent.first_child() {
        let _ = parent.remove_child(&child);
    }
}

fn fmt_f32(value: f32) -> String {
    format!("{:.3}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animals_show_dead_emoji_on_chosen_side_only() {
        let text = animals_text(Some(Decision::Green), false, Decision::Green, "🐸", "💀", 2);
        assert_eq!(text, "💀💀");
        let text = animals_text(Some(Decision::Green), false, Decision::Blue, "🐢", "💀", 1);
        assert_eq!(text, "🐢");
    }

    #[test]
    fn animals_sparkle_once_the_chain_is_complete() {
        let text = animals_text(None, true, Decision::Green, "🐸", "💀", 2);
        assert_eq!(text, "✨");
    }
}
