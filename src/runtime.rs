use torokko_core::Choice;

/// Everything the view can ask the controller to do.
#[derive(Clone, Copy, Debug)]
pub(crate) enum CoreAction {
    BeginDrag {
        item_index: usize,
        x: f32,
        y: f32,
        pointer_id: Option<i32>,
    },
    DragMove {
        x: f32,
        y: f32,
    },
    DragEnd {
        pointer_id: Option<i32>,
    },
    Decide {
        choice: Choice,
    },
    NextScenario,
    ResetScenario,
    RevealHint,
}
