use serde::{Deserialize, Serialize};

use crate::effect::EffectTag;
use crate::geom::Position;

/// The button pressed by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Green,
    Blue,
}

/// Resolution of a scenario. `Saved` means the hidden puzzle chain was
/// completed and no button had to be pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Green,
    Blue,
    Saved,
}

impl From<Choice> for Decision {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Green => Decision::Green,
            Choice::Blue => Decision::Blue,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub item_index: usize,
    pub position: Position,
    /// True between a rejected release and its settle timer. The drag no
    /// longer follows the pointer but the item has not snapped home yet.
    pub settling: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub scenario_index: usize,
    pub decision: Option<Decision>,
    pub animating: bool,
    pub completed: Vec<bool>,
    pub drag: Option<DragState>,
    pub show_hint: bool,
    /// Effects completed in the current scenario, in completion order.
    pub completed_steps: Vec<EffectTag>,
    /// Bumped whenever outstanding timers become invalid. Timer completions
    /// scheduled against an older value are dropped.
    pub timer_epoch: u64,
}

impl GameState {
    pub fn new(scenario_count: usize) -> Self {
        Self {
            scenario_index: 0,
            decision: None,
            animating: false,
            completed: vec![false; scenario_count],
            drag: None,
            show_hint: false,
            completed_steps: Vec::new(),
            timer_epoch: 0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Some(drag) if !drag.settling)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}
