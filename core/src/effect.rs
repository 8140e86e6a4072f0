use serde::{Deserialize, Serialize};

/// Outcome produced by completing a puzzle step. `Save` is always the final
/// link of a scenario's chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectTag {
    Rain,
    Lilypad,
    Carrot,
    Ladder,
    Breeze,
    Honey,
    Save,
}

impl EffectTag {
    /// Emoji drawn at the target once the step has been completed.
    pub fn marker_emoji(self) -> &'static str {
        match self {
            EffectTag::Rain => "💧",
            EffectTag::Lilypad => "🌿",
            EffectTag::Carrot => "🥕",
            EffectTag::Ladder => "🪜",
            EffectTag::Breeze => "🍃",
            EffectTag::Honey => "🍯",
            EffectTag::Save => "✨",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisualKind {
    Rain,
    Puddle,
    Sparkle,
    Static,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default)]
    pub duration_ms: Option<u32>,
    #[serde(default)]
    pub delay_ms: Option<u32>,
    #[serde(default)]
    pub particle_count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualEffect {
    pub kind: VisualKind,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub additional_effects: bool,
    #[serde(default)]
    pub easing: Option<String>,
    #[serde(default)]
    pub animation: Option<AnimationConfig>,
}

impl VisualEffect {
    pub fn static_marker() -> Self {
        Self {
            kind: VisualKind::Static,
            emoji: None,
            additional_effects: false,
            easing: None,
            animation: None,
        }
    }
}
