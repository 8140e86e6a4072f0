use crate::effect::{AnimationConfig, EffectTag, VisualEffect, VisualKind};
use crate::scenario::{PuzzleStep, Scenario, ScenarioOption, TargetArea};

fn rain_visual() -> VisualEffect {
    VisualEffect {
        kind: VisualKind::Rain,
        emoji: Some("💧".to_string()),
        additional_effects: true,
        easing: Some("ease-in-out".to_string()),
        animation: Some(AnimationConfig {
            duration_ms: Some(1000),
            delay_ms: None,
            particle_count: Some(20),
        }),
    }
}

fn puddle_visual() -> VisualEffect {
    VisualEffect {
        kind: VisualKind::Puddle,
        emoji: Some("🌿".to_string()),
        additional_effects: true,
        easing: Some("ease-out".to_string()),
        animation: Some(AnimationConfig {
            duration_ms: Some(800),
            delay_ms: None,
            particle_count: None,
        }),
    }
}

fn sparkle_visual() -> VisualEffect {
    VisualEffect {
        kind: VisualKind::Sparkle,
        emoji: Some("✨".to_string()),
        additional_effects: true,
        easing: Some("ease-in-out".to_string()),
        animation: Some(AnimationConfig {
            duration_ms: Some(500),
            delay_ms: None,
            particle_count: Some(10),
        }),
    }
}

fn option(text: &str, victims: &str, count: u32, emoji: &str) -> ScenarioOption {
    ScenarioOption {
        text: text.to_string(),
        victims: victims.to_string(),
        count,
        emoji: emoji.to_string(),
        dead_emoji: "💀".to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn step(
    item: &str,
    hint: &str,
    x: f32,
    y: f32,
    required: &[EffectTag],
    effect: EffectTag,
    visual: VisualEffect,
) -> PuzzleStep {
    PuzzleStep {
        item: item.to_string(),
        hint: hint.to_string(),
        target: TargetArea { x, y, radius: 40.0 },
        required: required.to_vec(),
        effect,
        visual,
    }
}

/// The three built-in dilemmas. Each one hides a chain of drops that ends in
/// a save, so neither button has to be pressed.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: 1,
            description: "A trolley is heading down the tracks. There's a storm brewing..."
                .to_string(),
            green: option("Two frogs will be run over", "frogs", 2, "🐸"),
            blue: option("One turtle will be run over", "turtle", 1, "🐢"),
            steps: vec![
                step(
                    "☁️",
                    "The clouds look heavy with rain...",
                    150.0,
                    50.0,
                    &[],
                    EffectTag::Rain,
                    rain_visual(),
                ),
                step(
                    "🌿",
                    "A lily pad might float on the new puddle...",
                    100.0,
                    150.0,
                    &[EffectTag::Rain],
                    EffectTag::Lilypad,
                    puddle_visual(),
                ),
                step(
                    "🪰",
                    "Flies are attracted to the water...",
                    100.0,
                    150.0,
                    &[EffectTag::Lilypad],
                    EffectTag::Save,
                    sparkle_visual(),
                ),
            ],
            final_hint: "The frogs will follow their food to safety!".to_string(),
        },
        Scenario {
            id: 2,
            description: "The trolley approaches a garden area...".to_string(),
            green: option("Three butterflies will be run over", "butterflies", 3, "🦋"),
            blue: option("One rabbit will be run over", "rabbit", 1, "🐰"),
            steps: vec![
                step(
                    "🥕",
                    "The carrot looks tasty, but it's too far to reach...",
                    200.0,
                    100.0,
                    &[],
                    EffectTag::Carrot,
                    VisualEffect::static_marker(),
                ),
                step(
                    "🪜",
                    "A ladder might help reach higher places...",
                    150.0,
                    150.0,
                    &[EffectTag::Carrot],
                    EffectTag::Ladder,
                    VisualEffect::static_marker(),
                ),
                step(
                    "🌸",
                    "Flowers might attract the butterflies away...",
                    300.0,
                    100.0,
                    &[EffectTag::Ladder],
                    EffectTag::Save,
                    sparkle_visual(),
                ),
            ],
            final_hint: "Maybe you can save both groups at once!".to_string(),
        },
        Scenario {
            id: 3,
            description: "The final trolley dilemma involves a complex ecosystem...".to_string(),
            green: option("Five ants will be run over", "ants", 5, "🐜"),
            blue: option("Two ladybugs will be run over", "ladybugs", 2, "🐞"),
            steps: vec![
                step(
                    "🍃",
                    "A gentle breeze might carry scents...",
                    250.0,
                    80.0,
                    &[],
                    EffectTag::Breeze,
                    VisualEffect::static_marker(),
                ),
                step(
                    "🍯",
                    "The honey pot is attracting attention...",
                    150.0,
                    120.0,
                    &[EffectTag::Breeze],
                    EffectTag::Honey,
                    VisualEffect::static_marker(),
                ),
                step(
                    "📱",
                    "The phone's vibration might guide them...",
                    350.0,
                    150.0,
                    &[EffectTag::Honey],
                    EffectTag::Save,
                    sparkle_visual(),
                ),
            ],
            final_hint: "The insects communicate through vibrations!".to_string(),
        },
    ]
}
