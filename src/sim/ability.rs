//! Elemental affinities and special abilities
//!
//! A body may bond with an element and carry one special ability. Each
//! collision gives every unused ability a chance to fire; once fired it stays
//! spent for the rest of the battle and its element's effect runs for a fixed
//! window.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Elemental affinity of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Lightning,
    Ice,
    Darkness,
    Light,
}

impl Element {
    pub const ALL: [Element; 8] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Air,
        Element::Lightning,
        Element::Ice,
        Element::Darkness,
        Element::Light,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Earth => "earth",
            Element::Air => "air",
            Element::Lightning => "lightning",
            Element::Ice => "ice",
            Element::Darkness => "darkness",
            Element::Light => "light",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Multipliers this element applies while its ability window is open
    pub fn effect(&self) -> ElementEffect {
        match self {
            // Blaze: hits harder, burns out a little sooner
            Element::Fire => ElementEffect {
                self_speed: 1.3,
                stamina_bias: 0.9,
                ..ElementEffect::IDENTITY
            },
            Element::Lightning => ElementEffect {
                self_speed: 1.2,
                ..ElementEffect::IDENTITY
            },
            Element::Air => ElementEffect {
                self_speed: 1.25,
                ..ElementEffect::IDENTITY
            },
            Element::Water => ElementEffect {
                opponent_speed: 0.7,
                stamina_bias: 1.1,
                ..ElementEffect::IDENTITY
            },
            Element::Ice => ElementEffect {
                opponent_speed: 0.7,
                stamina_bias: 1.1,
                ..ElementEffect::IDENTITY
            },
            Element::Light => ElementEffect {
                opponent_speed: 0.7,
                ..ElementEffect::IDENTITY
            },
            Element::Earth => ElementEffect {
                stamina_bias: 1.2,
                ..ElementEffect::IDENTITY
            },
            // Drain: siphons spin from the other body
            Element::Darkness => ElementEffect {
                opponent_speed: 0.85,
                stamina_bias: 1.2,
                ..ElementEffect::IDENTITY
            },
        }
    }
}

/// Multiplicative modifiers of an active ability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementEffect {
    /// Holder's speed factor
    pub self_speed: f32,
    /// Other body's speed factor
    pub opponent_speed: f32,
    /// Final stamina comparison, applied if the ability fired at all
    pub stamina_bias: f32,
}

impl ElementEffect {
    pub const IDENTITY: ElementEffect = ElementEffect {
        self_speed: 1.0,
        opponent_speed: 1.0,
        stamina_bias: 1.0,
    };

    /// Effect for an optional element; no affinity means no modifier
    pub fn for_element(element: Option<Element>) -> Self {
        element.map(|e| e.effect()).unwrap_or(Self::IDENTITY)
    }
}

/// A one-shot ability carried by a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialAbility {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Flavour text for what the ability does in a fight
    #[serde(default, alias = "battleEffect")]
    pub battle_effect: String,
    /// 0-10, higher fires more often
    #[serde(alias = "activationThreshold")]
    pub activation_threshold: f32,
}

impl SpecialAbility {
    pub fn new(name: impl Into<String>, description: impl Into<String>, threshold: f32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            battle_effect: String::new(),
            activation_threshold: threshold,
        }
    }

    pub fn with_battle_effect(mut self, battle_effect: impl Into<String>) -> Self {
        self.battle_effect = battle_effect.into();
        self
    }

    /// Draw once and report whether the ability fires
    pub fn try_activate<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        let roll = rng.random::<f32>() * 10.0;
        rolls_activation(roll, self.activation_threshold)
    }
}

/// Activation rule: a roll in [0, 10) fires when it exceeds `10 - threshold`.
///
/// With threshold 10 any positive roll fires; with threshold 0 nothing can.
#[inline]
pub fn rolls_activation(roll: f32, threshold: f32) -> bool {
    roll > 10.0 - threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_threshold_ten_fires_on_any_positive_roll() {
        assert!(rolls_activation(0.001, 10.0));
        assert!(rolls_activation(9.99, 10.0));
        // Strict comparison: a zero roll is the single miss
        assert!(!rolls_activation(0.0, 10.0));
    }

    #[test]
    fn test_threshold_zero_never_fires() {
        assert!(!rolls_activation(9.9999, 0.0));
        assert!(!rolls_activation(0.0, 0.0));
    }

    #[test]
    fn test_mid_threshold() {
        assert!(rolls_activation(4.5, 6.0));
        assert!(!rolls_activation(4.0, 6.0));
        assert!(!rolls_activation(3.0, 6.0));
    }

    #[test]
    fn test_seeded_activation_rate() {
        let ability = SpecialAbility::new("Tidal Shield", "", 5.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let fired = (0..10_000).filter(|_| ability.try_activate(&mut rng)).count();
        // Threshold 5 => roll > 5 => about half
        assert!((4_500..5_500).contains(&fired), "fired {fired}");
    }

    #[test]
    fn test_max_threshold_is_near_certain() {
        let ability = SpecialAbility::new("Diving Talon", "", 10.0);
        let mut rng = Pcg32::seed_from_u64(99);
        assert!((0..1_000).all(|_| ability.try_activate(&mut rng)));
    }

    #[test]
    fn test_battle_effect_parses_from_camel_case() {
        let ability: SpecialAbility = serde_json::from_str(
            r#"{ "name": "Whirlpool", "battleEffect": "Disrupts", "activationThreshold": 7 }"#,
        )
        .unwrap();
        assert_eq!(ability.battle_effect, "Disrupts");
        assert_eq!(ability.activation_threshold, 7.0);

        let bare: SpecialAbility =
            serde_json::from_str(r#"{ "name": "Fizzle", "activation_threshold": 1 }"#).unwrap();
        assert!(bare.battle_effect.is_empty());
        assert!(bare.description.is_empty());
    }

    #[test]
    fn test_element_parse() {
        assert_eq!(Element::from_str("Lightning"), Some(Element::Lightning));
        assert_eq!(Element::from_str(" ice "), Some(Element::Ice));
        assert_eq!(Element::from_str("plasma"), None);
    }

    #[test]
    fn test_no_element_is_identity() {
        assert_eq!(ElementEffect::for_element(None), ElementEffect::IDENTITY);
        let water = ElementEffect::for_element(Some(Element::Water));
        assert_eq!(water.opponent_speed, 0.7);
        assert_eq!(water.self_speed, 1.0);
    }
}
