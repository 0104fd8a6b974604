//! Bit-beast roster
//!
//! The spirits a body can bond with. Each one brings an element, a special
//! ability and a small power bonus used when breaking ties.

use serde::{Deserialize, Serialize};

use crate::sim::ability::{Element, SpecialAbility};
use crate::sim::body::CombatStyle;

/// Animal form of a bit-beast (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
    Dragon,
    Phoenix,
    Turtle,
    Tiger,
    Wolf,
    Eagle,
    Snake,
    Lion,
    Bear,
    Shark,
}

/// A bondable spirit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitBeast {
    pub id: &'static str,
    pub name: &'static str,
    pub animal: Animal,
    pub element: Element,
    pub style: CombatStyle,
    pub description: &'static str,
    pub ability_name: &'static str,
    pub ability_description: &'static str,
    pub ability_battle_effect: &'static str,
    pub activation_threshold: f32,
    /// 0-3
    pub power_bonus: u8,
}

impl BitBeast {
    pub fn special_ability(&self) -> SpecialAbility {
        SpecialAbility::new(
            self.ability_name,
            self.ability_description,
            self.activation_threshold,
        )
        .with_battle_effect(self.ability_battle_effect)
    }
}

static ROSTER: [BitBeast; 12] = [
    // Attack
    BitBeast {
        id: "dragon-inferno",
        name: "Inferno Dragonoid",
        animal: Animal::Dragon,
        element: Element::Fire,
        style: CombatStyle::Attack,
        description: "A fierce dragon that channels the raw power of fire into devastating attacks",
        ability_name: "Blaze Rush",
        ability_description: "Engulfs the body in flames, increasing attack power",
        ability_battle_effect: "30% increased knockback on collision",
        activation_threshold: 7.0,
        power_bonus: 3,
    },
    BitBeast {
        id: "tiger-lightning",
        name: "Volt Tigera",
        animal: Animal::Tiger,
        element: Element::Lightning,
        style: CombatStyle::Attack,
        description:
            "A lightning-fast tiger that strikes with the precision and power of a thunderbolt",
        ability_name: "Lightning Strike",
        ability_description: "Charges the body with electricity for rapid attacks",
        ability_battle_effect: "20% increased attack speed",
        activation_threshold: 6.0,
        power_bonus: 2,
    },
    BitBeast {
        id: "eagle-air",
        name: "Stratosphere Eagle",
        animal: Animal::Eagle,
        element: Element::Air,
        style: CombatStyle::Attack,
        description:
            "A majestic eagle that rules the skies, capable of diving at incredible speeds",
        ability_name: "Diving Talon",
        ability_description: "Enables devastating aerial attacks",
        ability_battle_effect: "Creates powerful air pressure waves on impact",
        activation_threshold: 8.0,
        power_bonus: 2,
    },
    // Defense
    BitBeast {
        id: "turtle-water",
        name: "Tsunami Tortoise",
        animal: Animal::Turtle,
        element: Element::Water,
        style: CombatStyle::Defense,
        description:
            "An ancient turtle with a shell harder than steel, surrounded by a powerful water aura",
        ability_name: "Tidal Shield",
        ability_description: "Creates a water barrier that absorbs impact",
        ability_battle_effect: "Reduces opponent knockback power by 40%",
        activation_threshold: 5.0,
        power_bonus: 3,
    },
    BitBeast {
        id: "bear-earth",
        name: "Granite Grizzly",
        animal: Animal::Bear,
        element: Element::Earth,
        style: CombatStyle::Defense,
        description:
            "A massive bear with skin like stone, capable of shrugging off the most powerful attacks",
        ability_name: "Earth Fortress",
        ability_description: "Hardens the body with earth energy",
        ability_battle_effect: "50% chance to nullify damage from attacks",
        activation_threshold: 6.0,
        power_bonus: 2,
    },
    BitBeast {
        id: "lion-light",
        name: "Radiant Leo",
        animal: Animal::Lion,
        element: Element::Light,
        style: CombatStyle::Defense,
        description:
            "A noble lion whose mane radiates pure light, creating a defensive aura that repels attacks",
        ability_name: "Solar Flare",
        ability_description: "Emits blinding light to disorient opponents",
        ability_battle_effect: "25% chance to stun opponent temporarily",
        activation_threshold: 7.0,
        power_bonus: 2,
    },
    // Stamina
    BitBeast {
        id: "phoenix-fire",
        name: "Eternal Phoenix",
        animal: Animal::Phoenix,
        element: Element::Fire,
        style: CombatStyle::Stamina,
        description: "A legendary phoenix that burns eternally, drawing power from its own flames",
        ability_name: "Rebirth Flame",
        ability_description: "Regenerates energy through continuous spinning",
        ability_battle_effect: "Gradually restores stamina over time",
        activation_threshold: 5.0,
        power_bonus: 3,
    },
    BitBeast {
        id: "snake-darkness",
        name: "Shadow Serpent",
        animal: Animal::Snake,
        element: Element::Darkness,
        style: CombatStyle::Stamina,
        description:
            "A mysterious snake that thrives in darkness, capable of draining the life force from its prey",
        ability_name: "Energy Drain",
        ability_description: "Siphons energy from opponents during contact",
        ability_battle_effect: "Steals stamina from opponent on collision",
        activation_threshold: 6.0,
        power_bonus: 2,
    },
    BitBeast {
        id: "shark-water",
        name: "Abyssal Shark",
        animal: Animal::Shark,
        element: Element::Water,
        style: CombatStyle::Stamina,
        description:
            "A relentless shark that circles its prey, maintaining perfect rhythm in its endless hunt",
        ability_name: "Whirlpool",
        ability_description: "Creates a vortex that pulls in opponents",
        ability_battle_effect: "Disrupts opponent's stability on proximity",
        activation_threshold: 7.0,
        power_bonus: 2,
    },
    // Balance
    BitBeast {
        id: "wolf-ice",
        name: "Frost Lupus",
        animal: Animal::Wolf,
        element: Element::Ice,
        style: CombatStyle::Balance,
        description:
            "A cunning wolf with fur like frost, capable of adapting to any battle situation",
        ability_name: "Winter's Howl",
        ability_description: "Balances offense and defense with ice powers",
        ability_battle_effect: "30% chance to slow opponent's movement",
        activation_threshold: 6.0,
        power_bonus: 3,
    },
    BitBeast {
        id: "dragon-lightning",
        name: "Thunder Drake",
        animal: Animal::Dragon,
        element: Element::Lightning,
        style: CombatStyle::Balance,
        description:
            "A versatile dragon that channels lightning through its body, striking with perfect precision",
        ability_name: "Storm Surge",
        ability_description: "Harnesses lightning for balanced combat",
        ability_battle_effect: "Random boost to attack, defense, or stamina",
        activation_threshold: 7.0,
        power_bonus: 2,
    },
    BitBeast {
        id: "lion-earth",
        name: "Terra Leo",
        animal: Animal::Lion,
        element: Element::Earth,
        style: CombatStyle::Balance,
        description:
            "A powerful lion with a connection to the earth, maintaining perfect balance in any terrain",
        ability_name: "Seismic Roar",
        ability_description: "Creates shockwaves that destabilize the arena",
        ability_battle_effect: "Causes arena-wide disruption affecting all bodies",
        activation_threshold: 8.0,
        power_bonus: 2,
    },
];

/// The full roster
pub fn bit_beasts() -> &'static [BitBeast] {
    &ROSTER
}

/// Look up a bit-beast by id
pub fn find(id: &str) -> Option<&'static BitBeast> {
    ROSTER.iter().find(|b| b.id == id)
}

/// All bit-beasts of one combat style
pub fn by_style(style: CombatStyle) -> impl Iterator<Item = &'static BitBeast> {
    ROSTER.iter().filter(move |b| b.style == style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Body;

    #[test]
    fn test_roster_is_valid() {
        for beast in bit_beasts() {
            assert!((0.0..=10.0).contains(&beast.activation_threshold), "{}", beast.id);
            assert!(beast.power_bonus <= 3, "{}", beast.id);
            let body = Body::new(beast.name, beast.style, 5).unwrap().with_bit_beast(beast);
            assert!(body.validate().is_ok());
        }
    }

    #[test]
    fn test_three_per_style() {
        for style in [
            CombatStyle::Attack,
            CombatStyle::Defense,
            CombatStyle::Stamina,
            CombatStyle::Balance,
        ] {
            assert_eq!(by_style(style).count(), 3);
        }
    }

    #[test]
    fn test_every_beast_has_flavour_text() {
        for beast in bit_beasts() {
            assert!(!beast.description.is_empty(), "{}", beast.id);
            assert!(!beast.ability_battle_effect.is_empty(), "{}", beast.id);
        }
        let json = serde_json::to_string(bit_beasts()).unwrap();
        assert!(json.contains("\"ability_battle_effect\""));
        assert!(json.contains("\"description\""));
    }

    #[test]
    fn test_find() {
        let beast = find("turtle-water").unwrap();
        assert_eq!(beast.element, Element::Water);
        let ability = beast.special_ability();
        assert_eq!(ability.name, "Tidal Shield");
        assert_eq!(ability.battle_effect, "Reduces opponent knockback power by 40%");
        assert!(beast.description.starts_with("An ancient turtle"));
        assert!(find("unicorn-rainbow").is_none());
    }

    #[test]
    fn test_bonding_copies_bonus() {
        let beast = find("wolf-ice").unwrap();
        let body = Body::new("Wolborg", CombatStyle::Balance, 6).unwrap().with_bit_beast(beast);
        assert_eq!(body.element, Some(Element::Ice));
        assert_eq!(body.total_power(), 9);
    }
}
