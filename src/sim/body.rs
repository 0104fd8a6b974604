//! Battling bodies and their combat styles

use serde::{Deserialize, Serialize};

use super::ability::{Element, SpecialAbility};
use crate::error::BattleError;
use crate::roster::BitBeast;

/// Combat archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatStyle {
    Attack,
    Defense,
    Stamina,
    /// Also the fallback for unrecognised styles: no collision modifier
    #[default]
    Balance,
}

impl CombatStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombatStyle::Attack => "attack",
            CombatStyle::Defense => "defense",
            CombatStyle::Stamina => "stamina",
            CombatStyle::Balance => "balance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "attack" => Some(CombatStyle::Attack),
            "defense" | "defence" => Some(CombatStyle::Defense),
            "stamina" => Some(CombatStyle::Stamina),
            "balance" => Some(CombatStyle::Balance),
            _ => None,
        }
    }

    /// Parse leniently: anything unknown behaves as Balance
    pub fn parse_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown combat style '{s}', treating as balance");
            CombatStyle::Balance
        })
    }
}

/// One of the two combatants. Immutable for the duration of a battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub name: String,
    pub style: CombatStyle,
    /// 1-10
    pub power: u8,
    pub element: Option<Element>,
    pub special_ability: Option<SpecialAbility>,
    /// 0-3, only consulted when breaking ties
    pub power_bonus: u8,
}

impl Body {
    /// Validated constructor for a plain body without affinity
    pub fn new(
        name: impl Into<String>,
        style: CombatStyle,
        power: u8,
    ) -> Result<Self, BattleError> {
        let body = Self {
            name: name.into(),
            style,
            power,
            element: None,
            special_ability: None,
            power_bonus: 0,
        };
        body.validate()?;
        Ok(body)
    }

    /// Bond with a bit-beast: takes its element, ability and power bonus
    pub fn with_bit_beast(mut self, beast: &BitBeast) -> Self {
        self.element = Some(beast.element);
        self.special_ability = Some(beast.special_ability());
        self.power_bonus = beast.power_bonus;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_special_ability(mut self, ability: SpecialAbility) -> Self {
        self.special_ability = Some(ability);
        self
    }

    pub fn with_power_bonus(mut self, bonus: u8) -> Self {
        self.power_bonus = bonus;
        self
    }

    /// Parse and validate a body from its JSON definition
    pub fn from_json(json: &str) -> Result<Self, BattleError> {
        let def: BodyDef = serde_json::from_str(json).map_err(BattleError::InvalidDefinition)?;
        Self::try_from(def)
    }

    /// Power as a float for physics
    #[inline]
    pub fn power_f(&self) -> f32 {
        f32::from(self.power)
    }

    /// Power plus bit-beast bonus, used as the second tie-break
    pub fn total_power(&self) -> u16 {
        u16::from(self.power) + u16::from(self.power_bonus)
    }

    pub fn validate(&self) -> Result<(), BattleError> {
        if self.name.trim().is_empty() {
            return Err(BattleError::EmptyName);
        }
        if !(1..=10).contains(&self.power) {
            return Err(BattleError::PowerOutOfRange {
                name: self.name.clone(),
                power: self.power,
            });
        }
        if self.power_bonus > 3 {
            return Err(BattleError::PowerBonusOutOfRange {
                name: self.name.clone(),
                bonus: self.power_bonus,
            });
        }
        if let Some(ability) = &self.special_ability {
            let t = ability.activation_threshold;
            if !(0.0..=10.0).contains(&t) {
                return Err(BattleError::ThresholdOutOfRange {
                    ability: ability.name.clone(),
                    threshold: t,
                });
            }
        }
        Ok(())
    }
}

/// Body definition as supplied by the customisation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDef {
    pub name: String,
    #[serde(alias = "type", alias = "combatStyle")]
    pub style: String,
    pub power: u8,
    #[serde(default, alias = "elementalAffinity")]
    pub element: Option<String>,
    #[serde(default, alias = "specialAbility")]
    pub special_ability: Option<SpecialAbility>,
    #[serde(default, alias = "powerBonus")]
    pub power_bonus: u8,
}

impl TryFrom<BodyDef> for Body {
    type Error = BattleError;

    fn try_from(def: BodyDef) -> Result<Self, Self::Error> {
        let element = def.element.as_deref().and_then(|raw| {
            let parsed = Element::from_str(raw);
            if parsed.is_none() {
                log::warn!("Unknown element '{raw}' on '{}', ignoring", def.name);
            }
            parsed
        });
        let body = Body {
            style: CombatStyle::parse_lenient(&def.style),
            name: def.name,
            power: def.power,
            element,
            special_ability: def.special_ability,
            power_bonus: def.power_bonus,
        };
        body.validate()?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_full() {
        let body = Body::from_json(
            r#"{
                "name": "Dranzer",
                "type": "attack",
                "power": 8,
                "elementalAffinity": "fire",
                "specialAbility": { "name": "Blaze Rush", "activation_threshold": 7 },
                "powerBonus": 3
            }"#,
        )
        .unwrap();
        assert_eq!(body.style, CombatStyle::Attack);
        assert_eq!(body.element, Some(Element::Fire));
        assert_eq!(body.total_power(), 11);
        assert_eq!(body.special_ability.unwrap().activation_threshold, 7.0);
    }

    #[test]
    fn test_unknown_style_and_element_fall_back() {
        let body = Body::from_json(
            r#"{ "name": "Oddball", "style": "wobble", "power": 5, "element": "plasma" }"#,
        )
        .unwrap();
        assert_eq!(body.style, CombatStyle::Balance);
        assert_eq!(body.element, None);
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = Body::from_json(r#"{ "name": "NoPower", "style": "attack" }"#).unwrap_err();
        assert!(matches!(err, BattleError::InvalidDefinition(_)));
    }

    #[test]
    fn test_power_range() {
        assert!(matches!(
            Body::new("Zero", CombatStyle::Attack, 0),
            Err(BattleError::PowerOutOfRange { power: 0, .. })
        ));
        assert!(Body::new("Eleven", CombatStyle::Attack, 11).is_err());
        assert!(Body::new("Ten", CombatStyle::Attack, 10).is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            Body::new("  ", CombatStyle::Defense, 5),
            Err(BattleError::EmptyName)
        ));
    }

    #[test]
    fn test_threshold_range() {
        let body = Body::new("Seer", CombatStyle::Stamina, 5)
            .unwrap()
            .with_special_ability(SpecialAbility::new("Overreach", "", 11.0));
        assert!(matches!(
            body.validate(),
            Err(BattleError::ThresholdOutOfRange { .. })
        ));
    }

    #[test]
    fn test_style_parse() {
        assert_eq!(CombatStyle::from_str("Defence"), Some(CombatStyle::Defense));
        assert_eq!(CombatStyle::from_str("spin"), None);
    }
}
