//! The six core attributes

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Body,
    Quickness,
    Strength,
    Charisma,
    Intelligence,
    Willpower,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Body,
        Attribute::Quickness,
        Attribute::Strength,
        Attribute::Charisma,
        Attribute::Intelligence,
        Attribute::Willpower,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Body => "Body",
            Attribute::Quickness => "Quickness",
            Attribute::Strength => "Strength",
            Attribute::Charisma => "Charisma",
            Attribute::Intelligence => "Intelligence",
            Attribute::Willpower => "Willpower",
        }
    }

    pub fn from_name(name: &str) -> Option<Attribute> {
        Attribute::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }
}

/// Attribute values, indexed by `Attribute`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes([i32; 6]);

impl Attributes {
    pub fn new(values: [i32; 6]) -> Self {
        Self(values)
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        self.0[attribute.index()]
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        self.0[attribute.index()] = value;
    }

    pub fn values(&self) -> [i32; 6] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_order() {
        for (i, attr) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attr.index(), i);
        }
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(Attribute::from_name("strength"), Some(Attribute::Strength));
        assert_eq!(Attribute::from_name("WILLPOWER"), Some(Attribute::Willpower));
        assert_eq!(Attribute::from_name("Luck"), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut attrs = Attributes::default();
        attrs.set(Attribute::Quickness, 4);
        assert_eq!(attrs.get(Attribute::Quickness), 4);
        assert_eq!(attrs.get(Attribute::Body), 0);
    }
}
