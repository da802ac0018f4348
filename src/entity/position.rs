use serde::{Deserialize, Serialize};

/// Body posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    None,
    Lie,
    Sit,
    Stand,
    Use,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::None,
        Position::Lie,
        Position::Sit,
        Position::Stand,
        Position::Use,
    ];

    /// Token written to save files
    pub fn token(&self) -> &'static str {
        match self {
            Position::None => "NONE",
            Position::Lie => "LIE",
            Position::Sit => "SIT",
            Position::Stand => "STAND",
            Position::Use => "USE",
        }
    }

    pub fn from_token(token: &str) -> Option<Position> {
        Position::ALL.into_iter().find(|p| p.token() == token)
    }

    /// Legacy saves stored the position as its ordinal
    pub fn from_raw(raw: i64) -> Option<Position> {
        usize::try_from(raw)
            .ok()
            .and_then(|i| Position::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    None,
    Male,
    Female,
    Neuter,
}

impl Gender {
    pub fn code(&self) -> char {
        match self {
            Gender::None => '-',
            Gender::Male => 'M',
            Gender::Female => 'F',
            Gender::Neuter => 'N',
        }
    }

    pub fn from_code(code: char) -> Option<Gender> {
        match code {
            '-' => Some(Gender::None),
            'M' => Some(Gender::Male),
            'F' => Some(Gender::Female),
            'N' => Some(Gender::Neuter),
            _ => None,
        }
    }
}
