//! Curriculum levels and the categories bound to them.

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Curriculum depth tier, 1 (foundational) through 4 (integrative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const FOUNDATIONAL: Level = Level(1);
    pub const CORE: Level = Level(2);
    pub const ADVANCED: Level = Level(3);
    pub const INTEGRATIVE: Level = Level(4);

    /// All levels in ascending order.
    pub const ALL: [Level; 4] = [
        Self::FOUNDATIONAL,
        Self::CORE,
        Self::ADVANCED,
        Self::INTEGRATIVE,
    ];

    /// Create a level, returning `None` outside 1..=4.
    pub fn new(value: u8) -> Option<Self> {
        (1..=4).contains(&value).then_some(Self(value))
    }

    /// The numeric tier.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-level tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// The level directly below, if any.
    pub fn below(self) -> Option<Self> {
        Self::new(self.0.saturating_sub(1))
    }

    /// The level directly above, if any.
    pub fn above(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Absolute tier distance between two levels.
    pub fn distance(self, other: Level) -> u8 {
        self.0.abs_diff(other.0)
    }

    /// The category every concept at this level must carry.
    pub fn category(self) -> Category {
        match self.0 {
            1 => Category::Basic,
            2 => Category::Core,
            3 => Category::Advanced,
            _ => Category::Integrated,
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value).ok_or(ModelError::InvalidLevel(value))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Concept category. Corresponds one-to-one with [`Level`].
///
/// Source datasets label categories in their authoring language; those labels
/// are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "基礎觀念")]
    Basic,
    #[serde(alias = "核心概念")]
    Core,
    #[serde(alias = "進階應用")]
    Advanced,
    #[serde(alias = "整合應用")]
    Integrated,
}

impl Category {
    /// The level this category belongs to.
    pub fn level(self) -> Level {
        match self {
            Category::Basic => Level::FOUNDATIONAL,
            Category::Core => Level::CORE,
            Category::Advanced => Level::ADVANCED,
            Category::Integrated => Level::INTEGRATIVE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Basic => "basic",
            Category::Core => "core",
            Category::Advanced => "advanced",
            Category::Integrated => "integrated",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
