use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Board dimensions and mine count of one difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
}

impl Setting {
    pub const fn new_unchecked(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }

    pub fn new(rows: Coord, columns: Coord, mines: CellCount) -> Result<Self> {
        let setting = Self::new_unchecked(rows, columns, mines);
        setting.validate()?;
        Ok(setting)
    }

    /// Rejects boards that are empty or cannot hold a single safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::EmptyBoard);
        }
        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.columns)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.size())
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn advanced() -> Self {
        Self::new_unchecked(16, 30, 99)
    }

    pub const fn default_custom() -> Self {
        Self::new_unchecked(12, 16, 40)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Beginner,
    Intermediate,
    Advanced,
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Beginner,
        Preset::Intermediate,
        Preset::Advanced,
        Preset::Custom,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Custom => "custom",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Custom
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown preset, expected one of: beginner, intermediate, advanced, custom")]
pub struct UnknownPreset;

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownPreset)
    }
}

/// All difficulties known to the engine. Only `custom` can be edited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    beginner: Setting,
    intermediate: Setting,
    advanced: Setting,
    custom: Setting,
}

impl Settings {
    pub fn get(&self, preset: Preset) -> Setting {
        match preset {
            Preset::Beginner => self.beginner,
            Preset::Intermediate => self.intermediate,
            Preset::Advanced => self.advanced,
            Preset::Custom => self.custom,
        }
    }

    pub fn custom(&self) -> Setting {
        self.custom
    }

    pub fn iter(&self) -> impl Iterator<Item = (Preset, Setting)> + '_ {
        Preset::ALL.into_iter().map(|preset| (preset, self.get(preset)))
    }

    /// Replaces the custom difficulty, leaving it untouched when invalid.
    pub fn set_custom(&mut self, setting: Setting) -> Result<()> {
        setting.validate()?;
        self.custom = setting;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            beginner: Setting::beginner(),
            intermediate: Setting::intermediate(),
            advanced: Setting::advanced(),
            custom: Setting::default_custom(),
        }
    }
}
