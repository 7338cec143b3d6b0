//! Temperature categories, color scheme, and landscape/sky scenes.
//!
//! This module maps a Fahrenheit reading to a named category and the
//! category to the presentation values (color token and emoji landscape),
//! plus the user-selectable sky scenes. All lookups are exhaustive matches
//! over closed enums so a missing case fails to compile instead of
//! silently rendering nothing.

use serde::{Deserialize, Serialize};

/// City shown before the user types anything.
pub const DEFAULT_CITY: &str = "Seattle";

/// Sky selected at startup.
pub const DEFAULT_SKY: SkySelection = SkySelection::Sunny;

/// Temperature band derived from a Fahrenheit reading.
///
/// Bands are half-open and partition the integer line:
/// cold < 50 <= cool < 60 <= warm < 70 <= hot < 80 <= very hot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Cold,
    Cool,
    Warm,
    Hot,
    VeryHot,
}

/// Classifies a Fahrenheit reading into its temperature band.
///
/// Total over all `i32` values: the ordered thresholds [50, 60, 70, 80]
/// are checked in increasing order and anything at or above 80 is
/// `VeryHot`.
pub fn classify(temp_f: i32) -> Category {
    if temp_f < 50 {
        Category::Cold
    } else if temp_f < 60 {
        Category::Cool
    } else if temp_f < 70 {
        Category::Warm
    } else if temp_f < 80 {
        Category::Hot
    } else {
        Category::VeryHot
    }
}

/// Color associated with a temperature band.
///
/// Kept UI-agnostic; the render layer maps tokens to terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    Teal,
    Green,
    Yellow,
    Orange,
    Red,
}

/// Returns the color token for a temperature band.
pub fn color_for(category: Category) -> ColorToken {
    match category {
        Category::Cold => ColorToken::Teal,
        Category::Cool => ColorToken::Green,
        Category::Warm => ColorToken::Yellow,
        Category::Hot => ColorToken::Orange,
        Category::VeryHot => ColorToken::Red,
    }
}

const COLD_SCENE: &str = "🌲🌲⛄️🌲⛄️🍂🌲🍁🌲🌲⛄️🍂🌲";
const COOL_SCENE: &str = "🌾🌾_🍃_🪨__🛤_🌾🌾🌾_🍃";
const WARM_SCENE: &str = "🌸🌿🌼__🌷🌻🌿_☘️🌱_🌻🌷";
const HOT_SCENE: &str = "🌵__🐍_🦂_🌵🌵__🐍_🏜_🦂";

/// Returns the emoji landscape scene for a temperature band.
///
/// There is no dedicated very-hot scene; `VeryHot` reuses the hot
/// (desert) scene so the landscape panel is never empty.
pub fn landscape_for(category: Category) -> &'static str {
    match category {
        Category::Cold => COLD_SCENE,
        Category::Cool => COOL_SCENE,
        Category::Warm => WARM_SCENE,
        Category::Hot | Category::VeryHot => HOT_SCENE,
    }
}

/// Sky scene chosen by the user, independent of temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkySelection {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl SkySelection {
    /// Returns a slice containing all sky variants, in selector order.
    pub fn all() -> &'static [SkySelection] {
        &[
            SkySelection::Sunny,
            SkySelection::Cloudy,
            SkySelection::Rainy,
            SkySelection::Snowy,
        ]
    }

    /// Returns a human-readable display label for the sky.
    pub fn label(&self) -> &'static str {
        match self {
            SkySelection::Sunny => "Sunny",
            SkySelection::Cloudy => "Cloudy",
            SkySelection::Rainy => "Rainy",
            SkySelection::Snowy => "Snowy",
        }
    }

    /// Parses user input into a SkySelection.
    ///
    /// Matching is case-insensitive: "sunny" | "sun" -> Sunny,
    /// "cloudy" | "clouds" -> Cloudy, "rainy" | "rain" -> Rainy,
    /// "snowy" | "snow" -> Snowy. Returns `None` otherwise.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<SkySelection> {
        match s.to_lowercase().trim() {
            "sunny" | "sun" => Some(SkySelection::Sunny),
            "cloudy" | "clouds" => Some(SkySelection::Cloudy),
            "rainy" | "rain" => Some(SkySelection::Rainy),
            "snowy" | "snow" => Some(SkySelection::Snowy),
            _ => None,
        }
    }
}

/// Returns the emoji sky scene for a selection.
pub fn sky_scene_for(selection: SkySelection) -> &'static str {
    match selection {
        SkySelection::Sunny => "☁️ ☁️ ☁️ ☀️ ☁️ ☁️",
        SkySelection::Cloudy => "☁️☁️ ☁️ ☁️☁️ ☁️ 🌤 ☁️ ☁️☁️",
        SkySelection::Rainy => "🌧🌈⛈🌧🌧💧⛈🌧🌦🌧💧🌧🌧",
        SkySelection::Snowy => "🌨❄️🌨🌨❄️❄️🌨❄️🌨❄️❄️🌨🌨",
    }
}
