//! Cache Category Module
//!
//! Defines the fixed set of data categories and the typed cache key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator between the category prefix and the discriminator in a storage key.
pub const KEY_SEPARATOR: char = ':';

// == Category ==
/// Classification of cached data; decides which TTL a new entry receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    TeamLogos,
    PlayerPhotos,
    LeagueData,
    LoanRosterData,
    MatchData,
}

impl Category {
    /// Every category, in policy table order.
    pub const ALL: [Category; 5] = [
        Category::TeamLogos,
        Category::PlayerPhotos,
        Category::LeagueData,
        Category::LoanRosterData,
        Category::MatchData,
    ];

    /// Name used as key prefix and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::TeamLogos => "teamLogos",
            Category::PlayerPhotos => "playerPhotos",
            Category::LeagueData => "leagueData",
            Category::LoanRosterData => "loanRosterData",
            Category::MatchData => "matchData",
        }
    }

    /// Storage key prefix including the separator, e.g. `"matchData:"`.
    pub fn key_prefix(&self) -> String {
        format!("{}{}", self.as_str(), KEY_SEPARATOR)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Category::TeamLogos => 0,
            Category::PlayerPhotos => 1,
            Category::LeagueData => 2,
            Category::LoanRosterData => 3,
            Category::MatchData => 4,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cache category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// == Cache Key ==
/// Two-part cache key: category tag plus a free-form discriminator.
///
/// Serialized for storage as `"<category>:<discriminator>"`, which keeps
/// category-scoped eviction a plain prefix match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    category: Category,
    discriminator: String,
}

impl CacheKey {
    pub fn new(category: Category, discriminator: impl Into<String>) -> Self {
        Self {
            category,
            discriminator: discriminator.into(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    /// String form used as the map key inside the store.
    pub fn to_storage_key(&self) -> String {
        self.to_string()
    }

    /// Parses a storage key back into its parts.
    ///
    /// Returns None when the prefix is not a known category.
    pub fn parse(storage_key: &str) -> Option<Self> {
        let (prefix, discriminator) = storage_key.split_once(KEY_SEPARATOR)?;
        let category = prefix.parse().ok()?;
        Some(Self::new(category, discriminator))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.category.as_str(),
            KEY_SEPARATOR,
            self.discriminator
        )
    }
}
