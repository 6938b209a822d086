//! Recipe data structures
//!
//! Recipe identifiers arrive from two upstream providers: the external
//! catalog uses plain numeric ids, user-created recipes carry a prefixed
//! alphanumeric form. All comparisons therefore happen on a single
//! canonical representation: the trimmed string. `RecipeId` enforces this
//! at construction so membership checks cannot bypass the rule.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Canonical recipe identifier.
///
/// Construction trims whitespace and stringifies numeric ids; prefixed ids
/// pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(raw: impl fmt::Display) -> Self {
        Self(raw.to_string().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for RecipeId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for RecipeId {
    fn from(raw: u64) -> Self {
        Self::new(raw)
    }
}

impl From<i64> for RecipeId {
    fn from(raw: i64) -> Self {
        Self::new(raw)
    }
}

impl From<&RecipeId> for RecipeId {
    fn from(id: &RecipeId) -> Self {
        id.clone()
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // The list endpoints return numbers for catalog recipes and strings
        // for user-created ones.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Num(i64),
            Str(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Num(n) => RecipeId::new(n),
            RawId::Str(s) => RecipeId::new(s),
        })
    }
}

/// Recipe preview as returned by the random, search, and own-recipe
/// endpoints. This is the payload the landing-page and search caches store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    /// Like count reported by the catalog (`aggregateLikes`)
    #[serde(default, alias = "aggregateLikes")]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub gluten_free: bool,
}

/// Full recipe as returned by the info endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Search parameters for `POST /recipes/Search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intolerance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

/// Payload for creating a recipe via `POST /users/myRecipes`.
///
/// The backend files it as a family recipe when `is_family_recipe` is set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    pub vegan: bool,
    pub vegetarian: bool,
    pub gluten_free: bool,
    pub is_family_recipe: bool,
}
