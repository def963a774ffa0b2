//! Product category enumeration.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when resolving a [`Category`] from its name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// The name is not one of the known category names.
    #[error("unknown category: {0}")]
    Unknown(String),
}

/// Classification tag attached to every product.
///
/// The set is closed. On the wire and in the database a category is its
/// symbolic name (`"CLOTHS"`, `"FOOD"`, ...). Lookup by name is exact and
/// case-sensitive; an unknown name is an error, never [`Category::Unknown`].
///
/// ```
/// use product_catalog_core::Category;
///
/// assert_eq!(Category::from_name("FOOD"), Ok(Category::Food));
/// assert!(Category::from_name("food").is_err());
/// assert_eq!(Category::Tools.as_str(), "TOOLS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(
        type_name = "catalog.product_category",
        rename_all = "SCREAMING_SNAKE_CASE"
    )
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Not yet classified.
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Unknown,
        Self::Cloths,
        Self::Food,
        Self::Housewares,
        Self::Automotive,
        Self::Tools,
    ];

    /// The symbolic name used for serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Cloths => "CLOTHS",
            Self::Food => "FOOD",
            Self::Housewares => "HOUSEWARES",
            Self::Automotive => "AUTOMOTIVE",
            Self::Tools => "TOOLS",
        }
    }

    /// Resolve a category from its symbolic name.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError::Unknown`] if `name` is not an exact match.
    pub fn from_name(name: &str) -> Result<Self, CategoryError> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
            .ok_or_else(|| CategoryError::Unknown(name.to_owned()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup_covers_every_variant() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.as_str()), Ok(category));
        }
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        assert_eq!(
            Category::from_name("INVALID_CATEGORY"),
            Err(CategoryError::Unknown("INVALID_CATEGORY".to_string()))
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!("cloths".parse::<Category>().is_err());
        assert!(" CLOTHS".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_symbolic_name() {
        let json = serde_json::to_string(&Category::Housewares).unwrap();
        assert_eq!(json, "\"HOUSEWARES\"");

        let parsed: Category = serde_json::from_str("\"AUTOMOTIVE\"").unwrap();
        assert_eq!(parsed, Category::Automotive);
        assert!(serde_json::from_str::<Category>("\"SHOES\"").is_err());
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(format!("{}", Category::Cloths), "CLOTHS");
        assert_eq!(Category::default(), Category::Unknown);
    }

    #[test]
    fn test_error_display() {
        let err = Category::from_name("SHOES").unwrap_err();
        assert_eq!(err.to_string(), "unknown category: SHOES");
    }
}
