//! City value objects
//!
//! A city is a human-readable label plus a slug derived from it. The slug is the
//! key used by mappings, catalogs and downstream lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Slug reserved for free-text "other" intake elsewhere in the application.
pub const RESERVED_CITY_SLUG: &str = "other";

/// Maximum length for a city label
const MAX_CITY_LABEL_LENGTH: usize = 120;

/// Derive the key-safe slug for a city label.
///
/// Lowercases the input, collapses every run of non-alphanumeric characters into
/// a single `-`, and strips leading/trailing hyphens. Idempotent.
///
/// # Examples
///
/// ```
/// use regionmap_domain::value_objects::slugify;
///
/// assert_eq!(slugify("Sault Ste. Marie"), "sault-ste-marie");
/// assert_eq!(slugify("  Other "), "other");
/// assert_eq!(slugify(&slugify("Niagara-on-the-Lake")), "niagara-on-the-lake");
/// ```
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_hyphen = false;

    for c in label.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

// ============================================================================
// CitySlug
// ============================================================================

/// A canonical city slug (non-empty, already in `slugify` form).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CitySlug(String);

impl CitySlug {
    /// Accept an existing slug.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the value is empty or not canonical.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("City value cannot be empty"));
        }
        if slugify(&value) != value {
            return Err(DomainError::validation(format!(
                "City value '{}' is not a valid slug",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Derive the slug for a label.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the label has no alphanumeric content.
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        let slug = slugify(label);
        if slug.is_empty() {
            return Err(DomainError::validation(
                "City name must contain at least one letter or digit",
            ));
        }
        Ok(Self(slug))
    }

    pub fn is_reserved(&self) -> bool {
        self.0 == RESERVED_CITY_SLUG
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CitySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CitySlug {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CitySlug> for String {
    fn from(slug: CitySlug) -> String {
        slug.0
    }
}

impl std::borrow::Borrow<str> for CitySlug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// City
// ============================================================================

/// A city known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct City {
    label: String,
    value: CitySlug,
}

impl City {
    /// Build a city from a stored `(label, value)` pair.
    ///
    /// The value must be the slug of the label; a pair that disagrees is rejected
    /// rather than silently re-keyed.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Result<Self, DomainError> {
        let label = validate_label(label.into())?;
        let value = CitySlug::new(value)?;
        if slugify(&label) != value.as_str() {
            return Err(DomainError::validation(format!(
                "City value '{}' does not match label '{}'",
                value, label
            )));
        }
        Ok(Self { label, value })
    }

    /// Build a city from its label, deriving the slug.
    pub fn from_label(label: impl Into<String>) -> Result<Self, DomainError> {
        let label = validate_label(label.into())?;
        let value = CitySlug::from_label(&label)?;
        Ok(Self { label, value })
    }

    /// Build an admin-entered city. Same as [`City::from_label`] but refuses the
    /// reserved `other` slug.
    pub fn custom(label: impl Into<String>) -> Result<Self, DomainError> {
        let city = Self::from_label(label)?;
        if city.value.is_reserved() {
            return Err(DomainError::constraint(format!(
                "'{}' is reserved and cannot be added as a city",
                RESERVED_CITY_SLUG
            )));
        }
        Ok(city)
    }

    /// Fallback for a slug with no known label: the slug itself is the label.
    pub fn from_slug(value: CitySlug) -> Self {
        Self {
            label: value.as_str().to_string(),
            value,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &CitySlug {
        &self.value
    }
}

fn validate_label(label: String) -> Result<String, DomainError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("City name cannot be empty"));
    }
    if trimmed.chars().count() > MAX_CITY_LABEL_LENGTH {
        return Err(DomainError::validation(format!(
            "City name cannot exceed {} characters",
            MAX_CITY_LABEL_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_runs_and_strips_edges() {
        assert_eq!(slugify("Toronto"), "toronto");
        assert_eq!(slugify("  St. Catharines  "), "st-catharines");
        assert_eq!(slugify("Kawartha -- Lakes"), "kawartha-lakes");
        assert_eq!(slugify("--Ajax--"), "ajax");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_is_idempotent() {
        for label in [
            "Toronto",
            "Sault Ste. Marie",
            "Niagara-on-the-Lake",
            "  Other ",
            "Greater Sudbury / Grand Sudbury",
            "Trois-Rivières",
            "",
        ] {
            let once = slugify(label);
            assert_eq!(slugify(&once), once, "label {label:?}");
        }
    }

    #[test]
    fn slugify_only_yields_other_for_other() {
        assert_eq!(slugify("Other "), RESERVED_CITY_SLUG);
        assert_eq!(slugify("OTHER"), RESERVED_CITY_SLUG);
        assert_ne!(slugify("Otherville"), RESERVED_CITY_SLUG);
        assert_ne!(slugify("Other Town"), RESERVED_CITY_SLUG);
    }

    #[test]
    fn city_slug_requires_canonical_form() {
        assert!(CitySlug::new("north-bay").is_ok());
        assert!(CitySlug::new("North Bay").is_err());
        assert!(CitySlug::new("-north-bay").is_err());
        assert!(CitySlug::new("").is_err());
    }

    #[test]
    fn city_new_rejects_mismatched_pair() {
        assert!(City::new("North Bay", "north-bay").is_ok());
        assert!(City::new("North Bay", "timmins").is_err());
        assert!(City::new("  ", "x").is_err());
    }

    #[test]
    fn city_custom_rejects_reserved_slug() {
        let err = City::custom("Other ").unwrap_err();
        assert!(matches!(err, DomainError::Constraint(_)));
        assert!(City::custom("Otherville").is_ok());
    }

    #[test]
    fn city_from_label_trims() {
        let city = City::from_label("  Barrie ").unwrap();
        assert_eq!(city.label(), "Barrie");
        assert_eq!(city.value().as_str(), "barrie");
    }

    #[test]
    fn city_from_label_without_alphanumerics_is_rejected() {
        assert!(City::from_label("---").is_err());
    }

    #[test]
    fn city_serializes_as_label_value_pair() {
        let city = City::from_label("Thunder Bay").unwrap();
        let json = serde_json::to_value(&city).unwrap();
        assert_eq!(json["label"], "Thunder Bay");
        assert_eq!(json["value"], "thunder-bay");
    }
}
