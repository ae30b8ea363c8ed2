// src/domain/location.rs

use chrono::NaiveDateTime;
use std::fmt;

pub const DEFAULT_COUNTRY: &str = "USA";

/// A named place properties are grouped under.
/// The triple (name, city, country) is unique in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.state, self.country)
    }
}

/// Input for creating a location, from the importer or the admin page.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub description: Option<String>,
}

impl NewLocation {
    /// Builds a location from raw text, trimming every field.
    /// Returns `None` when name, city or state is blank. A blank country
    /// falls back to [`DEFAULT_COUNTRY`].
    pub fn from_parts(
        name: &str,
        city: &str,
        state: &str,
        country: Option<&str>,
        description: Option<&str>,
    ) -> Option<Self> {
        let name = name.trim();
        let city = city.trim();
        let state = state.trim();
        if name.is_empty() || city.is_empty() || state.is_empty() {
            return None;
        }

        let country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COUNTRY);

        Some(NewLocation {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            country: country.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_parts_are_rejected() {
        assert!(NewLocation::from_parts("Miami Beach", "  ", "Florida", None, None).is_none());
        assert!(NewLocation::from_parts("", "Miami", "Florida", None, None).is_none());
        assert!(NewLocation::from_parts("Miami Beach", "Miami", "", None, None).is_none());
    }

    #[test]
    fn country_defaults_to_usa() {
        let loc = NewLocation::from_parts(" Miami Beach ", "Miami", "Florida", Some(" "), None)
            .unwrap();
        assert_eq!(loc.name, "Miami Beach");
        assert_eq!(loc.country, "USA");
        assert_eq!(loc.description, None);
    }
}
