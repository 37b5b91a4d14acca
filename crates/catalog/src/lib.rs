use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Country name spelled the way the tabular datasets spell it.
pub type Identifier = String;

/// One override between the two spellings of a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameOverride {
    /// Spelling used by the geographic boundary file.
    pub geo: String,
    /// Spelling used by the tabular datasets.
    pub data: String,
}

impl NameOverride {
    pub fn new(geo: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            geo: geo.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTableError {
    /// Two geographic names map to the same data identifier, so the display
    /// name of that identifier would be ambiguous.
    Ambiguous { data: String },
    /// The same geographic name appears twice.
    DuplicateGeo { geo: String },
}

impl std::fmt::Display for NameTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameTableError::Ambiguous { data } => {
                write!(f, "data identifier {data:?} is claimed by more than one name")
            }
            NameTableError::DuplicateGeo { geo } => {
                write!(f, "geographic name {geo:?} is overridden twice")
            }
        }
    }
}

impl std::error::Error for NameTableError {}

/// Bidirectional mapping between geographic and tabular country spellings.
///
/// Names that are not overridden map to themselves in both directions.
pub trait NameNormalizer {
    fn to_data_identifier(&self, geo_name: &str) -> Identifier;
    fn to_display_name(&self, identifier: &str) -> String;
}

/// Override table backed by two sorted maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryNames {
    geo_to_data: BTreeMap<String, String>,
    data_to_geo: BTreeMap<String, String>,
}

impl CountryNames {
    /// Table with no overrides: every name maps to itself.
    pub fn identity() -> Self {
        Self {
            geo_to_data: BTreeMap::new(),
            data_to_geo: BTreeMap::new(),
        }
    }

    pub fn from_overrides(
        overrides: impl IntoIterator<Item = NameOverride>,
    ) -> Result<Self, NameTableError> {
        let mut names = Self::identity();
        for NameOverride { geo, data } in overrides {
            if names.geo_to_data.contains_key(&geo) {
                return Err(NameTableError::DuplicateGeo { geo });
            }
            if names.data_to_geo.contains_key(&data) {
                return Err(NameTableError::Ambiguous { data });
            }
            names.data_to_geo.insert(data.clone(), geo.clone());
            names.geo_to_data.insert(geo, data);
        }
        Ok(names)
    }

    pub fn overrides(&self) -> impl Iterator<Item = NameOverride> + '_ {
        self.geo_to_data
            .iter()
            .map(|(geo, data)| NameOverride::new(geo.clone(), data.clone()))
    }

    pub fn len(&self) -> usize {
        self.geo_to_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geo_to_data.is_empty()
    }
}

/// Overrides between the world-atlas boundary names and the dataset names.
pub fn default_overrides() -> Vec<NameOverride> {
    vec![
        NameOverride::new("United States of America", "USA"),
        NameOverride::new("Russian Federation", "Russia"),
        NameOverride::new("Israel", "Israel and the Occupied Palestinian Territory"),
        NameOverride::new("Syrian Arab Republic", "Syria"),
    ]
}

impl Default for CountryNames {
    fn default() -> Self {
        // The built-in table has no collisions.
        Self::from_overrides(default_overrides()).unwrap_or_else(|_| Self::identity())
    }
}

impl NameNormalizer for CountryNames {
    fn to_data_identifier(&self, geo_name: &str) -> Identifier {
        self.geo_to_data
            .get(geo_name)
            .cloned()
            .unwrap_or_else(|| geo_name.to_string())
    }

    fn to_display_name(&self, identifier: &str) -> String {
        self.data_to_geo
            .get(identifier)
            .cloned()
            .unwrap_or_else(|| identifier.to_string())
    }
}
