use serde::{Deserialize, Serialize};

pub const MANIFEST_VERSION: &str = "1.0";

/// Where each dataset of a data package lives, relative to the package root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataManifest {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub files: DatasetPaths,
    /// Name of the GeometryCollection holding the country outlines.
    #[serde(default = "default_topology_object")]
    pub topology_object: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetPaths {
    pub topology: String,
    pub country_totals: String,
    pub country_timeline: String,
    pub impunity: String,
    pub motive_overview: String,
    pub death_types: String,
    pub employment: String,
    pub global_timeline: String,
    pub bubbles: String,
    pub status_by_year: String,
    pub cases: String,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            topology: "countries-110m.json".to_string(),
            country_totals: "Data/Block 1/map_country_total.csv".to_string(),
            country_timeline: "Data/Block 1/timeline_country.csv".to_string(),
            impunity: "Data/Block 1/impunity_country.csv".to_string(),
            motive_overview: "Data/Block 2/motive_overview.csv".to_string(),
            death_types: "Data/Block 2/motive_type_of_death.csv".to_string(),
            employment: "Data/Block 2/motive_employment.csv".to_string(),
            global_timeline: "Data/block3/timeline_global.csv".to_string(),
            bubbles: "Data/block3/bubble_country_year.csv".to_string(),
            status_by_year: "Data/block3/status_year.csv".to_string(),
            cases: "Data/block3/beeswarm_raw.csv".to_string(),
        }
    }
}

impl DatasetPaths {
    /// All paths in load order, labelled by dataset.
    pub fn entries(&self) -> [(&'static str, &str); 11] {
        [
            ("topology", &self.topology),
            ("country_totals", &self.country_totals),
            ("country_timeline", &self.country_timeline),
            ("impunity", &self.impunity),
            ("motive_overview", &self.motive_overview),
            ("death_types", &self.death_types),
            ("employment", &self.employment),
            ("global_timeline", &self.global_timeline),
            ("bubbles", &self.bubbles),
            ("status_by_year", &self.status_by_year),
            ("cases", &self.cases),
        ]
    }
}

fn default_topology_object() -> String {
    "countries".to_string()
}

impl DataManifest {
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            name: None,
            files: DatasetPaths::default(),
            topology_object: default_topology_object(),
        }
    }
}

impl Default for DataManifest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{DataManifest, MANIFEST_VERSION};

    #[test]
    fn partial_manifest_fills_defaults() {
        let m: DataManifest = serde_json::from_str(
            r#"{"version": "1.0", "files": {"topology": "world.json"}}"#,
        )
        .unwrap();
        assert_eq!(m.version, MANIFEST_VERSION);
        assert_eq!(m.files.topology, "world.json");
        assert_eq!(m.files.cases, "Data/block3/beeswarm_raw.csv");
        assert_eq!(m.topology_object, "countries");
    }

    #[test]
    fn entries_cover_every_dataset() {
        let m = DataManifest::new();
        let labels: Vec<&str> = m.files.entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels.len(), 11);
        assert_eq!(labels[0], "topology");
    }
}
