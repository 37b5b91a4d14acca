use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use catalog::{CountryNames, NameOverride, NameTableError, default_overrides};
use formats::{DataPackage, DataPackageError, DatasetPaths};
use foundation::bounds::Size;
use foundation::ids::ViewId;
use foundation::time::{Year, YearRange};
use layers::RenderOptions;
use scene::selection::SelectionState;
use scene::viewport::Viewports;
use serde::{Deserialize, Serialize};

/// Largest waffle grid a config may ask for.
pub const MAX_WAFFLE_SLOTS: usize = 10_000;

/// Dashboard settings read from an optional JSON file.
///
/// Every field has a default, so `{}` is a valid configuration and a file
/// only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Replaces the dataset paths of the package manifest.
    pub files: Option<DatasetPaths>,
    /// Replaces the name of the TopoJSON object holding the countries.
    pub topology_object: Option<String>,
    /// Geo/data spelling pairs. Replaces the built-in table entirely.
    pub names: Vec<NameOverride>,
    /// Selection shown before any interaction.
    pub selection: SelectionDefaults,
    /// Container id to size, for containers that differ from the desktop
    /// layout.
    pub viewports: BTreeMap<String, Size>,
    /// Countries shown in the bubble pack.
    pub bubble_limit: usize,
    /// Cells of the employment waffle.
    pub waffle_slots: usize,
    /// Minimum share of the treemap area given to any death type.
    pub treemap_min_share: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionDefaults {
    pub country: String,
    pub motive: String,
    pub start: Year,
    pub end: Year,
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        let state = SelectionState::default();
        Self {
            country: state.country,
            motive: state.motive,
            start: state.range.start(),
            end: state.range.end(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            files: None,
            topology_object: None,
            names: default_overrides(),
            selection: SelectionDefaults::default(),
            viewports: BTreeMap::new(),
            bubble_limit: options.bubble_limit,
            waffle_slots: options.waffle_slots,
            treemap_min_share: options.treemap_min_share,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Names(NameTableError),
    UnknownContainer(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse(e) => write!(f, "invalid config: {e}"),
            ConfigError::Names(e) => write!(f, "invalid name table: {e}"),
            ConfigError::UnknownContainer(id) => write!(f, "unknown container id {id:?}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl DashboardConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let payload = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&payload)
    }

    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bubble_limit == 0 {
            return Err(ConfigError::Invalid("bubble_limit must be positive".into()));
        }
        if !(1..=MAX_WAFFLE_SLOTS).contains(&self.waffle_slots) {
            return Err(ConfigError::Invalid(format!(
                "waffle_slots {} is outside [1, {MAX_WAFFLE_SLOTS}]",
                self.waffle_slots
            )));
        }
        if !(0.0..=1.0).contains(&self.treemap_min_share) {
            return Err(ConfigError::Invalid(format!(
                "treemap_min_share {} is outside [0, 1]",
                self.treemap_min_share
            )));
        }
        for (id, size) in &self.viewports {
            if ViewId::from_container_id(id).is_none() {
                return Err(ConfigError::UnknownContainer(id.clone()));
            }
            if !(size.width.is_finite() && size.height.is_finite())
                || size.width < 0.0
                || size.height < 0.0
            {
                return Err(ConfigError::Invalid(format!("size of {id} must be non-negative")));
            }
        }
        self.names()?;
        Ok(())
    }

    pub fn names(&self) -> Result<CountryNames, ConfigError> {
        CountryNames::from_overrides(self.names.iter().cloned()).map_err(ConfigError::Names)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            bubble_limit: self.bubble_limit,
            waffle_slots: self.waffle_slots,
            treemap_min_share: self.treemap_min_share,
        }
    }

    /// Desktop layout with the configured containers resized.
    pub fn viewports(&self) -> Result<Viewports, ConfigError> {
        let mut viewports = Viewports::default();
        for (id, size) in &self.viewports {
            let view = ViewId::from_container_id(id)
                .ok_or_else(|| ConfigError::UnknownContainer(id.clone()))?;
            viewports.set(view, *size);
        }
        Ok(viewports)
    }

    pub fn initial_selection(&self) -> SelectionState {
        let s = &self.selection;
        SelectionState::new(
            s.country.clone(),
            s.motive.clone(),
            YearRange::normalized(s.start, s.end),
        )
    }

    /// Opens the data package at `root`, applying the configured path
    /// overrides to its manifest.
    pub fn package(&self, root: impl AsRef<Path>) -> Result<DataPackage, DataPackageError> {
        let package = DataPackage::load(root.as_ref())?;
        if self.files.is_none() && self.topology_object.is_none() {
            return Ok(package);
        }
        let mut manifest = package.manifest().clone();
        if let Some(files) = &self.files {
            manifest.files = files.clone();
        }
        if let Some(object) = &self.topology_object {
            manifest.topology_object = object.clone();
        }
        DataPackage::with_manifest(root, manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DashboardConfig};
    use foundation::bounds::Size;
    use foundation::ids::ViewId;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.names.len(), 4);
        assert_eq!(config.initial_selection().country, "Mexico");
        assert_eq!(config.render_options().waffle_slots, 100);
    }

    #[test]
    fn reversed_default_range_is_normalized() {
        let config = DashboardConfig::from_json(
            r#"{"selection": {"country": "Syria", "start": 2020, "end": 2012}}"#,
        )
        .unwrap();
        let sel = config.initial_selection();
        assert_eq!(sel.country, "Syria");
        assert_eq!(sel.motive, "Confirmed");
        assert_eq!((sel.range.start(), sel.range.end()), (2012, 2020));
    }

    #[test]
    fn viewport_overrides_apply_by_container_id() {
        let config =
            DashboardConfig::from_json(r#"{"viewports": {"map-viz": {"width": 480, "height": 260}}}"#)
                .unwrap();
        let viewports = config.viewports().unwrap();
        assert_eq!(viewports.get(ViewId::Map), Size::new(480.0, 260.0));
        assert_eq!(viewports.get(ViewId::StatusPie), Size::new(220.0, 220.0));
    }

    #[test]
    fn unknown_container_is_rejected() {
        let err = DashboardConfig::from_json(r#"{"viewports": {"sidebar": {"width": 1, "height": 1}}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownContainer(id) if id == "sidebar"));
    }

    #[test]
    fn ambiguous_name_table_is_rejected() {
        let err = DashboardConfig::from_json(
            r#"{"names": [{"geo": "Burma", "data": "Myanmar"}, {"geo": "Myanmar (Burma)", "data": "Myanmar"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Names(_)));
    }

    #[test]
    fn out_of_range_share_is_rejected() {
        assert!(matches!(
            DashboardConfig::from_json(r#"{"treemap_min_share": 1.5}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json(r#"{"waffle_slots": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn oversized_waffle_grid_is_rejected() {
        let err = DashboardConfig::from_json(r#"{"waffle_slots": 10001}"#).unwrap_err();
        assert!(err.to_string().contains("10001"), "{err}");
        let config = DashboardConfig::from_json(r#"{"waffle_slots": 10000}"#).unwrap();
        assert_eq!(config.render_options().waffle_slots, 10_000);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = DashboardConfig::load("/nonexistent/dossier.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dossier.json"));
    }
}
