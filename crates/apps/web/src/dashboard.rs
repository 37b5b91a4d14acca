use std::path::Path;
use std::sync::Arc;

use catalog::{CountryNames, NameNormalizer};
use compute::KeyFigures;
use compute::slices::global_extent;
use formats::{Datasets, LoadError, LoadedPackage, load_datasets};
use foundation::ids::ViewId;
use foundation::time::{Year, YearRange};
use layers::{RenderContext, RenderOptions, render_view};
use runtime::{EventBus, EventKind, Metrics, RenderPass};
use scene::node::Scene;
use scene::selection::{Action, Invalidation, SelectionState, Store};
use scene::viewport::Viewports;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ConfigError, DashboardConfig};
use crate::page::RenderedPage;
use crate::query::SelectionQuery;

#[derive(Debug)]
pub enum DashboardError {
    Config(ConfigError),
    Load(LoadError),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::Config(e) => write!(f, "{e}"),
            DashboardError::Load(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DashboardError {}

impl From<ConfigError> for DashboardError {
    fn from(e: ConfigError) -> Self {
        DashboardError::Config(e)
    }
}

impl From<LoadError> for DashboardError {
    fn from(e: LoadError) -> Self {
        DashboardError::Load(e)
    }
}

/// Loaded datasets plus everything needed to start sessions over them.
///
/// Immutable once built; share it behind an `Arc` and give every viewer
/// its own [`Session`].
#[derive(Debug)]
pub struct Dashboard {
    datasets: Arc<Datasets>,
    names: CountryNames,
    fingerprint: String,
    options: RenderOptions,
    viewports: Viewports,
    selection: SelectionState,
    range_bounds: Option<YearRange>,
}

/// Key figures in the shape served as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub fingerprint: String,
    pub total_victims: u64,
    pub total_victims_text: String,
    /// Display name of the country with the most victims.
    pub dangerous_zone: Option<String>,
    pub global_impunity_rate: Option<u8>,
    pub global_impunity_rate_text: String,
    /// First and last year of the global timeline.
    pub years: Option<[Year; 2]>,
    pub countries: usize,
    pub cases: usize,
}

impl Dashboard {
    /// Loads the package at `data_root`. Every file must load.
    pub fn open(data_root: impl AsRef<Path>, config: &DashboardConfig) -> Result<Self, DashboardError> {
        let root = data_root.as_ref();
        config.validate()?;
        let package = config.package(root).map_err(LoadError::Package)?;
        let loaded = load_datasets(&package)?;
        info!(
            root = %root.display(),
            fingerprint = %loaded.fingerprint,
            regions = loaded.datasets.world.len(),
            countries = loaded.datasets.country_totals.len(),
            cases = loaded.datasets.cases.len(),
            "datasets loaded"
        );
        Ok(Self::from_loaded(loaded, config)?)
    }

    pub fn from_loaded(loaded: LoadedPackage, config: &DashboardConfig) -> Result<Self, ConfigError> {
        let range_bounds = global_extent(&loaded.datasets);
        Ok(Self {
            datasets: Arc::new(loaded.datasets),
            names: config.names()?,
            fingerprint: loaded.fingerprint,
            options: config.render_options(),
            viewports: config.viewports()?,
            selection: config.initial_selection(),
            range_bounds,
        })
    }

    pub fn datasets(&self) -> &Arc<Datasets> {
        &self.datasets
    }

    pub fn names(&self) -> &CountryNames {
        &self.names
    }

    /// Content hash of the loaded package.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn default_selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn default_viewports(&self) -> &Viewports {
        &self.viewports
    }

    /// Years the range selection is clamped to.
    pub fn range_bounds(&self) -> Option<YearRange> {
        self.range_bounds
    }

    pub fn summary(&self) -> Summary {
        let figures = KeyFigures::compute(&self.datasets);
        Summary {
            fingerprint: self.fingerprint.clone(),
            total_victims: figures.total_victims,
            total_victims_text: figures.total_victims_text(),
            dangerous_zone: figures
                .dangerous_zone
                .as_deref()
                .map(|id| self.names.to_display_name(id)),
            global_impunity_rate: figures.global_impunity_rate,
            global_impunity_rate_text: figures.impunity_rate_text(),
            years: self.range_bounds.map(|r| [r.start(), r.end()]),
            countries: self.datasets.country_totals.len(),
            cases: self.datasets.cases.len(),
        }
    }

    /// Session at the configured default selection.
    pub fn session(&self) -> Session<'_> {
        let store = Store::new(self.selection.clone(), self.viewports.clone())
            .with_range_bounds(self.range_bounds);
        Session {
            dashboard: self,
            store,
            pass: None,
            events: EventBus::new(),
            metrics: Metrics::new(),
        }
    }

    /// Session with the query's selection applied on top of the defaults.
    pub fn session_for(&self, query: &SelectionQuery) -> Session<'_> {
        let mut session = self.session();
        session.apply(query.actions(&self.selection, &self.viewports));
        session
    }
}

/// One viewer's selection and render history.
///
/// Render passes run one at a time; every method that renders takes
/// `&mut self`.
pub struct Session<'a> {
    dashboard: &'a Dashboard,
    store: Store,
    pass: Option<RenderPass>,
    events: EventBus,
    metrics: Metrics,
}

impl Session<'_> {
    pub fn selection(&self) -> &SelectionState {
        self.store.state()
    }

    pub fn viewports(&self) -> &Viewports {
        self.store.viewports()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Last pass that ran, if any.
    pub fn last_pass(&self) -> Option<&RenderPass> {
        self.pass.as_ref()
    }

    /// Renders every view.
    pub fn render_all(&mut self) -> RenderedPage {
        let pass = match &self.pass {
            None => {
                let pass = RenderPass::initial();
                self.events
                    .emit(&pass, EventKind::Loaded, self.dashboard.fingerprint.clone());
                pass
            }
            Some(prev) => prev.next(&Invalidation::all()),
        };
        self.run(pass)
    }

    /// Dispatches `action` and renders only the views it invalidated.
    /// A no-op action yields an empty page.
    pub fn handle(&mut self, action: Action) -> RenderedPage {
        let base = self.pass.clone().unwrap_or_else(RenderPass::initial);
        let invalidation = self.dispatch(&base, action);
        let next = base.next(&invalidation);
        if next.is_empty() {
            return RenderedPage::new(base.index);
        }
        self.run(next)
    }

    /// Dispatches actions without rendering; returns how many changed the
    /// selection.
    pub fn apply(&mut self, actions: impl IntoIterator<Item = Action>) -> usize {
        let base = self.pass.clone().unwrap_or_else(RenderPass::initial);
        actions
            .into_iter()
            .filter(|action| !self.dispatch(&base, action.clone()).is_empty())
            .count()
    }

    fn dispatch(&mut self, base: &RenderPass, action: Action) -> Invalidation {
        let invalidation = self.store.dispatch(action.clone());
        let next = base.next(&invalidation);
        self.events.action(&next, &action, !invalidation.is_empty());
        debug!(
            action = %runtime::describe(&action),
            invalidated = invalidation.len(),
            revision = self.store.revision(),
            "dispatch"
        );
        invalidation
    }

    /// Scene of one view for the current selection, without bookkeeping.
    pub fn render_view(&self, view: ViewId) -> Scene {
        let ctx = RenderContext {
            datasets: &self.dashboard.datasets,
            names: &self.dashboard.names,
            selection: self.store.state(),
            size: self.store.viewports().get(view),
            options: self.dashboard.options,
        };
        render_view(view, &ctx)
    }

    fn run(&mut self, pass: RenderPass) -> RenderedPage {
        let mut page = RenderedPage::new(pass.index);
        let mut placeholders = 0usize;
        for &view in &pass.views {
            let scene = self.render_view(view);
            let placeholder = scene.is_placeholder();
            placeholders += usize::from(placeholder);
            self.metrics
                .record_render(view, scene.svg_nodes().len(), placeholder);
            self.events
                .emit(&pass, EventKind::Rendered, view.container_id());
            page.insert(view, scene);
        }
        info!(
            pass = pass.index,
            views = page.len(),
            placeholders,
            "render pass"
        );
        self.pass = Some(pass);
        page
    }
}

#[cfg(test)]
mod tests {
    use super::Dashboard;
    use crate::config::DashboardConfig;
    use crate::query::SelectionQuery;
    use foundation::ids::ViewId;
    use runtime::EventKind;
    use scene::node::Scene;
    use scene::selection::Action;

    fn demo() -> Dashboard {
        let root = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/demo");
        Dashboard::open(root, &DashboardConfig::default()).unwrap()
    }

    #[test]
    fn first_pass_renders_every_view() {
        let dashboard = demo();
        let mut session = dashboard.session();
        let page = session.render_all();
        assert_eq!(page.pass, 0);
        assert_eq!(page.len(), ViewId::ALL.len());
        assert_eq!(session.events().count(EventKind::Loaded), 1);
        assert_eq!(session.metrics().total_renders(), 16);
    }

    #[test]
    fn motive_click_rerenders_motive_views_only() {
        let dashboard = demo();
        let mut session = dashboard.session();
        session.render_all();
        let page = session.handle(Action::SelectMotive("Unconfirmed".to_string()));
        let views: Vec<ViewId> = page.views().collect();
        assert_eq!(
            views,
            vec![
                ViewId::MotiveBars,
                ViewId::SelectedMotive,
                ViewId::DeathTreemap,
                ViewId::EmploymentWaffle,
                ViewId::WaffleLegend,
            ]
        );
        assert_eq!(
            page.get(ViewId::SelectedMotive),
            Some(&Scene::Text("UNCONFIRMED".to_string()))
        );
        assert_eq!(page.pass, 1);
    }

    #[test]
    fn repeated_click_renders_nothing() {
        let dashboard = demo();
        let mut session = dashboard.session();
        session.render_all();
        let page = session.handle(Action::SelectCountry("Mexico".to_string()));
        assert!(page.is_empty());
        assert_eq!(session.events().count(EventKind::Ignored), 1);
        assert_eq!(session.last_pass().map(|p| p.index), Some(0));
    }

    #[test]
    fn query_session_starts_from_the_requested_selection() {
        let dashboard = demo();
        let query = SelectionQuery::parse("country=Syria&start=2016&end=2013");
        let session = dashboard.session_for(&query);
        assert_eq!(session.selection().country, "Syria");
        assert_eq!(session.selection().range.start(), 2013);
        assert_eq!(session.selection().range.end(), 2016);
        assert_eq!(session.revision(), 2);
    }

    #[test]
    fn range_is_clamped_to_the_timeline() {
        let dashboard = demo();
        let mut session = dashboard.session();
        session.handle(Action::SelectRange {
            start: 1990.0,
            end: 2030.0,
        });
        let range = session.selection().range;
        assert_eq!((range.start(), range.end()), (2008, 2016));
    }

    #[test]
    fn summary_uses_display_names() {
        let summary = demo().summary();
        assert_eq!(summary.total_victims, 620);
        assert_eq!(summary.total_victims_text, "620+");
        assert_eq!(summary.dangerous_zone.as_deref(), Some("Syrian Arab Republic"));
        assert_eq!(summary.global_impunity_rate, Some(65));
        assert_eq!(summary.years, Some([2008, 2016]));
    }
}
