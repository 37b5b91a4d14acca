//! Dashboard controller: loads a data package, keeps one selection store
//! per session and turns render passes into pages.

pub mod config;
pub mod dashboard;
pub mod page;
pub mod query;

pub use config::{ConfigError, DashboardConfig, SelectionDefaults};
pub use dashboard::{Dashboard, DashboardError, Session, Summary};
pub use page::{RenderedPage, Shell, error_page, page_shell};
pub use query::{QueryLinks, SelectionQuery};

/// Title of the rendered page.
pub const PAGE_TITLE: &str = "DOSSIER: JOURNALISTS KILLED";
