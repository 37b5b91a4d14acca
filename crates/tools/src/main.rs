use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use formats::DataPackage;
use scene::svg::NoLinks;
use tracing::info;
use tracing_subscriber::EnvFilter;
use web::{Dashboard, DashboardConfig, PAGE_TITLE, SelectionQuery, Shell, page_shell};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render the press-freedom dossier from its datasets")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the whole page to static HTML
    Render {
        /// Directory holding the data package
        #[arg(long)]
        data_root: PathBuf,

        /// Dashboard config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Selected country, as spelled in the tables
        #[arg(long)]
        country: Option<String>,

        /// Selected motive
        #[arg(long)]
        motive: Option<String>,

        /// Year range START:END, either order
        #[arg(long, value_parser = parse_range)]
        range: Option<(f64, f64)>,

        /// Page width in pixels; scales the default layout
        #[arg(long)]
        width: Option<f64>,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the key figures as JSON
    Summary {
        #[arg(long)]
        data_root: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the content hash of the data package
    Fingerprint {
        #[arg(long)]
        data_root: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();
    match args.command {
        Command::Render {
            data_root,
            config,
            country,
            motive,
            range,
            width,
            out,
        } => {
            let query = SelectionQuery {
                country,
                motive,
                start: range.map(|r| r.0),
                end: range.map(|r| r.1),
                width,
            };
            cmd_render(&data_root, config.as_deref(), &query, out.as_deref())
        }
        Command::Summary { data_root, config } => cmd_summary(&data_root, config.as_deref()),
        Command::Fingerprint { data_root, config } => {
            cmd_fingerprint(&data_root, config.as_deref())
        }
    }
}

fn open(data_root: &Path, config: Option<&Path>) -> Result<Dashboard, String> {
    let config = DashboardConfig::load_optional(config).map_err(|e| e.to_string())?;
    Dashboard::open(data_root, &config).map_err(|e| e.to_string())
}

fn cmd_render(
    data_root: &Path,
    config: Option<&Path>,
    query: &SelectionQuery,
    out: Option<&Path>,
) -> Result<(), String> {
    let dashboard = open(data_root, config)?;
    let mut session = dashboard.session_for(query);
    let page = session.render_all();
    let html = page_shell(
        &page,
        &Shell {
            title: PAGE_TITLE,
            selection: session.selection(),
            links: &NoLinks,
            form_action: None,
        },
    );

    let selection = session.selection();
    info!(
        country = %selection.country,
        motive = %selection.motive,
        range = %selection.range,
        views = page.len(),
        "page rendered"
    );

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| format!("create {parent:?}: {e}"))?;
            }
            fs::write(path, html).map_err(|e| format!("write {path:?}: {e}"))?;
            info!(path = %path.display(), "wrote page");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .map_err(|e| format!("write stdout: {e}"))?;
        }
    }
    Ok(())
}

fn cmd_summary(data_root: &Path, config: Option<&Path>) -> Result<(), String> {
    let dashboard = open(data_root, config)?;
    let json = serde_json::to_string_pretty(&dashboard.summary())
        .map_err(|e| format!("serialize summary: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_fingerprint(data_root: &Path, config: Option<&Path>) -> Result<(), String> {
    let config = DashboardConfig::load_optional(config).map_err(|e| e.to_string())?;
    let package: DataPackage = config.package(data_root).map_err(|e| e.to_string())?;
    let files = package.read_files().map_err(|e| e.to_string())?;
    println!("{}", files.fingerprint());
    Ok(())
}

/// `START:END`, fractional years allowed, either order.
fn parse_range(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| format!("range must be START:END, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite())
            .ok_or_else(|| format!("invalid year {v:?}"))
    };
    Ok((parse(a)?, parse(b)?))
}
