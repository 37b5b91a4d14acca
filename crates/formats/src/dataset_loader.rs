use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::data_package::{DataPackage, DataPackageError, FileReadError, PackageFiles};
use crate::records::{
    CaseRecord, CountryCount, DeathTypeRecord, EmploymentRecord, GlobalTimelineRow,
    ImpunityRecord, MotiveRecord, StatusYearRecord, TimelinePoint,
};
use crate::table::{ParseError, Record, ensure_unique, parse_table};
use crate::topology::{CountryShape, TopologyError, decode_countries};

/// Every dataset the page needs, parsed and validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    pub world: Vec<CountryShape>,
    pub country_totals: Vec<CountryCount>,
    pub country_timeline: Vec<TimelinePoint>,
    pub impunity: Vec<ImpunityRecord>,
    pub motives: Vec<MotiveRecord>,
    pub death_types: Vec<DeathTypeRecord>,
    pub employment: Vec<EmploymentRecord>,
    pub global_timeline: Vec<TimelinePoint>,
    pub bubbles: Vec<TimelinePoint>,
    pub status_by_year: Vec<StatusYearRecord>,
    pub cases: Vec<CaseRecord>,
}

/// Datasets plus the content hash of the files they came from.
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    pub datasets: Datasets,
    pub fingerprint: String,
}

#[derive(Debug)]
pub enum LoadError {
    Package(DataPackageError),
    Read(FileReadError),
    Table {
        dataset: &'static str,
        path: PathBuf,
        source: ParseError,
    },
    Topology {
        path: PathBuf,
        source: TopologyError,
    },
    NotUtf8 {
        path: PathBuf,
    },
    UnknownMotive {
        dataset: &'static str,
        motive: String,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Package(e) => write!(f, "data package error: {e}"),
            LoadError::Read(e) => write!(f, "{e}"),
            LoadError::Table {
                dataset,
                path,
                source,
            } => write!(f, "failed to parse {dataset} ({}): {source}", path.display()),
            LoadError::Topology { path, source } => {
                write!(f, "failed to decode topology {}: {source}", path.display())
            }
            LoadError::NotUtf8 { path } => write!(f, "{} is not valid UTF-8", path.display()),
            LoadError::UnknownMotive { dataset, motive } => {
                write!(f, "{dataset} references motive {motive:?} missing from the overview")
            }
        }
    }
}

impl std::error::Error for LoadError {}

pub fn load_datasets_from_dir(root: impl AsRef<Path>) -> Result<LoadedPackage, LoadError> {
    let package = DataPackage::load(root).map_err(LoadError::Package)?;
    load_datasets(&package)
}

/// Reads and parses the whole package. All files must load; the first
/// failure aborts the load.
pub fn load_datasets(package: &DataPackage) -> Result<LoadedPackage, LoadError> {
    let files = package.read_files().map_err(LoadError::Read)?;
    let datasets = parse_datasets(&files, &package.manifest().topology_object)?;
    Ok(LoadedPackage {
        datasets,
        fingerprint: files.fingerprint(),
    })
}

pub fn parse_datasets(files: &PackageFiles, topology_object: &str) -> Result<Datasets, LoadError> {
    let topo = file(files, "topology")?;
    let payload = std::str::from_utf8(&topo.bytes).map_err(|_| LoadError::NotUtf8 {
        path: topo.path.clone(),
    })?;
    let world = decode_countries(payload, topology_object).map_err(|source| {
        LoadError::Topology {
            path: topo.path.clone(),
            source,
        }
    })?;

    let country_totals: Vec<CountryCount> = table(files, "country_totals")?;
    check(files, "country_totals", ensure_unique(&country_totals, |r| r.country.clone()))?;

    let impunity: Vec<ImpunityRecord> = table(files, "impunity")?;
    check(
        files,
        "impunity",
        ensure_unique(&impunity, |r| (r.country.clone(), r.case_type)),
    )?;

    let motives: Vec<MotiveRecord> = table(files, "motive_overview")?;
    let death_types: Vec<DeathTypeRecord> = table(files, "death_types")?;
    let employment: Vec<EmploymentRecord> = table(files, "employment")?;

    let known: HashSet<&str> = motives.iter().map(|m| m.motive.as_str()).collect();
    if let Some(d) = death_types.iter().find(|d| !known.contains(d.motive.as_str())) {
        return Err(LoadError::UnknownMotive {
            dataset: "death_types",
            motive: d.motive.clone(),
        });
    }
    if let Some(e) = employment.iter().find(|e| !known.contains(e.motive.as_str())) {
        return Err(LoadError::UnknownMotive {
            dataset: "employment",
            motive: e.motive.clone(),
        });
    }

    let global_rows: Vec<GlobalTimelineRow> = table(files, "global_timeline")?;

    Ok(Datasets {
        world,
        country_totals,
        country_timeline: table(files, "country_timeline")?,
        impunity,
        motives,
        death_types,
        employment,
        global_timeline: global_rows.into_iter().map(TimelinePoint::from).collect(),
        bubbles: table(files, "bubbles")?,
        status_by_year: table(files, "status_by_year")?,
        cases: table(files, "cases")?,
    })
}

fn file<'a>(
    files: &'a PackageFiles,
    dataset: &'static str,
) -> Result<&'a crate::data_package::PackageFile, LoadError> {
    files.get(dataset).ok_or_else(|| LoadError::Table {
        dataset,
        path: PathBuf::new(),
        source: ParseError::Malformed("dataset not read".to_string()),
    })
}

fn table<R: Record>(files: &PackageFiles, dataset: &'static str) -> Result<Vec<R>, LoadError> {
    let f = file(files, dataset)?;
    parse_table(f.bytes.as_slice()).map_err(|source| LoadError::Table {
        dataset,
        path: f.path.clone(),
        source,
    })
}

fn check(
    files: &PackageFiles,
    dataset: &'static str,
    result: Result<(), ParseError>,
) -> Result<(), LoadError> {
    result.map_err(|source| LoadError::Table {
        dataset,
        path: files
            .get(dataset)
            .map(|f| f.path.clone())
            .unwrap_or_default(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{LoadError, parse_datasets};
    use crate::data_package::{PackageFile, PackageFiles};
    use crate::records::GLOBAL_COUNTRY;
    use crate::table::ParseError;
    use std::path::PathBuf;

    const TOPO: &str = r#"{"type":"Topology","objects":{"countries":{"type":"GeometryCollection","geometries":[]}},"arcs":[]}"#;

    fn files(overrides: &[(&'static str, &str)]) -> PackageFiles {
        let defaults: [(&'static str, &str); 11] = [
            ("topology", TOPO),
            ("country_totals", "country,killed_count\nMexico,12\n"),
            ("country_timeline", "country,year,killed_count\nMexico,2012,3\n"),
            ("impunity", "country,case_type,count\nMexico,confirmed,10\nMexico,unconfirmed,40\n"),
            ("motive_overview", "motive,killed_count\nConfirmed,500\nUnconfirmed,120\n"),
            ("death_types", "motive,type_of_death,count\nConfirmed,Murder,300\n"),
            ("employment", "motive,employment_type,count\nConfirmed,staff,70\n"),
            ("global_timeline", "year,killed_count\n2011,40\n2012,70\n"),
            ("bubbles", "country,year,killed_count\nSyria,2012,30\n"),
            ("status_by_year", "year,case_status,count\n2012,killed,70\n"),
            ("cases", "country,year,case_status,role\nSyria,2012,killed,\n"),
        ];
        PackageFiles {
            entries: defaults
                .iter()
                .map(|&(dataset, body)| {
                    let body = overrides
                        .iter()
                        .find(|(d, _)| *d == dataset)
                        .map(|(_, b)| *b)
                        .unwrap_or(body);
                    PackageFile {
                        dataset,
                        path: PathBuf::from(format!("{dataset}.csv")),
                        bytes: body.as_bytes().to_vec(),
                    }
                })
                .collect(),
        }
    }

    #[test]
    fn parses_every_dataset() {
        let ds = parse_datasets(&files(&[]), "countries").expect("parse");
        assert_eq!(ds.country_totals.len(), 1);
        assert_eq!(ds.motives.len(), 2);
        assert_eq!(ds.global_timeline[0].country, GLOBAL_COUNTRY);
        assert_eq!(ds.global_timeline[1].count, 70);
        assert_eq!(ds.cases[0].role, None);
        assert!(ds.world.is_empty());
    }

    #[test]
    fn unknown_motive_in_breakdown_is_rejected() {
        let err = parse_datasets(
            &files(&[("employment", "motive,employment_type,count\nCrossfire,staff,1\n")]),
            "countries",
        )
        .unwrap_err();
        match err {
            LoadError::UnknownMotive { dataset, motive } => {
                assert_eq!(dataset, "employment");
                assert_eq!(motive, "Crossfire");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_impunity_case_type_is_rejected() {
        let err = parse_datasets(
            &files(&[(
                "impunity",
                "country,case_type,count\nMexico,confirmed,1\nMexico,confirmed,2\n",
            )]),
            "countries",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Table {
                dataset: "impunity",
                source: ParseError::DuplicateKey { .. },
                ..
            }
        ));
    }

    #[test]
    fn missing_column_names_the_dataset() {
        let err = parse_datasets(
            &files(&[("status_by_year", "year,status,count\n2012,killed,1\n")]),
            "countries",
        )
        .unwrap_err();
        assert!(err.to_string().contains("status_by_year"));
        assert!(err.to_string().contains("case_status"));
    }
}
