//! Small dataset shared by the renderer tests.

use formats::{
    CaseRecord, CaseStatus, CaseType, CountryCount, CountryShape, Datasets, DeathTypeRecord,
    EmploymentRecord, GLOBAL_COUNTRY, ImpunityRecord, MotiveRecord, StatusYearRecord,
    TimelinePoint,
};

fn square(lon: f64, lat: f64) -> Vec<Vec<[f64; 2]>> {
    vec![vec![
        [lon, lat],
        [lon + 10.0, lat],
        [lon + 10.0, lat + 10.0],
        [lon, lat + 10.0],
        [lon, lat],
    ]]
}

fn shape(name: &str, lon: f64, lat: f64) -> CountryShape {
    CountryShape {
        id: None,
        name: name.to_string(),
        polygons: vec![square(lon, lat)],
    }
}

fn point(country: &str, year: i32, count: u64) -> TimelinePoint {
    TimelinePoint {
        country: country.to_string(),
        year,
        count,
    }
}

pub(crate) fn datasets() -> Datasets {
    Datasets {
        world: vec![
            shape("Mexico", -105.0, 18.0),
            shape("Syrian Arab Republic", 36.0, 33.0),
            shape("Iceland", -20.0, 63.0),
        ],
        country_totals: vec![
            CountryCount {
                country: "Mexico".to_string(),
                count: 90,
            },
            CountryCount {
                country: "Syria".to_string(),
                count: 120,
            },
        ],
        country_timeline: vec![
            point("Mexico", 2012, 7),
            point("Mexico", 2010, 3),
            point("Mexico", 2011, 12),
            point("Syria", 2012, 30),
        ],
        impunity: vec![
            ImpunityRecord {
                country: "Mexico".to_string(),
                case_type: CaseType::Confirmed,
                count: 10,
            },
            ImpunityRecord {
                country: "Mexico".to_string(),
                case_type: CaseType::Unconfirmed,
                count: 40,
            },
        ],
        motives: vec![
            MotiveRecord {
                motive: "Confirmed".to_string(),
                count: 500,
            },
            MotiveRecord {
                motive: "Unconfirmed".to_string(),
                count: 120,
            },
        ],
        death_types: vec![
            DeathTypeRecord {
                motive: "Confirmed".to_string(),
                type_of_death: "Murder".to_string(),
                count: 380,
            },
            DeathTypeRecord {
                motive: "Confirmed".to_string(),
                type_of_death: "Crossfire".to_string(),
                count: 100,
            },
            DeathTypeRecord {
                motive: "Confirmed".to_string(),
                type_of_death: "Dangerous Assignment".to_string(),
                count: 20,
            },
        ],
        employment: vec![
            EmploymentRecord {
                motive: "Confirmed".to_string(),
                employment_type: "staff".to_string(),
                count: 300,
            },
            EmploymentRecord {
                motive: "Confirmed".to_string(),
                employment_type: "freelance".to_string(),
                count: 150,
            },
            EmploymentRecord {
                motive: "Confirmed".to_string(),
                employment_type: "other".to_string(),
                count: 50,
            },
        ],
        global_timeline: vec![
            point(GLOBAL_COUNTRY, 2009, 70),
            point(GLOBAL_COUNTRY, 2010, 60),
            point(GLOBAL_COUNTRY, 2011, 50),
            point(GLOBAL_COUNTRY, 2012, 75),
            point(GLOBAL_COUNTRY, 2013, 71),
            point(GLOBAL_COUNTRY, 2014, 61),
            point(GLOBAL_COUNTRY, 2015, 73),
            point(GLOBAL_COUNTRY, 2016, 48),
        ],
        bubbles: vec![
            point("Syria", 2012, 30),
            point("Syria", 2013, 20),
            point("Mexico", 2011, 12),
            point("Mexico", 2016, 9),
            point("Israel and the Occupied Palestinian Territory", 2014, 5),
        ],
        status_by_year: vec![
            StatusYearRecord {
                year: 2012,
                status: CaseStatus::Killed,
                count: 75,
            },
            StatusYearRecord {
                year: 2012,
                status: CaseStatus::Imprisoned,
                count: 230,
            },
            StatusYearRecord {
                year: 2009,
                status: CaseStatus::Killed,
                count: 70,
            },
        ],
        cases: vec![
            CaseRecord {
                country: "Syria".to_string(),
                year: 2012,
                case_status: CaseStatus::Killed,
                role: Some("Camera Operator".to_string()),
            },
            CaseRecord {
                country: "Mexico".to_string(),
                year: 2013,
                case_status: CaseStatus::Imprisoned,
                role: None,
            },
            CaseRecord {
                country: "Mexico".to_string(),
                year: 2009,
                case_status: CaseStatus::Killed,
                role: None,
            },
        ],
    }
}
