use formats::Datasets;
use serde::Serialize;

use crate::analysis::Aggregate;
use crate::slices::global_impunity_split;

/// Headline numbers shown next to the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFigures {
    pub total_victims: u64,
    /// Data identifier of the country with the most victims.
    pub dangerous_zone: Option<String>,
    pub global_impunity_rate: Option<u8>,
}

impl KeyFigures {
    pub fn compute(ds: &Datasets) -> Self {
        let total_victims = Aggregate::sum(&ds.country_totals, |c| c.count);
        let dangerous_zone =
            Aggregate::argmax(&ds.country_totals, |c| c.count).map(|c| c.country.clone());
        let global_impunity_rate = global_impunity_split(ds).rate();
        Self {
            total_victims,
            dangerous_zone,
            global_impunity_rate,
        }
    }

    /// `1,234+`
    pub fn total_victims_text(&self) -> String {
        format!("{}+", format_thousands(self.total_victims))
    }

    /// `80%`, or `N/A` when no impunity data exists.
    pub fn impunity_rate_text(&self) -> String {
        match self.global_impunity_rate {
            Some(rate) => format!("{rate}%"),
            None => "N/A".to_string(),
        }
    }
}

/// Formats with `,` group separators.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
