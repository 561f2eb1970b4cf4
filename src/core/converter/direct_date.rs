use super::date_pattern::DatePattern;
use super::is_absent;
use crate::core::{FieldConverter, Mapping, OutputDocument};

pub const DIRECT_DATE: &str = "DIRECT_DATE";

/// Accepted input layouts, tried in order. Day-first slashes win over
/// month-first, so `03/04/2020` is 3 April.
pub const DATE_FORMATS: [&str; 5] = ["yyyy-M-d", "yy-M-d", "d/M/yyyy", "d/M/yy", "dd/MM/yyyy"];

/// Normalizes dates from an upload into ISO-8601 (`YYYY-MM-DD`).
#[derive(Debug, Clone)]
pub struct DirectDateConverter {
    patterns: Vec<DatePattern>,
}

impl Default for DirectDateConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectDateConverter {
    pub fn new() -> Self {
        let patterns = DATE_FORMATS
            .iter()
            .filter_map(|f| DatePattern::compile(f))
            .collect();
        Self { patterns }
    }

    pub fn parse_date(&self, value: &str) -> Option<String> {
        for pattern in &self.patterns {
            match pattern.parse(value) {
                Some(date) => return Some(date.format("%Y-%m-%d").to_string()),
                None => {
                    tracing::debug!("Can't parse date {} with format {}", value, pattern.as_str())
                }
            }
        }
        None
    }
}

impl FieldConverter for DirectDateConverter {
    fn supports(&self, r#type: &str) -> bool {
        DIRECT_DATE.eq_ignore_ascii_case(r#type)
    }

    fn convert(&self, document: &mut OutputDocument, mapping: &Mapping, value: &str) {
        if is_absent(value) {
            tracing::debug!("Blank/null value for field: {}", mapping.to);
            return;
        }

        match self.parse_date(value) {
            Some(date) => {
                document.add(mapping.to.clone(), date);
            }
            None => tracing::debug!("Can't parse date {} for field: {}", value, mapping.to),
        }
    }
}

/// ISO-8601 form of `value`, or `None` when no accepted layout matches.
pub fn normalize_date(value: &str) -> Option<String> {
    DirectDateConverter::new().parse_date(value)
}
