pub mod date_pattern;
pub mod direct;
pub mod direct_date;

use crate::core::{FieldConverter, Mapping, OutputDocument, Record};
use crate::utils::error::{Result, UploadError};

pub use direct::{DirectConverter, DIRECT};
pub use direct_date::{normalize_date, DirectDateConverter, DATE_FORMATS, DIRECT_DATE};

/// Blank cells and the literal `null` mean the value was left out on purpose.
pub(crate) fn is_absent(value: &str) -> bool {
    value.trim().is_empty() || value == "null"
}

/// Dispatch table from mapping type to converter; first match wins.
pub struct ConverterRegistry {
    converters: Vec<Box<dyn FieldConverter>>,
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ConverterRegistry {
    pub fn empty() -> Self {
        Self {
            converters: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(DirectConverter));
        registry.register(Box::new(DirectDateConverter::new()));
        registry
    }

    pub fn register(&mut self, converter: Box<dyn FieldConverter>) {
        self.converters.push(converter);
    }

    pub fn find(&self, r#type: &str) -> Option<&dyn FieldConverter> {
        self.converters
            .iter()
            .find(|c| c.supports(r#type))
            .map(|c| c.as_ref())
    }

    pub fn supports(&self, r#type: &str) -> bool {
        self.find(r#type).is_some()
    }

    /// Builds the import document for one record. Columns missing from the
    /// record are treated as blank.
    pub fn convert_record(&self, record: &Record, mappings: &[Mapping]) -> Result<OutputDocument> {
        let mut document = OutputDocument::new();

        for mapping in mappings {
            let converter = self
                .find(&mapping.r#type)
                .ok_or_else(|| UploadError::UnsupportedType {
                    mapping_type: mapping.r#type.clone(),
                })?;
            let value = record.get_str(&mapping.from).unwrap_or("");
            converter.convert(&mut document, mapping, value);
        }

        Ok(document)
    }
}
