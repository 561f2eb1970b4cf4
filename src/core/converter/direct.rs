use super::is_absent;
use crate::core::{FieldConverter, Mapping, OutputDocument};

pub const DIRECT: &str = "DIRECT";

/// Copies the raw value into the output document as a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectConverter;

impl FieldConverter for DirectConverter {
    fn supports(&self, r#type: &str) -> bool {
        DIRECT.eq_ignore_ascii_case(r#type)
    }

    fn convert(&self, document: &mut OutputDocument, mapping: &Mapping, value: &str) {
        if is_absent(value) {
            tracing::debug!("Blank/null value for field: {}", mapping.to);
            return;
        }
        document.add(mapping.to.clone(), value);
    }
}
