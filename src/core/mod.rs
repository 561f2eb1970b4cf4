pub mod converter;
pub mod facility;

pub use crate::domain::model::{Mapping, OutputDocument, Record};
pub use crate::domain::ports::{CommunicationClient, FieldConverter, ResourceLocator, UniqueLookup};
pub use crate::utils::error::Result;
