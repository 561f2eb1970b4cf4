pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::RestCommunicationClient;
pub use config::{cli::CsvSource, toml_config::UploadConfig};
pub use core::converter::{normalize_date, ConverterRegistry, DirectConverter, DirectDateConverter};
pub use core::facility::FacilityLookupClient;
pub use domain::model::{Mapping, OutputDocument, Record};
pub use domain::ports::{CommunicationClient, FieldConverter, ResourceLocator, UniqueLookup};
pub use utils::error::{Result, UploadError};
