use crate::core::{CommunicationClient, Record, ResourceLocator, UniqueLookup};
use crate::utils::error::{Result, UploadError};
use async_trait::async_trait;

pub const FACILITIES_PATH: &str = "/api/facilities";
pub const CODE: &str = "code";

/// Checks whether an uploaded facility already exists, matched by its code.
pub struct FacilityLookupClient<C: CommunicationClient> {
    client: C,
}

impl<C: CommunicationClient> FacilityLookupClient<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: CommunicationClient> ResourceLocator for FacilityLookupClient<C> {
    fn resource_path(&self) -> &str {
        FACILITIES_PATH
    }
}

#[async_trait]
impl<C: CommunicationClient> UniqueLookup for FacilityLookupClient<C> {
    async fn find_unique(&self, record: &Record) -> Result<Option<serde_json::Value>> {
        let code = record
            .get_str(CODE)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| UploadError::MissingField {
                field: CODE.to_string(),
            })?;

        tracing::debug!("Looking up facility by code: {}", code);
        self.client.find_by_code(self.resource_path(), code).await
    }
}
