use crate::domain::model::{Mapping, OutputDocument, Record};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the URL path of the remote collection a client targets.
pub trait ResourceLocator: Send + Sync {
    fn resource_path(&self) -> &str;
}

/// Shared lookup mechanism against the LMIS REST API.
#[async_trait]
pub trait CommunicationClient: Send + Sync {
    /// Existing resource under `resource_path` whose code equals `code`, if any.
    async fn find_by_code(
        &self,
        resource_path: &str,
        code: &str,
    ) -> Result<Option<serde_json::Value>>;
}

#[async_trait]
pub trait UniqueLookup: Send + Sync {
    async fn find_unique(&self, record: &Record) -> Result<Option<serde_json::Value>>;
}

/// Converts one raw field value and writes it into the output document.
pub trait FieldConverter: Send + Sync {
    fn supports(&self, r#type: &str) -> bool;

    fn convert(&self, document: &mut OutputDocument, mapping: &Mapping, value: &str);
}

#[async_trait]
impl<C: CommunicationClient + ?Sized> CommunicationClient for std::sync::Arc<C> {
    async fn find_by_code(
        &self,
        resource_path: &str,
        code: &str,
    ) -> Result<Option<serde_json::Value>> {
        (**self).find_by_code(resource_path, code).await
    }
}
