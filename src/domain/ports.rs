use crate::dimension::BoundarySpec;
use crate::domain::model::{MetObject, RawObjectRow, StoredObject, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Append to the end of `path`, creating it when missing.
    fn append_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Persistence for imported objects. Listing follows insertion order.
pub trait ObjectStore: Send + Sync {
    /// Drop any existing table and start empty.
    fn init(&self) -> impl std::future::Future<Output = Result<()>> + Send;
    fn batch_insert(
        &self,
        objects: &[MetObject],
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
    fn find_by_id(
        &self,
        id: u64,
    ) -> impl std::future::Future<Output = Result<Option<StoredObject>>> + Send;
    fn list_fitting(
        &self,
        boundary: &BoundarySpec,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<StoredObject>>> + Send;
    fn count(&self) -> impl std::future::Future<Output = Result<usize>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_path(&self) -> &str;
    fn store_path(&self) -> &str;
    /// Maximum number of accepted objects, 0 for no limit.
    fn import_size(&self) -> usize;
    fn batch_size(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawObjectRow>>;
    async fn transform(&self, rows: Vec<RawObjectRow>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
