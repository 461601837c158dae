use crate::core::{ConfigProvider, MetObject, ObjectStore, Pipeline, RawObjectRow, Storage, TransformResult};
use crate::domain::model::ImportSummary;
use crate::utils::error::{EtlError, Result};
use chrono::Utc;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const SUMMARY_FILE: &str = "import_summary.json";

/// Placeholder texts the catalog uses instead of leaving the field empty.
const UNAVAILABLE_MARKERS: [&str; 2] = ["Dimensions unavailable", "Dimension unavailable"];

/// What happened to one source row during transform.
enum RowOutcome {
    Blank,
    Unavailable,
    Unparsable,
    Parsed(MetObject),
}

fn classify(row: RawObjectRow) -> RowOutcome {
    let raw = match row.dimensions {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return RowOutcome::Blank,
    };
    if UNAVAILABLE_MARKERS.contains(&raw.trim()) {
        return RowOutcome::Unavailable;
    }

    let object = MetObject::new(row.id, raw);
    if object.has_valid_dimension() {
        RowOutcome::Parsed(object)
    } else {
        tracing::debug!("Object {} dimensions not parsable: {:?}", object.id, object.dimension_raw);
        RowOutcome::Unparsable
    }
}

/// Imports the museum CSV export: only objects with parsable dimensions are
/// stored.
pub struct ImportPipeline<S: Storage, O: ObjectStore, C: ConfigProvider> {
    storage: S,
    store: O,
    config: C,
    malformed_rows: AtomicUsize,
}

impl<S: Storage, O: ObjectStore, C: ConfigProvider> ImportPipeline<S, O, C> {
    pub fn new(storage: S, store: O, config: C) -> Self {
        Self {
            storage,
            store,
            config,
            malformed_rows: AtomicUsize::new(0),
        }
    }

    pub fn store(&self) -> &O {
        &self.store
    }

    fn summary_path(&self) -> String {
        Path::new(self.config.store_path())
            .join(SUMMARY_FILE)
            .to_string_lossy()
            .into_owned()
    }

    fn batch_size(&self) -> usize {
        self.config.batch_size().max(1)
    }
}

#[async_trait::async_trait]
impl<S: Storage, O: ObjectStore, C: ConfigProvider> Pipeline for ImportPipeline<S, O, C> {
    async fn extract(&self) -> Result<Vec<RawObjectRow>> {
        let source = self.config.source_path();
        if !self.storage.exists(source).await {
            tracing::error!("Import file not found. Import failed. path={}", source);
            return Err(EtlError::ConfigError {
                message: format!("import file not found: {}", source),
            });
        }

        let data = self.storage.read_file(source).await?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(data.as_slice());

        let mut rows = Vec::new();
        let mut malformed = 0;
        for (line, result) in reader.deserialize::<RawObjectRow>().enumerate() {
            match result {
                Ok(row) => rows.push(row),
                Err(e) => {
                    // 跳過格式錯誤的資料列，不中斷整個匯入
                    malformed += 1;
                    tracing::warn!("Skipping malformed row {}: {}", line + 1, e);
                }
            }
        }
        self.malformed_rows.store(malformed, Ordering::Relaxed);

        Ok(rows)
    }

    async fn transform(&self, rows: Vec<RawObjectRow>) -> Result<TransformResult> {
        let mut summary = ImportSummary {
            started_at: Some(Utc::now()),
            rows_read: rows.len(),
            malformed_rows: self.malformed_rows.load(Ordering::Relaxed),
            ..Default::default()
        };

        // 分批交給 blocking 執行緒解析，結果依原順序收回
        let mut chunks = Vec::new();
        let mut rows = rows.into_iter().peekable();
        while rows.peek().is_some() {
            let chunk: Vec<RawObjectRow> = rows.by_ref().take(self.batch_size()).collect();
            chunks.push(tokio::task::spawn_blocking(move || {
                chunk.into_iter().map(classify).collect::<Vec<_>>()
            }));
        }

        let limit = match self.config.import_size() {
            0 => usize::MAX,
            n => n,
        };

        let mut objects = Vec::new();
        for handle in chunks {
            let outcomes = handle.await.map_err(|e| EtlError::ProcessingError {
                message: format!("dimension parsing task failed: {}", e),
            })?;
            for outcome in outcomes {
                match outcome {
                    RowOutcome::Blank => summary.blank_dimensions += 1,
                    RowOutcome::Unavailable => summary.unavailable_dimensions += 1,
                    RowOutcome::Unparsable => summary.unparsable_dimensions += 1,
                    RowOutcome::Parsed(object) if objects.len() < limit => objects.push(object),
                    RowOutcome::Parsed(_) => {}
                }
            }
        }

        if objects.len() == limit {
            tracing::info!("Import size limit of {} reached", limit);
        }
        summary.imported = objects.len();

        Ok(TransformResult { objects, summary })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let TransformResult {
            objects,
            mut summary,
        } = result;

        self.store.init().await?;

        for batch in objects.chunks(self.batch_size()) {
            self.store.batch_insert(batch).await?;
            summary.batches += 1;
        }
        summary.finished_at = Some(Utc::now());

        let summary_path = self.summary_path();
        let json = serde_json::to_vec_pretty(&summary)?;
        self.storage.write_file(&summary_path, &json).await?;

        tracing::info!(
            "Stored {} objects in {} batches (blank: {}, unavailable: {}, unparsable: {}, malformed: {})",
            summary.imported,
            summary.batches,
            summary.blank_dimensions,
            summary.unavailable_dimensions,
            summary.unparsable_dimensions,
            summary.malformed_rows
        );

        Ok(self.config.store_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{CsvObjectStore, LocalStorage};
    use tempfile::TempDir;

    struct TestConfig {
        source_path: String,
        store_path: String,
        import_size: usize,
        batch_size: usize,
    }

    impl ConfigProvider for TestConfig {
        fn source_path(&self) -> &str {
            &self.source_path
        }

        fn store_path(&self) -> &str {
            &self.store_path
        }

        fn import_size(&self) -> usize {
            self.import_size
        }

        fn batch_size(&self) -> usize {
            self.batch_size
        }
    }

    const SOURCE: &str = "Object Number,Object ID,Title,Dimensions
1979.486.1,1,Coin,\"Diam. 11/16 in. (1.7 cm)\"
1980.264.5,2,Painting,\"23 1/4 x 18 1/4 in. (59.1 x 46.4 cm)\"
67.265.9,3,Bowl,Dimensions unavailable
67.265.10,4,Cup,
67.265.11,5,Fragment,\"about the size of a hand\"
67.265.12,6,Teapot,\"11 3/16 x 14 7/16 x 11 3/8 in. (28.4 x 36.7 x 28.9 cm); 41 oz. 5 dwt. (1282.7 g)\"
";

    async fn pipeline(
        temp_dir: &TempDir,
        import_size: usize,
    ) -> ImportPipeline<LocalStorage, CsvObjectStore<LocalStorage>, TestConfig> {
        let root = temp_dir.path();
        tokio::fs::write(root.join("objects.csv"), SOURCE).await.unwrap();

        let store_path = root.join("store").to_string_lossy().into_owned();
        let config = TestConfig {
            source_path: "objects.csv".to_string(),
            store_path: store_path.clone(),
            import_size,
            batch_size: 2,
        };
        ImportPipeline::new(
            LocalStorage::new(root),
            CsvObjectStore::new(LocalStorage::new(store_path)),
            config,
        )
    }

    #[tokio::test]
    async fn test_extract_reads_required_columns() {
        let temp_dir = TempDir::new().unwrap();
        let pipeline = pipeline(&temp_dir, 0).await;

        let rows = pipeline.extract().await.unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].dimensions.as_deref(), Some("Diam. 11/16 in. (1.7 cm)"));
    }

    #[tokio::test]
    async fn test_transform_filters_and_counts() {
        let temp_dir = TempDir::new().unwrap();
        let pipeline = pipeline(&temp_dir, 0).await;

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();

        let ids: Vec<u64> = result.objects.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 6]);
        assert_eq!(result.summary.unavailable_dimensions, 1);
        assert_eq!(result.summary.unparsable_dimensions, 1);
        assert_eq!(result.summary.imported, 3);
    }

    #[tokio::test]
    async fn test_import_size_caps_accepted_objects() {
        let temp_dir = TempDir::new().unwrap();
        let pipeline = pipeline(&temp_dir, 2).await;

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();
        let ids: Vec<u64> = result.objects.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_load_stores_in_batches_and_writes_summary() {
        let temp_dir = TempDir::new().unwrap();
        let pipeline = pipeline(&temp_dir, 0).await;

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();
        pipeline.load(result).await.unwrap();

        assert_eq!(pipeline.store().count().await.unwrap(), 3);

        let summary_path = temp_dir.path().join("store").join(SUMMARY_FILE);
        let summary: ImportSummary =
            serde_json::from_slice(&std::fs::read(summary_path).unwrap()).unwrap();
        assert_eq!(summary.batches, 2);
        assert_eq!(summary.imported, 3);
        assert!(summary.finished_at.is_some());
    }

    #[tokio::test]
    async fn test_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = TestConfig {
            source_path: "nope.csv".to_string(),
            store_path: "store".to_string(),
            import_size: 0,
            batch_size: 10,
        };
        let pipeline = ImportPipeline::new(
            LocalStorage::new(temp_dir.path()),
            CsvObjectStore::new(LocalStorage::new(temp_dir.path())),
            config,
        );
        assert!(matches!(
            pipeline.extract().await,
            Err(EtlError::ConfigError { .. })
        ));
    }
}
