use crate::dimension::{self, BoundarySpec};
use crate::domain::model::FitResult;
use crate::domain::ports::ObjectStore;
use crate::utils::error::Result;

/// Maximum number of objects returned by [`ObjectQueryService::list_fitting`].
pub const LIST_LIMIT: usize = 50;

/// Boundary queries over imported objects.
///
/// Min boundaries require the dimension to be available, otherwise the object
/// does not fit. Max boundaries only limit a dimension when it is present.
pub struct ObjectQueryService<O: ObjectStore> {
    store: O,
}

impl<O: ObjectStore> ObjectQueryService<O> {
    pub fn new(store: O) -> Self {
        Self { store }
    }

    /// An unknown id (never imported, or its dimensions were not parsable)
    /// is reported as not fitting.
    pub async fn does_it_fit(&self, id: u64, boundary: &BoundarySpec) -> Result<FitResult> {
        let Some(row) = self.store.find_by_id(id).await? else {
            tracing::debug!("Object {} not found", id);
            return Ok(FitResult {
                fits: false,
                object: None,
            });
        };

        let object = row.to_object();
        let fits = object
            .dimension
            .as_ref()
            .map(|m| dimension::fits(m, boundary))
            .unwrap_or(false);

        Ok(FitResult {
            fits,
            object: Some(object),
        })
    }

    pub async fn list_fitting(&self, boundary: &BoundarySpec) -> Result<Vec<FitResult>> {
        let rows = self.store.list_fitting(boundary, LIST_LIMIT).await?;
        tracing::debug!("{} objects within boundary", rows.len());

        Ok(rows
            .iter()
            .map(|row| FitResult {
                fits: true,
                object: Some(row.to_object()),
            })
            .collect())
    }
}
