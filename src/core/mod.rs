pub mod etl;
pub mod query;

pub use crate::domain::model::{MetObject, RawObjectRow, TransformResult};
pub use crate::domain::ports::{ConfigProvider, ObjectStore, Pipeline, Storage};
pub use crate::utils::error::Result;
