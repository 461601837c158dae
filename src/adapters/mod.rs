// Adapters layer: concrete implementations of the domain ports.

pub mod object_store;
pub mod storage;

pub use object_store::CsvObjectStore;
pub use storage::LocalStorage;
