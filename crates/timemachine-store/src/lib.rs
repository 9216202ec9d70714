//! Record store client
//!
//! Thin interface to the external record/object store service. All
//! operations return a typed [`StoreResult`]; transport failures are
//! normalized into [`StoreError::Unavailable`] at this boundary so the
//! rest of the system never sees a raw HTTP error.

pub mod error;
pub mod http;
pub mod keys;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use http::{Auth, HttpRecordStore};
pub use traits::{RecordFilters, RecordStore, StoredObject};
