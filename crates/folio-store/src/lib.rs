//! folio-store: content record storage and on-disk asset management.
//!
//! [`ContentStore`] holds records in memory, [`AssetStorage`] owns the
//! uploaded files, and [`ContentService`] keeps the two consistent across
//! create and delete.

pub mod assets;
pub mod records;
pub mod service;

pub use assets::{asset_file_name, AssetStorage, UPLOADS_PREFIX};
pub use records::ContentStore;
pub use service::{ContentService, Upload};
