pub mod df;

use crate::error::RecordSourceError;
use crate::models::disk::DiskRecord;

/// Anything that can produce a fresh, complete set of filesystem records.
pub trait RecordSource {
    fn query(&mut self) -> Result<Vec<DiskRecord>, RecordSourceError>;
}
