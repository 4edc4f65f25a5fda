use crate::domain::model::{Record, SortedOutput};
use crate::utils::error::Result;

/// The three stages the engine drives. Sorting between loads is the engine's job.
pub trait Pipeline {
    fn extract(&self) -> Result<Vec<Record>>;
    fn outputs(&self) -> &[SortedOutput];
    fn load(&self, output: &SortedOutput, records: &[Record]) -> Result<()>;
}
