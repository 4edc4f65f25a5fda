pub mod etl;
pub mod pipeline;
pub mod reader;
pub mod sorter;
pub mod writer;

pub use crate::domain::model::{NumericMode, Record, RunSummary, SortKey, SortedOutput, HEADER};
pub use crate::domain::ports::Pipeline;
pub use crate::utils::error::Result;
