use crate::core::sorter::sort_records;
use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    /// 以指定的管道建立引擎
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Extracts once, then for each output sorts the current sequence in place
    /// and loads it. Sorts chain: each starts from the previous output's order.
    /// The first failure aborts the run; files already written stay on disk.
    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting sort-export run");

        let mut records = self.pipeline.extract()?;
        tracing::info!("Extracted {} records", records.len());

        let mut written = Vec::new();
        for output in self.pipeline.outputs() {
            sort_records(&mut records, output.key);
            self.pipeline.load(output, &records)?;
            tracing::info!("Saved {} output to: {}", output.key.label(), output.path.display());
            written.push(output.path.clone());
        }

        Ok(RunSummary {
            records: records.len(),
            written,
        })
    }
}
