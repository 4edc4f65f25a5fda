use crate::config::RunSettings;
use crate::core::reader::{read_records, ReaderOptions};
use crate::core::writer::{write_records, WriterOptions};
use crate::core::{Pipeline, Record, SortKey, SortedOutput};
use crate::utils::error::{EtlError, Result};

/// Reads one delimited file and persists a name-sorted and an age-sorted copy.
pub struct CsvSortPipeline {
    settings: RunSettings,
    outputs: Vec<SortedOutput>,
}

impl CsvSortPipeline {
    /// 依設定建立管道；輸出路徑為 `output_dir` 加上兩個固定檔名。
    pub fn new(settings: RunSettings) -> Self {
        // Order matters: the age sort runs on the name-sorted sequence.
        let outputs = vec![
            SortedOutput {
                key: SortKey::Name,
                path: settings.output_dir.join(&settings.by_name_file),
            },
            SortedOutput {
                key: SortKey::Age,
                path: settings.output_dir.join(&settings.by_age_file),
            },
        ];
        Self { settings, outputs }
    }
}

impl Pipeline for CsvSortPipeline {
    fn extract(&self) -> Result<Vec<Record>> {
        let options = ReaderOptions {
            delimiter: self.settings.input_delimiter,
            numeric_mode: self.settings.numeric_mode,
        };

        tracing::debug!("Reading records from: {}", self.settings.source.display());
        read_records(&self.settings.source, &options)
            .map_err(|e| EtlError::read(self.settings.source.display().to_string(), e))
    }

    fn outputs(&self) -> &[SortedOutput] {
        &self.outputs
    }

    fn load(&self, output: &SortedOutput, records: &[Record]) -> Result<()> {
        let options = WriterOptions {
            delimiter: self.settings.output_delimiter,
        };

        tracing::debug!(
            "Writing {} records to: {}",
            records.len(),
            output.path.display()
        );
        write_records(&output.path, records, &options).map_err(|e| {
            EtlError::write(output.key.label(), output.path.display().to_string(), e)
        })
    }
}
