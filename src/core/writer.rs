use crate::core::{Record, HEADER};
use crate::utils::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct WriterOptions {
    pub delimiter: u8,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// 建立或覆寫 `path`，寫入表頭與每筆記錄。
/// 不經暫存檔：寫到一半失敗時可能留下不完整的檔案。
pub fn write_records<P: AsRef<Path>>(
    path: P,
    records: &[Record],
    options: &WriterOptions,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    serialize_records(file, records, options)
}

/// 將記錄序列化到任意 writer，回傳前一定會 flush。`name` 以原始位元組寫出。
pub fn serialize_records<W: Write>(
    output: W,
    records: &[Record],
    options: &WriterOptions,
) -> Result<()> {
    // Header is written by hand so header-only output still gets it.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .from_writer(output);

    writer.write_record(HEADER)?;
    for record in records {
        let age = record.age.to_string();
        let score = record.score.to_string();
        writer.write_record([record.name.as_slice(), age.as_bytes(), score.as_bytes()])?;
    }
    writer.flush()?;

    tracing::debug!("Serialized {} records", records.len());
    Ok(())
}
