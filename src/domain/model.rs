use std::borrow::Cow;
use std::cmp::Ordering;

/// Column labels of the header row, in file order.
pub const HEADER: [&str; 3] = ["Nome", "Idade", "Pontuacao"];

/// 一筆資料列，欄位順序與 [`HEADER`] 相同。
///
/// `name` 保留來源檔案的原始位元組，不要求是 UTF-8（例如 Latin-1 編碼的 "José"），
/// 寫出時逐位元組還原。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: Vec<u8>,
    pub age: i64,
    pub score: i64,
}

impl Record {
    /// 以任意位元組或字串建立記錄。
    pub fn new(name: impl Into<Vec<u8>>, age: i64, score: i64) -> Self {
        Self {
            name: name.into(),
            age,
            score,
        }
    }

    /// 供日誌與顯示使用；無效的 UTF-8 以 U+FFFD 取代。
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// 依 `name` 的位元組做字典序比較。
    Name,
    Age,
    Score,
}

impl SortKey {
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Age => a.age.cmp(&b.age),
            SortKey::Score => a.score.cmp(&b.score),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name-sorted",
            SortKey::Age => "age-sorted",
            SortKey::Score => "score-sorted",
        }
    }
}

/// How unparsable `Idade`/`Pontuacao` values are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericMode {
    /// Coerce to 0.
    #[default]
    Lenient,
    Strict,
}

/// One sorted snapshot to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedOutput {
    pub key: SortKey,
    pub path: std::path::PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: usize,
    pub written: Vec<std::path::PathBuf>,
}
