use crate::core::{Record, SortKey};

/// 依 `key_fn` 取出的鍵做穩定的原地排序。
pub fn sort_records_by_key<K, F>(records: &mut [Record], key_fn: F)
where
    K: Ord,
    F: FnMut(&Record) -> K,
{
    records.sort_by_key(key_fn);
}

/// Stable in-place sort by one of the record fields. Records with equal keys
/// keep whatever relative order they had before the call.
pub fn sort_records(records: &mut [Record], key: SortKey) {
    match key {
        SortKey::Name => records.sort_by(|a, b| key.compare(a, b)),
        SortKey::Age => sort_records_by_key(records, |r| r.age),
        SortKey::Score => sort_records_by_key(records, |r| r.score),
    }
}
