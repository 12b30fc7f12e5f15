use serde::Serialize;

use crate::error::AppError;
use crate::repo::DataRow;

/// Rows per batch when the client does not say
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// One page of a download
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch {
    pub success: bool,
    pub batch_id: usize,
    pub total_batches: usize,
    pub has_more: bool,
    pub data: Vec<DataRow>,
}

impl Batch {
    /// Slice `rows` into batch `batch_id` of `batch_size` rows.
    ///
    /// Batches past the end are empty.
    pub fn slice(
        rows: Vec<DataRow>,
        batch_size: Option<usize>,
        batch_id: usize,
    ) -> Result<Self, AppError> {
        let batch_size = batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            return Err(AppError::BadRequest(
                "batch_size must be positive".to_string(),
            ));
        }

        let total = rows.len();
        let start = batch_id.saturating_mul(batch_size);
        let end = start.saturating_add(batch_size);

        Ok(Batch {
            success: true,
            batch_id,
            total_batches: total.div_ceil(batch_size),
            has_more: end < total,
            data: rows
                .into_iter()
                .skip(start)
                .take(batch_size)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(n: usize) -> Vec<DataRow> {
        (0..n)
            .map(|i| {
                let mut row = DataRow::new();
                row.insert("i".into(), json!(i));
                row
            })
            .collect()
    }

    #[test]
    fn test_batches() {
        let first = Batch::slice(rows(25), Some(10), 0).unwrap();
        assert_eq!(first.total_batches, 3);
        assert_eq!(first.data.len(), 10);
        assert!(first.has_more);

        let last = Batch::slice(rows(25), Some(10), 2).unwrap();
        assert_eq!(last.data.len(), 5);
        assert_eq!(last.data[0]["i"], json!(20));
        assert!(!last.has_more);

        let past = Batch::slice(rows(25), Some(10), 7).unwrap();
        assert!(past.data.is_empty());
        assert!(!past.has_more);
    }

    #[test]
    fn test_default_and_zero_batch_size() {
        let all = Batch::slice(rows(3), None, 0).unwrap();
        assert_eq!(all.total_batches, 1);
        assert_eq!(all.data.len(), 3);

        assert!(Batch::slice(rows(3), Some(0), 0).is_err());
    }
}
