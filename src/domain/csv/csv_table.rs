// ============================================================
// CSV TABLE TYPES
// ============================================================
// Parsed CSV content and its bounded preview

use serde::{Deserialize, Serialize};

/// A fully parsed CSV upload: header columns plus data rows.
///
/// Every row has exactly `columns.len()` cells; the parser pads short rows
/// before building the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvTable {
    /// Column names in source order (already disambiguated)
    pub columns: Vec<String>,

    /// Data rows in source order
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Consume the table, keeping only the first `limit` rows.
    pub fn into_preview(self, limit: usize) -> Preview {
        let total_rows = self.rows.len();
        let rows = self
            .rows
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, values)| PreviewRow { index, values })
            .collect();

        Preview {
            columns: self.columns,
            rows,
            total_rows,
        }
    }
}

/// One displayed row, carrying its 0-based position in the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub index: usize,
    pub values: Vec<String>,
}

/// Bounded prefix of a parsed table, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<PreviewRow>,

    /// Number of data rows in the full upload
    pub total_rows: usize,
}

impl Preview {
    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_rows
    }

    /// Caption shown under the preview table, e.g. "12 rows × 3 columns"
    pub fn shape_caption(&self) -> String {
        format!(
            "{} rows × {} columns",
            self.total_rows,
            self.columns.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize) -> CsvTable {
        CsvTable::new(
            vec!["id".to_string(), "name".to_string()],
            (0..rows)
                .map(|i| vec![i.to_string(), format!("user{}", i)])
                .collect(),
        )
    }

    #[test]
    fn test_preview_truncates_to_limit() {
        let preview = table(8).into_preview(5);

        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.total_rows, 8);
        assert!(preview.is_truncated());
        assert_eq!(preview.rows[4].index, 4);
        assert_eq!(preview.rows[4].values, vec!["4", "user4"]);
    }

    #[test]
    fn test_preview_keeps_short_tables_whole() {
        let preview = table(2).into_preview(5);

        assert_eq!(preview.rows.len(), 2);
        assert!(!preview.is_truncated());
        assert_eq!(preview.columns, vec!["id", "name"]);
    }

    #[test]
    fn test_shape_caption() {
        assert_eq!(table(12).into_preview(5).shape_caption(), "12 rows × 2 columns");
    }
}
