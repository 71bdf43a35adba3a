use super::record::DdgRecord;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PivotError {
    #[error("Duplicate entry for run '{run_name}' and mutation '{mutation}'")]
    DuplicateCell { run_name: String, mutation: String },
}

/// ΔΔG values pivoted into a run × mutation grid.
///
/// Rows and columns appear in first-seen order. Combinations with no record stay `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DdgMatrix {
    rows: Vec<String>,
    columns: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
}

impl DdgMatrix {
    pub fn pivot(records: &[DdgRecord]) -> Result<Self, PivotError> {
        let mut row_index: HashMap<&str, usize> = HashMap::new();
        let mut col_index: HashMap<&str, usize> = HashMap::new();
        let mut matrix = Self::default();

        for record in records {
            let next_col = matrix.columns.len();
            let col = *col_index.entry(&record.mutation).or_insert_with(|| {
                matrix.columns.push(record.mutation.clone());
                next_col
            });

            let next_row = matrix.rows.len();
            let row = *row_index.entry(&record.run_name).or_insert_with(|| {
                matrix.rows.push(record.run_name.clone());
                next_row
            });
            if row == matrix.cells.len() {
                matrix.cells.push(Vec::new());
            }

            let cells = &mut matrix.cells[row];
            if cells.len() <= col {
                cells.resize(col + 1, None);
            }
            if cells[col].is_some() {
                return Err(PivotError::DuplicateCell {
                    run_name: record.run_name.clone(),
                    mutation: record.mutation.clone(),
                });
            }
            cells[col] = Some(record.ddg);
        }

        let width = matrix.columns.len();
        for row in &mut matrix.cells {
            row.resize(width, None);
        }
        Ok(matrix)
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Largest absolute value over all filled cells, `0.0` for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}
