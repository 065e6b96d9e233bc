//! Time-indexed table of named scalar columns.

use crate::Result;
use crate::error::ReportError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rows of `(time, values...)` under fixed column labels.
///
/// Times strictly increase from row to row. Rows are only ever appended or
/// have their last row replaced; history is never rewritten.
///
/// # Example
///
/// ```
/// use sim_report::TimeSeriesTable;
///
/// let mut table = TimeSeriesTable::new(vec!["acl/tension".into()]);
/// table.append_row(0.0, vec![0.0]).unwrap();
/// table.append_row(0.5, vec![12.5]).unwrap();
///
/// assert_eq!(table.num_rows(), 2);
/// assert_eq!(table.column("acl/tension"), Some(vec![0.0, 12.5]));
/// assert!(table.append_row(0.25, vec![1.0]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSeriesTable {
    labels: Vec<String>,
    times: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl TimeSeriesTable {
    /// Create an empty table with the given column labels.
    #[must_use]
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            times: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Column labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of value columns (time excluded).
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.labels.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.times.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The time column.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Time of the last row.
    #[must_use]
    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Values of row `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Values of the last row.
    #[must_use]
    pub fn last_row(&self) -> Option<&[f64]> {
        self.rows.last().map(Vec::as_slice)
    }

    /// Iterate over `(time, values)` rows.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[f64])> {
        self.times
            .iter()
            .copied()
            .zip(self.rows.iter().map(Vec::as_slice))
    }

    /// Index of the column with `label`.
    #[must_use]
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Every value of the column with `label`, in row order.
    #[must_use]
    pub fn column(&self, label: &str) -> Option<Vec<f64>> {
        let index = self.column_index(label)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Append a row after the last one.
    pub fn append_row(&mut self, time: f64, values: Vec<f64>) -> Result<()> {
        self.check_width(&values)?;
        if let Some(last) = self.last_time() {
            if time.partial_cmp(&last) != Some(std::cmp::Ordering::Greater) {
                return Err(ReportError::NonIncreasingTime { time, last });
            }
        }
        self.times.push(time);
        self.rows.push(values);
        Ok(())
    }

    /// Replace the values of the last row, keeping its time.
    pub fn replace_last_row(&mut self, values: Vec<f64>) -> Result<()> {
        self.check_width(&values)?;
        let last = self.rows.last_mut().ok_or(ReportError::Empty)?;
        *last = values;
        Ok(())
    }

    /// Drop every row, keeping the labels.
    pub fn clear(&mut self) {
        self.times.clear();
        self.rows.clear();
    }

    fn check_width(&self, values: &[f64]) -> Result<()> {
        if values.len() == self.labels.len() {
            Ok(())
        } else {
            Err(ReportError::RowWidth {
                expected: self.labels.len(),
                actual: values.len(),
            })
        }
    }
}
