//! A small column-oriented table of `f64` values.
//!
//! Missing values are stored as `NaN`. Columns keep their insertion order,
//! which is also the order `row` returns values in. The row count is kept
//! separately, so popping the last column leaves a zero-width frame that still
//! has its rows.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Per-column summary used to standardize features.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub name: String,
    pub mean: f64,
    /// Sample standard deviation (`n - 1` in the denominator).
    pub std: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
    rows: usize,
}

impl DataFrame {
    pub fn new(columns: Vec<Column>) -> FrameResult<Self> {
        let mut names = HashSet::new();
        for column in columns.iter() {
            if !names.insert(column.name.as_str()) {
                Err(FrameError::DuplicateColumn(column.name.clone()))?;
            }
        }

        if let Some(first) = columns.first() {
            if let Some(ragged) = columns.iter().find(|c| c.len() != first.len()) {
                Err(FrameError::RaggedColumn {
                    name: ragged.name.clone(),
                    expected: first.len(),
                    got: ragged.len(),
                })?;
            }
        }

        let rows = columns.first().map(Column::len).unwrap_or(0);
        Ok(Self { columns, rows })
    }

    /// Builds a frame from row-major records; `names` gives the column order.
    pub fn from_rows<S: AsRef<str>>(names: &[S], rows: &[Vec<f64>]) -> FrameResult<Self> {
        let mut columns: Vec<Column> = names
            .iter()
            .map(|name| Column::new(name.as_ref(), Vec::with_capacity(rows.len())))
            .collect();

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != names.len() {
                Err(FrameError::RaggedRow {
                    row: row_index,
                    expected: names.len(),
                    got: row.len(),
                })?;
            }
            for (column, value) in columns.iter_mut().zip(row.iter()) {
                column.values.push(*value);
            }
        }

        Self::new(columns)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Values of every column at row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.len() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[index]).collect())
    }

    /// Removes the named column from the frame and returns it.
    pub fn pop(&mut self, name: &str) -> FrameResult<Column> {
        let position = self
            .columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))?;
        Ok(self.columns.remove(position))
    }

    /// Drops every row that holds a missing value in any column.
    ///
    /// Returns how many rows were removed.
    pub fn drop_na(&mut self) -> usize {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&i| self.columns.iter().all(|c| !c.values[i].is_nan()))
            .collect();
        let dropped = self.len() - keep.len();
        if dropped > 0 {
            log::warn!("dropping {} of {} rows with missing values", dropped, self.len());
            self.retain_rows(&keep);
        }
        dropped
    }

    /// Replaces a categorical column with one 0/1 indicator column per category.
    ///
    /// `categories` maps each code found in the column to the name of its
    /// indicator column. Indicator columns are appended at the end, in the
    /// order given. Missing values stay missing in every indicator column.
    pub fn one_hot(&mut self, name: &str, categories: &[(f64, &str)]) -> FrameResult<()> {
        let column = self
            .column(name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))?;

        for (_, indicator) in categories {
            if self.column(indicator).is_some() && *indicator != name {
                Err(FrameError::DuplicateColumn(indicator.to_string()))?;
            }
        }

        let mut indicators: Vec<Column> = categories
            .iter()
            .map(|(_, indicator)| Column::new(*indicator, Vec::with_capacity(column.len())))
            .collect();

        for (row, value) in column.values.iter().enumerate() {
            if value.is_nan() {
                indicators.iter_mut().for_each(|c| c.values.push(f64::NAN));
                continue;
            }
            let hit = categories
                .iter()
                .position(|(code, _)| code == value)
                .ok_or_else(|| FrameError::UnknownCategory {
                    column: name.to_string(),
                    row,
                    value: *value,
                })?;
            for (i, indicator) in indicators.iter_mut().enumerate() {
                indicator.values.push(if i == hit { 1.0 } else { 0.0 });
            }
        }

        self.pop(name)?;
        self.columns.extend(indicators);
        Ok(())
    }

    /// Rewrites the values of every column in place; `f` also gets the column name.
    ///
    /// Stops at the first error, leaving later columns untouched.
    pub fn try_map_columns<E, F>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&str, &mut [f64]) -> Result<(), E>,
    {
        for column in self.columns.iter_mut() {
            f(&column.name, &mut column.values)?;
        }
        Ok(())
    }

    /// Mean and sample standard deviation of every column, skipping missing values.
    pub fn describe(&self) -> Vec<ColumnStats> {
        self.columns
            .iter()
            .map(|column| {
                let present: Vec<f64> = column.values.iter().copied().filter(|v| !v.is_nan()).collect();
                let n = present.len() as f64;
                let mean = if present.is_empty() { f64::NAN } else { present.iter().sum::<f64>() / n };
                let std = if present.len() < 2 {
                    0.0
                } else {
                    (present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
                };
                ColumnStats { name: column.name.clone(), mean, std }
            })
            .collect()
    }

    /// New frame holding only the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> FrameResult<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            Err(FrameError::RowOutOfRange { row: bad, len: self.len() })?;
        }
        let mut frame = self.clone();
        frame.retain_rows(indices);
        Ok(frame)
    }

    fn retain_rows(&mut self, indices: &[usize]) {
        for column in self.columns.iter_mut() {
            column.values = indices.iter().map(|&i| column.values[i]).collect();
        }
        self.rows = indices.len();
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("column '{name}' has {got} rows, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("row {row} has {got} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("unknown category {value} in column '{column}' at row {row}")]
    UnknownCategory {
        column: String,
        row: usize,
        value: f64,
    },

    #[error("row {row} out of range for frame with {len} rows")]
    RowOutOfRange { row: usize, len: usize },
}

pub type FrameResult<T> = Result<T, FrameError>;

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use super::*;

    fn cars() -> DataFrame {
        DataFrame::from_rows(
            &["mpg", "cylinders", "horsepower", "origin"],
            &[
                vec![18.0, 8.0, 130.0, 1.0],
                vec![25.0, 4.0, f64::NAN, 2.0],
                vec![31.0, 4.0, 65.0, 3.0],
                vec![24.0, 4.0, 95.0, 3.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows() {
        let frame = cars();
        assert_eq!(frame.len(), 4);
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.column_names(), ["mpg", "cylinders", "horsepower", "origin"]);
        assert_eq!(frame.row(2), Some(vec![31.0, 4.0, 65.0, 3.0]));
        assert_eq!(frame.row(4), None);

        let err = DataFrame::from_rows(&["a", "b"], &[vec![1.0]]);
        assert!(matches!(err, Err(FrameError::RaggedRow { row: 0, .. })));
    }

    #[test]
    fn test_new_rejects_bad_columns() {
        let dup = DataFrame::new(vec![Column::new("a", vec![1.0]), Column::new("a", vec![2.0])]);
        assert!(matches!(dup, Err(FrameError::DuplicateColumn(_))));

        let ragged = DataFrame::new(vec![Column::new("a", vec![1.0]), Column::new("b", vec![])]);
        assert!(matches!(ragged, Err(FrameError::RaggedColumn { .. })));

        let empty = DataFrame::new(vec![]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.width(), 0);
    }

    #[test]
    fn test_pop() {
        let mut frame = cars();
        let mpg = frame.pop("mpg").unwrap();
        assert_eq!(mpg.values, [18.0, 25.0, 31.0, 24.0]);
        assert_eq!(frame.column_names(), ["cylinders", "horsepower", "origin"]);
        assert!(matches!(frame.pop("mpg"), Err(FrameError::ColumnNotFound(_))));
    }

    #[test]
    fn test_rows_survive_popping_every_column() {
        let mut frame = DataFrame::new(vec![Column::new("mpg", vec![18.0, 15.0, 26.0])]).unwrap();
        frame.pop("mpg").unwrap();
        assert_eq!(frame.width(), 0);
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.row(2), Some(vec![]));
        assert_eq!(frame.row(3), None);

        let picked = frame.select_rows(&[0, 2]).unwrap();
        assert_eq!(picked.len(), 2);
        assert!(frame.select_rows(&[3]).is_err());
    }

    #[test]
    fn test_drop_na() {
        let mut frame = cars();
        assert_eq!(frame.drop_na(), 1);
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.column("mpg").unwrap().values, [18.0, 31.0, 24.0]);
        assert_eq!(frame.drop_na(), 0);
    }

    #[test]
    fn test_one_hot() {
        let mut frame = cars();
        frame
            .one_hot("origin", &[(1.0, "usa"), (2.0, "europe"), (3.0, "japan")])
            .unwrap();
        assert_eq!(frame.column_names(), ["mpg", "cylinders", "horsepower", "usa", "europe", "japan"]);
        assert_eq!(frame.row(0).unwrap()[3..], [1.0, 0.0, 0.0]);
        assert_eq!(frame.row(1).unwrap()[3..], [0.0, 1.0, 0.0]);
        assert_eq!(frame.row(3).unwrap()[3..], [0.0, 0.0, 1.0]);

        let mut frame = cars();
        let err = frame.one_hot("origin", &[(1.0, "usa")]);
        assert!(matches!(err, Err(FrameError::UnknownCategory { row: 1, .. })));
        // a failed encoding leaves the frame untouched
        assert_eq!(frame.width(), 4);
    }

    #[test]
    fn test_describe() {
        let stats = cars().describe();
        assert_eq!(stats[0].name, "mpg");
        assert_relative_eq!(stats[0].mean, 24.5);
        // sample std of [18, 25, 31, 24]
        assert_relative_eq!(stats[0].std, 5.322906474223771, epsilon = 1e-12);
        // horsepower skips the missing value
        assert_relative_eq!(stats[2].mean, 96.66666666666667, epsilon = 1e-12);
    }

    #[test]
    fn test_try_map_columns() {
        let mut frame = cars();
        frame
            .try_map_columns(|name, values| {
                if name == "mpg" {
                    values.iter_mut().for_each(|v| *v *= 2.0);
                }
                Ok::<_, ()>(())
            })
            .unwrap();
        assert_eq!(frame.column("mpg").unwrap().values, [36.0, 50.0, 62.0, 48.0]);
        assert_eq!(frame.column("cylinders").unwrap().values, [8.0, 4.0, 4.0, 4.0]);

        let err = frame.try_map_columns(|name, _| if name == "horsepower" { Err(name.to_string()) } else { Ok(()) });
        assert_eq!(err, Err("horsepower".to_string()));
    }

    #[test]
    fn test_select_rows() {
        let frame = cars();
        let picked = frame.select_rows(&[3, 0]).unwrap();
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.column("mpg").unwrap().values, [24.0, 18.0]);
        assert!(matches!(frame.select_rows(&[9]), Err(FrameError::RowOutOfRange { row: 9, len: 4 })));
    }
}
