use std::path::{Path, PathBuf};
use ember_core::Tensor;
use crate::{utils, Batcher, ColumnStats, Column, DataFrame, Dataset, FrameError};

// UCI Machine Learning Repository
const URL: &str = "https://archive.ics.uci.edu/ml/machine-learning-databases/auto-mpg/";
const FILE_NAME: &str = "auto-mpg.data";

/// Numeric columns of the table, in file order. The trailing car name is not kept.
pub const COLUMN_NAMES: [&str; 8] = [
    "mpg",
    "cylinders",
    "displacement",
    "horsepower",
    "weight",
    "acceleration",
    "model_year",
    "origin",
];

pub const LABEL: &str = "mpg";

/// `origin` codes and the indicator columns they expand to.
pub const ORIGINS: [(f64, &str); 3] = [(1.0, "usa"), (2.0, "europe"), (3.0, "japan")];

const MISSING: &str = "?";

/// How to turn the raw table into a dataset.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct AutoMpgConfig {
    /// Where the downloaded file is cached; `~/.cache/ember-dataset` when unset.
    pub cache_dir: Option<PathBuf>,
    /// Column popped off the table and returned as the label.
    pub label: String,
    /// Drop rows with a missing value (six cars lack `horsepower`).
    pub drop_na: bool,
    /// Replace `origin` with `usa` / `europe` / `japan` indicator columns.
    pub one_hot_origin: bool,
}

impl Default for AutoMpgConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            label: LABEL.to_string(),
            drop_na: true,
            one_hot_origin: true,
        }
    }
}

impl AutoMpgConfig {
    pub fn cache_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    pub fn drop_na(mut self, drop_na: bool) -> Self {
        self.drop_na = drop_na;
        self
    }

    pub fn one_hot_origin(mut self, one_hot: bool) -> Self {
        self.one_hot_origin = one_hot;
        self
    }
}

/// `(features, label)`: a 1-D feature tensor and a scalar label tensor.
pub type AutoMpgItem = (Tensor<f32>, Tensor<f32>);

/// The Auto MPG table exposed as a dataset.
///
/// The label column is popped off the frame when the dataset is built; every
/// remaining column is a feature, in frame order. Item `i` is row `i` of the
/// table.
#[derive(Debug, Clone)]
pub struct AutoMpgDataset {
    features: DataFrame,
    labels: Column,
}

impl Dataset<AutoMpgItem> for AutoMpgDataset {
    fn get(&self, index: usize) -> Option<AutoMpgItem> {
        let row = self.features.row(index)?;
        let label = *self.labels.values.get(index)?;

        let width = row.len();
        let features = row.into_iter().map(|v| v as f32).collect();
        let features = Tensor::from_vec(features, width).ok()?;
        let label = Tensor::new(label as f32).ok()?;
        Some((features, label))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

impl AutoMpgDataset {
    /// Downloads the table once into the cache directory and loads it.
    pub fn load(config: &AutoMpgConfig) -> AutoMpgResult<Self> {
        let path = Self::download(config.cache_dir.as_deref())?;
        Self::from_path(&path, config)
    }

    /// Loads a local copy: `.csv` files are read with a header row, anything
    /// else as the whitespace-separated UCI `.data` format.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &AutoMpgConfig) -> AutoMpgResult<Self> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let frame = if is_csv {
            read_csv(std::fs::File::open(path)?)?
        } else {
            read_raw(&std::fs::read_to_string(path)?)?
        };
        log::debug!("read {} rows from {}", frame.len(), path.display());

        Self::from_raw_frame(frame, config)
    }

    /// Applies the cleaning steps of `config` to a freshly parsed table.
    ///
    /// `origin` is left as a raw code when it is the label itself.
    pub fn from_raw_frame(mut frame: DataFrame, config: &AutoMpgConfig) -> AutoMpgResult<Self> {
        if config.drop_na {
            frame.drop_na();
        }
        if config.one_hot_origin {
            if config.label == "origin" {
                log::debug!("origin is the label, keeping its raw codes");
            } else {
                frame.one_hot("origin", &ORIGINS)?;
            }
        }
        Self::from_frame(frame, &config.label)
    }

    /// Wraps a cleaned frame, popping `label` off as the target column.
    pub fn from_frame(mut frame: DataFrame, label: &str) -> AutoMpgResult<Self> {
        let labels = frame.pop(label)?;
        Ok(Self { features: frame, labels })
    }

    pub fn feature_names(&self) -> Vec<&str> {
        self.features.column_names()
    }

    pub fn label_name(&self) -> &str {
        &self.labels.name
    }

    /// The feature columns (the label is no longer part of it).
    pub fn frame(&self) -> &DataFrame {
        &self.features
    }

    pub fn labels(&self) -> &Column {
        &self.labels
    }

    /// Mean and standard deviation of every feature column.
    pub fn feature_stats(&self) -> Vec<ColumnStats> {
        self.features.describe()
    }

    /// A dataset holding only the given rows, in the given order.
    ///
    /// Fails with [`FrameError::RowOutOfRange`] when an index is past the end.
    pub fn select(&self, indices: &[usize]) -> AutoMpgResult<Self> {
        let features = self.features.select_rows(indices)?;
        let labels = Column::new(
            self.labels.name.clone(),
            indices.iter().map(|&i| self.labels.values[i]).collect(),
        );
        Ok(Self { features, labels })
    }

    /// Z-scores every feature with the matching entry of `stats`.
    ///
    /// Stats are looked up by column name, so they can come from another split
    /// of the same table. A column with zero deviation is only centered.
    pub fn standardized(&self, stats: &[ColumnStats]) -> AutoMpgResult<Self> {
        let mut features = self.features.clone();
        features.try_map_columns(|name, values| {
            let stat = stats
                .iter()
                .find(|s| s.name == name)
                .ok_or_else(|| AutoMpgError::MissingStats(name.to_string()))?;
            let scale = if stat.std > 0.0 { stat.std } else { 1.0 };
            values.iter_mut().for_each(|v| *v = (*v - stat.mean) / scale);
            Ok::<_, AutoMpgError>(())
        })?;

        Ok(Self {
            features,
            labels: self.labels.clone(),
        })
    }

    fn download(cache_dir: Option<&Path>) -> AutoMpgResult<PathBuf> {
        let cache_dir = match cache_dir {
            Some(dir) => dir.to_path_buf(),
            None => utils::default_cache_dir()?,
        };
        let file_path = cache_dir.join("auto-mpg").join(FILE_NAME);
        utils::download_to(&format!("{URL}{FILE_NAME}"), &file_path)?;
        Ok(file_path)
    }
}

/// Parses the UCI `auto-mpg.data` layout.
///
/// Each line holds eight whitespace-separated numbers followed by the quoted
/// car name after a tab; `?` marks a missing value.
pub fn read_raw(content: &str) -> AutoMpgResult<DataFrame> {
    let mut rows = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line_no = line_idx + 1;
        let numeric = match line.find(['\t', '"']) {
            Some(pos) => &line[..pos],
            None => line,
        };
        if numeric.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = numeric.split_whitespace().collect();
        if parts.len() != COLUMN_NAMES.len() {
            return Err(AutoMpgError::InvalidLine(line_no, line.to_string()));
        }

        let row = parts
            .iter()
            .map(|field| parse_field(field, line_no))
            .collect::<AutoMpgResult<Vec<_>>>()?;
        rows.push(row);
    }

    Ok(DataFrame::from_rows(&COLUMN_NAMES, &rows)?)
}

/// Parses a CSV export of the table with a header row.
///
/// Headers are matched case-insensitively with spaces read as underscores
/// (`model year` is `model_year`); columns outside [`COLUMN_NAMES`] such as
/// the car name are ignored. Empty fields and `?` are missing values.
pub fn read_csv<R: std::io::Read>(reader: R) -> AutoMpgResult<DataFrame> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase().replace(' ', "_"))
        .collect();
    let positions = COLUMN_NAMES
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| AutoMpgError::MissingColumn(name.to_string()))
        })
        .collect::<AutoMpgResult<Vec<_>>>()?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line_no = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let row = positions
            .iter()
            .map(|&pos| parse_field(record.get(pos).unwrap_or(""), line_no))
            .collect::<AutoMpgResult<Vec<_>>>()?;
        rows.push(row);
    }

    Ok(DataFrame::from_rows(&COLUMN_NAMES, &rows)?)
}

fn parse_field(field: &str, line_no: usize) -> AutoMpgResult<f64> {
    let field = field.trim();
    if field.is_empty() || field == MISSING {
        return Ok(f64::NAN);
    }
    field.parse::<f64>().map_err(|_| AutoMpgError::ParseFormat(line_no))
}

#[derive(Debug, Clone)]
pub struct AutoMpgBatch {
    /// `[batch, features]`
    pub features: Tensor<f32>,
    /// `[batch]`
    pub targets: Tensor<f32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AutoMpgBatcher;

impl Batcher<AutoMpgItem, AutoMpgBatch> for AutoMpgBatcher {
    type Error = AutoMpgError;

    fn batch(&self, items: Vec<AutoMpgItem>) -> AutoMpgResult<AutoMpgBatch> {
        let (features, targets): (Vec<_>, Vec<_>) = items.into_iter().unzip();
        let features = Tensor::stack(&features, 0)?;
        let targets = Tensor::stack(&targets, 0)?;
        Ok(AutoMpgBatch { features, targets })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AutoMpgError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utils(#[from] crate::utils::UtilError),

    #[error(transparent)]
    Core(#[from] ember_core::Error),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Failed to parse float at line {0}")]
    ParseFormat(usize),

    #[error("Invalid line {0}: {1}")]
    InvalidLine(usize, String),

    #[error("Missing column '{0}' in csv header")]
    MissingColumn(String),

    #[error("No statistics for feature '{0}'")]
    MissingStats(String),
}

pub type AutoMpgResult<T> = Result<T, AutoMpgError>;
