//! Dataset abstraction and data loading for ember.
//!
//! A [`Dataset`] is anything that can hand out an item by index and report
//! how many items it holds. A [`DataLoader`] walks a dataset in fixed-size
//! chunks and turns each chunk into a batch with a [`Batcher`].
//!
//! [`common::AutoMpgDataset`] wraps the UCI Auto MPG table, read into a
//! [`DataFrame`], as a dataset of `(features, mpg)` tensor pairs.

mod base;
mod error;
mod utils;
mod datasets;
pub mod frame;
pub mod transform;
pub use base::*;
pub use error::*;
pub use datasets::*;
pub use frame::{Column, ColumnStats, DataFrame, FrameError};
pub use utils::UtilError;
