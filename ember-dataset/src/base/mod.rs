mod iter;
mod memory;
mod batcher;
mod dataloader;
pub use iter::*;
pub use memory::*;
pub use batcher::*;
pub use dataloader::*;

/// An indexable, length-reporting collection of items.
///
/// This is the whole contract a [`DataLoader`] relies on: `get(i)` must return
/// `Some` for every `i < len()` and `None` past the end.
pub trait Dataset<I>: Send + Sync {
    /// Gets the item at the given index.
    fn get(&self, index: usize) -> Option<I>;

    /// Gets the number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the dataset.
    fn iter(&self) -> DatasetIterator<'_, I>
    where
        Self: Sized,
    {
        DatasetIterator::new(self)
    }
}

impl<D, I> Dataset<I> for std::sync::Arc<D>
where
    D: Dataset<I> + ?Sized,
{
    fn get(&self, index: usize) -> Option<I> {
        self.as_ref().get(index)
    }

    fn len(&self) -> usize {
        self.as_ref().len()
    }
}
