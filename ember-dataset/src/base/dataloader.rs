use crate::{DatasetError, DatasetResult};
use super::{Batcher, Dataset};

/// Walks a dataset in order, `batch_size` items at a time, and hands every
/// chunk to a [`Batcher`]. The last batch is shorter when the dataset length
/// is not a multiple of `batch_size`.
pub struct DataLoader<I, O, E> {
    dataset: Box<dyn Dataset<I>>,
    batcher: Box<dyn Batcher<I, O, Error = E>>,
    batch_size: usize,
}

pub struct DataLoaderIter<'a, I, O, E> {
    loader: &'a DataLoader<I, O, E>,
    cursor: usize,
}

pub struct DataLoaderIntoIter<I, O, E> {
    loader: DataLoader<I, O, E>,
    cursor: usize,
}

impl<I, O, E> DataLoader<I, O, E> {
    pub fn new(
        dataset: impl Dataset<I> + 'static,
        batcher: impl Batcher<I, O, Error = E> + 'static,
        batch_size: usize,
    ) -> DatasetResult<Self> {
        if batch_size == 0 {
            Err(DatasetError::ZeroBatchSize)?;
        }
        log::debug!("data loader over {} items, batch size {}", dataset.len(), batch_size);

        Ok(Self {
            dataset: Box::new(dataset),
            batcher: Box::new(batcher),
            batch_size,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches one pass yields, counting a trailing short batch.
    pub fn batch_count(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size)
    }

    pub fn dataset(&self) -> &dyn Dataset<I> {
        self.dataset.as_ref()
    }

    pub fn iter(&self) -> DataLoaderIter<'_, I, O, E> {
        DataLoaderIter { loader: self, cursor: 0 }
    }
}

impl<I, O, E> Iterator for DataLoaderIntoIter<I, O, E> {
    type Item = Result<O, E>;
    fn next(&mut self) -> Option<Self::Item> {
        iter_next(&self.loader, &mut self.cursor)
    }
}

impl<I, O, E> Iterator for DataLoaderIter<'_, I, O, E> {
    type Item = Result<O, E>;
    fn next(&mut self) -> Option<Self::Item> {
        iter_next(self.loader, &mut self.cursor)
    }
}

impl<I, O, E> IntoIterator for DataLoader<I, O, E> {
    type IntoIter = DataLoaderIntoIter<I, O, E>;
    type Item = Result<O, E>;
    fn into_iter(self) -> Self::IntoIter {
        DataLoaderIntoIter {
            loader: self,
            cursor: 0,
        }
    }
}

impl<'a, I, O, E> IntoIterator for &'a DataLoader<I, O, E> {
    type IntoIter = DataLoaderIter<'a, I, O, E>;
    type Item = Result<O, E>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn iter_next<I, O, E>(loader: &DataLoader<I, O, E>, cursor: &mut usize) -> Option<Result<O, E>> {
    let begin = *cursor;
    let len = loader.dataset.len();
    if begin >= len {
        return None;
    }

    let end = (begin + loader.batch_size).min(len);
    // A dataset that reports `len` but returns `None` early ends the pass.
    let items: Vec<I> = (begin..end).map_while(|index| loader.dataset.get(index)).collect();
    if items.is_empty() {
        *cursor = len;
        return None;
    }

    *cursor = end;
    Some(loader.batcher.batch(items))
}

#[cfg(test)]
mod test {
    use std::convert::Infallible;
    use crate::InMemoryDataset;
    use super::*;

    struct SumBatcher;

    impl Batcher<u32, u32> for SumBatcher {
        type Error = Infallible;
        fn batch(&self, items: Vec<u32>) -> Result<u32, Infallible> {
            Ok(items.iter().sum())
        }
    }

    #[test]
    fn test_batches_in_order() {
        let ds = InMemoryDataset::new((1..=7).collect::<Vec<u32>>());
        let loader = DataLoader::new(ds, SumBatcher, 3).unwrap();
        assert_eq!(loader.batch_count(), 3);

        let sums: Vec<u32> = loader.iter().map(|b| b.unwrap()).collect();
        assert_eq!(sums, [1 + 2 + 3, 4 + 5 + 6, 7]);

        // iterating twice gives the same batches
        let again: Vec<u32> = (&loader).into_iter().map(|b| b.unwrap()).collect();
        assert_eq!(again, sums);
    }

    #[test]
    fn test_into_iter() {
        let ds = InMemoryDataset::new(vec![2u32, 4, 6, 8]);
        let loader = DataLoader::new(ds, SumBatcher, 2).unwrap();
        let sums: Vec<u32> = loader.into_iter().map(|b| b.unwrap()).collect();
        assert_eq!(sums, [6, 14]);
    }

    #[test]
    fn test_zero_batch_size() {
        let ds = InMemoryDataset::new(vec![1u32]);
        assert!(matches!(
            DataLoader::new(ds, SumBatcher, 0),
            Err(DatasetError::ZeroBatchSize)
        ));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = InMemoryDataset::<u32>::new(vec![]);
        let loader = DataLoader::new(ds, SumBatcher, 4).unwrap();
        assert_eq!(loader.batch_count(), 0);
        assert!(loader.iter().next().is_none());
    }

    /// Reports more items than it can hand out.
    struct Truncated {
        claimed: usize,
        stored: Vec<u32>,
    }

    impl Dataset<u32> for Truncated {
        fn get(&self, index: usize) -> Option<u32> {
            self.stored.get(index).copied()
        }

        fn len(&self) -> usize {
            self.claimed
        }
    }

    #[test]
    fn test_dataset_ending_early() {
        let ds = Truncated { claimed: 6, stored: vec![1, 2, 3] };
        let loader = DataLoader::new(ds, SumBatcher, 2).unwrap();
        assert_eq!(loader.batch_count(), 3);

        // the pass stops inside the second batch and never yields an empty one
        let sums: Vec<u32> = loader.iter().map(|b| b.unwrap()).collect();
        assert_eq!(sums, [1 + 2, 3]);
    }

    #[test]
    fn test_batch_larger_than_dataset() {
        let ds = InMemoryDataset::new(vec![5u32, 5]);
        let loader = DataLoader::new(ds, SumBatcher, 64).unwrap();
        assert_eq!(loader.batch_count(), 1);
        let sums: Vec<u32> = loader.iter().map(|b| b.unwrap()).collect();
        assert_eq!(sums, [10]);
    }
}
