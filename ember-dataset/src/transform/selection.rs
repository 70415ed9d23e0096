use std::sync::Arc;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use crate::{Dataset, DatasetError, DatasetResult};

/// A view of a wrapped dataset through a list of indices.
pub struct SubsetDataset<D> {
    pub wrapped: Arc<D>,
    pub indices: Vec<usize>,
}

impl<D> SubsetDataset<D> {
    /// Creates a new selection dataset with the given dataset and indices without checking bounds.
    ///
    /// ## Arguments
    ///
    /// * `dataset` - The original dataset to select from.
    /// * `indices` - A vector of indices to select from the dataset.
    pub fn new(dataset: impl Into<Arc<D>>, indices: Vec<usize>) -> Self {
        Self { wrapped: dataset.into(), indices }
    }

    /// Creates a new selection dataset with the given dataset and indices.
    ///
    /// Checks that all indices are within the bounds of the dataset.
    pub fn from_indices<I>(dataset: impl Into<Arc<D>>, indices: Vec<usize>) -> DatasetResult<Self>
    where
        D: Dataset<I>,
    {
        let dataset = dataset.into();

        let size = dataset.len();
        if let Some(&idx) = indices.iter().find(|&i| *i >= size) {
            Err(DatasetError::IndexOutOfRangeWhenSelectDataset(idx, size, "from indices"))?;
        }

        Ok(Self::new(dataset, indices))
    }

    /// Creates a new selection dataset that selects all indices from the dataset.
    pub fn select_all<I>(dataset: impl Into<Arc<D>>) -> Self
    where
        D: Dataset<I>,
    {
        let dataset = dataset.into();
        let size = dataset.len();
        Self::new(dataset, iota(size))
    }

    /// Creates a new dataset that is a slice of the current selection dataset.
    ///
    /// Slices the *selection indices* from `[start..end]`; the result shares
    /// the same wrapped dataset.
    pub fn slice(&self, start: usize, end: usize) -> DatasetResult<Self> {
        let len = self.indices.len();
        if end > len {
            Err(DatasetError::IndexOutOfRangeWhenSelectDataset(end, len, "slice"))?;
        }
        if start > end {
            Err(DatasetError::SliceStartAfterEnd { start, end })?;
        }
        Ok(Self::new(self.wrapped.clone(), self.indices[start..end].to_vec()))
    }

    /// Split into `num` datasets by slicing the selection indices evenly.
    ///
    /// The first `len % num` parts hold one extra item.
    pub fn split(&self, num: usize) -> DatasetResult<Vec<Self>> {
        if num == 0 {
            Err(DatasetError::NumSplitZeroWhenSelectDataset)?;
        }

        let n = self.indices.len();
        let mut datasets = Vec::with_capacity(num);

        let base_size = n / num;
        let remainder = n % num;

        let mut start = 0;
        for i in 0..num {
            let size = base_size + (if i < remainder { 1 } else { 0 });
            let end = start + size;

            datasets.push(self.slice(start, end)?);

            start = end;
        }

        Ok(datasets)
    }
}

impl<D, I> Dataset<I> for SubsetDataset<D>
where
    D: Dataset<I>,
{
    fn get(&self, index: usize) -> Option<I> {
        let index = self.indices.get(index)?;
        self.wrapped.get(*index)
    }

    fn len(&self) -> usize {
        self.indices.len()
    }
}

/// Shuffles the dataset indices with a seeded generator and cuts them at
/// `floor(len * ratio)`.
///
/// The same `seed` always yields the same two subsets, so a train/test split
/// is reproducible across runs.
pub fn random_split<D, I>(
    dataset: D,
    ratio: f64,
    seed: u64,
) -> DatasetResult<(SubsetDataset<D>, SubsetDataset<D>)>
where
    D: Dataset<I>,
{
    if !(0.0..=1.0).contains(&ratio) {
        Err(DatasetError::InvalidSplitRatio(ratio))?;
    }

    let length = dataset.len();
    let mut indices = iota(length);

    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let split_idx = (length as f64 * ratio).floor() as usize;
    let (indices1, indices2) = indices.split_at(split_idx);
    log::debug!("random split: {} / {} items (seed {})", indices1.len(), indices2.len(), seed);

    let dataset = Arc::new(dataset);
    let subset1 = SubsetDataset::new(dataset.clone(), indices1.to_vec());
    let subset2 = SubsetDataset::new(dataset, indices2.to_vec());

    Ok((subset1, subset2))
}

#[inline(always)]
fn iota(size: usize) -> Vec<usize> {
    (0..size).collect()
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use crate::InMemoryDataset;
    use super::*;

    type Numbers = InMemoryDataset<u32>;

    fn numbers(n: u32) -> Numbers {
        InMemoryDataset::new((0..n).collect())
    }

    #[test]
    fn test_from_indices() {
        let subset = SubsetDataset::<Numbers>::from_indices(numbers(5), vec![4, 0]).unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.get(0), Some(4));
        assert_eq!(subset.get(1), Some(0));
        assert_eq!(subset.get(2), None);

        assert!(matches!(
            SubsetDataset::<Numbers>::from_indices(numbers(5), vec![1, 5]),
            Err(DatasetError::IndexOutOfRangeWhenSelectDataset(5, 5, _))
        ));
    }

    #[test]
    fn test_slice_and_split() {
        let all = SubsetDataset::<Numbers>::select_all(numbers(7));
        assert_eq!(all.len(), 7);

        let tail = all.slice(5, 7).unwrap();
        assert_eq!(tail.iter().collect::<Vec<_>>(), [5, 6]);
        assert!(all.slice(3, 8).is_err());
        assert!(matches!(all.slice(4, 3), Err(DatasetError::SliceStartAfterEnd { start: 4, end: 3 })));
        assert_eq!(all.slice(7, 7).unwrap().len(), 0);

        let parts = all.split(3).unwrap();
        let sizes: Vec<usize> = parts.iter().map(|p| p.len()).collect();
        assert_eq!(sizes, [3, 2, 2]);
        assert_eq!(parts[2].iter().collect::<Vec<_>>(), [5, 6]);

        assert!(matches!(all.split(0), Err(DatasetError::NumSplitZeroWhenSelectDataset)));
    }

    #[test]
    fn test_random_split_partitions() {
        let (train, test) = random_split(numbers(10), 0.8, 0).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);

        let mut seen: HashSet<u32> = train.iter().collect();
        seen.extend(test.iter());
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_random_split_is_seeded() {
        let (a, _) = random_split(numbers(50), 0.5, 42).unwrap();
        let (b, _) = random_split(numbers(50), 0.5, 42).unwrap();
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_random_split_edge_ratios() {
        let (none, all) = random_split(numbers(6), 0.0, 3).unwrap();
        assert!(none.is_empty());
        assert_eq!(all.len(), 6);

        let (all, none) = random_split(numbers(6), 1.0, 3).unwrap();
        assert_eq!(all.len(), 6);
        assert!(none.is_empty());
        assert!(none.iter().next().is_none());
    }

    #[test]
    fn test_random_split_bad_ratio() {
        assert!(matches!(
            random_split(numbers(3), 1.5, 0),
            Err(DatasetError::InvalidSplitRatio(_))
        ));
    }
}
