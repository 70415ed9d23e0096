use std::marker::PhantomData;
use crate::Dataset;

/// Per-item conversion applied lazily by [`MapDataset`].
pub trait Map<I, O>: Send + Sync {
    fn map(&self, item: &I) -> O;
}

impl<I, O, F> Map<I, O> for F
where
    F: Fn(&I) -> O + Send + Sync,
{
    fn map(&self, item: &I) -> O {
        self(item)
    }
}

pub struct MapDataset<D, M, I> {
    dataset: D,
    map: M,
    input: PhantomData<fn() -> I>,
}

impl<D, M, I> MapDataset<D, M, I> {
    pub fn new(dataset: D, map: M) -> Self {
        Self { dataset, map, input: PhantomData }
    }

    pub fn inner(&self) -> &D {
        &self.dataset
    }
}

impl<D, M, I, O> Dataset<O> for MapDataset<D, M, I> 
where 
    D: Dataset<I>,
    M: Map<I, O>,
{
    fn get(&self, index: usize) -> Option<O> {
        let item = self.dataset.get(index);
        item.map(|item| self.map.map(&item))
    }

    fn len(&self) -> usize {
        self.dataset.len()   
    }
}
