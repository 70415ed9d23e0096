use std::marker::PhantomData;
use ember_core::{Tensor, WithDType};

/// Turns a chunk of dataset items into one batch.
pub trait Batcher<I, O>: Send + Sync {
    type Error;
    fn batch(&self, items: Vec<I>) -> Result<O, Self::Error>;
}

/// Stacks `(input, target)` tensor pairs along a new leading batch axis.
pub struct TensorPairBatcher<T>(PhantomData<T>);

impl<T> TensorPairBatcher<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for TensorPairBatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: WithDType> Batcher<(Tensor<T>, Tensor<T>), (Tensor<T>, Tensor<T>)> for TensorPairBatcher<T> {
    type Error = ember_core::Error;

    fn batch(&self, items: Vec<(Tensor<T>, Tensor<T>)>) -> Result<(Tensor<T>, Tensor<T>), Self::Error> {
        let (xs, ys): (Vec<_>, Vec<_>) = items.into_iter().unzip();
        let xs = Tensor::stack(&xs, 0)?;
        let ys = Tensor::stack(&ys, 0)?;
        Ok((xs, ys))
    }
}
