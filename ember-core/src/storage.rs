use crate::{DType, Shape, WithDType};

/// Contiguous, row-major element buffer backing a tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Storage<T>(pub(crate) Vec<T>);

impl<T: WithDType> Storage<T> {
    pub fn new<D: Into<Vec<T>>>(data: D) -> Self {
        Self(data.into())
    }

    pub fn zeros(shape: &Shape) -> Self {
        Self::full(T::default(), shape)
    }

    pub fn full(value: T, shape: &Shape) -> Self {
        Self(vec![value; shape.element_count()])
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    #[inline]
    pub fn copy_data(&self) -> Vec<T> {
        self.0.clone()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn copy_map<F, U>(&self, f: F) -> Storage<U> 
    where 
        U: WithDType,
        F: Fn(T) -> U
    {
        Storage(self.0.iter().map(|v| f(*v)).collect())
    }
}
