mod construct;
mod shape;
mod display;

pub use construct::ToTensor;
use std::{hash::Hash, sync::Arc};
use crate::{Error, FloatDType, Result};
use super::{DType, Dim, Shape, Storage, WithDType};

/// Cheaply clonable handle to an immutable, contiguous n-d array.
///
/// Cloning a `Tensor` shares the underlying buffer; every operation that
/// changes data or element layout produces a fresh tensor.
#[derive(Clone)]
pub struct Tensor<T: WithDType>(pub(crate) Arc<TensorImpl<T>>);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TensorId(usize);

pub struct TensorImpl<T: WithDType> {
    pub(crate) id: TensorId,
    pub(crate) storage: Arc<Storage<T>>,
    pub(crate) shape: Shape,
}

impl TensorId {
    pub fn new() -> Self {
        use std::sync::atomic;
        static COUNTER: atomic::AtomicUsize = atomic::AtomicUsize::new(1);
        Self(COUNTER.fetch_add(1, atomic::Ordering::Relaxed))
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

impl Default for TensorId {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: WithDType> Hash for Tensor<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.id.0.hash(state);
    }
}

impl<T: WithDType> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.id.0 == other.0.id.0
    }
}

impl<T: WithDType> Eq for Tensor<T> {}

impl<T: WithDType> AsRef<Tensor<T>> for Tensor<T> {
    fn as_ref(&self) -> &Tensor<T> {
        self
    }
}

impl<T: WithDType> Tensor<T> {
    pub fn is_scalar(&self) -> bool {
        self.shape().is_scalar()
    }

    pub fn check_scalar(&self) -> Result<()> {
        if !self.is_scalar() {
            Err(Error::NotScalar)?
        } else {
            Ok(())
        }
    }

    pub fn to_scalar(&self) -> Result<T> {
        self.check_scalar()?;
        self.0.storage.get(0).ok_or(Error::NotScalar)
    }
}

impl<T: WithDType> Tensor<T> {
    pub fn id(&self) -> TensorId {
        self.0.id
    }

    pub fn shape(&self) -> &Shape {
        &self.0.shape
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    pub fn dims(&self) -> &[usize] {
        self.shape().dims()
    }

    pub fn dim<D: Dim>(&self, dim: D) -> Result<usize> {
        let dim = dim.to_index(self.shape(), "dim")?;
        Ok(self.dims()[dim])
    }

    pub fn storage(&self) -> &Storage<T> {
        &self.0.storage
    }

    pub fn element_count(&self) -> usize {
        self.shape().element_count()
    }

    pub fn rank(&self) -> usize {
        self.shape().rank()
    }

    /// Flat copy of all elements in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.0.storage.copy_data()
    }

    /// Converts every element to another dtype.
    pub fn cast<U: WithDType>(&self) -> Tensor<U> {
        let storage = self.0.storage.copy_map(|v| U::from_f64(v.to_f64()));
        Tensor::from_storage(storage, self.shape())
    }
}

impl<T: FloatDType> Tensor<T> {
    pub fn allclose(&self, other: &Self, rtol: f64, atol: f64) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.storage().data().iter()
            .zip(other.storage().data().iter())
            .all(|(a, b)| a.close(*b, rtol, atol))
    }
}
