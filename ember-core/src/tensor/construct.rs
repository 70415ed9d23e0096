use std::sync::Arc;
use crate::{Error, Result, Shape, Storage, WithDType};
use super::{Tensor, TensorId, TensorImpl};

impl<T: WithDType> Tensor<T> {
    /// Creates a new `Tensor` from any supported Rust array or slice.
    ///
    /// ```rust
    /// use ember_core::Tensor;
    ///
    /// let a = Tensor::new(&[1u32, 2, 3]).unwrap();
    /// assert_eq!(a.dims(), &[3]);
    /// ```
    pub fn new<A: ToTensor<T>>(array: A) -> Result<Self> {
        let shape = array.shape()?;
        let storage = array.to_storage()?;
        Ok(Self::from_storage(storage, shape))
    }

    /// Creates a tensor from a flat row-major buffer and the shape it should take.
    ///
    /// ```rust
    /// use ember_core::Tensor;
    ///
    /// let a = Tensor::from_vec(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], (2, 3)).unwrap();
    /// assert_eq!(a.dims(), &[2, 3]);
    /// assert!(Tensor::from_vec(vec![1.0f32, 2.0], 3).is_err());
    /// ```
    pub fn from_vec<S: Into<Shape>>(data: Vec<T>, shape: S) -> Result<Self> {
        let shape: Shape = shape.into();
        if data.len() != shape.element_count() {
            Err(Error::ElementSizeMismatch {
                expected: shape.element_count(),
                got: data.len(),
                op: "from_vec",
            })?
        }
        Ok(Self::from_storage(Storage::new(data), shape))
    }

    /// Creates an array full with a constant `value`.
    pub fn full<S: Into<Shape>>(shape: S, value: T) -> Result<Self> {
        let shape: Shape = shape.into();
        let storage = Storage::full(value, &shape);
        Ok(Self::from_storage(storage, shape))
    }

    /// Creates an array filled with the dtype's default (zero) value.
    pub fn zeros<S: Into<Shape>>(shape: S) -> Result<Self> {
        let shape: Shape = shape.into();
        let storage = Storage::zeros(&shape);
        Ok(Self::from_storage(storage, shape))
    }

    pub(crate) fn from_storage<S: Into<Shape>>(storage: Storage<T>, shape: S) -> Self {
        let tensor_ = TensorImpl {
            id: TensorId::new(),
            storage: Arc::new(storage),
            shape: shape.into(),
        };
        Tensor(Arc::new(tensor_))
    }
}

pub trait ToTensor<T> {
    fn shape(&self) -> Result<Shape>;
    fn to_storage(self) -> Result<Storage<T>>;
}

impl<D: WithDType> ToTensor<D> for D {
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::scalar())
    }

    fn to_storage(self) -> Result<Storage<D>> {
        Ok(Storage::new([self].to_vec()))
    }
}

impl<S: WithDType, const N: usize> ToTensor<S> for &[S; N] {
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from(self.len()))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        Ok(Storage::new(self.to_vec()))
    }
}

impl<S: WithDType, const N: usize> ToTensor<S> for [S; N] {
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from(N))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        Ok(Storage::new(self.to_vec()))
    }
}

impl<S: WithDType> ToTensor<S> for &[S] {
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from(self.len()))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        Ok(Storage::new(self.to_vec()))
    }
}

impl<S: WithDType> ToTensor<S> for Vec<S> {
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from(self.len()))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        Ok(Storage::new(self))
    }
}

impl<S: WithDType, const N1: usize, const N2: usize> ToTensor<S>
    for &[[S; N2]; N1]
{
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from((N1, N2)))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        Ok(Storage::new(self.concat()))
    }
}
