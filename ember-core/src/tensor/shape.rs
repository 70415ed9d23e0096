use crate::{Dim, Error, Result, Shape, Storage, WithDType};
use super::Tensor;

impl<T: WithDType> Tensor<T> {
    /// Returns a tensor with the same data and a new shape.
    ///
    /// ```rust
    /// use ember_core::Tensor;
    ///
    /// let a = Tensor::new(&[1u32, 2, 3, 4, 5, 6]).unwrap();
    /// let b = a.reshape((2, 3)).unwrap();
    /// assert_eq!(b.dims(), &[2, 3]);
    /// ```
    pub fn reshape<S: Into<Shape>>(&self, shape: S) -> Result<Self> {
        let shape: Shape = shape.into();
        if shape.element_count() != self.element_count() {
            Err(Error::ElementSizeMismatch {
                expected: self.element_count(),
                got: shape.element_count(),
                op: "reshape",
            })?
        }

        Ok(Self::share_storage(self, shape))
    }

    /// Inserts an axis of size 1 at `dim`.
    pub fn unsqueeze<D: Dim>(&self, dim: D) -> Result<Self> {
        let dim = dim.to_index_plus_one(self.shape(), "unsqueeze")?;
        let mut dims = self.dims().to_vec();
        dims.insert(dim, 1);
        Ok(Self::share_storage(self, dims))
    }

    /// Concatenates two or more tensors along a particular dimension.
    ///
    /// All tensors must have the same rank and agree on every other dimension.
    ///
    /// ```rust
    /// use ember_core::Tensor;
    /// let a = Tensor::<f32>::zeros((2, 3)).unwrap();
    /// let b = Tensor::<f32>::zeros((2, 3)).unwrap();
    ///
    /// let c = Tensor::cat(&[&a, &b], 0).unwrap();
    /// assert_eq!(c.dims(), &[4, 3]);
    ///
    /// let c = Tensor::cat(&[&a, &b], 1).unwrap();
    /// assert_eq!(c.dims(), &[2, 6]);
    /// ```
    pub fn cat<A: AsRef<Tensor<T>>, D: Dim>(arrs: &[A], dim: D) -> Result<Self> {
        if arrs.is_empty() {
            Err(Error::OpRequiresAtLeastOneTensor { op: "cat" })?
        }

        let arr0 = arrs[0].as_ref();
        let rank0 = arr0.rank();
        let cat_dim = dim.to_index(arr0.shape(), "cat")?;
        let mut target_dims = arr0.dims().to_vec();
        target_dims[cat_dim] = 0;

        for (arr_index, arr) in arrs.iter().enumerate() {
            let arr = arr.as_ref();
            if arr.rank() != rank0 {
                Err(Error::UnexpectedNumberOfDims {
                    expected: rank0,
                    got: arr.rank(),
                    shape: arr.shape().clone(),
                })?
            }

            for (dim_index, (v1, v2)) in arr0.dims().iter().zip(arr.dims().iter()).enumerate() {
                if dim_index == cat_dim {
                    target_dims[cat_dim] += v2;
                } else if v1 != v2 {
                    Err(Error::ShapeMismatchCat {
                        dim: dim_index,
                        first_shape: arr0.shape().clone(),
                        n: arr_index + 1,
                        nth_shape: arr.shape().clone(),
                    })?
                }
            }
        }

        // Row-major: every input contributes one contiguous block per outer index
        // (the product of the dims before `cat_dim`).
        let target_shape: Shape = target_dims.into();
        let outer: usize = arr0.dims()[..cat_dim].iter().product();
        let blocks: Vec<(&[T], usize)> = arrs
            .iter()
            .map(|arr| {
                let arr = arr.as_ref();
                let block = arr.dims()[cat_dim..].iter().product();
                (arr.storage().data(), block)
            })
            .collect();

        let mut dst: Vec<T> = Vec::with_capacity(target_shape.element_count());
        for o in 0..outer {
            for (data, block) in blocks.iter() {
                dst.extend_from_slice(&data[o * block..(o + 1) * block]);
            }
        }

        Ok(Self::from_storage(Storage::new(dst), target_shape))
    }

    /// Stacks two or more tensors along a new dimension.
    ///
    /// All tensors must have the same shape, and the output has one additional rank.
    ///
    /// ```rust
    /// use ember_core::Tensor;
    /// let a = Tensor::<f32>::zeros((2, 3)).unwrap();
    /// let b = Tensor::<f32>::zeros((2, 3)).unwrap();
    ///
    /// let c = Tensor::stack(&[&a, &b], 0).unwrap();
    /// assert_eq!(c.dims(), &[2, 2, 3]);
    ///
    /// let c = Tensor::stack(&[&a, &b], 2).unwrap();
    /// assert_eq!(c.dims(), &[2, 3, 2]);
    /// ```
    pub fn stack<A: AsRef<Tensor<T>>, D: Dim>(args: &[A], dim: D) -> Result<Self> {
        if args.is_empty() {
            Err(Error::OpRequiresAtLeastOneTensor { op: "stack" })?
        }
        let dim = dim.to_index_plus_one(args[0].as_ref().shape(), "stack")?;
        let args = args
            .iter()
            .map(|t| t.as_ref().unsqueeze(dim))
            .collect::<Result<Vec<_>>>()?;
        Self::cat(&args, dim)
    }

    fn share_storage<S: Into<Shape>>(&self, shape: S) -> Self {
        use std::sync::Arc;
        use super::{TensorId, TensorImpl};
        Tensor(Arc::new(TensorImpl {
            id: TensorId::new(),
            storage: self.0.storage.clone(),
            shape: shape.into(),
        }))
    }
}
