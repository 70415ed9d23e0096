use crate::{Error, Result};

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape(pub(crate) Vec<usize>);

impl Shape {
    pub fn scalar() -> Self {
        Self(vec![])
    }

    pub fn from_dims(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn into_dims(self) -> Vec<usize> {
        self.0
    }

    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of elements; a scalar holds exactly one.
    pub fn element_count(&self) -> usize {
        self.0.iter().product()
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &self.0)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &self.0)
    }
}

impl From<()> for Shape {
    fn from(_: ()) -> Self {
        Self::scalar()
    }
}

impl From<usize> for Shape {
    fn from(d1: usize) -> Self {
        Self(vec![d1])
    }
}

impl From<(usize,)> for Shape {
    fn from(d: (usize,)) -> Self {
        Self(vec![d.0])
    }
}

impl From<(usize, usize)> for Shape {
    fn from(d: (usize, usize)) -> Self {
        Self(vec![d.0, d.1])
    }
}

impl From<(usize, usize, usize)> for Shape {
    fn from(d: (usize, usize, usize)) -> Self {
        Self(vec![d.0, d.1, d.2])
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }
}

impl From<&Shape> for Shape {
    fn from(shape: &Shape) -> Self {
        shape.clone()
    }
}

/// Something that names one axis of a shape.
///
/// `usize` is taken as-is, `i32` counts from the end when negative (`-1` is
/// the last axis).
pub trait Dim: Copy {
    fn to_index(&self, shape: &Shape, op: &'static str) -> Result<usize>;

    /// Same as `to_index`, but allows the position one past the last axis,
    /// which is where `stack`/`unsqueeze` may insert a new axis.
    fn to_index_plus_one(&self, shape: &Shape, op: &'static str) -> Result<usize>;
}

impl Dim for usize {
    fn to_index(&self, shape: &Shape, op: &'static str) -> Result<usize> {
        let dim = *self;
        if dim >= shape.rank() {
            Err(Error::DimOutOfRange { shape: shape.clone(), dim: dim as i32, op })?
        } else {
            Ok(dim)
        }
    }

    fn to_index_plus_one(&self, shape: &Shape, op: &'static str) -> Result<usize> {
        let dim = *self;
        if dim > shape.rank() {
            Err(Error::DimOutOfRange { shape: shape.clone(), dim: dim as i32, op })?
        } else {
            Ok(dim)
        }
    }
}

impl Dim for i32 {
    fn to_index(&self, shape: &Shape, op: &'static str) -> Result<usize> {
        let rank = shape.rank() as i32;
        let dim = if *self < 0 { rank + *self } else { *self };
        if dim < 0 || dim >= rank {
            Err(Error::DimOutOfRange { shape: shape.clone(), dim: *self, op })?
        } else {
            Ok(dim as usize)
        }
    }

    fn to_index_plus_one(&self, shape: &Shape, op: &'static str) -> Result<usize> {
        let rank = shape.rank() as i32 + 1;
        let dim = if *self < 0 { rank + *self } else { *self };
        if dim < 0 || dim >= rank {
            Err(Error::DimOutOfRange { shape: shape.clone(), dim: *self, op })?
        } else {
            Ok(dim as usize)
        }
    }
}
