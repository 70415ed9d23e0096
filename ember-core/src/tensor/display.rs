use std::fmt;
use crate::WithDType;
use super::Tensor;

// Rows of the innermost axis longer than this are elided in the middle.
const MAX_ROW_ITEMS: usize = 8;

impl<T: WithDType> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.storage().data();
        if self.is_scalar() {
            return write!(f, "Tensor({}, dtype={})", data[0], self.dtype());
        }

        write!(f, "Tensor(")?;
        write_axis(f, data, self.dims())?;
        write!(f, ", shape={}, dtype={})", self.shape(), self.dtype())
    }
}

impl<T: WithDType> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor[id={}, shape={}, dtype={}]", self.id().value(), self.shape(), self.dtype())
    }
}

fn write_axis<T: WithDType>(f: &mut fmt::Formatter<'_>, data: &[T], dims: &[usize]) -> fmt::Result {
    write!(f, "[")?;
    if dims.len() == 1 {
        let n = dims[0];
        for (i, v) in data.iter().enumerate() {
            if n > MAX_ROW_ITEMS && i == MAX_ROW_ITEMS / 2 {
                write!(f, ", ...")?;
            }
            if n > MAX_ROW_ITEMS && i >= MAX_ROW_ITEMS / 2 && i < n - MAX_ROW_ITEMS / 2 {
                continue;
            }
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
    } else {
        let step: usize = dims[1..].iter().product();
        for i in 0..dims[0] {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_axis(f, &data[i * step..(i + 1) * step], &dims[1..])?;
        }
    }
    write!(f, "]")
}
