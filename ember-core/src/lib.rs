mod shape;
mod dtype;
mod storage;
mod tensor;
mod error;

pub use shape::*;
pub use dtype::*;
pub use storage::*;
pub use tensor::*;
pub use error::*;
