mod auto_mpg;
pub use auto_mpg::*;
