extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod assemble;
pub mod error;
pub mod fe;
pub mod io;
pub mod linalg;
pub mod mesh;
pub mod problems;
pub mod quadrature;
pub mod space;
pub mod sparse;
pub mod util;

pub use error::{Error, Result};
