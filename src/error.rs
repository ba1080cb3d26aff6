use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid mesh: {0}")]
  InvalidMesh(String),
  #[error("dimension mismatch: expected {expected}, got {found}")]
  DimensionMismatch { expected: usize, found: usize },
  #[error("no gauss-legendre rule with {0} points")]
  UnsupportedQuadrature(usize),
  #[error("sparse matrix: {0}")]
  Sparse(#[from] nas::SparseFormatError),
  #[error("system matrix is singular")]
  Singular,
  #[error("factorization failed: {0}")]
  Factorization(String),
  #[error("cholesky requires a symmetric system matrix")]
  NotSymmetric,
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
