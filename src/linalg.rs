//! Direct solvers for the assembled linear system.

use crate::{
  sparse::{nalgebra2faer, SparseMatrix},
  Error, Result,
};

use faer::solvers::SpSolver as _;
use tracing::{debug, warn};

/// Tolerance of the symmetry check before a Cholesky factorization.
const SYMMETRY_TOL: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SolverKind {
  /// Dense LU with partial pivoting.
  #[default]
  DenseLu,
  /// Sparse LU.
  SparseLu,
  /// Sparse Cholesky. Requires a symmetric positive definite system.
  SparseCholesky,
}

pub fn solve(
  galmat: &SparseMatrix,
  galvec: &na::DVector<f64>,
  kind: SolverKind,
) -> Result<na::DVector<f64>> {
  if !galmat.is_square() || galmat.nrows() != galvec.len() {
    return Err(Error::DimensionMismatch {
      expected: galmat.nrows(),
      found: galvec.len(),
    });
  }
  let n = galmat.nrows();
  debug!("solving {n}x{n} system with {kind:?}");

  let sol = match kind {
    SolverKind::DenseLu => dense_lu_solve(galmat.to_nalgebra_dense()?, galvec)?,
    SolverKind::SparseLu => FaerLu::new(galmat.to_nalgebra_csc()?)?.solve(galvec),
    SolverKind::SparseCholesky => {
      if !galmat.is_symmetric(SYMMETRY_TOL)? {
        warn!("cholesky requested for non-symmetric system, use the symmetric bc strategy");
        return Err(Error::NotSymmetric);
      }
      FaerCholesky::new(galmat.to_nalgebra_csc()?)?.solve(galvec)
    }
  };

  if sol.iter().any(|v| !v.is_finite()) {
    return Err(Error::Singular);
  }
  Ok(sol)
}

pub fn dense_lu_solve(a: na::DMatrix<f64>, b: &na::DVector<f64>) -> Result<na::DVector<f64>> {
  a.lu().solve(b).ok_or(Error::Singular)
}

pub struct FaerLu {
  raw: faer::sparse::linalg::solvers::Lu<usize, f64>,
}
impl FaerLu {
  pub fn new(a: nas::CscMatrix<f64>) -> Result<Self> {
    let raw = nalgebra2faer(a)
      .sp_lu()
      .map_err(|e| Error::Factorization(format!("{e:?}")))?;
    Ok(Self { raw })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> na::DVector<f64> {
    let b = faer::col::from_slice(b.as_slice());
    na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec())
  }
}

pub struct FaerCholesky {
  raw: faer::sparse::linalg::solvers::Cholesky<usize, f64>,
}
impl FaerCholesky {
  pub fn new(a: nas::CscMatrix<f64>) -> Result<Self> {
    let raw = nalgebra2faer(a)
      .sp_cholesky(faer::Side::Upper)
      .map_err(|e| Error::Factorization(format!("{e:?}")))?;
    Ok(Self { raw })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> na::DVector<f64> {
    let b = faer::col::from_slice(b.as_slice());
    na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec())
  }
}
