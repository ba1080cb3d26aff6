use crate::{
  fe::{ElMatProvider, ElVecProvider},
  mesh::IntervalMesh,
  space::{DofIdx, FeSpace},
  sparse::SparseMatrix,
  util, Error, Result,
};

use tracing::debug;

pub type GalMat = SparseMatrix;
pub type GalVec = na::DVector<f64>;

/// Assembly algorithm for the Galerkin Matrix.
///
/// Every entry of every element matrix is scattered to the global position
/// given by the local-to-global map. Contributions to shared DOFs add up.
pub fn assemble_galmat(space: &FeSpace, elmat: impl ElMatProvider) -> Result<GalMat> {
  let ndofs = space.ndofs();
  let mut galmat = SparseMatrix::zeros(ndofs, ndofs);

  for cell in space.mesh().cells() {
    let dofs = space.local2global(cell.idx());
    let elmat = elmat.eval(&cell);
    check_local_dim(elmat.nrows(), dofs.len())?;
    check_local_dim(elmat.ncols(), dofs.len())?;

    for (ilocal, &iglobal) in dofs.iter().enumerate() {
      for (jlocal, &jglobal) in dofs.iter().enumerate() {
        galmat.push(iglobal, jglobal, elmat[(ilocal, jlocal)]);
      }
    }
  }

  debug!(
    "assembled galmat {}x{} from {} triplets",
    galmat.nrows(),
    galmat.ncols(),
    galmat.ntriplets()
  );
  Ok(galmat)
}

/// Assembly algorithm for the Galerkin Vector.
pub fn assemble_galvec(space: &FeSpace, elvec: impl ElVecProvider) -> Result<GalVec> {
  let mut galvec = na::DVector::zeros(space.ndofs());

  for cell in space.mesh().cells() {
    let dofs = space.local2global(cell.idx());
    let elvec = elvec.eval(&cell);
    check_local_dim(elvec.nrows(), dofs.len())?;

    for (ilocal, &iglobal) in dofs.iter().enumerate() {
      galvec[iglobal] += elvec[ilocal];
    }
  }

  debug!("assembled galvec of length {}", galvec.len());
  Ok(galvec)
}

fn check_local_dim(found: usize, expected: usize) -> Result<()> {
  if found == expected {
    Ok(())
  } else {
    Err(Error::DimensionMismatch { expected, found })
  }
}

/// Prescribed values of the solution at the two ends of the interval.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirichletData {
  pub left: f64,
  pub right: f64,
}
impl DirichletData {
  pub fn new(left: f64, right: f64) -> Self {
    Self { left, right }
  }
  pub fn homogeneous() -> Self {
    Self::default()
  }
  pub fn is_homogeneous(&self) -> bool {
    self.left == 0.0 && self.right == 0.0
  }

  /// The linear function interpolating the boundary values over `[a,b]`.
  pub fn lift(&self, (a, b): (f64, f64), x: f64) -> f64 {
    self.left + (self.right - self.left) * (x - a) / (b - a)
  }
}

/// How fixed DOFs are imposed on the linear system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BcStrategy {
  /// Replace the row by the identity row.
  /// Leaves the system non-symmetric.
  #[default]
  RowReplacement,
  /// Replace row and column, lifting the values to the right-hand side.
  /// Keeps the system symmetric.
  Symmetric,
}

pub fn enforce_dirichlet_bc(
  mesh: &IntervalMesh,
  data: DirichletData,
  strategy: BcStrategy,
  galmat: &mut GalMat,
  galvec: &mut GalVec,
) -> Result<()> {
  let [left, right] = mesh.boundary_vertices();
  let dof_coeffs = [(left, data.left), (right, data.right)];

  match strategy {
    BcStrategy::RowReplacement => fix_dofs_row_replace(&dof_coeffs, galmat, galvec),
    BcStrategy::Symmetric => fix_dofs_symmetric(&dof_coeffs, galmat, galvec)?,
  }
  Ok(())
}

pub fn enforce_homogeneous_dirichlet_bc(
  mesh: &IntervalMesh,
  galmat: &mut GalMat,
  galvec: &mut GalVec,
) {
  fix_dofs_zero(&mesh.boundary_vertices(), galmat, galvec);
}

pub fn fix_dofs_zero(dofs: &[DofIdx], galmat: &mut GalMat, galvec: &mut GalVec) {
  let ndofs = galmat.nrows();
  let dof_flags = util::indicies_to_flags(dofs, ndofs);
  galmat.set_zero(|i, j| dof_flags[i] || dof_flags[j]);
  for &idof in dofs {
    galmat.push(idof, idof, 1.0);
    galvec[idof] = 0.0;
  }
}

/// Fix DOFs of FE solution by row replacement.
///
/// Every row of a fixed DOF is zeroed, its diagonal set to one
/// and the right-hand side set to the prescribed coefficient.
/// $mat(A_0, A_(0 diff); 0, I) vec(mu_0, mu_diff) = vec(phi, gamma)$
pub fn fix_dofs_row_replace(
  dof_coeffs: &[(DofIdx, f64)],
  galmat: &mut GalMat,
  galvec: &mut GalVec,
) {
  let ndofs = galmat.nrows();
  let dof_coeffs_opt = util::sparse_to_dense_data(dof_coeffs.to_vec(), ndofs);

  // Set entries zero that share a row index with a fixed dof.
  galmat.set_zero(|r, _| dof_coeffs_opt[r].is_some());

  // Set galmat diagonal for dofs to one.
  for &(i, _) in dof_coeffs {
    galmat.push(i, i, 1.0);
  }

  // Set galvec to prescribed coefficents.
  for &(i, v) in dof_coeffs {
    galvec[i] = v;
  }
}

/// Fix DOFs of FE solution, keeping the Galerkin matrix symmetric.
///
/// $mat(A_0, 0; 0, I) vec(mu_0, mu_diff) = vec(phi - A_(0 diff) gamma, gamma)$
pub fn fix_dofs_symmetric(
  dof_coeffs: &[(DofIdx, f64)],
  galmat: &mut GalMat,
  galvec: &mut GalVec,
) -> Result<()> {
  let ndofs = galmat.nrows();

  let dof_coeffs_opt = util::sparse_to_dense_data(dof_coeffs.to_vec(), ndofs);
  let dof_coeffs_zeroed =
    na::DVector::from_iterator(ndofs, dof_coeffs_opt.iter().map(|v| v.unwrap_or(0.0)));

  // Modify galvec.
  *galvec -= galmat.to_nalgebra_csr()? * dof_coeffs_zeroed;

  // Set galvec to prescribed coefficents.
  dof_coeffs.iter().for_each(|&(i, v)| galvec[i] = v);

  // Set entires zero that share a (row or column) index with a fixed dof.
  galmat.set_zero(|r, c| dof_coeffs_opt[r].is_some() || dof_coeffs_opt[c].is_some());

  // Set galmat diagonal for dofs to one.
  for &(i, _) in dof_coeffs {
    galmat.push(i, i, 1.0);
  }
  Ok(())
}
