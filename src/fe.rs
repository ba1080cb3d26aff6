use crate::{
  mesh::{IntervalMesh, MeshCell},
  quadrature::QuadRule,
  space::NLOCAL_DOFS,
};

pub type ElMat = na::DMatrix<f64>;
pub type ElVec = na::DVector<f64>;

/// Nodal coefficients of a piecewise-linear function.
pub type FeFunction = na::DVector<f64>;

pub trait ElMatProvider {
  fn eval(&self, cell: &MeshCell) -> ElMat;
}
impl<F> ElMatProvider for F
where
  F: Fn(&MeshCell) -> ElMat,
{
  fn eval(&self, cell: &MeshCell) -> ElMat {
    self(cell)
  }
}

pub trait ElVecProvider {
  fn eval(&self, cell: &MeshCell) -> ElVec;
}
impl<F> ElVecProvider for F
where
  F: Fn(&MeshCell) -> ElVec,
{
  fn eval(&self, cell: &MeshCell) -> ElVec {
    self(cell)
  }
}

/// Exact Element Matrix Provider for the negative Laplacian.
///
/// $A_K = 1/h [1, -1; -1, 1]$
pub struct LaplaceElmat;
impl ElMatProvider for LaplaceElmat {
  fn eval(&self, cell: &MeshCell) -> ElMat {
    let h = cell.vol();
    ref_difbarys().transpose() * ref_difbarys() / h
  }
}

/// Exact Element Matrix Provider for mass bilinear form.
pub struct MassElmat;
impl ElMatProvider for MassElmat {
  fn eval(&self, cell: &MeshCell) -> ElMat {
    let v = cell.vol() / 6.0;
    let mut elmat = na::DMatrix::from_element(NLOCAL_DOFS, NLOCAL_DOFS, v);
    elmat.fill_diagonal(2.0 * v);
    elmat
  }
}

/// Approximated Element Matrix Provider for mass bilinear form,
/// obtained through trapezoidal quadrature rule.
pub struct LumpedMassElmat;
impl ElMatProvider for LumpedMassElmat {
  fn eval(&self, cell: &MeshCell) -> ElMat {
    let v = cell.vol() / NLOCAL_DOFS as f64;
    na::DMatrix::from_diagonal_element(NLOCAL_DOFS, NLOCAL_DOFS, v)
  }
}

/// Element Vector Provider for scalar source given at the vertices.
///
/// Computed using trapezoidal quadrature rule.
/// Exact for constant source.
pub struct SourceElvec {
  dof_data: na::DVector<f64>,
}
impl SourceElvec {
  pub fn new(dof_data: na::DVector<f64>) -> Self {
    Self { dof_data }
  }
  pub fn constant(value: f64, mesh: &IntervalMesh) -> Self {
    Self::new(na::DVector::from_element(mesh.nvertices(), value))
  }
}
impl ElVecProvider for SourceElvec {
  fn eval(&self, cell: &MeshCell) -> ElVec {
    let nverts = cell.nvertices();
    cell.vol() / nverts as f64
      * na::DVector::from_iterator(
        nverts,
        cell.vertices().iter().map(|&iv| self.dof_data[iv]),
      )
  }
}

/// Element Vector Provider for a scalar source function.
///
/// Integrates $f lambda_i$ with the given quadrature rule.
pub struct QuadSourceElvec<F> {
  source: F,
  qr: QuadRule,
}
impl<F> QuadSourceElvec<F>
where
  F: Fn(f64) -> f64,
{
  pub fn new(source: F, qr: QuadRule) -> Self {
    Self { source, qr }
  }
}
impl<F> ElVecProvider for QuadSourceElvec<F>
where
  F: Fn(f64) -> f64,
{
  fn eval(&self, cell: &MeshCell) -> ElVec {
    let h = cell.vol();
    na::DVector::from_iterator(
      NLOCAL_DOFS,
      (0..NLOCAL_DOFS).map(|ibary| {
        h * self
          .qr
          .apply_ref(|t| (self.source)(cell.ref2global(t)) * ref_bary(ibary, t))
      }),
    )
  }
}

/// Barycentric coordinate functions (the local hat functions) on the reference cell.
fn ref_bary(ibary: usize, t: f64) -> f64 {
  assert!(ibary < NLOCAL_DOFS);
  if ibary == 0 {
    1.0 - t
  } else {
    t
  }
}

/// The constant derivatives of the reference barycentric coordinate functions.
pub fn ref_difbarys() -> na::DMatrix<f64> {
  na::DMatrix::from_row_slice(1, NLOCAL_DOFS, &[-1.0, 1.0])
}

/// Evaluates the piecewise-linear function at `x`.
///
/// Returns `None` if `x` lies outside of the mesh.
pub fn evaluate_fe_function(coeffs: &FeFunction, mesh: &IntervalMesh, x: f64) -> Option<f64> {
  let cell = mesh.locate(x)?;
  Some(evaluate_on_cell(coeffs, &cell, cell.global2ref(x)))
}

fn evaluate_on_cell(coeffs: &FeFunction, cell: &MeshCell, t: f64) -> f64 {
  cell
    .vertices()
    .iter()
    .enumerate()
    .map(|(ibary, &iv)| coeffs[iv] * ref_bary(ibary, t))
    .sum()
}

/// Nodal interpolant of `f`.
pub fn interpolate<F>(f: F, mesh: &IntervalMesh) -> FeFunction
where
  F: Fn(f64) -> f64,
{
  na::DVector::from_iterator(mesh.nvertices(), mesh.coords().iter().map(|&x| f(x)))
}

/// $L^2$ norm of a finite element function, computed exactly with the mass matrix.
pub fn l2_norm(coeffs: &FeFunction, mesh: &IntervalMesh) -> f64 {
  let mut norm_sqr = 0.0;
  for cell in mesh.cells() {
    let [a, b] = cell.vertices();
    let local = na::DVector::from_column_slice(&[coeffs[a], coeffs[b]]);
    norm_sqr += local.dot(&(MassElmat.eval(&cell) * &local));
  }
  norm_sqr.sqrt()
}

/// $L^2$ distance between a finite element function and `exact`.
pub fn l2_error<F>(coeffs: &FeFunction, mesh: &IntervalMesh, exact: F, qr: &QuadRule) -> f64
where
  F: Fn(f64) -> f64,
{
  mesh
    .cells()
    .map(|cell| {
      cell.vol()
        * qr.apply_ref(|t| (evaluate_on_cell(coeffs, &cell, t) - exact(cell.ref2global(t))).powi(2))
    })
    .sum::<f64>()
    .sqrt()
}

/// Largest error at the mesh vertices.
pub fn max_nodal_error<F>(coeffs: &FeFunction, mesh: &IntervalMesh, exact: F) -> f64
where
  F: Fn(f64) -> f64,
{
  mesh
    .coords()
    .iter()
    .zip(coeffs.iter())
    .map(|(&x, &u)| (u - exact(x)).abs())
    .fold(0.0, f64::max)
}
