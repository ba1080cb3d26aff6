//! Module for the Poisson Equation, the prototypical ellipitic PDE.
//!
//! $-u'' = f$ in $(a,b)$, $u(a) = g_a$, $u(b) = g_b$.

use crate::{
  assemble::{self, BcStrategy, DirichletData},
  fe::{self, ElVecProvider, FeFunction, LaplaceElmat, QuadSourceElvec},
  linalg::{self, SolverKind},
  mesh::IntervalMesh,
  quadrature::QuadRule,
  space::FeSpace,
  util, Error, Result,
};

use std::{f64::consts::PI, rc::Rc};
use tracing::{info, warn};

/// Number of Gauss points used for source terms and error integrals.
const NQUAD_POINTS: usize = 3;

/// Errors below this are roundoff and carry no convergence rate.
const ROUNDOFF_TOL: f64 = 1e-14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoissonOptions {
  pub bc_strategy: BcStrategy,
  pub solver: SolverKind,
}

pub fn solve_poisson(
  space: &FeSpace,
  source: impl ElVecProvider,
  boundary_data: DirichletData,
  options: PoissonOptions,
) -> Result<FeFunction> {
  if options.solver == SolverKind::SparseCholesky && options.bc_strategy != BcStrategy::Symmetric
  {
    warn!("row replacement breaks symmetry, cholesky will refuse the system");
  }

  let mut galmat = assemble::assemble_galmat(space, LaplaceElmat)?;
  let mut galvec = assemble::assemble_galvec(space, source)?;

  info!(
    "imposing dirichlet data ({}, {}) with {:?}",
    boundary_data.left, boundary_data.right, options.bc_strategy
  );
  assemble::enforce_dirichlet_bc(
    space.mesh(),
    boundary_data,
    options.bc_strategy,
    &mut galmat,
    &mut galvec,
  )?;

  linalg::solve(&galmat, &galvec, options.solver)
}

/// Poisson problems with known exact solution on the unit interval.
///
/// The exact solutions satisfy homogeneous boundary conditions;
/// any other Dirichlet data is accounted for by adding its linear lift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Manufactured {
  /// $f = 1$, $u = x(1-x)/2$
  #[default]
  Unit,
  /// $f = pi^2 sin(pi x)$, $u = sin(pi x)$
  Sine,
  /// $f = 0$, $u = 0$
  Zero,
}

impl Manufactured {
  pub fn source(&self, x: f64) -> f64 {
    match self {
      Self::Unit => 1.0,
      Self::Sine => PI * PI * (PI * x).sin(),
      Self::Zero => 0.0,
    }
  }

  pub fn exact(&self, x: f64, boundary_data: DirichletData) -> f64 {
    let homogeneous = match self {
      Self::Unit => 0.5 * x * (1.0 - x),
      Self::Sine => (PI * x).sin(),
      Self::Zero => 0.0,
    };
    homogeneous + boundary_data.lift((0.0, 1.0), x)
  }

  pub fn source_elvec(&self) -> Result<QuadSourceElvec<impl Fn(f64) -> f64>> {
    let problem = *self;
    let qr = QuadRule::gauss_legendre(NQUAD_POINTS)?;
    Ok(QuadSourceElvec::new(move |x| problem.source(x), qr))
  }

  pub fn solve(
    &self,
    mesh: Rc<IntervalMesh>,
    boundary_data: DirichletData,
    options: PoissonOptions,
  ) -> Result<FeFunction> {
    check_unit_domain(&mesh)?;
    let space = FeSpace::new(mesh);
    solve_poisson(&space, self.source_elvec()?, boundary_data, options)
  }
}

/// The exact solutions are only valid on $(0,1)$.
fn check_unit_domain(mesh: &IntervalMesh) -> Result<()> {
  let (a, b) = mesh.domain();
  if (a, b) != (0.0, 1.0) {
    return Err(Error::InvalidMesh(format!(
      "manufactured problems live on (0,1), mesh covers ({a},{b})"
    )));
  }
  Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceLevel {
  pub ncells: usize,
  pub mesh_width: f64,
  pub l2_error: f64,
  pub max_nodal_error: f64,
  /// Observed order of the $L^2$ error relative to the previous level.
  /// `None` on the first level and when either error is at roundoff.
  pub l2_rate: Option<f64>,
}

/// Solves `problem` on `mesh` and `nrefinements` successive uniform bisections.
pub fn convergence_study(
  mesh: &IntervalMesh,
  problem: Manufactured,
  boundary_data: DirichletData,
  nrefinements: usize,
  options: PoissonOptions,
) -> Result<Vec<ConvergenceLevel>> {
  check_unit_domain(mesh)?;
  let qr = QuadRule::gauss_legendre(NQUAD_POINTS)?;
  let exact = |x| problem.exact(x, boundary_data);

  let mut levels: Vec<ConvergenceLevel> = Vec::with_capacity(nrefinements + 1);
  let mut mesh = mesh.clone();
  for _ in 0..=nrefinements {
    let mesh_rc = Rc::new(mesh);
    let galsol = problem.solve(Rc::clone(&mesh_rc), boundary_data, options)?;

    let l2_error = fe::l2_error(&galsol, &mesh_rc, exact, &qr);
    let max_nodal_error = fe::max_nodal_error(&galsol, &mesh_rc, exact);
    let l2_rate = levels.last().and_then(|prev| {
      (l2_error > ROUNDOFF_TOL && prev.l2_error > ROUNDOFF_TOL)
        .then(|| util::algebraic_convergence_rate(l2_error, prev.l2_error))
    });

    let level = ConvergenceLevel {
      ncells: mesh_rc.ncells(),
      mesh_width: mesh_rc.mesh_width(),
      l2_error,
      max_nodal_error,
      l2_rate,
    };
    info!(
      "ncells={} h={:.3e} l2={:.3e} rate={:?}",
      level.ncells, level.mesh_width, level.l2_error, level.l2_rate
    );
    levels.push(level);

    mesh = mesh_rc.refine_uniform();
  }
  Ok(levels)
}
