extern crate nalgebra as na;

use p1fem::{
  assemble::{BcStrategy, DirichletData},
  fe::{self, SourceElvec},
  linalg::SolverKind,
  mesh::IntervalMesh,
  problems::poisson::{self, convergence_study, Manufactured, PoissonOptions},
  space::FeSpace,
  Error,
};

use approx::assert_relative_eq;
use std::rc::Rc;

fn all_options() -> Vec<PoissonOptions> {
  vec![
    PoissonOptions::default(),
    PoissonOptions {
      bc_strategy: BcStrategy::RowReplacement,
      solver: SolverKind::SparseLu,
    },
    PoissonOptions {
      bc_strategy: BcStrategy::Symmetric,
      solver: SolverKind::DenseLu,
    },
    PoissonOptions {
      bc_strategy: BcStrategy::Symmetric,
      solver: SolverKind::SparseCholesky,
    },
  ]
}

/// P1 FEM in 1D is nodally exact when the load is integrated exactly.
#[test]
fn unit_source_nodally_exact_on_exercise_mesh() {
  let mesh = Rc::new(IntervalMesh::exercise());
  let space = FeSpace::new(Rc::clone(&mesh));
  let exact = |x: f64| 0.5 * x * (1.0 - x);

  for options in all_options() {
    let galsol = poisson::solve_poisson(
      &space,
      SourceElvec::constant(1.0, &mesh),
      DirichletData::homogeneous(),
      options,
    )
    .unwrap();

    assert_eq!(galsol.len(), 9);
    assert_eq!(galsol[0], 0.0);
    assert_eq!(galsol[8], 0.0);
    for (&x, &u) in mesh.coords().iter().zip(galsol.iter()) {
      assert_relative_eq!(u, exact(x), epsilon = 1e-12);
    }
  }
}

#[test]
fn quadrature_and_nodal_source_agree() {
  let mesh = Rc::new(IntervalMesh::exercise());
  let space = FeSpace::new(Rc::clone(&mesh));
  let options = PoissonOptions::default();
  let data = DirichletData::homogeneous();

  let nodal =
    poisson::solve_poisson(&space, SourceElvec::constant(1.0, &mesh), data, options).unwrap();
  let quad = Manufactured::Unit
    .solve(Rc::clone(&mesh), data, options)
    .unwrap();
  assert_relative_eq!(nodal, quad, epsilon = 1e-13);
}

#[test]
fn inhomogeneous_dirichlet_data() {
  let mesh = Rc::new(IntervalMesh::exercise());
  let data = DirichletData::new(1.0, 3.0);

  for options in all_options() {
    let galsol = Manufactured::Zero
      .solve(Rc::clone(&mesh), data, options)
      .unwrap();
    for (&x, &u) in mesh.coords().iter().zip(galsol.iter()) {
      assert_relative_eq!(u, 1.0 + 2.0 * x, epsilon = 1e-12);
    }

    let galsol = Manufactured::Unit
      .solve(Rc::clone(&mesh), data, options)
      .unwrap();
    let err = fe::max_nodal_error(&galsol, &mesh, |x| Manufactured::Unit.exact(x, data));
    assert!(err < 1e-12, "nodal error {err} with {options:?}");
  }
}

#[test]
fn cholesky_needs_symmetric_bc() {
  let mesh = Rc::new(IntervalMesh::exercise());
  let options = PoissonOptions {
    bc_strategy: BcStrategy::RowReplacement,
    solver: SolverKind::SparseCholesky,
  };
  let res = Manufactured::Unit.solve(mesh, DirichletData::homogeneous(), options);
  assert!(matches!(res, Err(Error::NotSymmetric)));
}

#[test]
fn sine_converges_quadratically_in_l2() {
  let mesh = IntervalMesh::uniform(0.0, 1.0, 4).unwrap();
  let levels = convergence_study(
    &mesh,
    Manufactured::Sine,
    DirichletData::homogeneous(),
    4,
    PoissonOptions::default(),
  )
  .unwrap();

  assert_eq!(levels.len(), 5);
  assert!(levels[0].l2_rate.is_none());
  for pair in levels.windows(2) {
    assert_eq!(pair[1].ncells, 2 * pair[0].ncells);
    assert!(pair[1].l2_error < pair[0].l2_error);
  }
  for level in &levels[2..] {
    let rate = level.l2_rate.unwrap();
    assert!((1.8..2.2).contains(&rate), "unexpected rate {rate}");
  }
}

#[test]
fn exercise_mesh_convergence_study() {
  let levels = convergence_study(
    &IntervalMesh::exercise(),
    Manufactured::Sine,
    DirichletData::new(0.5, -0.5),
    3,
    PoissonOptions::default(),
  )
  .unwrap();
  assert_eq!(levels.last().unwrap().ncells, 64);
  assert!(levels.last().unwrap().l2_error < 2e-3);
}

#[test]
fn manufactured_problems_reject_other_domains() {
  let mesh = IntervalMesh::uniform(0.0, 2.0, 16).unwrap();
  let data = DirichletData::homogeneous();
  let options = PoissonOptions::default();

  let res = Manufactured::Unit.solve(Rc::new(mesh.clone()), data, options);
  assert!(matches!(res, Err(Error::InvalidMesh(_))));
  let res = convergence_study(&mesh, Manufactured::Unit, data, 2, options);
  assert!(matches!(res, Err(Error::InvalidMesh(_))));

  // The generic solver still handles any interval: u = x(2-x)/2.
  let mesh = Rc::new(mesh);
  let space = FeSpace::new(Rc::clone(&mesh));
  let galsol =
    poisson::solve_poisson(&space, SourceElvec::constant(1.0, &mesh), data, options).unwrap();
  let err = fe::max_nodal_error(&galsol, &mesh, |x| 0.5 * x * (2.0 - x));
  assert!(err < 1e-12);
}

#[test]
fn exact_solutions_have_no_rate() {
  let levels = convergence_study(
    &IntervalMesh::exercise(),
    Manufactured::Zero,
    DirichletData::homogeneous(),
    3,
    PoissonOptions::default(),
  )
  .unwrap();

  assert_eq!(levels.len(), 4);
  for level in &levels {
    assert_eq!(level.l2_error, 0.0);
    assert_eq!(level.max_nodal_error, 0.0);
    assert!(level.l2_rate.is_none());
  }
}
