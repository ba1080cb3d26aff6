use p1fem::{
  assemble::{self, BcStrategy, DirichletData},
  fe::{self, LaplaceElmat},
  io,
  linalg::SolverKind,
  mesh::IntervalMesh,
  problems::poisson::{self, Manufactured, PoissonOptions},
  quadrature::QuadRule,
  space::FeSpace,
};

use clap::{Parser, ValueEnum};
use std::{path::PathBuf, process::ExitCode, rc::Rc};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MeshKind {
  /// The fixed non-uniform 9 vertex mesh.
  Exercise,
  /// Equispaced mesh with `--ncells` cells.
  Uniform,
}

/// P1 finite elements for $-u'' = f$ on $(0,1)$ with Dirichlet boundary conditions.
#[derive(Debug, Parser)]
#[command(about)]
struct Cli {
  #[arg(long, value_enum, default_value_t = MeshKind::Exercise)]
  mesh: MeshKind,

  #[arg(long, default_value_t = 8)]
  ncells: usize,

  #[arg(long, value_enum, default_value_t = Manufactured::Unit)]
  problem: Manufactured,

  /// Prescribed value at x=0.
  #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
  left: f64,

  /// Prescribed value at x=1.
  #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
  right: f64,

  #[arg(long, value_enum, default_value_t = BcStrategy::RowReplacement)]
  bc: BcStrategy,

  #[arg(long, value_enum, default_value_t = SolverKind::DenseLu)]
  solver: SolverKind,

  /// Write the solution table `x u_h u_exact error` to this file.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Run a convergence study with this many uniform refinements.
  #[arg(long)]
  refinements: Option<usize>,

  /// Print the assembled system matrix and load vector.
  #[arg(long)]
  print_system: bool,

  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

impl Cli {
  fn build_mesh(&self) -> p1fem::Result<IntervalMesh> {
    match self.mesh {
      MeshKind::Exercise => Ok(IntervalMesh::exercise()),
      MeshKind::Uniform => IntervalMesh::uniform(0.0, 1.0, self.ncells),
    }
  }
}

fn init_logging(verbose: u8) {
  let level = match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
  tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: &Cli) -> p1fem::Result<()> {
  let mesh = Rc::new(cli.build_mesh()?);
  let boundary_data = DirichletData::new(cli.left, cli.right);
  let options = PoissonOptions {
    bc_strategy: cli.bc,
    solver: cli.solver,
  };
  let problem = cli.problem;
  let exact = |x: f64| problem.exact(x, boundary_data);
  info!(
    "mesh with {} cells, h={:.3e}",
    mesh.ncells(),
    mesh.mesh_width()
  );

  let space = FeSpace::new(Rc::clone(&mesh));
  if cli.print_system {
    let mut galmat = assemble::assemble_galmat(&space, LaplaceElmat)?;
    let mut galvec = assemble::assemble_galvec(&space, problem.source_elvec()?)?;
    assemble::enforce_dirichlet_bc(&mesh, boundary_data, cli.bc, &mut galmat, &mut galvec)?;
    io::write_system(std::io::stdout().lock(), &galmat, &galvec)?;
  }

  let galsol = poisson::solve_poisson(&space, problem.source_elvec()?, boundary_data, options)?;

  let qr = QuadRule::gauss_legendre(3)?;
  println!("ndofs           = {}", space.ndofs());
  println!("l2 error        = {:e}", fe::l2_error(&galsol, &mesh, exact, &qr));
  println!("max nodal error = {:e}", fe::max_nodal_error(&galsol, &mesh, exact));

  match &cli.output {
    Some(path) => {
      io::save_solution_table(path, &mesh, &galsol, Some(exact))?;
      info!("wrote solution table to {}", path.display());
    }
    None => io::write_solution_table(std::io::stdout().lock(), &mesh, &galsol, Some(exact))?,
  }

  if let Some(nrefinements) = cli.refinements {
    let levels = poisson::convergence_study(&mesh, problem, boundary_data, nrefinements, options)?;
    io::write_convergence_table(std::io::stdout().lock(), &levels)?;
  }

  Ok(())
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("error: {err}");
      ExitCode::FAILURE
    }
  }
}
