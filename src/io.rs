use crate::{
  assemble::{GalMat, GalVec},
  fe::FeFunction,
  mesh::IntervalMesh,
  problems::poisson::ConvergenceLevel,
  Error, Result,
};

use std::{fs::File, io::BufWriter, path::Path};

/// Writes the nodal solution as whitespace separated columns, one row per vertex.
///
/// With an exact solution the columns are `x u_h u_exact error`, otherwise `x u_h`.
/// The format is understood by gnuplot and `numpy.loadtxt`.
pub fn write_solution_table<W, F>(
  mut writer: W,
  mesh: &IntervalMesh,
  galsol: &FeFunction,
  exact: Option<F>,
) -> Result<()>
where
  W: std::io::Write,
  F: Fn(f64) -> f64,
{
  if galsol.len() != mesh.nvertices() {
    return Err(Error::DimensionMismatch {
      expected: mesh.nvertices(),
      found: galsol.len(),
    });
  }

  match &exact {
    Some(_) => writeln!(writer, "# x u_h u_exact error")?,
    None => writeln!(writer, "# x u_h")?,
  }
  for (&x, &u) in mesh.coords().iter().zip(galsol.iter()) {
    match &exact {
      Some(exact) => {
        let ue = exact(x);
        writeln!(writer, "{x:.10e} {u:.10e} {ue:.10e} {:.3e}", u - ue)?
      }
      None => writeln!(writer, "{x:.10e} {u:.10e}")?,
    }
  }
  Ok(())
}

pub fn save_solution_table<F>(
  path: impl AsRef<Path>,
  mesh: &IntervalMesh,
  galsol: &FeFunction,
  exact: Option<F>,
) -> Result<()>
where
  F: Fn(f64) -> f64,
{
  let file = File::create(path)?;
  let writer = BufWriter::new(file);
  write_solution_table(writer, mesh, galsol, exact)
}

pub fn write_convergence_table<W: std::io::Write>(
  mut writer: W,
  levels: &[ConvergenceLevel],
) -> Result<()> {
  writeln!(writer, "# ncells h l2_error max_nodal_error l2_rate")?;
  for level in levels {
    write!(
      writer,
      "{} {:.6e} {:.6e} {:.6e}",
      level.ncells, level.mesh_width, level.l2_error, level.max_nodal_error
    )?;
    match level.l2_rate {
      Some(rate) => writeln!(writer, " {rate:.3}")?,
      None => writeln!(writer, " -")?,
    }
  }
  Ok(())
}

/// Writes the assembled system matrix and right-hand side in readable dense form.
pub fn write_system<W: std::io::Write>(
  mut writer: W,
  galmat: &GalMat,
  galvec: &GalVec,
) -> Result<()> {
  let dense = galmat.to_nalgebra_dense()?;
  writeln!(writer, "A ={dense:.4}")?;
  writeln!(writer, "f ={galvec:.4}")?;
  Ok(())
}
