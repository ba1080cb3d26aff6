use crate::mesh::{CellIdx, IntervalMesh};

use std::rc::Rc;

pub type DofIdx = usize;

/// Number of local DOFs of a P1 cell, one per vertex.
pub const NLOCAL_DOFS: usize = 2;

/// A Finite Element Space of piecewise-linear functions.
///
/// Uses the hat function basis, one basis function per mesh vertex.
#[derive(Debug, Clone)]
pub struct FeSpace {
  /// The underlying mesh of the space.
  mesh: Rc<IntervalMesh>,
  /// Degrees-of-Freedom handler
  dof_handler: DofHandler,
}

/// Local-to-global map of the DOFs.
///
/// Local DOF 0 of a cell sits on its left vertex, local DOF 1 on its right vertex.
#[derive(Debug, Clone)]
pub struct DofHandler {
  local2global_idx: Vec<[DofIdx; NLOCAL_DOFS]>,
}
impl DofHandler {
  pub fn new(mesh: &IntervalMesh) -> Self {
    let local2global_idx = mesh.cells().map(|c| c.vertices()).collect();
    Self { local2global_idx }
  }

  pub fn local2global(&self, cell: CellIdx) -> &[DofIdx] {
    &self.local2global_idx[cell]
  }

  pub fn ncells(&self) -> usize {
    self.local2global_idx.len()
  }
}

impl FeSpace {
  pub fn new(mesh: Rc<IntervalMesh>) -> Self {
    let dof_handler = DofHandler::new(&mesh);
    Self { mesh, dof_handler }
  }

  pub fn mesh(&self) -> &Rc<IntervalMesh> {
    &self.mesh
  }

  pub fn ndofs(&self) -> usize {
    self.mesh.nvertices()
  }

  pub fn dof_handler(&self) -> &DofHandler {
    &self.dof_handler
  }

  pub fn local2global(&self, cell: CellIdx) -> &[DofIdx] {
    self.dof_handler.local2global(cell)
  }
}

#[cfg(test)]
mod test {
  use super::FeSpace;
  use crate::mesh::IntervalMesh;

  use std::rc::Rc;

  #[test]
  fn local2global_of_consecutive_cells() {
    let space = FeSpace::new(Rc::new(IntervalMesh::exercise()));
    assert_eq!(space.ndofs(), 9);
    assert_eq!(space.dof_handler().ncells(), 8);
    for icell in 0..8 {
      assert_eq!(space.local2global(icell), &[icell, icell + 1]);
    }
  }
}
