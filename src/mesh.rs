//! A mesh of a bounded interval.
//!
//! Vertices are numbered from left to right and cell `k` is the interval
//! between vertex `k` and vertex `k+1`. This global numbering is what the
//! DOF handler relies on.

pub mod boundary;

use crate::{Error, Result};

use itertools::Itertools as _;

pub type VertexIdx = usize;
pub type CellIdx = usize;

/// Vertices of the non-uniform mesh of the unit interval used by the exercise.
///
/// 9 vertices, 8 cells, refined towards both ends.
pub const EXERCISE_VERTICES: [f64; 9] = [0.0, 0.05, 0.15, 0.3, 0.5, 0.65, 0.8, 0.92, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalMesh {
  /// Strictly increasing vertex coordinates.
  coords: Vec<f64>,
}

/// A cell of an [`IntervalMesh`] together with its geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshCell {
  idx: CellIdx,
  vertices: [VertexIdx; 2],
  coords: [f64; 2],
}

impl MeshCell {
  pub fn new(idx: CellIdx, vertices: [VertexIdx; 2], coords: [f64; 2]) -> Self {
    Self {
      idx,
      vertices,
      coords,
    }
  }

  pub fn idx(&self) -> CellIdx {
    self.idx
  }
  pub fn vertices(&self) -> [VertexIdx; 2] {
    self.vertices
  }
  pub fn nvertices(&self) -> usize {
    self.vertices.len()
  }
  pub fn coords(&self) -> [f64; 2] {
    self.coords
  }
  pub fn left(&self) -> f64 {
    self.coords[0]
  }
  pub fn right(&self) -> f64 {
    self.coords[1]
  }

  /// The length of the cell, which is its (1-dimensional) volume.
  pub fn vol(&self) -> f64 {
    self.coords[1] - self.coords[0]
  }

  /// Affine map from the reference cell $[0,1]$ onto this cell.
  pub fn ref2global(&self, t: f64) -> f64 {
    self.left() + t * self.vol()
  }

  /// Inverse of [`Self::ref2global`].
  pub fn global2ref(&self, x: f64) -> f64 {
    (x - self.left()) / self.vol()
  }

  pub fn contains(&self, x: f64) -> bool {
    self.left() <= x && x <= self.right()
  }
}

impl IntervalMesh {
  pub fn new(coords: Vec<f64>) -> Result<Self> {
    if coords.len() < 2 {
      return Err(Error::InvalidMesh(format!(
        "need at least 2 vertices, got {}",
        coords.len()
      )));
    }
    if let Some(x) = coords.iter().find(|x| !x.is_finite()) {
      return Err(Error::InvalidMesh(format!("non-finite vertex coordinate {x}")));
    }
    if let Some((i, (a, b))) = coords
      .iter()
      .tuple_windows()
      .find_position(|(a, b)| a >= b)
    {
      return Err(Error::InvalidMesh(format!(
        "vertex coordinates not strictly increasing at cell {i}: {a} >= {b}"
      )));
    }
    Ok(Self { coords })
  }

  /// Equispaced mesh of $[a,b]$ with `ncells` cells.
  pub fn uniform(a: f64, b: f64, ncells: usize) -> Result<Self> {
    if ncells == 0 {
      return Err(Error::InvalidMesh("need at least 1 cell".to_string()));
    }
    let h = (b - a) / ncells as f64;
    let coords = (0..=ncells)
      .map(|i| if i == ncells { b } else { a + i as f64 * h })
      .collect();
    Self::new(coords)
  }

  /// The fixed non-uniform mesh of $(0,1)$, see [`EXERCISE_VERTICES`].
  pub fn exercise() -> Self {
    Self {
      coords: EXERCISE_VERTICES.to_vec(),
    }
  }

  pub fn coords(&self) -> &[f64] {
    &self.coords
  }
  pub fn coord(&self, ivertex: VertexIdx) -> f64 {
    self.coords[ivertex]
  }
  pub fn nvertices(&self) -> usize {
    self.coords.len()
  }
  pub fn ncells(&self) -> usize {
    self.coords.len() - 1
  }

  /// The interval covered by the mesh.
  pub fn domain(&self) -> (f64, f64) {
    (self.coords[0], self.coords[self.coords.len() - 1])
  }

  pub fn cell(&self, icell: CellIdx) -> MeshCell {
    MeshCell::new(
      icell,
      [icell, icell + 1],
      [self.coords[icell], self.coords[icell + 1]],
    )
  }

  pub fn cells(&self) -> impl Iterator<Item = MeshCell> + '_ {
    (0..self.ncells()).map(|icell| self.cell(icell))
  }

  pub fn cell_length(&self, icell: CellIdx) -> f64 {
    self.coords[icell + 1] - self.coords[icell]
  }

  /// The mesh width $h$, the length of the largest cell.
  pub fn mesh_width(&self) -> f64 {
    self.cells().map(|c| c.vol()).fold(0.0, f64::max)
  }

  /// Bisects every cell.
  pub fn refine_uniform(&self) -> Self {
    let mut coords = Vec::with_capacity(2 * self.coords.len() - 1);
    for (&a, &b) in self.coords.iter().tuple_windows() {
      coords.push(a);
      coords.push(0.5 * (a + b));
    }
    coords.extend(self.coords.last());
    Self { coords }
  }

  /// Finds the cell containing `x`.
  ///
  /// On a vertex shared by two cells the left cell is returned.
  pub fn locate(&self, x: f64) -> Option<MeshCell> {
    let (a, b) = self.domain();
    if !(a <= x && x <= b) {
      return None;
    }
    let ivertex = self.coords.partition_point(|&v| v < x);
    let icell = ivertex.saturating_sub(1).min(self.ncells() - 1);
    Some(self.cell(icell))
  }
}

#[cfg(test)]
mod test {
  use super::IntervalMesh;

  #[test]
  fn exercise_mesh() {
    let mesh = IntervalMesh::exercise();
    assert_eq!(mesh.nvertices(), 9);
    assert_eq!(mesh.ncells(), 8);
    assert_eq!(mesh.domain(), (0.0, 1.0));
    let total: f64 = mesh.cells().map(|c| c.vol()).sum();
    assert!((total - 1.0).abs() < 1e-14);
  }

  #[test]
  fn cell_length_matches_cell_volume() {
    let mesh = IntervalMesh::exercise();
    for icell in 0..mesh.ncells() {
      assert_eq!(mesh.cell_length(icell), mesh.cell(icell).vol());
    }
    assert_eq!(mesh.cell_length(0), 0.05);
  }

  #[test]
  fn rejects_invalid_coords() {
    assert!(IntervalMesh::new(vec![0.0]).is_err());
    assert!(IntervalMesh::new(vec![0.0, 0.5, 0.5, 1.0]).is_err());
    assert!(IntervalMesh::new(vec![0.0, 0.7, 0.3]).is_err());
    assert!(IntervalMesh::new(vec![0.0, f64::NAN]).is_err());
    assert!(IntervalMesh::uniform(0.0, 1.0, 0).is_err());
    assert!(IntervalMesh::uniform(1.0, 0.0, 4).is_err());
  }

  #[test]
  fn uniform_mesh_width() {
    let mesh = IntervalMesh::uniform(0.0, 2.0, 8).unwrap();
    assert_eq!(mesh.ncells(), 8);
    assert_eq!(mesh.coord(8), 2.0);
    assert!((mesh.mesh_width() - 0.25).abs() < 1e-14);
  }

  #[test]
  fn refinement_halves_cells() {
    let mesh = IntervalMesh::exercise();
    let fine = mesh.refine_uniform();
    assert_eq!(fine.ncells(), 2 * mesh.ncells());
    assert!((fine.mesh_width() - 0.5 * mesh.mesh_width()).abs() < 1e-14);
    for (i, &x) in mesh.coords().iter().enumerate() {
      assert_eq!(fine.coord(2 * i), x);
    }
  }

  #[test]
  fn locate_points() {
    let mesh = IntervalMesh::exercise();
    assert_eq!(mesh.locate(0.0).unwrap().idx(), 0);
    assert_eq!(mesh.locate(0.1).unwrap().idx(), 1);
    assert_eq!(mesh.locate(0.15).unwrap().idx(), 1);
    assert_eq!(mesh.locate(1.0).unwrap().idx(), 7);
    assert!(mesh.locate(-0.1).is_none());
    assert!(mesh.locate(1.1).is_none());
  }
}
