use super::{IntervalMesh, VertexIdx};

impl IntervalMesh {
  /// The vertices that lie on the boundary of the mesh.
  /// Left end first.
  pub fn boundary_vertices(&self) -> [VertexIdx; 2] {
    [0, self.nvertices() - 1]
  }

  /// Vertices not on the boundary, in increasing order.
  pub fn interior_vertices(&self) -> impl Iterator<Item = VertexIdx> {
    1..self.nvertices() - 1
  }
}

#[cfg(test)]
mod test {
  use crate::mesh::IntervalMesh;

  #[test]
  fn boundary_and_interior_partition_vertices() {
    let mesh = IntervalMesh::exercise();
    assert_eq!(mesh.boundary_vertices(), [0, 8]);
    let interior: Vec<_> = mesh.interior_vertices().collect();
    assert_eq!(interior, (1..8).collect::<Vec<_>>());

    let single = IntervalMesh::uniform(0.0, 1.0, 1).unwrap();
    assert_eq!(single.boundary_vertices(), [0, 1]);
    assert_eq!(single.interior_vertices().count(), 0);
  }
}
