use crate::Result;

pub type SparseMatrixFaer = faer::sparse::SparseColMat<usize, f64>;

/// Sparse matrix in triplet (COO) form.
///
/// Duplicate entries are allowed and summed up on conversion.
#[derive(Debug, Clone, Default)]
pub struct SparseMatrix {
  nrows: usize,
  ncols: usize,
  triplets: Vec<(usize, usize, f64)>,
}

impl SparseMatrix {
  pub fn zeros(nrows: usize, ncols: usize) -> Self {
    Self::from_triplets(nrows, ncols, Vec::new())
  }

  pub fn from_triplets(nrows: usize, ncols: usize, triplets: Vec<(usize, usize, f64)>) -> Self {
    Self {
      nrows,
      ncols,
      triplets,
    }
  }

  pub fn nrows(&self) -> usize {
    self.nrows
  }
  pub fn ncols(&self) -> usize {
    self.ncols
  }
  pub fn is_square(&self) -> bool {
    self.nrows == self.ncols
  }
  pub fn ntriplets(&self) -> usize {
    self.triplets.len()
  }
  pub fn triplets(&self) -> &[(usize, usize, f64)] {
    &self.triplets
  }

  pub fn push(&mut self, r: usize, c: usize, v: f64) {
    if v != 0.0 {
      self.triplets.push((r, c, v));
    }
  }

  /// Removes all entries for which `predicate(row, col)` holds.
  pub fn set_zero<F>(&mut self, predicate: F)
  where
    F: Fn(usize, usize) -> bool,
  {
    let mut i = 0;
    while i < self.triplets.len() {
      let (r, c, _) = self.triplets[i];
      if predicate(r, c) {
        self.triplets.swap_remove(i);
      } else {
        i += 1;
      }
    }
  }

  pub fn to_nalgebra_coo(&self) -> Result<nas::CooMatrix<f64>> {
    let rows = self.triplets.iter().map(|t| t.0).collect();
    let cols = self.triplets.iter().map(|t| t.1).collect();
    let vals = self.triplets.iter().map(|t| t.2).collect();
    let coo = nas::CooMatrix::try_from_triplets(self.nrows, self.ncols, rows, cols, vals)?;
    Ok(coo)
  }

  pub fn to_nalgebra_csr(&self) -> Result<nas::CsrMatrix<f64>> {
    Ok((&self.to_nalgebra_coo()?).into())
  }

  pub fn to_nalgebra_csc(&self) -> Result<nas::CscMatrix<f64>> {
    Ok((&self.to_nalgebra_coo()?).into())
  }

  pub fn to_nalgebra_dense(&self) -> Result<na::DMatrix<f64>> {
    Ok((&self.to_nalgebra_coo()?).into())
  }

  pub fn to_faer_csc(&self) -> Result<SparseMatrixFaer> {
    Ok(nalgebra2faer(self.to_nalgebra_csc()?))
  }

  /// Structural and numerical symmetry up to `eps`.
  pub fn is_symmetric(&self, eps: f64) -> Result<bool> {
    if !self.is_square() {
      return Ok(false);
    }
    let csr = self.to_nalgebra_csr()?;
    let transposed = csr.transpose();
    let diff = &csr - &transposed;
    Ok(diff.values().iter().all(|v| v.abs() <= eps))
  }
}

pub fn nalgebra2faer(m: nas::CscMatrix<f64>) -> SparseMatrixFaer {
  let nrows = m.nrows();
  let ncols = m.ncols();
  let (col_ptrs, row_indices, values) = m.disassemble();

  let symbolic =
    faer::sparse::SymbolicSparseColMat::new_checked(nrows, ncols, col_ptrs, None, row_indices);
  faer::sparse::SparseColMat::new(symbolic, values)
}
