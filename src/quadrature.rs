use crate::{mesh::MeshCell, Error, Result};

/// A quadrature rule defined on the reference cell $[0,1]$.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadRule {
  nodes: Vec<f64>,
  weights: Vec<f64>,
}
impl QuadRule {
  pub fn new(nodes: Vec<f64>, weights: Vec<f64>) -> Result<Self> {
    if nodes.len() != weights.len() {
      return Err(Error::DimensionMismatch {
        expected: nodes.len(),
        found: weights.len(),
      });
    }
    Ok(Self { nodes, weights })
  }

  pub fn midpoint() -> Self {
    Self {
      nodes: vec![0.5],
      weights: vec![1.0],
    }
  }

  pub fn trapezoidal() -> Self {
    Self {
      nodes: vec![0.0, 1.0],
      weights: vec![0.5, 0.5],
    }
  }

  /// Gauss-Legendre rule with `npoints` points, exact up to degree `2 npoints - 1`.
  pub fn gauss_legendre(npoints: usize) -> Result<Self> {
    // Nodes and weights on $[-1,1]$.
    let (nodes, weights): (Vec<f64>, Vec<f64>) = match npoints {
      1 => (vec![0.0], vec![2.0]),
      2 => {
        let x = 1.0 / 3f64.sqrt();
        (vec![-x, x], vec![1.0, 1.0])
      }
      3 => {
        let x = (3.0 / 5f64).sqrt();
        (vec![-x, 0.0, x], vec![5.0 / 9.0, 8.0 / 9.0, 5.0 / 9.0])
      }
      4 => {
        let a = (3.0 / 7.0 - 2.0 / 7.0 * (6.0 / 5f64).sqrt()).sqrt();
        let b = (3.0 / 7.0 + 2.0 / 7.0 * (6.0 / 5f64).sqrt()).sqrt();
        let wa = (18.0 + 30f64.sqrt()) / 36.0;
        let wb = (18.0 - 30f64.sqrt()) / 36.0;
        (vec![-b, -a, a, b], vec![wb, wa, wa, wb])
      }
      _ => return Err(Error::UnsupportedQuadrature(npoints)),
    };
    Ok(Self {
      nodes: nodes.into_iter().map(|x| 0.5 * (x + 1.0)).collect(),
      weights: weights.into_iter().map(|w| 0.5 * w).collect(),
    })
  }

  pub fn npoints(&self) -> usize {
    self.nodes.len()
  }
  pub fn nodes(&self) -> &[f64] {
    &self.nodes
  }
  pub fn weights(&self) -> &[f64] {
    &self.weights
  }

  pub fn apply_ref<F>(&self, f: F) -> f64
  where
    F: Fn(f64) -> f64,
  {
    self
      .nodes
      .iter()
      .zip(self.weights.iter())
      .map(|(&t, w)| w * f(t))
      .sum()
  }

  /// Integrates `f` over the cell.
  ///
  /// `f` is evaluated at global coordinates.
  pub fn apply<F>(&self, f: F, cell: &MeshCell) -> f64
  where
    F: Fn(f64) -> f64,
  {
    cell.vol() * self.apply_ref(|t| f(cell.ref2global(t)))
  }
}

#[cfg(test)]
mod test {
  use super::QuadRule;
  use crate::mesh::MeshCell;

  fn monomial_integral(degree: i32) -> f64 {
    1.0 / (degree + 1) as f64
  }

  #[test]
  fn gauss_legendre_exactness() {
    for npoints in 1..=4 {
      let rule = QuadRule::gauss_legendre(npoints).unwrap();
      assert!((rule.weights().iter().sum::<f64>() - 1.0).abs() < 1e-14);
      for degree in 0..(2 * npoints as i32) {
        let computed = rule.apply_ref(|t| t.powi(degree));
        let expected = monomial_integral(degree);
        assert!(
          (computed - expected).abs() < 1e-14,
          "n={npoints} degree={degree}: {computed} != {expected}"
        );
      }
    }
  }

  #[test]
  fn custom_rule() {
    let simpson =
      QuadRule::new(vec![0.0, 0.5, 1.0], vec![1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0]).unwrap();
    assert_eq!(simpson.npoints(), 3);
    assert_eq!(simpson.nodes()[1], 0.5);
    assert!((simpson.apply_ref(|t| t.powi(3)) - 0.25).abs() < 1e-15);
    assert!(QuadRule::new(vec![0.0], vec![]).is_err());
  }

  #[test]
  fn unsupported_rule() {
    assert!(QuadRule::gauss_legendre(0).is_err());
    assert!(QuadRule::gauss_legendre(5).is_err());
  }

  #[test]
  fn linear_exactness_of_simple_rules() {
    for rule in [QuadRule::midpoint(), QuadRule::trapezoidal()] {
      assert!((rule.apply_ref(|t| 3.0 * t + 1.0) - 2.5).abs() < 1e-15);
    }
  }

  #[test]
  fn integral_over_cell() {
    let cell = MeshCell::new(0, [0, 1], [1.0, 3.0]);
    let rule = QuadRule::gauss_legendre(2).unwrap();
    // int_1^3 x^2 dx = 26/3
    assert!((rule.apply(|x| x * x, &cell) - 26.0 / 3.0).abs() < 1e-13);
  }
}
