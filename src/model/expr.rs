use std::ops::{Add, Mul, Neg, Sub};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Index of a variable inside the model that declared it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Affine expression `sum(coefficient * variable) + constant`
///
/// Terms keep insertion order so that a model prints the way it was written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`LinearExpr::add_term`]
    pub fn term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant += constant;
        self
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Merge repeated variables and drop zero coefficients.
    pub fn normalized(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(var, _)| *var)
            .unique()
            .filter_map(|var| {
                let coefficient: f64 = self
                    .terms
                    .iter()
                    .filter(|(v, _)| *v == var)
                    .map(|(_, c)| c)
                    .sum();
                (coefficient != 0.0).then_some((var, coefficient))
            })
            .collect();
        Self {
            terms,
            constant: self.constant,
        }
    }

    /// Evaluate the expression given a value for each variable.
    pub fn evaluate<F>(&self, mut value_of: F) -> f64
    where
        F: FnMut(VarId) -> f64,
    {
        self.terms
            .iter()
            .map(|(var, coefficient)| coefficient * value_of(*var))
            .sum::<f64>()
            + self.constant
    }

    /// First non-finite coefficient or constant, if any
    pub(crate) fn first_non_finite(&self) -> Option<f64> {
        self.terms
            .iter()
            .map(|(_, c)| *c)
            .chain(std::iter::once(self.constant))
            .find(|c| !c.is_finite())
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::new().term(var, 1.0)
    }
}

impl From<f64> for LinearExpr {
    fn from(constant: f64) -> Self {
        LinearExpr::new().with_constant(constant)
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
            constant: 0.0,
        }
    }
}

impl Mul<f64> for VarId {
    type Output = LinearExpr;

    fn mul(self, rhs: f64) -> LinearExpr {
        LinearExpr::new().term(self, rhs)
    }
}

impl Mul<VarId> for f64 {
    type Output = LinearExpr;

    fn mul(self, rhs: VarId) -> LinearExpr {
        LinearExpr::new().term(rhs, self)
    }
}

impl Mul<f64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(self, rhs: f64) -> LinearExpr {
        LinearExpr {
            terms: self.terms.into_iter().map(|(v, c)| (v, c * rhs)).collect(),
            constant: self.constant * rhs,
        }
    }
}

impl<T: Into<LinearExpr>> Add<T> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: T) -> LinearExpr {
        let rhs: LinearExpr = rhs.into();
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl<T: Into<LinearExpr>> Add<T> for VarId {
    type Output = LinearExpr;

    fn add(self, rhs: T) -> LinearExpr {
        LinearExpr::from(self) + rhs
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        self * -1.0
    }
}

impl<T: Into<LinearExpr>> Sub<T> for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: T) -> LinearExpr {
        let rhs: LinearExpr = rhs.into();
        self + -rhs
    }
}

impl<T: Into<LinearExpr>> Sub<T> for VarId {
    type Output = LinearExpr;

    fn sub(self, rhs: T) -> LinearExpr {
        LinearExpr::from(self) - rhs
    }
}
