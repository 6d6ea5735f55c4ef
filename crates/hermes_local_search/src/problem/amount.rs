use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Read access to a multi-dimensional quantity. Dimensions past `len()` read
/// as zero, so amounts of different lengths can be combined freely.
pub trait AmountExpression {
    fn get(&self, index: usize) -> f64;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        (0..self.len()).all(|index| self.get(index) == 0.0)
    }
}

impl<T: AmountExpression + ?Sized> AmountExpression for &T {
    #[inline]
    fn get(&self, index: usize) -> f64 {
        (**self).get(index)
    }

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }
}

type Vector = SmallVec<[f64; 2]>;

/// Demand of a job or capacity of a vehicle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Vector);

impl Amount {
    pub const EMPTY: Amount = Amount(Vector::new_const());

    pub fn empty() -> Self {
        Self::EMPTY
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        let mut vec = Vector::with_capacity(dimensions);
        vec.resize(dimensions, 0.0);
        Amount(vec)
    }

    pub fn from_vec(vec: Vec<f64>) -> Self {
        Amount(Vector::from_vec(vec))
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn update_expr(&mut self, other: impl AmountExpression) {
        self.0.clear();
        self.0.extend((0..other.len()).map(|index| other.get(index)));
    }
}

impl From<Vec<f64>> for Amount {
    fn from(vec: Vec<f64>) -> Self {
        Amount::from_vec(vec)
    }
}

impl AmountExpression for Amount {
    #[inline]
    fn get(&self, index: usize) -> f64 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// `true` when every dimension of `demand` fits in the same dimension of
/// `capacity`.
#[inline]
pub fn is_capacity_satisfied(capacity: &Amount, demand: impl AmountExpression) -> bool {
    let dimensions = capacity.len().max(demand.len());
    (0..dimensions).all(|index| demand.get(index) <= capacity.get(index))
}

impl<E: AmountExpression> AddAssign<E> for Amount {
    fn add_assign(&mut self, rhs: E) {
        if self.0.len() < rhs.len() {
            self.0.resize(rhs.len(), 0.0);
        }

        for (index, value) in self.0.iter_mut().enumerate() {
            *value += rhs.get(index);
        }
    }
}

impl<E: AmountExpression> SubAssign<E> for Amount {
    fn sub_assign(&mut self, rhs: E) {
        if self.0.len() < rhs.len() {
            self.0.resize(rhs.len(), 0.0);
        }

        for (index, value) in self.0.iter_mut().enumerate() {
            *value -= rhs.get(index);
        }
    }
}

impl<A: AmountExpression> PartialEq<A> for Amount {
    fn eq(&self, other: &A) -> bool {
        let dimensions = self.len().max(other.len());
        (0..dimensions).all(|index| self.get(index) == other.get(index))
    }
}

/// Lazy `lhs + rhs`, evaluated per dimension without allocating.
#[derive(Debug, Clone, Copy)]
pub struct AmountSum<L, R> {
    pub lhs: L,
    pub rhs: R,
}

impl<L: AmountExpression, R: AmountExpression> AmountExpression for AmountSum<L, R> {
    #[inline]
    fn get(&self, index: usize) -> f64 {
        self.lhs.get(index) + self.rhs.get(index)
    }

    #[inline]
    fn len(&self) -> usize {
        self.lhs.len().max(self.rhs.len())
    }
}

/// Lazy `lhs - rhs`.
#[derive(Debug, Clone, Copy)]
pub struct AmountSub<L, R> {
    pub lhs: L,
    pub rhs: R,
}

impl<L: AmountExpression, R: AmountExpression> AmountExpression for AmountSub<L, R> {
    #[inline]
    fn get(&self, index: usize) -> f64 {
        self.lhs.get(index) - self.rhs.get(index)
    }

    #[inline]
    fn len(&self) -> usize {
        self.lhs.len().max(self.rhs.len())
    }
}

impl<'a, 'b> Add<&'b Amount> for &'a Amount {
    type Output = AmountSum<&'a Amount, &'b Amount>;

    fn add(self, rhs: &'b Amount) -> Self::Output {
        AmountSum { lhs: self, rhs }
    }
}

impl<'a, 'b> Sub<&'b Amount> for &'a Amount {
    type Output = AmountSub<&'a Amount, &'b Amount>;

    fn sub(self, rhs: &'b Amount) -> Self::Output {
        AmountSub { lhs: self, rhs }
    }
}

impl<'a, L: AmountExpression, R: AmountExpression> Add<&'a Amount> for AmountSum<L, R> {
    type Output = AmountSum<Self, &'a Amount>;

    fn add(self, rhs: &'a Amount) -> Self::Output {
        AmountSum { lhs: self, rhs }
    }
}

impl<L: AmountExpression, R: AmountExpression> From<AmountSum<L, R>> for Amount {
    fn from(value: AmountSum<L, R>) -> Self {
        let mut amount = Amount::empty();
        amount.update_expr(value);
        amount
    }
}

impl<L: AmountExpression, R: AmountExpression> From<AmountSub<L, R>> for Amount {
    fn from(value: AmountSub<L, R>) -> Self {
        let mut amount = Amount::empty();
        amount.update_expr(value);
        amount
    }
}
