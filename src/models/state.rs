use crate::errors::{ensure_len, Result};
use nalgebra as na;
use std::ops::{Index, IndexMut};

/// Ordered sequence of `D`-dimensional vectors describing a particle ensemble.
///
/// Physical systems interleave their degrees of freedom: even indices hold
/// positions, odd indices the matching velocities.
#[derive(Debug, Clone, PartialEq)]
pub struct State<const D: usize> {
    vectors: Vec<na::SVector<f64, D>>,
}

impl<const D: usize> State<D> {
    pub fn new(vectors: Vec<na::SVector<f64, D>>) -> Self {
        State { vectors }
    }

    pub fn zeros(len: usize) -> Self {
        State {
            vectors: vec![na::SVector::zeros(); len],
        }
    }

    /// Builds an interleaved position/velocity state from matching slices.
    pub fn from_pairs(
        positions: &[na::SVector<f64, D>],
        velocities: &[na::SVector<f64, D>],
    ) -> Result<Self> {
        ensure_len(positions.len(), velocities.len())?;
        let vectors = positions
            .iter()
            .zip(velocities)
            .flat_map(|(p, v)| [*p, *v])
            .collect();
        Ok(State { vectors })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, na::SVector<f64, D>> {
        self.vectors.iter()
    }

    pub fn as_slice(&self) -> &[na::SVector<f64, D>] {
        &self.vectors
    }

    pub fn into_inner(self) -> Vec<na::SVector<f64, D>> {
        self.vectors
    }

    /// Number of position/velocity pairs.
    pub fn num_particles(&self) -> usize {
        self.vectors.len() / 2
    }

    pub fn position(&self, particle: usize) -> &na::SVector<f64, D> {
        &self.vectors[2 * particle]
    }

    pub fn velocity(&self, particle: usize) -> &na::SVector<f64, D> {
        &self.vectors[2 * particle + 1]
    }

    pub fn positions(&self) -> impl Iterator<Item = &na::SVector<f64, D>> {
        self.vectors.iter().step_by(2)
    }

    pub fn velocities(&self) -> impl Iterator<Item = &na::SVector<f64, D>> {
        self.vectors.iter().skip(1).step_by(2)
    }

    /// Sum of absolute component differences, the embedded-pair error measure.
    pub fn l1_distance(&self, other: &Self) -> Result<f64> {
        ensure_len(self.len(), other.len())?;
        Ok(self
            .vectors
            .iter()
            .zip(&other.vectors)
            .map(|(a, b)| (a - b).abs().sum())
            .sum())
    }

    pub fn is_finite(&self) -> bool {
        self.vectors.iter().all(|v| v.iter().all(|c| c.is_finite()))
    }
}

impl<const D: usize> From<Vec<na::SVector<f64, D>>> for State<D> {
    fn from(vectors: Vec<na::SVector<f64, D>>) -> Self {
        State::new(vectors)
    }
}

impl<const D: usize> FromIterator<na::SVector<f64, D>> for State<D> {
    fn from_iter<I: IntoIterator<Item = na::SVector<f64, D>>>(iter: I) -> Self {
        State::new(iter.into_iter().collect())
    }
}

impl<const D: usize> Index<usize> for State<D> {
    type Output = na::SVector<f64, D>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.vectors[index]
    }
}

impl<const D: usize> IndexMut<usize> for State<D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.vectors[index]
    }
}

// Element-wise arithmetic. Mixing lengths is a caller bug, steppers check
// shapes before combining stages.
impl<const D: usize> std::ops::Add for State<D> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        assert_eq!(
            self.len(),
            other.len(),
            "cannot add states of different lengths"
        );
        State {
            vectors: self
                .vectors
                .into_iter()
                .zip(other.vectors)
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

impl<const D: usize> std::ops::Mul<f64> for State<D> {
    type Output = Self;

    fn mul(mut self, scalar: f64) -> Self {
        for v in &mut self.vectors {
            *v *= scalar;
        }
        self
    }
}
