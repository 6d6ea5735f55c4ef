use std::sync::Arc;

use crate::{error::ProblemError, problem::location::LocationIdx};

pub type Cost = f64;

/// Directed travel costs between locations, stored flat.
///
/// The cost from `from` to `to` lives at `from * num_locations + to`. The
/// matrix is not assumed to be symmetric: reversing a route segment may change
/// its cost.
#[derive(Debug, Clone)]
pub struct TravelCostMatrix {
    costs: Arc<Vec<Cost>>,
    num_locations: usize,
    is_symmetric: bool,
}

fn is_flat_matrix_symmetric(matrix: &[Cost], num_locations: usize) -> bool {
    for i in 0..num_locations {
        for j in (i + 1)..num_locations {
            if matrix[i * num_locations + j] != matrix[j * num_locations + i] {
                return false;
            }
        }
    }
    true
}

impl TravelCostMatrix {
    pub fn new(costs: Vec<Vec<Cost>>) -> Result<Self, ProblemError> {
        let num_locations = costs.len();

        if let Some((row, values)) = costs
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != num_locations)
        {
            return Err(ProblemError::NonSquareMatrix {
                row,
                len: values.len(),
                expected: num_locations,
            });
        }

        Self::from_flat(costs.into_iter().flatten().collect(), num_locations)
    }

    pub fn from_flat(costs: Vec<Cost>, num_locations: usize) -> Result<Self, ProblemError> {
        if costs.len() != num_locations * num_locations {
            return Err(ProblemError::NonSquareMatrix {
                row: 0,
                len: costs.len(),
                expected: num_locations * num_locations,
            });
        }

        if let Some((index, &cost)) = costs
            .iter()
            .enumerate()
            .find(|(_, cost)| !cost.is_finite() || **cost < 0.0)
        {
            return Err(ProblemError::InvalidCost {
                from: LocationIdx::new(index / num_locations),
                to: LocationIdx::new(index % num_locations),
                cost,
            });
        }

        let is_symmetric = is_flat_matrix_symmetric(&costs, num_locations);

        Ok(TravelCostMatrix {
            costs: Arc::new(costs),
            num_locations,
            is_symmetric,
        })
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    #[inline(always)]
    pub fn travel_cost(&self, from: LocationIdx, to: LocationIdx) -> Cost {
        self.costs[self.index(from, to)]
    }

    pub fn max_cost(&self) -> Cost {
        self.costs.iter().copied().fold(0.0, Cost::max)
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn contains(&self, location: LocationIdx) -> bool {
        location.get() < self.num_locations
    }
}
