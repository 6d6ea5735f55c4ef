use crate::{
    problem::{travel_cost_matrix::Cost, vehicle::VehicleIdx},
    solver::{
        ls::inter_reverse_two_opt::InterReverseTwoOptOperator,
        solution::{solution_state::SolutionState, working_solution::WorkingSolution},
    },
};

/// Contract shared by every local search operator.
///
/// The driver calls [`compute_gain`](Self::compute_gain) and
/// [`is_valid`](Self::is_valid) against a fresh [`SolutionState`], applies the
/// best legal candidate, then recomputes the state of every vehicle returned
/// by [`update_candidates`](Self::update_candidates).
pub trait LocalSearchOperator {
    /// Computes and stores the cost reduction of the move. Positive means the
    /// solution gets cheaper.
    fn compute_gain(&mut self, solution: &WorkingSolution, state: &SolutionState) -> Cost;

    /// The gain stored by the last `compute_gain` call.
    fn gain(&self) -> Option<Cost>;

    /// Capacity and skill feasibility of the routes the move would produce.
    fn is_valid(&self, solution: &WorkingSolution, state: &SolutionState) -> bool;

    /// Realizes the move in place. Must only follow a successful `is_valid`.
    fn apply(&self, solution: &mut WorkingSolution);

    /// Vehicles whose routes need new candidate moves after `apply`.
    fn addition_candidates(&self) -> Vec<VehicleIdx>;

    /// Vehicles whose [`SolutionState`] entries are stale after `apply`.
    fn update_candidates(&self) -> Vec<VehicleIdx>;
}

#[derive(Debug, Clone)]
pub enum LocalSearchMove {
    /// Exchanges the tail of one route with the head of another, reversing both.
    InterReverseTwoOpt(InterReverseTwoOptOperator),
}

impl LocalSearchMove {
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::InterReverseTwoOpt { .. } => "Inter-Reverse-2-Opt",
        }
    }

    pub fn compute_gain(&mut self, solution: &WorkingSolution, state: &SolutionState) -> Cost {
        match self {
            LocalSearchMove::InterReverseTwoOpt(op) => op.compute_gain(solution, state),
        }
    }

    pub fn gain(&self) -> Option<Cost> {
        match self {
            LocalSearchMove::InterReverseTwoOpt(op) => op.gain(),
        }
    }

    pub fn is_valid(&self, solution: &WorkingSolution, state: &SolutionState) -> bool {
        match self {
            LocalSearchMove::InterReverseTwoOpt(op) => op.is_valid(solution, state),
        }
    }

    pub fn apply(&self, solution: &mut WorkingSolution) {
        match self {
            LocalSearchMove::InterReverseTwoOpt(op) => op.apply(solution),
        }
    }

    pub fn addition_candidates(&self) -> Vec<VehicleIdx> {
        match self {
            LocalSearchMove::InterReverseTwoOpt(op) => op.addition_candidates(),
        }
    }

    pub fn update_candidates(&self) -> Vec<VehicleIdx> {
        match self {
            LocalSearchMove::InterReverseTwoOpt(op) => op.update_candidates(),
        }
    }
}

impl From<InterReverseTwoOptOperator> for LocalSearchMove {
    fn from(op: InterReverseTwoOptOperator) -> Self {
        LocalSearchMove::InterReverseTwoOpt(op)
    }
}
