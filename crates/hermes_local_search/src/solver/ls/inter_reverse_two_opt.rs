use tracing::debug;

use crate::{
    problem::{amount::is_capacity_satisfied, travel_cost_matrix::Cost, vehicle::VehicleIdx},
    solver::{
        ls::r#move::LocalSearchOperator,
        solution::{solution_state::SolutionState, working_solution::WorkingSolution},
    },
};

/// **Reverse Two-Opt** (Inter-route)
///
/// Exchanges the **tail** of the source route S with the **head** of the
/// target route T, **reversing both exchanged segments** so both routes stay
/// contiguous paths.
///
/// Given cut ranks `source_rank` in S and `target_rank` in T:
/// - S's new route = S[0..=source_rank] ++ reverse(T[0..=target_rank])
/// - T's new route = reverse(S[source_rank+1..]) ++ T[target_rank+1..]
///
/// ```text
/// BEFORE (source_rank=2, target_rank=2):
/// Route S: [D]─[S0]─[S1]─[S2]─║─[S3]─[S4]─[S5]─[D]
/// Route T: [D]─[T0]─[T1]─[T2]─║─[T3]─[T4]─[D]
///
/// AFTER:
/// Route S: [D]─[S0]─[S1]─[S2]─[T2]─[T1]─[T0]─[D]
///              └─ kept ─┘     └─ T head REV ─┘
/// Route T: [D]─[S5]─[S4]─[S3]─[T3]─[T4]─[D]
///              └─ S tail REV ─┘└ kept ┘
/// ```
///
/// When both cut ranks are the last ranks, T loses all of its jobs and S
/// receives the whole of T reversed.
#[derive(Debug, Clone)]
pub struct InterReverseTwoOptOperator {
    params: InterReverseTwoOptOperatorParams,
    stored_gain: Cost,
    gain_computed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterReverseTwoOptOperatorParams {
    pub source_vehicle_id: VehicleIdx,
    pub target_vehicle_id: VehicleIdx,
    pub source_rank: usize,
    pub target_rank: usize,
}

impl InterReverseTwoOptOperator {
    /// Panics when the anchors are malformed: same vehicle on both sides, an
    /// empty route or a rank past the end of its route.
    pub fn new(solution: &WorkingSolution, params: InterReverseTwoOptOperatorParams) -> Self {
        if params.source_vehicle_id == params.target_vehicle_id {
            panic!("InterReverseTwoOptOperator must have different vehicles");
        }

        let source = solution.route(params.source_vehicle_id);
        let target = solution.route(params.target_vehicle_id);

        assert!(
            !source.is_empty() && !target.is_empty(),
            "InterReverseTwoOptOperator requires non-empty routes"
        );
        assert!(
            params.source_rank < source.len(),
            "Source rank {} out of bounds for route of length {}",
            params.source_rank,
            source.len()
        );
        assert!(
            params.target_rank < target.len(),
            "Target rank {} out of bounds for route of length {}",
            params.target_rank,
            target.len()
        );

        Self {
            params,
            stored_gain: 0.0,
            gain_computed: false,
        }
    }

    pub fn params(&self) -> &InterReverseTwoOptOperatorParams {
        &self.params
    }

    fn assert_fresh(&self, solution: &WorkingSolution, state: &SolutionState) {
        assert!(
            !state.is_stale(solution, self.params.source_vehicle_id)
                && !state.is_stale(solution, self.params.target_vehicle_id),
            "Solution state must be recomputed for vehicles {} and {}",
            self.params.source_vehicle_id,
            self.params.target_vehicle_id
        );
    }
}

impl LocalSearchOperator for InterReverseTwoOptOperator {
    fn compute_gain(&mut self, solution: &WorkingSolution, state: &SolutionState) -> Cost {
        self.assert_fresh(solution, state);

        let problem = solution.problem();
        let InterReverseTwoOptOperatorParams {
            source_vehicle_id: s,
            target_vehicle_id: t,
            source_rank,
            target_rank,
        } = self.params;

        let source = solution.route(s);
        let target = solution.route(t);
        let v_source = source.vehicle(problem);
        let v_target = target.vehicle(problem);

        let s_location = source.location_id(problem, source_rank);
        let t_location = target.location_id(problem, target_rank);
        let last_s = source.location_id(problem, source.len() - 1);
        let first_t = target.location_id(problem, 0);

        let last_in_source = source_rank == source.len() - 1;
        let last_in_target = target_rank == target.len() - 1;

        let mut gain = 0.0;

        // New edge between the kept head of S and the reversed head of T.
        gain -= problem.travel_cost(s_location, t_location);

        // T's head is now walked backwards.
        gain += state.fwd_cost(t, target_rank);
        gain -= state.bwd_cost(t, target_rank);

        if !last_in_target {
            let next_t = target.location_id(problem, target_rank + 1);
            gain += problem.travel_cost(t_location, next_t);
        }

        if !last_in_source {
            let next_s = source.location_id(problem, source_rank + 1);
            gain += problem.travel_cost(s_location, next_s);

            // S's tail is now walked backwards.
            let last_rank = source.len() - 1;
            gain += state.fwd_cost(s, last_rank) - state.fwd_cost(s, source_rank + 1);
            gain -= state.bwd_cost(s, last_rank) - state.bwd_cost(s, source_rank + 1);

            if last_in_target {
                // The reversed tail of S becomes the end of T.
                if let Some(end_t) = v_target.end_location_id() {
                    gain += problem.travel_cost(t_location, end_t);
                    gain -= problem.travel_cost(next_s, end_t);
                }
            } else {
                let next_t = target.location_id(problem, target_rank + 1);
                gain -= problem.travel_cost(next_s, next_t);
            }
        }

        if let Some(end_s) = v_source.end_location_id() {
            // First job of T is now the last job of S.
            gain += problem.travel_cost(last_s, end_s);
            gain -= problem.travel_cost(first_t, end_s);
        }

        if let Some(start_t) = v_target.start_location_id() {
            gain += problem.travel_cost(start_t, first_t);

            if !last_in_source {
                gain -= problem.travel_cost(start_t, last_s);
            } else if !last_in_target {
                let next_t = target.location_id(problem, target_rank + 1);
                gain -= problem.travel_cost(start_t, next_t);
            }
        }

        if last_in_source
            && last_in_target
            && let Some(end_t) = v_target.end_location_id()
        {
            // T is emptied: its edge to the end depot goes away too.
            gain += problem.travel_cost(t_location, end_t);
        }

        self.stored_gain = gain;
        self.gain_computed = true;

        gain
    }

    fn gain(&self) -> Option<Cost> {
        self.gain_computed.then_some(self.stored_gain)
    }

    fn is_valid(&self, solution: &WorkingSolution, state: &SolutionState) -> bool {
        self.assert_fresh(solution, state);

        let problem = solution.problem();
        let InterReverseTwoOptOperatorParams {
            source_vehicle_id: s,
            target_vehicle_id: t,
            source_rank,
            target_rank,
        } = self.params;

        // T must serve every job of S after the cut.
        if state.skill_rank_suffix(s, t) > source_rank + 1 {
            return false;
        }

        // S must serve every job of T up to the cut.
        if target_rank >= state.skill_rank_prefix(t, s) {
            return false;
        }

        is_capacity_satisfied(
            problem.vehicle(s).capacity(),
            state.fwd_amount(s, source_rank) + state.fwd_amount(t, target_rank),
        ) && is_capacity_satisfied(
            problem.vehicle(t).capacity(),
            state.bwd_amount(t, target_rank) + state.bwd_amount(s, source_rank),
        )
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        assert!(
            self.gain_computed,
            "compute_gain must be called before apply"
        );

        let InterReverseTwoOptOperatorParams {
            source_vehicle_id: s,
            target_vehicle_id: t,
            source_rank,
            target_rank,
        } = self.params;

        let source = solution.route(s);
        let target = solution.route(t);
        let source_len = source.len();

        let source_tail = source
            .job_ids_iter(source_rank + 1, source_len)
            .rev()
            .collect::<Vec<_>>();
        let target_head = target
            .job_ids_iter(0, target_rank + 1)
            .rev()
            .collect::<Vec<_>>();

        solution
            .route_mut(s)
            .replace_jobs(source_rank + 1..source_len, target_head);
        solution
            .route_mut(t)
            .replace_jobs(0..target_rank + 1, source_tail);

        debug!(
            source = %s,
            target = %t,
            source_rank,
            target_rank,
            gain = self.stored_gain,
            "Applied Inter-Reverse-2-Opt"
        );
    }

    fn addition_candidates(&self) -> Vec<VehicleIdx> {
        vec![self.params.source_vehicle_id, self.params.target_vehicle_id]
    }

    fn update_candidates(&self) -> Vec<VehicleIdx> {
        vec![self.params.source_vehicle_id, self.params.target_vehicle_id]
    }
}
