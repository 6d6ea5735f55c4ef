use tracing::{instrument, trace};

use crate::{
    problem::{
        amount::Amount, travel_cost_matrix::Cost, vehicle::VehicleIdx,
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::solution::{route::WorkingSolutionRoute, working_solution::WorkingSolution},
};

/// Per-vehicle prefix/suffix aggregates turning route scans into O(1)
/// lookups for move evaluation.
///
/// Entries for a vehicle are derived from its route and must be recomputed
/// (see [`SolutionState::recompute`]) after the route changes; until then
/// [`SolutionState::is_stale`] reports the vehicle as stale.
///
/// For a route `route` of vehicle `v` and a rank `r`:
/// - `fwd_cost(v, r)`: travel cost of `route[0..=r]` in route order.
/// - `bwd_cost(v, r)`: travel cost of `route[0..=r]` walked backwards.
/// - `fwd_amount(v, r)`: total amount of `route[0..=r]`.
/// - `bwd_amount(v, r)`: total amount of `route[r + 1..]`.
///
/// Skill ranks are indexed by `(route owner, serving vehicle)`:
/// - `skill_rank_prefix(v1, v2)`: how many leading jobs of `v1`'s route
///   `v2` can serve.
/// - `skill_rank_suffix(v1, v2)`: smallest rank from which `v2` can serve
///   every remaining job of `v1`'s route.
pub struct SolutionState {
    fwd_costs: Vec<Vec<Cost>>,
    bwd_costs: Vec<Vec<Cost>>,
    fwd_amounts: Vec<Vec<Amount>>,
    bwd_amounts: Vec<Vec<Amount>>,
    fwd_skill_ranks: Vec<Vec<usize>>,
    bwd_skill_ranks: Vec<Vec<usize>>,
    versions: Vec<usize>,
}

impl SolutionState {
    pub fn new(solution: &WorkingSolution) -> Self {
        let num_vehicles = solution.problem().vehicles().len();

        let mut state = SolutionState {
            fwd_costs: vec![Vec::new(); num_vehicles],
            bwd_costs: vec![Vec::new(); num_vehicles],
            fwd_amounts: vec![Vec::new(); num_vehicles],
            bwd_amounts: vec![Vec::new(); num_vehicles],
            fwd_skill_ranks: vec![vec![0; num_vehicles]; num_vehicles],
            bwd_skill_ranks: vec![vec![0; num_vehicles]; num_vehicles],
            versions: vec![0; num_vehicles],
        };

        state.recompute_all(solution);
        state
    }

    #[instrument(skip_all, level = "trace")]
    pub fn recompute_all(&mut self, solution: &WorkingSolution) {
        let problem = solution.problem();

        for route in solution.routes() {
            let vehicle = route.vehicle_id().get();
            self.update_costs(problem, route);
            self.update_amounts(problem, route);
            self.update_skill_ranks_row(problem, route);
            self.versions[vehicle] = route.version();
        }
    }

    /// Rebuilds every entry derived from `vehicle_id`'s route, including the
    /// skill ranks where the vehicle is the serving side. O(route length) for
    /// the vehicle's own arrays, O(total jobs) for the skill columns.
    pub fn recompute(&mut self, solution: &WorkingSolution, vehicle_id: VehicleIdx) {
        let problem = solution.problem();
        let route = solution.route(vehicle_id);

        self.update_costs(problem, route);
        self.update_amounts(problem, route);
        self.update_skill_ranks_row(problem, route);

        for other in solution.routes() {
            if other.vehicle_id() == vehicle_id {
                continue;
            }

            let (fwd, bwd) = compute_skill_ranks(problem, other, vehicle_id);
            self.fwd_skill_ranks[other.vehicle_id().get()][vehicle_id.get()] = fwd;
            self.bwd_skill_ranks[other.vehicle_id().get()][vehicle_id.get()] = bwd;
        }

        self.versions[vehicle_id.get()] = route.version();

        trace!(
            vehicle = %vehicle_id,
            len = route.len(),
            version = route.version(),
            "Recomputed solution state"
        );
    }

    /// `true` when `vehicle_id`'s route changed since its entries were built.
    pub fn is_stale(&self, solution: &WorkingSolution, vehicle_id: VehicleIdx) -> bool {
        self.versions[vehicle_id.get()] != solution.route(vehicle_id).version()
    }

    pub fn version(&self, vehicle_id: VehicleIdx) -> usize {
        self.versions[vehicle_id.get()]
    }

    #[inline]
    pub fn fwd_cost(&self, vehicle_id: VehicleIdx, rank: usize) -> Cost {
        self.fwd_costs[vehicle_id.get()][rank]
    }

    #[inline]
    pub fn bwd_cost(&self, vehicle_id: VehicleIdx, rank: usize) -> Cost {
        self.bwd_costs[vehicle_id.get()][rank]
    }

    #[inline]
    pub fn fwd_amount(&self, vehicle_id: VehicleIdx, rank: usize) -> &Amount {
        &self.fwd_amounts[vehicle_id.get()][rank]
    }

    #[inline]
    pub fn bwd_amount(&self, vehicle_id: VehicleIdx, rank: usize) -> &Amount {
        &self.bwd_amounts[vehicle_id.get()][rank]
    }

    #[inline]
    pub fn skill_rank_prefix(&self, route_vehicle: VehicleIdx, serving_vehicle: VehicleIdx) -> usize {
        self.fwd_skill_ranks[route_vehicle.get()][serving_vehicle.get()]
    }

    #[inline]
    pub fn skill_rank_suffix(&self, route_vehicle: VehicleIdx, serving_vehicle: VehicleIdx) -> usize {
        self.bwd_skill_ranks[route_vehicle.get()][serving_vehicle.get()]
    }

    fn update_costs(&mut self, problem: &VehicleRoutingProblem, route: &WorkingSolutionRoute) {
        let vehicle = route.vehicle_id().get();
        let fwd_costs = &mut self.fwd_costs[vehicle];
        let bwd_costs = &mut self.bwd_costs[vehicle];
        fwd_costs.clear();
        bwd_costs.clear();

        if route.is_empty() {
            return;
        }

        let mut fwd = 0.0;
        let mut bwd = 0.0;
        fwd_costs.push(fwd);
        bwd_costs.push(bwd);

        for rank in 1..route.len() {
            let previous = route.location_id(problem, rank - 1);
            let current = route.location_id(problem, rank);

            fwd += problem.travel_cost(previous, current);
            bwd += problem.travel_cost(current, previous);
            fwd_costs.push(fwd);
            bwd_costs.push(bwd);
        }
    }

    fn update_amounts(&mut self, problem: &VehicleRoutingProblem, route: &WorkingSolutionRoute) {
        let vehicle = route.vehicle_id().get();
        let len = route.len();

        let fwd_amounts = &mut self.fwd_amounts[vehicle];
        fwd_amounts.clear();
        let mut current = Amount::empty();
        for &job_id in route.job_ids() {
            current += problem.job(job_id).amount();
            fwd_amounts.push(current.clone());
        }

        let bwd_amounts = &mut self.bwd_amounts[vehicle];
        bwd_amounts.clear();
        bwd_amounts.resize(len, Amount::empty());
        for rank in (0..len.saturating_sub(1)).rev() {
            let mut suffix = bwd_amounts[rank + 1].clone();
            suffix += problem.job(route.job_id(rank + 1)).amount();
            bwd_amounts[rank] = suffix;
        }
    }

    fn update_skill_ranks_row(&mut self, problem: &VehicleRoutingProblem, route: &WorkingSolutionRoute) {
        let vehicle = route.vehicle_id().get();

        for serving in 0..problem.vehicles().len() {
            let (fwd, bwd) = compute_skill_ranks(problem, route, VehicleIdx::new(serving));
            self.fwd_skill_ranks[vehicle][serving] = fwd;
            self.bwd_skill_ranks[vehicle][serving] = bwd;
        }
    }
}

/// `(prefix, suffix)` skill ranks of `route` when served by `serving_vehicle`.
fn compute_skill_ranks(
    problem: &VehicleRoutingProblem,
    route: &WorkingSolutionRoute,
    serving_vehicle: VehicleIdx,
) -> (usize, usize) {
    let is_compatible = |job_id| problem.is_job_compatible_with_vehicle(serving_vehicle, job_id);

    let fwd = route
        .job_ids()
        .iter()
        .position(|&job_id| !is_compatible(job_id))
        .unwrap_or(route.len());

    let bwd = route
        .job_ids()
        .iter()
        .rposition(|&job_id| !is_compatible(job_id))
        .map_or(0, |rank| rank + 1);

    (fwd, bwd)
}
