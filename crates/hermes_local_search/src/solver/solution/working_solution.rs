use std::sync::Arc;

use fxhash::{FxHashMap, FxHashSet};

use crate::{
    error::SolutionError,
    problem::{
        job::JobIdx, travel_cost_matrix::Cost, vehicle::VehicleIdx,
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::solution::route::WorkingSolutionRoute,
    utils::enumerate_idx::EnumerateIdx,
};

/// The route arena: exactly one route per vehicle, indexed by `VehicleIdx`.
///
/// Moves refer to routes by vehicle and rank only, so mutating a route here is
/// the single place where cached per-vehicle data becomes stale.
#[derive(Clone)]
pub struct WorkingSolution {
    problem: Arc<VehicleRoutingProblem>,
    routes: Vec<WorkingSolutionRoute>,
}

impl WorkingSolution {
    pub fn new(problem: Arc<VehicleRoutingProblem>) -> Self {
        let routes = problem
            .vehicles()
            .iter()
            .enumerate_idx()
            .map(|(vehicle_id, _)| WorkingSolutionRoute::new(vehicle_id, Vec::new()))
            .collect();

        WorkingSolution { problem, routes }
    }

    /// Builds a solution from `(vehicle, jobs)` pairs. Vehicles not listed get
    /// an empty route; jobs not listed stay unassigned.
    pub fn from_routes<I>(problem: Arc<VehicleRoutingProblem>, routes: I) -> Result<Self, SolutionError>
    where
        I: IntoIterator<Item = (VehicleIdx, Vec<JobIdx>)>,
    {
        let mut solution = WorkingSolution::new(problem);
        let mut seen_vehicles = FxHashSet::default();
        let mut assigned_jobs: FxHashMap<JobIdx, VehicleIdx> = FxHashMap::default();

        for (vehicle_id, job_ids) in routes {
            if vehicle_id.get() >= solution.routes.len() {
                return Err(SolutionError::UnknownVehicle(vehicle_id));
            }

            if !seen_vehicles.insert(vehicle_id) {
                return Err(SolutionError::DuplicateRoute(vehicle_id));
            }

            for &job_id in &job_ids {
                if job_id.get() >= solution.problem.jobs().len() {
                    return Err(SolutionError::UnknownJob(job_id));
                }

                if let Some(&first) = assigned_jobs.get(&job_id) {
                    return Err(SolutionError::JobAssignedTwice {
                        job: job_id,
                        first,
                        second: vehicle_id,
                    });
                }

                assigned_jobs.insert(job_id, vehicle_id);
            }

            solution.routes[vehicle_id.get()] = WorkingSolutionRoute::new(vehicle_id, job_ids);
        }

        Ok(solution)
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        self.problem.as_ref()
    }

    pub fn routes(&self) -> &[WorkingSolutionRoute] {
        &self.routes
    }

    pub fn route(&self, vehicle_id: VehicleIdx) -> &WorkingSolutionRoute {
        &self.routes[vehicle_id.get()]
    }

    pub(crate) fn route_mut(&mut self, vehicle_id: VehicleIdx) -> &mut WorkingSolutionRoute {
        &mut self.routes[vehicle_id.get()]
    }

    pub fn non_empty_routes_iter(&self) -> impl Iterator<Item = &WorkingSolutionRoute> {
        self.routes.iter().filter(|route| !route.is_empty())
    }

    pub fn total_transport_costs(&self) -> Cost {
        self.non_empty_routes_iter()
            .map(|route| route.transport_costs(&self.problem))
            .sum()
    }

    pub fn unassigned_jobs(&self) -> FxHashSet<JobIdx> {
        let assigned = self
            .routes
            .iter()
            .flat_map(|route| route.job_ids().iter().copied())
            .collect::<FxHashSet<_>>();

        (0..self.problem.jobs().len())
            .map(JobIdx::new)
            .filter(|job_id| !assigned.contains(job_id))
            .collect()
    }
}
