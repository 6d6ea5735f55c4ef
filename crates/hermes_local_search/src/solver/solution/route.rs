use std::ops::Range;

use crate::problem::{
    amount::Amount,
    job::JobIdx,
    location::LocationIdx,
    travel_cost_matrix::Cost,
    vehicle::{Vehicle, VehicleIdx},
    vehicle_routing_problem::VehicleRoutingProblem,
};

/// The ordered jobs served by one vehicle.
///
/// `version` is bumped on every mutation so cached per-route data can tell
/// whether it was computed from the current job sequence.
#[derive(Clone, Debug)]
pub struct WorkingSolutionRoute {
    pub(super) vehicle_id: VehicleIdx,
    pub(super) job_ids: Vec<JobIdx>,
    pub(super) version: usize,
}

impl WorkingSolutionRoute {
    pub(super) fn new(vehicle_id: VehicleIdx, job_ids: Vec<JobIdx>) -> Self {
        WorkingSolutionRoute {
            vehicle_id,
            job_ids,
            version: 0,
        }
    }

    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn vehicle<'a>(&self, problem: &'a VehicleRoutingProblem) -> &'a Vehicle {
        problem.vehicle(self.vehicle_id)
    }

    pub fn len(&self) -> usize {
        self.job_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.job_ids.is_empty()
    }

    pub fn version(&self) -> usize {
        self.version
    }

    pub fn job_ids(&self) -> &[JobIdx] {
        &self.job_ids
    }

    pub fn job_id(&self, position: usize) -> JobIdx {
        self.job_ids[position]
    }

    pub fn first(&self) -> Option<JobIdx> {
        self.job_ids.first().copied()
    }

    pub fn last(&self) -> Option<JobIdx> {
        self.job_ids.last().copied()
    }

    pub fn contains_job(&self, job_id: JobIdx) -> bool {
        self.job_ids.contains(&job_id)
    }

    #[inline]
    pub fn location_id(&self, problem: &VehicleRoutingProblem, position: usize) -> LocationIdx {
        problem.job_location_id(self.job_ids[position])
    }

    /// Jobs in `[start, end)`, iterable from either side.
    pub fn job_ids_iter(
        &self,
        start: usize,
        end: usize,
    ) -> impl DoubleEndedIterator<Item = JobIdx> + Clone + '_ {
        self.job_ids[start..end].iter().copied()
    }

    /// Full travel cost of the route including depot edges, computed by
    /// walking the whole route. An empty route costs nothing.
    pub fn transport_costs(&self, problem: &VehicleRoutingProblem) -> Cost {
        if self.is_empty() {
            return 0.0;
        }

        let vehicle = self.vehicle(problem);
        let locations = self
            .job_ids
            .iter()
            .map(|&job_id| problem.job_location_id(job_id));

        let locations = vehicle
            .start_location_id()
            .into_iter()
            .chain(locations)
            .chain(vehicle.end_location_id())
            .collect::<Vec<_>>();

        locations
            .windows(2)
            .map(|pair| problem.travel_cost(pair[0], pair[1]))
            .sum()
    }

    /// Sum of the amounts of every job in the route.
    pub fn total_amount(&self, problem: &VehicleRoutingProblem) -> Amount {
        let mut total = Amount::empty();
        for &job_id in &self.job_ids {
            total += problem.job(job_id).amount();
        }
        total
    }

    /// Replaces the jobs in `range` with `job_ids`.
    pub(crate) fn replace_jobs(
        &mut self,
        range: Range<usize>,
        job_ids: impl IntoIterator<Item = JobIdx>,
    ) {
        self.job_ids.splice(range, job_ids);
        self.version += 1;
    }
}
