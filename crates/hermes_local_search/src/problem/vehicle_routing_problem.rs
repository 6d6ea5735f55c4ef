use crate::{
    error::ProblemError,
    problem::{
        amount::AmountExpression,
        job::{Job, JobIdx},
        location::LocationIdx,
        travel_cost_matrix::{Cost, TravelCostMatrix},
        vehicle::{Vehicle, VehicleIdx},
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// Immutable problem data shared by every solution: jobs, vehicles and the
/// travel cost matrix.
pub struct VehicleRoutingProblem {
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
    travel_costs: TravelCostMatrix,

    has_capacity: bool,
    has_skills: bool,

    /// `vehicle * jobs.len() + job`
    precomputed_vehicle_compatibilities: Vec<bool>,
}

impl VehicleRoutingProblem {
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, job_id: JobIdx) -> &Job {
        &self.jobs[job_id]
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn travel_costs(&self) -> &TravelCostMatrix {
        &self.travel_costs
    }

    #[inline]
    pub fn travel_cost(&self, from: LocationIdx, to: LocationIdx) -> Cost {
        self.travel_costs.travel_cost(from, to)
    }

    #[inline]
    pub fn job_location_id(&self, job_id: JobIdx) -> LocationIdx {
        self.jobs[job_id].location_id()
    }

    pub fn is_symmetric(&self) -> bool {
        self.travel_costs.is_symmetric()
    }

    pub fn has_capacity(&self) -> bool {
        self.has_capacity
    }

    pub fn has_skills(&self) -> bool {
        self.has_skills
    }

    /// O(1) skill compatibility lookup.
    #[inline]
    pub fn is_job_compatible_with_vehicle(&self, vehicle_id: VehicleIdx, job_id: JobIdx) -> bool {
        self.precomputed_vehicle_compatibilities[vehicle_id.get() * self.jobs.len() + job_id.get()]
    }

    fn precompute_vehicle_compatibilities(vehicles: &[Vehicle], jobs: &[Job]) -> Vec<bool> {
        let mut compatibilities = vec![true; vehicles.len() * jobs.len()];

        for (vehicle_index, vehicle) in vehicles.iter().enumerate() {
            for (job_index, job) in jobs.iter().enumerate() {
                compatibilities[vehicle_index * jobs.len() + job_index] =
                    vehicle.is_compatible_with(job);
            }
        }

        compatibilities
    }
}

#[derive(Default)]
pub struct VehicleRoutingProblemBuilder {
    jobs: Option<Vec<Job>>,
    vehicles: Option<Vec<Vehicle>>,
    travel_costs: Option<TravelCostMatrix>,
}

impl VehicleRoutingProblemBuilder {
    pub fn set_jobs(&mut self, jobs: Vec<Job>) -> &mut VehicleRoutingProblemBuilder {
        self.jobs = Some(jobs);
        self
    }

    pub fn add_job(&mut self, job: Job) -> &mut VehicleRoutingProblemBuilder {
        self.jobs.get_or_insert_with(Vec::new).push(job);
        self
    }

    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) -> &mut VehicleRoutingProblemBuilder {
        self.vehicles = Some(vehicles);
        self
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> &mut VehicleRoutingProblemBuilder {
        self.vehicles.get_or_insert_with(Vec::new).push(vehicle);
        self
    }

    pub fn set_travel_costs(
        &mut self,
        travel_costs: TravelCostMatrix,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.travel_costs = Some(travel_costs);
        self
    }

    pub fn build(self) -> Result<VehicleRoutingProblem, ProblemError> {
        let travel_costs = self
            .travel_costs
            .ok_or(ProblemError::MissingField("travel_costs"))?;
        let jobs = self.jobs.unwrap_or_default();
        let vehicles = self.vehicles.unwrap_or_default();

        if vehicles.is_empty() {
            return Err(ProblemError::EmptyFleet);
        }

        for (job_id, job) in jobs.iter().enumerate_idx::<JobIdx>() {
            if !travel_costs.contains(job.location_id()) {
                return Err(ProblemError::JobLocationOutOfBounds {
                    job: job_id,
                    location: job.location_id(),
                    num_locations: travel_costs.num_locations(),
                });
            }
        }

        for (vehicle_id, vehicle) in vehicles.iter().enumerate_idx::<VehicleIdx>() {
            let depots = vehicle
                .start_location_id()
                .into_iter()
                .chain(vehicle.end_location_id());

            for location in depots {
                if !travel_costs.contains(location) {
                    return Err(ProblemError::VehicleLocationOutOfBounds {
                        vehicle: vehicle_id,
                        location,
                        num_locations: travel_costs.num_locations(),
                    });
                }
            }
        }

        let precomputed_vehicle_compatibilities =
            VehicleRoutingProblem::precompute_vehicle_compatibilities(&vehicles, &jobs);

        Ok(VehicleRoutingProblem {
            has_capacity: jobs.iter().any(|job| !job.amount().is_empty()),
            has_skills: jobs.iter().any(|job| !job.skills().is_empty()),
            jobs,
            vehicles,
            travel_costs,
            precomputed_vehicle_compatibilities,
        })
    }
}
