use crate::problem::{
    amount::Amount,
    job::{Job, JobBuilder},
    travel_cost_matrix::TravelCostMatrix,
    vehicle::{Vehicle, VehicleBuilder},
    vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
};

pub fn create_matrix_from_fn(size: usize, cost: impl Fn(usize, usize) -> f64) -> TravelCostMatrix {
    let costs = (0..size)
        .map(|from| (0..size).map(|to| cost(from, to)).collect())
        .collect();

    TravelCostMatrix::new(costs).unwrap()
}

/// Locations on a line: `cost(a, b) = |a - b|`.
pub fn create_line_matrix(size: usize) -> TravelCostMatrix {
    create_matrix_from_fn(size, |from, to| from.abs_diff(to) as f64)
}

pub fn create_basic_jobs(location_ids: Vec<usize>) -> Vec<Job> {
    location_ids
        .iter()
        .enumerate()
        .map(|(index, &location_id)| {
            let mut builder = JobBuilder::default();
            builder.set_location_id(location_id);
            builder.set_external_id(index.to_string());
            builder.build()
        })
        .collect()
}

pub fn create_jobs_with_amounts(jobs: Vec<(usize, f64)>) -> Vec<Job> {
    create_jobs(
        jobs.into_iter()
            .map(|(location_id, amount)| (location_id, amount, vec![]))
            .collect(),
    )
}

pub fn create_jobs_with_skills(jobs: Vec<(usize, Vec<&str>)>) -> Vec<Job> {
    jobs.into_iter()
        .enumerate()
        .map(|(index, (location_id, skills))| {
            let mut builder = JobBuilder::default();
            builder.set_location_id(location_id);
            builder.set_external_id(index.to_string());
            builder.set_skills(skills);
            builder.build()
        })
        .collect()
}

/// `(location, single-dimension amount, skills)`
pub fn create_jobs(jobs: Vec<(usize, f64, Vec<&str>)>) -> Vec<Job> {
    jobs.into_iter()
        .enumerate()
        .map(|(index, (location_id, amount, skills))| {
            let mut builder = JobBuilder::default();
            builder.set_location_id(location_id);
            builder.set_external_id(index.to_string());
            builder.set_amount(Amount::from_vec(vec![amount]));
            builder.set_skills(skills);
            builder.build()
        })
        .collect()
}

/// Vehicles without start nor end.
pub fn create_open_vehicles(count: usize) -> Vec<Vehicle> {
    (0..count)
        .map(|index| {
            let mut builder = VehicleBuilder::default();
            builder.set_vehicle_id(index.to_string());
            builder.build()
        })
        .collect()
}

/// Vehicles starting and ending at the given depots.
pub fn create_depot_vehicles(location_ids: Vec<usize>) -> Vec<Vehicle> {
    location_ids
        .iter()
        .enumerate()
        .map(|(index, &location_id)| {
            let mut builder = VehicleBuilder::default();
            builder.set_depot_location_id(location_id);
            builder.set_vehicle_id(index.to_string());
            builder.build()
        })
        .collect()
}

pub fn create_vehicles_with_capacity(capacities: Vec<f64>) -> Vec<Vehicle> {
    create_vehicles(
        capacities
            .into_iter()
            .map(|capacity| (capacity, vec![]))
            .collect(),
    )
}

pub fn create_vehicles_with_skills(skills: Vec<Vec<&str>>) -> Vec<Vehicle> {
    skills
        .into_iter()
        .enumerate()
        .map(|(index, skills)| {
            let mut builder = VehicleBuilder::default();
            builder.set_vehicle_id(index.to_string());
            builder.set_skills(skills);
            builder.build()
        })
        .collect()
}

/// Open vehicles with `(single-dimension capacity, skills)`.
pub fn create_vehicles(vehicles: Vec<(f64, Vec<&str>)>) -> Vec<Vehicle> {
    vehicles
        .into_iter()
        .enumerate()
        .map(|(index, (capacity, skills))| {
            let mut builder = VehicleBuilder::default();
            builder.set_vehicle_id(index.to_string());
            builder.set_capacity(Amount::from_vec(vec![capacity]));
            builder.set_skills(skills);
            builder.build()
        })
        .collect()
}

pub fn create_test_problem(
    travel_costs: TravelCostMatrix,
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
) -> VehicleRoutingProblem {
    let mut builder = VehicleRoutingProblemBuilder::default();

    builder.set_travel_costs(travel_costs);
    builder.set_jobs(jobs);
    builder.set_vehicles(vehicles);

    builder.build().unwrap()
}
