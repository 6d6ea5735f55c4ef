#![allow(dead_code)]

use std::sync::Arc;

use hermes_local_search::{
    problem::{
        amount::{Amount, AmountExpression},
        job::{Job, JobBuilder, JobIdx},
        travel_cost_matrix::{Cost, TravelCostMatrix},
        vehicle::{Vehicle, VehicleBuilder, VehicleIdx},
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
    solver::solution::{solution_state::SolutionState, working_solution::WorkingSolution},
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

pub const DIMENSIONS: usize = 2;
const SKILLS: [&str; 2] = ["fridge", "lift"];

/// Depot configuration of one vehicle.
#[derive(Debug, Clone, Copy)]
pub struct Depots {
    pub has_start: bool,
    pub has_end: bool,
}

/// Every `(source, target)` combination of start/end presence.
pub fn depot_combinations() -> Vec<(Depots, Depots)> {
    let all = [
        Depots { has_start: false, has_end: false },
        Depots { has_start: true, has_end: false },
        Depots { has_start: false, has_end: true },
        Depots { has_start: true, has_end: true },
    ];

    all.iter()
        .flat_map(|&source| all.iter().map(move |&target| (source, target)))
        .collect()
}

pub struct RandomInstance {
    pub problem: Arc<VehicleRoutingProblem>,
    pub routes: Vec<(VehicleIdx, Vec<JobIdx>)>,
}

impl RandomInstance {
    pub fn solution(&self) -> WorkingSolution {
        WorkingSolution::from_routes(Arc::clone(&self.problem), self.routes.clone()).unwrap()
    }
}

/// Random asymmetric instance with integer costs and amounts, so every sum
/// is exact. Each job is assigned to a vehicle able to serve it; loads may
/// exceed capacities.
pub fn create_random_instance(seed: u64, depots: &[Depots]) -> RandomInstance {
    let mut rng = SmallRng::seed_from_u64(seed);
    let num_locations = 10;

    let costs = (0..num_locations)
        .map(|from| {
            (0..num_locations)
                .map(|to| {
                    if from == to {
                        0.0
                    } else {
                        rng.random_range(1..100) as Cost
                    }
                })
                .collect()
        })
        .collect();
    let travel_costs = TravelCostMatrix::new(costs).unwrap();

    let vehicle_skills = depots
        .iter()
        .map(|_| random_skills(&mut rng, &SKILLS))
        .collect::<Vec<_>>();

    let vehicles = depots
        .iter()
        .zip(&vehicle_skills)
        .enumerate()
        .map(|(index, (depots, skills))| {
            let mut builder = VehicleBuilder::default();
            builder.set_vehicle_id(format!("vehicle-{index}"));
            builder.set_capacity(random_amount(&mut rng, 10..40));
            builder.set_skills(skills.clone());
            if depots.has_start {
                builder.set_start_location_id(rng.random_range(0..num_locations));
            }
            if depots.has_end {
                builder.set_end_location_id(rng.random_range(0..num_locations));
            }
            builder.build()
        })
        .collect::<Vec<_>>();

    let mut jobs = Vec::new();
    let mut routes = (0..vehicles.len())
        .map(|index| (VehicleIdx::new(index), Vec::new()))
        .collect::<Vec<_>>();

    for (vehicle, skills) in vehicle_skills.iter().enumerate() {
        let route_len = rng.random_range(1..=6);

        for _ in 0..route_len {
            let mut builder = JobBuilder::default();
            builder.set_external_id(format!("job-{}", jobs.len()));
            builder.set_location_id(rng.random_range(0..num_locations));
            builder.set_amount(random_amount(&mut rng, 0..10));
            builder.set_skills(random_skills(&mut rng, skills.as_slice()));

            routes[vehicle].1.push(JobIdx::new(jobs.len()));
            jobs.push(builder.build());
        }
    }

    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .set_travel_costs(travel_costs)
        .set_jobs(jobs)
        .set_vehicles(vehicles);

    RandomInstance {
        problem: Arc::new(builder.build().unwrap()),
        routes,
    }
}

fn random_amount(rng: &mut SmallRng, range: std::ops::Range<u32>) -> Amount {
    Amount::from_vec(
        (0..DIMENSIONS)
            .map(|_| rng.random_range(range.clone()) as f64)
            .collect(),
    )
}

fn random_skills(rng: &mut SmallRng, pool: &[impl AsRef<str>]) -> Vec<String> {
    pool.iter()
        .filter(|_| rng.random_bool(0.5))
        .map(|skill| skill.as_ref().to_owned())
        .collect()
}

/// Walks the route, including depot edges. An empty route costs nothing.
pub fn brute_force_route_cost(
    problem: &VehicleRoutingProblem,
    vehicle_id: VehicleIdx,
    job_ids: &[JobIdx],
) -> Cost {
    if job_ids.is_empty() {
        return 0.0;
    }

    let vehicle = problem.vehicle(vehicle_id);
    let locations = vehicle
        .start_location_id()
        .into_iter()
        .chain(job_ids.iter().map(|&job_id| problem.job_location_id(job_id)))
        .chain(vehicle.end_location_id())
        .collect::<Vec<_>>();

    locations
        .windows(2)
        .map(|pair| problem.travel_cost(pair[0], pair[1]))
        .sum()
}

/// Cost of the jobs only, in route order, without depot edges.
pub fn brute_force_internal_cost(problem: &VehicleRoutingProblem, job_ids: &[JobIdx]) -> Cost {
    job_ids
        .windows(2)
        .map(|pair| {
            problem.travel_cost(
                problem.job_location_id(pair[0]),
                problem.job_location_id(pair[1]),
            )
        })
        .sum()
}

pub fn brute_force_demand(problem: &VehicleRoutingProblem, job_ids: &[JobIdx]) -> Vec<f64> {
    let mut demand = vec![0.0; DIMENSIONS];
    for &job_id in job_ids {
        for (dimension, value) in demand.iter_mut().enumerate() {
            *value += problem.job(job_id).amount().get(dimension);
        }
    }
    demand
}

pub fn brute_force_is_feasible(
    problem: &VehicleRoutingProblem,
    vehicle_id: VehicleIdx,
    job_ids: &[JobIdx],
) -> bool {
    let vehicle = problem.vehicle(vehicle_id);
    let fits = brute_force_demand(problem, job_ids)
        .iter()
        .enumerate()
        .all(|(dimension, &demand)| demand <= vehicle.capacity().get(dimension));

    fits && job_ids
        .iter()
        .all(|&job_id| is_served_by(problem.job(job_id), vehicle))
}

fn is_served_by(job: &Job, vehicle: &Vehicle) -> bool {
    job.skills().iter().all(|skill| vehicle.skills().contains(skill))
}

pub fn amount_to_vec(amount: &Amount) -> Vec<f64> {
    (0..DIMENSIONS).map(|dimension| amount.get(dimension)).collect()
}

/// Checks every cached entry of `state` against a brute-force walk of the
/// routes of `solution`.
pub fn assert_state_matches_routes(solution: &WorkingSolution, state: &SolutionState) {
    let problem = solution.problem();

    for route in solution.routes() {
        let vehicle_id = route.vehicle_id();
        let job_ids = route.job_ids();
        assert!(!state.is_stale(solution, vehicle_id));

        for rank in 0..job_ids.len() {
            let prefix = &job_ids[..=rank];
            let reversed = prefix.iter().rev().copied().collect::<Vec<_>>();

            assert_eq!(
                state.fwd_cost(vehicle_id, rank),
                brute_force_internal_cost(problem, prefix),
                "fwd_cost({vehicle_id}, {rank})"
            );
            assert_eq!(
                state.bwd_cost(vehicle_id, rank),
                brute_force_internal_cost(problem, &reversed),
                "bwd_cost({vehicle_id}, {rank})"
            );
            assert_eq!(
                amount_to_vec(state.fwd_amount(vehicle_id, rank)),
                brute_force_demand(problem, prefix),
                "fwd_amount({vehicle_id}, {rank})"
            );
            assert_eq!(
                amount_to_vec(state.bwd_amount(vehicle_id, rank)),
                brute_force_demand(problem, &job_ids[rank + 1..]),
                "bwd_amount({vehicle_id}, {rank})"
            );
        }

        for serving in 0..problem.vehicles().len() {
            let serving_id = VehicleIdx::new(serving);
            let serving_vehicle = problem.vehicle(serving_id);
            let servable =
                |job_id: &JobIdx| is_served_by(problem.job(*job_id), serving_vehicle);

            let expected_prefix = job_ids.iter().take_while(|job_id| servable(*job_id)).count();
            let expected_suffix = (0..=job_ids.len())
                .find(|&rank| job_ids[rank..].iter().all(|job_id| servable(job_id)))
                .unwrap();

            assert_eq!(
                state.skill_rank_prefix(vehicle_id, serving_id),
                expected_prefix,
                "skill_rank_prefix({vehicle_id}, {serving_id})"
            );
            assert_eq!(
                state.skill_rank_suffix(vehicle_id, serving_id),
                expected_suffix,
                "skill_rank_suffix({vehicle_id}, {serving_id})"
            );
        }
    }
}
