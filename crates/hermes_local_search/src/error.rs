use thiserror::Error;

use crate::problem::{job::JobIdx, location::LocationIdx, vehicle::VehicleIdx};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("Travel cost matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("Invalid travel cost {cost} from {from} to {to}")]
    InvalidCost {
        from: LocationIdx,
        to: LocationIdx,
        cost: f64,
    },
    #[error("Job {job} references location {location}, but the matrix has {num_locations}")]
    JobLocationOutOfBounds {
        job: JobIdx,
        location: LocationIdx,
        num_locations: usize,
    },
    #[error("Vehicle {vehicle} references location {location}, but the matrix has {num_locations}")]
    VehicleLocationOutOfBounds {
        vehicle: VehicleIdx,
        location: LocationIdx,
        num_locations: usize,
    },
    #[error("At least one vehicle is required")]
    EmptyFleet,
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolutionError {
    #[error("Unknown vehicle {0}")]
    UnknownVehicle(VehicleIdx),
    #[error("Vehicle {0} has more than one route")]
    DuplicateRoute(VehicleIdx),
    #[error("Unknown job {0}")]
    UnknownJob(JobIdx),
    #[error("Job {job} is assigned to both vehicle {first} and vehicle {second}")]
    JobAssignedTwice {
        job: JobIdx,
        first: VehicleIdx,
        second: VehicleIdx,
    },
}
