pub mod route;
pub mod solution_state;
pub mod working_solution;
