pub mod ls;
pub mod solution;
