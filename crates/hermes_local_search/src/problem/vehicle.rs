use fxhash::FxHashSet;
use serde::Serialize;

use crate::{
    define_index_newtype,
    problem::{amount::Amount, job::Job, location::LocationIdx, skill::Skill},
};

define_index_newtype!(VehicleIdx, Vehicle);

/// A vehicle and the depots anchoring its route.
///
/// A missing start (resp. end) location makes the route open at that side:
/// no edge is paid to leave from (resp. return to) a depot.
#[derive(Serialize, Debug, Clone)]
pub struct Vehicle {
    external_id: String,
    capacity: Amount,
    skills: FxHashSet<Skill>,
    start_location_id: Option<LocationIdx>,
    end_location_id: Option<LocationIdx>,
}

impl Vehicle {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn capacity(&self) -> &Amount {
        &self.capacity
    }

    pub fn skills(&self) -> &FxHashSet<Skill> {
        &self.skills
    }

    pub fn start_location_id(&self) -> Option<LocationIdx> {
        self.start_location_id
    }

    pub fn end_location_id(&self) -> Option<LocationIdx> {
        self.end_location_id
    }

    pub fn has_start(&self) -> bool {
        self.start_location_id.is_some()
    }

    pub fn has_end(&self) -> bool {
        self.end_location_id.is_some()
    }

    /// A vehicle can serve a job when it possesses every skill the job requires.
    pub fn is_compatible_with(&self, job: &Job) -> bool {
        job.skills().is_subset(&self.skills)
    }
}

#[derive(Default)]
pub struct VehicleBuilder {
    external_id: Option<String>,
    capacity: Option<Amount>,
    skills: Option<Vec<Skill>>,
    start_location_id: Option<usize>,
    end_location_id: Option<usize>,
}

impl VehicleBuilder {
    pub fn set_vehicle_id(&mut self, external_id: impl Into<String>) -> &mut VehicleBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_capacity(&mut self, capacity: Amount) -> &mut VehicleBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn set_skills<S: Into<Skill>>(&mut self, skills: Vec<S>) -> &mut VehicleBuilder {
        self.skills = Some(skills.into_iter().map(Into::into).collect());
        self
    }

    pub fn set_start_location_id(&mut self, location_id: usize) -> &mut VehicleBuilder {
        self.start_location_id = Some(location_id);
        self
    }

    pub fn set_end_location_id(&mut self, location_id: usize) -> &mut VehicleBuilder {
        self.end_location_id = Some(location_id);
        self
    }

    /// Start and end at the same depot.
    pub fn set_depot_location_id(&mut self, location_id: usize) -> &mut VehicleBuilder {
        self.set_start_location_id(location_id)
            .set_end_location_id(location_id)
    }

    pub fn build(self) -> Vehicle {
        Vehicle {
            external_id: self.external_id.expect("External ID is required"),
            capacity: self.capacity.unwrap_or(Amount::EMPTY),
            skills: FxHashSet::from_iter(self.skills.unwrap_or_default()),
            start_location_id: self.start_location_id.map(LocationIdx::new),
            end_location_id: self.end_location_id.map(LocationIdx::new),
        }
    }
}
