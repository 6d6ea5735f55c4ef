use fxhash::FxHashSet;
use serde::Serialize;

use crate::{
    define_index_newtype,
    problem::{amount::Amount, location::LocationIdx, skill::Skill},
};

define_index_newtype!(JobIdx, Job);

/// A unit of demand to be served at a single location.
#[derive(Serialize, Debug, Clone)]
pub struct Job {
    external_id: String,
    location_id: LocationIdx,
    amount: Amount,
    skills: FxHashSet<Skill>,
}

impl Job {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn location_id(&self) -> LocationIdx {
        self.location_id
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    /// Skills a vehicle must possess to serve this job.
    pub fn skills(&self) -> &FxHashSet<Skill> {
        &self.skills
    }
}

#[derive(Default)]
pub struct JobBuilder {
    external_id: Option<String>,
    location_id: Option<usize>,
    amount: Option<Amount>,
    skills: Option<Vec<Skill>>,
}

impl JobBuilder {
    pub fn set_external_id(&mut self, external_id: impl Into<String>) -> &mut JobBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_location_id(&mut self, location_id: usize) -> &mut JobBuilder {
        self.location_id = Some(location_id);
        self
    }

    pub fn set_amount(&mut self, amount: Amount) -> &mut JobBuilder {
        self.amount = Some(amount);
        self
    }

    pub fn set_skills<S: Into<Skill>>(&mut self, skills: Vec<S>) -> &mut JobBuilder {
        self.skills = Some(skills.into_iter().map(Into::into).collect());
        self
    }

    /// Panics when the location is missing: a job without a location cannot
    /// be routed.
    pub fn build(self) -> Job {
        let location_id = self.location_id.expect("Job location ID is required");

        Job {
            external_id: self
                .external_id
                .unwrap_or_else(|| format!("job-{location_id}")),
            location_id: location_id.into(),
            amount: self.amount.unwrap_or_default(),
            skills: FxHashSet::from_iter(self.skills.unwrap_or_default()),
        }
    }
}
