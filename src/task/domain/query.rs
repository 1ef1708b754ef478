//! Task listing queries: caller visibility plus filter and exclude sets.

use super::{GenderLimit, Task, TaskState};
use crate::identity::domain::{Actor, BenefactorId, CharityId};
use uuid::Uuid;

/// Single condition evaluated against a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPredicate {
    /// Title contains the needle, ignoring case.
    TitleContains(String),
    /// Description contains the needle, ignoring case.
    DescriptionContains(String),
    /// Gender limit equals the value.
    GenderLimitIs(GenderLimit),
    /// Task is owned by the charity.
    CharityIs(CharityId),
    /// Task is in the state.
    StateIs(TaskState),
    /// Lower age limit is set and above the age.
    MinimumAgeAbove(u16),
    /// Upper age limit is set and below the age.
    MaximumAgeBelow(u16),
}

impl TaskPredicate {
    /// Returns whether the task satisfies this predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let details = task.details();
        match self {
            Self::TitleContains(needle) => contains_ignore_case(details.title().as_str(), needle),
            Self::DescriptionContains(needle) => details
                .description()
                .is_some_and(|description| contains_ignore_case(description, needle)),
            Self::GenderLimitIs(limit) => details.gender_limit() == Some(*limit),
            Self::CharityIs(charity_id) => task.charity_id() == *charity_id,
            Self::StateIs(state) => task.state() == *state,
            Self::MinimumAgeAbove(age) => details.age_limits().lower().is_some_and(|l| l > *age),
            Self::MaximumAgeBelow(age) => details.age_limits().upper().is_some_and(|u| u < *age),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Collapses repeated keys onto their last value, in first-seen key order.
fn last_value_per_key<'a, I>(params: I) -> Vec<(&'a str, &'a str)>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut latest: Vec<(&'a str, &'a str)> = Vec::new();
    for (key, raw) in params {
        if let Some((_, value)) = latest.iter_mut().find(|(seen, _)| *seen == key) {
            *value = raw;
            continue;
        }
        latest.push((key, raw));
    }
    latest
}

/// Inclusion and exclusion predicates narrowing a task listing.
///
/// A task is kept when it matches every filter and no exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskQuery {
    filters: Vec<TaskPredicate>,
    excludes: Vec<TaskPredicate>,
}

impl TaskQuery {
    /// Creates a query that keeps every visible task.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filters: Vec::new(),
            excludes: Vec::new(),
        }
    }

    /// Builds a query from request parameters.
    ///
    /// Recognised filter keys are `title`, `description`, `gender`,
    /// `charity` and `state`; `age` excludes tasks whose age limits do not
    /// admit that age. A repeated key keeps only its last value. Unknown
    /// keys, empty values, and values that fail to parse are ignored.
    #[must_use]
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut query = Self::new();
        for (key, raw) in last_value_per_key(params) {
            let value = raw.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "title" => query.filters.push(TaskPredicate::TitleContains(value.to_owned())),
                "description" => query
                    .filters
                    .push(TaskPredicate::DescriptionContains(value.to_owned())),
                "gender" => {
                    if let Ok(limit) = GenderLimit::try_from(value) {
                        query.filters.push(TaskPredicate::GenderLimitIs(limit));
                    }
                }
                "charity" => {
                    if let Ok(uuid) = Uuid::parse_str(value) {
                        query
                            .filters
                            .push(TaskPredicate::CharityIs(CharityId::from_uuid(uuid)));
                    }
                }
                "state" => {
                    if let Ok(state) = TaskState::try_from(value) {
                        query.filters.push(TaskPredicate::StateIs(state));
                    }
                }
                "age" => {
                    if let Ok(age) = value.parse::<u16>() {
                        query.excludes.push(TaskPredicate::MinimumAgeAbove(age));
                        query.excludes.push(TaskPredicate::MaximumAgeBelow(age));
                    }
                }
                _ => {}
            }
        }
        query
    }

    /// Adds an inclusion predicate.
    #[must_use]
    pub fn with_filter(mut self, predicate: TaskPredicate) -> Self {
        self.filters.push(predicate);
        self
    }

    /// Adds an exclusion predicate.
    #[must_use]
    pub fn with_exclude(mut self, predicate: TaskPredicate) -> Self {
        self.excludes.push(predicate);
        self
    }

    /// Returns the inclusion predicates.
    #[must_use]
    pub fn filters(&self) -> &[TaskPredicate] {
        &self.filters
    }

    /// Returns the exclusion predicates.
    #[must_use]
    pub fn excludes(&self) -> &[TaskPredicate] {
        &self.excludes
    }

    /// Returns whether the task survives this query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|predicate| predicate.matches(task))
            && !self.excludes.iter().any(|predicate| predicate.matches(task))
    }
}

/// Set of tasks a caller may see.
///
/// Everyone sees pending tasks. Charity owners also see every task of their
/// charity, and benefactors every task they hold or have completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskVisibility {
    charity_id: Option<CharityId>,
    benefactor_id: Option<BenefactorId>,
}

impl TaskVisibility {
    /// Visibility of a caller holding no role profiles.
    #[must_use]
    pub const fn public() -> Self {
        Self {
            charity_id: None,
            benefactor_id: None,
        }
    }

    /// Visibility derived from the caller's role profiles.
    #[must_use]
    pub const fn for_actor(actor: &Actor) -> Self {
        Self {
            charity_id: actor.charity_id(),
            benefactor_id: actor.benefactor_id(),
        }
    }

    /// Returns the charity whose tasks are visible.
    #[must_use]
    pub const fn charity_id(&self) -> Option<CharityId> {
        self.charity_id
    }

    /// Returns the benefactor whose tasks are visible.
    #[must_use]
    pub const fn benefactor_id(&self) -> Option<BenefactorId> {
        self.benefactor_id
    }

    /// Returns whether the task is visible.
    #[must_use]
    pub fn permits(&self, task: &Task) -> bool {
        if task.state() == TaskState::Pending {
            return true;
        }
        if self.charity_id == Some(task.charity_id()) {
            return true;
        }
        self.benefactor_id.is_some_and(|benefactor| {
            task.assigned_benefactor() == Some(benefactor)
                || task.completed_by() == Some(benefactor)
        })
    }
}
