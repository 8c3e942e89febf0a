use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::{normalize, UnknownVariant};

/// Status of users and teams.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ActivityStatus {
    #[default]
    #[display(fmt = "Active")]
    Active,
    #[display(fmt = "Inactive")]
    Inactive,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "Active",
            ActivityStatus::Inactive => "Inactive",
        }
    }
}

impl FromStr for ActivityStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(UnknownVariant::new("status", s)),
        }
    }
}

impl TryFrom<String> for ActivityStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ActivityStatus> for &'static str {
    fn from(status: ActivityStatus) -> Self {
        status.as_str()
    }
}

/// Lifecycle of a work item.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum WorkItemStatus {
    #[default]
    #[display(fmt = "UNSTARTED")]
    Unstarted,
    #[display(fmt = "STARTED")]
    Started,
    #[display(fmt = "DONE")]
    Done,
}

impl WorkItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkItemStatus::Unstarted => "UNSTARTED",
            WorkItemStatus::Started => "STARTED",
            WorkItemStatus::Done => "DONE",
        }
    }
}

impl FromStr for WorkItemStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "unstarted" => Ok(Self::Unstarted),
            "started" => Ok(Self::Started),
            "done" => Ok(Self::Done),
            _ => Err(UnknownVariant::new("work item status", s)),
        }
    }
}

impl TryFrom<String> for WorkItemStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WorkItemStatus> for &'static str {
    fn from(status: WorkItemStatus) -> Self {
        status.as_str()
    }
}
