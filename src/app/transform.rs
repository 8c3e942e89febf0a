//! Conversions between the wire resources and the persisted entities.
//!
//! Relations (team, assignee, work item of an issue) only live on the
//! persistence side and are left empty when coming from the wire.

use crate::{
    app::resource::{organization, tracking},
    domain::entity::{
        organization::{Team, TeamState, User, UserState},
        tracking::{Issue, IssueState, WorkItem, WorkItemState},
        Entity,
    },
};

pub mod user {
    use super::*;

    impl From<organization::User> for UserState {
        fn from(dto: organization::User) -> Self {
            Self {
                first_name: dto.first_name,
                last_name: dto.last_name,
                user_name: dto.user_name,
                password: dto.password.unwrap_or_default(),
                user_number: dto.user_number,
                status: dto.status,
                team_id: None,
            }
        }
    }

    impl From<User> for organization::User {
        fn from(user: User) -> Self {
            let id = user.ident();
            let state = user.into_state();
            Self {
                id: Some(id),
                first_name: state.first_name,
                last_name: state.last_name,
                user_name: state.user_name,
                password: Some(state.password),
                user_number: state.user_number,
                status: state.status,
            }
        }
    }
}

pub mod team {
    use super::*;

    impl From<organization::Team> for TeamState {
        fn from(dto: organization::Team) -> Self {
            Self {
                name: dto.name,
                status: dto.status,
            }
        }
    }

    impl From<Team> for organization::Team {
        fn from(team: Team) -> Self {
            let id = team.ident();
            let state = team.into_state();
            Self {
                id: Some(id),
                name: state.name,
                status: state.status,
            }
        }
    }
}

pub mod work_item {
    use super::*;

    impl From<tracking::WorkItem> for WorkItemState {
        fn from(dto: tracking::WorkItem) -> Self {
            Self {
                title: dto.title,
                description: dto.description,
                status: dto.status,
                user_id: None,
                team_id: None,
            }
        }
    }

    impl From<WorkItem> for tracking::WorkItem {
        fn from(item: WorkItem) -> Self {
            let id = item.ident();
            let state = item.into_state();
            Self {
                id: Some(id),
                title: state.title,
                description: state.description,
                status: state.status,
            }
        }
    }
}

pub mod issue {
    use super::*;

    impl From<tracking::Issue> for IssueState {
        fn from(dto: tracking::Issue) -> Self {
            Self {
                title: dto.title,
                reason: dto.reason,
                answer: dto.answer,
                work_item_id: None,
            }
        }
    }

    impl From<Issue> for tracking::Issue {
        fn from(issue: Issue) -> Self {
            let id = issue.ident();
            let state = issue.into_state();
            Self {
                id: Some(id),
                title: state.title,
                reason: state.reason,
                answer: state.answer,
            }
        }
    }
}

/// Converts every entity in order.
pub fn convert_all<E, R>(entities: Vec<E>) -> Vec<R>
where
    R: From<E>,
{
    entities.into_iter().map(R::from).collect()
}
