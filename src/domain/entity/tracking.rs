use crate::domain::datatype::WorkItemStatus;

use super::{state_copy, state_ref, EntityCtl, Ident};

/// Maximum number of work items assigned to a single user.
pub const USER_WORK_ITEM_LIMIT: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemState {
    pub title: String,
    pub description: String,
    pub status: WorkItemStatus,
    pub user_id: Option<Ident>,
    pub team_id: Option<Ident>,
}

pub type WorkItem = EntityCtl<WorkItemState>;

impl WorkItem {
    state_ref!(title, String);
    state_ref!(description, String);
    state_copy!(status, WorkItemStatus);
    state_copy!(user_id, Option<Ident>);
    state_copy!(team_id, Option<Ident>);

    pub fn set_status(&mut self, status: WorkItemStatus) {
        self.state.status = status;
    }

    /// Hands the item to a user, moving it to the user's team.
    pub fn assign(&mut self, user_id: Ident, team_id: Option<Ident>) {
        self.state.user_id = Some(user_id);
        self.state.team_id = team_id;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueState {
    pub title: String,
    pub reason: String,
    pub answer: Option<String>,
    pub work_item_id: Option<Ident>,
}

pub type Issue = EntityCtl<IssueState>;

impl Issue {
    state_ref!(title, String);
    state_ref!(reason, String);
    state_ref!(answer, Option<String>);
    state_copy!(work_item_id, Option<Ident>);

    pub fn resolve(&mut self, answer: String, reason: String) {
        self.state.answer = Some(answer);
        self.state.reason = reason;
    }
}
