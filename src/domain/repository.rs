//! Persistence contracts.
//!
//! Read operations back the use case guards and listings, write operations are
//! only reached through `app::service`.

use async_trait::async_trait;

use super::{
    datatype::{ActivityStatus, UserNameField, WorkItemStatus},
    entity::{
        organization::{Team, TeamState, User, UserState},
        tracking::{Issue, IssueState, WorkItem, WorkItemState},
        Ident,
    },
};
use crate::error::persistence::PersistenceError;

pub type RepoResult<T> = Result<T, PersistenceError>;

#[async_trait]
pub trait UserRepository {
    async fn user_exists(&self, id: Ident) -> RepoResult<bool>;
    async fn find_user(&self, id: Ident) -> RepoResult<Option<User>>;
    async fn find_user_status(&self, id: Ident) -> RepoResult<Option<ActivityStatus>>;
    /// Team of the user, `None` when the user is missing or teamless.
    async fn find_user_team(&self, id: Ident) -> RepoResult<Option<Ident>>;
    async fn find_users_by_number(&self, user_number: &str) -> RepoResult<Vec<User>>;
    /// Users whose first name, last name or user name equals `value`.
    async fn find_users_by_any_name(&self, value: &str) -> RepoResult<Vec<User>>;
    async fn find_users_by_name(&self, field: UserNameField, value: &str) -> RepoResult<Vec<User>>;
    async fn find_users_by_team(&self, team_id: Ident) -> RepoResult<Vec<User>>;
    /// Whether `team_id` is the team of at least one user.
    async fn team_has_users(&self, team_id: Ident) -> RepoResult<bool>;
    async fn insert_user(&self, user: UserState) -> RepoResult<User>;
    async fn save_user(&self, user: &User) -> RepoResult<()>;
}

#[async_trait]
pub trait TeamRepository {
    async fn team_exists(&self, id: Ident) -> RepoResult<bool>;
    async fn find_team(&self, id: Ident) -> RepoResult<Option<Team>>;
    async fn find_team_status(&self, id: Ident) -> RepoResult<Option<ActivityStatus>>;
    async fn find_all_teams(&self) -> RepoResult<Vec<Team>>;
    async fn count_team_members(&self, id: Ident) -> RepoResult<i64>;
    async fn insert_team(&self, team: TeamState) -> RepoResult<Team>;
    async fn save_team(&self, team: &Team) -> RepoResult<()>;
}

#[async_trait]
pub trait WorkItemRepository {
    async fn work_item_exists(&self, id: Ident) -> RepoResult<bool>;
    async fn find_work_item(&self, id: Ident) -> RepoResult<Option<WorkItem>>;
    async fn find_work_item_status(&self, id: Ident) -> RepoResult<Option<WorkItemStatus>>;
    async fn find_work_items_by_status(&self, status: WorkItemStatus) -> RepoResult<Vec<WorkItem>>;
    async fn find_work_items_by_team(&self, team_id: Ident) -> RepoResult<Vec<WorkItem>>;
    async fn find_work_items_by_user(&self, user_id: Ident) -> RepoResult<Vec<WorkItem>>;
    /// Items whose description contains `text`, ignoring case.
    async fn search_work_items(&self, text: &str) -> RepoResult<Vec<WorkItem>>;
    /// Items that at least one issue was raised against.
    async fn find_work_items_with_issue(&self) -> RepoResult<Vec<WorkItem>>;
    async fn count_work_items_by_user(&self, user_id: Ident) -> RepoResult<i64>;
    async fn any_work_item_with_team(&self) -> RepoResult<bool>;
    async fn any_work_item_with_user(&self) -> RepoResult<bool>;
    async fn insert_work_item(&self, item: WorkItemState) -> RepoResult<WorkItem>;
    async fn save_work_item(&self, item: &WorkItem) -> RepoResult<()>;
    /// Deletes the item together with every issue raised against it.
    async fn delete_work_item(&self, id: Ident) -> RepoResult<()>;
}

#[async_trait]
pub trait IssueRepository {
    async fn issue_exists(&self, id: Ident) -> RepoResult<bool>;
    async fn find_issue(&self, id: Ident) -> RepoResult<Option<Issue>>;
    async fn any_issue_with_work_item(&self) -> RepoResult<bool>;
    async fn insert_issue(&self, issue: IssueState) -> RepoResult<Issue>;
    async fn save_issue(&self, issue: &Issue) -> RepoResult<()>;
}

/// Every repository the application needs, behind one handle.
pub trait Store:
    UserRepository + TeamRepository + WorkItemRepository + IssueRepository + Send + Sync + 'static
{
}

impl<T> Store for T where
    T: UserRepository + TeamRepository + WorkItemRepository + IssueRepository + Send + Sync + 'static
{
}
