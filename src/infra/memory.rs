//! In-process store.
//!
//! Mirrors the Postgres schema closely enough to stand in for it: per table
//! id sequences, results ordered by id, the unique user number and the
//! issue cascade on work item removal.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::{
        datatype::{ActivityStatus, UserNameField, WorkItemStatus},
        entity::{
            organization::{Team, TeamState, User, UserState},
            tracking::{Issue, IssueState, WorkItem, WorkItemState},
            Entity, EntityCtl, Ident,
        },
        repository::{
            IssueRepository, RepoResult, TeamRepository, UserRepository, WorkItemRepository,
        },
    },
    error::persistence::PersistenceError,
};

#[derive(Debug)]
struct Table<State> {
    sequence: Ident,
    rows: BTreeMap<Ident, EntityCtl<State>>,
}

impl<State: Clone> Table<State> {
    fn insert(&mut self, state: State) -> EntityCtl<State> {
        self.sequence += 1;
        let entity = EntityCtl::restore(self.sequence, state);
        self.rows.insert(self.sequence, entity.clone());
        entity
    }

    fn update(&mut self, entity: &EntityCtl<State>) -> RepoResult<()> {
        match self.rows.get_mut(&entity.ident()) {
            Some(row) => {
                *row = entity.clone();
                Ok(())
            }
            None => Err(PersistenceError::NotFound),
        }
    }

    fn get(&self, id: Ident) -> Option<EntityCtl<State>> {
        self.rows.get(&id).cloned()
    }

    fn select<P>(&self, predicate: P) -> Vec<EntityCtl<State>>
    where
        P: Fn(&State) -> bool,
    {
        self.rows
            .values()
            .filter(|row| predicate(row.state()))
            .cloned()
            .collect()
    }

    fn any<P>(&self, predicate: P) -> bool
    where
        P: Fn(&State) -> bool,
    {
        self.rows.values().any(|row| predicate(row.state()))
    }

    fn count<P>(&self, predicate: P) -> i64
    where
        P: Fn(&State) -> bool,
    {
        self.rows.values().filter(|row| predicate(row.state())).count() as i64
    }
}

impl<State> Default for Table<State> {
    fn default() -> Self {
        Self {
            sequence: 0,
            rows: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Table<UserState>,
    teams: Table<TeamState>,
    work_items: Table<WorkItemState>,
    issues: Table<IssueState>,
}

impl Tables {
    fn user_number_taken(&self, user_number: &str, except: Option<Ident>) -> bool {
        self.users
            .rows
            .values()
            .any(|user| user.user_number() == user_number && Some(user.ident()) != except)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn user_exists(&self, id: Ident) -> RepoResult<bool> {
        Ok(self.tables.read().await.users.rows.contains_key(&id))
    }

    async fn find_user(&self, id: Ident) -> RepoResult<Option<User>> {
        Ok(self.tables.read().await.users.get(id))
    }

    async fn find_user_status(&self, id: Ident) -> RepoResult<Option<ActivityStatus>> {
        Ok(self.tables.read().await.users.get(id).map(|user| user.status()))
    }

    async fn find_user_team(&self, id: Ident) -> RepoResult<Option<Ident>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .get(id)
            .and_then(|user| user.team_id()))
    }

    async fn find_users_by_number(&self, user_number: &str) -> RepoResult<Vec<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .select(|user| user.user_number == user_number))
    }

    async fn find_users_by_any_name(&self, value: &str) -> RepoResult<Vec<User>> {
        Ok(self.tables.read().await.users.select(|user| {
            user.first_name == value || user.last_name == value || user.user_name == value
        }))
    }

    async fn find_users_by_name(&self, field: UserNameField, value: &str) -> RepoResult<Vec<User>> {
        Ok(self.tables.read().await.users.select(|user| match field {
            UserNameField::FirstName => user.first_name == value,
            UserNameField::LastName => user.last_name == value,
            UserNameField::UserName => user.user_name == value,
        }))
    }

    async fn find_users_by_team(&self, team_id: Ident) -> RepoResult<Vec<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .select(|user| user.team_id == Some(team_id)))
    }

    async fn team_has_users(&self, team_id: Ident) -> RepoResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .any(|user| user.team_id == Some(team_id)))
    }

    async fn insert_user(&self, user: UserState) -> RepoResult<User> {
        let mut tables = self.tables.write().await;
        if tables.user_number_taken(&user.user_number, None) {
            return Err(PersistenceError::unique_violation());
        }
        Ok(tables.users.insert(user))
    }

    async fn save_user(&self, user: &User) -> RepoResult<()> {
        let mut tables = self.tables.write().await;
        if tables.user_number_taken(user.user_number(), Some(user.ident())) {
            return Err(PersistenceError::unique_violation());
        }
        tables.users.update(user)
    }
}

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn team_exists(&self, id: Ident) -> RepoResult<bool> {
        Ok(self.tables.read().await.teams.rows.contains_key(&id))
    }

    async fn find_team(&self, id: Ident) -> RepoResult<Option<Team>> {
        Ok(self.tables.read().await.teams.get(id))
    }

    async fn find_team_status(&self, id: Ident) -> RepoResult<Option<ActivityStatus>> {
        Ok(self.tables.read().await.teams.get(id).map(|team| team.status()))
    }

    async fn find_all_teams(&self) -> RepoResult<Vec<Team>> {
        Ok(self.tables.read().await.teams.select(|_| true))
    }

    async fn count_team_members(&self, id: Ident) -> RepoResult<i64> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .count(|user| user.team_id == Some(id)))
    }

    async fn insert_team(&self, team: TeamState) -> RepoResult<Team> {
        Ok(self.tables.write().await.teams.insert(team))
    }

    async fn save_team(&self, team: &Team) -> RepoResult<()> {
        self.tables.write().await.teams.update(team)
    }
}

#[async_trait]
impl WorkItemRepository for MemoryStore {
    async fn work_item_exists(&self, id: Ident) -> RepoResult<bool> {
        Ok(self.tables.read().await.work_items.rows.contains_key(&id))
    }

    async fn find_work_item(&self, id: Ident) -> RepoResult<Option<WorkItem>> {
        Ok(self.tables.read().await.work_items.get(id))
    }

    async fn find_work_item_status(&self, id: Ident) -> RepoResult<Option<WorkItemStatus>> {
        Ok(self
            .tables
            .read()
            .await
            .work_items
            .get(id)
            .map(|item| item.status()))
    }

    async fn find_work_items_by_status(&self, status: WorkItemStatus) -> RepoResult<Vec<WorkItem>> {
        Ok(self
            .tables
            .read()
            .await
            .work_items
            .select(|item| item.status == status))
    }

    async fn find_work_items_by_team(&self, team_id: Ident) -> RepoResult<Vec<WorkItem>> {
        Ok(self
            .tables
            .read()
            .await
            .work_items
            .select(|item| item.team_id == Some(team_id)))
    }

    async fn find_work_items_by_user(&self, user_id: Ident) -> RepoResult<Vec<WorkItem>> {
        Ok(self
            .tables
            .read()
            .await
            .work_items
            .select(|item| item.user_id == Some(user_id)))
    }

    async fn search_work_items(&self, text: &str) -> RepoResult<Vec<WorkItem>> {
        let needle = text.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .work_items
            .select(|item| item.description.to_lowercase().contains(&needle)))
    }

    async fn find_work_items_with_issue(&self) -> RepoResult<Vec<WorkItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .work_items
            .select(|_| true)
            .into_iter()
            .filter(|item| {
                let id = item.ident();
                tables.issues.any(|issue| issue.work_item_id == Some(id))
            })
            .collect())
    }

    async fn count_work_items_by_user(&self, user_id: Ident) -> RepoResult<i64> {
        Ok(self
            .tables
            .read()
            .await
            .work_items
            .count(|item| item.user_id == Some(user_id)))
    }

    async fn any_work_item_with_team(&self) -> RepoResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .work_items
            .any(|item| item.team_id.is_some()))
    }

    async fn any_work_item_with_user(&self) -> RepoResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .work_items
            .any(|item| item.user_id.is_some()))
    }

    async fn insert_work_item(&self, item: WorkItemState) -> RepoResult<WorkItem> {
        Ok(self.tables.write().await.work_items.insert(item))
    }

    async fn save_work_item(&self, item: &WorkItem) -> RepoResult<()> {
        self.tables.write().await.work_items.update(item)
    }

    async fn delete_work_item(&self, id: Ident) -> RepoResult<()> {
        let mut tables = self.tables.write().await;
        tables.work_items.rows.remove(&id);
        tables
            .issues
            .rows
            .retain(|_, issue| issue.work_item_id() != Some(id));
        Ok(())
    }
}

#[async_trait]
impl IssueRepository for MemoryStore {
    async fn issue_exists(&self, id: Ident) -> RepoResult<bool> {
        Ok(self.tables.read().await.issues.rows.contains_key(&id))
    }

    async fn find_issue(&self, id: Ident) -> RepoResult<Option<Issue>> {
        Ok(self.tables.read().await.issues.get(id))
    }

    async fn any_issue_with_work_item(&self) -> RepoResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .issues
            .any(|issue| issue.work_item_id.is_some()))
    }

    async fn insert_issue(&self, issue: IssueState) -> RepoResult<Issue> {
        let mut tables = self.tables.write().await;
        match issue.work_item_id {
            Some(id) if tables.work_items.rows.contains_key(&id) => Ok(tables.issues.insert(issue)),
            // foreign key violation
            _ => Err(PersistenceError::Database(Some("23503".into()))),
        }
    }

    async fn save_issue(&self, issue: &Issue) -> RepoResult<()> {
        self.tables.write().await.issues.update(issue)
    }
}
