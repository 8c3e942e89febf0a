//! Mutations and queries behind the use cases.
//!
//! Nothing here validates input: callers run their guards first. A referenced
//! entity that vanished in between surfaces as `PersistenceError::NotFound`.

use crate::{
    app::AppContext,
    error::{app::ApplicationError, persistence::PersistenceError, UnknownError},
};

type ServiceResult<T> = Result<T, ApplicationError>;

fn require<T>(entity: Option<T>) -> Result<T, PersistenceError> {
    entity.ok_or(PersistenceError::NotFound)
}

fn hash(ctx: &AppContext, pwd: &str) -> ServiceResult<String> {
    ctx.hasher
        .hash_password(pwd)
        .map_err(|err| UnknownError::new(Box::new(err)).into())
}

pub mod organization {
    use super::*;
    use crate::domain::{
        datatype::{ActivityStatus, UserField, UserNameField},
        entity::{
            organization::{Team, TeamState, User, UserState},
            Entity, Ident,
        },
    };

    pub async fn add_user(ctx: &AppContext, mut user: UserState) -> ServiceResult<User> {
        user.password = hash(ctx, &user.password)?;
        let user = ctx.store.insert_user(user).await?;
        tracing::info!(user_id = user.ident(), "user created");
        Ok(user)
    }

    pub async fn update_user(
        ctx: &AppContext,
        user_id: Ident,
        field: UserField,
        value: String,
    ) -> ServiceResult<User> {
        let mut user = require(ctx.store.find_user(user_id).await?)?;
        let value = match field {
            UserField::Password => hash(ctx, &value)?,
            _ => value,
        };
        user.set_field(field, value);
        ctx.store.save_user(&user).await?;
        tracing::info!(user_id, %field, "user updated");
        Ok(user)
    }

    pub async fn set_user_status(
        ctx: &AppContext,
        user_id: Ident,
        status: ActivityStatus,
    ) -> ServiceResult<User> {
        let mut user = require(ctx.store.find_user(user_id).await?)?;
        user.set_status(status);
        ctx.store.save_user(&user).await?;
        tracing::info!(user_id, %status, "user status changed");
        Ok(user)
    }

    pub async fn find_by_user_number(ctx: &AppContext, user_number: &str) -> ServiceResult<Vec<User>> {
        Ok(ctx.store.find_users_by_number(user_number).await?)
    }

    pub async fn find_by_name(
        ctx: &AppContext,
        field: UserNameField,
        name: &str,
    ) -> ServiceResult<Vec<User>> {
        Ok(ctx.store.find_users_by_name(field, name).await?)
    }

    pub async fn users_of_team(ctx: &AppContext, team_id: Ident) -> ServiceResult<Vec<User>> {
        Ok(ctx.store.find_users_by_team(team_id).await?)
    }

    pub async fn add_team(ctx: &AppContext, team: TeamState) -> ServiceResult<Team> {
        let team = ctx.store.insert_team(team).await?;
        tracing::info!(team_id = team.ident(), "team created");
        Ok(team)
    }

    pub async fn rename_team(ctx: &AppContext, team_id: Ident, name: String) -> ServiceResult<Team> {
        let mut team = require(ctx.store.find_team(team_id).await?)?;
        team.rename(name);
        ctx.store.save_team(&team).await?;
        tracing::info!(team_id, "team renamed");
        Ok(team)
    }

    pub async fn set_team_status(
        ctx: &AppContext,
        team_id: Ident,
        status: ActivityStatus,
    ) -> ServiceResult<Team> {
        let mut team = require(ctx.store.find_team(team_id).await?)?;
        team.set_status(status);
        ctx.store.save_team(&team).await?;
        tracing::info!(team_id, %status, "team status changed");
        Ok(team)
    }

    pub async fn all_teams(ctx: &AppContext) -> ServiceResult<Vec<Team>> {
        Ok(ctx.store.find_all_teams().await?)
    }

    pub async fn add_user_to_team(
        ctx: &AppContext,
        team_id: Ident,
        user_id: Ident,
    ) -> ServiceResult<User> {
        let team = require(ctx.store.find_team(team_id).await?)?;
        let mut user = require(ctx.store.find_user(user_id).await?)?;
        user.join_team(team.ident());
        ctx.store.save_user(&user).await?;
        tracing::info!(team_id, user_id, "user joined team");
        Ok(user)
    }
}

pub mod tracking {
    use super::*;
    use crate::domain::{
        datatype::WorkItemStatus,
        entity::{
            tracking::{Issue, IssueState, WorkItem, WorkItemState},
            Entity, Ident,
        },
    };

    pub async fn add_work_item(ctx: &AppContext, item: WorkItemState) -> ServiceResult<WorkItem> {
        let item = ctx.store.insert_work_item(item).await?;
        tracing::info!(work_item_id = item.ident(), "work item created");
        Ok(item)
    }

    pub async fn set_work_item_status(
        ctx: &AppContext,
        work_item_id: Ident,
        status: WorkItemStatus,
    ) -> ServiceResult<WorkItem> {
        let mut item = require(ctx.store.find_work_item(work_item_id).await?)?;
        item.set_status(status);
        ctx.store.save_work_item(&item).await?;
        tracing::info!(work_item_id, %status, "work item status changed");
        Ok(item)
    }

    pub async fn assign_work_item_to_user(
        ctx: &AppContext,
        user_id: Ident,
        work_item_id: Ident,
    ) -> ServiceResult<WorkItem> {
        let user = require(ctx.store.find_user(user_id).await?)?;
        let mut item = require(ctx.store.find_work_item(work_item_id).await?)?;
        item.assign(user.ident(), user.team_id());
        ctx.store.save_work_item(&item).await?;
        tracing::info!(work_item_id, user_id, "work item assigned");
        Ok(item)
    }

    /// Removes the work item, its issues go with it.
    ///
    /// `issue_id` is only reported: an issue of another work item is left alone.
    pub async fn delete_work_item(
        ctx: &AppContext,
        issue_id: Ident,
        work_item_id: Ident,
    ) -> ServiceResult<()> {
        ctx.store.delete_work_item(work_item_id).await?;
        tracing::info!(work_item_id, issue_id, "work item removed");
        Ok(())
    }

    pub async fn work_items_by_status(
        ctx: &AppContext,
        status: WorkItemStatus,
    ) -> ServiceResult<Vec<WorkItem>> {
        Ok(ctx.store.find_work_items_by_status(status).await?)
    }

    pub async fn work_items_by_team(ctx: &AppContext, team_id: Ident) -> ServiceResult<Vec<WorkItem>> {
        Ok(ctx.store.find_work_items_by_team(team_id).await?)
    }

    pub async fn work_items_by_user(ctx: &AppContext, user_id: Ident) -> ServiceResult<Vec<WorkItem>> {
        Ok(ctx.store.find_work_items_by_user(user_id).await?)
    }

    pub async fn search_by_description(ctx: &AppContext, text: &str) -> ServiceResult<Vec<WorkItem>> {
        Ok(ctx.store.search_work_items(text).await?)
    }

    pub async fn work_items_with_issue(ctx: &AppContext) -> ServiceResult<Vec<WorkItem>> {
        Ok(ctx.store.find_work_items_with_issue().await?)
    }

    pub async fn add_and_assign_issue(
        ctx: &AppContext,
        mut issue: IssueState,
        work_item_id: Ident,
    ) -> ServiceResult<Issue> {
        let item = require(ctx.store.find_work_item(work_item_id).await?)?;
        issue.work_item_id = Some(item.ident());
        let issue = ctx.store.insert_issue(issue).await?;
        tracing::info!(issue_id = issue.ident(), work_item_id, "issue raised");
        Ok(issue)
    }

    pub async fn update_issue(
        ctx: &AppContext,
        issue_id: Ident,
        answer: String,
        reason: String,
    ) -> ServiceResult<Issue> {
        let mut issue = require(ctx.store.find_issue(issue_id).await?)?;
        issue.resolve(answer, reason);
        ctx.store.save_issue(&issue).await?;
        tracing::info!(issue_id, "issue resolved");
        Ok(issue)
    }
}
