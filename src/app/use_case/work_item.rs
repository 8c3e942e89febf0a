use super::{ensure, Created};
use crate::{
    app::{resource::tracking::WorkItem, service, transform::convert_all, AppContext},
    domain::{
        datatype::{ActivityStatus, WorkItemStatus},
        entity::{tracking::USER_WORK_ITEM_LIMIT, Entity, Ident},
    },
    error::{
        app::ApplicationError,
        resource::{InvalidInputError, NotFoundError},
    },
};

type Result<T> = std::result::Result<T, ApplicationError>;

pub async fn create_work_item(ctx: &AppContext, dto: WorkItem) -> Result<Created> {
    let item = service::tracking::add_work_item(ctx, dto.into()).await?;
    Ok(Created(item.ident()))
}

pub async fn set_work_item_status(
    ctx: &AppContext,
    work_item_id: Ident,
    status: WorkItemStatus,
) -> Result<()> {
    ensure!(
        ctx.store.work_item_exists(work_item_id).await?,
        InvalidInputError::new(format!("Work item {work_item_id} does not exist"))
    );
    ensure!(
        ctx.store.find_work_item_status(work_item_id).await? != Some(status),
        InvalidInputError::new(format!("Work item {work_item_id} is already {status}"))
    );

    service::tracking::set_work_item_status(ctx, work_item_id, status).await?;
    Ok(())
}

pub async fn remove_work_item(ctx: &AppContext, issue_id: Ident, work_item_id: Ident) -> Result<()> {
    ensure!(
        ctx.store.work_item_exists(work_item_id).await?,
        InvalidInputError::new(format!("Work item {work_item_id} does not exist"))
    );
    ensure!(
        ctx.store.issue_exists(issue_id).await?,
        InvalidInputError::new(format!("Issue {issue_id} does not exist"))
    );

    service::tracking::delete_work_item(ctx, issue_id, work_item_id).await
}

pub async fn assign_work_item_to_user(
    ctx: &AppContext,
    user_id: Ident,
    work_item_id: Ident,
) -> Result<()> {
    ensure!(
        ctx.store.work_item_exists(work_item_id).await?,
        InvalidInputError::new(format!("Work item {work_item_id} does not exist"))
    );
    ensure!(
        ctx.store.user_exists(user_id).await?,
        InvalidInputError::new(format!("User {user_id} does not exist"))
    );
    ensure!(
        ctx.store.find_user_status(user_id).await? != Some(ActivityStatus::Inactive),
        InvalidInputError::new(format!(
            "User {user_id} is inactive and cannot be assigned work items"
        ))
    );
    ensure!(
        ctx.store.count_work_items_by_user(user_id).await? < USER_WORK_ITEM_LIMIT,
        InvalidInputError::new(format!(
            "User {user_id} already has {USER_WORK_ITEM_LIMIT} work items"
        ))
    );

    service::tracking::assign_work_item_to_user(ctx, user_id, work_item_id).await?;
    Ok(())
}

pub async fn by_status(ctx: &AppContext, status: WorkItemStatus) -> Result<Vec<WorkItem>> {
    ensure!(
        !ctx.store.find_work_items_by_status(status).await?.is_empty(),
        NotFoundError::new(format!("No work item has status {status}"))
    );

    let items = service::tracking::work_items_by_status(ctx, status).await?;
    Ok(convert_all(items))
}

/// Guarded on any item having a team, not on `team_id` itself.
pub async fn by_team(ctx: &AppContext, team_id: Ident) -> Result<Vec<WorkItem>> {
    ensure!(
        ctx.store.any_work_item_with_team().await?,
        NotFoundError::new("No work item belongs to a team")
    );

    let items = service::tracking::work_items_by_team(ctx, team_id).await?;
    Ok(convert_all(items))
}

/// Guarded on any item having an assignee, not on `user_id` itself.
pub async fn by_user(ctx: &AppContext, user_id: Ident) -> Result<Vec<WorkItem>> {
    ensure!(
        ctx.store.any_work_item_with_user().await?,
        NotFoundError::new("No work item is assigned to a user")
    );

    let items = service::tracking::work_items_by_user(ctx, user_id).await?;
    Ok(convert_all(items))
}

pub async fn search(ctx: &AppContext, text: &str) -> Result<Vec<WorkItem>> {
    ensure!(
        !ctx.store.search_work_items(text).await?.is_empty(),
        NotFoundError::new(format!("No work item description contains '{text}'"))
    );

    let items = service::tracking::search_by_description(ctx, text).await?;
    Ok(convert_all(items))
}
