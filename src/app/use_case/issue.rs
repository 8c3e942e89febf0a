use super::{ensure, Created};
use crate::{
    app::{
        resource::tracking::{Issue, WorkItem},
        service,
        transform::convert_all,
        AppContext,
    },
    domain::{
        datatype::WorkItemStatus,
        entity::{Entity, Ident},
    },
    error::{app::ApplicationError, resource::InvalidInputError},
};

type Result<T> = std::result::Result<T, ApplicationError>;

pub async fn create_issue(ctx: &AppContext, work_item_id: Ident, dto: Issue) -> Result<Created> {
    ensure!(
        ctx.store.work_item_exists(work_item_id).await?,
        InvalidInputError::new(format!("Work item {work_item_id} does not exist"))
    );
    ensure!(
        ctx.store.find_work_item_status(work_item_id).await? == Some(WorkItemStatus::Done),
        InvalidInputError::new(format!(
            "Work item {work_item_id} is not done, issues are only raised against done work items"
        ))
    );

    let issue = service::tracking::add_and_assign_issue(ctx, dto.into(), work_item_id).await?;
    Ok(Created(issue.ident()))
}

pub async fn update_issue(
    ctx: &AppContext,
    issue_id: Ident,
    answer: String,
    reason: String,
) -> Result<()> {
    ensure!(
        ctx.store.issue_exists(issue_id).await?,
        InvalidInputError::new(format!("Issue {issue_id} does not exist"))
    );

    service::tracking::update_issue(ctx, issue_id, answer, reason).await?;
    Ok(())
}

pub async fn work_items_with_issue(ctx: &AppContext) -> Result<Vec<WorkItem>> {
    ensure!(
        ctx.store.any_issue_with_work_item().await?,
        InvalidInputError::new("No issue has been raised against any work item")
    );

    let items = service::tracking::work_items_with_issue(ctx).await?;
    Ok(convert_all(items))
}
