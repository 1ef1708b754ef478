//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{TaskRow, TaskTransitionChanges},
    schema::tasks,
};
use crate::db::PgPool;
use crate::identity::domain::{BenefactorId, CharityId};
use crate::task::{
    domain::{
        AgeLimits, GenderLimit, PersistedTaskData, Task, TaskDetails, TaskId, TaskPredicate,
        TaskQuery, TaskRevision, TaskState, TaskTitle, TaskVisibility,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::PgTextExpressionMethods;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Bool;

/// Boolean SQL expression over the `tasks` table built at runtime.
type BoxedPredicate = Box<dyn BoxableExpression<tasks::table, Pg, SqlType = Bool>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(
        &self,
        visibility: &TaskVisibility,
        query: &TaskQuery,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let scope = *visibility;
        let predicates = query.clone();

        self.run_blocking(move |connection| {
            let mut statement = tasks::table
                .select(TaskRow::as_select())
                .into_boxed()
                .filter(visibility_expression(&scope));
            for predicate in predicates.filters() {
                statement = statement.filter(predicate_expression(predicate));
            }
            for predicate in predicates.excludes() {
                statement = statement.filter(diesel::dsl::not(predicate_expression(predicate)));
            }

            let rows = statement
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update_if_current(
        &self,
        task: &Task,
        expected: TaskRevision,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let expected_version = stored_version(expected.version())?;
        let changes = TaskTransitionChanges {
            assigned_benefactor_id: task.assigned_benefactor().map(BenefactorId::into_inner),
            completed_by_id: task.completed_by().map(BenefactorId::into_inner),
            state: task.state().as_str().to_owned(),
            version: stored_version(task.version())?,
            updated_at: task.updated_at(),
        };

        self.run_blocking(move |connection| {
            // A single conditional UPDATE; the row lock it takes serialises
            // competing transitions on the same task.
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::state.eq(expected.state().as_str()))
                    .filter(tasks::version.eq(expected_version)),
            )
            .set(&changes)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if affected > 0 {
                return Ok(());
            }

            let exists = diesel::select(diesel::dsl::exists(
                tasks::table.filter(tasks::id.eq(task_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if exists {
                Err(TaskRepositoryError::StateConflict {
                    task_id,
                    expected: expected.state(),
                })
            } else {
                Err(TaskRepositoryError::NotFound(task_id))
            }
        })
        .await
    }
}

fn visibility_expression(visibility: &TaskVisibility) -> BoxedPredicate {
    let mut visible: BoxedPredicate = Box::new(tasks::state.eq(TaskState::Pending.as_str()));
    if let Some(charity_id) = visibility.charity_id() {
        visible = Box::new(visible.or(tasks::charity_id.eq(charity_id.into_inner())));
    }
    if let Some(benefactor_id) = visibility.benefactor_id() {
        let id = benefactor_id.into_inner();
        let holds: BoxedPredicate = Box::new(
            tasks::assigned_benefactor_id
                .is_not_null()
                .and(tasks::assigned_benefactor_id.assume_not_null().eq(id)),
        );
        let completed: BoxedPredicate = Box::new(
            tasks::completed_by_id
                .is_not_null()
                .and(tasks::completed_by_id.assume_not_null().eq(id)),
        );
        visible = Box::new(visible.or(holds).or(completed));
    }
    visible
}

fn predicate_expression(predicate: &TaskPredicate) -> BoxedPredicate {
    match predicate {
        TaskPredicate::TitleContains(needle) => {
            Box::new(tasks::title.ilike(like_pattern(needle)))
        }
        TaskPredicate::DescriptionContains(needle) => Box::new(
            tasks::description
                .is_not_null()
                .and(tasks::description.assume_not_null().ilike(like_pattern(needle))),
        ),
        TaskPredicate::GenderLimitIs(limit) => Box::new(
            tasks::gender_limit
                .is_not_null()
                .and(tasks::gender_limit.assume_not_null().eq(limit.as_str())),
        ),
        TaskPredicate::CharityIs(charity_id) => {
            Box::new(tasks::charity_id.eq(charity_id.into_inner()))
        }
        TaskPredicate::StateIs(state) => Box::new(tasks::state.eq(state.as_str())),
        TaskPredicate::MinimumAgeAbove(age) => Box::new(
            tasks::age_limit_from
                .is_not_null()
                .and(tasks::age_limit_from.assume_not_null().gt(i32::from(*age))),
        ),
        TaskPredicate::MaximumAgeBelow(age) => Box::new(
            tasks::age_limit_to
                .is_not_null()
                .and(tasks::age_limit_to.assume_not_null().lt(i32::from(*age))),
        ),
    }
}

/// Wraps a needle in `%` after escaping `LIKE` metacharacters.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn stored_version(version: u64) -> TaskRepositoryResult<i64> {
    i64::try_from(version).map_err(TaskRepositoryError::persistence)
}

fn to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    let details = task.details();
    Ok(TaskRow {
        id: task.id().into_inner(),
        charity_id: task.charity_id().into_inner(),
        assigned_benefactor_id: task.assigned_benefactor().map(BenefactorId::into_inner),
        completed_by_id: task.completed_by().map(BenefactorId::into_inner),
        state: task.state().as_str().to_owned(),
        version: stored_version(task.version())?,
        title: details.title().as_str().to_owned(),
        description: details.description().map(str::to_owned),
        date: details.date(),
        age_limit_from: details.age_limits().lower().map(i32::from),
        age_limit_to: details.age_limits().upper().map(i32::from),
        gender_limit: details.gender_limit().map(|limit| limit.as_str().to_owned()),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        charity_id,
        assigned_benefactor_id,
        completed_by_id,
        state: persisted_state,
        version: persisted_version,
        title: persisted_title,
        description: persisted_description,
        date: persisted_date,
        age_limit_from,
        age_limit_to,
        gender_limit,
        created_at,
        updated_at,
    } = row;

    let state =
        TaskState::try_from(persisted_state.as_str()).map_err(TaskRepositoryError::persistence)?;
    let version = u64::try_from(persisted_version).map_err(TaskRepositoryError::persistence)?;
    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let lower = age_limit_from.map(u16::try_from).transpose();
    let upper = age_limit_to.map(u16::try_from).transpose();
    let age_limits = AgeLimits::new(
        lower.map_err(TaskRepositoryError::persistence)?,
        upper.map_err(TaskRepositoryError::persistence)?,
    )
    .map_err(TaskRepositoryError::persistence)?;

    let mut details = TaskDetails::new(title).with_age_limits(age_limits);
    if let Some(description) = persisted_description {
        details = details.with_description(description);
    }
    if let Some(date) = persisted_date {
        details = details.with_date(date);
    }
    if let Some(code) = gender_limit {
        let limit =
            GenderLimit::try_from(code.as_str()).map_err(TaskRepositoryError::persistence)?;
        details = details.with_gender_limit(limit);
    }

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        charity_id: CharityId::from_uuid(charity_id),
        assigned_benefactor: assigned_benefactor_id.map(BenefactorId::from_uuid),
        completed_by: completed_by_id.map(BenefactorId::from_uuid),
        state,
        version,
        details,
        created_at,
        updated_at,
    }))
}
