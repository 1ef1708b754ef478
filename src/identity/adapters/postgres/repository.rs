//! `PostgreSQL` repository implementation for users and role profiles.

use super::{
    models::{BenefactorRow, CharityRow, UserRow},
    schema::{benefactors, charities, users},
};
use crate::db::PgPool;
use crate::identity::{
    domain::{
        Benefactor, BenefactorId, Charity, CharityId, CharityName, Experience, FreeTimePerWeek,
        PersistedBenefactorData, PersistedCharityData, RegistrationNumber, TokenDigest, User,
        UserId, Username,
    },
    ports::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult, ProfileKind},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed identity repository.
#[derive(Debug, Clone)]
pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> IdentityRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> IdentityRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(IdentityRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(IdentityRepositoryError::persistence)?
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn store_user(&self, user: &User, token: &TokenDigest) -> IdentityRepositoryResult<()> {
        let username = user.username().clone();
        let row = UserRow {
            id: user.id().into_inner(),
            username: username.as_str().to_owned(),
            token_digest: token.as_str().to_owned(),
            created_at: user.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some("idx_users_username_unique") =>
                    {
                        IdentityRepositoryError::DuplicateUsername(username.clone())
                    }
                    _ => IdentityRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_user_by_token(
        &self,
        token: &TokenDigest,
    ) -> IdentityRepositoryResult<Option<User>> {
        let digest = token.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::token_digest.eq(digest))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(IdentityRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn store_benefactor(&self, benefactor: &Benefactor) -> IdentityRepositoryResult<()> {
        let user_id = benefactor.user_id();
        let row = BenefactorRow {
            id: benefactor.id().into_inner(),
            user_id: user_id.into_inner(),
            experience: benefactor.experience().level(),
            free_time_per_week: i16::from(benefactor.free_time_per_week().hours()),
            created_at: benefactor.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(benefactors::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_profile_insert_error(err, user_id, ProfileKind::Benefactor))?;
            Ok(())
        })
        .await
    }

    async fn store_charity(&self, charity: &Charity) -> IdentityRepositoryResult<()> {
        let user_id = charity.user_id();
        let row = CharityRow {
            id: charity.id().into_inner(),
            user_id: user_id.into_inner(),
            name: charity.name().as_str().to_owned(),
            reg_number: charity.reg_number().as_str().to_owned(),
            created_at: charity.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(charities::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_profile_insert_error(err, user_id, ProfileKind::Charity))?;
            Ok(())
        })
        .await
    }

    async fn find_benefactor_by_user(
        &self,
        user_id: UserId,
    ) -> IdentityRepositoryResult<Option<Benefactor>> {
        self.run_blocking(move |connection| {
            let row = benefactors::table
                .filter(benefactors::user_id.eq(user_id.into_inner()))
                .select(BenefactorRow::as_select())
                .first::<BenefactorRow>(connection)
                .optional()
                .map_err(IdentityRepositoryError::persistence)?;
            row.map(row_to_benefactor).transpose()
        })
        .await
    }

    async fn find_charity_by_user(
        &self,
        user_id: UserId,
    ) -> IdentityRepositoryResult<Option<Charity>> {
        self.run_blocking(move |connection| {
            let row = charities::table
                .filter(charities::user_id.eq(user_id.into_inner()))
                .select(CharityRow::as_select())
                .first::<CharityRow>(connection)
                .optional()
                .map_err(IdentityRepositoryError::persistence)?;
            row.map(row_to_charity).transpose()
        })
        .await
    }
}

fn map_profile_insert_error(
    err: DieselError,
    user_id: UserId,
    kind: ProfileKind,
) -> IdentityRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            IdentityRepositoryError::DuplicateProfile { user_id, kind }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            IdentityRepositoryError::UnknownUser(user_id)
        }
        other => IdentityRepositoryError::persistence(other),
    }
}

fn row_to_user(row: UserRow) -> IdentityRepositoryResult<User> {
    let username = Username::new(row.username).map_err(IdentityRepositoryError::persistence)?;
    Ok(User::from_persisted(
        UserId::from_uuid(row.id),
        username,
        row.created_at,
    ))
}

fn row_to_benefactor(row: BenefactorRow) -> IdentityRepositoryResult<Benefactor> {
    let experience = Experience::try_from(i64::from(row.experience))
        .map_err(IdentityRepositoryError::persistence)?;
    let free_time_per_week = FreeTimePerWeek::try_from(i64::from(row.free_time_per_week))
        .map_err(IdentityRepositoryError::persistence)?;
    Ok(Benefactor::from_persisted(PersistedBenefactorData {
        id: BenefactorId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        experience,
        free_time_per_week,
        created_at: row.created_at,
    }))
}

fn row_to_charity(row: CharityRow) -> IdentityRepositoryResult<Charity> {
    let name = CharityName::new(row.name).map_err(IdentityRepositoryError::persistence)?;
    let reg_number =
        RegistrationNumber::new(row.reg_number).map_err(IdentityRepositoryError::persistence)?;
    Ok(Charity::from_persisted(PersistedCharityData {
        id: CharityId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        name,
        reg_number,
        created_at: row.created_at,
    }))
}
