use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::{
    model::{
        id::{MembershipId, UserId},
        membership::{event::EnrollMembership, membership_end_for, Membership, MembershipPlan},
    },
    repository::membership::MembershipRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::SqliteConnection;

use super::map_reference_error;
use crate::database::{model::membership::MembershipRow, ConnectionPool};

#[derive(new)]
pub struct MembershipRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl MembershipRepository for MembershipRepositoryImpl {
    async fn has_active_plan(&self, user_id: UserId, as_of: DateTime<Utc>) -> AppResult<bool> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;
        active_plan_exists(&mut conn, user_id, as_of).await
    }

    async fn enroll(&self, event: EnrollMembership) -> AppResult<Membership> {
        let EnrollMembership {
            user_id,
            plan_choice,
            enrolled_at,
        } = event;

        let mut tx = self.db.begin().await?;

        if active_plan_exists(&mut tx, user_id, enrolled_at).await? {
            return Err(AppError::MembershipAlreadyActive);
        }

        let plan = MembershipPlan::try_from(plan_choice)?;
        let membership = Membership {
            id: MembershipId::new(),
            user_id,
            plan,
            started_at: enrolled_at,
            ends_at: membership_end_for(enrolled_at),
            price: plan.price(),
        };

        sqlx::query(
            r#"
                INSERT INTO memberships
                (membership_id, user_id, plan_name, started_at, ends_at, price_cents)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(membership.id)
        .bind(membership.user_id)
        .bind(membership.plan.to_string())
        .bind(membership.started_at)
        .bind(membership.ends_at)
        .bind(membership.price.cents())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_reference_error(e, "ユーザー"))?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            membership_id = %membership.id,
            %user_id,
            plan = %membership.plan,
            ends_at = %membership.ends_at,
            "membership enrolled"
        );
        Ok(membership)
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Membership>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
                SELECT membership_id, user_id, plan_name, started_at, ends_at, price_cents
                FROM memberships
                WHERE user_id = ?
                ORDER BY started_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Membership::try_from).collect()
    }
}

// 有効判定は文字列ではなく復元した Membership に任せる
async fn active_plan_exists(
    conn: &mut SqliteConnection,
    user_id: UserId,
    as_of: DateTime<Utc>,
) -> AppResult<bool> {
    let rows = sqlx::query_as::<_, MembershipRow>(
        r#"
            SELECT membership_id, user_id, plan_name, started_at, ends_at, price_cents
            FROM memberships
            WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    for row in rows {
        if Membership::try_from(row)?.is_active_at(as_of) {
            return Ok(true);
        }
    }
    Ok(false)
}
