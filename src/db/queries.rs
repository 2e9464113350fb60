use crate::models::{ContributionRecord, Member};
use sqlx::PgPool;

/// Look up a single member
pub async fn get_member(
    pool: &PgPool,
    member_id: i64,
) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        r#"
        SELECT id, full_name, join_date
        FROM members
        WHERE id = $1
        "#
    )
    .bind(member_id)
    .fetch_optional(pool)
    .await
}

/// Look up several members, ordered by id
pub async fn list_members(
    pool: &PgPool,
    member_ids: &[i64],
) -> Result<Vec<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        r#"
        SELECT id, full_name, join_date
        FROM members
        WHERE id = ANY($1)
        ORDER BY id
        "#
    )
    .bind(member_ids)
    .fetch_all(pool)
    .await
}

/// All contributions of a member, whatever their type or status
pub async fn list_contributions(
    pool: &PgPool,
    member_id: i64,
) -> Result<Vec<ContributionRecord>, sqlx::Error> {
    sqlx::query_as::<_, ContributionRecord>(
        r#"
        SELECT id, member_id, contribution_date, amount, contribution_type, status
        FROM contributions
        WHERE member_id = $1
        ORDER BY contribution_date
        "#
    )
    .bind(member_id)
    .fetch_all(pool)
    .await
}

/// Contributions for a batch of members, grouped by member then date
pub async fn list_contributions_for_members(
    pool: &PgPool,
    member_ids: &[i64],
) -> Result<Vec<ContributionRecord>, sqlx::Error> {
    if member_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, ContributionRecord>(
        r#"
        SELECT id, member_id, contribution_date, amount, contribution_type, status
        FROM contributions
        WHERE member_id = ANY($1)
        ORDER BY member_id, contribution_date
        "#
    )
    .bind(member_ids)
    .fetch_all(pool)
    .await
}
