use chrono::Utc;
use log::debug;
use sqlx::{types::Json, SqliteConnection};

use crate::{
    db_types::{NewUser, User, UserId, UserRole},
    helpers::split_full_name,
    traits::AadhaarVerification,
};

pub async fn fetch_user(user_id: &UserId, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as("SELECT * FROM users WHERE id = $1").bind(user_id).fetch_optional(conn).await?;
    Ok(user)
}

/// Inserts the user, or updates the profile of an existing user. Only fields that are provided are overwritten.
pub async fn upsert_user(user: NewUser, conn: &mut SqliteConnection) -> Result<User, sqlx::Error> {
    let NewUser { id, role, profile } = user;
    let full_name = match (profile.first_name.as_deref(), profile.last_name.as_deref()) {
        (Some(first), Some(last)) => Some(format!("{} {}", first.trim(), last.trim()).trim().to_string()),
        (Some(first), None) => Some(first.trim().to_string()),
        _ => None,
    };
    let user = sqlx::query_as(
        r#"
            INSERT INTO users (id, role, email, phone, first_name, last_name, full_name, date_of_birth)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                role = excluded.role,
                email = COALESCE(excluded.email, users.email),
                phone = COALESCE(excluded.phone, users.phone),
                first_name = COALESCE(excluded.first_name, users.first_name),
                last_name = COALESCE(excluded.last_name, users.last_name),
                full_name = COALESCE(excluded.full_name, users.full_name),
                date_of_birth = COALESCE(excluded.date_of_birth, users.date_of_birth),
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(&id)
    .bind(role)
    .bind(profile.email)
    .bind(profile.phone)
    .bind(profile.first_name)
    .bind(profile.last_name)
    .bind(full_name)
    .bind(profile.date_of_birth)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ User {id} saved");
    Ok(user)
}

pub async fn set_user_active(
    user_id: &UserId,
    is_active: bool,
    conn: &mut SqliteConnection,
) -> Result<Option<User>, sqlx::Error> {
    let user =
        sqlx::query_as("UPDATE users SET is_active = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1 RETURNING *;")
            .bind(user_id)
            .bind(is_active)
            .fetch_optional(conn)
            .await?;
    debug!("🗃️ User {user_id} active: {is_active}");
    Ok(user)
}

/// Finds a user other than `exclude` holding the Aadhaar number, optionally restricted to verified users of one role.
pub async fn fetch_user_by_aadhaar(
    aadhaar_number: &str,
    exclude: &UserId,
    verified_role: Option<UserRole>,
    conn: &mut SqliteConnection,
) -> Result<Option<User>, sqlx::Error> {
    let user = match verified_role {
        Some(role) => {
            sqlx::query_as(
                "SELECT * FROM users WHERE aadhaar_number = $1 AND id <> $2 AND role = $3 AND kyc_status = 'verified' \
                 LIMIT 1",
            )
            .bind(aadhaar_number)
            .bind(exclude)
            .bind(role)
            .fetch_optional(conn)
            .await?
        },
        None => {
            sqlx::query_as("SELECT * FROM users WHERE aadhaar_number = $1 AND id <> $2 LIMIT 1")
                .bind(aadhaar_number)
                .bind(exclude)
                .fetch_optional(conn)
                .await?
        },
    };
    Ok(user)
}

/// Marks the user as KYC verified. Name and date of birth are only filled in if the profile does not have them yet.
/// Location fields are always refreshed from the identity record.
pub async fn apply_aadhaar_verification(
    existing: &User,
    verification: &AadhaarVerification,
    conn: &mut SqliteConnection,
) -> Result<User, sqlx::Error> {
    let (full_name, first_name, last_name) = match (existing.display_name(), verification.name.as_deref()) {
        (None, Some(name)) => {
            let (first, last) = split_full_name(name);
            (Some(name.to_string()), Some(first), Some(last))
        },
        _ => (None, None, None),
    };
    let dob = existing.date_of_birth.is_none().then(|| verification.date_of_birth.clone()).flatten();
    let addr = &verification.address;
    let user = sqlx::query_as(
        r#"
            UPDATE users SET
                kyc_status = 'verified',
                kyc_verified_at = $2,
                aadhaar_number = $3,
                full_name = COALESCE($4, full_name),
                first_name = COALESCE($5, first_name),
                last_name = COALESCE($6, last_name),
                date_of_birth = COALESCE($7, date_of_birth),
                city = COALESCE($8, city),
                district = COALESCE($9, district),
                state = COALESCE($10, state),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#,
    )
    .bind(&existing.id)
    .bind(Utc::now())
    .bind(&verification.aadhaar_number)
    .bind(full_name)
    .bind(first_name)
    .bind(last_name)
    .bind(dob)
    .bind(&addr.city)
    .bind(&addr.district)
    .bind(&addr.state)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ User {} is now KYC verified", existing.id);
    Ok(user)
}

/// Stores the verified identity record as a KYC document.
pub async fn insert_aadhaar_document(
    verification: &AadhaarVerification,
    conn: &mut SqliteConnection,
) -> Result<i64, sqlx::Error> {
    let id = sqlx::query_scalar(
        r#"
            INSERT INTO kyc_documents (user_id, club_id, document_type, verification_status, verified_data)
            VALUES ($1, $2, 'aadhaar', 'verified', $3)
            RETURNING id;
        "#,
    )
    .bind(&verification.user_id)
    .bind(verification.club_id)
    .bind(Json(&verification.verified_data))
    .fetch_one(conn)
    .await?;
    Ok(id)
}
