use chrono::Utc;
use log::debug;
use sqlx::{types::Json, SqliteConnection};

use crate::{
    db_types::{Club, DocumentVerificationStatus, NewClub, NewTeam, Team, UploadedDocument, UserId},
    helpers::AadhaarAddress,
};

pub async fn insert_club(owner_id: &UserId, club: NewClub, conn: &mut SqliteConnection) -> Result<Club, sqlx::Error> {
    let club: Club = sqlx::query_as(
        r#"
            INSERT INTO clubs (
                owner_id,
                club_name,
                club_type,
                registration_number,
                city,
                state,
                district,
                country,
                email,
                phone,
                description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *;
        "#,
    )
    .bind(owner_id)
    .bind(club.club_name)
    .bind(club.club_type)
    .bind(club.registration_number)
    .bind(club.city)
    .bind(club.state)
    .bind(club.district)
    .bind(club.country)
    .bind(club.email)
    .bind(club.phone)
    .bind(club.description)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Club #{} ({}) created for {owner_id}", club.id, club.club_name);
    Ok(club)
}

/// Overwrites the club's details. Returns `None` if the club does not exist.
pub async fn update_club(
    club_id: i64,
    club: NewClub,
    conn: &mut SqliteConnection,
) -> Result<Option<Club>, sqlx::Error> {
    let club = sqlx::query_as(
        r#"
            UPDATE clubs SET
                club_name = $2,
                club_type = $3,
                registration_number = $4,
                city = $5,
                state = $6,
                district = $7,
                country = $8,
                email = $9,
                phone = $10,
                description = $11,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#,
    )
    .bind(club_id)
    .bind(club.club_name)
    .bind(club.club_type)
    .bind(club.registration_number)
    .bind(club.city)
    .bind(club.state)
    .bind(club.district)
    .bind(club.country)
    .bind(club.email)
    .bind(club.phone)
    .bind(club.description)
    .fetch_optional(conn)
    .await?;
    Ok(club)
}

pub async fn fetch_club(club_id: i64, conn: &mut SqliteConnection) -> Result<Option<Club>, sqlx::Error> {
    let club = sqlx::query_as("SELECT * FROM clubs WHERE id = $1").bind(club_id).fetch_optional(conn).await?;
    Ok(club)
}

pub async fn fetch_club_by_owner(owner_id: &UserId, conn: &mut SqliteConnection) -> Result<Option<Club>, sqlx::Error> {
    let club = sqlx::query_as("SELECT * FROM clubs WHERE owner_id = $1 ORDER BY id LIMIT 1")
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;
    Ok(club)
}

pub async fn fetch_active_clubs(conn: &mut SqliteConnection) -> Result<Vec<Club>, sqlx::Error> {
    let clubs = sqlx::query_as("SELECT * FROM clubs WHERE is_active = 1 ORDER BY club_name").fetch_all(conn).await?;
    Ok(clubs)
}

/// Clubs still waiting on an admin: their uploaded documents are pending review, or they are listed but not yet
/// active. Rejected clubs come back once they upload new documents.
pub async fn fetch_clubs_for_review(conn: &mut SqliteConnection) -> Result<Vec<Club>, sqlx::Error> {
    let clubs = sqlx::query_as(
        r#"
            SELECT * FROM clubs
            WHERE document_verification_status = 'pending_review' OR (status = 'pending_review' AND is_active = 1)
            ORDER BY created_at, id
        "#,
    )
    .fetch_all(conn)
    .await?;
    Ok(clubs)
}

/// Applies an admin's verdict on the club and its pending document uploads. Approval activates the club and accepts
/// its documents. Rejection withdraws the club from the public listing until the owner uploads new documents.
pub async fn review_club(
    club_id: i64,
    approved: bool,
    conn: &mut SqliteConnection,
) -> Result<Option<Club>, sqlx::Error> {
    let sql = if approved {
        r#"
            UPDATE clubs SET
                kyc_verified = 1,
                status = 'active',
                document_verification_status = 'documents_verified',
                is_active = 1,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#
    } else {
        r#"
            UPDATE clubs SET
                kyc_verified = 0,
                document_verification_status = NULL,
                is_active = 0,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#
    };
    let club: Option<Club> = sqlx::query_as(sql).bind(club_id).fetch_optional(&mut *conn).await?;
    if club.is_none() {
        return Ok(None);
    }
    let (verification_status, document_status) =
        if approved { ("documents_verified", "verified") } else { ("rejected", "rejected") };
    let reviewed = sqlx::query(
        r#"
            UPDATE kyc_documents SET verification_status = $2, document_status = $3
            WHERE club_id = $1 AND document_type = 'club_documents' AND document_status = 'pending_admin_review'
        "#,
    )
    .bind(club_id)
    .bind(verification_status)
    .bind(document_status)
    .execute(conn)
    .await?;
    debug!("🗃️ Club #{club_id} reviewed ({document_status}). {} document uploads updated", reviewed.rows_affected());
    Ok(club)
}

/// Marks the club as KYC verified and fills in any missing location fields from the owner's Aadhaar address.
/// Registered clubs still need an admin review before they become active.
pub async fn mark_club_kyc_verified(
    club_id: i64,
    address: &AadhaarAddress,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
            UPDATE clubs SET
                kyc_verified = 1,
                status = CASE
                    WHEN club_type = 'Registered' AND TRIM(COALESCE(registration_number, '')) <> ''
                        THEN 'pending_review'
                    ELSE 'active'
                END,
                city = COALESCE(city, $2),
                district = COALESCE(district, $3),
                state = COALESCE(state, $4),
                country = COALESCE(country, $5),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
        "#,
    )
    .bind(club_id)
    .bind(&address.city)
    .bind(&address.district)
    .bind(&address.state)
    .bind(&address.country)
    .execute(conn)
    .await?;
    debug!("🗃️ Club #{club_id} is KYC verified");
    Ok(())
}

/// Stores the upload record and moves the club to its next document status.
///
/// Registered clubs lose their KYC flag until an admin has reviewed the documents. Other clubs are verified straight
/// away.
pub async fn record_documents(
    club: &Club,
    documents: &[UploadedDocument],
    conn: &mut SqliteConnection,
) -> Result<Club, sqlx::Error> {
    let (verification_status, document_status, kyc_verified) = if club.is_registered() {
        (DocumentVerificationStatus::PendingReview, "pending_admin_review", false)
    } else {
        (DocumentVerificationStatus::DocumentsVerified, "verified", true)
    };
    sqlx::query(
        r#"
            INSERT INTO kyc_documents (
                user_id,
                club_id,
                document_type,
                verification_status,
                document_status,
                documents_uploaded,
                documents_upload_date
            ) VALUES ($1, $2, 'club_documents', $3, $4, $5, $6)
        "#,
    )
    .bind(&club.owner_id)
    .bind(club.id)
    .bind(verification_status)
    .bind(document_status)
    .bind(Json(documents))
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;
    let club: Club = sqlx::query_as(
        r#"
            UPDATE clubs SET
                document_verification_status = $2,
                kyc_verified = $3,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#,
    )
    .bind(club.id)
    .bind(verification_status)
    .bind(kyc_verified)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ {} documents recorded for club #{}", documents.len(), club.id);
    Ok(club)
}

pub async fn insert_team(club_id: i64, team: NewTeam, conn: &mut SqliteConnection) -> Result<Team, sqlx::Error> {
    let team: Team =
        sqlx::query_as("INSERT INTO teams (club_id, team_name, formation) VALUES ($1, $2, $3) RETURNING *;")
            .bind(club_id)
            .bind(team.team_name)
            .bind(team.formation)
            .fetch_one(conn)
            .await?;
    debug!("🗃️ Team #{} ({}) created for club #{club_id}", team.id, team.team_name);
    Ok(team)
}

pub async fn fetch_team(team_id: i64, conn: &mut SqliteConnection) -> Result<Option<Team>, sqlx::Error> {
    let team = sqlx::query_as("SELECT * FROM teams WHERE id = $1").bind(team_id).fetch_optional(conn).await?;
    Ok(team)
}

pub async fn fetch_teams_for_club(club_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Team>, sqlx::Error> {
    let teams =
        sqlx::query_as("SELECT * FROM teams WHERE club_id = $1 ORDER BY id").bind(club_id).fetch_all(conn).await?;
    Ok(teams)
}

pub async fn add_to_squad(team_id: i64, player_id: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO team_squads (team_id, player_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
        .bind(team_id)
        .bind(player_id)
        .execute(conn)
        .await?;
    Ok(())
}
