use chrono::Utc;
use log::debug;
use sqlx::{FromRow, SqliteConnection};

use crate::db_types::{Match, MatchParties, NewMatch, UserId};

pub async fn insert_match(
    created_by: &UserId,
    new_match: NewMatch,
    conn: &mut SqliteConnection,
) -> Result<Match, sqlx::Error> {
    let staff = new_match.staff_user_ids;
    let m: Match = sqlx::query_as(
        r#"
            INSERT INTO matches (
                tournament_id,
                home_team_id,
                away_team_id,
                match_format,
                match_date,
                match_time,
                stadium_id,
                referee_user_id,
                status,
                payment_status,
                created_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', 'unpaid', $9)
            RETURNING *;
        "#,
    )
    .bind(new_match.tournament_id)
    .bind(new_match.home_team_id)
    .bind(new_match.away_team_id)
    .bind(new_match.match_format)
    .bind(new_match.match_date)
    .bind(new_match.match_time)
    .bind(new_match.stadium_id)
    .bind(new_match.referee_user_id)
    .bind(created_by)
    .fetch_one(&mut *conn)
    .await?;
    for user_id in &staff {
        sqlx::query("INSERT INTO match_staff (match_id, staff_user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(m.id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
    }
    debug!("🗃️ Match #{} created by {created_by} with {} staff", m.id, staff.len());
    Ok(m)
}

pub async fn fetch_match(match_id: i64, conn: &mut SqliteConnection) -> Result<Option<Match>, sqlx::Error> {
    let m = sqlx::query_as("SELECT * FROM matches WHERE id = $1").bind(match_id).fetch_optional(conn).await?;
    Ok(m)
}

pub async fn fetch_staff_user_ids(match_id: i64, conn: &mut SqliteConnection) -> Result<Vec<UserId>, sqlx::Error> {
    let ids = sqlx::query_scalar("SELECT staff_user_id FROM match_staff WHERE match_id = $1 ORDER BY rowid")
        .bind(match_id)
        .fetch_all(conn)
        .await?;
    Ok(ids)
}

#[derive(FromRow)]
struct MatchHeader {
    home_club_id: i64,
    away_club_id: i64,
    home_owner_id: Option<UserId>,
    away_owner_id: Option<UserId>,
    home_team_name: String,
    away_team_name: String,
    stadium_owner_id: Option<UserId>,
    stadium_name: Option<String>,
}

pub async fn fetch_match_parties(
    match_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<MatchParties>, sqlx::Error> {
    let header: Option<MatchHeader> = sqlx::query_as(
        r#"
            SELECT
                home.club_id AS home_club_id,
                away.club_id AS away_club_id,
                home_club.owner_id AS home_owner_id,
                away_club.owner_id AS away_owner_id,
                home.team_name AS home_team_name,
                away.team_name AS away_team_name,
                stadiums.owner_id AS stadium_owner_id,
                stadiums.stadium_name AS stadium_name
            FROM matches
                JOIN teams home ON home.id = matches.home_team_id
                JOIN teams away ON away.id = matches.away_team_id
                LEFT JOIN clubs home_club ON home_club.id = home.club_id
                LEFT JOIN clubs away_club ON away_club.id = away.club_id
                LEFT JOIN stadiums ON stadiums.id = matches.stadium_id
            WHERE matches.id = $1
        "#,
    )
    .bind(match_id)
    .fetch_optional(&mut *conn)
    .await?;
    let Some(header) = header else {
        return Ok(None);
    };
    let squad_user_ids = sqlx::query_scalar(
        r#"
            SELECT DISTINCT players.user_id
            FROM team_squads
                JOIN players ON players.id = team_squads.player_id
                JOIN matches ON team_squads.team_id IN (matches.home_team_id, matches.away_team_id)
            WHERE matches.id = $1
        "#,
    )
    .bind(match_id)
    .fetch_all(&mut *conn)
    .await?;
    let staff_user_ids = fetch_staff_user_ids(match_id, conn).await?;
    Ok(Some(MatchParties {
        home_club_id: header.home_club_id,
        away_club_id: header.away_club_id,
        home_owner_id: header.home_owner_id,
        away_owner_id: header.away_owner_id,
        home_team_name: header.home_team_name,
        away_team_name: header.away_team_name,
        stadium_owner_id: header.stadium_owner_id,
        stadium_name: header.stadium_name,
        squad_user_ids,
        staff_user_ids,
    }))
}

pub async fn cancel_match(
    match_id: i64,
    canceled_by: &UserId,
    reason: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Match>, sqlx::Error> {
    let m = sqlx::query_as(
        r#"
            UPDATE matches SET
                status = 'cancelled',
                canceled_at = $2,
                canceled_by = $3,
                cancellation_reason = $4,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#,
    )
    .bind(match_id)
    .bind(Utc::now())
    .bind(canceled_by)
    .bind(reason)
    .fetch_optional(conn)
    .await?;
    debug!("🗃️ Match #{match_id} cancelled by {canceled_by}");
    Ok(m)
}

pub async fn mark_match_paid(match_id: i64, payment_id: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE matches SET payment_status = 'paid', payment_id = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1",
    )
    .bind(match_id)
    .bind(payment_id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn mark_match_refunded(match_id: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE matches SET payment_status = 'refunded', updated_at = CURRENT_TIMESTAMP WHERE id = $1")
        .bind(match_id)
        .execute(conn)
        .await?;
    Ok(())
}
