use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{NewStadium, NewTournament, Stadium, Tournament, UserId};

pub async fn insert_stadium(
    owner_id: &UserId,
    stadium: NewStadium,
    conn: &mut SqliteConnection,
) -> Result<Stadium, sqlx::Error> {
    let stadium: Stadium = sqlx::query_as(
        r#"
            INSERT INTO stadiums (owner_id, stadium_name, city, state, capacity, hourly_rate)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(owner_id)
    .bind(stadium.stadium_name)
    .bind(stadium.city)
    .bind(stadium.state)
    .bind(stadium.capacity)
    .bind(stadium.hourly_rate)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Stadium #{} ({}) registered by {owner_id}", stadium.id, stadium.stadium_name);
    Ok(stadium)
}

pub async fn fetch_stadium(stadium_id: i64, conn: &mut SqliteConnection) -> Result<Option<Stadium>, sqlx::Error> {
    let stadium =
        sqlx::query_as("SELECT * FROM stadiums WHERE id = $1").bind(stadium_id).fetch_optional(conn).await?;
    Ok(stadium)
}

pub async fn fetch_active_stadiums(conn: &mut SqliteConnection) -> Result<Vec<Stadium>, sqlx::Error> {
    let stadiums =
        sqlx::query_as("SELECT * FROM stadiums WHERE is_active = 1 ORDER BY stadium_name").fetch_all(conn).await?;
    Ok(stadiums)
}

pub async fn insert_tournament(
    organizer_id: &UserId,
    tournament: NewTournament,
    conn: &mut SqliteConnection,
) -> Result<Tournament, sqlx::Error> {
    let tournament: Tournament = sqlx::query_as(
        r#"
            INSERT INTO tournaments (
                organizer_id,
                tournament_name,
                match_format,
                start_date,
                end_date,
                max_teams,
                entry_fee
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(organizer_id)
    .bind(tournament.tournament_name)
    .bind(tournament.match_format)
    .bind(tournament.start_date)
    .bind(tournament.end_date)
    .bind(tournament.max_teams)
    .bind(tournament.entry_fee)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Tournament #{} ({}) created", tournament.id, tournament.tournament_name);
    Ok(tournament)
}

pub async fn fetch_tournaments(conn: &mut SqliteConnection) -> Result<Vec<Tournament>, sqlx::Error> {
    let tournaments = sqlx::query_as("SELECT * FROM tournaments ORDER BY start_date DESC").fetch_all(conn).await?;
    Ok(tournaments)
}
