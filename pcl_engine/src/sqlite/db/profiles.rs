use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Player, PlayerProfile, Referee, RefereeProfile, Staff, StaffProfile, UserId},
    helpers::{new_player_id, new_referee_id, new_staff_id, AadhaarAddress},
};

pub async fn upsert_player(
    user_id: &UserId,
    profile: PlayerProfile,
    conn: &mut SqliteConnection,
) -> Result<Player, sqlx::Error> {
    let player: Player = sqlx::query_as(
        r#"
            INSERT INTO players (user_id, unique_player_id, position, jersey_number, date_of_birth, nationality)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                position = COALESCE(excluded.position, players.position),
                jersey_number = COALESCE(excluded.jersey_number, players.jersey_number),
                date_of_birth = COALESCE(excluded.date_of_birth, players.date_of_birth),
                nationality = COALESCE(excluded.nationality, players.nationality),
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(user_id)
    .bind(new_player_id())
    .bind(profile.position)
    .bind(profile.jersey_number)
    .bind(profile.date_of_birth)
    .bind(profile.nationality)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Player profile {} saved for {user_id}", player.unique_player_id);
    Ok(player)
}

pub async fn fetch_player(player_id: i64, conn: &mut SqliteConnection) -> Result<Option<Player>, sqlx::Error> {
    let player = sqlx::query_as("SELECT * FROM players WHERE id = $1").bind(player_id).fetch_optional(conn).await?;
    Ok(player)
}

pub async fn fetch_player_by_user(
    user_id: &UserId,
    conn: &mut SqliteConnection,
) -> Result<Option<Player>, sqlx::Error> {
    let player =
        sqlx::query_as("SELECT * FROM players WHERE user_id = $1").bind(user_id).fetch_optional(conn).await?;
    Ok(player)
}

pub async fn fetch_scoutable_players(conn: &mut SqliteConnection) -> Result<Vec<Player>, sqlx::Error> {
    let players = sqlx::query_as("SELECT * FROM players WHERE is_available_for_scout = 1 ORDER BY updated_at DESC")
        .fetch_all(conn)
        .await?;
    Ok(players)
}

/// Copies the verified identity details onto the player profile and makes the player visible to scouts.
/// A profile is created if the player does not have one yet.
pub async fn apply_player_kyc(
    user_id: &UserId,
    date_of_birth: Option<&str>,
    address: &AadhaarAddress,
    conn: &mut SqliteConnection,
) -> Result<Player, sqlx::Error> {
    let player: Player = sqlx::query_as(
        r#"
            INSERT INTO players (
                user_id,
                unique_player_id,
                date_of_birth,
                nationality,
                address,
                district,
                state,
                pincode,
                is_available_for_scout
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1)
            ON CONFLICT (user_id) DO UPDATE SET
                date_of_birth = COALESCE(players.date_of_birth, excluded.date_of_birth),
                nationality = COALESCE(excluded.nationality, players.nationality),
                address = COALESCE(excluded.address, players.address),
                district = COALESCE(excluded.district, players.district),
                state = COALESCE(excluded.state, players.state),
                pincode = COALESCE(excluded.pincode, players.pincode),
                is_available_for_scout = 1,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(user_id)
    .bind(new_player_id())
    .bind(date_of_birth)
    .bind(&address.country)
    .bind(&address.full_address)
    .bind(&address.district)
    .bind(&address.state)
    .bind(&address.pincode)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Player {} is now available for scouting", player.unique_player_id);
    Ok(player)
}

/// Moves the player to a new club. Signed players are no longer listed for scouting.
pub async fn set_player_club(player_id: i64, club_id: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
            UPDATE players SET
                current_club_id = $2,
                is_available_for_scout = 0,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
        "#,
    )
    .bind(player_id)
    .bind(club_id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn upsert_referee(
    user_id: &UserId,
    profile: RefereeProfile,
    conn: &mut SqliteConnection,
) -> Result<Referee, sqlx::Error> {
    let referee: Referee = sqlx::query_as(
        r#"
            INSERT INTO referees (user_id, unique_referee_id, certification_level, experience_years)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                certification_level = COALESCE(excluded.certification_level, referees.certification_level),
                experience_years = excluded.experience_years,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(user_id)
    .bind(new_referee_id())
    .bind(profile.certification_level)
    .bind(profile.experience_years)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Referee profile {} saved for {user_id}", referee.unique_referee_id);
    Ok(referee)
}

pub async fn upsert_staff(
    user_id: &UserId,
    profile: StaffProfile,
    conn: &mut SqliteConnection,
) -> Result<Staff, sqlx::Error> {
    let staff: Staff = sqlx::query_as(
        r#"
            INSERT INTO staff (user_id, unique_staff_id, role_type, experience_years)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                role_type = COALESCE(excluded.role_type, staff.role_type),
                experience_years = excluded.experience_years,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(user_id)
    .bind(new_staff_id())
    .bind(profile.role_type)
    .bind(profile.experience_years)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Staff profile {} saved for {user_id}", staff.unique_staff_id);
    Ok(staff)
}
