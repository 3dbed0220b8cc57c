use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{Contract, ContractParties, NewContract, UserId};

pub async fn insert_contract(
    created_by: &UserId,
    contract: NewContract,
    conn: &mut SqliteConnection,
) -> Result<Contract, sqlx::Error> {
    let contract: Contract = sqlx::query_as(
        r#"
            INSERT INTO contracts (
                player_id,
                club_id,
                status,
                contract_start_date,
                contract_end_date,
                salary_monthly,
                position_assigned,
                jersey_number,
                terms_conditions,
                created_by
            ) VALUES ($1, $2, 'pending', $3, $4, $5, $6, $7, $8, $9)
            RETURNING *;
        "#,
    )
    .bind(contract.player_id)
    .bind(contract.club_id)
    .bind(contract.contract_start_date)
    .bind(contract.contract_end_date)
    .bind(contract.salary_monthly)
    .bind(contract.position_assigned)
    .bind(contract.jersey_number)
    .bind(contract.terms_conditions)
    .bind(created_by)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Contract #{} offered to player #{} by club #{}", contract.id, contract.player_id, contract.club_id);
    Ok(contract)
}

pub async fn fetch_contract(contract_id: i64, conn: &mut SqliteConnection) -> Result<Option<Contract>, sqlx::Error> {
    let contract =
        sqlx::query_as("SELECT * FROM contracts WHERE id = $1").bind(contract_id).fetch_optional(conn).await?;
    Ok(contract)
}

pub async fn fetch_contract_parties(
    contract_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<ContractParties>, sqlx::Error> {
    let parties = sqlx::query_as(
        r#"
            SELECT
                players.user_id AS player_user_id,
                COALESCE(
                    NULLIF(TRIM(users.full_name), ''),
                    NULLIF(TRIM(COALESCE(users.first_name, '') || ' ' || COALESCE(users.last_name, '')), '')
                ) AS player_name,
                clubs.owner_id AS club_owner_id,
                clubs.club_name AS club_name
            FROM contracts
                JOIN players ON players.id = contracts.player_id
                JOIN clubs ON clubs.id = contracts.club_id
                LEFT JOIN users ON users.id = players.user_id
            WHERE contracts.id = $1
        "#,
    )
    .bind(contract_id)
    .fetch_optional(conn)
    .await?;
    Ok(parties)
}

pub async fn fetch_contracts_for_player(
    player_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Contract>, sqlx::Error> {
    let contracts = sqlx::query_as("SELECT * FROM contracts WHERE player_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(player_id)
        .fetch_all(conn)
        .await?;
    Ok(contracts)
}

pub async fn fetch_contracts_for_club(club_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Contract>, sqlx::Error> {
    let contracts = sqlx::query_as("SELECT * FROM contracts WHERE club_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(club_id)
        .fetch_all(conn)
        .await?;
    Ok(contracts)
}

/// Applies the player's signature to a pending contract and activates it. Returns `None` if the contract is not
/// pending.
pub async fn sign_contract(
    contract_id: i64,
    signature: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Contract>, sqlx::Error> {
    let now = Utc::now();
    let contract = sqlx::query_as(
        r#"
            UPDATE contracts SET
                status = 'active',
                signing_status = 'fully_signed',
                player_signature_timestamp = $2,
                player_signature_data = $3,
                read_by_player = 1,
                player_read_at = COALESCE(player_read_at, $2),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND status = 'pending'
            RETURNING *;
        "#,
    )
    .bind(contract_id)
    .bind(now)
    .bind(signature)
    .fetch_optional(conn)
    .await?;
    Ok(contract)
}

pub async fn terminate_contract(
    contract_id: i64,
    terminated_by: &UserId,
    reason: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Contract>, sqlx::Error> {
    let contract = sqlx::query_as(
        r#"
            UPDATE contracts SET
                status = 'terminated',
                terminated_at = $2,
                terminated_by = $3,
                termination_reason = $4,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#,
    )
    .bind(contract_id)
    .bind(Utc::now())
    .bind(terminated_by)
    .bind(reason)
    .fetch_optional(conn)
    .await?;
    debug!("🗃️ Contract #{contract_id} terminated by {terminated_by}");
    Ok(contract)
}
