use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Contract, ContractStatus, NewContract, NewNotification, UserId},
    events::EventProducers,
    helpers::notifications,
    traits::{ContractApiError, ContractManagement, LeagueManagement},
};

/// `ContractApi` manages player contracts, from the club's offer through the player's signature to termination.
pub struct ContractApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for ContractApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContractApi")
    }
}

impl<B> ContractApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> ContractApi<B>
where B: ContractManagement + LeagueManagement
{
    /// Offers a contract to a player on behalf of the caller's club. The player is notified.
    pub async fn create_contract(&self, caller: &UserId, contract: NewContract) -> Result<Contract, ContractApiError> {
        let owns_club = self.db.fetch_owned_club(caller).await?.is_some_and(|c| c.id == contract.club_id);
        if !owns_club {
            return Err(ContractApiError::Forbidden("You can only create contracts for your own club".into()));
        }
        if contract.contract_end_date < contract.contract_start_date {
            return Err(ContractApiError::ValidationError("Contract end date must be after the start date".into()));
        }
        if self.db.fetch_player(contract.player_id).await?.is_none() {
            return Err(ContractApiError::NotFound("Player not found".into()));
        }
        let created = self.db.insert_contract(caller, contract).await?;
        info!("📝️ Contract #{} offered to player #{} by club #{}", created.id, created.player_id, created.club_id);
        if let Some(parties) = self.db.fetch_contract_parties(created.id).await? {
            self.notify(notifications::contract_created(&created, &parties)).await?;
        }
        Ok(created)
    }

    /// Every contract the caller is party to, either as the player or as the owner of the club.
    pub async fn contracts_for(&self, caller: &UserId) -> Result<Vec<Contract>, ContractApiError> {
        let mut result = Vec::new();
        if let Some(player_id) = self.db.fetch_player_id_for_user(caller).await? {
            result.extend(self.db.fetch_contracts_for_player(player_id).await?);
        }
        if let Some(club) = self.db.fetch_owned_club(caller).await? {
            result.extend(self.db.fetch_contracts_for_club(club.id).await?);
        }
        Ok(result)
    }

    /// Signs a pending contract as the player it was offered to.
    ///
    /// The contract becomes active, the player joins the club and is taken off the scouting list, and the club owner
    /// is notified.
    pub async fn sign_contract(
        &self,
        caller: &UserId,
        contract_id: i64,
        signature: Option<&str>,
    ) -> Result<Contract, ContractApiError> {
        let signature = signature
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ContractApiError::ValidationError("Signature is required".into()))?;
        let contract = self.contract(contract_id).await?;
        let player_id = self.db.fetch_player_id_for_user(caller).await?;
        if player_id != Some(contract.player_id) {
            return Err(ContractApiError::Forbidden("You can only sign your own contracts".into()));
        }
        if contract.status != ContractStatus::Pending {
            return Err(ContractApiError::ValidationError("Only pending contracts can be signed".into()));
        }
        let signed = self.db.sign_contract(contract_id, signature).await?;
        info!("📝️ Contract #{contract_id} signed by player #{}", signed.player_id);
        if let Some(parties) = self.db.fetch_contract_parties(contract_id).await? {
            self.notify(notifications::contract_signed(&signed, &parties)).await?;
        }
        Ok(signed)
    }

    /// Terminates a pending or active contract. Only the owner of the contract's club may do so.
    pub async fn terminate_contract(
        &self,
        caller: &UserId,
        contract_id: i64,
        reason: Option<&str>,
    ) -> Result<Contract, ContractApiError> {
        let contract = self.contract(contract_id).await?;
        let owns_club = self.db.fetch_owned_club(caller).await?.is_some_and(|c| c.id == contract.club_id);
        if !owns_club {
            return Err(ContractApiError::Forbidden("Only the club owner can terminate this contract".into()));
        }
        if !matches!(contract.status, ContractStatus::Pending | ContractStatus::Active) {
            return Err(ContractApiError::ValidationError(format!("Cannot terminate a {} contract", contract.status)));
        }
        let reason = reason.map(str::trim).filter(|r| !r.is_empty()).unwrap_or("No reason provided");
        let terminated = self.db.terminate_contract(contract_id, caller, reason).await?;
        info!("📝️ Contract #{contract_id} terminated by {caller}");
        if let Some(parties) = self.db.fetch_contract_parties(contract_id).await? {
            self.notify(notifications::contract_terminated(&terminated, &parties, reason)).await?;
        }
        Ok(terminated)
    }

    async fn contract(&self, contract_id: i64) -> Result<Contract, ContractApiError> {
        self.db
            .fetch_contract(contract_id)
            .await?
            .ok_or_else(|| ContractApiError::NotFound("Contract not found".into()))
    }

    async fn notify(&self, notification: NewNotification) -> Result<(), ContractApiError> {
        let stored = self.db.insert_notifications(vec![notification]).await?;
        self.producers.publish_notifications(&stored).await;
        Ok(())
    }
}
