use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;

use crate::{
    db_types::{Match, NewMatch, NewNotification, PaymentStatus, UserId, UserRole},
    events::EventProducers,
    helpers::{calculate_refund_amount, notifications, RefundQuote},
    traits::{LeagueManagement, MatchApiError, MatchManagement},
};

pub const DEFAULT_CANCELLATION_REASON: &str = "No reason provided";

/// `MatchApi` schedules matches between clubs and handles their cancellation.
pub struct MatchApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for MatchApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MatchApi")
    }
}

impl<B> MatchApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> MatchApi<B>
where B: MatchManagement + LeagueManagement
{
    /// Challenges another club to a match. The home team must belong to the caller's club.
    ///
    /// The opposing club owner and the stadium owner are notified.
    pub async fn create_match(&self, caller: &UserId, new_match: NewMatch) -> Result<Match, MatchApiError> {
        let club = self
            .db
            .fetch_owned_club(caller)
            .await?
            .ok_or_else(|| MatchApiError::NotFound("Club not found".into()))?;
        if new_match.home_team_id == new_match.away_team_id {
            return Err(MatchApiError::ValidationError("A team cannot play against itself".into()));
        }
        let home = self
            .db
            .fetch_team(new_match.home_team_id)
            .await?
            .ok_or_else(|| MatchApiError::NotFound("Home team not found".into()))?;
        if home.club_id != club.id {
            return Err(MatchApiError::Forbidden("You can only create matches for your own teams".into()));
        }
        if self.db.fetch_team(new_match.away_team_id).await?.is_none() {
            return Err(MatchApiError::NotFound("Away team not found".into()));
        }
        let created = self.db.insert_match(caller, new_match).await?;
        info!("⚽️ Match #{} created by {caller}", created.id);
        if let Some(parties) = self.db.fetch_match_parties(created.id).await? {
            self.notify(notifications::match_created(&created, &parties)).await?;
        }
        Ok(created)
    }

    pub async fn fetch_match(&self, match_id: i64) -> Result<Option<Match>, MatchApiError> {
        self.db.fetch_match(match_id).await
    }

    /// Cancels a pending or scheduled match.
    ///
    /// Only the owner of one of the two clubs may cancel. Everyone else involved (the other club owner, the stadium
    /// owner and both squads) is notified.
    pub async fn cancel_match(
        &self,
        caller: &UserId,
        match_id: Option<i64>,
        reason: Option<&str>,
    ) -> Result<Match, MatchApiError> {
        let match_id = match_id.ok_or_else(|| MatchApiError::ValidationError("Match ID is required".into()))?;
        let existing =
            self.db.fetch_match(match_id).await?.ok_or_else(|| MatchApiError::NotFound("Match not found".into()))?;
        let is_club_owner = self.db.fetch_user(caller).await?.is_some_and(|u| u.role == UserRole::ClubOwner);
        if !is_club_owner {
            return Err(MatchApiError::Forbidden("Only club owners can cancel matches".into()));
        }
        let club = self
            .db
            .fetch_owned_club(caller)
            .await?
            .ok_or_else(|| MatchApiError::NotFound("Club not found".into()))?;
        let parties = self
            .db
            .fetch_match_parties(match_id)
            .await?
            .ok_or_else(|| MatchApiError::NotFound("Match not found".into()))?;
        if club.id != parties.home_club_id && club.id != parties.away_club_id {
            return Err(MatchApiError::Forbidden("You can only cancel matches involving your club".into()));
        }
        if !existing.status.is_cancellable() {
            return Err(MatchApiError::ValidationError("Cannot cancel completed or ongoing matches".into()));
        }
        let reason = reason.map(str::trim).filter(|r| !r.is_empty()).unwrap_or(DEFAULT_CANCELLATION_REASON);
        let cancelled = self.db.cancel_match(match_id, caller, reason).await?;
        info!("⚽️ Match #{match_id} cancelled by {caller}: {reason}");
        self.notify(notifications::match_cancelled(&cancelled, &parties, caller, reason)).await?;
        Ok(cancelled)
    }

    /// Quotes the refund due if the match were cancelled at `at`, according to the cancellation policy.
    pub async fn refund_quote(&self, match_id: i64, at: DateTime<Utc>) -> Result<RefundQuote, MatchApiError> {
        let m =
            self.db.fetch_match(match_id).await?.ok_or_else(|| MatchApiError::NotFound("Match not found".into()))?;
        let payment = self
            .db
            .fetch_payment_for_match(match_id)
            .await?
            .filter(|p| p.status == PaymentStatus::Completed)
            .ok_or_else(|| MatchApiError::ValidationError("Match has no completed payment".into()))?;
        let kickoff = m.kickoff().ok_or_else(|| MatchApiError::ValidationError("Invalid match date".into()))?;
        Ok(calculate_refund_amount(payment.amount, kickoff, at))
    }

    async fn notify(&self, new_notifications: Vec<NewNotification>) -> Result<(), MatchApiError> {
        if new_notifications.is_empty() {
            return Ok(());
        }
        let stored = self.db.insert_notifications(new_notifications).await?;
        debug!("⚽️ {} match notifications stored", stored.len());
        self.producers.publish_notifications(&stored).await;
        Ok(())
    }
}
