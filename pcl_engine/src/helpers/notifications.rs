//! Builders for the in-app notifications the league sends when matches, contracts and payments change.
use crate::db_types::{Booking, BookingType, Contract, ContractParties, Match, MatchParties, NewNotification, UserId};

/// Notifies the opposing club owner of a new challenge, and the stadium owner of the booking.
pub fn match_created(m: &Match, parties: &MatchParties) -> Vec<NewNotification> {
    let mut result = Vec::new();
    if let Some(owner) = &parties.away_owner_id {
        let message = format!(
            "{} has challenged {} to a {} match on {}",
            parties.home_team_name, parties.away_team_name, m.match_format, m.match_date
        );
        result.push(
            NewNotification::new(owner.clone(), "match_challenge", "⚽ New Match Challenge", message)
                .for_match(m.id)
                .with_action_url(format!("/dashboard/club-owner/matches/{}", m.id)),
        );
    }
    if let Some(owner) = &parties.stadium_owner_id {
        let stadium = parties.stadium_name.as_deref().unwrap_or("your stadium");
        let message = format!(
            "{stadium} has been booked for {} vs {} on {}",
            parties.home_team_name, parties.away_team_name, m.match_date
        );
        result.push(
            NewNotification::new(owner.clone(), "stadium_booked", "🏟️ Stadium Booked", message)
                .for_match(m.id)
                .with_action_url("/dashboard/stadium-owner/bookings"),
        );
    }
    result
}

/// Notifies everyone involved in a cancelled match except the person who cancelled it.
pub fn match_cancelled(m: &Match, parties: &MatchParties, canceled_by: &UserId, reason: &str) -> Vec<NewNotification> {
    let message = format!(
        "The match {} vs {} on {} has been cancelled. Reason: {reason}",
        parties.home_team_name, parties.away_team_name, m.match_date
    );
    let mut recipients: Vec<&UserId> = Vec::new();
    let candidates = [parties.home_owner_id.as_ref(), parties.away_owner_id.as_ref(), parties.stadium_owner_id.as_ref()]
        .into_iter()
        .flatten()
        .chain(parties.squad_user_ids.iter());
    for user in candidates {
        if user != canceled_by && !recipients.contains(&user) {
            recipients.push(user);
        }
    }
    recipients
        .into_iter()
        .map(|user| {
            NewNotification::new(user.clone(), "match_cancelled", "❌ Match Cancelled", message.clone())
                .for_match(m.id)
        })
        .collect()
}

pub fn contract_created(contract: &Contract, parties: &ContractParties) -> NewNotification {
    let message = format!("{} has sent you a contract offer", parties.club_name);
    NewNotification::new(
        parties.player_user_id.clone(),
        "contract_created",
        "📝 New Contract Offer",
        message,
    )
    .for_contract(contract.id)
    .with_action_url(format!("/dashboard/player/contracts/{}/view", contract.id))
}

pub fn contract_signed(contract: &Contract, parties: &ContractParties) -> NewNotification {
    let player = parties.player_name.as_deref().unwrap_or("Player");
    let message = format!("{player} has signed the contract for {}", parties.club_name);
    NewNotification::new(parties.club_owner_id.clone(), "contract_signed", "✅ Contract Signed", message)
        .for_contract(contract.id)
        .with_action_url(format!("/dashboard/club-owner/contracts/{}/view", contract.id))
}

pub fn contract_terminated(contract: &Contract, parties: &ContractParties, reason: &str) -> NewNotification {
    let message = format!("{} has terminated your contract. Reason: {reason}", parties.club_name);
    NewNotification::new(
        parties.player_user_id.clone(),
        "contract_terminated",
        "Contract Terminated",
        message,
    )
    .for_contract(contract.id)
}

pub fn payment_received(booking: &Booking, m: &Match) -> NewNotification {
    let what = match booking.booking_type {
        BookingType::Stadium => "stadium booking",
        BookingType::Referee => "refereeing",
        BookingType::Staff => "staff duty",
    };
    let message = format!("Payment of {} for {what} on {} has been confirmed", booking.net_payout, m.match_date);
    NewNotification::new(booking.resource_id.clone(), "payment_received", "💰 Payment Received", message)
        .for_match(m.id)
}
