//! `SqliteDatabase` is a concrete implementation of a PCL league backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`traits`] module.
//!
//! [`traits`]: crate::traits
use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;
use sqlx::SqlitePool;

use super::db::{
    clubs,
    contact,
    contracts,
    db_url,
    kyc,
    matches,
    new_pool,
    notifications,
    payments,
    profiles,
    users,
    venues,
};
use crate::{
    db_types::{
        AadhaarRequest,
        BankVerificationRecord,
        CapturedPayment,
        Club,
        ContactSubmission,
        Contract,
        ContractParties,
        FailedPayment,
        Match,
        MatchParties,
        NewAadhaarRequest,
        NewClub,
        NewContactSubmission,
        NewContract,
        NewMatch,
        NewNotification,
        NewPayment,
        NewPayoutAccount,
        NewStadium,
        NewTeam,
        NewTournament,
        NewUser,
        Notification,
        Payment,
        PaymentStatus,
        PayoutAccount,
        PayoutSummary,
        Player,
        PlayerProfile,
        ProcessedRefund,
        PushToken,
        Referee,
        RefereeProfile,
        Stadium,
        Staff,
        StaffProfile,
        Team,
        Tournament,
        UploadedDocument,
        User,
        UserId,
        UserRole,
    },
    helpers::{notifications::payment_received, payout_period, plan_bookings, plan_payout_credits, Payees},
    traits::{
        AadhaarVerification,
        AccountApiError,
        AccountManagement,
        CaptureResult,
        ContractApiError,
        ContractManagement,
        KycApiError,
        KycManagement,
        LeagueApiError,
        LeagueManagement,
        MatchApiError,
        MatchManagement,
        NotificationApiError,
        NotificationManagement,
        PaymentGatewayDatabase,
        PaymentGatewayError,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object, using `PCL_DATABASE_URL` or the default database location.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Brings the schema up to date. Migrations that have already been applied are skipped.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        debug!("🗃️ Database schema at {} is up to date", self.url);
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl AccountManagement for SqliteDatabase {
    async fn fetch_user(&self, user_id: &UserId) -> Result<Option<User>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user(user_id, &mut conn).await?;
        Ok(user)
    }

    async fn upsert_user(&self, user: NewUser) -> Result<User, AccountApiError> {
        let mut tx = self.pool.begin().await?;
        let user = users::upsert_user(user, &mut tx).await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn fetch_owned_club(&self, owner_id: &UserId) -> Result<Option<Club>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let club = clubs::fetch_club_by_owner(owner_id, &mut conn).await?;
        Ok(club)
    }

    async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<User, AccountApiError> {
        let mut tx = self.pool.begin().await?;
        let user = users::set_user_active(user_id, is_active, &mut tx)
            .await?
            .ok_or_else(|| AccountApiError::UserNotFound(user_id.clone()))?;
        tx.commit().await?;
        Ok(user)
    }
}

impl LeagueManagement for SqliteDatabase {
    async fn insert_club(&self, owner_id: &UserId, club: NewClub) -> Result<Club, LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        let club = clubs::insert_club(owner_id, club, &mut tx).await?;
        tx.commit().await?;
        Ok(club)
    }

    async fn update_club(&self, club_id: i64, club: NewClub) -> Result<Club, LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        let club = clubs::update_club(club_id, club, &mut tx).await?.ok_or(LeagueApiError::ClubNotFound(club_id))?;
        tx.commit().await?;
        Ok(club)
    }

    async fn fetch_club(&self, club_id: i64) -> Result<Option<Club>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let club = clubs::fetch_club(club_id, &mut conn).await?;
        Ok(club)
    }

    async fn fetch_clubs(&self) -> Result<Vec<Club>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let clubs = clubs::fetch_active_clubs(&mut conn).await?;
        Ok(clubs)
    }

    async fn fetch_clubs_for_review(&self) -> Result<Vec<Club>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let clubs = clubs::fetch_clubs_for_review(&mut conn).await?;
        Ok(clubs)
    }

    async fn review_club(&self, club_id: i64, approved: bool) -> Result<Club, LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        let club =
            clubs::review_club(club_id, approved, &mut tx).await?.ok_or(LeagueApiError::ClubNotFound(club_id))?;
        tx.commit().await?;
        Ok(club)
    }

    async fn insert_team(&self, club_id: i64, team: NewTeam) -> Result<Team, LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        if clubs::fetch_club(club_id, &mut tx).await?.is_none() {
            return Err(LeagueApiError::ClubNotFound(club_id));
        }
        let team = clubs::insert_team(club_id, team, &mut tx).await?;
        tx.commit().await?;
        Ok(team)
    }

    async fn fetch_team(&self, team_id: i64) -> Result<Option<Team>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let team = clubs::fetch_team(team_id, &mut conn).await?;
        Ok(team)
    }

    async fn fetch_teams_for_club(&self, club_id: i64) -> Result<Vec<Team>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let teams = clubs::fetch_teams_for_club(club_id, &mut conn).await?;
        Ok(teams)
    }

    async fn add_player_to_squad(&self, team_id: i64, player_id: i64) -> Result<(), LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        if clubs::fetch_team(team_id, &mut tx).await?.is_none() {
            return Err(LeagueApiError::TeamNotFound(team_id));
        }
        if profiles::fetch_player(player_id, &mut tx).await?.is_none() {
            return Err(LeagueApiError::PlayerNotFound(player_id));
        }
        clubs::add_to_squad(team_id, player_id, &mut tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn upsert_player(&self, user_id: &UserId, profile: PlayerProfile) -> Result<Player, LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        let player = profiles::upsert_player(user_id, profile, &mut tx).await?;
        tx.commit().await?;
        Ok(player)
    }

    async fn fetch_player(&self, player_id: i64) -> Result<Option<Player>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let player = profiles::fetch_player(player_id, &mut conn).await?;
        Ok(player)
    }

    async fn fetch_player_for_user(&self, user_id: &UserId) -> Result<Option<Player>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let player = profiles::fetch_player_by_user(user_id, &mut conn).await?;
        Ok(player)
    }

    async fn fetch_scoutable_players(&self) -> Result<Vec<Player>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let players = profiles::fetch_scoutable_players(&mut conn).await?;
        Ok(players)
    }

    async fn upsert_referee(&self, user_id: &UserId, profile: RefereeProfile) -> Result<Referee, LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        let referee = profiles::upsert_referee(user_id, profile, &mut tx).await?;
        tx.commit().await?;
        Ok(referee)
    }

    async fn upsert_staff(&self, user_id: &UserId, profile: StaffProfile) -> Result<Staff, LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        let staff = profiles::upsert_staff(user_id, profile, &mut tx).await?;
        tx.commit().await?;
        Ok(staff)
    }

    async fn insert_stadium(&self, owner_id: &UserId, stadium: NewStadium) -> Result<Stadium, LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        let stadium = venues::insert_stadium(owner_id, stadium, &mut tx).await?;
        tx.commit().await?;
        Ok(stadium)
    }

    async fn fetch_stadium(&self, stadium_id: i64) -> Result<Option<Stadium>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let stadium = venues::fetch_stadium(stadium_id, &mut conn).await?;
        Ok(stadium)
    }

    async fn fetch_stadiums(&self) -> Result<Vec<Stadium>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let stadiums = venues::fetch_active_stadiums(&mut conn).await?;
        Ok(stadiums)
    }

    async fn insert_tournament(
        &self,
        organizer_id: &UserId,
        tournament: NewTournament,
    ) -> Result<Tournament, LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        let tournament = venues::insert_tournament(organizer_id, tournament, &mut tx).await?;
        tx.commit().await?;
        Ok(tournament)
    }

    async fn fetch_tournaments(&self) -> Result<Vec<Tournament>, LeagueApiError> {
        let mut conn = self.pool.acquire().await?;
        let tournaments = venues::fetch_tournaments(&mut conn).await?;
        Ok(tournaments)
    }

    async fn insert_contact_submission(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission, LeagueApiError> {
        let mut tx = self.pool.begin().await?;
        let submission = contact::insert_submission(submission, &mut tx).await?;
        tx.commit().await?;
        Ok(submission)
    }
}

impl PaymentGatewayDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_pending_payment(&self, payment: NewPayment) -> Result<Payment, PaymentGatewayError> {
        let mut tx = self.pool.begin().await?;
        let (payment, inserted) = payments::idempotent_insert(payment, &mut tx).await?;
        if !inserted {
            debug!("🗃️ Payment for order {} already exists. Nothing to do.", payment.razorpay_order_id);
        }
        tx.commit().await?;
        Ok(payment)
    }

    async fn fetch_payment_by_order_id(&self, order_id: &str) -> Result<Option<Payment>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let payment = payments::fetch_payment_by_order_id(order_id, &mut conn).await?;
        Ok(payment)
    }

    async fn fetch_payment_by_payment_id(&self, payment_id: &str) -> Result<Option<Payment>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let payment = payments::fetch_payment_by_payment_id(payment_id, &mut conn).await?;
        Ok(payment)
    }

    async fn process_captured_payment(
        &self,
        capture: CapturedPayment,
    ) -> Result<Option<CaptureResult>, PaymentGatewayError> {
        let mut tx = self.pool.begin().await?;
        let Some(payment) = payments::fetch_payment_by_order_id(&capture.razorpay_order_id, &mut tx).await? else {
            warn!("🗃️ No payment record for order {}. The capture is ignored.", capture.razorpay_order_id);
            return Ok(None);
        };
        if payment.status == PaymentStatus::Completed {
            info!("🗃️ Payment #{} has already been captured. Nothing to do.", payment.id);
            let bookings = payments::fetch_bookings_for_payment(payment.id, &mut tx).await?;
            return Ok(Some(CaptureResult { payment, bookings, notifications: vec![], redelivered: true }));
        }
        let payment = payments::mark_payment_completed(payment.id, &capture, &mut tx).await?;
        let mut bookings = Vec::new();
        let mut new_notifications = Vec::new();
        if let Some(match_id) = payment.match_id {
            let m =
                matches::fetch_match(match_id, &mut tx).await?.ok_or(PaymentGatewayError::MatchNotFound(match_id))?;
            let stadium_owner = match m.stadium_id {
                Some(id) => venues::fetch_stadium(id, &mut tx).await?.map(|s| s.owner_id),
                None => None,
            };
            let staff = matches::fetch_staff_user_ids(match_id, &mut tx).await?;
            let payees = Payees { stadium_owner, referee: m.referee_user_id.clone(), staff };
            let breakdown = payment.breakdown();
            for booking in plan_bookings(&breakdown, &payees) {
                let booking = payments::insert_booking(payment.id, match_id, booking, &mut tx).await?;
                trace!("🗃️ {:?} booking #{} created for {}", booking.booking_type, booking.id, booking.resource_id);
                bookings.push(booking);
            }
            matches::mark_match_paid(match_id, payment.id, &mut tx).await?;
            let period = payout_period(Utc::now());
            for credit in plan_payout_credits(&breakdown, &payees) {
                payments::credit_payout(&credit, period, &mut tx).await?;
            }
            for booking in &bookings {
                let notification = notifications::insert_notification(payment_received(booking, &m), &mut tx).await?;
                new_notifications.push(notification);
            }
        }
        tx.commit().await?;
        debug!(
            "🗃️ Payment #{} captured. {} bookings and {} notifications created",
            payment.id,
            bookings.len(),
            new_notifications.len()
        );
        Ok(Some(CaptureResult { payment, bookings, notifications: new_notifications, redelivered: false }))
    }

    async fn process_failed_payment(&self, failure: FailedPayment) -> Result<Option<Payment>, PaymentGatewayError> {
        let mut tx = self.pool.begin().await?;
        let payment = payments::mark_payment_failed(&failure, &mut tx).await?;
        if payment.is_none() {
            match payments::fetch_payment_by_order_id(&failure.razorpay_order_id, &mut tx).await? {
                Some(p) => info!("🗃️ Payment #{} is already {}. The failure event is ignored.", p.id, p.status),
                None => warn!("🗃️ No payment record for failed order {}", failure.razorpay_order_id),
            }
        }
        tx.commit().await?;
        Ok(payment)
    }

    async fn process_refund(&self, refund: ProcessedRefund) -> Result<Option<Payment>, PaymentGatewayError> {
        let mut tx = self.pool.begin().await?;
        let Some(payment) = payments::fetch_payment_by_payment_id(&refund.razorpay_payment_id, &mut tx).await? else {
            warn!("🗃️ No payment record for refunded payment {}", refund.razorpay_payment_id);
            return Ok(None);
        };
        if !payments::record_refund(payment.id, &refund, &mut tx).await? {
            info!("🗃️ Refund {} has already been applied to payment #{}", refund.razorpay_refund_id, payment.id);
            return Ok(Some(payment));
        }
        let cancelled = payments::cancel_bookings(&payment, refund.amount, &mut tx).await?;
        let payment = payments::apply_refund(&payment, refund.amount, &refund.webhook_data, &mut tx).await?;
        if let Some(match_id) = payment.match_id {
            matches::mark_match_refunded(match_id, &mut tx).await?;
        }
        tx.commit().await?;
        let refund_id = refund.razorpay_refund_id;
        debug!("🗃️ Refund {refund_id} applied to payment #{}. {cancelled} bookings cancelled", payment.id);
        Ok(Some(payment))
    }

    async fn fetch_payout_summaries(&self, user_id: &UserId) -> Result<Vec<PayoutSummary>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let summaries = payments::fetch_payout_summaries(user_id, &mut conn).await?;
        Ok(summaries)
    }
}

impl KycManagement for SqliteDatabase {
    async fn fetch_verified_player_with_aadhaar(
        &self,
        aadhaar_number: &str,
        user_id: &UserId,
    ) -> Result<Option<User>, KycApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_aadhaar(aadhaar_number, user_id, Some(UserRole::Player), &mut conn).await?;
        Ok(user)
    }

    async fn fetch_user_with_aadhaar(
        &self,
        aadhaar_number: &str,
        user_id: &UserId,
    ) -> Result<Option<User>, KycApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_aadhaar(aadhaar_number, user_id, None, &mut conn).await?;
        Ok(user)
    }

    async fn insert_aadhaar_request(&self, request: NewAadhaarRequest) -> Result<AadhaarRequest, KycApiError> {
        let mut tx = self.pool.begin().await?;
        let request = kyc::insert_aadhaar_request(request, &mut tx).await?;
        tx.commit().await?;
        Ok(request)
    }

    async fn fetch_pending_aadhaar_request(
        &self,
        user_id: &UserId,
        request_id: &str,
    ) -> Result<Option<AadhaarRequest>, KycApiError> {
        let mut conn = self.pool.acquire().await?;
        let request = kyc::fetch_pending_aadhaar_request(user_id, request_id, &mut conn).await?;
        Ok(request)
    }

    async fn complete_aadhaar_verification(&self, verification: AadhaarVerification) -> Result<User, KycApiError> {
        let mut tx = self.pool.begin().await?;
        let existing = users::fetch_user(&verification.user_id, &mut tx).await?.ok_or(KycApiError::UserNotFound)?;
        let user = users::apply_aadhaar_verification(&existing, &verification, &mut tx).await?;
        if verification.update_player {
            let dob = verification.date_of_birth.as_deref();
            profiles::apply_player_kyc(&verification.user_id, dob, &verification.address, &mut tx).await?;
        }
        if let Some(club_id) = verification.club_id {
            clubs::mark_club_kyc_verified(club_id, &verification.address, &mut tx).await?;
        }
        let doc_id = users::insert_aadhaar_document(&verification, &mut tx).await?;
        kyc::mark_aadhaar_request_verified(&verification.request_id, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Aadhaar verification for {} stored as document #{doc_id}", user.id);
        Ok(user)
    }

    async fn expire_aadhaar_requests(&self, cutoff: DateTime<Utc>) -> Result<Vec<AadhaarRequest>, KycApiError> {
        let mut tx = self.pool.begin().await?;
        let expired = kyc::expire_aadhaar_requests(cutoff, &mut tx).await?;
        tx.commit().await?;
        Ok(expired)
    }

    async fn record_club_documents(
        &self,
        club: &Club,
        documents: Vec<UploadedDocument>,
    ) -> Result<Club, KycApiError> {
        let mut tx = self.pool.begin().await?;
        let club = clubs::record_documents(club, &documents, &mut tx).await?;
        tx.commit().await?;
        Ok(club)
    }

    async fn insert_payout_account(
        &self,
        user_id: &UserId,
        account: NewPayoutAccount,
    ) -> Result<PayoutAccount, KycApiError> {
        let mut tx = self.pool.begin().await?;
        let account = kyc::insert_payout_account(user_id, account, &mut tx).await?;
        tx.commit().await?;
        Ok(account)
    }

    async fn fetch_payout_account(&self, account_id: i64) -> Result<Option<PayoutAccount>, KycApiError> {
        let mut conn = self.pool.acquire().await?;
        let account = kyc::fetch_payout_account(account_id, &mut conn).await?;
        Ok(account)
    }

    async fn fetch_payout_accounts(&self, user_id: &UserId) -> Result<Vec<PayoutAccount>, KycApiError> {
        let mut conn = self.pool.acquire().await?;
        let accounts = kyc::fetch_payout_accounts(user_id, &mut conn).await?;
        Ok(accounts)
    }

    async fn update_payout_account(
        &self,
        account_id: i64,
        account: NewPayoutAccount,
    ) -> Result<PayoutAccount, KycApiError> {
        let mut tx = self.pool.begin().await?;
        let account = kyc::update_payout_account(account_id, account, &mut tx)
            .await?
            .ok_or_else(|| KycApiError::NotFound("Bank account not found".into()))?;
        tx.commit().await?;
        Ok(account)
    }

    async fn record_bank_verification(
        &self,
        account_id: i64,
        record: BankVerificationRecord,
    ) -> Result<PayoutAccount, KycApiError> {
        let mut tx = self.pool.begin().await?;
        let account = kyc::record_bank_verification(account_id, record, &mut tx)
            .await?
            .ok_or_else(|| KycApiError::NotFound("Bank account not found".into()))?;
        tx.commit().await?;
        Ok(account)
    }
}

impl MatchManagement for SqliteDatabase {
    async fn insert_match(&self, created_by: &UserId, new_match: NewMatch) -> Result<Match, MatchApiError> {
        let mut tx = self.pool.begin().await?;
        let m = matches::insert_match(created_by, new_match, &mut tx).await?;
        tx.commit().await?;
        Ok(m)
    }

    async fn fetch_match(&self, match_id: i64) -> Result<Option<Match>, MatchApiError> {
        let mut conn = self.pool.acquire().await?;
        let m = matches::fetch_match(match_id, &mut conn).await?;
        Ok(m)
    }

    async fn fetch_match_parties(&self, match_id: i64) -> Result<Option<MatchParties>, MatchApiError> {
        let mut conn = self.pool.acquire().await?;
        let parties = matches::fetch_match_parties(match_id, &mut conn).await?;
        Ok(parties)
    }

    async fn cancel_match(&self, match_id: i64, canceled_by: &UserId, reason: &str) -> Result<Match, MatchApiError> {
        let mut tx = self.pool.begin().await?;
        let m = matches::cancel_match(match_id, canceled_by, reason, &mut tx)
            .await?
            .ok_or_else(|| MatchApiError::NotFound("Match not found".into()))?;
        tx.commit().await?;
        Ok(m)
    }

    async fn fetch_payment_for_match(&self, match_id: i64) -> Result<Option<Payment>, MatchApiError> {
        let mut conn = self.pool.acquire().await?;
        let payment = payments::fetch_latest_payment_for_match(match_id, &mut conn).await?;
        Ok(payment)
    }
}

impl ContractManagement for SqliteDatabase {
    async fn insert_contract(&self, created_by: &UserId, contract: NewContract) -> Result<Contract, ContractApiError> {
        let mut tx = self.pool.begin().await?;
        let contract = contracts::insert_contract(created_by, contract, &mut tx).await?;
        tx.commit().await?;
        Ok(contract)
    }

    async fn fetch_contract(&self, contract_id: i64) -> Result<Option<Contract>, ContractApiError> {
        let mut conn = self.pool.acquire().await?;
        let contract = contracts::fetch_contract(contract_id, &mut conn).await?;
        Ok(contract)
    }

    async fn fetch_contract_parties(&self, contract_id: i64) -> Result<Option<ContractParties>, ContractApiError> {
        let mut conn = self.pool.acquire().await?;
        let parties = contracts::fetch_contract_parties(contract_id, &mut conn).await?;
        Ok(parties)
    }

    async fn fetch_player_id_for_user(&self, user_id: &UserId) -> Result<Option<i64>, ContractApiError> {
        let mut conn = self.pool.acquire().await?;
        let player = profiles::fetch_player_by_user(user_id, &mut conn).await?;
        Ok(player.map(|p| p.id))
    }

    async fn fetch_contracts_for_player(&self, player_id: i64) -> Result<Vec<Contract>, ContractApiError> {
        let mut conn = self.pool.acquire().await?;
        let contracts = contracts::fetch_contracts_for_player(player_id, &mut conn).await?;
        Ok(contracts)
    }

    async fn fetch_contracts_for_club(&self, club_id: i64) -> Result<Vec<Contract>, ContractApiError> {
        let mut conn = self.pool.acquire().await?;
        let contracts = contracts::fetch_contracts_for_club(club_id, &mut conn).await?;
        Ok(contracts)
    }

    async fn sign_contract(&self, contract_id: i64, signature: &str) -> Result<Contract, ContractApiError> {
        let mut tx = self.pool.begin().await?;
        if contracts::fetch_contract(contract_id, &mut tx).await?.is_none() {
            return Err(ContractApiError::NotFound("Contract not found".into()));
        }
        let contract = contracts::sign_contract(contract_id, signature, &mut tx)
            .await?
            .ok_or_else(|| ContractApiError::ValidationError("Only pending contracts can be signed".into()))?;
        profiles::set_player_club(contract.player_id, contract.club_id, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Contract #{contract_id} signed. Player #{} joined club #{}", contract.player_id, contract.club_id);
        Ok(contract)
    }

    async fn terminate_contract(
        &self,
        contract_id: i64,
        terminated_by: &UserId,
        reason: &str,
    ) -> Result<Contract, ContractApiError> {
        let mut tx = self.pool.begin().await?;
        let contract = contracts::terminate_contract(contract_id, terminated_by, reason, &mut tx)
            .await?
            .ok_or_else(|| ContractApiError::NotFound("Contract not found".into()))?;
        tx.commit().await?;
        Ok(contract)
    }
}

impl NotificationManagement for SqliteDatabase {
    async fn insert_notifications(
        &self,
        new_notifications: Vec<NewNotification>,
    ) -> Result<Vec<Notification>, NotificationApiError> {
        let mut tx = self.pool.begin().await?;
        let mut result = Vec::with_capacity(new_notifications.len());
        for notification in new_notifications {
            result.push(notifications::insert_notification(notification, &mut tx).await?);
        }
        tx.commit().await?;
        Ok(result)
    }

    async fn fetch_notifications(&self, user_id: &UserId) -> Result<Vec<Notification>, NotificationApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = notifications::fetch_notifications(user_id, &mut conn).await?;
        Ok(result)
    }

    async fn mark_notification_read(
        &self,
        notification_id: i64,
        user_id: &UserId,
    ) -> Result<Option<Notification>, NotificationApiError> {
        let mut tx = self.pool.begin().await?;
        let notification = notifications::mark_read(notification_id, user_id, &mut tx).await?;
        tx.commit().await?;
        Ok(notification)
    }

    async fn upsert_push_token(
        &self,
        user_id: &UserId,
        token: &str,
        platform: Option<&str>,
    ) -> Result<PushToken, NotificationApiError> {
        let mut tx = self.pool.begin().await?;
        let token = notifications::upsert_token(user_id, token, platform, &mut tx).await?;
        tx.commit().await?;
        Ok(token)
    }

    async fn fetch_active_push_tokens(&self, user_ids: &[UserId]) -> Result<Vec<PushToken>, NotificationApiError> {
        let mut conn = self.pool.acquire().await?;
        let tokens = notifications::fetch_active_tokens(user_ids, &mut conn).await?;
        Ok(tokens)
    }

    async fn touch_push_token(&self, token_id: i64) -> Result<(), NotificationApiError> {
        let mut tx = self.pool.begin().await?;
        notifications::touch_token(token_id, &mut tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn deactivate_push_token(&self, token_id: i64) -> Result<(), NotificationApiError> {
        let mut tx = self.pool.begin().await?;
        notifications::deactivate_token(token_id, &mut tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
