use chrono::{DateTime, Utc};
use mockall::mock;
use pcl_engine::{
    db_types::{
        AadhaarRequest,
        BankVerificationRecord,
        CapturedPayment,
        Club,
        ContactSubmission,
        FailedPayment,
        Match,
        MatchParties,
        NewAadhaarRequest,
        NewClub,
        NewContactSubmission,
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
    },
    traits::{
        AadhaarVerification,
        AccountApiError,
        AccountManagement,
        BankAccountCheck,
        CaptureResult,
        GatewayOrder,
        GatewayOrderRequest,
        IdentityVerifier,
        IntegrationError,
        KycApiError,
        KycManagement,
        LeagueApiError,
        LeagueManagement,
        MatchApiError,
        MatchManagement,
        NotificationApiError,
        NotificationManagement,
        ObjectStore,
        PaymentGatewayDatabase,
        PaymentGatewayError,
        PaymentProvider,
        PushMessage,
        PushSender,
    },
};
use serde_json::Value;

mock! {
    pub AccountManager {}
    impl AccountManagement for AccountManager {
        async fn fetch_user(&self, user_id: &UserId) -> Result<Option<User>, AccountApiError>;
        async fn upsert_user(&self, user: NewUser) -> Result<User, AccountApiError>;
        async fn fetch_owned_club(&self, owner_id: &UserId) -> Result<Option<Club>, AccountApiError>;
        async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<User, AccountApiError>;
    }
}

mock! {
    pub LeagueManager {}
    impl AccountManagement for LeagueManager {
        async fn fetch_user(&self, user_id: &UserId) -> Result<Option<User>, AccountApiError>;
        async fn upsert_user(&self, user: NewUser) -> Result<User, AccountApiError>;
        async fn fetch_owned_club(&self, owner_id: &UserId) -> Result<Option<Club>, AccountApiError>;
        async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<User, AccountApiError>;
    }
    impl LeagueManagement for LeagueManager {
        async fn insert_club(&self, owner_id: &UserId, club: NewClub) -> Result<Club, LeagueApiError>;
        async fn update_club(&self, club_id: i64, club: NewClub) -> Result<Club, LeagueApiError>;
        async fn fetch_club(&self, club_id: i64) -> Result<Option<Club>, LeagueApiError>;
        async fn fetch_clubs(&self) -> Result<Vec<Club>, LeagueApiError>;
        async fn fetch_clubs_for_review(&self) -> Result<Vec<Club>, LeagueApiError>;
        async fn review_club(&self, club_id: i64, approved: bool) -> Result<Club, LeagueApiError>;
        async fn insert_team(&self, club_id: i64, team: NewTeam) -> Result<Team, LeagueApiError>;
        async fn fetch_team(&self, team_id: i64) -> Result<Option<Team>, LeagueApiError>;
        async fn fetch_teams_for_club(&self, club_id: i64) -> Result<Vec<Team>, LeagueApiError>;
        async fn add_player_to_squad(&self, team_id: i64, player_id: i64) -> Result<(), LeagueApiError>;
        async fn upsert_player(&self, user_id: &UserId, profile: PlayerProfile) -> Result<Player, LeagueApiError>;
        async fn fetch_player(&self, player_id: i64) -> Result<Option<Player>, LeagueApiError>;
        async fn fetch_player_for_user(&self, user_id: &UserId) -> Result<Option<Player>, LeagueApiError>;
        async fn fetch_scoutable_players(&self) -> Result<Vec<Player>, LeagueApiError>;
        async fn upsert_referee(&self, user_id: &UserId, profile: RefereeProfile) -> Result<Referee, LeagueApiError>;
        async fn upsert_staff(&self, user_id: &UserId, profile: StaffProfile) -> Result<Staff, LeagueApiError>;
        async fn insert_stadium(&self, owner_id: &UserId, stadium: NewStadium) -> Result<Stadium, LeagueApiError>;
        async fn fetch_stadium(&self, stadium_id: i64) -> Result<Option<Stadium>, LeagueApiError>;
        async fn fetch_stadiums(&self) -> Result<Vec<Stadium>, LeagueApiError>;
        async fn insert_tournament(&self, organizer_id: &UserId, tournament: NewTournament) -> Result<Tournament, LeagueApiError>;
        async fn fetch_tournaments(&self) -> Result<Vec<Tournament>, LeagueApiError>;
        async fn insert_contact_submission(&self, submission: NewContactSubmission) -> Result<ContactSubmission, LeagueApiError>;
    }
}

mock! {
    pub PaymentManager {}
    impl Clone for PaymentManager {
        fn clone(&self) -> Self;
    }
    impl PaymentGatewayDatabase for PaymentManager {
        fn url(&self) -> &str;
        async fn insert_pending_payment(&self, payment: NewPayment) -> Result<Payment, PaymentGatewayError>;
        async fn fetch_payment_by_order_id(&self, order_id: &str) -> Result<Option<Payment>, PaymentGatewayError>;
        async fn fetch_payment_by_payment_id(&self, payment_id: &str) -> Result<Option<Payment>, PaymentGatewayError>;
        async fn process_captured_payment(&self, capture: CapturedPayment) -> Result<Option<CaptureResult>, PaymentGatewayError>;
        async fn process_failed_payment(&self, failure: FailedPayment) -> Result<Option<Payment>, PaymentGatewayError>;
        async fn process_refund(&self, refund: ProcessedRefund) -> Result<Option<Payment>, PaymentGatewayError>;
        async fn fetch_payout_summaries(&self, user_id: &UserId) -> Result<Vec<PayoutSummary>, PaymentGatewayError>;
    }
}

mock! {
    pub KycManager {}
    impl AccountManagement for KycManager {
        async fn fetch_user(&self, user_id: &UserId) -> Result<Option<User>, AccountApiError>;
        async fn upsert_user(&self, user: NewUser) -> Result<User, AccountApiError>;
        async fn fetch_owned_club(&self, owner_id: &UserId) -> Result<Option<Club>, AccountApiError>;
        async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<User, AccountApiError>;
    }
    impl KycManagement for KycManager {
        async fn fetch_verified_player_with_aadhaar(&self, aadhaar_number: &str, user_id: &UserId) -> Result<Option<User>, KycApiError>;
        async fn fetch_user_with_aadhaar(&self, aadhaar_number: &str, user_id: &UserId) -> Result<Option<User>, KycApiError>;
        async fn insert_aadhaar_request(&self, request: NewAadhaarRequest) -> Result<AadhaarRequest, KycApiError>;
        async fn fetch_pending_aadhaar_request(&self, user_id: &UserId, request_id: &str) -> Result<Option<AadhaarRequest>, KycApiError>;
        async fn complete_aadhaar_verification(&self, verification: AadhaarVerification) -> Result<User, KycApiError>;
        async fn expire_aadhaar_requests(&self, cutoff: DateTime<Utc>) -> Result<Vec<AadhaarRequest>, KycApiError>;
        async fn record_club_documents(&self, club: &Club, documents: Vec<UploadedDocument>) -> Result<Club, KycApiError>;
        async fn insert_payout_account(&self, user_id: &UserId, account: NewPayoutAccount) -> Result<PayoutAccount, KycApiError>;
        async fn fetch_payout_account(&self, account_id: i64) -> Result<Option<PayoutAccount>, KycApiError>;
        async fn fetch_payout_accounts(&self, user_id: &UserId) -> Result<Vec<PayoutAccount>, KycApiError>;
        async fn update_payout_account(&self, account_id: i64, account: NewPayoutAccount) -> Result<PayoutAccount, KycApiError>;
        async fn record_bank_verification(&self, account_id: i64, record: BankVerificationRecord) -> Result<PayoutAccount, KycApiError>;
    }
}

mock! {
    pub NotificationManager {}
    impl NotificationManagement for NotificationManager {
        async fn insert_notifications(&self, notifications: Vec<NewNotification>) -> Result<Vec<Notification>, NotificationApiError>;
        async fn fetch_notifications(&self, user_id: &UserId) -> Result<Vec<Notification>, NotificationApiError>;
        async fn mark_notification_read(&self, notification_id: i64, user_id: &UserId) -> Result<Option<Notification>, NotificationApiError>;
        async fn upsert_push_token<'a>(&self, user_id: &UserId, token: &str, platform: Option<&'a str>) -> Result<PushToken, NotificationApiError>;
        async fn fetch_active_push_tokens(&self, user_ids: &[UserId]) -> Result<Vec<PushToken>, NotificationApiError>;
        async fn touch_push_token(&self, token_id: i64) -> Result<(), NotificationApiError>;
        async fn deactivate_push_token(&self, token_id: i64) -> Result<(), NotificationApiError>;
    }
}

mock! {
    pub MatchManager {}
    impl AccountManagement for MatchManager {
        async fn fetch_user(&self, user_id: &UserId) -> Result<Option<User>, AccountApiError>;
        async fn upsert_user(&self, user: NewUser) -> Result<User, AccountApiError>;
        async fn fetch_owned_club(&self, owner_id: &UserId) -> Result<Option<Club>, AccountApiError>;
        async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<User, AccountApiError>;
    }
    impl NotificationManagement for MatchManager {
        async fn insert_notifications(&self, notifications: Vec<NewNotification>) -> Result<Vec<Notification>, NotificationApiError>;
        async fn fetch_notifications(&self, user_id: &UserId) -> Result<Vec<Notification>, NotificationApiError>;
        async fn mark_notification_read(&self, notification_id: i64, user_id: &UserId) -> Result<Option<Notification>, NotificationApiError>;
        async fn upsert_push_token<'a>(&self, user_id: &UserId, token: &str, platform: Option<&'a str>) -> Result<PushToken, NotificationApiError>;
        async fn fetch_active_push_tokens(&self, user_ids: &[UserId]) -> Result<Vec<PushToken>, NotificationApiError>;
        async fn touch_push_token(&self, token_id: i64) -> Result<(), NotificationApiError>;
        async fn deactivate_push_token(&self, token_id: i64) -> Result<(), NotificationApiError>;
    }
    impl LeagueManagement for MatchManager {
        async fn insert_club(&self, owner_id: &UserId, club: NewClub) -> Result<Club, LeagueApiError>;
        async fn update_club(&self, club_id: i64, club: NewClub) -> Result<Club, LeagueApiError>;
        async fn fetch_club(&self, club_id: i64) -> Result<Option<Club>, LeagueApiError>;
        async fn fetch_clubs(&self) -> Result<Vec<Club>, LeagueApiError>;
        async fn fetch_clubs_for_review(&self) -> Result<Vec<Club>, LeagueApiError>;
        async fn review_club(&self, club_id: i64, approved: bool) -> Result<Club, LeagueApiError>;
        async fn insert_team(&self, club_id: i64, team: NewTeam) -> Result<Team, LeagueApiError>;
        async fn fetch_team(&self, team_id: i64) -> Result<Option<Team>, LeagueApiError>;
        async fn fetch_teams_for_club(&self, club_id: i64) -> Result<Vec<Team>, LeagueApiError>;
        async fn add_player_to_squad(&self, team_id: i64, player_id: i64) -> Result<(), LeagueApiError>;
        async fn upsert_player(&self, user_id: &UserId, profile: PlayerProfile) -> Result<Player, LeagueApiError>;
        async fn fetch_player(&self, player_id: i64) -> Result<Option<Player>, LeagueApiError>;
        async fn fetch_player_for_user(&self, user_id: &UserId) -> Result<Option<Player>, LeagueApiError>;
        async fn fetch_scoutable_players(&self) -> Result<Vec<Player>, LeagueApiError>;
        async fn upsert_referee(&self, user_id: &UserId, profile: RefereeProfile) -> Result<Referee, LeagueApiError>;
        async fn upsert_staff(&self, user_id: &UserId, profile: StaffProfile) -> Result<Staff, LeagueApiError>;
        async fn insert_stadium(&self, owner_id: &UserId, stadium: NewStadium) -> Result<Stadium, LeagueApiError>;
        async fn fetch_stadium(&self, stadium_id: i64) -> Result<Option<Stadium>, LeagueApiError>;
        async fn fetch_stadiums(&self) -> Result<Vec<Stadium>, LeagueApiError>;
        async fn insert_tournament(&self, organizer_id: &UserId, tournament: NewTournament) -> Result<Tournament, LeagueApiError>;
        async fn fetch_tournaments(&self) -> Result<Vec<Tournament>, LeagueApiError>;
        async fn insert_contact_submission(&self, submission: NewContactSubmission) -> Result<ContactSubmission, LeagueApiError>;
    }
    impl MatchManagement for MatchManager {
        async fn insert_match(&self, created_by: &UserId, new_match: NewMatch) -> Result<Match, MatchApiError>;
        async fn fetch_match(&self, match_id: i64) -> Result<Option<Match>, MatchApiError>;
        async fn fetch_match_parties(&self, match_id: i64) -> Result<Option<MatchParties>, MatchApiError>;
        async fn cancel_match(&self, match_id: i64, canceled_by: &UserId, reason: &str) -> Result<Match, MatchApiError>;
        async fn fetch_payment_for_match(&self, match_id: i64) -> Result<Option<Payment>, MatchApiError>;
    }
}

mock! {
    pub PaymentProvider {}
    impl PaymentProvider for PaymentProvider {
        async fn create_order(&self, order: GatewayOrderRequest) -> Result<GatewayOrder, IntegrationError>;
    }
}

mock! {
    pub IdentityVerifier {}
    impl IdentityVerifier for IdentityVerifier {
        async fn request_aadhaar_otp(&self, aadhaar_number: &str) -> Result<Value, IntegrationError>;
        async fn verify_aadhaar_otp(&self, request_id: &str, otp: &str) -> Result<Value, IntegrationError>;
        async fn verify_bank_account(&self, account: &BankAccountCheck) -> Result<Value, IntegrationError>;
    }
}

mock! {
    pub PushSender {}
    impl PushSender for PushSender {
        async fn send(&self, token: &str, message: &PushMessage) -> Result<String, IntegrationError>;
    }
}

mock! {
    pub ObjectStore {}
    impl ObjectStore for ObjectStore {
        async fn upload(&self, bucket: &str, path: &str, content_type: &str, data: Vec<u8>) -> Result<String, IntegrationError>;
    }
}
