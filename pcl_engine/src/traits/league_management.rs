use thiserror::Error;

use crate::{
    db_types::{
        Club,
        ContactSubmission,
        NewClub,
        NewContactSubmission,
        NewStadium,
        NewTeam,
        NewTournament,
        Player,
        PlayerProfile,
        Referee,
        RefereeProfile,
        Stadium,
        Staff,
        StaffProfile,
        Team,
        Tournament,
        UserId,
    },
    traits::{AccountApiError, AccountManagement},
};

#[derive(Debug, Clone, Error)]
pub enum LeagueApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Club {0} does not exist")]
    ClubNotFound(i64),
    #[error("Team {0} does not exist")]
    TeamNotFound(i64),
    #[error("Player {0} does not exist")]
    PlayerNotFound(i64),
    #[error("Only the club owner may change club {0}")]
    NotClubOwner(i64),
    #[error("Invalid request: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for LeagueApiError {
    fn from(e: sqlx::Error) -> Self {
        LeagueApiError::DatabaseError(e.to_string())
    }
}

impl From<AccountApiError> for LeagueApiError {
    fn from(e: AccountApiError) -> Self {
        LeagueApiError::DatabaseError(e.to_string())
    }
}

/// CRUD behaviour over the league's clubs, teams, player/referee/staff profiles, stadiums and tournaments.
#[allow(async_fn_in_trait)]
pub trait LeagueManagement: AccountManagement {
    async fn insert_club(&self, owner_id: &UserId, club: NewClub) -> Result<Club, LeagueApiError>;
    async fn update_club(&self, club_id: i64, club: NewClub) -> Result<Club, LeagueApiError>;
    async fn fetch_club(&self, club_id: i64) -> Result<Option<Club>, LeagueApiError>;
    /// Lists every active club, ordered by name.
    async fn fetch_clubs(&self) -> Result<Vec<Club>, LeagueApiError>;
    /// Clubs whose status or documents are waiting on an admin review, oldest first.
    async fn fetch_clubs_for_review(&self) -> Result<Vec<Club>, LeagueApiError>;
    /// Records an admin's approval or rejection of the club and its documents.
    async fn review_club(&self, club_id: i64, approved: bool) -> Result<Club, LeagueApiError>;

    async fn insert_team(&self, club_id: i64, team: NewTeam) -> Result<Team, LeagueApiError>;
    async fn fetch_team(&self, team_id: i64) -> Result<Option<Team>, LeagueApiError>;
    async fn fetch_teams_for_club(&self, club_id: i64) -> Result<Vec<Team>, LeagueApiError>;
    /// Adds the player to the team's squad. Adding a player twice is a no-op.
    async fn add_player_to_squad(&self, team_id: i64, player_id: i64) -> Result<(), LeagueApiError>;

    /// Creates or updates the caller's player profile. A `unique_player_id` is generated on first insert.
    async fn upsert_player(&self, user_id: &UserId, profile: PlayerProfile) -> Result<Player, LeagueApiError>;
    async fn fetch_player(&self, player_id: i64) -> Result<Option<Player>, LeagueApiError>;
    async fn fetch_player_for_user(&self, user_id: &UserId) -> Result<Option<Player>, LeagueApiError>;
    async fn fetch_scoutable_players(&self) -> Result<Vec<Player>, LeagueApiError>;

    async fn upsert_referee(&self, user_id: &UserId, profile: RefereeProfile) -> Result<Referee, LeagueApiError>;
    async fn upsert_staff(&self, user_id: &UserId, profile: StaffProfile) -> Result<Staff, LeagueApiError>;

    async fn insert_stadium(&self, owner_id: &UserId, stadium: NewStadium) -> Result<Stadium, LeagueApiError>;
    async fn fetch_stadium(&self, stadium_id: i64) -> Result<Option<Stadium>, LeagueApiError>;
    async fn fetch_stadiums(&self) -> Result<Vec<Stadium>, LeagueApiError>;

    async fn insert_tournament(
        &self,
        organizer_id: &UserId,
        tournament: NewTournament,
    ) -> Result<Tournament, LeagueApiError>;
    async fn fetch_tournaments(&self) -> Result<Vec<Tournament>, LeagueApiError>;

    async fn insert_contact_submission(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission, LeagueApiError>;
}
