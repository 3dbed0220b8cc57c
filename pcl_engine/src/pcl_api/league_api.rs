use std::fmt::Debug;

use log::*;

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
    helpers::{is_blank, is_valid_email},
    traits::{LeagueApiError, LeagueManagement},
};

/// `LeagueApi` covers the everyday records of the league: clubs and their teams, player, referee and staff profiles,
/// stadiums, tournaments and contact form submissions.
pub struct LeagueApi<B> {
    db: B,
}

impl<B> Debug for LeagueApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LeagueApi")
    }
}

impl<B> LeagueApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

fn require(value: &str, message: &str) -> Result<(), LeagueApiError> {
    if value.trim().is_empty() {
        Err(LeagueApiError::ValidationError(message.to_string()))
    } else {
        Ok(())
    }
}

impl<B> LeagueApi<B>
where B: LeagueManagement
{
    //------------------------------------------   Clubs   -----------------------------------------------------------
    pub async fn create_club(&self, owner_id: &UserId, club: NewClub) -> Result<Club, LeagueApiError> {
        require(&club.club_name, "Club name is required")?;
        if let Some(existing) = self.db.fetch_owned_club(owner_id).await? {
            return Err(LeagueApiError::ValidationError(format!("You already own club #{}", existing.id)));
        }
        let club = self.db.insert_club(owner_id, club).await?;
        info!("🏟️ Club #{} ({}) created by {owner_id}", club.id, club.club_name);
        Ok(club)
    }

    pub async fn update_club(&self, caller: &UserId, club_id: i64, club: NewClub) -> Result<Club, LeagueApiError> {
        require(&club.club_name, "Club name is required")?;
        self.owned_club(caller, club_id).await?;
        self.db.update_club(club_id, club).await
    }

    pub async fn club(&self, club_id: i64) -> Result<Club, LeagueApiError> {
        self.db.fetch_club(club_id).await?.ok_or(LeagueApiError::ClubNotFound(club_id))
    }

    pub async fn clubs(&self) -> Result<Vec<Club>, LeagueApiError> {
        self.db.fetch_clubs().await
    }

    pub async fn clubs_for_review(&self) -> Result<Vec<Club>, LeagueApiError> {
        self.db.fetch_clubs_for_review().await
    }

    /// Approves or rejects a club after an admin has checked its documents.
    pub async fn review_club(&self, club_id: i64, approved: bool) -> Result<Club, LeagueApiError> {
        let club = self.db.review_club(club_id, approved).await?;
        if approved {
            info!("🏟️ Club #{club_id} ({}) approved. It is now {}", club.club_name, club.status);
        } else {
            info!("🏟️ Club #{club_id} ({}) rejected and withdrawn from the listing", club.club_name);
        }
        Ok(club)
    }

    //------------------------------------------   Teams   -----------------------------------------------------------
    pub async fn create_team(&self, caller: &UserId, club_id: i64, team: NewTeam) -> Result<Team, LeagueApiError> {
        require(&team.team_name, "Team name is required")?;
        self.owned_club(caller, club_id).await?;
        let team = self.db.insert_team(club_id, team).await?;
        debug!("🏟️ Team #{} added to club #{club_id}", team.id);
        Ok(team)
    }

    pub async fn teams_for_club(&self, club_id: i64) -> Result<Vec<Team>, LeagueApiError> {
        self.club(club_id).await?;
        self.db.fetch_teams_for_club(club_id).await
    }

    /// Adds a player to one of the caller's teams.
    pub async fn add_to_squad(&self, caller: &UserId, team_id: i64, player_id: i64) -> Result<(), LeagueApiError> {
        let team = self.db.fetch_team(team_id).await?.ok_or(LeagueApiError::TeamNotFound(team_id))?;
        self.owned_club(caller, team.club_id).await?;
        self.db.add_player_to_squad(team_id, player_id).await
    }

    //------------------------------------------  Profiles  ----------------------------------------------------------
    pub async fn upsert_player(&self, user_id: &UserId, profile: PlayerProfile) -> Result<Player, LeagueApiError> {
        self.db.upsert_player(user_id, profile).await
    }

    pub async fn player_for_user(&self, user_id: &UserId) -> Result<Option<Player>, LeagueApiError> {
        self.db.fetch_player_for_user(user_id).await
    }

    /// Players that have completed identity verification and are not signed to a club.
    pub async fn scoutable_players(&self) -> Result<Vec<Player>, LeagueApiError> {
        self.db.fetch_scoutable_players().await
    }

    pub async fn upsert_referee(&self, user_id: &UserId, profile: RefereeProfile) -> Result<Referee, LeagueApiError> {
        self.db.upsert_referee(user_id, profile).await
    }

    pub async fn upsert_staff(&self, user_id: &UserId, profile: StaffProfile) -> Result<Staff, LeagueApiError> {
        self.db.upsert_staff(user_id, profile).await
    }

    //------------------------------------------  Venues  ------------------------------------------------------------
    pub async fn create_stadium(&self, owner_id: &UserId, stadium: NewStadium) -> Result<Stadium, LeagueApiError> {
        require(&stadium.stadium_name, "Stadium name is required")?;
        self.db.insert_stadium(owner_id, stadium).await
    }

    pub async fn stadium(&self, stadium_id: i64) -> Result<Option<Stadium>, LeagueApiError> {
        self.db.fetch_stadium(stadium_id).await
    }

    pub async fn stadiums(&self) -> Result<Vec<Stadium>, LeagueApiError> {
        self.db.fetch_stadiums().await
    }

    pub async fn create_tournament(
        &self,
        organizer_id: &UserId,
        tournament: NewTournament,
    ) -> Result<Tournament, LeagueApiError> {
        require(&tournament.tournament_name, "Tournament name is required")?;
        if tournament.end_date < tournament.start_date {
            return Err(LeagueApiError::ValidationError("Tournament cannot end before it starts".into()));
        }
        self.db.insert_tournament(organizer_id, tournament).await
    }

    pub async fn tournaments(&self) -> Result<Vec<Tournament>, LeagueApiError> {
        self.db.fetch_tournaments().await
    }

    //------------------------------------------  Contact  -----------------------------------------------------------
    pub async fn submit_contact(&self, submission: NewContactSubmission) -> Result<ContactSubmission, LeagueApiError> {
        let fields = [&submission.name, &submission.email, &submission.subject, &submission.message];
        if fields.iter().any(|f| is_blank(Some(f.as_str()))) {
            return Err(LeagueApiError::ValidationError("All fields are required".into()));
        }
        if !is_valid_email(submission.email.trim()) {
            return Err(LeagueApiError::ValidationError("Invalid email address".into()));
        }
        let stored = self.db.insert_contact_submission(submission).await?;
        info!("✉️ Contact submission #{} received", stored.id);
        Ok(stored)
    }

    async fn owned_club(&self, caller: &UserId, club_id: i64) -> Result<Club, LeagueApiError> {
        let club = self.club(club_id).await?;
        if &club.owner_id == caller {
            Ok(club)
        } else {
            Err(LeagueApiError::NotClubOwner(club_id))
        }
    }
}
