#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};
use pcl_engine::{
    db_types::{
        Club,
        MatchFormat,
        NewClub,
        NewMatch,
        NewStadium,
        NewTeam,
        NewUser,
        Player,
        PlayerProfile,
        Team,
        UserId,
        UserProfile,
        UserRole,
    },
    AccountManagement,
    LeagueManagement,
    SqliteDatabase,
};

use self::prepare_env::{prepare_test_env, random_db_path};

pub async fn setup() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

pub async fn new_user(db: &SqliteDatabase, id: &str, role: UserRole, name: Option<(&str, &str)>) -> UserId {
    let profile = UserProfile {
        email: Some(format!("{id}@example.com")),
        first_name: name.map(|n| n.0.to_string()),
        last_name: name.map(|n| n.1.to_string()),
        ..Default::default()
    };
    let user = db.upsert_user(NewUser { id: id.into(), role, profile }).await.expect("Error creating user");
    user.id
}

pub async fn new_club(db: &SqliteDatabase, owner: &UserId, name: &str) -> (Club, Team) {
    let club = NewClub { club_name: name.into(), club_type: Some("Unregistered".into()), ..Default::default() };
    let club = db.insert_club(owner, club).await.expect("Error creating club");
    let team = NewTeam { team_name: format!("{name} First XI"), formation: Some("4-4-2".into()) };
    let team = db.insert_team(club.id, team).await.expect("Error creating team");
    (club, team)
}

pub async fn new_player(db: &SqliteDatabase, id: &str, name: (&str, &str)) -> (UserId, Player) {
    let user = new_user(db, id, UserRole::Player, Some(name)).await;
    let profile = PlayerProfile { position: Some("Midfielder".into()), ..Default::default() };
    let player = db.upsert_player(&user, profile).await.expect("Error creating player");
    (user, player)
}

/// Two clubs with a team each, a stadium, a referee and two match staff.
pub struct League {
    pub home_owner: UserId,
    pub away_owner: UserId,
    pub stadium_owner: UserId,
    pub referee: UserId,
    pub staff: Vec<UserId>,
    pub home_club: Club,
    pub away_club: Club,
    pub home_team: Team,
    pub away_team: Team,
    pub stadium_id: i64,
}

impl League {
    /// A friendly between the two teams, three days from now.
    pub fn friendly(&self) -> NewMatch {
        NewMatch {
            tournament_id: None,
            home_team_id: self.home_team.id,
            away_team_id: self.away_team.id,
            match_format: MatchFormat::Friendly,
            match_date: in_days(3),
            match_time: Some("18:30".into()),
            stadium_id: Some(self.stadium_id),
            referee_user_id: Some(self.referee.clone()),
            staff_user_ids: self.staff.clone(),
        }
    }
}

pub fn in_days(days: i64) -> NaiveDate {
    (Utc::now() + Duration::days(days)).date_naive()
}

pub async fn league(db: &SqliteDatabase) -> League {
    let home_owner = new_user(db, "home-owner", UserRole::ClubOwner, Some(("Hari", "Menon"))).await;
    let away_owner = new_user(db, "away-owner", UserRole::ClubOwner, Some(("Arjun", "Nair"))).await;
    let stadium_owner = new_user(db, "stadium-owner", UserRole::StadiumOwner, None).await;
    let referee = new_user(db, "referee", UserRole::Referee, None).await;
    let staff1 = new_user(db, "staff-1", UserRole::Staff, None).await;
    let staff2 = new_user(db, "staff-2", UserRole::Staff, None).await;
    let (home_club, home_team) = new_club(db, &home_owner, "Kochi United").await;
    let (away_club, away_team) = new_club(db, &away_owner, "Calicut FC").await;
    let stadium = NewStadium {
        stadium_name: "Marine Drive Arena".into(),
        city: Some("Kochi".into()),
        capacity: Some(5000),
        ..Default::default()
    };
    let stadium = db.insert_stadium(&stadium_owner, stadium).await.expect("Error creating stadium");
    League {
        home_owner,
        away_owner,
        stadium_owner,
        referee,
        staff: vec![staff1, staff2],
        home_club,
        away_club,
        home_team,
        away_team,
        stadium_id: stadium.id,
    }
}
