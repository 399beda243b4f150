pub use super::person::Entity as Person;
pub use super::season::Entity as Season;
pub use super::season_match::Entity as SeasonMatch;
pub use super::season_team::Entity as SeasonTeam;
pub use super::standing::Entity as Standing;
pub use super::team::Entity as Team;
pub use super::team_member::Entity as TeamMember;
pub use super::tournament::Entity as Tournament;
