use crate::domain::datatype::{ActivityStatus, UserField};

use super::{state_copy, state_ref, EntityCtl, Ident};

/// Maximum number of users a team may hold.
pub const TEAM_MEMBER_LIMIT: i64 = 10;

/// Minimum number of characters of a user name.
pub const USER_NAME_MIN_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserState {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    /// Plain text while the user is being created, argon2 PHC string once stored.
    pub password: String,
    pub user_number: String,
    pub status: ActivityStatus,
    pub team_id: Option<Ident>,
}

pub type User = EntityCtl<UserState>;

impl User {
    state_ref!(first_name, String);
    state_ref!(last_name, String);
    state_ref!(user_name, String);
    state_ref!(password, String);
    state_ref!(user_number, String);
    state_copy!(status, ActivityStatus);
    state_copy!(team_id, Option<Ident>);

    pub fn set_status(&mut self, status: ActivityStatus) {
        self.state.status = status;
    }

    pub fn join_team(&mut self, team_id: Ident) {
        self.state.team_id = Some(team_id);
    }

    pub fn set_field(&mut self, field: UserField, value: String) {
        let slot = match field {
            UserField::FirstName => &mut self.state.first_name,
            UserField::LastName => &mut self.state.last_name,
            UserField::UserName => &mut self.state.user_name,
            UserField::Password => &mut self.state.password,
            UserField::UserNumber => &mut self.state.user_number,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamState {
    pub name: String,
    pub status: ActivityStatus,
}

pub type Team = EntityCtl<TeamState>;

impl Team {
    state_ref!(name, String);
    state_copy!(status, ActivityStatus);

    pub fn rename(&mut self, name: String) {
        self.state.name = name;
    }

    pub fn set_status(&mut self, status: ActivityStatus) {
        self.state.status = status;
    }
}
