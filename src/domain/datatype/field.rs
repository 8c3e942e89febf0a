use std::str::FromStr;

use derive_more::Display;

use super::{normalize, UnknownVariant};

/// User column that may be replaced through the update operation.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    #[display(fmt = "firstname")]
    FirstName,
    #[display(fmt = "lastname")]
    LastName,
    #[display(fmt = "username")]
    UserName,
    #[display(fmt = "password")]
    Password,
    #[display(fmt = "usernumber")]
    UserNumber,
}

impl FromStr for UserField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "firstname" => Ok(Self::FirstName),
            "lastname" => Ok(Self::LastName),
            "username" => Ok(Self::UserName),
            "password" => Ok(Self::Password),
            "usernumber" => Ok(Self::UserNumber),
            _ => Err(UnknownVariant::new("user column", s)),
        }
    }
}

/// User column searched by the find-by-name operation.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserNameField {
    #[display(fmt = "firstname")]
    FirstName,
    #[display(fmt = "lastname")]
    LastName,
    #[display(fmt = "username")]
    UserName,
}

impl FromStr for UserNameField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "firstname" => Ok(Self::FirstName),
            "lastname" => Ok(Self::LastName),
            "username" => Ok(Self::UserName),
            _ => Err(UnknownVariant::new("find type", s)),
        }
    }
}
