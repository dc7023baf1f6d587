use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, Default)]
pub enum Role {
    Admin,
    #[default]
    Member,
}
