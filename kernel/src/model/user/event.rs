use derive_new::new;

use crate::model::role::Role;

#[derive(new)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}
