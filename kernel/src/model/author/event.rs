use derive_new::new;

use crate::model::id::AuthorId;

#[derive(new)]
pub struct CreateAuthor {
    pub name: String,
    pub bio: String,
}

#[derive(new)]
pub struct DeleteAuthor {
    pub author_id: AuthorId,
}
