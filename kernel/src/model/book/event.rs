use derive_new::new;

use crate::model::id::AuthorId;

#[derive(new, Debug)]
pub struct CreateBook {
    pub title: String,
    pub author_id: Option<AuthorId>,
    pub genre: String,
    pub description: String,
}
