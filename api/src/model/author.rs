use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    author::{event::CreateAuthor, Author},
    id::AuthorId,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    #[garde(length(min = 1))]
    name: String,
    #[garde(skip)]
    #[serde(default)]
    bio: String,
}

impl From<CreateAuthorRequest> for CreateAuthor {
    fn from(value: CreateAuthorRequest) -> Self {
        CreateAuthor::new(value.name, value.bio)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAuthorResponse {
    pub id: AuthorId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: AuthorId,
    pub name: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
}

impl From<Author> for AuthorResponse {
    fn from(value: Author) -> Self {
        let Author {
            id,
            name,
            bio,
            created_at,
        } = value;
        Self {
            id,
            name,
            bio,
            created_at,
        }
    }
}

#[derive(Serialize)]
pub struct AuthorsResponse {
    pub items: Vec<AuthorResponse>,
}

impl From<Vec<Author>> for AuthorsResponse {
    fn from(value: Vec<Author>) -> Self {
        Self {
            items: value.into_iter().map(AuthorResponse::from).collect(),
        }
    }
}
