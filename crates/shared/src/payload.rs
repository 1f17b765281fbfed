use serde::{Deserialize, Serialize};

use crate::{palette::Rgb, protection::Protection};

/// Variables of the `createPoll` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePollInput {
    pub title: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub options: Vec<String>,
    pub color: Rgb,
    pub randomize: bool,
    pub protection: Protection,
}

pub const CREATE_POLL: &str = r#"
mutation createPoll($input: CreatePollInput!) {
  createPoll(input: $input) {
    id
  }
}
"#;

pub const POLL: &str = r#"
query poll($id: ID!) {
  poll(id: $id) {
    id
    title
    description
    options
    color
    randomize
    protection
  }
}
"#;
