use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DraftError;

/// How repeat voters are told apart on a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protection {
    /// One ballot per browser, tracked by the `id` cookie.
    #[default]
    CookieId,
    /// One ballot per client address.
    Ip,
    None,
}

impl Protection {
    pub const ALL: [Protection; 3] = [Protection::CookieId, Protection::Ip, Protection::None];

    pub fn as_str(self) -> &'static str {
        match self {
            Protection::CookieId => "cookie_id",
            Protection::Ip => "ip",
            Protection::None => "none",
        }
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protection {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protection::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| DraftError::UnknownProtection(s.to_string()))
    }
}
