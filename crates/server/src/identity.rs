//! Who is on the other end of a request, as far as duplicate-vote
//! protection is concerned.
//!
//! Two signals are collected per request: the client address and an opaque
//! browser id kept in the `id` cookie. The cookie is issued on first contact.
//! Two tabs hitting the server for the first time at once can each be handed
//! a different id; whichever the browser stores last is kept.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::Protection;
use uuid::Uuid;

pub const COOKIE_NAME: &str = "id";

const COOKIE_ID_LEN: usize = 16;

/// Proxy headers that may carry the client address, most trusted first.
const IP_HEADERS: [&str; 10] = [
    "x-client-ip",
    "x-forwarded-for",
    "cf-connecting-ip",
    "fastly-client-ip",
    "true-client-ip",
    "x-real-ip",
    "x-cluster-client-ip",
    "x-forwarded",
    "forwarded-for",
    "forwarded",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterIdentity {
    pub ip: Option<IpAddr>,
    pub cookie_id: Option<String>,
}

/// Key a ballot is deduplicated on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoterKey {
    Cookie(String),
    Ip(IpAddr),
    /// Nothing to tell voters apart by: the poll is effectively unprotected.
    Anonymous,
}

impl VoterIdentity {
    /// Resolves the identity of a request, issuing the `id` cookie into the
    /// returned jar when the browser has none yet.
    pub fn resolve(
        jar: CookieJar,
        headers: &HeaderMap,
        peer: Option<SocketAddr>,
    ) -> (CookieJar, Self) {
        let ip = client_ip(headers, peer);

        let existing = jar
            .get(COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty());

        let (jar, cookie_id) = match existing {
            Some(cookie_id) => (jar, cookie_id),
            None => {
                let cookie_id = generate_cookie_id();
                let cookie = Cookie::build((COOKIE_NAME, cookie_id.clone()))
                    .path("/")
                    .same_site(SameSite::Strict)
                    .permanent()
                    .build();
                (jar.add(cookie), cookie_id)
            }
        };

        (
            jar,
            Self {
                ip,
                cookie_id: Some(cookie_id),
            },
        )
    }

    /// Picks the deduplication key for `protection`, falling back to the
    /// other signal when the requested one is missing.
    pub fn voter_key(&self, protection: Protection) -> VoterKey {
        let cookie = self.cookie_id.clone().map(VoterKey::Cookie);
        let ip = self.ip.map(VoterKey::Ip);

        let key = match protection {
            Protection::CookieId => cookie.or(ip),
            Protection::Ip => ip.or(cookie),
            Protection::None => None,
        };
        key.unwrap_or(VoterKey::Anonymous)
    }
}

fn generate_cookie_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(COOKIE_ID_LEN);
    id
}

pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<IpAddr> {
    IP_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name)?.to_str().ok())
        .find_map(first_valid_ip)
        .or_else(|| peer.map(|addr| addr.ip()))
}

fn first_valid_ip(value: &str) -> Option<IpAddr> {
    value.split(',').map(str::trim).find_map(|entry| {
        entry
            .parse::<IpAddr>()
            .ok()
            .or_else(|| entry.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
    })
}
