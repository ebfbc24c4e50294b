//! Desktop browser `User-Agent` strings.
//!
//! The council's API sits behind bot filtering that rejects obvious library
//! agents, so requests present as a desktop browser.

use cardiffwaste_core::ClientConfig;
use rand::seq::IndexedRandom;

pub const DESKTOP_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36 Edg/123.0.2420.81",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

/// Picks one entry of [`DESKTOP_USER_AGENTS`] at random.
#[must_use]
pub fn random_desktop_user_agent() -> &'static str {
    DESKTOP_USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(DESKTOP_USER_AGENTS[0])
}

/// The configured agent if there is one, otherwise a random desktop agent.
#[must_use]
pub fn resolve_user_agent(config: &ClientConfig) -> String {
    config
        .user_agent
        .clone()
        .unwrap_or_else(|| random_desktop_user_agent().to_string())
}
