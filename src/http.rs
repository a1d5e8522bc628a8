//! Shared blocking HTTP plumbing for the upstream providers.

use crate::config::ProviderConfig;

pub const USER_AGENT: &str = concat!("airgauge/", env!("CARGO_PKG_VERSION"));

pub fn build_agent(config: &ProviderConfig) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(config.timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// One-line description of a ureq failure.
pub fn describe_error(err: ureq::Error) -> String {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            let body = body.trim();
            if body.is_empty() {
                format!("HTTP {}", code)
            } else {
                format!("HTTP {}: {}", code, body)
            }
        }
        ureq::Error::Transport(t) => t.to_string(),
    }
}
