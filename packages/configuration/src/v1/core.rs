use serde::{Deserialize, Serialize};

use crate::{AnnouncePolicy, SwarmPolicy};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Core {
    /// Whether the tracker is behind a reverse proxy or not.
    /// If it is, the right-most address in the `X-Forwarded-For` header is
    /// taken as the client's IP address.
    #[serde(default = "Core::default_on_reverse_proxy")]
    pub on_reverse_proxy: bool,

    // Announce policy configuration.
    #[serde(default = "Core::default_announce_policy")]
    pub announce_policy: AnnouncePolicy,

    // Swarm policy configuration.
    #[serde(default = "Core::default_swarm_policy")]
    pub swarm_policy: SwarmPolicy,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            on_reverse_proxy: Self::default_on_reverse_proxy(),
            announce_policy: Self::default_announce_policy(),
            swarm_policy: Self::default_swarm_policy(),
        }
    }
}

impl Core {
    fn default_on_reverse_proxy() -> bool {
        false
    }

    fn default_announce_policy() -> AnnouncePolicy {
        AnnouncePolicy::default()
    }

    fn default_swarm_policy() -> SwarmPolicy {
        SwarmPolicy::default()
    }
}
