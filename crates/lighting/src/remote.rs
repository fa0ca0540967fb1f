//! Remote change requests for server-scoped settings.
//!
//! A client can ask the host to replace the server light policy (for example
//! through a synced settings screen). The gate rejects every such request:
//! only the session owner edits server-scoped settings, through paths that do
//! not pass this gate (the local settings panel, direct config edits). A
//! rejected request leaves the live policy untouched and is answered with a
//! `SettingsChangeRejected` message.

use bevy::prelude::*;

use crate::server_policy::ServerLightPolicy;
use crate::LightUpdateSet;

/// A remote actor proposing a full replacement server policy.
#[derive(Event, Debug, Clone)]
pub struct ServerSettingsChangeRequest {
    /// The policy the requester wants to install.
    pub pending: ServerLightPolicy,
    /// Host-assigned id of the requesting client.
    pub requester: u32,
}

/// Rejection signal routed back toward the requester.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SettingsChangeRejected {
    pub requester: u32,
    pub message: String,
}

/// Authorization gate for server-scoped settings. Remote requests are never
/// accepted, whoever sends them; the session owner has its own paths.
pub fn accept_remote_change(_pending: &ServerLightPolicy, _requester: u32) -> bool {
    false
}

/// Drains pending change requests. Rejected requests never touch the live
/// policy and each is answered with one rejection message.
pub fn gate_remote_policy_changes(
    mut requests: EventReader<ServerSettingsChangeRequest>,
    mut rejections: EventWriter<SettingsChangeRejected>,
) {
    for request in requests.read() {
        if accept_remote_change(&request.pending, request.requester) {
            // Unreachable today: remote changes are never accepted.
            continue;
        }
        debug!(
            "rejected server light settings change from client {}",
            request.requester
        );
        rejections.send(SettingsChangeRejected {
            requester: request.requester,
            message: "rejected: only the session owner may change server light settings".into(),
        });
    }
}

pub struct RemoteChangePlugin;

impl Plugin for RemoteChangePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ServerSettingsChangeRequest>()
            .add_event::<SettingsChangeRejected>()
            .add_systems(
                Update,
                gate_remote_policy_changes.in_set(LightUpdateSet::Input),
            );
    }
}
