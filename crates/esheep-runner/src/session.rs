//! One room session driven through the facade.

use esheep_config::SessionConfig;
use esheep_core::EsheepResult;
use esheep_grpc::{AgentTransport, Environment, ResponseStatus};
use tracing::{info, warn};

/// What the session achieved.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub room_id: Option<String>,
    pub action_dimensions: usize,
    pub score: Option<i32>,
    pub left: bool,
}

/// Joins `session.room_id` or creates a new room, reads the action space and
/// status, then leaves.
///
/// A rejected join or create ends the session early with `room_id: None`;
/// only transport faults are errors.
pub fn run_session<T: AgentTransport>(
    env: &mut Environment<T>,
    session: &SessionConfig,
) -> EsheepResult<SessionSummary> {
    let mut summary = SessionSummary::default();

    let room_id = match &session.room_id {
        Some(room_id) => match env.join_room(room_id, &session.password)? {
            Some(res) if res.is_success() => room_id.clone(),
            Some(res) => {
                warn!(err_code = res.err_code, "Join rejected: {}", res.msg);
                return Ok(summary);
            }
            None => {
                warn!("No response to join_room");
                return Ok(summary);
            }
        },
        None => match env.create_room(&session.password)? {
            Some(res) if res.is_success() => res.room_id,
            Some(res) => {
                warn!(err_code = res.err_code, "Create rejected: {}", res.msg);
                return Ok(summary);
            }
            None => {
                warn!("No response to create_room");
                return Ok(summary);
            }
        },
    };

    info!("In room {}", room_id);
    summary.room_id = Some(room_id);

    if let Some(space) = env.get_action_space()? {
        for dimension in &space.dimensions {
            info!("Action axis {} has {} values", dimension.name, dimension.size);
        }
        summary.action_dimensions = space.dimensions.len();
    }

    if let Some(inform) = env.get_inform()? {
        info!(
            score = inform.score,
            kills = inform.kills,
            health = inform.health,
            frame_index = inform.frame_index,
            "Status"
        );
        summary.score = Some(inform.score);
    }

    summary.left = env.leave_room()?.is_some_and(|res| res.is_success());

    Ok(summary)
}
