use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown scene id '{scene_id}'")]
    UnknownScene { scene_id: String },
    #[error("invalid edit payload: {reason}")]
    InvalidEditPayload { reason: String },
}
