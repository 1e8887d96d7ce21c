use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stage '{id}' has no pain points")]
    NoPainPoints { id: String },

    #[error("Duplicate stage id '{id}'")]
    DuplicateStage { id: String },

    #[error("Invalid tuning: {field} must be {requirement}")]
    InvalidTuning {
        field: &'static str,
        requirement: &'static str,
    },
}

pub type RunnerResult<T> = Result<T, RunnerError>;
