use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid {signal} signal: {value}")]
    InvalidSignal { signal: &'static str, value: f32 },
}
