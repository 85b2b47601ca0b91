use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("weight '{name}' is {value}, expected 0-100")]
    WeightOutOfRange { name: &'static str, value: u32 },

    #[error("recovery weights sum to {0}, expected 100")]
    WeightSum(u32),
}
