use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid TV size `{0}` (expected small, medium, large or xlarge)")]
    InvalidSize(String),
    #[error("invalid stand height `{0}` (expected short, medium or large)")]
    InvalidStandHeight(String),
    #[error("invalid hex color `{0}`")]
    InvalidColor(String),
    #[error("{name} must be within 0..=200 percent, got {value}")]
    InvalidDisplaySetting { name: &'static str, value: u16 },
    #[error("mount target `#{0}` not found")]
    MissingMountTarget(String),
}
