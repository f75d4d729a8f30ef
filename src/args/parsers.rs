use super::types::{PositiveU64, PositiveUsize};
use crate::error::ConfigError;

pub(super) fn parse_positive_u64(s: &str) -> Result<PositiveU64, ConfigError> {
    s.parse::<PositiveU64>()
}

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ConfigError> {
    s.parse::<PositiveUsize>()
}
