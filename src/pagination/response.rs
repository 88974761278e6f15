//! Response builder
//!
//! Assembles a strategy's records and derived metadata into the uniform
//! envelope. Pure and infallible: inputs are already validated.

use super::types::{PaginationEnvelope, Position};

/// Build the envelope for one page
pub fn assemble<T>(
    data: Vec<T>,
    total_count: Option<u64>,
    has_next_page: bool,
    has_previous_page: bool,
    position: Position,
) -> PaginationEnvelope<T> {
    PaginationEnvelope {
        data,
        total_count,
        has_next_page,
        has_previous_page,
        position,
    }
}
