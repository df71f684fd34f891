//! Domain types shared across the workspace.

mod coordinate;
mod job;
mod route;
mod state;
mod timezone;
mod waypoint;

pub use coordinate::*;
pub use job::*;
pub use route::*;
pub use state::*;
pub use timezone::*;
pub use waypoint::*;

use crate::error::RegistryError;

/// Reject empty (or whitespace-only) required text fields.
pub(crate) fn require(field: &str, value: &str) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::InvalidEntity(format!("{} is empty", field)));
    }
    Ok(())
}
