//! Service layer for business logic and orchestration.
//!
//! Pure scheduling computations live here; orchestration that touches a
//! repository lives in `crate::db::services`.

pub mod conflicts;

pub mod timeline;


pub use conflicts::find_conflicts;
pub use timeline::{
    block_label, bookings_for_resource, grid_position, hour_labels, place_bookings, status_color,
    SlotPlacement, GRID_SPAN_HOURS, GRID_START_HOUR,
};
