//! Domain model types shared across the crate.

pub mod booking;
pub mod resource;
pub mod time;

#[cfg(test)]
#[path = "booking_tests.rs"]
mod booking_tests;

pub use booking::{
    Booking, BookingAction, BookingStatus, FlightType, NewBooking, TransitionError, UpdateBooking,
};
pub use resource::{
    ActiveStatus, Aircraft, AircraftDefect, DefectStatus, Member, NewDefect, NewMember,
    ResourceId, ResourceKind, Staff, UpdateMember,
};
