pub mod defects;
pub mod directory;
pub mod history;
pub mod schedule;
