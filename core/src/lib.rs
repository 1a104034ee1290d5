pub mod geometry;
pub mod construction;
pub mod dual;
pub mod surface;
pub mod lamp;
pub mod config;
