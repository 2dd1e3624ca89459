pub mod controller;
pub mod devices;
pub mod error;
pub mod logging;
pub mod orientation;
pub mod query;
