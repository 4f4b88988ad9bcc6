//! types and plumbing shared between the api service, the models layer
//! and the settlement scheduler
pub mod data_structures;
pub mod env;
pub mod error_code;
pub mod http;
pub mod log;
pub mod utils;

#[macro_use]
extern crate lazy_static;
