pub mod auth_cmd;
pub mod common;
pub mod gifts;
