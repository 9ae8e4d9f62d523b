pub mod auth;
pub mod rest;
pub mod types;

pub use rest::{HttpResponse, LockerClient, ReqwestTransport, Transport};
