//! Data Transfer Objects for the HTTP API

pub mod booking;
pub mod common;
pub mod payment;
pub mod report;
pub mod search;

pub use common::ApiResponse;
