//! One submission-panel state machine per mounted map page, plus the endpoints driving it.

pub mod handlers;
pub mod models;
pub mod requests;
pub mod responses;
pub mod services;
pub mod state;
pub mod storage;
