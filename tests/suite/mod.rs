//! Integration test modules

mod flow;
mod payload;
mod retry;
mod session;
