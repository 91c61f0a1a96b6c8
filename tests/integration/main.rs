//! Integration tests driving the service layers together, without a live
//! Redis: the in-memory record store plus a capturing producer stand in for
//! the transport.
mod common;

mod api;
mod worker;
