//! Voting Sessions - agenda voting with timed sessions
//!
//! Members create agenda items ("pautas"), open one timed voting session at a
//! time, cast a single yes/no vote per CPF while it is open, and read the
//! tally once the session has closed. Sessions close on a one-shot timer with
//! a periodic sweep as backstop.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
