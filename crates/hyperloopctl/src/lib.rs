//! hyperloopctl - control client for the Avishkar hyperloop control center
//!
//! Talks to hyperloopd over HTTP, or runs the simulation in-process with
//! `--local`.

pub mod cli;
pub mod client;
pub mod commands;
pub mod dashboard;
pub mod source;
