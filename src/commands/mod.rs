//! Host-side commands

pub mod run;
