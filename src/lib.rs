// src/lib.rs — Library root for cachesweep

pub mod aggregate;
pub mod characterization;
pub mod cli;
pub mod design;
pub mod infra;
pub mod results;
pub mod scheduler;
pub mod util;
