//! rifctl - router interface API toolkit
//!
//! Drives the SAI router interface API of a virtual switch from the command
//! line: prints the attribute catalogue, runs the conformance suite (directly
//! or across the exported C ABI) and builds switches from YAML topologies.

pub mod commands;
pub mod output;
pub mod topology;

pub use commands::{attribute_table, run_check, AttrInfo};
pub use topology::{AppliedInterface, AppliedTopology, Topology, TopologyError};
