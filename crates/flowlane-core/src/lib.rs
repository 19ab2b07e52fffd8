#![forbid(unsafe_code)]
//! flowlane-core library.
//!
//! Turns a single-source DAG of flow nodes into nested parallel lanes
//! ([`Branch`]) and topological layers ([`Layering`]) for diagram layout.
//!
//! # Conventions
//!
//! - **Errors**: graph operations return [`FlowResult`]; configuration loading
//!   returns `anyhow::Result`.
//! - **Logging**: `tracing` macros (`debug!`, `trace!`); entry points are
//!   `#[instrument]`ed. Installing a subscriber is left to the binary.

pub mod branch;
pub mod config;
pub mod error;
pub mod graph;
pub mod samples;

pub use branch::{Branch, Segment};
pub use error::{ErrorCode, FlowError, FlowResult};
pub use graph::{
    FlowGraph, GraphNode, LayerOrder, Layering, topological_layers, transform, transform_graph,
};
