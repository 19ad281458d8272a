//! Arbor Benchmark Suite
//!
//! Criterion benchmarks for the three visitation strategies over generated
//! graphs held in a `MemStore`.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench -p arbor-bench
//!
//! # Compare against baseline
//! cargo bench -p arbor-bench -- --save-baseline main
//! cargo bench -p arbor-bench -- --baseline main
//! ```

pub mod datasets;

pub use datasets::{generate_graph, generate_tree, GraphData, EDGES, VERTICES};
