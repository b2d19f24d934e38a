//! ror-uta - Robust Ordinal Regression with UTA-GMS models.
//!
//! Ranks alternatives from a decision maker's pairwise preference statements.
//! A first LP finds the largest separation `delta` the preferences allow; a
//! second batch of MILPs measures, for every alternative and every alpha
//! sample, how far it is from the top. Aggregators turn those distances into
//! a final rank, and tie resolvers reorder tied groups.
//!
//! # Architecture
//!
//! - **`domain`** - Datasets, linear expressions, the UTA-GMS constraint
//!   battery, models, ranks and results. No solver dependency.
//! - **`port`** - The [`port::Solver`] trait over index-based LP/MILP problems.
//! - **`adapter`** - Dataset text reader/writer and the HiGHS solver.
//! - **`app`** - Configuration, the two-phase [`app::Orchestrator`],
//!   result aggregators, tie resolvers and voting.
//! - **`cli`** - The `ror` command-line interface.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ror_uta::adapter::dataset::read_dataset;
//! use ror_uta::adapter::solver::HiGHSSolver;
//! use ror_uta::app::Orchestrator;
//!
//! let loaded = read_dataset("cars.txt")?;
//! let orchestrator = Orchestrator::new(Arc::new(HiGHSSolver::new()), loaded.parameters)?;
//! let result = orchestrator.run(&loaded.dataset, None)?;
//! if let Some(rank) = result.final_rank() {
//!     println!("{rank}");
//! }
//! # Ok::<(), ror_uta::error::Error>(())
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;
