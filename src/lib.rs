//! Cardio Assess - headless core of the cardiovascular risk self-assessment
//! wizard.
//!
//! Derives the question flow from the answers, gates navigation on
//! completion, mirrors shared lifestyle answers between metrics, and submits
//! the finished wizard to the risk backend.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
