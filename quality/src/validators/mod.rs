//! Rule validators. Each returns a [`QualityReport`](crate::QualityReport)
//! with one or more findings per rule; rules are numbered from 1.

pub mod metrics;
pub mod syntax;
pub mod thresholds;
