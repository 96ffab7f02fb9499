//! File output for proposal time series.

pub mod export;
