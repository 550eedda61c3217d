//! Store integration tests
//!
//! Dotted-key reads and writes, structural conflicts, typed access and
//! concurrent writers sharing or not sharing a prefix.

mod basic_operations;
mod concurrency;
