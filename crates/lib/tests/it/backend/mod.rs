//! Backend integration tests
//!
//! Saving and loading stores through the bundled backends, and the
//! guarantees `load` gives when a backend fails.

mod file_backends;
