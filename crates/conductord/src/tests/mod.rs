//! Test suites for the operator console.

pub(crate) mod support;
