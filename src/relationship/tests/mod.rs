//! Unit tests for the relationship module.

mod support;
