//! Unit tests for the board ordering core.
