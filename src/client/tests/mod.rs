//! Unit tests for the client mirror, drag session and reconciler.
