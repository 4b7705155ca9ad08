//! Unit tests for dashboard counters and snapshots.
