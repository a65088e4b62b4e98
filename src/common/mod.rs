//! Common, shared types.

pub mod attachment;
pub mod layers;
pub mod schedule;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
