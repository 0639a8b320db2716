//! The interactive analysis flow: one trigger, one linear pipeline.

pub mod handlers;
