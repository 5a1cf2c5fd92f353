//! Adapters implementing the domain port traits.

pub mod kubernetes;
