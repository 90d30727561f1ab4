//! Dependency graph core: the graph model, its queries and renderings, and
//! the traversal service that builds it from a [`domain::DependencyProvider`].

pub mod domain;
pub mod services;
