//! Store contracts for the Wicket RBAC engine
//!
//! This crate defines the repository traits the resolution engine reads
//! through. Trait segregation keeps the engine decoupled from any
//! particular persistence choice: production deployments back these with
//! a database, tests and embedders with the in-memory store from
//! `wicket-storage`. Implementations are required to exclude
//! soft-deleted and inactive rows and to apply tenant scoping at lookup
//! time; the engine re-applies the same filters, but the contract
//! belongs to the store.

pub mod store;

pub use store::{
    EntityStore, FeatureStore, MenuStore, Repository, RoleStore, StoreError, StoreResult,
    UserStore,
};
