//! Shared primitive types used across the wallet backend.

/// A stable, unique identifier for an account. Assigned at registration,
/// never reused or changed.
pub type AccountId = String;

/// A monetary amount. Single currency, no enforced floor.
pub type Amount = f64;
