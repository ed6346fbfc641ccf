//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain logic and manages runtime behavior:
//! - Quota rules (one constraint each, explicitly ordered)
//! - Validation pipeline (decision making)
//! - Admission gate (validate-then-persist serialization)
//! - Metrics
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod gate;
pub mod metrics;
pub mod ports;
pub mod rules;
pub mod validator;
