//! Domain layer - discovery, collapsing and naming rules
//!
//! Pure logic with no I/O: value objects, module and branch resolution,
//! install and artifact naming policies.

pub mod domain;
pub mod policies;
pub mod services;
