//! Controller layer: wizard state machine, validation gates, UI events, and
//! command orchestration.

pub mod events;
pub mod orchestration;
pub mod state;
pub mod validation;
