//! Controller layer: worker events, flow state transitions, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod status;
