//! Measuring and placing everything on a card
//!
//! Three stages, all pure: [`TextFlowEngine`] wraps text to a width,
//! [`MetadataFitter`] squeezes the header onto one line, and
//! [`CardLayoutPlanner`] stacks the sections into a [`CardPlan`] whose
//! height is known before a single pixel exists.
//!
//! [`CardPlan`]: annocard_core::CardPlan

pub mod fit;
pub mod flow;
pub mod planner;

pub use fit::{ellipsize_end, MetadataFitter};
pub use flow::TextFlowEngine;
pub use planner::CardLayoutPlanner;
