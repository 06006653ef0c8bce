//! Risk tiers derived from remaining useful life.

mod engine;

pub use engine::{Prediction, RiskTier};
