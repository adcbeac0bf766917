//! Valuation request data structures and the batch-request loader

mod data;
pub mod loader;

pub use data::{
    age_at, current_age, AppraisalPricing, AppraisalResponse, AppraisalScore, Gender,
    ValuationInput, ValuationResult,
};
pub use loader::{load_requests, load_requests_from_reader, BatchRequest};
