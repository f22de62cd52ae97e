//! Core error types shared by calculator backend modules.
//!
//! - Problem details response body (`Problem`)
//! - Error catalog support (`ErrDef`)

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem};

/// Attach the request path and optional trace id to a Problem.
pub fn finalize(mut p: Problem, instance: &str, trace_id: Option<String>) -> Problem {
    p = p.with_instance(instance);
    if let Some(tid) = trace_id {
        p = p.with_trace_id(tid);
    }
    p
}
