//! HTTP client for the external text-analysis provider.
//!
//! Serves two callers: the report triage pipeline (structured quality
//! verdicts) and the analytics chat endpoint (free-form completions). The
//! provider is treated as an opaque chat-completion service; any failure on
//! the triage path is absorbed by the caller's fail-open default.

pub mod client;
pub mod verdict;

pub use client::{AnalysisClient, AnalysisConfig, AnalysisError, ReportContext};
pub use verdict::Verdict;
