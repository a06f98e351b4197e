//! The matching and scoring engine: lexicon-driven skill extraction,
//! weighted coverage scoring, scorecards, and interview synthesis.
//!
//! Everything in this module (handlers aside) is a pure, synchronous
//! function of its inputs plus the process-wide immutable lexicon and
//! weight tables; calls are safe to run concurrently without
//! coordination.

pub mod engine;
pub mod extract;
pub mod handlers;
pub mod interview;
pub mod lexicon;
pub mod scorecard;
