//! # rag-core
//!
//! Core types and error types for RAGulator.
//!
//! This crate provides the foundational types shared across all RAGulator crates:
//! - Entity structs mirroring the evaluation backend's REST resources
//!   (sessions, chains, configurations, questions, answers, comments)
//! - Write payloads sent to the backend (create/update/bulk bodies)
//! - The validated [`Score`](score::Score) newtype
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod payloads;
pub mod score;

pub use errors::CoreError;
pub use score::Score;
