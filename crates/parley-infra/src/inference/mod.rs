//! HTTP client for the remote text-generation service.
//!
//! This module provides the [`HttpInferenceClient`] which implements the
//! [`InferenceClient`](parley_core::chat::inference::InferenceClient) trait
//! for a JSON endpoint taking `{"inputs": {...}}` and replying with
//! `{"message": "..."}`.

pub mod client;
pub mod types;

pub use client::HttpInferenceClient;
