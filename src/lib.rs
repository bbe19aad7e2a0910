//! Chemostats - ANOVA Analysis Backend
//!
//! This crate implements statistical screening of chemometric datasets:
//! CSV ingestion, one-way ANOVA with multiple-testing correction, pairwise
//! group comparisons, and an AI assistant that explains the results.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
