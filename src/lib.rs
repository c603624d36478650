#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for pagure-stats
//!
//! This library walks the paginated issue collection of a Pagure project, filters the
//! tickets by a time window and by open/closed status, and folds them into summary
//! statistics (resolution breakdown, gain/trouble tag counts, time-to-close distribution).
//!
//! # Module Organization
//!
//! - [`facts`]: Pagination, record extraction and aggregation
//! - [`reports`]: Report generation in multiple formats
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod facts;

pub mod reports;

mod commands;

pub use crate::commands::{Host, run};
