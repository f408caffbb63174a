//! Read models for the persisted run files
//!
//! This module contains the serializable views written to the output
//! directory: per-instance logs, the run summary and the run aggregate.

pub mod instance_log_view;
pub mod run_aggregate_view;
pub mod run_report_builder;
pub mod run_summary_view;

pub use instance_log_view::InstanceLogView;
pub use run_aggregate_view::{AggregateEntryView, RunAggregateView};
pub use run_report_builder::RunReportBuilder;
pub use run_summary_view::{BuildSystemSummaryView, RunSummaryView};
