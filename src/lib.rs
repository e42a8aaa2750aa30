//! Tabclear: Browsing-Data Clear Orchestration
//!
//! Clears browsing data on user request inside a browser host while
//! coordinating the side effects on open tabs: which tabs to close
//! beforehand, which placeholder tab keeps the window alive, and which tabs
//! to reload afterward. All host interactions are injected behind the traits
//! in [`host`], so the sequencing logic runs unchanged against a real
//! browser runtime or in-process fakes.

pub mod action;
pub mod census;
pub mod data_types;
pub mod error;
pub mod host;
pub mod logging;
pub mod message;
pub mod options;
pub mod orchestrator;
pub mod policy;
pub mod retention;
pub mod serializer;
