//! Human Resources Management System engine
//!
//! This crate resolves an authenticated identity to its HRMS roles, keeps an
//! in-memory store of employees, leave, missions, payroll, attendance and
//! recruitment records, fans out in-app notifications, and derives
//! attendance and contract status. The [`api`] module serves it all over
//! HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod roles;
pub mod status;
pub mod store;
