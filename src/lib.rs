//! Apply a directory of OpenShift RBAC config to a cluster with `oc`.
//!
//! Files are selected by name into admin and standard buckets, sniffed for
//! `kind: Template`, and then either applied directly or rendered with
//! `oc process` and piped into `oc apply`.
//!
//! - **[`classify`]**: filename conventions and apply levels
//! - **[`sniff`]**: template detection
//! - **[`oc`]**: `oc` argument vectors
//! - **[`applier`]**: process-then-apply sequencing over an [`exec::Executor`]
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod applier;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod manifests;
pub mod oc;
pub mod sniff;
