// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Reconciliation of referee assignments, score reports and unavailability
//! into a weekly grid per referee.
//!
//! The crate never touches files. Callers hand over raw cells and text in
//! [`RawInputs`], and [`Pipeline::run`] returns a [`WeeklyGrid`] plus every
//! condition met along the way.

mod aggregate;
mod config;
mod error;
mod memo;
mod pipeline;
mod reconcile;
mod render;

#[cfg(test)]
mod tests;

pub use aggregate::{RefereeRow, WeekCell, WeeklyGrid, aggregate};
pub use config::{DateSettings, GridConfig};
pub use error::CoreError;
pub use memo::Memo;
pub use pipeline::{Pipeline, PipelineOutput, RawInputs};
pub use reconcile::{left_join, reconcile, unscored};
pub use render::{GroupLabel, RenderOptions, referee_details, referee_label};
