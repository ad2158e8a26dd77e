//! Shared test harness modules for the shadewalk CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::optimise::*;

mod helpers;
