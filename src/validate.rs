// SPDX-License-Identifier: Apache-2.0

//! Geometric checks run before any file is written.

pub mod coverage;
