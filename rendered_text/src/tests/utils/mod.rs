// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod asserts;
mod env;

pub(crate) use asserts::{assert_lines_partition, assert_text};
pub(crate) use env::{MockWidget, TestEnv, ADVANCE, LINE_HEIGHT};
