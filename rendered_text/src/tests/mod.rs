// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_dynamic;
mod test_formatting;
mod utils;
