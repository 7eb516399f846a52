// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! schedcal - convert weekly schedule notation into calendar recurrences

use std::process::ExitCode;

use schedcal_cli::run;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}
