// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Reference bring-up sequence for one hart.

use crate::{InitError, InitResult, Platform, cpu};

/// Runs the platform bring-up hooks on the calling hart.
///
/// The cold hart also initializes the console. A console failure is logged
/// and otherwise ignored since the console only carries diagnostics; IPI and
/// timer failures are returned to the caller.
///
/// The caller must guarantee that exactly one hart passes `cold_boot = true`
/// and that it returns before any other hart enters this function.
pub fn bring_up_hart(platform: &Platform, cold_boot: bool) -> InitResult {
    let hart = cpu::hart_id();
    if platform.hart_invalid(hart) {
        error!(
            "{}: hart {hart} outside of {} managed harts",
            platform.name(),
            platform.hart_count()
        );
        return Err(InitError::HartSetupFailed(hart));
    }

    if cold_boot {
        if let Err(e) = platform.console_init() {
            warn!("{}: console unavailable: {e}", platform.name());
        }
    }
    platform.ipi_init(cold_boot)?;
    platform.timer_init(cold_boot)?;

    debug!(
        "{}: hart {hart} up ({} boot)",
        platform.name(),
        if cold_boot { "cold" } else { "warm" }
    );
    Ok(())
}
