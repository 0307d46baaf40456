// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! The capability table a board hands to the firmware runtime.

use crate::{HartId, InitResult};

/// Entry points a platform exposes to the runtime.
///
/// Boards build this as a `static`; it is shared read-only by every hart.
/// The three bring-up hooks are mandatory. The device hooks are only
/// meaningful after the matching cold step succeeded and are `None` on boards
/// that do not provide them.
#[derive(Clone, Copy)]
pub struct PlatformOps {
    /// Programs the console. Called once, on the cold hart.
    pub console_init: fn() -> InitResult,
    /// Brings up the IPI controller; `true` selects the cold path.
    pub ipi_init: fn(bool) -> InitResult,
    /// Brings up the timer; `true` selects the cold path.
    pub timer_init: fn(bool) -> InitResult,

    pub console_putc: Option<fn(u8) -> InitResult>,
    pub console_getc: Option<fn() -> InitResult<Option<u8>>>,
    pub ipi_send: Option<fn(HartId) -> InitResult>,
    pub ipi_clear: Option<fn(HartId) -> InitResult>,
    pub timer_value: Option<fn() -> InitResult<u64>>,
    /// Arms the calling hart's timer event at an absolute tick value.
    pub timer_event_start: Option<fn(u64) -> InitResult>,
    pub timer_event_stop: Option<fn() -> InitResult>,
}

impl PlatformOps {
    /// Creates a table with only the bring-up hooks populated.
    pub const fn new(
        console_init: fn() -> InitResult,
        ipi_init: fn(bool) -> InitResult,
        timer_init: fn(bool) -> InitResult,
    ) -> Self {
        Self {
            console_init,
            ipi_init,
            timer_init,
            console_putc: None,
            console_getc: None,
            ipi_send: None,
            ipi_clear: None,
            timer_value: None,
            timer_event_start: None,
            timer_event_stop: None,
        }
    }
}

impl core::fmt::Debug for PlatformOps {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlatformOps")
            .field("console_putc", &self.console_putc.is_some())
            .field("console_getc", &self.console_getc.is_some())
            .field("ipi_send", &self.ipi_send.is_some())
            .field("ipi_clear", &self.ipi_clear.is_some())
            .field("timer_value", &self.timer_value.is_some())
            .field("timer_event_start", &self.timer_event_start.is_some())
            .field("timer_event_stop", &self.timer_event_stop.is_some())
            .finish_non_exhaustive()
    }
}
