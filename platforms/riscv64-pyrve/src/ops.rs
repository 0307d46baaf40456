// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Capability table of the board.

use aclint::{AclintMswi, AclintMtimer};
use sbiplat::{
    HartId, InitResult, PlatformOps, cpu,
    driver::{ConsoleDevice, IpiDevice, TimerDevice},
};
use uart8250::Uart8250;

use crate::{
    config::plat::LOG_LEVEL,
    devices::{MSWI, MTIMER, UART},
    init::{console_init_with, ipi_init_with, runtime_result, timer_init_with},
};

pub(crate) static CONSOLE: Uart8250 = Uart8250::new();
pub(crate) static IPI: AclintMswi = AclintMswi::new();
pub(crate) static TIMER: AclintMtimer = AclintMtimer::new();

fn console_init() -> InitResult {
    console_init_with(&CONSOLE, &UART)?;
    sbilog::init_logger();
    sbilog::set_log_level(LOG_LEVEL);
    Ok(())
}

fn ipi_init(cold_boot: bool) -> InitResult {
    ipi_init_with(&IPI, &MSWI, cpu::hart_id(), cold_boot)?;
    cpu::enable_local_ipi();
    Ok(())
}

fn timer_init(cold_boot: bool) -> InitResult {
    timer_init_with(&TIMER, &MTIMER, cpu::hart_id(), cold_boot)
}

fn console_putc(c: u8) -> InitResult {
    runtime_result(CONSOLE.putc(c))
}

fn console_getc() -> InitResult<Option<u8>> {
    runtime_result(CONSOLE.getc())
}

fn ipi_send(hart: HartId) -> InitResult {
    runtime_result(IPI.send(hart))
}

fn ipi_clear(hart: HartId) -> InitResult {
    runtime_result(IPI.clear(hart))
}

fn timer_value() -> InitResult<u64> {
    runtime_result(TIMER.value())
}

fn timer_event_start(next: u64) -> InitResult {
    runtime_result(TIMER.event_start(cpu::hart_id(), next))
}

fn timer_event_stop() -> InitResult {
    runtime_result(TIMER.event_stop(cpu::hart_id()))
}

pub(crate) const OPS: PlatformOps = PlatformOps {
    console_putc: Some(console_putc),
    console_getc: Some(console_getc),
    ipi_send: Some(ipi_send),
    ipi_clear: Some(ipi_clear),
    timer_value: Some(timer_value),
    timer_event_start: Some(timer_event_start),
    timer_event_stop: Some(timer_event_stop),
    ..PlatformOps::new(console_init, ipi_init, timer_init)
};

/// Entry points of the board, shared read-only by every hart.
pub static PLATFORM_OPS: PlatformOps = OPS;
