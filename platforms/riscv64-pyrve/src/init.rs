// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Cold/warm bring-up of the board devices.
//!
//! Each function takes the driver and descriptor explicitly so the sequence
//! can run against any implementation of the driver interfaces. The runtime
//! must run the cold path of a device class exactly once, and it must
//! complete before any hart takes the warm path. Nothing here enforces that
//! ordering: the only record of a finished cold step is the descriptor the
//! driver bound.

use sbiplat::{
    DescriptorError, DriverError, DriverResult, HartId, InitError, InitResult,
    device::{MswiData, MtimerData, UartData},
    driver::{ConsoleDevice, IpiDevice, TimerDevice},
};

fn bad_descriptor(what: &str, addr: usize, e: DescriptorError) -> InitError {
    error!("{what} @ {addr:#x}: invalid descriptor: {e}");
    InitError::from(e)
}

fn cold_failure(what: &str, addr: usize, e: DriverError) -> InitError {
    error!("{what} @ {addr:#x}: cold init failed: {e}");
    InitError::DeviceUnavailable
}

fn warm_failure(what: &str, hart: HartId, e: DriverError) -> InitError {
    match e {
        DriverError::NoDevice => {
            error!("{what}: hart {hart} set up before the device was initialized");
            InitError::DeviceUnavailable
        }
        e => {
            error!("{what}: hart {hart} setup failed: {e}");
            InitError::HartSetupFailed(hart)
        }
    }
}

/// Maps a driver result on a runtime path.
///
/// An unbound device reads as unavailable, any other failure is passed
/// through with its cause.
pub fn runtime_result<T>(res: DriverResult<T>) -> InitResult<T> {
    res.map_err(|e| match e {
        DriverError::NoDevice => InitError::DeviceUnavailable,
        e => InitError::Driver(e),
    })
}

/// Programs the console. Single phase, cold hart only.
pub fn console_init_with<C: ConsoleDevice>(dev: &C, data: &'static UartData) -> InitResult {
    data.validate()
        .map_err(|e| bad_descriptor("uart", data.addr, e))?;
    dev.init(data)
        .map_err(|e| cold_failure("uart", data.addr, e))
}

/// Brings up the IPI controller for `hart`.
///
/// With `cold_boot` the controller is validated and initialized first; a
/// failure there returns before the per-hart step.
pub fn ipi_init_with<D: IpiDevice>(
    dev: &D,
    data: &'static MswiData,
    hart: HartId,
    cold_boot: bool,
) -> InitResult {
    if cold_boot {
        data.validate()
            .map_err(|e| bad_descriptor("mswi", data.addr, e))?;
        dev.cold_init(data)
            .map_err(|e| cold_failure("mswi", data.addr, e))?;
    }
    dev.warm_init(hart)
        .map_err(|e| warm_failure("mswi", hart, e))?;
    debug!("mswi: hart {hart} ready");
    Ok(())
}

/// Brings up the timer for `hart`. Same shape as [`ipi_init_with`].
pub fn timer_init_with<T: TimerDevice>(
    dev: &T,
    data: &'static MtimerData,
    hart: HartId,
    cold_boot: bool,
) -> InitResult {
    if cold_boot {
        data.validate()
            .map_err(|e| bad_descriptor("mtimer", data.addr, e))?;
        dev.cold_init(data)
            .map_err(|e| cold_failure("mtimer", data.addr, e))?;
    }
    dev.warm_init(hart)
        .map_err(|e| warm_failure("mtimer", hart, e))?;
    debug!("mtimer: hart {hart} ready");
    Ok(())
}
