// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Interfaces the bring-up code expects from device drivers.
//!
//! Shared devices follow a two-phase protocol: `cold_init` binds the
//! descriptor and programs global state exactly once, `warm_init` performs
//! the per-hart step and must only run after a successful `cold_init`.
//! Drivers report a warm step without a bound descriptor as
//! [`DriverError::NoDevice`](crate::DriverError::NoDevice).

use crate::{
    DriverResult, HartId,
    device::{MswiData, MtimerData, UartData},
};

/// Inter-processor interrupt controller.
pub trait IpiDevice: Sync {
    fn cold_init(&self, data: &'static MswiData) -> DriverResult;

    fn warm_init(&self, hart: HartId) -> DriverResult;

    /// Raises a software interrupt on `hart`.
    fn send(&self, hart: HartId) -> DriverResult;

    /// Clears the pending software interrupt of `hart`.
    fn clear(&self, hart: HartId) -> DriverResult;
}

/// Platform timer.
pub trait TimerDevice: Sync {
    fn cold_init(&self, data: &'static MtimerData) -> DriverResult;

    fn warm_init(&self, hart: HartId) -> DriverResult;

    /// Tick frequency registered by the cold step.
    fn frequency(&self) -> Option<u64>;

    /// Current value of the global time-base.
    fn value(&self) -> DriverResult<u64>;

    /// Programs the compare register of `hart` to fire at `next`.
    fn event_start(&self, hart: HartId, next: u64) -> DriverResult;

    /// Disarms the compare register of `hart`.
    fn event_stop(&self, hart: HartId) -> DriverResult;
}

/// Platform console.
pub trait ConsoleDevice: Sync {
    /// Single-phase init from the descriptor's address, input clock, baud
    /// rate and line parameters.
    fn init(&self, data: &'static UartData) -> DriverResult;

    fn putc(&self, c: u8) -> DriverResult;

    /// Non-blocking receive.
    fn getc(&self) -> DriverResult<Option<u8>>;
}
