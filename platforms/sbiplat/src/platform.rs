// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Platform identity record.

use bitflags::bitflags;

use crate::{HartId, InitError, InitResult, PlatformOps};

bitflags! {
    /// Optional capabilities advertised to the runtime.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlatformFeatures: u64 {
        /// The platform can read the global time-base.
        const TIMER_VALUE = 1 << 0;
        const HART_HOTPLUG = 1 << 1;
        /// Misaligned load/store faults are delegated to the next stage.
        const MFAULTS_DELEGATION = 1 << 2;
        const HART_SECONDARY_BOOT = 1 << 3;
    }
}

impl PlatformFeatures {
    pub const DEFAULT: Self = Self::MFAULTS_DELEGATION;
}

/// Per-hart stack size used when a board has no special needs.
pub const DEFAULT_HART_STACK_SIZE: u32 = 8192;

/// Heap size sized for `hart_count` harts.
pub const fn default_heap_size(hart_count: u32) -> u32 {
    0x8000 + 0x800 * hart_count
}

/// Packs a `(major, minor)` version pair.
pub const fn version(major: u16, minor: u16) -> u32 {
    ((major as u32) << 16) | minor as u32
}

const fn unpack_version(v: u32) -> (u16, u16) {
    ((v >> 16) as u16, v as u16)
}

/// Version of the platform interface defined by this crate.
pub const FIRMWARE_VERSION: u32 = version(
    const_str::parse!(env!("CARGO_PKG_VERSION_MAJOR"), u16),
    const_str::parse!(env!("CARGO_PKG_VERSION_MINOR"), u16),
);

/// Static description of a board, read by the runtime at any time.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub name: &'static str,
    pub firmware_version: u32,
    pub platform_version: u32,
    pub features: PlatformFeatures,
    pub hart_count: u32,
    pub hart_stack_size: u32,
    pub heap_size: u32,
    pub ops: &'static PlatformOps,
}

impl Platform {
    /// Checks the invariants the runtime relies on.
    ///
    /// Meant for `const` assertions in board crates.
    pub const fn is_valid(&self) -> bool {
        !self.name.is_empty()
            && self.hart_count != 0
            && self.hart_stack_size != 0
            && self.hart_stack_size % 16 == 0
            && self.heap_size != 0
            && self.features.contains(PlatformFeatures::TIMER_VALUE)
                == self.ops.timer_value.is_some()
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn firmware_version(&self) -> (u16, u16) {
        unpack_version(self.firmware_version)
    }

    pub const fn platform_version(&self) -> (u16, u16) {
        unpack_version(self.platform_version)
    }

    pub const fn has_feature(&self, feature: PlatformFeatures) -> bool {
        self.features.contains(feature)
    }

    pub const fn hart_count(&self) -> u32 {
        self.hart_count
    }

    /// Returns `true` if `hart` is not managed by this platform.
    pub const fn hart_invalid(&self, hart: HartId) -> bool {
        hart >= self.hart_count as usize
    }

    pub const fn hart_stack_size(&self) -> u32 {
        self.hart_stack_size
    }

    /// Stack memory needed for all harts.
    pub const fn total_stack_size(&self) -> usize {
        self.hart_count as usize * self.hart_stack_size as usize
    }

    pub const fn heap_size(&self) -> u32 {
        self.heap_size
    }

    pub const fn ops(&self) -> &'static PlatformOps {
        self.ops
    }

    pub fn console_init(&self) -> InitResult {
        (self.ops.console_init)()
    }

    pub fn ipi_init(&self, cold_boot: bool) -> InitResult {
        (self.ops.ipi_init)(cold_boot)
    }

    pub fn timer_init(&self, cold_boot: bool) -> InitResult {
        (self.ops.timer_init)(cold_boot)
    }

    pub fn console_putc(&self, c: u8) -> InitResult {
        let f = hook(self.ops.console_putc)?;
        f(c)
    }

    pub fn console_getc(&self) -> InitResult<Option<u8>> {
        let f = hook(self.ops.console_getc)?;
        f()
    }

    pub fn ipi_send(&self, hart: HartId) -> InitResult {
        let f = hook(self.ops.ipi_send)?;
        f(hart)
    }

    pub fn ipi_clear(&self, hart: HartId) -> InitResult {
        let f = hook(self.ops.ipi_clear)?;
        f(hart)
    }

    pub fn timer_value(&self) -> InitResult<u64> {
        let f = hook(self.ops.timer_value)?;
        f()
    }

    pub fn timer_event_start(&self, next: u64) -> InitResult {
        let f = hook(self.ops.timer_event_start)?;
        f(next)
    }

    pub fn timer_event_stop(&self) -> InitResult {
        let f = hook(self.ops.timer_event_stop)?;
        f()
    }
}

fn hook<F>(f: Option<F>) -> InitResult<F> {
    f.ok_or(InitError::DeviceUnavailable)
}
