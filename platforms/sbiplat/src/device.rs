// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Device descriptors and their register-window geometry.
//!
//! A descriptor is a plain, immutable record of where a device lives on the
//! bus and which harts it serves. Boards declare them as `static` items; the
//! bring-up code validates them before handing them to a driver.

use crate::{DescriptorError, HartId};

/// Exclusive upper bound on hart ids an ACLINT instance can serve.
pub const HART_ID_LIMIT: usize = 4096;

/// Size of one MSIP register in an ACLINT MSWI window.
pub const MSIP_REG_SIZE: usize = 4;
/// Size of one MTIMECMP register in an ACLINT MTIMER window.
pub const MTIMECMP_REG_SIZE: usize = 8;
/// Size of the MTIME register.
pub const MTIME_REG_SIZE: usize = 8;

/// Number of addressable 8250 registers (`RBR` .. `SCR`).
pub const UART_REG_COUNT: usize = 8;

/// A named half-open MMIO window `[addr, addr + size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceRegion {
    pub name: &'static str,
    pub addr: usize,
    pub size: usize,
}

impl DeviceRegion {
    pub const fn new(name: &'static str, addr: usize, size: usize) -> Self {
        Self { name, addr, size }
    }

    /// Exclusive end address, or `None` if the window wraps.
    pub const fn end(&self) -> Option<usize> {
        self.addr.checked_add(self.size)
    }

    /// Returns `true` if the window is non-empty and does not wrap.
    pub const fn is_valid(&self) -> bool {
        self.size != 0 && self.end().is_some()
    }

    /// Returns `true` if the two windows share at least one byte.
    pub const fn overlaps(&self, other: &Self) -> bool {
        if self.size == 0 || other.size == 0 {
            return false;
        }
        let self_end = self.addr.saturating_add(self.size);
        let other_end = other.addr.saturating_add(other.size);
        self.addr < other_end && other.addr < self_end
    }

    /// Returns `true` if `other` lies entirely inside this window.
    pub const fn contains(&self, other: &Self) -> bool {
        match (self.end(), other.end()) {
            (Some(end), Some(other_end)) => other.addr >= self.addr && other_end <= end,
            _ => false,
        }
    }
}

/// Checks that no two regions overlap.
///
/// On failure returns the indices of the first overlapping pair.
pub const fn check_disjoint(regions: &[DeviceRegion]) -> Result<(), (usize, usize)> {
    let mut i = 0;
    while i < regions.len() {
        let mut j = i + 1;
        while j < regions.len() {
            if regions[i].overlaps(&regions[j]) {
                return Err((i, j));
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

fn check_window(addr: usize, size: usize) -> Result<(), DescriptorError> {
    if addr == 0 {
        return Err(DescriptorError::NullAddress);
    }
    if size == 0 || addr.checked_add(size).is_none() {
        return Err(DescriptorError::BadWindow { addr, size });
    }
    Ok(())
}

fn check_harts(first: HartId, count: usize) -> Result<(), DescriptorError> {
    match first.checked_add(count) {
        Some(end) if count != 0 && end <= HART_ID_LIMIT => Ok(()),
        _ => Err(DescriptorError::BadHartRange { first, count }),
    }
}

const fn hart_in_range(first: HartId, count: usize, hart: HartId) -> bool {
    hart >= first && hart - first < count
}

/// ACLINT MSWI (software interrupt) controller descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MswiData {
    pub addr: usize,
    pub size: usize,
    pub first_hartid: HartId,
    pub hart_count: usize,
}

impl MswiData {
    pub const fn region(&self) -> DeviceRegion {
        DeviceRegion::new("mswi", self.addr, self.size)
    }

    /// Returns `true` if `hart` is served by this controller.
    pub const fn covers(&self, hart: HartId) -> bool {
        hart_in_range(self.first_hartid, self.hart_count, hart)
    }

    /// Address of the MSIP register belonging to `hart`.
    ///
    /// The caller must have checked [`covers`](Self::covers).
    pub const fn msip_addr(&self, hart: HartId) -> usize {
        self.addr + (hart - self.first_hartid) * MSIP_REG_SIZE
    }

    pub fn validate(&self) -> Result<(), DescriptorError> {
        check_window(self.addr, self.size)?;
        check_harts(self.first_hartid, self.hart_count)?;
        let needed = self.hart_count * MSIP_REG_SIZE;
        if self.size < needed {
            return Err(DescriptorError::TooSmall {
                needed,
                size: self.size,
            });
        }
        Ok(())
    }
}

/// ACLINT MTIMER controller descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MtimerData {
    /// Base of the controller window holding both register regions.
    pub addr: usize,
    pub size: usize,
    /// Tick frequency in Hz, shared by every hart of this controller.
    pub mtime_freq: u64,
    pub mtime_addr: usize,
    pub mtime_size: usize,
    pub mtimecmp_addr: usize,
    pub mtimecmp_size: usize,
    pub first_hartid: HartId,
    pub hart_count: usize,
    /// Whether `mtime`/`mtimecmp` accept native 64-bit accesses.
    pub has_64bit_mmio: bool,
}

impl MtimerData {
    pub const fn region(&self) -> DeviceRegion {
        DeviceRegion::new("mtimer", self.addr, self.size)
    }

    pub const fn mtime_region(&self) -> DeviceRegion {
        DeviceRegion::new("mtime", self.mtime_addr, self.mtime_size)
    }

    pub const fn mtimecmp_region(&self) -> DeviceRegion {
        DeviceRegion::new("mtimecmp", self.mtimecmp_addr, self.mtimecmp_size)
    }

    pub const fn covers(&self, hart: HartId) -> bool {
        hart_in_range(self.first_hartid, self.hart_count, hart)
    }

    /// Address of the MTIMECMP register belonging to `hart`.
    ///
    /// The caller must have checked [`covers`](Self::covers).
    pub const fn mtimecmp_addr_of(&self, hart: HartId) -> usize {
        self.mtimecmp_addr + (hart - self.first_hartid) * MTIMECMP_REG_SIZE
    }

    pub fn validate(&self) -> Result<(), DescriptorError> {
        check_window(self.addr, self.size)?;
        if self.mtime_freq == 0 {
            return Err(DescriptorError::BadParam("mtime_freq"));
        }
        check_harts(self.first_hartid, self.hart_count)?;

        let window = self.region();
        let mtime = self.mtime_region();
        let mtimecmp = self.mtimecmp_region();
        if !mtime.is_valid() || !mtimecmp.is_valid() {
            return Err(DescriptorError::OutOfWindow);
        }
        if self.mtime_size < MTIME_REG_SIZE {
            return Err(DescriptorError::TooSmall {
                needed: MTIME_REG_SIZE,
                size: self.mtime_size,
            });
        }
        let needed = self.hart_count * MTIMECMP_REG_SIZE;
        if self.mtimecmp_size < needed {
            return Err(DescriptorError::TooSmall {
                needed,
                size: self.mtimecmp_size,
            });
        }
        if mtime.overlaps(&mtimecmp) {
            return Err(DescriptorError::Overlap);
        }
        if !window.contains(&mtime) || !window.contains(&mtimecmp) {
            return Err(DescriptorError::OutOfWindow);
        }
        Ok(())
    }
}

/// Serial word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordLength {
    Five,
    Six,
    Seven,
    Eight,
}

/// Number of stop bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
    Mark,
    Space,
}

/// Line parameters programmed into a UART at bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConfig {
    pub word_len: WordLength,
    pub stop_bits: StopBits,
    pub parity: Parity,
}

impl LineConfig {
    /// 8 data bits, no parity, 1 stop bit.
    pub const EIGHT_N_ONE: Self = Self {
        word_len: WordLength::Eight,
        stop_bits: StopBits::One,
        parity: Parity::None,
    };
}

/// 8250-compatible UART descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartData {
    pub addr: usize,
    pub size: usize,
    /// Input clock of the baud generator in Hz.
    pub input_freq: u32,
    pub baud_rate: u32,
    pub line: LineConfig,
    /// Register index `n` lives at `addr + reg_offset + (n << reg_shift)`.
    pub reg_shift: u32,
    /// Access width of each register in bytes (1, 2 or 4).
    pub reg_width: usize,
    pub reg_offset: usize,
    /// Byte written to the data register before the line is programmed.
    ///
    /// Board-specific quirk; `None` on boards that do not need it.
    pub boot_marker: Option<u8>,
}

impl UartData {
    pub const fn region(&self) -> DeviceRegion {
        DeviceRegion::new("uart", self.addr, self.size)
    }

    /// Address of register `reg` after applying offset and shift.
    pub const fn reg_addr(&self, reg: usize) -> usize {
        self.addr + self.reg_offset + (reg << self.reg_shift)
    }

    pub fn validate(&self) -> Result<(), DescriptorError> {
        check_window(self.addr, self.size)?;
        if self.input_freq == 0 {
            return Err(DescriptorError::BadParam("input_freq"));
        }
        if self.baud_rate == 0 {
            return Err(DescriptorError::BadParam("baud_rate"));
        }
        if !matches!(self.reg_width, 1 | 2 | 4) {
            return Err(DescriptorError::BadParam("reg_width"));
        }
        if self.reg_shift > 4 {
            return Err(DescriptorError::BadParam("reg_shift"));
        }
        let needed = ((UART_REG_COUNT - 1) << self.reg_shift)
            .checked_add(self.reg_width)
            .and_then(|span| span.checked_add(self.reg_offset))
            .ok_or(DescriptorError::BadWindow {
                addr: self.addr,
                size: self.size,
            })?;
        if self.size < needed {
            return Err(DescriptorError::TooSmall {
                needed,
                size: self.size,
            });
        }
        Ok(())
    }
}
