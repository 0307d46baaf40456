// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! ACLINT machine-level timer device.
use lazyinit::LazyInit;
use sbiplat::{
    DriverError, DriverResult, HartId, device::MtimerData, driver::TimerDevice, mmio,
};

/// Required alignment of the `mtime` and `mtimecmp` registers.
pub const ACLINT_MTIMER_ALIGN: usize = 0x8;

/// Compare value that never fires.
const DISARMED: u64 = u64::MAX;

/// One MTIMER instance. Cold init binds the descriptor exactly once.
pub struct AclintMtimer {
    data: LazyInit<&'static MtimerData>,
}

impl AclintMtimer {
    pub const fn new() -> Self {
        Self {
            data: LazyInit::new(),
        }
    }

    fn bound(&self) -> DriverResult<&'static MtimerData> {
        self.data.get().copied().ok_or(DriverError::NoDevice)
    }

    fn mtimecmp(&self, hart: HartId) -> DriverResult<(&'static MtimerData, usize)> {
        let data = self.bound()?;
        if !data.covers(hart) {
            return Err(DriverError::InvalidHart(hart));
        }
        Ok((data, data.mtimecmp_addr_of(hart)))
    }
}

impl Default for AclintMtimer {
    fn default() -> Self {
        Self::new()
    }
}

fn read64(data: &MtimerData, addr: usize) -> u64 {
    if data.has_64bit_mmio {
        return unsafe { mmio::read::<u64>(addr) };
    }
    loop {
        let hi = unsafe { mmio::read::<u32>(addr + 4) };
        let lo = unsafe { mmio::read::<u32>(addr) };
        if unsafe { mmio::read::<u32>(addr + 4) } == hi {
            return ((hi as u64) << 32) | lo as u64;
        }
    }
}

/// Writes a 64-bit register. On 32-bit buses the low word is parked at
/// `parked` first so no intermediate value can match the other half.
fn write64(data: &MtimerData, addr: usize, val: u64, parked: u32) {
    if data.has_64bit_mmio {
        unsafe { mmio::write::<u64>(addr, val) };
        return;
    }
    unsafe {
        mmio::write::<u32>(addr, parked);
        mmio::write::<u32>(addr + 4, (val >> 32) as u32);
        mmio::write::<u32>(addr, val as u32);
    }
}

fn write_mtimecmp(data: &MtimerData, addr: usize, val: u64) {
    write64(data, addr, val, u32::MAX);
}

impl TimerDevice for AclintMtimer {
    fn cold_init(&self, data: &'static MtimerData) -> DriverResult {
        for addr in [data.mtime_addr, data.mtimecmp_addr] {
            if addr & (ACLINT_MTIMER_ALIGN - 1) != 0 {
                return Err(DriverError::Misaligned {
                    addr,
                    align: ACLINT_MTIMER_ALIGN,
                });
            }
        }
        if self.data.is_inited() {
            return Err(DriverError::AlreadyInitialized);
        }
        self.data.init_once(data);

        write64(data, data.mtime_addr, 0, 0);
        for hart in data.first_hartid..data.first_hartid + data.hart_count {
            write_mtimecmp(data, data.mtimecmp_addr_of(hart), DISARMED);
        }
        info!(
            "mtimer @ {:#x}: {} Hz, harts {}..{}",
            data.addr,
            data.mtime_freq,
            data.first_hartid,
            data.first_hartid + data.hart_count
        );
        Ok(())
    }

    fn warm_init(&self, hart: HartId) -> DriverResult {
        self.event_stop(hart)
    }

    fn frequency(&self) -> Option<u64> {
        self.data.get().map(|data| data.mtime_freq)
    }

    fn value(&self) -> DriverResult<u64> {
        let data = self.bound()?;
        Ok(read64(data, data.mtime_addr))
    }

    fn event_start(&self, hart: HartId, next: u64) -> DriverResult {
        let (data, addr) = self.mtimecmp(hart)?;
        write_mtimecmp(data, addr, next);
        Ok(())
    }

    fn event_stop(&self, hart: HartId) -> DriverResult {
        let (data, addr) = self.mtimecmp(hart)?;
        write_mtimecmp(data, addr, DISARMED);
        Ok(())
    }
}
