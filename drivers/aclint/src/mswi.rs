// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! ACLINT machine-level software interrupt device.
use lazyinit::LazyInit;
use sbiplat::{
    DriverError, DriverResult, HartId, device::MswiData, driver::IpiDevice, mmio,
};

/// Required alignment of an MSWI window.
pub const ACLINT_MSWI_ALIGN: usize = 0x1000;

/// One MSWI instance. Cold init binds the descriptor exactly once.
pub struct AclintMswi {
    data: LazyInit<&'static MswiData>,
}

impl AclintMswi {
    pub const fn new() -> Self {
        Self {
            data: LazyInit::new(),
        }
    }

    fn msip(&self, hart: HartId) -> DriverResult<usize> {
        let data = self.data.get().ok_or(DriverError::NoDevice)?;
        if !data.covers(hart) {
            return Err(DriverError::InvalidHart(hart));
        }
        Ok(data.msip_addr(hart))
    }

    fn set_msip(&self, hart: HartId, val: u32) -> DriverResult {
        let addr = self.msip(hart)?;
        unsafe { mmio::write::<u32>(addr, val) };
        Ok(())
    }
}

impl Default for AclintMswi {
    fn default() -> Self {
        Self::new()
    }
}

impl IpiDevice for AclintMswi {
    fn cold_init(&self, data: &'static MswiData) -> DriverResult {
        if data.addr & (ACLINT_MSWI_ALIGN - 1) != 0 {
            return Err(DriverError::Misaligned {
                addr: data.addr,
                align: ACLINT_MSWI_ALIGN,
            });
        }
        if self.data.is_inited() {
            return Err(DriverError::AlreadyInitialized);
        }
        self.data.init_once(data);
        for hart in data.first_hartid..data.first_hartid + data.hart_count {
            unsafe { mmio::write::<u32>(data.msip_addr(hart), 0) };
        }
        info!(
            "mswi @ {:#x}: harts {}..{}",
            data.addr,
            data.first_hartid,
            data.first_hartid + data.hart_count
        );
        Ok(())
    }

    fn warm_init(&self, hart: HartId) -> DriverResult {
        self.set_msip(hart, 0)
    }

    fn send(&self, hart: HartId) -> DriverResult {
        self.set_msip(hart, 1)
    }

    fn clear(&self, hart: HartId) -> DriverResult {
        self.set_msip(hart, 0)
    }
}
