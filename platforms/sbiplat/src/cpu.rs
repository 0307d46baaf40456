// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Hart identity and hart-local interrupt enables.

use crate::HartId;

/// Returns the id of the calling hart.
#[inline]
pub fn hart_id() -> HartId {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "riscv64")] {
            riscv::register::mhartid::read()
        } else {
            0
        }
    }
}

/// Unmasks machine software interrupts on the calling hart.
#[inline]
pub fn enable_local_ipi() {
    #[cfg(target_arch = "riscv64")]
    unsafe {
        riscv::register::mie::set_msoft()
    };
}
