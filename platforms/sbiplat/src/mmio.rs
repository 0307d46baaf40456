// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Volatile accessors for memory-mapped device registers.

use core::ptr;

/// Reads a device register.
///
/// # Safety
///
/// `addr` must point to a mapped register that is valid and suitably aligned
/// for `T`.
#[inline]
pub unsafe fn read<T: Copy>(addr: usize) -> T {
    unsafe { ptr::read_volatile(addr as *const T) }
}

/// Writes a device register.
///
/// # Safety
///
/// `addr` must point to a mapped register that is valid and suitably aligned
/// for `T`.
#[inline]
pub unsafe fn write<T>(addr: usize, val: T) {
    unsafe { ptr::write_volatile(addr as *mut T, val) }
}
