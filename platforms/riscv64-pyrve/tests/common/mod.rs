#![allow(dead_code)]

use sbiplat::device::{LineConfig, MswiData, MtimerData, UartData};

/// A leaked, zeroed, page-aligned buffer standing in for an MMIO window.
pub fn window(size: usize) -> usize {
    let words = (size + 0x1000).div_ceil(8);
    let buf: &'static mut [u64] = Vec::leak(vec![0u64; words]);
    (buf.as_mut_ptr() as usize + 0xfff) & !0xfff
}

pub fn read8(addr: usize) -> u8 {
    unsafe { core::ptr::read_volatile(addr as *const u8) }
}

pub fn read32(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

pub fn read64(addr: usize) -> u64 {
    unsafe { core::ptr::read_volatile(addr as *const u64) }
}

pub fn write32(addr: usize, val: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, val) }
}

pub fn write64(addr: usize, val: u64) {
    unsafe { core::ptr::write_volatile(addr as *mut u64, val) }
}

pub fn leak<T>(val: T) -> &'static T {
    Box::leak(Box::new(val))
}

/// MSWI laid out like the board's, on a host buffer.
pub fn mswi(hart_count: usize) -> &'static MswiData {
    leak(MswiData {
        addr: window(0x4000),
        size: 0x4000,
        first_hartid: 0,
        hart_count,
    })
}

/// MTIMER laid out like the board's, on a host buffer.
pub fn mtimer(hart_count: usize) -> &'static MtimerData {
    let base = window(0x8000);
    leak(MtimerData {
        addr: base,
        size: 0x8000,
        mtime_freq: 10_000_000,
        mtime_addr: base + 0x7ff8,
        mtime_size: 0x8,
        mtimecmp_addr: base,
        mtimecmp_size: 0x7ff8,
        first_hartid: 0,
        hart_count,
        has_64bit_mmio: true,
    })
}

/// UART laid out like the board's, on a host buffer.
pub fn uart() -> &'static UartData {
    leak(UartData {
        addr: window(0x100),
        size: 0x100,
        input_freq: 10_000_000,
        baud_rate: 115200,
        line: LineConfig::EIGHT_N_ONE,
        reg_shift: 0,
        reg_width: 1,
        reg_offset: 0,
        boot_marker: Some(b'f'),
    })
}
