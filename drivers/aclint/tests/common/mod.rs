#![allow(dead_code)]

/// A leaked, zeroed, page-aligned buffer standing in for an MMIO window.
pub fn window(size: usize) -> usize {
    let words = (size + 0x1000).div_ceil(8);
    let buf: &'static mut [u64] = Vec::leak(vec![0u64; words]);
    (buf.as_mut_ptr() as usize + 0xfff) & !0xfff
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

pub fn leak<T>(val: T) -> &'static T {
    Box::leak(Box::new(val))
}
