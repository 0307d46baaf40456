// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! 8250/16550-compatible UART console driver.
#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

use bitflags::bitflags;
use lazyinit::LazyInit;
use sbiplat::{
    DriverError, DriverResult,
    device::{LineConfig, Parity, StopBits, UartData, WordLength},
    driver::ConsoleDevice,
    mmio,
};

// Register indices, before shift and offset are applied.
const RBR: usize = 0;
const THR: usize = 0;
const DLL: usize = 0;
const IER: usize = 1;
const DLM: usize = 1;
const FCR: usize = 2;
const LCR: usize = 3;
const MCR: usize = 4;
const LSR: usize = 5;
const SCR: usize = 7;

bitflags! {
    /// Line control register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Lcr: u8 {
        const WLS0 = 1 << 0;
        const WLS1 = 1 << 1;
        const STB = 1 << 2;
        const PEN = 1 << 3;
        const EPS = 1 << 4;
        const SPAR = 1 << 5;
        const BREAK = 1 << 6;
        const DLAB = 1 << 7;
    }
}

bitflags! {
    /// Line status register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Lsr: u8 {
        const DR = 1 << 0;
        const OE = 1 << 1;
        const PE = 1 << 2;
        const FE = 1 << 3;
        const BI = 1 << 4;
        const THRE = 1 << 5;
        const TEMT = 1 << 6;
    }
}

const FCR_FIFO_ENABLE: u32 = 0x01;

/// Baud generator divisor, `input_freq / (16 * baud)` rounded to nearest.
///
/// Returns `None` when the result does not fit the 16-bit divisor latch or
/// rounds down to zero.
pub const fn baud_divisor(input_freq: u32, baud: u32) -> Option<u16> {
    if baud == 0 {
        return None;
    }
    let div = (input_freq as u64 + 8 * baud as u64) / (16 * baud as u64);
    if div == 0 || div > u16::MAX as u64 {
        None
    } else {
        Some(div as u16)
    }
}

/// Encodes word length, stop bits and parity into line-control bits.
pub const fn line_bits(line: &LineConfig) -> Lcr {
    let wls = match line.word_len {
        WordLength::Five => Lcr::empty(),
        WordLength::Six => Lcr::WLS0,
        WordLength::Seven => Lcr::WLS1,
        WordLength::Eight => Lcr::WLS0.union(Lcr::WLS1),
    };
    let stb = match line.stop_bits {
        StopBits::One => Lcr::empty(),
        StopBits::Two => Lcr::STB,
    };
    let parity = match line.parity {
        Parity::None => Lcr::empty(),
        Parity::Odd => Lcr::PEN,
        Parity::Even => Lcr::PEN.union(Lcr::EPS),
        Parity::Mark => Lcr::PEN.union(Lcr::SPAR),
        Parity::Space => Lcr::PEN.union(Lcr::EPS).union(Lcr::SPAR),
    };
    wls.union(stb).union(parity)
}

fn get_reg(data: &UartData, reg: usize) -> u32 {
    let addr = data.reg_addr(reg);
    unsafe {
        match data.reg_width {
            1 => mmio::read::<u8>(addr) as u32,
            2 => mmio::read::<u16>(addr) as u32,
            _ => mmio::read::<u32>(addr),
        }
    }
}

fn set_reg(data: &UartData, reg: usize, val: u32) {
    let addr = data.reg_addr(reg);
    unsafe {
        match data.reg_width {
            1 => mmio::write::<u8>(addr, val as u8),
            2 => mmio::write::<u16>(addr, val as u16),
            _ => mmio::write::<u32>(addr, val),
        }
    }
}

fn line_status(data: &UartData) -> Lsr {
    Lsr::from_bits_truncate(get_reg(data, LSR) as u8)
}

/// One UART instance. `init` binds the descriptor exactly once.
pub struct Uart8250 {
    data: LazyInit<&'static UartData>,
}

impl Uart8250 {
    pub const fn new() -> Self {
        Self {
            data: LazyInit::new(),
        }
    }

    fn bound(&self) -> DriverResult<&'static UartData> {
        self.data.get().copied().ok_or(DriverError::NoDevice)
    }
}

impl Default for Uart8250 {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleDevice for Uart8250 {
    fn init(&self, data: &'static UartData) -> DriverResult {
        if !matches!(data.reg_width, 1 | 2 | 4) {
            return Err(DriverError::InvalidParam);
        }
        let div = baud_divisor(data.input_freq, data.baud_rate).ok_or(DriverError::InvalidParam)?;
        if self.data.is_inited() {
            return Err(DriverError::AlreadyInitialized);
        }

        if let Some(marker) = data.boot_marker {
            set_reg(data, THR, marker as u32);
        }
        set_reg(data, IER, 0);
        set_reg(data, LCR, Lcr::DLAB.bits() as u32);
        set_reg(data, DLL, (div & 0xff) as u32);
        set_reg(data, DLM, (div >> 8) as u32);
        set_reg(data, LCR, line_bits(&data.line).bits() as u32);
        set_reg(data, FCR, FCR_FIFO_ENABLE);
        set_reg(data, MCR, 0);
        // Drain stale line status and receive data.
        get_reg(data, LSR);
        get_reg(data, RBR);
        set_reg(data, SCR, 0);

        self.data.init_once(data);
        info!(
            "uart8250 @ {:#x}: {} baud, divisor {div}",
            data.addr, data.baud_rate
        );
        Ok(())
    }

    fn putc(&self, c: u8) -> DriverResult {
        let data = self.bound()?;
        while !line_status(data).contains(Lsr::THRE) {
            core::hint::spin_loop();
        }
        set_reg(data, THR, c as u32);
        Ok(())
    }

    fn getc(&self) -> DriverResult<Option<u8>> {
        let data = self.bound()?;
        if line_status(data).contains(Lsr::DR) {
            Ok(Some(get_reg(data, RBR) as u8))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    struct Window(&'static mut [u32]);

    impl Window {
        fn new() -> Self {
            Self(Vec::leak(vec![0u32; 0x40]))
        }

        fn addr(&self) -> usize {
            self.0.as_ptr() as usize
        }

        fn byte(&self, off: usize) -> u8 {
            unsafe { core::ptr::read_volatile((self.addr() + off) as *const u8) }
        }

        fn set_byte(&self, off: usize, val: u8) {
            unsafe { core::ptr::write_volatile((self.addr() + off) as *mut u8, val) }
        }
    }

    fn uart(addr: usize, reg_shift: u32, reg_width: usize) -> &'static UartData {
        Box::leak(Box::new(UartData {
            addr,
            size: 0x100,
            input_freq: 10_000_000,
            baud_rate: 115_200,
            line: LineConfig::EIGHT_N_ONE,
            reg_shift,
            reg_width,
            reg_offset: 0,
            boot_marker: Some(b'f'),
        }))
    }

    #[test]
    fn divisor_for_board_clock() {
        assert_eq!(baud_divisor(10_000_000, 115_200), Some(5));
        assert_eq!(baud_divisor(1_843_200, 115_200), Some(1));
        assert_eq!(baud_divisor(1_843_200, 9600), Some(12));
        assert_eq!(baud_divisor(10_000_000, 0), None);
        assert_eq!(baud_divisor(100, 115_200), None);
        assert_eq!(baud_divisor(u32::MAX, 1), None);
    }

    #[test]
    fn line_encoding() {
        assert_eq!(line_bits(&LineConfig::EIGHT_N_ONE).bits(), 0x03);
        let seven_e_two = LineConfig {
            word_len: WordLength::Seven,
            stop_bits: StopBits::Two,
            parity: Parity::Even,
        };
        assert_eq!(line_bits(&seven_e_two).bits(), 0x1e);
        let five_o_one = LineConfig {
            word_len: WordLength::Five,
            stop_bits: StopBits::One,
            parity: Parity::Odd,
        };
        assert_eq!(line_bits(&five_o_one).bits(), 0x08);
    }

    #[test]
    fn init_programs_divisor_and_line() {
        let win = Window::new();
        let data = uart(win.addr(), 0, 1);
        let dev = Uart8250::new();
        assert_eq!(dev.init(data), Ok(()));

        assert_eq!(win.byte(DLL), 5);
        assert_eq!(win.byte(DLM), 0);
        assert_eq!(win.byte(LCR), 0x03);
        assert_eq!(win.byte(FCR), 0x01);
        assert_eq!(win.byte(MCR), 0);
        assert_eq!(win.byte(SCR), 0);
    }

    #[test]
    fn init_honours_register_stride() {
        let win = Window::new();
        let data = uart(win.addr(), 2, 4);
        let dev = Uart8250::new();
        dev.init(data).unwrap();
        assert_eq!(win.byte(DLL << 2), 5);
        assert_eq!(win.byte(LCR << 2), 0x03);
        assert_eq!(win.byte(FCR << 2), 0x01);
    }

    #[test]
    fn bad_baud_is_rejected_without_touching_registers() {
        let win = Window::new();
        win.set_byte(LCR, 0xaa);
        let data = Box::leak(Box::new(UartData {
            baud_rate: 10_000_000,
            ..*uart(win.addr(), 0, 1)
        }));
        let dev = Uart8250::new();
        assert_eq!(dev.init(data), Err(DriverError::InvalidParam));
        assert_eq!(win.byte(LCR), 0xaa);
        assert_eq!(dev.putc(b'x'), Err(DriverError::NoDevice));
    }

    #[test]
    fn putc_and_getc_follow_line_status() {
        let win = Window::new();
        let dev = Uart8250::new();
        dev.init(uart(win.addr(), 0, 1)).unwrap();

        win.set_byte(LSR, (Lsr::THRE | Lsr::TEMT).bits());
        dev.putc(b'x').unwrap();
        assert_eq!(win.byte(THR), b'x');
        assert_eq!(dev.getc(), Ok(None));

        win.set_byte(RBR, b'y');
        win.set_byte(LSR, Lsr::DR.bits());
        assert_eq!(dev.getc(), Ok(Some(b'y')));
    }

    #[test]
    fn second_init_is_refused() {
        let win = Window::new();
        let data = uart(win.addr(), 0, 1);
        let dev = Uart8250::new();
        dev.init(data).unwrap();
        assert_eq!(dev.init(data), Err(DriverError::AlreadyInitialized));
    }

    proptest! {
        #[test]
        fn divisor_is_nearest(freq in 1_000_000u32..100_000_000, baud in 300u32..1_000_000) {
            if let Some(div) = baud_divisor(freq, baud) {
                let exact = freq as f64 / (16.0 * baud as f64);
                prop_assert!((div as f64 - exact).abs() <= 0.5 + f64::EPSILON);
            } else {
                prop_assert!(freq as u64 + 8 * (baud as u64) < 16 * baud as u64);
            }
        }
    }
}
