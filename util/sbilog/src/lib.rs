// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Firmware logger.
//!
//! Installs a [`log`] backend that prefixes every record with the boot time
//! and the id of the hart that emitted it. Output, clock and hart id are
//! supplied by the board through [`LoggerAdapter`]; with the `std` feature
//! everything goes to the host's stdout instead.
#![cfg_attr(not(feature = "std"), no_std)]

use core::{
    fmt::{self, Write},
    str::FromStr,
};

#[cfg(not(feature = "std"))]
use crate_interface::call_interface;
use log::{Level, LevelFilter, Log, Metadata, Record};
pub use log::{debug, error, info, trace, warn};

#[macro_export]
macro_rules! sbi_print {
    ($($arg:tt)*) => {
        $crate::print_fmt(format_args!($($arg)*)).ok();
    }
}

#[macro_export]
macro_rules! sbi_println {
    () => { $crate::sbi_print!("\n") };
    ($($arg:tt)*) => {
        $crate::print_fmt(format_args!("{}\n", format_args!($($arg)*))).ok();
    }
}

macro_rules! color_fmt {
    ($color_code:expr, $($arg:tt)*) => {
        format_args!("\u{1B}[{}m{}\u{1B}[m", $color_code as u8, format_args!($($arg)*))
    };
}

#[repr(u8)]
enum AnsiColor {
    Red         = 31,
    Green       = 32,
    Yellow      = 33,
    Cyan        = 36,
    White       = 37,
    BrightBlack = 90,
}

/// Hooks the board provides to the logger.
#[crate_interface::def_interface]
pub trait LoggerAdapter {
    /// Writes raw text to the console.
    fn write_str(s: &str);
    /// Time since boot.
    fn now() -> core::time::Duration;
    /// Id of the calling hart.
    fn hart_id() -> usize;
}

struct FirmwareLogger;

impl Write for FirmwareLogger {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        cfg_if::cfg_if! {
            if #[cfg(feature = "std")] {
                std::print!("{s}");
            } else {
                call_interface!(LoggerAdapter::write_str, s);
            }
        }
        Ok(())
    }
}

fn level_color(level: Level) -> AnsiColor {
    match level {
        Level::Error => AnsiColor::Red,
        Level::Warn => AnsiColor::Yellow,
        Level::Info => AnsiColor::Green,
        Level::Debug => AnsiColor::Cyan,
        Level::Trace => AnsiColor::BrightBlack,
    }
}

impl Log for FirmwareLogger {
    #[inline]
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = record.line().unwrap_or(0);
        let path = record.target();
        let color = level_color(record.level());

        cfg_if::cfg_if! {
            if #[cfg(feature = "std")] {
                let _ = print_fmt(color_fmt!(
                    AnsiColor::White,
                    "[{time} {path}:{line}] {args}\n",
                    time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
                    args = color_fmt!(color, "{}", record.args()),
                ));
            } else {
                let now = call_interface!(LoggerAdapter::now);
                let hart = call_interface!(LoggerAdapter::hart_id);
                let _ = print_fmt(color_fmt!(
                    AnsiColor::White,
                    "[{:>3}.{:06} {hart} {path}:{line}] {args}\n",
                    now.as_secs(),
                    now.subsec_micros(),
                    args = color_fmt!(color, "{}", record.args()),
                ));
            }
        }
    }

    fn flush(&self) {}
}

/// Runs `f` with machine interrupts masked on the calling hart.
fn without_irq<R>(f: impl FnOnce() -> R) -> R {
    cfg_if::cfg_if! {
        if #[cfg(all(target_arch = "riscv64", not(feature = "std")))] {
            use riscv::register::mstatus;

            let enabled = mstatus::read().mie();
            unsafe { mstatus::clear_mie() };
            let ret = f();
            if enabled {
                unsafe { mstatus::set_mie() };
            }
            ret
        } else {
            f()
        }
    }
}

/// Prints formatted text, serialized across harts.
///
/// The lock is taken with machine interrupts masked, so a trap handler that
/// logs cannot spin on a lock its own hart holds.
pub fn print_fmt(args: fmt::Arguments) -> fmt::Result {
    static LOCK: spin::Mutex<()> = spin::Mutex::new(());

    without_irq(|| {
        let _guard = LOCK.lock();
        FirmwareLogger.write_fmt(args)
    })
}

/// Installs the logger with the `Warn` level. Later calls are ignored.
pub fn init_logger() {
    if log::set_logger(&FirmwareLogger).is_ok() {
        log::set_max_level(LevelFilter::Warn);
    }
}

/// Sets the maximum level from its name; unknown names turn logging off.
pub fn set_log_level(level: &str) {
    let lf = LevelFilter::from_str(level)
        .ok()
        .unwrap_or(LevelFilter::Off);
    log::set_max_level(lf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_parsed() {
        set_log_level("debug");
        assert_eq!(log::max_level(), LevelFilter::Debug);
        set_log_level("INFO");
        assert_eq!(log::max_level(), LevelFilter::Info);
        set_log_level("chatty");
        assert_eq!(log::max_level(), LevelFilter::Off);
    }

    #[test]
    fn masked_section_returns_its_value() {
        assert_eq!(without_irq(|| 7), 7);
    }

    #[cfg(feature = "std")]
    #[test]
    fn print_macros_accept_format_args() {
        sbi_print!("{}-{}", 1, 2);
        sbi_println!();
        sbi_println!("hart {}", 0);
        assert!(print_fmt(format_args!("plain\n")).is_ok());
    }

    #[cfg(feature = "std")]
    #[test]
    fn records_go_through_the_host_backend() {
        init_logger();
        FirmwareLogger.log(
            &Record::builder()
                .args(format_args!("hart {} up", 0))
                .level(Level::Info)
                .target("sbilog")
                .line(Some(1))
                .build(),
        );
        FirmwareLogger.flush();
    }
}
