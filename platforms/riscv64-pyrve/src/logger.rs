// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use core::time::Duration;

use sbiplat::{
    cpu,
    driver::{ConsoleDevice, TimerDevice},
};

use crate::ops::{CONSOLE, TIMER};

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn ticks_to_duration(ticks: u64, freq: u64) -> Duration {
    if freq == 0 {
        return Duration::ZERO;
    }
    let nanos = (ticks % freq) as u128 * NANOS_PER_SEC / freq as u128;
    Duration::new(ticks / freq, nanos as u32)
}

struct LoggerAdapterImpl;

#[crate_interface::impl_interface]
impl sbilog::LoggerAdapter for LoggerAdapterImpl {
    fn write_str(s: &str) {
        for b in s.bytes() {
            if CONSOLE.putc(b).is_err() {
                return;
            }
        }
    }

    fn now() -> Duration {
        match (TIMER.value(), TIMER.frequency()) {
            (Ok(ticks), Some(freq)) => ticks_to_duration(ticks, freq),
            _ => Duration::ZERO,
        }
    }

    fn hart_id() -> usize {
        cpu::hart_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_convert_at_mtime_rate() {
        let freq = 10_000_000;
        assert_eq!(ticks_to_duration(0, freq), Duration::ZERO);
        assert_eq!(ticks_to_duration(25_000_005, freq), Duration::new(2, 500_000_500));
        assert_eq!(ticks_to_duration(u64::MAX, freq).as_secs(), u64::MAX / freq);
        assert_eq!(ticks_to_duration(42, 0), Duration::ZERO);

        // Sub-second part of a fast clock must not overflow.
        let fast = 50_000_000_000;
        assert_eq!(ticks_to_duration(fast - 1, fast), Duration::new(0, 999_999_999));
        assert_eq!(ticks_to_duration(3 * fast + fast / 2, fast), Duration::new(3, 500_000_000));
    }
}
