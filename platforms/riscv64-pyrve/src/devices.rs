// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Device descriptors of the board.

use sbiplat::{
    HartId,
    device::{DeviceRegion, LineConfig, MswiData, MtimerData, UartData, check_disjoint},
};

use crate::config::{devices::*, plat::HART_COUNT};

const FIRST_HARTID: HartId = 0;

pub static MSWI: MswiData = MswiData {
    addr: MSWI_PADDR,
    size: MSWI_SIZE,
    first_hartid: FIRST_HARTID,
    hart_count: HART_COUNT,
};

pub static MTIMER: MtimerData = MtimerData {
    addr: MTIMER_PADDR,
    size: MTIMER_SIZE,
    mtime_freq: MTIMER_FREQ as u64,
    mtime_addr: MTIMER_PADDR + MTIME_OFFSET,
    mtime_size: MTIMER_SIZE - MTIME_OFFSET,
    mtimecmp_addr: MTIMER_PADDR + MTIMECMP_OFFSET,
    mtimecmp_size: MTIME_OFFSET - MTIMECMP_OFFSET,
    first_hartid: FIRST_HARTID,
    hart_count: HART_COUNT,
    has_64bit_mmio: MTIMER_64BIT_MMIO,
};

pub static UART: UartData = UartData {
    addr: UART_PADDR,
    size: UART_SIZE,
    input_freq: UART_FREQ as u32,
    baud_rate: UART_BAUD as u32,
    line: LineConfig::EIGHT_N_ONE,
    reg_shift: UART_REG_SHIFT as u32,
    reg_width: UART_REG_WIDTH,
    reg_offset: UART_REG_OFFSET,
    // Marker byte expected by the board before line setup. Not yet confirmed on hardware.
    boot_marker: Some(b'f'),
};

/// Every window claimed by a device, in descriptor order.
pub const REGIONS: [DeviceRegion; 3] = [
    DeviceRegion::new("uart", UART_PADDR, UART_SIZE),
    DeviceRegion::new("mswi", MSWI_PADDR, MSWI_SIZE),
    DeviceRegion::new("mtimer", MTIMER_PADDR, MTIMER_SIZE),
];

const _: () = assert!(
    check_disjoint(&REGIONS).is_ok(),
    "device windows of the board overlap"
);

/// Returns `true` if `region` lies inside one of the configured MMIO ranges.
pub fn in_mmio_ranges(region: &DeviceRegion) -> bool {
    MMIO_RANGES
        .iter()
        .any(|&(base, size)| DeviceRegion::new("mmio", base, size).contains(region))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_validate() {
        assert_eq!(MSWI.validate(), Ok(()));
        assert_eq!(MTIMER.validate(), Ok(()));
        assert_eq!(UART.validate(), Ok(()));
    }

    #[test]
    fn board_layout() {
        assert_eq!(MSWI.addr, 0x200_0000);
        assert_eq!(MSWI.size, 0x4000);
        assert_eq!(MTIMER.mtimecmp_addr, 0x200_4000);
        assert_eq!(MTIMER.mtime_addr, 0x200_bff8);
        assert_eq!(MTIMER.mtime_size, 8);
        assert_eq!(MTIMER.mtime_freq, 10_000_000);
        assert!(MTIMER.has_64bit_mmio);
        assert_eq!(UART.addr, 0x1000_0000);
        assert_eq!(UART.baud_rate, 115200);
        assert_eq!(UART.input_freq, 10_000_000);
    }

    #[test]
    fn regions_match_descriptors() {
        assert_eq!(REGIONS[0], UART.region());
        assert_eq!(REGIONS[1], MSWI.region());
        assert_eq!(REGIONS[2], MTIMER.region());
        assert_eq!(check_disjoint(&REGIONS), Ok(()));
    }

    #[test]
    fn devices_are_mapped() {
        for region in REGIONS {
            assert!(in_mmio_ranges(&region), "{} not mapped", region.name);
        }
        assert!(!in_mmio_ranges(&DeviceRegion::new("rom", 0x1000, 0x1000)));
    }
}
