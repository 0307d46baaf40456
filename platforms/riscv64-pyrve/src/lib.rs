// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Platform description of the pyrve RISC-V board.
//!
//! Exposes [`PLATFORM`], the identity record and capability table the
//! firmware runtime drives during boot. Devices are described in
//! [`devices`] and brought up through the sequence in [`init`].
#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate sbiplat;

pub mod devices;
pub mod init;
mod logger;
mod ops;

pub mod config {
    axconfig_macros::include_configs!(path_env = "PYRVE_CONFIG_PATH", fallback = "axconfig.toml");
    assert_str_eq!(
        PACKAGE,
        env!("CARGO_PKG_NAME"),
        "`PACKAGE` field in the configuration does not match the Package name. Please check your \
         configuration file."
    );
}

use sbiplat::{
    DEFAULT_HART_STACK_SIZE, FIRMWARE_VERSION, Platform, PlatformFeatures, PlatformOps,
    default_heap_size, version,
};

pub use self::ops::PLATFORM_OPS;

const fn identity(ops: &'static PlatformOps) -> Platform {
    Platform {
        name: config::plat::NAME,
        firmware_version: FIRMWARE_VERSION,
        platform_version: version(
            config::plat::VERSION_MAJOR as u16,
            config::plat::VERSION_MINOR as u16,
        ),
        features: PlatformFeatures::DEFAULT.union(PlatformFeatures::TIMER_VALUE),
        hart_count: config::plat::HART_COUNT as u32,
        hart_stack_size: config::plat::HART_STACK_SIZE as u32,
        heap_size: default_heap_size(config::plat::HART_COUNT as u32),
        ops,
    }
}

const _: () = assert!(identity(&ops::OPS).is_valid(), "invalid platform record");
const _: () = assert!(config::plat::HART_STACK_SIZE as u32 >= DEFAULT_HART_STACK_SIZE);

/// The board record handed to the firmware runtime.
pub static PLATFORM: Platform = identity(&PLATFORM_OPS);
