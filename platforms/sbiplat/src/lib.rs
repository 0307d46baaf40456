// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Platform bring-up abstraction for machine-mode firmware.
//!
//! A board crate describes its devices with the descriptors in [`device`],
//! drives them through the interfaces in [`driver`] and publishes a
//! [`Platform`] record whose [`PlatformOps`] table the firmware runtime calls
//! during boot.
#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

pub mod boot;
pub mod cpu;
pub mod device;
pub mod driver;
mod error;
pub mod mmio;
mod ops;
mod platform;

pub use self::{error::*, ops::PlatformOps, platform::*};

/// Hardware thread identifier, as read from `mhartid`.
pub type HartId = usize;

#[doc(hidden)]
pub mod __priv {
    pub use const_str;
}

/// Compile-time string equality assertion.
#[macro_export]
macro_rules! assert_str_eq {
    ($expect:expr, $actual:expr $(,)?) => {
        const _: () = assert!($crate::__priv::const_str::equal!($expect, $actual));
    };
    ($expect:expr, $actual:expr, $mess:expr $(,)?) => {
        const _: () = assert!($crate::__priv::const_str::equal!($expect, $actual), $mess);
    };
}
