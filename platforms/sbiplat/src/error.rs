// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Error types shared by the platform layer and its device drivers.

use core::fmt;

use crate::HartId;

/// Failure reported by a device driver collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// The device has not been bound by a successful cold init.
    NoDevice,
    /// The device was already bound by an earlier cold init.
    AlreadyInitialized,
    /// A configuration parameter cannot be programmed into the device.
    InvalidParam,
    /// A register window does not meet the device's alignment requirement.
    Misaligned { addr: usize, align: usize },
    /// The hart is not served by this device instance.
    InvalidHart(HartId),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDevice => f.write_str("device not initialized"),
            Self::AlreadyInitialized => f.write_str("device already initialized"),
            Self::InvalidParam => f.write_str("invalid device parameter"),
            Self::Misaligned { addr, align } => {
                write!(f, "address {addr:#x} not aligned to {align:#x}")
            }
            Self::InvalidHart(hart) => write!(f, "hart {hart} not served by device"),
        }
    }
}

impl core::error::Error for DriverError {}

/// Geometry violation found while validating a device descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorError {
    /// Base address is zero.
    NullAddress,
    /// The window is empty or wraps around the address space.
    BadWindow { addr: usize, size: usize },
    /// The hart range is empty or exceeds the hart id limit.
    BadHartRange { first: HartId, count: usize },
    /// The window is too small for the per-hart registers it must hold.
    TooSmall { needed: usize, size: usize },
    /// Two sub-regions of one device overlap.
    Overlap,
    /// A sub-region lies outside the controller window.
    OutOfWindow,
    /// A timing or line parameter is zero or unsupported.
    BadParam(&'static str),
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullAddress => f.write_str("null base address"),
            Self::BadWindow { addr, size } => write!(f, "bad window {addr:#x}+{size:#x}"),
            Self::BadHartRange { first, count } => {
                write!(f, "bad hart range {first}+{count}")
            }
            Self::TooSmall { needed, size } => {
                write!(f, "window {size:#x} smaller than required {needed:#x}")
            }
            Self::Overlap => f.write_str("overlapping register regions"),
            Self::OutOfWindow => f.write_str("register region outside controller window"),
            Self::BadParam(what) => write!(f, "bad parameter: {what}"),
        }
    }
}

impl core::error::Error for DescriptorError {}

/// Failure of a platform bring-up entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The descriptor is invalid, the cold step failed, or the warm step ran
    /// before a successful cold step.
    DeviceUnavailable,
    /// The per-hart warm step failed on the given hart.
    HartSetupFailed(HartId),
    /// A driver failure passed through unchanged.
    Driver(DriverError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceUnavailable => f.write_str("device unavailable"),
            Self::HartSetupFailed(hart) => write!(f, "hart {hart} setup failed"),
            Self::Driver(e) => write!(f, "driver error: {e}"),
        }
    }
}

impl core::error::Error for InitError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Driver(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DriverError> for InitError {
    fn from(e: DriverError) -> Self {
        Self::Driver(e)
    }
}

impl From<DescriptorError> for InitError {
    fn from(_: DescriptorError) -> Self {
        Self::DeviceUnavailable
    }
}

/// Result type of the bring-up entry points.
pub type InitResult<T = ()> = Result<T, InitError>;

/// Result type of driver operations.
pub type DriverResult<T = ()> = Result<T, DriverError>;
