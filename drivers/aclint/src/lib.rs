// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! RISC-V ACLINT drivers.
//!
//! [`AclintMswi`] implements [`sbiplat::driver::IpiDevice`] and
//! [`AclintMtimer`] implements [`sbiplat::driver::TimerDevice`]. Both bind
//! their descriptor on the cold step and refuse hart-local work until then.
#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

mod mswi;
mod mtimer;

pub use self::{
    mswi::{ACLINT_MSWI_ALIGN, AclintMswi},
    mtimer::{ACLINT_MTIMER_ALIGN, AclintMtimer},
};
