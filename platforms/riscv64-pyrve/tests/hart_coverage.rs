mod common;

use aclint::{AclintMswi, AclintMtimer};
use common::*;
use proptest::prelude::*;
use riscv64_pyrve::init::{ipi_init_with, timer_init_with};
use sbiplat::InitError;

proptest! {
    #[test]
    fn warm_step_succeeds_exactly_on_covered_harts(harts in 1usize..16, hart in 0usize..32) {
        let mswi_data = mswi(harts);
        let mtimer_data = mtimer(harts);
        let ipi = AclintMswi::new();
        let timer = AclintMtimer::new();
        prop_assert_eq!(ipi_init_with(&ipi, mswi_data, 0, true), Ok(()));
        prop_assert_eq!(timer_init_with(&timer, mtimer_data, 0, true), Ok(()));

        let expected = if hart < harts {
            Ok(())
        } else {
            Err(InitError::HartSetupFailed(hart))
        };
        prop_assert_eq!(ipi_init_with(&ipi, mswi_data, hart, false), expected);
        prop_assert_eq!(timer_init_with(&timer, mtimer_data, hart, false), expected);
        if hart < harts {
            prop_assert_eq!(read64(mtimer_data.mtimecmp_addr_of(hart)), u64::MAX);
        }
    }
}
