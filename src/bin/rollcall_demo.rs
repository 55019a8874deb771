// Rollcall demo: one suite with a passing case, a case with two failed checks,
// a case that fails outright, and a suite with no cases.
// Usage: cargo run --bin rollcall_demo [-- --fail-fast]

rollcall::suite! {
    /// Mixed outcomes; the run ends with one success and two failures.
    harness_demo {
        fn passes_simple_check(t) {
            t.is_true(true, "Expected to be true.")?;
        }

        fn reports_every_failed_check(t) {
            t.is_true(false, "Expected to be true.")?;
            t.is_true(false, "Another failure here.")?;
        }

        fn fails_unconditionally(t) {
            t.fail("Doomed from the start!")?;
        }
    }

    empty_demo {}
}

rollcall::test_main!();
