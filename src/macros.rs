//! Declaration macros.
//!
//! `suite!` lowers each suite into a registration function plus an entry in
//! the link-time bootstrap table, so declaring a suite is all it takes for
//! [`registry::global`](crate::registry::global) to find it.
//!
//! ```rust,ignore
//! rollcall::suite! {
//!     /// Arithmetic sanity checks.
//!     arithmetic {
//!         fn adds(t) {
//!             t.are_equal(1 + 1, 2)?;
//!         }
//!         fn divides(t) {
//!             t.is_true(6 / 3 == 2, "six over three")?;
//!         }
//!     }
//!
//!     nothing_yet {}
//! }
//!
//! rollcall::test_main!();
//! ```
//!
//! Case bodies receive a `&mut rollcall::failure::Context` bound to the given
//! pattern and may end in either `()` or an `Outcome`.

/// Declares one or more test suites and registers them at startup.
///
/// Suites in one invocation share a bootstrap entry and register in the
/// order they are written.
#[macro_export]
macro_rules! suite {
    ($(
        $(#[$suite_meta:meta])*
        $suite:ident {
            $(
                $(#[$case_meta:meta])*
                fn $case:ident ($ctx:pat) $body:block
            )*
        }
    )+) => {
        const _: () = {
            #[$crate::__private::distributed_slice($crate::__private::BOOTSTRAPS)]
            #[linkme(crate = $crate::__private::linkme)]
            static BOOTSTRAP: $crate::registry::Bootstrap = $crate::registry::Bootstrap {
                file: ::core::file!(),
                line: ::core::line!(),
                register: __rollcall_register,
            };

            $(
                $(#[$suite_meta])*
                #[allow(non_snake_case)]
                fn $suite(__registry: &mut $crate::registry::Registry) {
                    $(
                        $(#[$case_meta])*
                        fn $case($ctx: &mut $crate::failure::Context) -> $crate::failure::Outcome {
                            $crate::failure::IntoOutcome::into_outcome($body)
                        }
                    )*

                    __registry.suite(::core::stringify!($suite), |_suite| {
                        $( _suite.case(::core::stringify!($case), $case); )*
                    });
                }
            )+

            fn __rollcall_register(__registry: &mut $crate::registry::Registry) {
                $( $suite(__registry); )+
            }
        };
    };
}

/// Generates a `main` that runs every declared suite.
#[macro_export]
macro_rules! test_main {
    () => {
        fn main() -> ::std::process::ExitCode {
            $crate::cli::run()
        }
    };
}
