//! Backend selection and rendering across the whole crate.

mod backend_tests;
