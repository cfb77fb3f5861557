// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros shared by the record types.

/// `Display` for fieldless enums, one string literal per variant.
///
/// The strings double as the ledger spelling of [`crate::JobStatus`].
///
/// ```ignore
/// crate::simple_display! {
///     JobStatus {
///         Created => "created",
///         TimedOut => "timed_out",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident => $label:literal ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant => $label, )+
                })
            }
        }
    };
}

/// Chained by-value setters, for use inside an `impl` block.
///
/// - `into { field: T }` takes `impl Into<T>`
/// - `set { field: T }` takes `T`
/// - `option { field: T }` stores `Some(v.into())` into an `Option<T>` field
///
/// Each group may be omitted.
#[macro_export]
macro_rules! setters {
    (
        $(into { $( $into:ident : $into_ty:ty ),* $(,)? })?
        $(set { $( $set:ident : $set_ty:ty ),* $(,)? })?
        $(option { $( $opt:ident : $opt_ty:ty ),* $(,)? })?
    ) => {
        $($(
            pub fn $into(mut self, v: impl Into<$into_ty>) -> Self {
                self.$into = v.into();
                self
            }
        )*)?
        $($(
            pub fn $set(mut self, v: $set_ty) -> Self {
                self.$set = v;
                self
            }
        )*)?
        $($(
            pub fn $opt(mut self, v: impl Into<$opt_ty>) -> Self {
                self.$opt = Some(v.into());
                self
            }
        )*)?
    };
}

/// A test builder for a record type: the builder struct with per-field
/// defaults, its setters (via [`setters!`]), `build()`, and `Target::builder()`.
///
/// Everything generated is compiled only for tests and the `test-support`
/// feature. `option` fields default to the given `Option` value.
///
/// ```ignore
/// crate::builder! {
///     pub struct JobBuilder => Job {
///         into { id: JobId = "job-1" }
///         set { status: JobStatus = JobStatus::Created }
///         option { error: String = None }
///     }
/// }
/// ```
#[macro_export]
macro_rules! builder {
    (
        pub struct $builder:ident => $target:ident {
            into { $( $into:ident : $into_ty:ty = $into_default:expr ),* $(,)? }
            set { $( $set:ident : $set_ty:ty = $set_default:expr ),* $(,)? }
            option { $( $opt:ident : $opt_ty:ty = $opt_default:expr ),* $(,)? }
        }
    ) => {
        #[cfg(any(test, feature = "test-support"))]
        pub struct $builder {
            $( $into: $into_ty, )*
            $( $set: $set_ty, )*
            $( $opt: Option<$opt_ty>, )*
        }

        #[cfg(any(test, feature = "test-support"))]
        impl Default for $builder {
            fn default() -> Self {
                Self {
                    $( $into: $into_default.into(), )*
                    $( $set: $set_default, )*
                    $( $opt: $opt_default, )*
                }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $builder {
            $crate::setters! {
                into { $( $into: $into_ty ),* }
                set { $( $set: $set_ty ),* }
                option { $( $opt: $opt_ty ),* }
            }

            pub fn build(self) -> $target {
                $target {
                    $( $into: self.$into, )*
                    $( $set: self.$set, )*
                    $( $opt: self.$opt, )*
                }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $target {
            /// Create a builder with test defaults.
            pub fn builder() -> $builder {
                $builder::default()
            }
        }
    };
}
