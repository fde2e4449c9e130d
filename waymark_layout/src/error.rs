// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by layout components.

/// A session accessor ran outside an active [`Root`](crate::Root).
///
/// This is an integration error: the named component was mounted with a
/// [`Scope`](crate::Scope) that no `Root` has provided a session to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{component} must be a descendant of Layout.Root")]
pub struct ContextMisuseError {
    /// Name of the component whose accessor was misused, e.g. `"Layout.Navigation"`.
    pub component: &'static str,
}
