//! Guarded operations, one module per resource.
//!
//! Every operation runs its guards in a fixed order and stops at the first
//! failing one; only then the service is called. The guards and the write are
//! separate store calls, so two concurrent requests may both pass a capacity
//! guard.

pub mod issue;
pub mod team;
pub mod user;
pub mod work_item;

use crate::domain::entity::Ident;

/// Outcome of a create operation: the identifier of the new resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Created(pub Ident);

/// Returns early with `$err` unless `$cond` holds.
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

pub(self) use ensure;
