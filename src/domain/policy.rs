//! Access policy for owned resources.
//!
//! - No IO
//! - No panics
//! - Pure ALLOW/DENY decisions over facts the caller already fetched

use thiserror::Error;

use super::user::UserRole;

/// Authenticated identity making the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i32,
    pub role: UserRole,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// A resource with exactly one owning user.
pub trait Owned {
    fn owner_id(&self) -> i32;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("You don't have the right permissions to modify this resource")]
    NotOwner,

    #[error("Administrator role required")]
    AdminRequired,
}

/// ALLOW when the actor is an admin or owns the resource.
pub fn can_mutate(actor: &Actor, owner_id: i32) -> bool {
    actor.is_admin() || actor.id == owner_id
}

/// Gate an update or delete on an owned resource.
///
/// Callers must have confirmed the resource exists before asking.
pub fn authorize_mutation<R: Owned + ?Sized>(actor: &Actor, resource: &R) -> Result<(), AccessDenied> {
    if can_mutate(actor, resource.owner_id()) {
        Ok(())
    } else {
        Err(AccessDenied::NotOwner)
    }
}

pub fn require_admin(actor: &Actor) -> Result<(), AccessDenied> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AccessDenied::AdminRequired)
    }
}
