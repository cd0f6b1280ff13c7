//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a collider stored in a [`CollisionWorld`](crate::physics::CollisionWorld)
    ///
    /// Handles stay valid until the collider is removed and are never reused
    /// for a different collider afterwards.
    pub struct ColliderHandle;
}

/// Handle-based map for colliders
pub type ColliderMap<T> = SlotMap<ColliderHandle, T>;
