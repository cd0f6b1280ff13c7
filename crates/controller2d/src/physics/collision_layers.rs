//! Collision layer system for filtering raycasts
//!
//! Every collider lives on one or more layers, and every query carries a mask.
//! A collider is only visible to a query when the two overlap.

use bitflags::bitflags;

bitflags! {
    /// Collision layer definitions using bitflags for efficient filtering
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct CollisionLayers: u32 {
        /// Static level geometry (floors, walls, slopes)
        const GROUND = 1 << 0;

        /// One-way or moving platforms
        const PLATFORM = 1 << 1;

        /// Everything a walking character stands on
        const WALKABLE = Self::GROUND.bits() | Self::PLATFORM.bits();
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::GROUND
    }
}
