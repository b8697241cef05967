//! Capability sets exposed by base renderers.
//!
//! Listeners use these instead of reflection to ask structural questions such
//! as "is this renderer built around a biped model". Hosts may define their
//! own bits above [`Capabilities::HOST_RESERVED`]; unknown bits are retained.

use bitflags::bitflags;

bitflags! {
    /// Structural features of a base renderer's model.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u32 {
        /// Two-legged humanoid layout.
        const BIPED = 1 << 0;
        /// Four-legged layout.
        const QUADRUPED = 1 << 1;
        /// Has a distinct head part.
        const HEAD = 1 << 2;
        /// Has arms that can be posed.
        const ARMS = 1 << 3;
        /// Has wings.
        const WINGS = 1 << 4;
        /// Renders items held in hand.
        const HELD_ITEMS = 1 << 5;
        /// Exposes armor slots.
        const ARMOR_SLOTS = 1 << 6;

        /// First bit available for host-defined capabilities.
        const HOST_RESERVED = 1 << 16;

        const _ = !0;
    }
}

impl Capabilities {
    /// The layout shared by players and humanoid mobs.
    pub const HUMANOID: Self = Self::BIPED
        .union(Self::HEAD)
        .union(Self::ARMS)
        .union(Self::HELD_ITEMS)
        .union(Self::ARMOR_SLOTS);

    /// A host-defined capability at `offset` bits above [`Capabilities::HOST_RESERVED`].
    ///
    /// Returns `None` if the offset does not fit.
    pub const fn host(offset: u32) -> Option<Self> {
        if offset >= 16 {
            return None;
        }
        Some(Self::from_bits_retain(Self::HOST_RESERVED.bits() << offset))
    }
}
