//! Immutable cosmetic catalog
//!
//! Fixed mapping from skin id to colors and price. Loaded once into a
//! static table; nothing mutates it at runtime. The default skin is free
//! and always owned.

/// RGB color triple
pub type Rgb = (u8, u8, u8);

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinSpec {
    pub id: &'static str,
    pub body: Rgb,
    pub wing: Rgb,
    pub beak: Rgb,
    pub eye: Rgb,
    pub price: u32,
}

pub const DEFAULT_SKIN: &str = "default";

const BLACK: Rgb = (0, 0, 0);
const WHITE: Rgb = (255, 255, 255);

/// The full catalog, cheapest-first apart from the free default.
pub const CATALOG: &[SkinSpec] = &[
    SkinSpec {
        id: "default",
        body: (255, 185, 0),
        wing: (255, 140, 0),
        beak: (255, 69, 0),
        eye: BLACK,
        price: 0,
    },
    SkinSpec {
        id: "blue_jay",
        body: (100, 149, 237),
        wing: (65, 105, 225),
        beak: (211, 211, 211),
        eye: BLACK,
        price: 50,
    },
    SkinSpec {
        id: "cardinal",
        body: (220, 20, 60),
        wing: (139, 0, 0),
        beak: (255, 140, 0),
        eye: BLACK,
        price: 100,
    },
    SkinSpec {
        id: "ninja",
        body: (32, 32, 32),
        wing: (20, 20, 20),
        beak: (64, 64, 64),
        eye: (255, 0, 0),
        price: 150,
    },
    SkinSpec {
        id: "emerald",
        body: (46, 139, 87),
        wing: (0, 100, 0),
        beak: (32, 178, 170),
        eye: (152, 251, 152),
        price: 150,
    },
    SkinSpec {
        id: "ghost",
        body: (240, 240, 255),
        wing: (200, 200, 255),
        beak: (220, 220, 255),
        eye: (0, 0, 255),
        price: 175,
    },
    SkinSpec {
        id: "rainbow",
        body: (255, 0, 255),
        wing: (0, 255, 255),
        beak: (255, 255, 0),
        eye: WHITE,
        price: 200,
    },
    SkinSpec {
        id: "phoenix",
        body: (255, 69, 0),
        wing: (255, 140, 0),
        beak: (255, 215, 0),
        eye: (255, 255, 0),
        price: 250,
    },
    SkinSpec {
        id: "robot",
        body: (192, 192, 192),
        wing: (128, 128, 128),
        beak: (169, 169, 169),
        eye: (0, 255, 255),
        price: 300,
    },
];

/// Look up a catalog entry by id
pub fn skin(id: &str) -> Option<&'static SkinSpec> {
    CATALOG.iter().find(|s| s.id == id)
}

/// All catalog ids in display order
pub fn skin_ids() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|s| s.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_skin_is_free_and_present() {
        let default = skin(DEFAULT_SKIN).expect("default skin in catalog");
        assert_eq!(default.price, 0);
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<_> = skin_ids().collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn test_unknown_skin_rejected() {
        assert!(skin("does_not_exist").is_none());
    }
}
