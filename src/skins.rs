//! Cosmetic skin catalog
//!
//! A fixed set of purchasable player sprites. Each skin carries a magnet
//! variant shown while the magnet effect is active. Unlock state and the
//! current selection live in [`crate::profile::Profile`].

/// A purchasable player skin
#[derive(Debug, Clone, Copy)]
pub struct Skin {
    pub id: &'static str,
    pub sprite: &'static str,
    /// Variant shown while the magnet effect is active
    pub magnet_sprite: &'static str,
    pub price: u64,
}

/// The skin every profile owns and falls back to
pub const DEFAULT_SKIN_ID: &str = "player1";

pub static CATALOG: [Skin; 3] = [
    Skin {
        id: "player1",
        sprite: "player1.png",
        magnet_sprite: "player1_magnet.png",
        price: 0,
    },
    Skin {
        id: "player2",
        sprite: "player2.png",
        magnet_sprite: "player2_magnet.png",
        price: 1_000,
    },
    Skin {
        id: "player3",
        sprite: "player3.png",
        magnet_sprite: "player3_magnet.png",
        price: 2_000,
    },
];

/// Look up a skin by id
pub fn find(id: &str) -> Option<&'static Skin> {
    CATALOG.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_skin_is_free_and_in_catalog() {
        let skin = find(DEFAULT_SKIN_ID).unwrap();
        assert_eq!(skin.price, 0);
    }

    #[test]
    fn test_unknown_id_misses() {
        assert!(find("player99").is_none());
    }
}
