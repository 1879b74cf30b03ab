//! Storefront: exchanging coins for skins
//!
//! A thin transactional layer over the bird's skin ownership and the
//! persisted coin balance. The menu's visual mechanics belong to the
//! frontend; the core only keeps a selection cursor and resolves clicks
//! to catalog rows so it can run the purchase/equip transaction.

use std::fmt;

use crate::persistence::{StatePort, keys};
use crate::sim::Bird;
use crate::skins::{self, CATALOG};

/// Vertical pixel offset of the first catalog row in the menu
pub const MENU_TOP: f32 = 100.0;
/// Pixel height of one catalog row (button plus margin)
pub const ROW_HEIGHT: f32 = 60.0;

/// A failed purchase. The transaction leaves all state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    UnknownSkin(String),
    InsufficientFunds { price: u32, balance: u32 },
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopError::UnknownSkin(id) => write!(f, "unknown skin '{id}'"),
            ShopError::InsufficientFunds { price, balance } => {
                write!(f, "skin costs {price} coins, balance is {balance}")
            }
        }
    }
}

impl std::error::Error for ShopError {}

/// Shop menu state
#[derive(Debug, Clone, Default)]
pub struct Shop {
    /// Selected catalog row
    pub cursor: usize,
}

impl Shop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.cursor + 1 < CATALOG.len() {
            self.cursor += 1;
        }
    }

    /// Map a click's y coordinate to a catalog row, if any
    pub fn row_at(&self, y: f32) -> Option<usize> {
        if y < MENU_TOP {
            return None;
        }
        let row = ((y - MENU_TOP) / ROW_HEIGHT) as usize;
        (row < CATALOG.len()).then_some(row)
    }

    /// Purchase (if needed) and equip a skin, atomically from the
    /// caller's perspective.
    ///
    /// Equipping an already-owned skin always succeeds and costs
    /// nothing. A purchase deducts the price, equips the skin, and
    /// persists the new balance; any failure leaves the bird and the
    /// balance untouched.
    pub fn purchase_and_equip(
        &self,
        id: &str,
        bird: &mut Bird,
        balance: &mut u32,
        store: &mut dyn StatePort,
    ) -> Result<(), ShopError> {
        let spec = skins::skin(id).ok_or_else(|| ShopError::UnknownSkin(id.to_string()))?;

        if bird.owned_skins.contains(id) {
            bird.select_skin(id, store);
            return Ok(());
        }

        if *balance < spec.price {
            return Err(ShopError::InsufficientFunds {
                price: spec.price,
                balance: *balance,
            });
        }

        // Checks passed: the in-memory transaction cannot fail from here.
        bird.purchase_skin(id, *balance, store);
        *balance -= spec.price;
        bird.select_skin(id, store);
        if let Err(err) = store.set_int(keys::COINS, *balance) {
            log::warn!("failed to persist balance after purchase: {err}");
        }
        log::info!("purchased skin '{id}' for {} coins", spec.price);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StatePort};

    #[test]
    fn test_purchase_insufficient_funds() {
        let mut store = MemoryStore::new();
        let mut bird = Bird::new();
        let mut balance = 40;
        let shop = Shop::new();

        let err = shop
            .purchase_and_equip("blue_jay", &mut bird, &mut balance, &mut store)
            .unwrap_err();
        assert_eq!(
            err,
            ShopError::InsufficientFunds {
                price: 50,
                balance: 40
            }
        );
        assert_eq!(balance, 40);
        assert!(!bird.owned_skins.contains("blue_jay"));
    }

    #[test]
    fn test_purchase_success_deducts_and_equips() {
        let mut store = MemoryStore::new();
        let mut bird = Bird::new();
        let mut balance = 100;
        let shop = Shop::new();

        shop.purchase_and_equip("blue_jay", &mut bird, &mut balance, &mut store)
            .unwrap();
        assert_eq!(balance, 50);
        assert!(bird.owned_skins.contains("blue_jay"));
        assert_eq!(bird.current_skin, "blue_jay");
        // New balance persisted as part of the transaction
        assert_eq!(store.get_int(keys::COINS, 0).unwrap(), 50);
    }

    #[test]
    fn test_equip_owned_ignores_balance() {
        let mut store = MemoryStore::new();
        let mut bird = Bird::new();
        bird.owned_skins.insert("robot".to_string());
        let mut balance = 0;
        let shop = Shop::new();

        shop.purchase_and_equip("robot", &mut bird, &mut balance, &mut store)
            .unwrap();
        assert_eq!(bird.current_skin, "robot");
        assert_eq!(balance, 0);
    }

    #[test]
    fn test_unknown_skin_is_rejected() {
        let mut store = MemoryStore::new();
        let mut bird = Bird::new();
        let mut balance = 1000;
        let shop = Shop::new();

        let err = shop
            .purchase_and_equip("gryphon", &mut bird, &mut balance, &mut store)
            .unwrap_err();
        assert!(matches!(err, ShopError::UnknownSkin(_)));
        assert_eq!(balance, 1000);
    }

    #[test]
    fn test_row_hit_testing() {
        let shop = Shop::new();
        assert_eq!(shop.row_at(50.0), None);
        assert_eq!(shop.row_at(MENU_TOP), Some(0));
        assert_eq!(shop.row_at(MENU_TOP + ROW_HEIGHT + 10.0), Some(1));
        assert_eq!(shop.row_at(MENU_TOP + ROW_HEIGHT * 100.0), None);
    }

    #[test]
    fn test_cursor_clamps_to_catalog() {
        let mut shop = Shop::new();
        shop.scroll_up();
        assert_eq!(shop.cursor, 0);
        for _ in 0..100 {
            shop.scroll_down();
        }
        assert_eq!(shop.cursor, CATALOG.len() - 1);
    }
}
