//! In-session shopping cart.
//!
//! [`CartStore`] is the single owner of the cart state. Handlers get a clone
//! of the store through [`crate::state::AppState`] and only ever touch the
//! state through its methods. Every mutation is published on a
//! [`tokio::sync::watch`] channel so views can follow the cart without
//! polling.

use std::{num::NonZeroU32, sync::Arc};

use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::models::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity.get())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    lines: Vec<CartLine>,
    is_open: bool,
}

impl CartState {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product.id == product_id)
            .map_or(0, |line| line.quantity.get())
    }

    /// Sum of `price * quantity` over every line.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    fn add(&mut self, product: Product) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(product)),
        }
    }

    /// Returns whether anything changed.
    fn remove(&mut self, product_id: &str) -> bool {
        let Some(index) = self
            .lines
            .iter()
            .position(|line| line.product.id == product_id)
        else {
            return false;
        };

        let line = &mut self.lines[index];
        match NonZeroU32::new(line.quantity.get() - 1) {
            Some(quantity) => line.quantity = quantity,
            None => {
                self.lines.remove(index);
            }
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<CartState>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(CartState::default());
        Self {
            state: Arc::new(state),
        }
    }

    /// Adds one unit of `product`, merging with an existing line.
    pub fn add_to_cart(&self, product: Product) {
        tracing::debug!(product_id = %product.id, "cart add");
        self.state.send_modify(|state| state.add(product));
    }

    /// Removes one unit of the product. Unknown ids are ignored.
    pub fn remove_from_cart(&self, product_id: &str) {
        let changed = self.state.send_if_modified(|state| state.remove(product_id));
        if changed {
            tracing::debug!(product_id, "cart remove");
        }
    }

    pub fn total(&self) -> Decimal {
        self.state.borrow().total()
    }

    pub fn item_count(&self) -> usize {
        self.state.borrow().lines.len()
    }

    pub fn open_cart(&self) {
        self.set_open(true);
    }

    pub fn close_cart(&self) {
        self.set_open(false);
    }

    fn set_open(&self, open: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.is_open != open;
            state.is_open = open;
            changed
        });
    }

    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }
}
