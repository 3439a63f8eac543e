//! Read-only views and control helpers for cart consumers.
//!
//! Badges, drawers and checkout summaries display figures already kept by
//! the reducer. The control helpers turn a button press into the action to
//! dispatch; they never mutate state themselves.

use crate::types::{CartAction, CartState, ItemId};
use serde::Serialize;

/// Counts above this are shown as `"99+"`
pub const BADGE_CAP: u64 = 99;

/// Unit count shown on the cart icon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CartBadge {
    /// Total units in the cart
    pub count: u64,
}

impl CartBadge {
    /// Badge for the given cart
    #[must_use]
    pub const fn from_state(state: &CartState) -> Self {
        Self {
            count: state.item_count(),
        }
    }

    /// Whether the badge should be rendered at all
    #[must_use]
    pub const fn is_visible(self) -> bool {
        self.count > 0
    }

    /// Text for the badge
    #[must_use]
    pub fn label(self) -> String {
        if self.count > BADGE_CAP {
            format!("{BADGE_CAP}+")
        } else {
            self.count.to_string()
        }
    }
}

/// One row of the cart drawer or checkout list
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Tour identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Display reference
    pub image: Option<String>,
    /// Price of one unit
    pub unit_price: f64,
    /// Units selected
    pub quantity: u32,
    /// `unit_price * quantity`
    pub subtotal: f64,
}

/// Checkout summary for a cart
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    /// Lines in cart order
    pub lines: Vec<CartLine>,
    /// Cart total
    pub total: f64,
    /// Total units
    pub item_count: u64,
}

impl CheckoutSummary {
    /// Summary of the given cart
    #[must_use]
    pub fn from_state(state: &CartState) -> Self {
        let lines = state
            .items()
            .iter()
            .map(|item| CartLine {
                id: item.id.clone(),
                name: item.name.clone(),
                image: item.image.clone(),
                unit_price: item.price,
                quantity: item.quantity,
                subtotal: item.subtotal(),
            })
            .collect();

        Self {
            lines,
            total: state.total(),
            item_count: state.item_count(),
        }
    }

    /// Whether there is anything to check out
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Action for a line's "+" control
///
/// `None` if the tour is not in the cart.
#[must_use]
pub fn increment(state: &CartState, id: &ItemId) -> Option<CartAction> {
    let item = state.get(id)?;
    Some(CartAction::update_quantity(
        id.clone(),
        i64::from(item.quantity) + 1,
    ))
}

/// Action for a line's "−" control
///
/// Taking the last unit away dispatches a removal rather than a zero quantity.
/// `None` if the tour is not in the cart.
#[must_use]
pub fn decrement(state: &CartState, id: &ItemId) -> Option<CartAction> {
    let item = state.get(id)?;
    if item.quantity <= 1 {
        Some(CartAction::remove(id.clone()))
    } else {
        Some(CartAction::update_quantity(
            id.clone(),
            i64::from(item.quantity) - 1,
        ))
    }
}

/// Action for a line's remove control
///
/// `None` if the tour is not in the cart.
#[must_use]
pub fn remove(state: &CartState, id: &ItemId) -> Option<CartAction> {
    state.contains(id).then(|| CartAction::remove(id.clone()))
}
