//! Domain types for the tour cart.
//!
//! A cart is an ordered list of tour packages, each with a quantity, plus two
//! derived figures: the money total and the unit count. Both figures are
//! recomputed from the items after every change and cannot be set directly.

use serde::{Deserialize, Serialize};

/// Identifier of a purchasable tour or package
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an `ItemId` from anything string-like
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A line item in the cart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourItem {
    /// Tour or package identifier, unique within a cart
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Unit price (currency-agnostic, not validated)
    #[serde(with = "price")]
    pub price: f64,
    /// Units selected, at least 1 while the item is in a cart
    pub quantity: u32,
    /// Display reference (URL or path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl TourItem {
    /// Price of all selected units of this line
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// State of a session's cart
///
/// `total` always equals the sum of `price * quantity` over `items` and
/// `item_count` the sum of quantities. Items are kept in first-added order
/// and never share an id.
///
/// Serializes as `{"items": [...], "total": n, "itemCount": n}`. On
/// deserialization the derived figures are recomputed and duplicate ids
/// merged, so a snapshot can never break the invariants.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CartSnapshot")]
pub struct CartState {
    items: Vec<TourItem>,
    #[serde(serialize_with = "price::serialize")]
    total: f64,
    item_count: u64,
}

/// Wire form accepted when deserializing a [`CartState`]
///
/// Only `items` is trusted; `total` and `itemCount` are ignored.
#[derive(Deserialize)]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<TourItem>,
}

impl From<CartSnapshot> for CartState {
    fn from(snapshot: CartSnapshot) -> Self {
        Self::from_items(snapshot.items)
    }
}

impl CartState {
    /// Creates an empty cart
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            total: 0.0,
            item_count: 0,
        }
    }

    /// Builds a cart from a list of items
    ///
    /// Repeated ids are merged into the first occurrence (quantities summed,
    /// first-seen name, price and image kept). Items with a zero quantity are
    /// dropped.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = TourItem>) -> Self {
        let mut state = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match state.position(&item.id) {
                Some(index) => {
                    let existing = &mut state.items[index];
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                },
                None => state.items.push(item),
            }
        }
        state.recompute();
        state
    }

    /// Line items in first-added order
    #[must_use]
    pub fn items(&self) -> &[TourItem] {
        &self.items
    }

    /// Sum of `price * quantity` over all items
    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Sum of quantities over all items
    #[must_use]
    pub const fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Number of distinct lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the line for `id`
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&TourItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Whether a line for `id` exists
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Adds one unit of a tour, appending a new line if the id is unseen
    ///
    /// A line already at `u32::MAX` units is left as it is.
    pub(crate) fn add_unit(
        &mut self,
        id: ItemId,
        name: String,
        price: f64,
        image: Option<String>,
    ) {
        match self.position(&id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
            },
            None => self.items.push(TourItem {
                id,
                name,
                price,
                quantity: 1,
                image,
            }),
        }
        self.recompute();
    }

    /// Removes the line for `id`, returning it if present
    pub(crate) fn remove(&mut self, id: &ItemId) -> Option<TourItem> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        self.recompute();
        Some(removed)
    }

    /// Replaces the quantity of an existing line
    ///
    /// Returns the previous quantity, or `None` if `id` is not in the cart.
    /// `quantity` must be at least 1.
    pub(crate) fn set_quantity(&mut self, id: &ItemId, quantity: u32) -> Option<u32> {
        debug_assert!(quantity >= 1);
        let index = self.position(id)?;
        let previous = std::mem::replace(&mut self.items[index].quantity, quantity);
        self.recompute();
        Some(previous)
    }

    /// Empties the cart
    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }

    // Always summed front to back, so identical item lists give bit-identical totals.
    fn recompute(&mut self) {
        self.total = self
            .items
            .iter()
            .fold(0.0, |total, item| total + item.subtotal());
        self.item_count = self
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();
    }
}

/// JSON encoding for prices that stays readable for any `f64`
///
/// JSON numbers cannot hold NaN or the infinities, and `serde_json` writes
/// them as `null`. Finite prices stay plain numbers; the rest are written as
/// the strings `"NaN"`, `"inf"` and `"-inf"`. A `null` price reads back as
/// NaN so snapshots written before this encoding still load.
mod price {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Encoded {
        Number(f64),
        Text(String),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // serde's `serialize_with` signature
    pub(super) fn serialize<S>(price: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if price.is_finite() {
            serializer.serialize_f64(*price)
        } else if price.is_nan() {
            serializer.serialize_str("NaN")
        } else if price.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Encoded>::deserialize(deserializer)? {
            None => Ok(f64::NAN),
            Some(Encoded::Number(price)) => Ok(price),
            Some(Encoded::Text(text)) => text
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid price `{text}`"))),
        }
    }
}

/// Actions accepted by the cart reducer
///
/// Serialized with a `type` tag: `ADD_ITEM`, `REMOVE_ITEM`,
/// `UPDATE_QUANTITY`, `CLEAR_CART`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add one unit of a tour
    AddItem {
        /// Tour identifier
        id: ItemId,
        /// Display name, kept only if the tour is new to the cart
        name: String,
        /// Unit price, kept only if the tour is new to the cart
        #[serde(with = "price")]
        price: f64,
        /// Display reference, kept only if the tour is new to the cart
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<String>,
    },

    /// Remove a tour regardless of its quantity
    RemoveItem {
        /// Tour identifier
        id: ItemId,
    },

    /// Set the quantity of a tour; below 1 removes it
    UpdateQuantity {
        /// Tour identifier
        id: ItemId,
        /// Target quantity
        quantity: i64,
    },

    /// Empty the cart
    ClearCart,
}

impl CartAction {
    /// Builds an [`CartAction::AddItem`]
    #[must_use]
    pub fn add(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: f64,
        image: Option<String>,
    ) -> Self {
        Self::AddItem {
            id: id.into(),
            name: name.into(),
            price,
            image,
        }
    }

    /// Builds an [`CartAction::AddItem`] carrying an existing line's metadata
    #[must_use]
    pub fn add_tour(item: &TourItem) -> Self {
        Self::AddItem {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
        }
    }

    /// Builds a [`CartAction::RemoveItem`]
    #[must_use]
    pub fn remove(id: impl Into<ItemId>) -> Self {
        Self::RemoveItem { id: id.into() }
    }

    /// Builds a [`CartAction::UpdateQuantity`]
    #[must_use]
    pub fn update_quantity(id: impl Into<ItemId>, quantity: i64) -> Self {
        Self::UpdateQuantity {
            id: id.into(),
            quantity,
        }
    }

    /// Builds a [`CartAction::ClearCart`]
    #[must_use]
    pub const fn clear() -> Self {
        Self::ClearCart
    }

    /// Wire tag of this action
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddItem { .. } => "ADD_ITEM",
            Self::RemoveItem { .. } => "REMOVE_ITEM",
            Self::UpdateQuantity { .. } => "UPDATE_QUANTITY",
            Self::ClearCart => "CLEAR_CART",
        }
    }
}
