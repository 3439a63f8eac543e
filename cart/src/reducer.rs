//! Reducer logic for the cart.
//!
//! Every action succeeds. Ids that are not in the cart turn removals and
//! quantity updates into no-ops, and a quantity below 1 is treated as a
//! removal.

use crate::types::{CartAction, CartState};
use tourcart_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Environment for the cart reducer
///
/// The cart needs no injected dependencies.
#[derive(Clone, Copy, Debug, Default)]
pub struct CartEnvironment;

/// Reducer for the cart
#[derive(Clone, Copy, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Creates a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::AddItem {
                id,
                name,
                price,
                image,
            } => {
                tracing::trace!(%id, price, "Adding one unit");
                state.add_unit(id, name, price, image);
            },
            CartAction::RemoveItem { id } => {
                if state.remove(&id).is_none() {
                    tracing::debug!(%id, "Remove ignored: item not in cart");
                }
            },
            CartAction::UpdateQuantity { id, quantity } if quantity < 1 => {
                tracing::trace!(%id, quantity, "Quantity below 1, removing item");
                if state.remove(&id).is_none() {
                    tracing::debug!(%id, "Remove ignored: item not in cart");
                }
            },
            CartAction::UpdateQuantity { id, quantity } => {
                let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                if state.set_quantity(&id, quantity).is_none() {
                    tracing::debug!(%id, quantity, "Quantity update ignored: item not in cart");
                }
            },
            CartAction::ClearCart => state.clear(),
        }

        smallvec![Effect::None]
    }
}
