//! # Sale Draft
//!
//! The in-memory sale being assembled at the register before checkout.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Sale Draft Operations                           │
//! │                                                                     │
//! │  UI Action               Operation              Draft Change        │
//! │  ─────────               ─────────              ────────────        │
//! │  Tap product ──────────► add_item() ──────────► merge or push line  │
//! │  Edit quantity ────────► update_quantity() ───► line.quantity = n   │
//! │  Tap remove ───────────► remove_item() ───────► drop the line       │
//! │  Pick tender ──────────► set_payment_method()                       │
//! │  Type notes ───────────► set_notes()                                │
//! │  Checkout / cancel ────► clear() ─────────────► empty draft         │
//! │                                                                     │
//! │  The running total is recomputed after every item mutation.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock
//! The draft never looks at stock. A cashier can sell past the recorded
//! level; the resulting negative stock is recorded as-is at commit time.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{PaymentMethod, Product};

// =============================================================================
// Draft Line
// =============================================================================

/// One line of the draft.
///
/// `product_name` and `price` are frozen when the line is created. If the
/// catalog price changes while the draft is open, this line keeps the price
/// the cashier saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftLine {
    /// Catalog product this line refers to.
    pub product_id: i64,

    /// Product name at add time (frozen).
    pub product_name: String,

    /// Unit price at add time (frozen).
    pub price: f64,

    /// Quantity in the draft. Always positive.
    pub quantity: i64,
}

impl DraftLine {
    /// Creates a line from a catalog product, capturing the price snapshot.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        DraftLine {
            product_id: product.id,
            product_name: product.name.clone(),
            price: product.price,
            quantity,
        }
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// =============================================================================
// Sale Draft
// =============================================================================

/// The current sale being assembled.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges).
/// - Every line quantity is positive.
/// - `total` always equals the sum of `line_total()` over all lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    items: Vec<DraftLine>,
    total: f64,
    payment_method: PaymentMethod,
    notes: String,
}

impl Default for SaleDraft {
    fn default() -> Self {
        SaleDraft {
            items: Vec::new(),
            total: 0.0,
            payment_method: PaymentMethod::Cash,
            notes: String::new(),
        }
    }
}

impl SaleDraft {
    /// Creates a new empty draft (cash tender, no notes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product to the draft, or increases the existing line's quantity
    /// if the product is already present.
    ///
    /// The price snapshot is taken only when the line is first created.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += quantity;
        } else {
            self.items.push(DraftLine::from_product(product, quantity));
        }

        self.recompute_total();
        Ok(())
    }

    /// Replaces the quantity of an existing line.
    ///
    /// Rejects a non-positive quantity with a validation error and leaves the
    /// draft untouched; removing a line goes through [`remove_item`].
    ///
    /// [`remove_item`]: SaleDraft::remove_item
    pub fn update_quantity(&mut self, product_id: i64, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        let line = self
            .items
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or(CoreError::ProductNotInDraft(product_id))?;

        line.quantity = quantity;
        self.recompute_total();
        Ok(())
    }

    /// Removes a line from the draft.
    pub fn remove_item(&mut self, product_id: i64) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|l| l.product_id != product_id);

        if self.items.len() == initial_len {
            return Err(CoreError::ProductNotInDraft(product_id));
        }

        self.recompute_total();
        Ok(())
    }

    /// Sets the payment method. No recomputation needed.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Sets the free-text notes. No recomputation needed.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Resets the draft to its empty default state.
    ///
    /// Called after a successful commit or an explicit cancel.
    pub fn clear(&mut self) {
        *self = SaleDraft::default();
    }

    /// Checks that the draft can be committed: at least one line and a
    /// positive total. Performed before any storage mutation.
    pub fn ensure_committable(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptyDraft);
        }
        if self.total <= 0.0 {
            return Err(ValidationError::NonPositiveTotal);
        }
        Ok(())
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(|l| l.line_total()).sum();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The draft lines, in the order they were first added.
    pub fn items(&self) -> &[DraftLine] {
        &self.items
    }

    /// The running total.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// The selected payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The free-text notes.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// True when the draft has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SyncStatus;

    fn test_product(id: i64, price: f64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: None,
            price,
            cost: None,
            stock: 10,
            barcode: None,
            category: None,
            image_url: None,
            sync_status: SyncStatus::Pending,
        }
    }

    #[test]
    fn test_add_item_computes_total() {
        let mut draft = SaleDraft::new();
        draft.add_item(&test_product(1, 10.0), 2).unwrap();
        draft.add_item(&test_product(2, 15.0), 1).unwrap();

        assert_eq!(draft.item_count(), 2);
        assert_eq!(draft.total(), 35.0);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut draft = SaleDraft::new();
        let product = test_product(1, 9.99);

        draft.add_item(&product, 2).unwrap();
        draft.add_item(&product, 3).unwrap();

        assert_eq!(draft.item_count(), 1);
        assert_eq!(draft.items()[0].quantity, 5);
        assert_eq!(draft.total_quantity(), 5);
    }

    #[test]
    fn test_add_item_rejects_non_positive_quantity() {
        let mut draft = SaleDraft::new();
        assert!(draft.add_item(&test_product(1, 5.0), 0).is_err());
        assert!(draft.is_empty());
    }

    #[test]
    fn test_price_snapshot_survives_catalog_change() {
        let mut draft = SaleDraft::new();
        let mut product = test_product(1, 10.0);
        draft.add_item(&product, 1).unwrap();

        // Catalog price changes while the draft is open.
        product.price = 99.0;
        draft.add_item(&product, 1).unwrap();

        // Merged line keeps the original snapshot.
        assert_eq!(draft.items()[0].price, 10.0);
        assert_eq!(draft.total(), 20.0);
    }

    #[test]
    fn test_update_quantity() {
        let mut draft = SaleDraft::new();
        draft.add_item(&test_product(1, 4.0), 1).unwrap();

        draft.update_quantity(1, 5).unwrap();
        assert_eq!(draft.items()[0].quantity, 5);
        assert_eq!(draft.total(), 20.0);
    }

    #[test]
    fn test_update_quantity_rejects_zero_and_keeps_draft() {
        let mut draft = SaleDraft::new();
        draft.add_item(&test_product(1, 4.0), 3).unwrap();

        let err = draft.update_quantity(1, 0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));

        // Draft unchanged.
        assert_eq!(draft.items()[0].quantity, 3);
        assert_eq!(draft.total(), 12.0);
    }

    #[test]
    fn test_update_quantity_unknown_product() {
        let mut draft = SaleDraft::new();
        let err = draft.update_quantity(99, 1).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotInDraft(99)));
    }

    #[test]
    fn test_remove_item() {
        let mut draft = SaleDraft::new();
        draft.add_item(&test_product(1, 10.0), 1).unwrap();
        draft.add_item(&test_product(2, 5.0), 2).unwrap();

        draft.remove_item(1).unwrap();
        assert_eq!(draft.item_count(), 1);
        assert_eq!(draft.total(), 10.0);

        assert!(draft.remove_item(1).is_err());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut draft = SaleDraft::new();
        draft.add_item(&test_product(1, 10.0), 1).unwrap();
        draft.set_payment_method(PaymentMethod::Card);
        draft.set_notes("para llevar");

        draft.clear();

        assert!(draft.is_empty());
        assert_eq!(draft.total(), 0.0);
        assert_eq!(draft.payment_method(), PaymentMethod::Cash);
        assert_eq!(draft.notes(), "");
    }

    #[test]
    fn test_ensure_committable() {
        let mut draft = SaleDraft::new();
        assert!(matches!(
            draft.ensure_committable(),
            Err(ValidationError::EmptyDraft)
        ));

        draft.add_item(&test_product(1, 10.0), 1).unwrap();
        assert!(draft.ensure_committable().is_ok());
    }

    #[test]
    fn test_total_matches_sum_of_lines_exactly() {
        let mut draft = SaleDraft::new();
        draft.add_item(&test_product(1, 3.33), 3).unwrap();
        draft.add_item(&test_product(2, 0.1), 7).unwrap();

        let expected: f64 = draft.items().iter().map(|l| l.line_total()).sum();
        assert_eq!(draft.total(), expected);
    }
}
