use serde::{Deserialize, Serialize};

/// Model code of a product. Two cart lines never share one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelCode(pub String);

impl ModelCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for ModelCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of the persisted cart. Field names match the stored JSON layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub model: ModelCode,
    pub price: u64,
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_amount(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Payload of an "add to cart" button. Price and image are optional on product cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCart {
    pub name: String,
    pub model: ModelCode,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Ordered cart lines; order is the order of first add.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: u64,
    pub item_count: u64,
    pub total: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantityChange {
    Updated,
    Removed,
    NotFound,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Rebuilds a cart from stored lines, restoring the line invariants:
    /// zero-quantity lines are dropped and repeated models are merged into
    /// the first occurrence. Returns whether anything had to be repaired.
    pub fn from_stored(lines: Vec<CartItem>) -> (Self, bool) {
        let mut repaired = false;
        let mut items: Vec<CartItem> = Vec::with_capacity(lines.len());

        for line in lines {
            if line.quantity == 0 {
                repaired = true;
                continue;
            }
            match items.iter_mut().find(|item| item.model == line.model) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                    repaired = true;
                }
                None => items.push(line),
            }
        }

        (Self { items }, repaired)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, model: &ModelCode) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.model == model)
    }

    /// Adds one unit. A repeated model only bumps the quantity; the stored
    /// name, price and image of the first add are kept.
    pub fn add(&mut self, input: AddToCart, placeholder_image: &str) -> &CartItem {
        let index = match self.position(&input.model) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
                index
            }
            None => {
                self.items.push(CartItem {
                    name: input.name,
                    model: input.model,
                    price: input.price.unwrap_or(0),
                    image: input
                        .image
                        .filter(|image| !image.is_empty())
                        .unwrap_or_else(|| placeholder_image.to_string()),
                    quantity: 1,
                });
                self.items.len() - 1
            }
        };

        &self.items[index]
    }

    /// Drops every line carrying `model`.
    pub fn remove(&mut self, model: &ModelCode) -> Option<CartItem> {
        let index = self.position(model)?;
        let removed = self.items.remove(index);
        self.items.retain(|item| &item.model != model);
        Some(removed)
    }

    pub fn set_quantity(&mut self, model: &ModelCode, quantity: i64) -> QuantityChange {
        let Some(index) = self.position(model) else {
            return QuantityChange::NotFound;
        };

        if quantity <= 0 {
            self.items.remove(index);
            return QuantityChange::Removed;
        }

        self.items[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        QuantityChange::Updated
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn totals(&self) -> CartTotals {
        let subtotal =
            self.items.iter().fold(0u64, |sum, item| sum.saturating_add(item.line_amount()));

        CartTotals { subtotal, item_count: self.item_count(), total: subtotal }
    }

    fn position(&self, model: &ModelCode) -> Option<usize> {
        self.items.iter().position(|item| &item.model == model)
    }
}

#[cfg(test)]
mod tests {
    use super::{AddToCart, Cart, CartItem, ModelCode, QuantityChange};

    const PLACEHOLDER: &str = "assets/img/placeholder.png";

    fn input(model: &str, price: Option<u64>) -> AddToCart {
        AddToCart {
            name: format!("Product {model}"),
            model: ModelCode::from(model),
            price,
            image: None,
        }
    }

    #[test]
    fn repeated_adds_aggregate_into_one_line() {
        let mut cart = Cart::default();
        for _ in 0..4 {
            cart.add(input("DS-2CD", Some(1500)), PLACEHOLDER);
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn repeat_add_keeps_first_price() {
        let mut cart = Cart::default();
        cart.add(input("A", Some(100)), PLACEHOLDER);
        cart.add(input("A", Some(999)), PLACEHOLDER);

        let item = cart.find(&ModelCode::from("A")).expect("line for A");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, 100);
    }

    #[test]
    fn new_line_defaults_price_and_image() {
        let mut cart = Cart::default();
        let item = cart.add(input("B", None), PLACEHOLDER).clone();

        assert_eq!(item.price, 0);
        assert_eq!(item.image, PLACEHOLDER);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn lines_keep_first_add_order() {
        let mut cart = Cart::default();
        cart.add(input("C", Some(1)), PLACEHOLDER);
        cart.add(input("A", Some(1)), PLACEHOLDER);
        cart.add(input("C", Some(1)), PLACEHOLDER);
        cart.add(input("B", Some(1)), PLACEHOLDER);

        let models: Vec<&str> = cart.items().iter().map(|item| item.model.as_str()).collect();
        assert_eq!(models, vec!["C", "A", "B"]);
    }

    #[test]
    fn non_positive_quantity_removes_line() {
        for quantity in [0, -1] {
            let mut updated = Cart::default();
            updated.add(input("A", Some(10)), PLACEHOLDER);
            updated.add(input("B", Some(10)), PLACEHOLDER);
            let mut removed = updated.clone();

            let change = updated.set_quantity(&ModelCode::from("A"), quantity);
            assert_eq!(change, QuantityChange::Removed);
            removed.remove(&ModelCode::from("A"));

            assert_eq!(updated, removed);
        }
    }

    #[test]
    fn set_quantity_on_unknown_model_is_noop() {
        let mut cart = Cart::default();
        cart.add(input("A", Some(10)), PLACEHOLDER);
        let before = cart.clone();

        assert_eq!(cart.set_quantity(&ModelCode::from("Z"), 5), QuantityChange::NotFound);
        assert_eq!(cart, before);
    }

    #[test]
    fn set_quantity_has_no_upper_bound() {
        let mut cart = Cart::default();
        cart.add(input("A", Some(10)), PLACEHOLDER);

        assert_eq!(cart.set_quantity(&ModelCode::from("A"), 250), QuantityChange::Updated);
        assert_eq!(cart.items()[0].quantity, 250);
    }

    #[test]
    fn totals_sum_price_times_quantity() {
        let cart = Cart::new(vec![
            CartItem {
                name: "Camera".to_string(),
                model: ModelCode::from("CAM"),
                price: 15999,
                image: PLACEHOLDER.to_string(),
                quantity: 2,
            },
            CartItem {
                name: "Switch".to_string(),
                model: ModelCode::from("SW"),
                price: 0,
                image: PLACEHOLDER.to_string(),
                quantity: 3,
            },
        ]);

        let totals = cart.totals();
        assert_eq!(totals.subtotal, 31998);
        assert_eq!(totals.item_count, 5);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn persisted_layout_uses_plain_field_names() {
        let mut cart = Cart::default();
        cart.add(input("A", Some(100)), PLACEHOLDER);

        let json = serde_json::to_string(&cart).expect("serialize cart");
        assert_eq!(
            json,
            r#"[{"name":"Product A","model":"A","price":100,"image":"assets/img/placeholder.png","quantity":1}]"#
        );

        let decoded: Cart = serde_json::from_str(&json).expect("decode cart");
        assert_eq!(decoded, cart);
    }

    fn line(model: &str, quantity: u32) -> CartItem {
        CartItem {
            name: format!("Product {model}"),
            model: ModelCode::from(model),
            price: 100,
            image: PLACEHOLDER.to_string(),
            quantity,
        }
    }

    #[test]
    fn stored_lines_are_repaired_on_rebuild() {
        let (cart, repaired) = Cart::from_stored(vec![line("A", 0), line("B", 1), line("B", 2)]);

        assert!(repaired);
        assert_eq!(cart.items(), &[line("B", 3)]);

        let (clean, repaired) = Cart::from_stored(vec![line("A", 1), line("B", 1)]);
        assert!(!repaired);
        assert_eq!(clean.items().len(), 2);
    }

    #[test]
    fn remove_drops_every_line_for_the_model() {
        let mut cart = Cart::new(vec![line("A", 1), line("B", 1), line("B", 1)]);

        let removed = cart.remove(&ModelCode::from("B"));

        assert_eq!(removed, Some(line("B", 1)));
        assert!(cart.find(&ModelCode::from("B")).is_none());
        assert_eq!(cart.items(), &[line("A", 1)]);
    }
}
