use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Product, ProductCreate, ProductId, ProductUpdate};

fn check_price(price: f64) -> Result<f64, FrameworkError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(FrameworkError::Validation(format!(
            "price must be a non-negative finite amount, got {price}"
        )))
    }
}

impl Entity for Product {
    type Id = ProductId;
    type CreateParams = ProductCreate;
    type Update = ProductUpdate;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Creates a new Product from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the store
    /// * `params` - Name, price and (for bundles) the already validated source ids
    ///
    /// # Errors
    /// Rejects a negative or non-finite price.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, FrameworkError> {
        let price = check_price(params.price)?;
        Ok(Product::new(id, params.name, price).with_sources(params.sources))
    }

    /// Overwrites name and price. `sources` is never touched.
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), FrameworkError> {
        self.price = check_price(update.price)?;
        self.name = update.name;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_non_finite_prices() {
        for price in [-0.01, f64::NAN, f64::INFINITY] {
            let result = Product::from_create_params("product_1".into(), ProductCreate::plain("x", price));
            assert!(matches!(result, Err(FrameworkError::Validation(_))), "price {price}");
        }
        assert!(Product::from_create_params("product_1".into(), ProductCreate::plain("free", 0.0)).is_ok());
    }

    #[test]
    fn update_keeps_sources_and_is_all_or_nothing() {
        let mut bundle = Product::new("product_3", "Combo", 25.0)
            .with_sources(vec!["product_1".into(), "product_2".into()]);

        bundle
            .on_update(ProductUpdate { name: "Mega Combo".into(), price: 30.0 })
            .unwrap();
        assert_eq!(bundle.name, "Mega Combo");
        assert_eq!(bundle.price, 30.0);
        assert_eq!(bundle.sources, vec!["product_1".to_string(), "product_2".to_string()]);

        let before = bundle.clone();
        let err = bundle.on_update(ProductUpdate { name: "Broken".into(), price: -1.0 });
        assert!(err.is_err());
        assert_eq!(bundle, before);
    }
}
