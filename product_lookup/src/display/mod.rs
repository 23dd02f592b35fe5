pub mod render;

use crate::product::Product;
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub origin: String,
}

impl ProductRow {
    /// Cells in column order.
    pub fn cells(&self) -> [&str; 3] {
        [&self.id, &self.name, &self.origin]
    }
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            origin: product.origin.clone(),
        }
    }
}

/// The table a lookup renders into. Owned by whoever drives the lookups and
/// handed to the handler, so it can be inspected without a real screen.
pub trait DisplaySurface: Send {
    fn clear_rows(&mut self);
    fn insert_row(&mut self, row: ProductRow);
    fn set_visible(&mut self, visible: bool);
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProductTable {
    rows: Vec<ProductRow>,
    visible: bool,
}

impl ProductTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ProductRow] {
        &self.rows
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl DisplaySurface for ProductTable {
    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn insert_row(&mut self, row: ProductRow) {
        self.rows.push(row);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Replaces the surface body with `product`, or hides it when there is none.
pub fn display_product_details<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    product: Option<&Product>,
) {
    surface.clear_rows();
    match product {
        Some(product) => {
            surface.insert_row(ProductRow::from(product));
            surface.set_visible(true);
        }
        None => surface.set_visible(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::RecordId;

    fn widget() -> Product {
        Product {
            id: RecordId::Number(42u64.into()),
            name: "Widget".to_owned(),
            origin: "Canada".to_owned(),
        }
    }

    #[test]
    fn test_product_is_rendered_as_single_visible_row() {
        let mut table = ProductTable::new();

        display_product_details(&mut table, Some(&widget()));

        assert!(table.is_visible());
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0].cells(), ["42", "Widget", "Canada"]);
    }

    #[test]
    fn test_repeated_renders_do_not_accumulate_rows() {
        let mut table = ProductTable::new();

        display_product_details(&mut table, Some(&widget()));
        display_product_details(&mut table, Some(&widget()));

        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn test_absent_product_hides_and_empties_the_table() {
        let mut table = ProductTable::new();
        display_product_details(&mut table, Some(&widget()));

        display_product_details(&mut table, None);

        assert!(!table.is_visible());
        assert!(table.rows().is_empty());
    }
}
