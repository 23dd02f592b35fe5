pub mod lookup_product;
