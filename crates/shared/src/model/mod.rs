mod material;
mod product;
mod product_type;
mod workshop;

pub use self::material::Material;
pub use self::product::{Product, ProductWithTime, ProductWorkshop};
pub use self::product_type::ProductType;
pub use self::workshop::Workshop;
