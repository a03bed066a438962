mod product;
mod reference;

pub use self::product::{MessageResponse, ProductListResponse, ProductResponse};
pub use self::reference::{MaterialResponse, ProductTypeResponse, WorkshopResponse};
