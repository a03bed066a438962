mod product;

pub use self::product::{
    CreateProductRequest, CreateProductWithWorkshopsRequest, WorkshopTimeRequest,
};
