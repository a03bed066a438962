mod product;
mod reference;

pub use self::product::ProductRepository;
pub use self::reference::ReferenceQueryRepository;
