mod product;
mod reference;

pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::reference::{
    DynReferenceQueryRepository, DynReferenceQueryService, ReferenceQueryRepositoryTrait,
    ReferenceQueryServiceTrait,
};
