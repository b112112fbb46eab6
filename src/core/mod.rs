//! Core module containing the resource model and the HAL assembly machinery

pub mod entity;
pub mod error;
pub mod field;
pub mod hal;
pub mod helper;
pub mod link;
pub mod pagination;
pub mod paging;
pub mod request;
pub mod service;

pub use entity::Entity;
pub use error::{RestError, RestResult};
pub use field::FieldValue;
pub use hal::{CollectionResource, HalResource};
pub use helper::RestHelper;
pub use link::{HalLink, LinkBuilder};
pub use pagination::{Direction, PageMetadata, Pageable, PaginationResult, SortOrder};
pub use paging::PagingAwareRestHelper;
pub use request::RequestContext;
pub use service::EntityService;
