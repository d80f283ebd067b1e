pub mod area_api;

pub use crate::domain::model::{
    Acknowledged, Area, AreaListResponse, AreaResponse, AreaSearch, AreaTreeFilter, AreaTreeNode,
    AreaTreeResponse, IdRequest, IdsRequest, ImportAreaItem, ImportAreaRequest,
    ImportAreaResponse, PageResult,
};
pub use crate::domain::ports::{ApiRequest, HttpMethod, Transport};
pub use crate::utils::error::Result;
