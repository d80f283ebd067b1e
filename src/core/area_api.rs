use crate::core::{
    Acknowledged, ApiRequest, AreaListResponse, AreaResponse, AreaTreeFilter, AreaTreeResponse, HttpMethod,
    ImportAreaResponse, PageResult, Result, Transport,
};
use crate::domain::model::Area;
use serde::Serialize;
use std::fmt::Display;

const CREATE_AREA: &str = "/area/createArea";
const DELETE_AREA: &str = "/area/deleteArea";
const DELETE_AREAS_BY_IDS: &str = "/area/deleteAreasByIds";
const UPDATE_AREA: &str = "/area/updateArea";
const GET_AREA_LIST: &str = "/area/getAreaList";
const GET_AREA_BY_ID: &str = "/area/getAreaById";
const GET_AREA_BY_AREA_ID: &str = "/area/getAreaByAreaId";
const GET_AREA_TREE: &str = "/area/getAreaTree";
const GET_AREAS_BY_PARENT_ID: &str = "/area/getAreasByParentId";
const IMPORT_AREA_DATA: &str = "/area/importAreaData";

/// 區域資源的請求封裝。
///
/// 每個方法只負責組出固定的路徑、方法與內容並交給 Transport，
/// 不做驗證、不重試，也不改動回傳結果或錯誤。
#[derive(Debug, Clone)]
pub struct AreaApi<T: Transport> {
    transport: T,
}

impl<T: Transport> AreaApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 建立區域
    pub async fn create_area<P>(&self, data: &P) -> Result<Acknowledged>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.send(HttpMethod::Post, CREATE_AREA, data).await
    }

    /// 刪除區域，內容通常是含 `ID` 與 `i` 的 [`Area`]
    pub async fn delete_area<P>(&self, data: &P) -> Result<Acknowledged>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.send(HttpMethod::Delete, DELETE_AREA, data).await
    }

    /// 批次刪除
    pub async fn delete_areas_by_ids<P>(&self, data: &P) -> Result<Acknowledged>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.send(HttpMethod::Delete, DELETE_AREAS_BY_IDS, data).await
    }

    pub async fn update_area<P>(&self, data: &P) -> Result<Acknowledged>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.send(HttpMethod::Put, UPDATE_AREA, data).await
    }

    /// 分頁取得區域列表
    pub async fn get_area_list<P>(&self, data: &P) -> Result<PageResult<Area>>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.send(HttpMethod::Post, GET_AREA_LIST, data).await
    }

    /// 依資料庫 ID 取得區域
    pub async fn get_area_by_id<P>(&self, data: &P) -> Result<AreaResponse>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.send(HttpMethod::Post, GET_AREA_BY_ID, data).await
    }

    /// 依區域編碼取得區域
    pub async fn get_area_by_area_id(&self, area_id: impl Display) -> Result<AreaResponse> {
        let url = format!("{}/{}", GET_AREA_BY_AREA_ID, area_id);
        tracing::debug!("📡 GET {}", url);
        self.transport
            .request(ApiRequest::new(HttpMethod::Get, url))
            .await
    }

    /// 取得樹狀結構；未指定條件時送出 `{}`
    pub async fn get_area_tree(
        &self,
        filter: Option<&AreaTreeFilter>,
    ) -> Result<AreaTreeResponse> {
        match filter {
            Some(filter) => self.send(HttpMethod::Post, GET_AREA_TREE, filter).await,
            None => {
                self.send(HttpMethod::Post, GET_AREA_TREE, &serde_json::json!({}))
                    .await
            }
        }
    }

    /// 取得某父級的直接子區域
    pub async fn get_areas_by_parent_id(
        &self,
        parent_id: impl Display,
    ) -> Result<AreaListResponse> {
        let url = format!("{}/{}", GET_AREAS_BY_PARENT_ID, parent_id);
        tracing::debug!("📡 GET {}", url);
        self.transport
            .request(ApiRequest::new(HttpMethod::Get, url))
            .await
    }

    /// 匯入區域資料
    pub async fn import_area_data<P>(&self, data: &P) -> Result<ImportAreaResponse>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.send(HttpMethod::Post, IMPORT_AREA_DATA, data).await
    }

    async fn send<P, R>(&self, method: HttpMethod, url: &str, data: &P) -> Result<R>
    where
        P: Serialize + ?Sized + Sync,
        R: serde::de::DeserializeOwned + Send,
    {
        let body = serde_json::to_value(data)?;
        tracing::debug!("📡 {} {}", method, url);
        self.transport
            .request(ApiRequest::new(method, url).with_data(body))
            .await
    }
}
