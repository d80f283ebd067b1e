use chrono::{DateTime, FixedOffset};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// 區域 (省 / 市 / 縣三級)
///
/// `p` 為父級的區域編碼，`0` 表示頂級區域。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Area {
    #[serde(rename = "ID", default)]
    pub id: u64,
    #[serde(rename = "CreatedAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(rename = "UpdatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    /// 區域編碼
    #[serde(rename = "i", default)]
    pub code: i64,
    /// 區域名稱
    #[serde(rename = "n", default)]
    pub name: String,
    /// 父級區域編碼
    #[serde(rename = "p", default)]
    pub parent_code: i64,
    /// 拼音前綴
    #[serde(rename = "y", default)]
    pub pinyin: String,
    #[serde(default)]
    pub level: i32,
}

impl Area {
    pub fn is_top_level(&self) -> bool {
        self.parent_code == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<u64>,
}

/// 分頁查詢條件，未設定的欄位不會送出
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSearch {
    pub page: i64,
    pub page_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(rename = "n", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "i", skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<i64>,
    #[serde(rename = "y", skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_key: Option<String>,
    #[serde(default)]
    pub desc: bool,
}

impl AreaSearch {
    pub fn page(page: i64, page_size: i64) -> Self {
        Self {
            page,
            page_size,
            ..Default::default()
        }
    }
}

/// 樹狀查詢條件；全部留空時序列化為 `{}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaTreeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportAreaItem {
    pub n: String,
    pub i: i64,
    #[serde(default)]
    pub p: i64,
    #[serde(default)]
    pub y: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportAreaRequest {
    pub data: Vec<ImportAreaItem>,
    #[serde(default)]
    pub clear_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub list: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaResponse {
    pub area: Area,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaTreeNode {
    #[serde(flatten)]
    pub area: Area,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AreaTreeNode>,
}

impl AreaTreeNode {
    /// 包含自身在內的節點總數
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AreaTreeNode::node_count).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaTreeResponse {
    #[serde(default)]
    pub tree: Vec<AreaTreeNode>,
}

impl AreaTreeResponse {
    pub fn node_count(&self) -> usize {
        self.tree.iter().map(AreaTreeNode::node_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaListResponse {
    #[serde(default)]
    pub areas: Vec<Area>,
}

/// 新增 / 修改 / 刪除成功時的回應。
///
/// 伺服器在 `data` 放的是 `{}` 或 `null`，內容一律略過。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Acknowledged;

impl<'de> Deserialize<'de> for Acknowledged {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Acknowledged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportAreaResponse {
    pub success: i64,
    pub failed: i64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_area_uses_server_field_names() {
        let area: Area = serde_json::from_value(json!({
            "ID": 3,
            "CreatedAt": "2024-05-01T10:00:00+08:00",
            "UpdatedAt": "2024-05-01T10:00:00+08:00",
            "i": 1101,
            "n": "北京市",
            "p": 11,
            "y": "b",
            "level": 2
        }))
        .unwrap();

        assert_eq!(area.id, 3);
        assert_eq!(area.code, 1101);
        assert_eq!(area.parent_code, 11);
        assert!(!area.is_top_level());
        assert!(area.created_at.is_some());

        let value = serde_json::to_value(&area).unwrap();
        assert_eq!(value["n"], "北京市");
        assert_eq!(value["i"], 1101);
    }

    #[test]
    fn test_new_area_omits_timestamps() {
        let area = Area {
            code: 11,
            name: "北京".to_string(),
            pinyin: "b".to_string(),
            level: 1,
            ..Default::default()
        };
        let value = serde_json::to_value(&area).unwrap();
        assert_eq!(
            value,
            json!({"ID": 0, "i": 11, "n": "北京", "p": 0, "y": "b", "level": 1})
        );
    }

    #[test]
    fn test_empty_tree_filter_is_empty_object() {
        let value = serde_json::to_value(AreaTreeFilter::default()).unwrap();
        assert_eq!(value, json!({}));

        let filter = AreaTreeFilter {
            parent_id: Some(11),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(filter).unwrap(), json!({"parentId": 11}));
    }

    #[test]
    fn test_area_search_skips_unset_filters() {
        let mut search = AreaSearch::page(1, 20);
        search.name = Some("北".to_string());
        let value = serde_json::to_value(&search).unwrap();
        assert_eq!(
            value,
            json!({"page": 1, "pageSize": 20, "n": "北", "desc": false})
        );
    }

    #[test]
    fn test_acknowledged_accepts_any_data() {
        for data in [json!({}), json!(null), json!({"reload": true}), json!([])] {
            let ack: Acknowledged = serde_json::from_value(data).unwrap();
            assert_eq!(ack, Acknowledged);
        }
    }

    #[test]
    fn test_tree_node_count() {
        let tree: AreaTreeResponse = serde_json::from_value(json!({
            "tree": [
                {"ID": 1, "i": 11, "n": "北京", "p": 0, "y": "b", "level": 1,
                 "children": [
                    {"ID": 2, "i": 1101, "n": "北京市", "p": 11, "y": "b", "level": 2,
                     "children": [
                        {"ID": 3, "i": 110101, "n": "東城區", "p": 1101, "y": "d", "level": 3}
                     ]}
                 ]},
                {"ID": 4, "i": 12, "n": "天津", "p": 0, "y": "t", "level": 1}
            ]
        }))
        .unwrap();

        assert_eq!(tree.tree.len(), 2);
        assert_eq!(tree.tree[0].node_count(), 3);
        assert_eq!(tree.node_count(), 4);
        assert!(tree.tree[1].children.is_empty());
    }
}
