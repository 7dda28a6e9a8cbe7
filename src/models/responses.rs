use serde::{Deserialize, Serialize};

/// `/upload` 成功时的响应体
///
/// 只有 `download_url` 是必需的，其余字段服务端可能不返回
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub download_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// `/compare` 的响应体
///
/// 所有字段都是服务端格式化好的字符串，直接显示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub meta_a: String,
    pub meta_b: String,
    pub size_a: String,
    pub size_b: String,
    pub dim_a: String,
    pub dim_b: String,
    /// 差异图，URL 或 data URL
    pub diff_image: String,
}

impl CompareResponse {
    /// 差异图是否内嵌在 data URL 中
    pub fn diff_is_inline(&self) -> bool {
        self.diff_image.starts_with("data:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_minimal() {
        let resp: UploadResponse =
            serde_json::from_str(r#"{"download_url":"/files/out.zip"}"#).unwrap();
        assert_eq!(resp.download_url, "/files/out.zip");
        assert_eq!(resp.count, None);
    }

    #[test]
    fn test_upload_response_requires_download_url() {
        let result = serde_json::from_str::<UploadResponse>(r#"{"message":"Success"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_compare_response_camel_case() {
        let resp: CompareResponse = serde_json::from_str(
            r#"{"metaA":"Present","metaB":"Clean","sizeA":"120.5 KB","sizeB":"98.0 KB",
                "dimA":"1200x800","dimB":"1000x667","diffImage":"data:image/jpeg;base64,AAAA"}"#,
        )
        .unwrap();
        assert_eq!(resp.meta_b, "Clean");
        assert_eq!(resp.dim_b, "1000x667");
        assert!(resp.diff_is_inline());
    }
}
