//! 传输层抽象
//!
//! 界面流程只依赖这个 trait，真实实现见 `HttpTransport`

use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::models::FileHandle;

/// 批量上传接口
pub const UPLOAD_ENDPOINT: &str = "/upload";
/// 图片对比接口
pub const COMPARE_ENDPOINT: &str = "/compare";

/// multipart 表单中的一个字段值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(FileHandle),
}

/// multipart 表单字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

/// 与传输实现无关的 multipart 请求体
///
/// 字段按追加顺序保存，同名字段可以重复出现
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<FormPart>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加文件字段
    pub fn file(mut self, name: impl Into<String>, file: FileHandle) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::File(file),
        });
        self
    }

    /// 追加文本字段
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }

    /// 指定字段名下的所有文件
    pub fn files(&self, name: &str) -> Vec<&FileHandle> {
        self.parts
            .iter()
            .filter(|p| p.name == name)
            .filter_map(|p| match &p.value {
                PartValue::File(f) => Some(f),
                PartValue::Text(_) => None,
            })
            .collect()
    }

    /// 指定字段名的第一个文本值
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts
            .iter()
            .filter(|p| p.name == name)
            .find_map(|p| match &p.value {
                PartValue::Text(t) => Some(t.as_str()),
                PartValue::File(_) => None,
            })
    }
}

/// 服务端响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 状态码为 2xx 时解析 JSON，否则直接返回状态码错误，不检查响应体
    pub fn json<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        if !self.is_success() {
            return Err(AppError::bad_status(endpoint, self.status));
        }
        self.parse()
    }

    /// 不看状态码，直接按 JSON 解析响应体
    pub fn parse<T: DeserializeOwned>(&self) -> AppResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// 提交 multipart 表单的能力
///
/// 一次调用对应一次请求，不重试，不取消
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_multipart(
        &self,
        endpoint: &str,
        payload: MultipartPayload,
    ) -> AppResult<HttpResponse>;
}

impl<T: Transport> Transport for &T {
    async fn post_multipart(
        &self,
        endpoint: &str,
        payload: MultipartPayload,
    ) -> AppResult<HttpResponse> {
        (**self).post_multipart(endpoint, payload).await
    }
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    async fn post_multipart(
        &self,
        endpoint: &str,
        payload: MultipartPayload,
    ) -> AppResult<HttpResponse> {
        (**self).post_multipart(endpoint, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompareResponse, UploadResponse};

    #[test]
    fn test_payload_keeps_repeated_fields_in_order() {
        let a = FileHandle::new("a.png", vec![1]);
        let payload = MultipartPayload::new()
            .file("files[]", a.clone())
            .file("files[]", a.clone())
            .text("keywords", "logo");

        assert_eq!(payload.files("files[]").len(), 2);
        assert_eq!(payload.text_value("keywords"), Some("logo"));
        assert_eq!(payload.text_value("target_count"), None);
        assert_eq!(payload.parts()[2].name, "keywords");
    }

    #[test]
    fn test_json_rejects_non_success_without_reading_body() {
        let resp = HttpResponse::new(400, r#"{"download_url":"/x.zip"}"#);
        let err = resp.json::<UploadResponse>(UPLOAD_ENDPOINT).unwrap_err();
        assert!(err.is_bad_status());
    }

    #[test]
    fn test_json_parse_failure() {
        let resp = HttpResponse::new(200, "<html>oops</html>");
        let err = resp.json::<UploadResponse>(UPLOAD_ENDPOINT).unwrap_err();
        assert!(!err.is_bad_status());
    }

    #[test]
    fn test_parse_ignores_status() {
        let body = r#"{"metaA":"A","metaB":"B","sizeA":"1","sizeB":"2","dimA":"3","dimB":"4","diffImage":"d"}"#;
        let resp = HttpResponse::new(400, body);
        let parsed = resp.parse::<CompareResponse>().unwrap();
        assert_eq!(parsed.meta_a, "A");
        assert_eq!(parsed.diff_image, "d");

        let err = HttpResponse::new(500, r#"{"error":"boom"}"#)
            .parse::<CompareResponse>()
            .unwrap_err();
        assert!(!err.is_bad_status());
    }
}
