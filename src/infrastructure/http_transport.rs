//! HTTP 传输 - 基础设施层
//!
//! 持有唯一的 reqwest Client，只暴露"发请求"的能力

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::transport::{HttpResponse, MultipartPayload, PartValue, Transport};

/// HTTP 传输
///
/// 职责：
/// - 持有 Client 和服务器地址
/// - 把 MultipartPayload 转成真实的 multipart 请求
/// - 下载服务端生成的文件
/// - 不认识批量上传 / 对比流程
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// 创建新的 HTTP 传输
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 把相对地址拼接到服务器地址上
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }

    /// 下载文件内容
    pub async fn download(&self, url: &str) -> AppResult<Vec<u8>> {
        let full_url = self.resolve_url(url);
        debug!("下载文件: {}", full_url);

        let response = self
            .client
            .get(&full_url)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(AppError::bad_status(url, status));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;
        Ok(bytes.to_vec())
    }

    fn build_form(payload: MultipartPayload) -> AppResult<Form> {
        let mut form = Form::new();
        for part in payload.into_parts() {
            form = match part.value {
                PartValue::Text(value) => form.text(part.name, value),
                PartValue::File(file) => {
                    let file_part = Part::bytes(file.content().to_vec())
                        .file_name(file.name().to_string())
                        .mime_str(file.mime_type())?;
                    form.part(part.name, file_part)
                }
            };
        }
        Ok(form)
    }
}

impl Transport for HttpTransport {
    async fn post_multipart(
        &self,
        endpoint: &str,
        payload: MultipartPayload,
    ) -> AppResult<HttpResponse> {
        let url = self.resolve_url(endpoint);
        debug!("POST {} ({} 个字段)", url, payload.parts().len());

        let form = Self::build_form(payload)?;
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        debug!("POST {} 返回状态码 {}", url, status);

        Ok(HttpResponse::new(status, body))
    }
}
