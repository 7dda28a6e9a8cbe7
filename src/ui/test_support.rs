use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::infrastructure::{HttpResponse, MultipartPayload, Transport};
use crate::models::FileHandle;

/// 预设的服务端行为
pub enum Scripted {
    Respond(u16, String),
    NetworkError,
}

/// 记录请求并按顺序返回预设响应
#[derive(Default)]
pub struct RecordingTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<(String, MultipartPayload)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Respond(status, body.to_string()));
        self
    }

    pub fn fail_network(self) -> Self {
        self.script.lock().unwrap().push_back(Scripted::NetworkError);
        self
    }

    pub fn requests(&self) -> Vec<(String, MultipartPayload)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for RecordingTransport {
    async fn post_multipart(
        &self,
        endpoint: &str,
        payload: MultipartPayload,
    ) -> AppResult<HttpResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.to_string(), payload));

        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Respond(status, body)) => Ok(HttpResponse::new(status, body)),
            Some(Scripted::NetworkError) | None => Err(AppError::api_request_failed(
                endpoint,
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            )),
        }
    }
}

pub fn files(names: &[&str]) -> Vec<FileHandle> {
    names
        .iter()
        .map(|n| FileHandle::new(*n, n.as_bytes().to_vec()))
        .collect()
}
