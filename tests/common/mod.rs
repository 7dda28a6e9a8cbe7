use std::collections::VecDeque;
use std::sync::Mutex;

use wash_studio::infrastructure::{HttpResponse, MultipartPayload, Transport};
use wash_studio::{AppError, AppResult, FileHandle};

/// 按顺序返回预设响应的传输层，None 表示网络错误
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Option<(u16, String)>>>,
    requests: Mutex<Vec<(String, MultipartPayload)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Some((status, body.to_string())));
        self
    }

    pub fn with_network_error(self) -> Self {
        self.responses.lock().unwrap().push_back(None);
        self
    }

    pub fn requests(&self) -> Vec<(String, MultipartPayload)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn post_multipart(
        &self,
        endpoint: &str,
        payload: MultipartPayload,
    ) -> AppResult<HttpResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.to_string(), payload));

        match self.responses.lock().unwrap().pop_front().flatten() {
            Some((status, body)) => Ok(HttpResponse::new(status, body)),
            None => Err(AppError::api_request_failed(
                endpoint,
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "network unreachable"),
            )),
        }
    }
}

pub fn images(names: &[&str]) -> Vec<FileHandle> {
    names
        .iter()
        .map(|n| FileHandle::new(*n, vec![0xFF, 0xD8, 0xFF]))
        .collect()
}
