//! 基础设施层：持有网络资源，只暴露能力

pub mod http_transport;
pub mod transport;

pub use http_transport::HttpTransport;
pub use transport::{
    FormPart, HttpResponse, MultipartPayload, PartValue, Transport, COMPARE_ENDPOINT,
    UPLOAD_ENDPOINT,
};
