use async_trait::async_trait;
use url::Url;

use crate::state::{Message, NewMessageRequest};

pub const MESSAGES_PATH: &str = "messages";
pub const NEW_MESSAGE_PATH: &str = "new-message";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid API url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("Server answered with status {0}")]
    Status(u16),
}

/// The remote message service as seen by the channel view.
#[async_trait(?Send)]
pub trait MessageApi {
    /// `GET /messages`, oldest first.
    async fn fetch_messages(&self) -> Result<Vec<Message>, ApiError>;

    /// `POST /new-message`, answering with the stored message.
    async fn post_message(&self, message: &NewMessageRequest) -> Result<Message, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        // `Url::join` replaces the last segment unless the path ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

#[async_trait(?Send)]
impl MessageApi for HttpApi {
    async fn fetch_messages(&self) -> Result<Vec<Message>, ApiError> {
        let url = self.endpoint(MESSAGES_PATH)?;
        log::debug!("GET {url}");
        let response = check_status(self.client.get(url).send().await?)?;
        Ok(response.json().await?)
    }

    async fn post_message(&self, message: &NewMessageRequest) -> Result<Message, ApiError> {
        let url = self.endpoint(NEW_MESSAGE_PATH)?;
        log::debug!("POST {url}");
        let response = check_status(self.client.post(url).json(message).send().await?)?;
        Ok(response.json().await?)
    }
}
