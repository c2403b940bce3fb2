//! Chat-completion client implementation

mod chat_completion;
mod http_client;

pub use chat_completion::{chat_completions_url, ChatCompletionClient, DEFAULT_REQUEST_TIMEOUT};
pub use http_client::{HttpClient, HttpClientTrait, HttpResponse, TransportError};
