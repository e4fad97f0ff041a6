use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Reddit API error: {0}")]
    Reddit(String),

    #[error("NewsAPI error: {0}")]
    NewsApi(String),

    #[error("YouTube API error: {0}")]
    YouTube(String),

    #[error("source timed out after {0}s")]
    Timeout(u64),
}
