use std::io::{BufRead, BufReader};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info};

use crate::parser::{JsonStreamParser, StreamError};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("error reading response body: {0}")]
    Read(#[from] std::io::Error),
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Feeds an HTTP response body, line by line, into a [`JsonStreamParser`].
///
/// The transfer is blocking and runs to completion or failure; there is no
/// cancellation primitive. `keep_alive_secs` is a transport-level hint, not
/// an operation deadline: no overall request timeout is enforced.
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: &str, keep_alive_secs: u64) -> Result<Self, SourceError> {
        let url = Url::parse(url).map_err(|e| SourceError::Config(e.to_string()))?;
        let client = Client::builder()
            .tcp_keepalive(Duration::from_secs(keep_alive_secs))
            .timeout(None)
            .build()?;
        Ok(Self { client, url })
    }

    /// Performs the GET and streams each body line through
    /// [`JsonStreamParser::stream`], ending with one flush. Returns every
    /// value extracted over the transfer, in order. Status handling is left
    /// to the caller: the body is consumed whatever the response code.
    pub fn stream_into(&self, parser: &mut JsonStreamParser) -> Result<Vec<Value>, SourceError> {
        info!(url = %self.url, "streaming JSON from url");
        let response = self.client.get(self.url.clone()).send()?;

        let mut entities = Vec::new();
        let mut reader = BufReader::new(response);
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']);
            debug!(line, "streaming line");
            entities.extend(parser.stream(line)?);
        }
        entities.extend(parser.flush()?);
        Ok(entities)
    }
}

impl JsonStreamParser {
    /// Convenience entry point: GETs `url` and feeds the response body
    /// through this parser, blocking the calling thread for the duration of
    /// the transfer.
    pub fn stream_from_url(
        &mut self,
        url: &str,
        timeout_secs: u64,
    ) -> Result<Vec<Value>, SourceError> {
        HttpSource::new(url, timeout_secs)?.stream_into(self)
    }
}
