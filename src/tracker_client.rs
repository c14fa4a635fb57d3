use crate::constant::{HASH_SIZE, PEER_ID_SIZE};
use crate::{Error, Metainfo, TrackerResp};
use url::{form_urlencoded, Url};

/// HTTP tracker client, announces download state and receives list of peers.
#[derive(Clone, Debug)]
pub struct TrackerClient {
    announce: String,
    info_hash: [u8; HASH_SIZE],
    total_length: u64,
    peer_id: [u8; PEER_ID_SIZE],
    port: u16,
    client: reqwest::Client,
}

impl TrackerClient {
    pub fn new(metainfo: &Metainfo, peer_id: [u8; PEER_ID_SIZE], port: u16) -> TrackerClient {
        TrackerClient {
            announce: metainfo.tracker_url().clone(),
            info_hash: *metainfo.info_hash(),
            total_length: metainfo.total_length(),
            peer_id,
            port,
            client: reqwest::Client::new(),
        }
    }

    /// Build announce URL. Binary fields (`info_hash`, `peer_id`) are percent-encoded byte by byte,
    /// `event=started` is sent only with the first request.
    pub fn announce_url(&self, first: bool, uploaded: u64, downloaded: u64) -> Result<String, Error> {
        let mut url = Url::parse(&self.announce)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::TrackerUrl(self.announce.clone()));
        }

        let mut params = form_urlencoded::Serializer::new(String::new());
        params
            .append_pair("port", &self.port.to_string())
            .append_pair("uploaded", &uploaded.to_string())
            .append_pair("downloaded", &downloaded.to_string())
            .append_pair(
                "left",
                &self.total_length.saturating_sub(downloaded).to_string(),
            )
            .append_pair("compact", "1");
        if first {
            params.append_pair("event", "started");
        }

        let announce_params = format!(
            "info_hash={}&peer_id={}&{}",
            form_urlencoded::byte_serialize(&self.info_hash).collect::<String>(),
            form_urlencoded::byte_serialize(&self.peer_id).collect::<String>(),
            params.finish()
        );

        let query = match url.query() {
            Some(q) if !q.is_empty() => format!("{}&{}", q, announce_params),
            _ => announce_params,
        };
        url.set_query(Some(&query));

        Ok(url.into())
    }

    /// Send announce request and parse tracker response. Decode errors are not retried, caller
    /// may repeat the whole request.
    pub async fn connect(
        &self,
        first: bool,
        uploaded: u64,
        downloaded: u64,
    ) -> Result<TrackerResp, Error> {
        let url = self.announce_url(first, uploaded, downloaded)?;
        tracing::info!(%url, "connecting to tracker");

        let resp = self.client.get(&url).send().await?;
        if resp.status() != reqwest::StatusCode::OK {
            tracing::warn!(status = %resp.status(), "unable to connect to tracker");
            return Err(Error::TrackerStatus(resp.status().as_u16()));
        }

        let body = resp.bytes().await?;
        tracing::debug!(len = body.len(), "tracker response received");

        TrackerResp::from_bencode(body.as_ref())
    }
}
