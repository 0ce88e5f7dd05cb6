//! Server endpoint addressing.

use reqwest::Url;

use crate::{ConnectRequest, transport::TransportError};

/// Base address of a dropfour server.
///
/// Holds the HTTP base (e.g. `http://localhost:9090`). The WebSocket address
/// and the leaderboard address are both derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Parse an `http://` or `https://` base address.
    pub fn parse(base: &str) -> Result<Self, TransportError> {
        let url = Url::parse(base.trim())
            .map_err(|e| TransportError::InvalidUrl(format!("{base}: {e}")))?;

        match url.scheme() {
            "http" | "https" if !url.cannot_be_a_base() => Ok(Self { base: url }),
            scheme => Err(TransportError::InvalidUrl(format!(
                "{base}: unsupported scheme {scheme}, expected http or https"
            ))),
        }
    }

    /// HTTP base address.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// WebSocket address for `request`.
    ///
    /// `http` maps to `ws` and `https` to `wss`. The path gains a `ws`
    /// segment and the query carries `username` plus `gameId` for a rejoin.
    pub fn socket_url(&self, request: &ConnectRequest) -> Result<Url, TransportError> {
        let mut url = self.base.clone();
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme).map_err(|()| {
            TransportError::InvalidUrl(format!("cannot switch {} to {scheme}", self.base))
        })?;

        self.push_segment(&mut url, "ws")?;

        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair("username", &request.username);
            if let Some(game_id) = &request.game_id {
                query.append_pair("gameId", game_id.as_str());
            }
        }

        Ok(url)
    }

    /// Leaderboard address.
    pub fn leaderboard_url(&self) -> Result<Url, TransportError> {
        let mut url = self.base.clone();
        url.set_query(None);
        self.push_segment(&mut url, "leaderboard")?;
        Ok(url)
    }

    fn push_segment(&self, url: &mut Url, segment: &str) -> Result<(), TransportError> {
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(format!("{} cannot be a base", self.base)))?
            .pop_if_empty()
            .push(segment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dropfour_proto::GameId;

    use super::*;

    fn request(game_id: Option<&str>) -> ConnectRequest {
        ConnectRequest { username: "alice".into(), game_id: game_id.map(GameId::new) }
    }

    #[test]
    fn http_maps_to_ws() {
        let endpoint = Endpoint::parse("http://localhost:9090").unwrap();
        let url = endpoint.socket_url(&request(None)).unwrap();
        assert_eq!(url.as_str(), "ws://localhost:9090/ws?username=alice");
    }

    #[test]
    fn https_maps_to_wss_with_rejoin() {
        let endpoint = Endpoint::parse("https://play.example.com/").unwrap();
        let url = endpoint.socket_url(&request(Some("g1"))).unwrap();
        assert_eq!(url.as_str(), "wss://play.example.com/ws?username=alice&gameId=g1");
    }

    #[test]
    fn username_is_escaped() {
        let endpoint = Endpoint::parse("http://localhost:9090").unwrap();
        let req = ConnectRequest { username: "a b&c".into(), game_id: None };
        let url = endpoint.socket_url(&req).unwrap();
        assert_eq!(url.query(), Some("username=a+b%26c"));
    }

    #[test]
    fn base_path_is_kept() {
        let endpoint = Endpoint::parse("http://host/api/").unwrap();
        assert_eq!(endpoint.socket_url(&request(None)).unwrap().path(), "/api/ws");
        assert_eq!(endpoint.leaderboard_url().unwrap().as_str(), "http://host/api/leaderboard");
    }

    #[test]
    fn leaderboard_url() {
        let endpoint = Endpoint::parse("http://localhost:9090").unwrap();
        let url = endpoint.leaderboard_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:9090/leaderboard");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(matches!(Endpoint::parse("ftp://host"), Err(TransportError::InvalidUrl(_))));
        assert!(matches!(Endpoint::parse("not a url"), Err(TransportError::InvalidUrl(_))));
    }
}
