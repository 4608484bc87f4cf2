use url::Url;

const ALLOWED_HOSTS: &[&str] = &["soundcloud.com", "on.soundcloud.com"];

#[derive(Debug, thiserror::Error, PartialEq)]
pub(crate) enum TrackUrlError {
    #[error("Missing track URL")]
    Missing,
    #[error("Unable to parse the track URL")]
    Malformed,
    #[error("Only soundcloud.com links are supported")]
    DisallowedHost,
}

/// A validated and normalized track page URL. Normalization collapses the
/// `www.` and mobile `m.` subdomains onto the bare host, keeps the path and
/// drops query and fragment. Parsing never touches the network.
#[derive(Eq, PartialEq, Clone, Debug)]
pub(crate) struct TrackUrl(String);

impl TrackUrl {
    pub(crate) fn parse(raw: &str) -> Result<Self, TrackUrlError> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Err(TrackUrlError::Missing);
        }

        let url = Url::parse(raw).map_err(|_| TrackUrlError::Malformed)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TrackUrlError::Malformed);
        }

        let host = url
            .host_str()
            .ok_or(TrackUrlError::Malformed)?
            .to_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);
        let host = host.strip_prefix("m.").unwrap_or(host);

        if !ALLOWED_HOSTS.contains(&host) {
            return Err(TrackUrlError::DisallowedHost);
        }

        Ok(Self(format!("{}://{}{}", url.scheme(), host, url.path())))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved track metadata, owned by a single request.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TrackMetadata {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) uploader: Option<String>,
    pub(crate) artist: Option<String>,
    pub(crate) album: Option<String>,
    pub(crate) duration_seconds: Option<u64>,
    pub(crate) thumbnail: Option<String>,
    pub(crate) webpage_url: String,
}

#[cfg(test)]
mod track_url_tests {
    use super::{TrackUrl, TrackUrlError};

    #[test]
    fn should_accept_plain_track_url() {
        let url = TrackUrl::parse("https://soundcloud.com/artist/track").unwrap();

        assert_eq!(url.as_str(), "https://soundcloud.com/artist/track");
    }

    #[test]
    fn should_collapse_mobile_subdomain_and_strip_query_and_fragment() {
        let url = TrackUrl::parse("https://m.soundcloud.com/a/b?x=1#y").unwrap();

        assert_eq!(url.as_str(), "https://soundcloud.com/a/b");
    }

    #[test]
    fn should_collapse_www_subdomain() {
        let url = TrackUrl::parse("https://www.soundcloud.com/a/b").unwrap();

        assert_eq!(url.as_str(), "https://soundcloud.com/a/b");
    }

    #[test]
    fn should_accept_share_link_subdomain() {
        let url = TrackUrl::parse("https://on.soundcloud.com/AbCdEf").unwrap();

        assert_eq!(url.as_str(), "https://on.soundcloud.com/AbCdEf");
    }

    #[test]
    fn should_reject_empty_url() {
        assert_eq!(TrackUrl::parse("   "), Err(TrackUrlError::Missing));
    }

    #[test]
    fn should_reject_unparsable_url() {
        assert_eq!(
            TrackUrl::parse("not a url at all"),
            Err(TrackUrlError::Malformed)
        );
    }

    #[test]
    fn should_reject_non_http_scheme() {
        assert_eq!(
            TrackUrl::parse("ftp://soundcloud.com/a/b"),
            Err(TrackUrlError::Malformed)
        );
    }

    #[test]
    fn should_reject_disallowed_host() {
        assert_eq!(
            TrackUrl::parse("https://example.com/artist/track"),
            Err(TrackUrlError::DisallowedHost)
        );
    }

    #[test]
    fn should_reject_lookalike_host() {
        assert_eq!(
            TrackUrl::parse("https://soundcloud.com.evil.example/a"),
            Err(TrackUrlError::DisallowedHost)
        );
    }
}
