use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_VIDEO_ID: &str = "hf3r9TNSsyY";
pub const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Query parameters understood by the embed. Field names are the wire names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerVars {
    pub autoplay: u8,
    pub mute: u8,
    pub controls: u8,
    #[serde(rename = "loop")]
    pub looped: u8,
    /// Native looping only works for a single video when it is also its own
    /// playlist.
    pub playlist: String,
    /// Start offset in seconds.
    pub start: u32,
    pub enablejsapi: u8,
    pub modestbranding: u8,
    pub iv_load_policy: u8,
    pub rel: u8,
    pub showinfo: u8,
    pub fs: u8,
    pub disablekb: u8,
    pub playsinline: u8,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub origin: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub host: String,
}

impl PlayerVars {
    /// Muted, chromeless, autoplaying, looping playback of `video_id`.
    pub fn looping(video_id: &str) -> Self {
        Self {
            autoplay: 1,
            mute: 1,
            controls: 0,
            looped: 1,
            playlist: video_id.to_string(),
            start: 667,
            enablejsapi: 1,
            modestbranding: 1,
            iv_load_policy: 3,
            rel: 0,
            showinfo: 0,
            fs: 0,
            disablekb: 1,
            playsinline: 1,
            origin: String::new(),
            host: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOptions {
    pub width: String,
    pub height: String,
    #[serde(rename = "playerVars")]
    pub player_vars: PlayerVars,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self::for_video(DEFAULT_VIDEO_ID)
    }
}

impl PlayerOptions {
    pub fn for_video(video_id: &str) -> Self {
        Self {
            width: "100%".into(),
            height: "100%".into(),
            player_vars: PlayerVars::looping(video_id),
        }
    }

    /// Sets `origin` and derives `host` (scheme + hostname, no port) from it.
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.player_vars.origin = origin.to_string();
        self.player_vars.host = Url::parse(origin)
            .ok()
            .and_then(|u| u.host_str().map(|h| format!("{}://{}", u.scheme(), h)))
            .unwrap_or_default();
        self
    }

    /// Iframe URL carrying the player vars as query parameters.
    pub fn embed_url(&self, video_id: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(EMBED_BASE)?.join(video_id)?;
        let vars = serde_json::to_value(&self.player_vars).unwrap_or_default();
        if let serde_json::Value::Object(map) = vars {
            let mut q = url.query_pairs_mut();
            for (k, v) in map {
                match v {
                    serde_json::Value::String(s) => q.append_pair(&k, &s),
                    other => q.append_pair(&k, &other.to_string()),
                };
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_loop_the_default_video() {
        let o = PlayerOptions::default();
        assert_eq!(o.player_vars.playlist, DEFAULT_VIDEO_ID);
        assert_eq!(o.player_vars.autoplay, 1);
        assert_eq!(o.player_vars.mute, 1);
        assert_eq!(o.player_vars.looped, 1);
        assert_eq!(o.player_vars.start, 667);
    }

    #[test]
    fn origin_derives_host() {
        let o = PlayerOptions::default().with_origin("http://localhost:3000");
        assert_eq!(o.player_vars.origin, "http://localhost:3000");
        assert_eq!(o.player_vars.host, "http://localhost");
    }

    #[test]
    fn embed_url_carries_vars() {
        let o = PlayerOptions::default().with_origin("https://example.com");
        let url = o.embed_url(DEFAULT_VIDEO_ID).unwrap();
        assert_eq!(url.path(), "/embed/hf3r9TNSsyY");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("loop".into(), "1".into())));
        assert!(pairs.contains(&("mute".into(), "1".into())));
        assert!(pairs.contains(&("playlist".into(), DEFAULT_VIDEO_ID.into())));
        assert!(pairs.contains(&("origin".into(), "https://example.com".into())));
    }

    #[test]
    fn empty_origin_is_not_sent() {
        let json = serde_json::to_value(PlayerOptions::default()).unwrap();
        assert!(json["playerVars"].get("origin").is_none());
        assert_eq!(json["playerVars"]["loop"], 1);
    }
}
