use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

/// Treats an explicit JSON `null` like a missing field. Local-file tracks
/// come back with `"id": null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Number of access-token characters shown in the page preview.
pub const TOKEN_PREVIEW_LEN: usize = 24;

/// The backend's token-exchange response, kept verbatim.
///
/// Only `access_token` is interpreted; every other provider field
/// (`token_type`, `expires_in`, `refresh_token`, ...) is carried through
/// untouched so the persisted value matches what the backend returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthSession(Value);

impl AuthSession {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parses a persisted session. JSON `null` is treated as no session.
    pub fn from_stored(raw: &str) -> Result<Option<Self>, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(Self(value)))
    }

    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// The access token, when present as a non-empty string.
    pub fn access_token(&self) -> Option<&str> {
        self.0
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
    }

    /// First characters of the access token followed by an ellipsis.
    pub fn token_preview(&self) -> Option<String> {
        self.access_token().map(|token| {
            let head: String = token.chars().take(TOKEN_PREVIEW_LEN).collect();
            format!("{head}...")
        })
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub artists: Option<Vec<ArtistRef>>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

impl Track {
    /// Artist names joined by `", "` and the album name, separated by
    /// `" • "`. Missing parts are left out.
    pub fn meta_line(&self) -> String {
        let artists = self
            .artists
            .as_ref()
            .filter(|artists| !artists.is_empty())
            .map(|artists| {
                artists
                    .iter()
                    .map(|artist| artist.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            });
        let album = self.album.as_ref().map(|album| album.name.clone());

        [artists, album]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopTracks {
    #[serde(default)]
    pub items: Option<Vec<Track>>,
}

impl TopTracks {
    pub fn into_items(self) -> Vec<Track> {
        self.items.unwrap_or_default()
    }
}

/// Accepted values of the provider's `time_range` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TimeRange {
    #[value(name = "short_term")]
    ShortTerm,
    #[default]
    #[value(name = "medium_term")]
    MediumTerm,
    #[value(name = "long_term")]
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

/// Query used for every top-tracks request of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackQuery {
    pub limit: u32,
    pub time_range: TimeRange,
}

impl Default for TrackQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            time_range: TimeRange::MediumTerm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Artists • Album")]
    pub meta: String,
}
