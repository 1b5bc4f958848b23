//! OpenGraph data model
//!
//! Basic and optional metadata as listed at <https://ogp.me/>.

use serde::{Deserialize, Serialize};

use crate::Bind;

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Basic and optional metadata of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Bind)]
#[serde(default)]
pub struct Ogp {
    #[ogp("og:title")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[ogp("og:type")]
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[ogp("og:url")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[ogp("og:image")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,

    #[ogp("og:audio")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub audios: Vec<Audio>,

    #[ogp("og:description")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[ogp("og:determiner")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub determiner: String,

    #[ogp("og:locale")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub locale: String,

    #[ogp("og:locale:alternate")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locale_alternate: Vec<String>,

    #[ogp("og:site_name")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub site_name: String,

    #[ogp("og:video")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<Video>,
}

/// Structured `og:image` property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Bind)]
#[serde(default)]
pub struct Image {
    #[ogp("og:image,og:image:url")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[ogp("og:image:secure_url")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secure_url: String,

    #[ogp("og:image:type")]
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[ogp("og:image:width")]
    #[serde(skip_serializing_if = "is_zero")]
    pub width: i64,

    #[ogp("og:image:height")]
    #[serde(skip_serializing_if = "is_zero")]
    pub height: i64,

    #[ogp("og:image:alt")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alt: String,
}

/// Structured `og:audio` property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Bind)]
#[serde(default)]
pub struct Audio {
    #[ogp("og:audio,og:audio:url")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[ogp("og:audio:secure_url")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secure_url: String,

    #[ogp("og:audio:type")]
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

/// Structured `og:video` property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Bind)]
#[serde(default)]
pub struct Video {
    #[ogp("og:video,og:video:url")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[ogp("og:video:secure_url")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secure_url: String,

    #[ogp("og:video:type")]
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[ogp("og:video:width")]
    #[serde(skip_serializing_if = "is_zero")]
    pub width: i64,

    #[ogp("og:video:height")]
    #[serde(skip_serializing_if = "is_zero")]
    pub height: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind;

    #[test]
    fn test_bind_ogp() {
        let mut ogp = Ogp::default();
        let mut binder = bind(&mut ogp, None);
        for (key, value) in [
            ("og:title", "The Rock"),
            ("og:type", "video.movie"),
            ("og:image", "http://example.com/rock.jpg"),
            ("og:image:width", "400"),
            ("og:image", "http://example.com/rock2.jpg"),
            ("og:locale:alternate", "fr_FR"),
            ("og:locale:alternate", "es_ES"),
            ("og:locale", "en_GB"),
        ] {
            binder.set(key, value).unwrap();
        }

        assert_eq!(ogp.title, "The Rock");
        assert_eq!(ogp.kind, "video.movie");
        assert_eq!(ogp.images.len(), 2);
        assert_eq!(ogp.images[0].width, 400);
        assert_eq!(ogp.images[1].width, 0);
        assert_eq!(ogp.locale, "en_GB");
        assert_eq!(ogp.locale_alternate, ["fr_FR", "es_ES"]);
    }

    #[test]
    fn test_json_omits_empty_values() {
        let ogp = Ogp {
            title: "title".to_string(),
            images: vec![Image {
                url: "http://example.com/image.png".to_string(),
                width: 400,
                ..Default::default()
            }],
            ..Default::default()
        };

        let json = serde_json::to_string(&ogp).unwrap();
        assert_eq!(
            json,
            r#"{"title":"title","images":[{"url":"http://example.com/image.png","width":400}]}"#
        );

        let back: Ogp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ogp);
    }
}
