// src/models/entity.rs
// DOCUMENTATION: Itinerary entities that can receive photos
// PURPOSE: Hotels and activities produced by the itinerary generator,
// plus the single normalized image representation they share

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One additional photo of an entity
/// DOCUMENTATION: Historical itineraries stored either bare URL strings or
/// `{url, location}` objects. Both are accepted on read; only the object
/// form is ever written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ImageEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            location: None,
        }
    }

    /// A usable entry has a non-blank URL
    pub fn is_valid(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

impl<'de> Deserialize<'de> for ImageEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawImage {
            Bare(String),
            Object {
                #[serde(default)]
                url: Option<String>,
                #[serde(default)]
                location: Option<String>,
            },
            Missing(()),
        }

        Ok(match RawImage::deserialize(deserializer)? {
            RawImage::Bare(url) => ImageEntry::new(url),
            RawImage::Object { url, location } => ImageEntry {
                url: url.unwrap_or_default(),
                location,
            },
            RawImage::Missing(()) => ImageEntry::new(String::new()),
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ImageEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ImageEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Entity kind
/// DOCUMENTATION: Selects the search query variants used to find the place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Hotel,
    Activity,
}

impl EntityKind {
    /// Disambiguating suffixes appended to "{name} {city}", in priority order
    pub fn query_suffixes(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Hotel => &["hotel"],
            EntityKind::Activity => &["tourist attraction", "landmark", ""],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Hotel => "hotel",
            EntityKind::Activity => "activity",
        }
    }
}

/// Anything the enrichment pipeline can add photos to
pub trait PhotoEnrichable: Clone + Send + Sync {
    fn kind(&self) -> EntityKind;

    /// Name used to search for the place
    fn display_name(&self) -> &str;

    fn primary_image(&self) -> Option<&str>;

    fn set_primary_image(&mut self, url: String);

    fn additional_images(&self) -> &[ImageEntry];

    fn additional_images_mut(&mut self) -> &mut Vec<ImageEntry>;

    /// Provenance flag: this entity went through the pipeline
    fn mark_enriched(&mut self);

    fn is_enriched(&self) -> bool;

    /// URLs of the valid additional images, in stored order
    fn existing_urls(&self) -> Vec<&str> {
        self.additional_images()
            .iter()
            .filter(|img| img.is_valid())
            .map(|img| img.url.as_str())
            .collect()
    }

    fn has_primary_image(&self) -> bool {
        self.primary_image()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Hotel recommendation from a generated itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(default)]
    pub hotel_name: String,

    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub hotel_image_url: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub additional_images: Vec<ImageEntry>,

    #[serde(rename = "isAIRecommended", default)]
    pub is_ai_recommended: bool,

    /// Address, price, rating, description and whatever else the itinerary carries
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Hotel {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            hotel_name: name.into(),
            hotel_image_url: None,
            additional_images: Vec::new(),
            is_ai_recommended: false,
            extra: Map::new(),
        }
    }
}

impl PhotoEnrichable for Hotel {
    fn kind(&self) -> EntityKind {
        EntityKind::Hotel
    }

    fn display_name(&self) -> &str {
        &self.hotel_name
    }

    fn primary_image(&self) -> Option<&str> {
        self.hotel_image_url.as_deref()
    }

    fn set_primary_image(&mut self, url: String) {
        self.hotel_image_url = Some(url);
    }

    fn additional_images(&self) -> &[ImageEntry] {
        &self.additional_images
    }

    fn additional_images_mut(&mut self) -> &mut Vec<ImageEntry> {
        &mut self.additional_images
    }

    fn mark_enriched(&mut self) {
        self.is_ai_recommended = true;
    }

    fn is_enriched(&self) -> bool {
        self.is_ai_recommended
    }
}

/// Activity (sight, tour, venue) from a generated itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub activity_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub additional_images: Vec<ImageEntry>,

    #[serde(rename = "isAIRecommended", default)]
    pub is_ai_recommended: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Activity {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            activity_name: name.into(),
            image_url: None,
            additional_images: Vec::new(),
            is_ai_recommended: false,
            extra: Map::new(),
        }
    }
}

impl PhotoEnrichable for Activity {
    fn kind(&self) -> EntityKind {
        EntityKind::Activity
    }

    fn display_name(&self) -> &str {
        &self.activity_name
    }

    fn primary_image(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn set_primary_image(&mut self, url: String) {
        self.image_url = Some(url);
    }

    fn additional_images(&self) -> &[ImageEntry] {
        &self.additional_images
    }

    fn additional_images_mut(&mut self) -> &mut Vec<ImageEntry> {
        &mut self.additional_images
    }

    fn mark_enriched(&mut self) {
        self.is_ai_recommended = true;
    }

    fn is_enriched(&self) -> bool {
        self.is_ai_recommended
    }
}
