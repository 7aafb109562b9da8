// src/services/fallback_catalog.rs
// DOCUMENTATION: Stock photos used when live lookup yields nothing
// PURPOSE: Guarantee every entity renders with some photography

use crate::models::EntityKind;
use crate::services::normalizer::normalize;

/// A curated photo set selected by name keywords
struct PhotoGroup {
    name: &'static str,
    /// Matched against whole words of the folded name
    keywords: &'static [&'static str],
    /// Turkish stems that also match with a suffix ("muze" matches "muzesi")
    stems: &'static [&'static str],
    /// Landmark groups are also tried against the city
    landmark: bool,
    photos: &'static [&'static str],
}

/// Groups in precedence order; the first match wins
const PHOTO_GROUPS: &[PhotoGroup] = &[
    PhotoGroup {
        name: "pamukkale",
        keywords: &["pamukkale", "hierapolis"],
        stems: &[],
        landmark: true,
        photos: &[
            "https://images.unsplash.com/photo-1590074072786-a66914d668f1?w=800&q=80",
            "https://images.unsplash.com/photo-1600240644455-3edc55c375fe?w=800&q=80",
            "https://images.unsplash.com/photo-1589561454226-796a8aa89b05?w=800&q=80",
        ],
    },
    PhotoGroup {
        name: "ephesus",
        keywords: &["ephesus", "efes", "selcuk"],
        stems: &[],
        landmark: true,
        photos: &[
            "https://images.unsplash.com/photo-1589030343991-69ea1433b941?w=800&q=80",
            "https://images.unsplash.com/photo-1605654145610-2f65428be306?w=800&q=80",
            "https://images.unsplash.com/photo-1623941003040-1b9d6f3c4d5e?w=800&q=80",
        ],
    },
    PhotoGroup {
        name: "cappadocia",
        keywords: &["cappadocia", "kapadokya", "goreme", "urgup", "uchisar"],
        stems: &[],
        landmark: true,
        photos: &[
            "https://images.unsplash.com/photo-1641128324972-af3212f0f6bd?w=800&q=80",
            "https://images.unsplash.com/photo-1570939274717-7eda259b50ed?w=800&q=80",
            "https://images.unsplash.com/photo-1527838832700-5059252407fa?w=800&q=80",
            "https://images.unsplash.com/photo-1601314167099-232775b3d6fd?w=800&q=80",
        ],
    },
    PhotoGroup {
        name: "museum",
        keywords: &["museum", "muze", "muzesi", "gallery", "galeri", "exhibition", "sergi"],
        stems: &["muze", "galeri"],
        landmark: false,
        photos: &[
            "https://images.unsplash.com/photo-1566127444979-b3d2b654e3d7?w=800&q=80",
            "https://images.unsplash.com/photo-1554907984-15263bfd63bd?w=800&q=80",
            "https://images.unsplash.com/photo-1518998053901-5348d3961a04?w=800&q=80",
            "https://images.unsplash.com/photo-1580136579312-94651dfd596d?w=800&q=80",
            "https://images.unsplash.com/photo-1572953109213-3be62398eb95?w=800&q=80",
        ],
    },
    PhotoGroup {
        name: "park",
        keywords: &["park", "parki", "garden", "bahce", "bahcesi", "koru"],
        stems: &["bahce"],
        landmark: false,
        photos: &[
            "https://images.unsplash.com/photo-1519331379826-f10be5486c6f?w=800&q=80",
            "https://images.unsplash.com/photo-1496347646636-ea47f7d6b37b?w=800&q=80",
            "https://images.unsplash.com/photo-1500964757637-c85e8a162699?w=800&q=80",
            "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&q=80",
        ],
    },
    PhotoGroup {
        name: "beach",
        keywords: &["beach", "plaj", "plaji", "koy", "koyu", "bay", "coast", "sahil", "sahili"],
        stems: &["plaj", "sahil"],
        landmark: false,
        photos: &[
            "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=800&q=80",
            "https://images.unsplash.com/photo-1519046904884-53103b34b206?w=800&q=80",
            "https://images.unsplash.com/photo-1473116763249-2faaef81ccda?w=800&q=80",
            "https://images.unsplash.com/photo-1510414842594-a61c69b5ae57?w=800&q=80",
        ],
    },
    PhotoGroup {
        name: "restaurant",
        keywords: &[
            "restaurant", "restoran", "cafe", "kafe", "lokanta", "meyhane", "bistro", "kitchen",
            "food", "dinner", "lunch", "breakfast", "kahvalti",
        ],
        stems: &["restoran", "lokanta"],
        landmark: false,
        photos: &[
            "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=800&q=80",
            "https://images.unsplash.com/photo-1414235077428-338989a2e8c0?w=800&q=80",
            "https://images.unsplash.com/photo-1552566626-52f8b828add9?w=800&q=80",
            "https://images.unsplash.com/photo-1559339352-11d035aa65de?w=800&q=80",
        ],
    },
    PhotoGroup {
        name: "shopping",
        keywords: &[
            "shopping", "bazaar", "carsi", "carsisi", "market", "pazar", "pazari", "mall", "avm",
            "boutique",
        ],
        stems: &["carsi", "pazar"],
        landmark: false,
        photos: &[
            "https://images.unsplash.com/photo-1555529669-e69e7aa0ba9a?w=800&q=80",
            "https://images.unsplash.com/photo-1481437156560-3205f6a55735?w=800&q=80",
            "https://images.unsplash.com/photo-1528698827591-e19ccd7bc23d?w=800&q=80",
        ],
    },
    PhotoGroup {
        name: "historical",
        keywords: &[
            "historic", "historical", "ancient", "ruins", "castle", "kale", "palace", "saray",
            "sarayi", "mosque", "cami", "church", "kilise", "tower", "kule", "kulesi", "fortress",
            "hisar", "hisari", "amphitheatre", "antik",
        ],
        stems: &["saray", "kule", "hisar", "kilise"],
        landmark: false,
        photos: &[
            "https://images.unsplash.com/photo-1541432901042-2d8bd64b4a9b?w=800&q=80",
            "https://images.unsplash.com/photo-1524231757912-21f4fe3a7200?w=800&q=80",
            "https://images.unsplash.com/photo-1527838832700-5059252407fa?w=800&q=80",
            "https://images.unsplash.com/photo-1558500587-1b3a7ac98aef?w=800&q=80",
            "https://images.unsplash.com/photo-1589561253898-768105ca91a8?w=800&q=80",
        ],
    },
    PhotoGroup {
        name: "nature",
        keywords: &[
            "nature", "mountain", "dag", "dagi", "lake", "gol", "golu", "waterfall", "selale",
            "selalesi", "forest", "orman", "valley", "vadi", "vadisi", "canyon", "kanyon",
            "kanyonu", "cave", "magara", "magarasi", "hiking",
        ],
        stems: &["selale", "magara", "kanyon", "vadi"],
        landmark: false,
        photos: &[
            "https://images.unsplash.com/photo-1501785888041-af3ef285b470?w=800&q=80",
            "https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05?w=800&q=80",
            "https://images.unsplash.com/photo-1447752875215-b2761acb3c5d?w=800&q=80",
            "https://images.unsplash.com/photo-1433086966358-54859d0ed716?w=800&q=80",
        ],
    },
    PhotoGroup {
        name: "tourist",
        keywords: &[
            "tour", "cruise", "boat", "square", "meydan", "meydani", "viewpoint", "bridge", "kopru",
            "koprusu", "street", "cadde", "caddesi", "attraction",
        ],
        stems: &["meydan", "kopru", "cadde"],
        landmark: false,
        photos: &[
            "https://images.unsplash.com/photo-1476514525535-07fb3b4ae5f1?w=800&q=80",
            "https://images.unsplash.com/photo-1469854523086-cc02fe5d8800?w=800&q=80",
            "https://images.unsplash.com/photo-1488646953014-85cb44e25828?w=800&q=80",
        ],
    },
];

const DEFAULT_PHOTOS: &[&str] = &[
    "https://images.unsplash.com/photo-1488085061387-422e29b40080?w=800&q=80",
    "https://images.unsplash.com/photo-1503220317375-aaad61436b1b?w=800&q=80",
    "https://images.unsplash.com/photo-1500835556837-99ac94a94552?w=800&q=80",
    "https://images.unsplash.com/photo-1530789253388-582c481c54b0?w=800&q=80",
    "https://images.unsplash.com/photo-1524850011238-e3d235c7d4c9?w=800&q=80",
];

/// Stock photos for a place
/// DOCUMENTATION: Always 3-5 URLs, never empty. The name is folded and
/// lower-cased, then matched group by group; landmark groups are retried
/// against the city when the name matched nothing. Generic groups describe
/// activities, so hotels should go through `fallback_photos_for`.
pub fn dummy_photos_for(name: Option<&str>, city: Option<&str>) -> Vec<String> {
    let name_words = words(name.unwrap_or_default());

    let group = PHOTO_GROUPS
        .iter()
        .find(|group| group.matches(&name_words))
        .or_else(|| {
            let city_words = words(city.unwrap_or_default());
            PHOTO_GROUPS
                .iter()
                .filter(|group| group.landmark)
                .find(|group| group.matches(&city_words))
        });

    let photos = match group {
        Some(group) => {
            log::debug!("Fallback photos: group '{}' for {:?}", group.name, name);
            group.photos
        }
        None => DEFAULT_PHOTOS,
    };

    photos.iter().map(|url| url.to_string()).collect()
}

/// Stock photos for an entity of the given kind
/// DOCUMENTATION: Hotels only pick up landmark groups (from the name, then
/// the city) and otherwise get the default set.
pub fn fallback_photos_for(
    kind: EntityKind,
    name: Option<&str>,
    city: Option<&str>,
) -> Vec<String> {
    match kind {
        EntityKind::Activity => dummy_photos_for(name, city),
        EntityKind::Hotel => {
            let name_words = words(name.unwrap_or_default());
            let city_words = words(city.unwrap_or_default());
            let photos = PHOTO_GROUPS
                .iter()
                .filter(|group| group.landmark)
                .find(|group| group.matches(&name_words) || group.matches(&city_words))
                .map(|group| group.photos)
                .unwrap_or(DEFAULT_PHOTOS);

            photos.iter().map(|url| url.to_string()).collect()
        }
    }
}

impl PhotoGroup {
    fn matches(&self, words: &[String]) -> bool {
        words.iter().any(|word| {
            self.keywords.iter().any(|keyword| word == keyword)
                || self.stems.iter().any(|stem| word.starts_with(stem))
        })
    }
}

fn words(text: &str) -> Vec<String> {
    normalize(text)
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
