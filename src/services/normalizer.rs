// src/services/normalizer.rs
// DOCUMENTATION: Diacritic folding for search queries
// PURPOSE: Widen text-search recall for Turkish place names

/// Replace Turkish diacritics with their closest ASCII letters
/// DOCUMENTATION: ğ ü ş ı ö ç (and uppercase forms, including dotted İ)
/// are folded; every other character passes through unchanged.
/// Only used to build search queries, never for display strings.
pub fn normalize(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'ğ' => 'g',
        'Ğ' => 'G',
        'ü' => 'u',
        'Ü' => 'U',
        'ş' => 's',
        'Ş' => 'S',
        'ı' => 'i',
        'İ' => 'I',
        'ö' => 'o',
        'Ö' => 'O',
        'ç' => 'c',
        'Ç' => 'C',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_turkish_letters() {
        assert_eq!(normalize("Topkapı Müzesi"), "Topkapi Muzesi");
        assert_eq!(normalize("İstanbul"), "Istanbul");
        assert_eq!(normalize("ÇAĞLAYAN ŞÖLEN"), "CAGLAYAN SOLEN");
        assert_eq!(normalize("Göreme, Ürgüp"), "Goreme, Urgup");
    }

    #[test]
    fn test_other_characters_untouched() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("Café de Flore 42"), "Café de Flore 42");
    }
}
