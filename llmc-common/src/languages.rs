//! ISO 639 language tables
//!
//! Maps two-letter codes to the English display names used in the
//! leaderboard. Names follow the ISO 639-3 reference names. Name lookup
//! also knows a set of ISO 639-3 languages without a two-letter code; it
//! does not cover the full ISO 639-3 inventory.

/// (alpha-2 code, display name)
static ISO_639_1: &[(&str, &str)] = &[
    ("aa", "Afar"),
    ("ab", "Abkhazian"),
    ("af", "Afrikaans"),
    ("ak", "Akan"),
    ("am", "Amharic"),
    ("an", "Aragonese"),
    ("ar", "Arabic"),
    ("as", "Assamese"),
    ("av", "Avaric"),
    ("ay", "Aymara"),
    ("az", "Azerbaijani"),
    ("ba", "Bashkir"),
    ("be", "Belarusian"),
    ("bg", "Bulgarian"),
    ("bi", "Bislama"),
    ("bm", "Bambara"),
    ("bn", "Bengali"),
    ("bo", "Tibetan"),
    ("br", "Breton"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("ce", "Chechen"),
    ("ch", "Chamorro"),
    ("co", "Corsican"),
    ("cs", "Czech"),
    ("cv", "Chuvash"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("dv", "Dhivehi"),
    ("dz", "Dzongkha"),
    ("ee", "Ewe"),
    ("el", "Modern Greek (1453-)"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Persian"),
    ("ff", "Fulah"),
    ("fi", "Finnish"),
    ("fj", "Fijian"),
    ("fo", "Faroese"),
    ("fr", "French"),
    ("fy", "Western Frisian"),
    ("ga", "Irish"),
    ("gd", "Scottish Gaelic"),
    ("gl", "Galician"),
    ("gn", "Guarani"),
    ("gu", "Gujarati"),
    ("gv", "Manx"),
    ("ha", "Hausa"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("ht", "Haitian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("id", "Indonesian"),
    ("ig", "Igbo"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("iu", "Inuktitut"),
    ("ja", "Japanese"),
    ("jv", "Javanese"),
    ("ka", "Georgian"),
    ("kk", "Kazakh"),
    ("kl", "Kalaallisut"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("ks", "Kashmiri"),
    ("ku", "Kurdish"),
    ("kw", "Cornish"),
    ("ky", "Kirghiz"),
    ("la", "Latin"),
    ("lb", "Luxembourgish"),
    ("lg", "Ganda"),
    ("ln", "Lingala"),
    ("lo", "Lao"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mg", "Malagasy"),
    ("mi", "Maori"),
    ("mk", "Macedonian"),
    ("ml", "Malayalam"),
    ("mn", "Mongolian"),
    ("mr", "Marathi"),
    ("ms", "Malay (macrolanguage)"),
    ("mt", "Maltese"),
    ("my", "Burmese"),
    ("nb", "Norwegian Bokmål"),
    ("ne", "Nepali (macrolanguage)"),
    ("nl", "Dutch"),
    ("nn", "Norwegian Nynorsk"),
    ("no", "Norwegian"),
    ("ny", "Nyanja"),
    ("oc", "Occitan (post 1500)"),
    ("om", "Oromo"),
    ("or", "Oriya (macrolanguage)"),
    ("pa", "Panjabi"),
    ("pl", "Polish"),
    ("ps", "Pushto"),
    ("pt", "Portuguese"),
    ("qu", "Quechua"),
    ("rm", "Romansh"),
    ("rn", "Rundi"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("rw", "Kinyarwanda"),
    ("sa", "Sanskrit"),
    ("sc", "Sardinian"),
    ("sd", "Sindhi"),
    ("se", "Northern Sami"),
    ("sg", "Sango"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sm", "Samoan"),
    ("sn", "Shona"),
    ("so", "Somali"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("ss", "Swati"),
    ("st", "Southern Sotho"),
    ("su", "Sundanese"),
    ("sv", "Swedish"),
    ("sw", "Swahili (macrolanguage)"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("tg", "Tajik"),
    ("th", "Thai"),
    ("ti", "Tigrinya"),
    ("tk", "Turkmen"),
    ("tl", "Tagalog"),
    ("tn", "Tswana"),
    ("to", "Tonga (Tonga Islands)"),
    ("tr", "Turkish"),
    ("ts", "Tsonga"),
    ("tt", "Tatar"),
    ("ug", "Uighur"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("uz", "Uzbek"),
    ("ve", "Venda"),
    ("vi", "Vietnamese"),
    ("wa", "Walloon"),
    ("wo", "Wolof"),
    ("xh", "Xhosa"),
    ("yi", "Yiddish"),
    ("yo", "Yoruba"),
    ("za", "Zhuang"),
    ("zh", "Chinese"),
    ("zu", "Zulu"),
];

/// ISO 639-3 reference names of languages with no alpha-2 code
static ISO_639_3_NAMES: &[&str] = &[
    "Achinese",
    "Asturian",
    "Awadhi",
    "Balinese",
    "Bhojpuri",
    "Buginese",
    "Cebuano",
    "Filipino",
    "Friulian",
    "Hakka Chinese",
    "Hawaiian",
    "Hiligaynon",
    "Hmong",
    "Iloko",
    "Kabyle",
    "Ligurian",
    "Lombard",
    "Low German",
    "Madurese",
    "Magahi",
    "Maithili",
    "Mandarin Chinese",
    "Manipuri",
    "Min Nan Chinese",
    "Minangkabau",
    "Pampanga",
    "Santali",
    "Scots",
    "Sicilian",
    "Silesian",
    "Swiss German",
    "Tetum",
    "Tok Pisin",
    "Tumbuka",
    "Upper Sorbian",
    "Venetian",
    "Yue Chinese",
];

/// Display name for a two-letter code (`code` must already be lowercase)
pub fn name_for_code(code: &str) -> Option<&'static str> {
    ISO_639_1
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Canonical display name for an English language name, case-insensitive
pub fn name_for_name(name: &str) -> Option<&'static str> {
    ISO_639_1
        .iter()
        .map(|(_, n)| *n)
        .chain(ISO_639_3_NAMES.iter().copied())
        .find(|n| n.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_resolve() {
        assert_eq!(name_for_code("en"), Some("English"));
        assert_eq!(name_for_code("de"), Some("German"));
        assert_eq!(name_for_code("xx"), None);
    }

    #[test]
    fn test_names_resolve_case_insensitively() {
        assert_eq!(name_for_name("french"), Some("French"));
        assert_eq!(name_for_name("Klingon"), None);
    }

    #[test]
    fn test_names_without_alpha2_code_resolve() {
        assert_eq!(name_for_name("filipino"), Some("Filipino"));
        assert_eq!(name_for_name("YUE CHINESE"), Some("Yue Chinese"));
        assert_eq!(name_for_code("fil"), None);
    }

    #[test]
    fn test_table_codes_are_unique_and_sorted() {
        for pair in ISO_639_1.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} !< {}", pair[0].0, pair[1].0);
        }
    }
}
