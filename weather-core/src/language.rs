use std::{fmt, str::FromStr};

use crate::error::OwmError;

/// Response language supported by the provider.
///
/// Descriptions in the `weather` array and the location name are translated
/// into the selected language. Codes follow the provider's own table, which
/// keeps a few historical aliases (`SP`/`ES`, `SE`/`SV`, `UA`/`UK`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    Af,
    Al,
    Ar,
    Az,
    Bg,
    Ca,
    Cz,
    Da,
    De,
    El,
    #[default]
    En,
    Es,
    Eu,
    Fa,
    Fi,
    Fr,
    Gl,
    He,
    Hi,
    Hr,
    Hu,
    Id,
    It,
    Ja,
    Kr,
    La,
    Lt,
    Mk,
    No,
    Nl,
    Pl,
    Pt,
    PtBr,
    Ro,
    Ru,
    Se,
    Sk,
    Sl,
    Sp,
    Sr,
    Sv,
    Th,
    Tr,
    Ua,
    Uk,
    Vi,
    ZhCn,
    ZhTw,
    Zu,
}

const LANGUAGES: &[(Language, &str, &str)] = &[
    (Language::Af, "AF", "Afrikaans"),
    (Language::Al, "AL", "Albanian"),
    (Language::Ar, "AR", "Arabic"),
    (Language::Az, "AZ", "Azerbaijani"),
    (Language::Bg, "BG", "Bulgarian"),
    (Language::Ca, "CA", "Catalan"),
    (Language::Cz, "CZ", "Czech"),
    (Language::Da, "DA", "Danish"),
    (Language::De, "DE", "German"),
    (Language::El, "EL", "Greek"),
    (Language::En, "EN", "English"),
    (Language::Es, "ES", "Spanish"),
    (Language::Eu, "EU", "Basque"),
    (Language::Fa, "FA", "Persian (Farsi)"),
    (Language::Fi, "FI", "Finnish"),
    (Language::Fr, "FR", "French"),
    (Language::Gl, "GL", "Galician"),
    (Language::He, "HE", "Hebrew"),
    (Language::Hi, "HI", "Hindi"),
    (Language::Hr, "HR", "Croatian"),
    (Language::Hu, "HU", "Hungarian"),
    (Language::Id, "ID", "Indonesian"),
    (Language::It, "IT", "Italian"),
    (Language::Ja, "JA", "Japanese"),
    (Language::Kr, "KR", "Korean"),
    (Language::La, "LA", "Latvian"),
    (Language::Lt, "LT", "Lithuanian"),
    (Language::Mk, "MK", "Macedonian"),
    (Language::No, "NO", "Norwegian"),
    (Language::Nl, "NL", "Dutch"),
    (Language::Pl, "PL", "Polish"),
    (Language::Pt, "PT", "Portuguese"),
    (Language::PtBr, "PT_BR", "Português Brasil"),
    (Language::Ro, "RO", "Romanian"),
    (Language::Ru, "RU", "Russian"),
    (Language::Se, "SE", "Swedish"),
    (Language::Sk, "SK", "Slovak"),
    (Language::Sl, "SL", "Slovenian"),
    (Language::Sp, "SP", "Spanish"),
    (Language::Sr, "SR", "Serbian"),
    (Language::Sv, "SV", "Swedish"),
    (Language::Th, "TH", "Thai"),
    (Language::Tr, "TR", "Turkish"),
    (Language::Ua, "UA", "Ukrainian"),
    (Language::Uk, "UK", "Ukrainian"),
    (Language::Vi, "VI", "Vietnamese"),
    (Language::ZhCn, "ZH_CN", "Chinese Simplified"),
    (Language::ZhTw, "ZH_TW", "Chinese Traditional"),
    (Language::Zu, "ZU", "Zulu"),
];

impl Language {
    fn entry(&self) -> &'static (Language, &'static str, &'static str) {
        // every variant has exactly one row
        &LANGUAGES[*self as usize]
    }

    /// Canonical upper-case code, e.g. `EN` or `ZH_TW`.
    pub fn code(&self) -> &'static str {
        self.entry().1
    }

    /// English display name.
    pub fn name(&self) -> &'static str {
        self.entry().2
    }

    /// Value sent as the `lang` query parameter.
    pub fn as_api_str(&self) -> String {
        self.code().to_lowercase()
    }

    pub fn all() -> impl Iterator<Item = Language> {
        LANGUAGES.iter().map(|(lang, _, _)| *lang)
    }

    /// True iff `code` is a supported language code, ignoring case.
    pub fn validate(code: &str) -> bool {
        Language::try_from(code).is_ok()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Language {
    type Error = OwmError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.to_uppercase().replace('-', "_");

        LANGUAGES
            .iter()
            .find(|(_, code, _)| *code == normalized)
            .map(|(lang, _, _)| *lang)
            .ok_or_else(|| OwmError::InvalidLanguage(value.to_string()))
    }
}

impl FromStr for Language {
    type Err = OwmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::try_from(s)
    }
}
