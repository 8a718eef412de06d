use serde::Deserialize;
use serde::Serialize;

/// A single country record as served by the restcountries v2 API.
///
/// Records are never normalized after decoding; fields the API omits for some
/// territories are optional here.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Language>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Flags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Language {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso639_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso639_2: Option<String>,
    #[serde(
        default,
        rename = "nativeName",
        skip_serializing_if = "Option::is_none"
    )]
    pub native_name: Option<String>,
}

impl Country {
    pub fn new(name: impl Into<String>, region: impl Into<String>, area: Option<f64>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            area,
            ..Self::default()
        }
    }

    /// Preferred flag image URL (png first, then svg).
    pub fn flag_url(&self) -> Option<&str> {
        let flags = self.flags.as_ref()?;
        flags.png.as_deref().or(flags.svg.as_deref())
    }
}
