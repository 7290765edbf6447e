use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One catalog row after CSV-level cleanup, before domain mapping.
#[derive(Debug)]
pub(crate) struct CatalogRow {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) kind: String,
    pub(crate) suggested_duration_days: Option<String>,
    pub(crate) target_kinds: Vec<String>,
    pub(crate) target_audiences: Vec<String>,
    pub(crate) resources: Vec<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CatalogRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RawRow>() {
        let raw = record?;
        rows.push(CatalogRow {
            title: raw.title,
            description: raw.description,
            kind: raw.kind,
            suggested_duration_days: raw.suggested_duration_days,
            target_kinds: split_list(raw.target_kinds.as_deref()),
            target_audiences: split_list(raw.audiences.as_deref()),
            resources: split_list(raw.resources.as_deref()),
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(
        rename = "Suggested Duration Days",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    suggested_duration_days: Option<String>,
    #[serde(
        rename = "Target Kinds",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    target_kinds: Option<String>,
    #[serde(
        rename = "Audiences",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    audiences: Option<String>,
    #[serde(
        rename = "Resources",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    resources: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Semicolon-separated cell into trimmed, non-empty items.
fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
