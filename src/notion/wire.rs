//! Notion JSON wire format and its decoding into the model.
//!
//! Blocks arrive as `{"id": .., "type": "paragraph", "paragraph": {..}}`: the
//! payload lives under a key named after the type, so the raw block keeps all
//! remaining keys and the payload is pulled out by name.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{
    Background, BlockData, BlockId, ContentBlock, Emphasis, PageProperties, PageSummary, TextRun,
};

/// One page of a paginated list response.
#[derive(Debug, Deserialize)]
pub(crate) struct Paginated<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    has_children: bool,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTextPayload {
    #[serde(default)]
    rich_text: Vec<RawRichText>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEquation {
    expression: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRichText {
    #[serde(rename = "type")]
    run_type: String,
    #[serde(default)]
    plain_text: String,
    #[serde(default)]
    annotations: RawAnnotations,
    #[serde(default)]
    text: Option<RawTextContent>,
    #[serde(default)]
    equation: Option<RawEquation>,
}

#[derive(Debug, Deserialize)]
struct RawTextContent {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawAnnotations {
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    strikethrough: bool,
    #[serde(default)]
    underline: bool,
    #[serde(default)]
    code: bool,
}

impl RawAnnotations {
    /// Set flags in Notion's key order.
    fn emphasis(&self) -> Vec<Emphasis> {
        [
            (self.bold, Emphasis::Bold),
            (self.italic, Emphasis::Italic),
            (self.strikethrough, Emphasis::Strikethrough),
            (self.underline, Emphasis::Underline),
            (self.code, Emphasis::Code),
        ]
        .into_iter()
        .filter_map(|(set, emphasis)| set.then_some(emphasis))
        .collect()
    }
}

impl RawRichText {
    fn into_run(self) -> TextRun {
        let RawRichText {
            run_type,
            plain_text,
            annotations,
            text,
            equation,
        } = self;

        match (run_type.as_str(), equation) {
            ("text", _) => TextRun::Text {
                content: text.map(|t| t.content).unwrap_or(plain_text),
                emphasis: annotations.emphasis(),
            },
            ("equation", Some(equation)) => TextRun::Equation {
                expression: equation.expression,
            },
            _ => TextRun::Other {
                type_name: run_type.clone(),
                plain_text,
            },
        }
    }

    fn content(&self) -> &str {
        self.text
            .as_ref()
            .map(|t| t.content.as_str())
            .unwrap_or(&self.plain_text)
    }
}

fn decode_runs(runs: Vec<RawRichText>) -> Vec<TextRun> {
    runs.into_iter().map(RawRichText::into_run).collect()
}

impl RawBlock {
    fn take_payload<T: serde::de::DeserializeOwned>(&mut self) -> Result<T> {
        let value = self
            .rest
            .remove(&self.block_type)
            .ok_or_else(|| Error::MalformedBlock {
                id: self.id.clone(),
                reason: format!("missing `{}` payload", self.block_type),
            })?;
        serde_json::from_value(value).map_err(|e| Error::MalformedBlock {
            id: self.id.clone(),
            reason: e.to_string(),
        })
    }

    /// Plain text of whatever rich text an unknown block carries.
    fn fallback_text(&self) -> String {
        self.rest
            .get(&self.block_type)
            .and_then(|payload| payload.get("rich_text"))
            .and_then(Value::as_array)
            .map(|runs| {
                runs.iter()
                    .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Decode a raw block into the model.
///
/// Unknown block types are kept as [`BlockData::Unsupported`]; only a known
/// type with a missing or mistyped payload is an error.
pub(crate) fn decode_block(mut raw: RawBlock) -> Result<ContentBlock> {
    let block_type = raw.block_type.clone();
    let data = match block_type.as_str() {
        "paragraph" => {
            let payload: RawTextPayload = raw.take_payload()?;
            let background = match payload.color.as_deref() {
                None | Some("default") => Background::Default,
                Some(_) => Background::Highlighted,
            };
            BlockData::Paragraph {
                rich_text: decode_runs(payload.rich_text),
                background,
            }
        }
        "bulleted_list_item" => {
            let payload: RawTextPayload = raw.take_payload()?;
            BlockData::BulletedItem {
                rich_text: decode_runs(payload.rich_text),
            }
        }
        "numbered_list_item" => {
            let payload: RawTextPayload = raw.take_payload()?;
            BlockData::NumberedItem {
                rich_text: decode_runs(payload.rich_text),
            }
        }
        "toggle" => {
            let payload: RawTextPayload = raw.take_payload()?;
            BlockData::Toggle {
                rich_text: decode_runs(payload.rich_text),
            }
        }
        "code" => {
            let payload: RawTextPayload = raw.take_payload()?;
            BlockData::Code {
                rich_text: decode_runs(payload.rich_text),
                language: payload.language.unwrap_or_default(),
            }
        }
        "equation" => {
            let payload: RawEquation = raw.take_payload()?;
            BlockData::Equation {
                expression: payload.expression,
            }
        }
        heading @ ("heading_1" | "heading_2" | "heading_3") => {
            let level = match heading {
                "heading_1" => 1,
                "heading_2" => 2,
                _ => 3,
            };
            let payload: RawTextPayload = raw.take_payload()?;
            BlockData::Heading {
                level,
                rich_text: decode_runs(payload.rich_text),
            }
        }
        "image" => BlockData::Image,
        _ => BlockData::Unsupported {
            type_name: block_type.clone(),
            fallback_text: raw.fallback_text(),
        },
    };

    Ok(ContentBlock {
        id: BlockId(raw.id),
        has_children: raw.has_children,
        data,
    })
}

// ============================================================================
// Pages and databases
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct RawPageRef {
    id: String,
}

impl From<RawPageRef> for PageSummary {
    fn from(raw: RawPageRef) -> Self {
        PageSummary {
            id: BlockId(raw.id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPage {
    properties: HashMap<String, RawProperty>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProperty {
    #[serde(default)]
    title: Option<Vec<RawRichText>>,
    #[serde(default)]
    number: Option<f64>,
    #[serde(default)]
    select: Option<RawSelect>,
    #[serde(default)]
    multi_select: Option<Vec<RawSelect>>,
    #[serde(default)]
    files: Option<Vec<RawFile>>,
}

#[derive(Debug, Deserialize)]
struct RawSelect {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(default)]
    file: Option<RawUrl>,
    #[serde(default)]
    external: Option<RawUrl>,
}

#[derive(Debug, Deserialize)]
struct RawUrl {
    url: String,
}

impl RawPage {
    fn property(&self, name: &str) -> Option<&RawProperty> {
        self.properties.get(name)
    }

    fn select(&self, name: &str) -> Option<String> {
        self.property(name)
            .and_then(|p| p.select.as_ref())
            .map(|s| s.name.clone())
    }
}

/// Decode the property bag of a problem page.
pub(crate) fn decode_properties(raw: RawPage) -> Result<PageProperties> {
    let title = raw
        .property("Name")
        .and_then(|p| p.title.as_ref())
        .and_then(|fragments| fragments.first())
        .map(|first| first.content().to_string())
        .ok_or_else(|| Error::MissingProperty("Name".to_string()))?;

    let week = raw
        .property("Week")
        .and_then(|p| p.number)
        .ok_or_else(|| Error::MissingProperty("Week".to_string()))
        .and_then(week_number)?;

    let problem_type = raw
        .select("Type")
        .ok_or_else(|| Error::MissingProperty("Type".to_string()))?;

    let tags = raw
        .property("Tags")
        .and_then(|p| p.multi_select.as_ref())
        .map(|options| options.iter().map(|o| o.name.clone()).collect())
        .unwrap_or_default();

    let pdf_url = raw
        .property("Problem PDF")
        .and_then(|p| p.files.as_ref())
        .and_then(|files| files.first())
        .and_then(|f| f.file.as_ref().or(f.external.as_ref()))
        .map(|u| u.url.clone());

    Ok(PageProperties {
        title,
        week,
        difficulty: raw.select("Difficulty"),
        problem_type,
        tags,
        pdf_url,
    })
}

/// Notion numbers are floats; a week must be a whole, non-negative one.
fn week_number(value: f64) -> Result<u32> {
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(Error::InvalidProperty {
            name: "Week".to_string(),
            reason: format!("{value} is not a non-negative integer"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;
    use serde_json::json;

    fn decode(value: Value) -> Result<ContentBlock> {
        decode_block(serde_json::from_value(value).unwrap())
    }

    fn text_run(content: &str, annotations: Value) -> Value {
        json!({
            "type": "text",
            "text": { "content": content, "link": null },
            "annotations": annotations,
            "plain_text": content,
            "href": null
        })
    }

    #[test]
    fn test_decode_paragraph_with_annotations() {
        let block = decode(json!({
            "object": "block",
            "id": "b1",
            "type": "paragraph",
            "has_children": false,
            "paragraph": {
                "rich_text": [text_run("hi", json!({
                    "bold": true, "italic": false, "strikethrough": false,
                    "underline": false, "code": true, "color": "default"
                }))],
                "color": "default"
            }
        }))
        .unwrap();

        assert_eq!(block.id, BlockId::from("b1"));
        assert_eq!(
            block.data,
            BlockData::Paragraph {
                rich_text: vec![TextRun::styled("hi", &[Emphasis::Bold, Emphasis::Code])],
                background: Background::Default,
            }
        );
    }

    #[test]
    fn test_decode_coloured_paragraph_is_highlighted() {
        let block = decode(json!({
            "id": "b1",
            "type": "paragraph",
            "paragraph": { "rich_text": [], "color": "yellow_background" }
        }))
        .unwrap();
        assert!(matches!(
            block.data,
            BlockData::Paragraph {
                background: Background::Highlighted,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_equation_run() {
        let block = decode(json!({
            "id": "b1",
            "type": "bulleted_list_item",
            "bulleted_list_item": {
                "rich_text": [{
                    "type": "equation",
                    "equation": { "expression": "O(n)" },
                    "plain_text": "O(n)"
                }],
                "color": "default"
            }
        }))
        .unwrap();
        assert_eq!(
            block.data,
            BlockData::BulletedItem {
                rich_text: vec![TextRun::equation("O(n)")]
            }
        );
    }

    #[test]
    fn test_decode_mention_run_is_other() {
        let block = decode(json!({
            "id": "b1",
            "type": "toggle",
            "has_children": true,
            "toggle": {
                "rich_text": [{
                    "type": "mention",
                    "mention": { "type": "user" },
                    "plain_text": "@Alice"
                }]
            }
        }))
        .unwrap();
        assert!(block.has_children);
        assert_eq!(
            block.data,
            BlockData::Toggle {
                rich_text: vec![TextRun::Other {
                    type_name: "mention".to_string(),
                    plain_text: "@Alice".to_string(),
                }]
            }
        );
    }

    #[test]
    fn test_decode_code_and_equation_blocks() {
        let code = decode(json!({
            "id": "c",
            "type": "code",
            "code": {
                "rich_text": [text_run("int x;", json!({}))],
                "language": "c++"
            }
        }))
        .unwrap();
        assert_eq!(
            code.data,
            BlockData::Code {
                rich_text: vec![TextRun::plain("int x;")],
                language: "c++".to_string(),
            }
        );

        let equation = decode(json!({
            "id": "e",
            "type": "equation",
            "equation": { "expression": "x^2" }
        }))
        .unwrap();
        assert_eq!(
            equation.data,
            BlockData::Equation {
                expression: "x^2".to_string()
            }
        );
    }

    #[test]
    fn test_decode_headings_and_image() {
        for (name, kind) in [
            ("heading_1", BlockKind::Heading1),
            ("heading_2", BlockKind::Heading2),
            ("heading_3", BlockKind::Heading3),
        ] {
            let block = decode(json!({
                "id": "h",
                "type": name,
                name: { "rich_text": [text_run("Title", json!({}))], "is_toggleable": false }
            }))
            .unwrap();
            assert_eq!(block.kind(), kind);
        }

        let image = decode(json!({
            "id": "i",
            "type": "image",
            "image": { "type": "file", "file": { "url": "https://x/y.png" } }
        }))
        .unwrap();
        assert_eq!(image.data, BlockData::Image);
    }

    #[test]
    fn test_decode_unknown_block_keeps_plain_text() {
        let block = decode(json!({
            "id": "q",
            "type": "quote",
            "quote": { "rich_text": [text_run("a ", json!({})), text_run("quote", json!({}))] }
        }))
        .unwrap();
        assert_eq!(
            block.data,
            BlockData::Unsupported {
                type_name: "quote".to_string(),
                fallback_text: "a quote".to_string(),
            }
        );

        let divider = decode(json!({ "id": "d", "type": "divider", "divider": {} })).unwrap();
        assert_eq!(
            divider.data,
            BlockData::Unsupported {
                type_name: "divider".to_string(),
                fallback_text: String::new(),
            }
        );
    }

    #[test]
    fn test_decode_missing_payload_is_malformed() {
        let err = decode(json!({ "id": "p", "type": "paragraph" })).unwrap_err();
        assert!(matches!(err, Error::MalformedBlock { ref id, .. } if id == "p"));
    }

    #[test]
    fn test_decode_properties() {
        let page: RawPage = serde_json::from_value(json!({
            "properties": {
                "Name": { "type": "title", "title": [text_run("Even Pairs", json!({}))] },
                "Week": { "type": "number", "number": 1 },
                "Difficulty": { "type": "select", "select": { "name": "Easy" } },
                "Type": { "type": "select", "select": { "name": "PoW" } },
                "Tags": { "type": "multi_select", "multi_select": [
                    { "name": "prefix sums" }, { "name": "counting" }
                ]},
                "Problem PDF": { "type": "files", "files": [
                    { "name": "even_pairs.pdf", "type": "file",
                      "file": { "url": "https://files.example/even_pairs.pdf" } }
                ]}
            }
        }))
        .unwrap();

        let props = decode_properties(page).unwrap();
        assert_eq!(props.title, "Even Pairs");
        assert_eq!(props.week, 1);
        assert_eq!(props.difficulty.as_deref(), Some("Easy"));
        assert_eq!(props.problem_type, "PoW");
        assert_eq!(props.tags, vec!["prefix sums", "counting"]);
        assert_eq!(
            props.pdf_url.as_deref(),
            Some("https://files.example/even_pairs.pdf")
        );
    }

    #[test]
    fn test_decode_properties_optional_fields() {
        let page: RawPage = serde_json::from_value(json!({
            "properties": {
                "Name": { "title": [text_run("Dominoes", json!({}))] },
                "Week": { "number": 1 },
                "Difficulty": { "select": null },
                "Type": { "select": { "name": "Problem" } },
                "Tags": { "multi_select": [] },
                "Problem PDF": { "files": [] }
            }
        }))
        .unwrap();

        let props = decode_properties(page).unwrap();
        assert_eq!(props.difficulty, None);
        assert!(props.tags.is_empty());
        assert_eq!(props.pdf_url, None);
    }

    #[test]
    fn test_decode_properties_missing_week() {
        let page: RawPage = serde_json::from_value(json!({
            "properties": {
                "Name": { "title": [text_run("Dominoes", json!({}))] },
                "Type": { "select": { "name": "Problem" } }
            }
        }))
        .unwrap();

        let err = decode_properties(page).unwrap_err();
        assert!(matches!(err, Error::MissingProperty(ref name) if name == "Week"));
    }

    fn page_with_week(week: Value) -> RawPage {
        serde_json::from_value(json!({
            "properties": {
                "Name": { "title": [text_run("Dominoes", json!({}))] },
                "Week": { "number": week },
                "Type": { "select": { "name": "Problem" } }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_properties_rejects_fractional_or_negative_week() {
        for week in [json!(1.5), json!(-2)] {
            let err = decode_properties(page_with_week(week)).unwrap_err();
            assert!(matches!(err, Error::InvalidProperty { ref name, .. } if name == "Week"));
        }

        let props = decode_properties(page_with_week(json!(12.0))).unwrap();
        assert_eq!(props.week, 12);
    }

    #[test]
    fn test_week_number_rejects_non_finite() {
        assert!(week_number(f64::NAN).is_err());
        assert!(week_number(f64::INFINITY).is_err());
        assert_eq!(week_number(0.0).unwrap(), 0);
    }
}
