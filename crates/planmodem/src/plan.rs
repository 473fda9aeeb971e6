use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// One planned image, decoded from a completed element of the model's array.
///
/// Every field is optional: the parser only guarantees structural
/// completeness of the element, not schema conformance. Fields outside the
/// planning vocabulary are preserved verbatim in [`extra`](Self::extra) so a
/// caller can round-trip a plan without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePlan {
    /// Ordinal assigned by the model. When numeric, it identifies the plan
    /// for duplicate suppression; any other shape disables that check.
    #[serde(deserialize_with = "numeric_or_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<Number>,
    /// Role of the image in the series (cover, content, closing).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// The one-sentence message the image should carry.
    #[serde(rename = "coreMessage", skip_serializing_if = "Option::is_none")]
    pub core_message: Option<String>,
    /// Position hint for re-insertion, resolved later by
    /// [`resolve`](crate::resolve).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Headline text to render in the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Supporting text under the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Free-form notes from the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The full generation prompt to hand to the image provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Fields the planning vocabulary does not cover, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts any JSON value in the `index` slot but keeps only numbers, so a
/// plan with `"index": "one"` deserializes instead of failing the element.
fn numeric_or_none<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => Some(n),
        _ => None,
    }))
}
