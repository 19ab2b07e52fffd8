//! Input node shape.

use serde::{Deserialize, Serialize};

/// A named node and its ordered successors.
///
/// Serialized as `{"id": "...", "nextIds": [...]}`. The order of
/// `next_ids` decides the order of sibling lanes after a divergence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(default, alias = "next_ids")]
    pub next_ids: Vec<String>,
}

impl GraphNode {
    /// Build a node from anything string-like.
    #[must_use]
    pub fn new<I, S>(id: impl Into<String>, next_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            next_ids: next_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// A node with no successors.
    #[must_use]
    pub fn sink(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            next_ids: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_and_snake_case() {
        let camel: GraphNode =
            serde_json::from_str(r#"{"id":"1","nextIds":["2","3"]}"#).expect("camel");
        let snake: GraphNode =
            serde_json::from_str(r#"{"id":"1","next_ids":["2","3"]}"#).expect("snake");
        assert_eq!(camel, snake);
        assert_eq!(camel, GraphNode::new("1", ["2", "3"]));
    }

    #[test]
    fn missing_next_ids_means_sink() {
        let node: GraphNode = serde_json::from_str(r#"{"id":"end"}"#).expect("sink");
        assert_eq!(node, GraphNode::sink("end"));
    }

    #[test]
    fn writes_camel_case() {
        let json = serde_json::to_string(&GraphNode::new("a", ["b"])).expect("serialize");
        assert_eq!(json, r#"{"id":"a","nextIds":["b"]}"#);
    }
}
