//! YAML node tree with resolved tags and attached comments
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

/// Kind of a node in the loaded tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Mapping,
    Sequence,
    Scalar,
    Alias,
}

/// One node of a loaded YAML stream
///
/// Mapping children alternate key and value. Comments are only recorded on
/// mapping keys.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    pub kind: NodeKind,
    /// Resolved tag, short form for core schema tags (`!!str`)
    pub tag: String,
    /// Scalar text, empty for other kinds
    pub value: String,
    /// Comment lines directly above the node, `#` markers included
    pub head_comment: String,
    /// Trailing comment on the node's line, `#` marker included
    pub line_comment: String,
    /// 1-based line where the node starts
    pub line: usize,
    pub children: Vec<YamlNode>,
    /// Copy of the anchored node an alias points to
    pub target: Option<Box<YamlNode>>,
}

impl YamlNode {
    pub fn new(kind: NodeKind, tag: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            tag: tag.into(),
            value: String::new(),
            head_comment: String::new(),
            line_comment: String::new(),
            line,
            children: Vec::new(),
            target: None,
        }
    }

    pub fn scalar(tag: impl Into<String>, value: impl Into<String>, line: usize) -> Self {
        Self {
            value: value.into(),
            ..Self::new(NodeKind::Scalar, tag, line)
        }
    }

    pub fn alias(target: YamlNode, line: usize) -> Self {
        let tag = target.tag.clone();
        Self {
            target: Some(Box::new(target)),
            ..Self::new(NodeKind::Alias, tag, line)
        }
    }

    pub fn is_mapping(&self) -> bool {
        self.kind == NodeKind::Mapping
    }

    pub fn is_sequence(&self) -> bool {
        self.kind == NodeKind::Sequence
    }

    pub fn is_scalar(&self) -> bool {
        self.kind == NodeKind::Scalar
    }

    /// Follow aliases to the node they stand for
    pub fn resolve_alias(&self) -> &YamlNode {
        let mut node = self;
        while let (NodeKind::Alias, Some(target)) = (node.kind, node.target.as_deref()) {
            node = target;
        }
        node
    }

    /// Key/value pairs of a mapping in document order
    pub fn pairs(&self) -> impl Iterator<Item = (&YamlNode, &YamlNode)> {
        self.children
            .chunks_exact(2)
            .map(|pair| (&pair[0], &pair[1]))
    }

    /// Full comment text of a key: head comment, then the line comment
    pub fn comment(&self) -> String {
        match (self.head_comment.is_empty(), self.line_comment.is_empty()) {
            (_, true) => self.head_comment.clone(),
            (true, false) => self.line_comment.clone(),
            (false, false) => format!("{}\n{}", self.head_comment, self.line_comment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_alias_follows_chain() {
        let target = YamlNode::scalar("!!int", "3", 1);
        let first = YamlNode::alias(target, 2);
        let second = YamlNode::alias(first, 3);

        let resolved = second.resolve_alias();
        assert_eq!(resolved.kind, NodeKind::Scalar);
        assert_eq!(resolved.value, "3");
        assert_eq!(second.tag, "!!int");
    }

    #[test]
    fn test_pairs_and_comment() {
        let mut key = YamlNode::scalar("!!str", "port", 1);
        key.head_comment = "# @schema\n# type: integer\n# @schema".to_string();
        key.line_comment = "# listening port".to_string();

        let mut mapping = YamlNode::new(NodeKind::Mapping, "!!map", 1);
        mapping.children = vec![key, YamlNode::scalar("!!int", "80", 1)];

        let pairs: Vec<_> = mapping.pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1.value, "80");
        assert_eq!(
            pairs[0].0.comment(),
            "# @schema\n# type: integer\n# @schema\n# listening port"
        );
    }
}
