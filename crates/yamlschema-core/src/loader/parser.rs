//! YAML text to [`YamlNode`] tree
//!
//! Parsing is event driven. Tags are resolved with the YAML 1.2 core schema
//! plus timestamps, and comments are recovered from the source text using the
//! position of each mapping key.
//!
//! Copyright (c) 2025 yaml-to-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::inference::types::YAML_TAG_PREFIX;
use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::node::{NodeKind, YamlNode};
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

static NULL_REGEX: OnceLock<Regex> = OnceLock::new();
static BOOL_REGEX: OnceLock<Regex> = OnceLock::new();
static INT_REGEX: OnceLock<Regex> = OnceLock::new();
static FLOAT_REGEX: OnceLock<Regex> = OnceLock::new();
static TIMESTAMP_REGEX: OnceLock<Regex> = OnceLock::new();

/// Resolve the tag of an untagged plain scalar
pub fn resolve_plain_tag(value: &str) -> &'static str {
    let null = NULL_REGEX.get_or_init(|| Regex::new(r"^(?:~|null|Null|NULL)?$").unwrap());
    let boolean = BOOL_REGEX
        .get_or_init(|| Regex::new(r"^(?:true|True|TRUE|false|False|FALSE)$").unwrap());
    let int = INT_REGEX
        .get_or_init(|| Regex::new(r"^(?:[-+]?[0-9]+|0o[0-7]+|0x[0-9a-fA-F]+)$").unwrap());
    let float = FLOAT_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?:[-+]?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?)(?:[eE][-+]?[0-9]+)?|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
        )
        .unwrap()
    });
    let timestamp = TIMESTAMP_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?:[0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt]|[ \t]+)[0-9]{1,2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::[0-9]{2})?))?)$",
        )
        .unwrap()
    });

    if null.is_match(value) {
        "!!null"
    } else if boolean.is_match(value) {
        "!!bool"
    } else if int.is_match(value) {
        "!!int"
    } else if float.is_match(value) {
        "!!float"
    } else if timestamp.is_match(value) {
        "!!timestamp"
    } else {
        "!!str"
    }
}

/// Parse YAML text into a document node holding every root of the stream
pub fn parse_yaml(source: &str, path: &Path) -> LoaderResult<YamlNode> {
    let mut builder = TreeBuilder::new(source, path);
    let mut parser = Parser::new_from_str(source);

    parser
        .load(&mut builder, true)
        .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e.to_string()))?;

    builder.finish()
}

/// Line lookup over the source text
struct SourceText<'a> {
    lines: Vec<&'a str>,
    /// Char offset at which each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceText<'a> {
    fn new(source: &'a str) -> Self {
        let lines: Vec<&str> = source.split('\n').collect();
        let mut line_starts = Vec::with_capacity(lines.len());
        let mut offset = 0;
        for line in &lines {
            line_starts.push(offset);
            offset += line.chars().count() + 1;
        }
        Self { lines, line_starts }
    }

    /// 0-based line and column of a char offset
    fn position(&self, index: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&index) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        (line, index - self.line_starts[line])
    }

    fn line(&self, line: usize) -> &'a str {
        self.lines.get(line).copied().unwrap_or("").trim_end_matches('\r')
    }

    /// Whether only indentation and sequence dashes precede `column`
    fn starts_line(&self, line: usize, column: usize) -> bool {
        self.line(line)
            .chars()
            .take(column)
            .all(|c| c == ' ' || c == '\t' || c == '-')
    }

    /// Contiguous full-line comments directly above `line`, not reaching
    /// back to `floor` (the last line occupied by earlier content)
    fn head_comment(&self, line: usize, floor: Option<usize>) -> String {
        let lowest = floor.map_or(0, |floor| floor + 1);
        let mut collected = Vec::new();
        let mut current = line;
        while current > lowest {
            current -= 1;
            let text = self.line(current).trim();
            if !text.starts_with('#') {
                break;
            }
            collected.push(text);
        }
        collected.reverse();
        collected.join("\n")
    }

    /// Trailing `# ...` comment on `line`, outside quoted text
    fn line_comment(&self, line: usize) -> String {
        let text = self.line(line);
        let mut quote: Option<char> = None;
        let mut escaped = false;
        let mut previous = ' ';
        for (offset, c) in text.char_indices() {
            match quote {
                Some('"') if escaped => escaped = false,
                Some('"') if c == '\\' => escaped = true,
                Some(open) if c == open => quote = None,
                Some(_) => {}
                None if (c == '"' || c == '\'') && opens_quote(previous) => quote = Some(c),
                None if c == '#' && previous.is_whitespace() => {
                    return text[offset..].trim().to_string();
                }
                None => {}
            }
            previous = c;
        }
        String::new()
    }
}

impl SourceText<'_> {
    /// Last line holding part of a scalar that starts at `line`/`column`
    fn scalar_end(&self, line: usize, column: usize, style: TScalarStyle) -> usize {
        match style {
            TScalarStyle::Plain => line,
            TScalarStyle::SingleQuoted => self.quoted_end(line, column, '\''),
            TScalarStyle::DoubleQuoted => self.quoted_end(line, column, '"'),
            _ => self.block_end(line, column),
        }
    }

    /// Line of the closing quote of a flow scalar opened at `line`/`column`
    fn quoted_end(&self, line: usize, column: usize, quote: char) -> usize {
        if self.line(line).chars().nth(column) != Some(quote) {
            return line;
        }

        let mut escaped = false;
        let mut skip = column + 1;
        for current in line..self.lines.len() {
            let chars: Vec<char> = self.line(current).chars().collect();
            let mut index = skip;
            while index < chars.len() {
                let c = chars[index];
                if escaped {
                    escaped = false;
                } else if quote == '"' && c == '\\' {
                    escaped = true;
                } else if c == quote {
                    // '' is an escaped quote inside single-quoted text
                    if quote == '\'' && chars.get(index + 1) == Some(&'\'') {
                        index += 1;
                    } else {
                        return current;
                    }
                }
                index += 1;
            }
            escaped = false;
            skip = 0;
        }
        line
    }

    /// Last content line of a `|` or `>` block scalar whose header sits at
    /// `line`/`column`
    ///
    /// Content continues while lines are blank or indented at least as far
    /// as the content indentation; the first less indented line ends it.
    fn block_end(&self, line: usize, column: usize) -> usize {
        let header = self.line(line);
        let mut indicator = header.chars().skip(column);
        if !matches!(indicator.next(), Some('|' | '>')) {
            return line;
        }

        let header_indent = indentation(header);
        let explicit = indicator
            .take_while(|c| !c.is_whitespace())
            .find_map(|c| c.to_digit(10))
            .map(|digit| header_indent + digit as usize);

        let mut content_indent = explicit;
        let mut end = line;
        for current in line + 1..self.lines.len() {
            let text = self.line(current);
            if text.trim().is_empty() {
                continue;
            }
            let indent = indentation(text);
            let required = *content_indent.get_or_insert(indent);
            if indent < required || indent <= header_indent {
                break;
            }
            end = current;
        }
        end
    }
}

fn indentation(text: &str) -> usize {
    text.chars().take_while(|c| *c == ' ').count()
}

fn opens_quote(previous: char) -> bool {
    previous.is_whitespace() || matches!(previous, ':' | ',' | '[' | '{' | '-')
}

/// Container being filled, with the anchor to register once it closes
struct OpenNode {
    node: YamlNode,
    anchor: usize,
}

struct TreeBuilder<'a> {
    source: SourceText<'a>,
    path: PathBuf,
    stack: Vec<OpenNode>,
    anchors: HashMap<usize, YamlNode>,
    /// Last source line taken by a scalar seen so far
    comment_floor: Option<usize>,
    error: Option<LoaderError>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str, path: &Path) -> Self {
        Self {
            source: SourceText::new(source),
            path: path.to_path_buf(),
            stack: vec![OpenNode {
                node: YamlNode::new(NodeKind::Document, "", 1),
                anchor: 0,
            }],
            anchors: HashMap::new(),
            comment_floor: None,
            error: None,
        }
    }

    fn finish(mut self) -> LoaderResult<YamlNode> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.stack.len() != 1 {
            return Err(LoaderError::yaml_parse_error(
                self.path,
                "unexpected end of stream",
            ));
        }
        match self.stack.pop() {
            Some(open) => Ok(open.node),
            None => Err(LoaderError::yaml_parse_error(self.path, "empty stream")),
        }
    }

    fn handle(&mut self, event: Event, mark: Marker) -> LoaderResult<()> {
        let (line, column) = self.source.position(mark.index());

        match event {
            Event::Scalar(value, style, anchor, tag) => {
                let tag = match tag {
                    Some(tag) => explicit_tag(&tag),
                    None if style == TScalarStyle::Plain => resolve_plain_tag(&value).to_string(),
                    None => "!!str".to_string(),
                };
                let mut node = YamlNode::scalar(tag, value, line + 1);
                if self.next_is_key() && self.source.starts_line(line, column) {
                    node.head_comment = self.source.head_comment(line, self.comment_floor);
                    node.line_comment = self.source.line_comment(line);
                }
                self.advance_floor(self.source.scalar_end(line, column, style));
                self.register_anchor(anchor, &node);
                self.attach(node)
            }
            Event::SequenceStart(anchor, tag) => {
                self.open(NodeKind::Sequence, tag, "!!seq", anchor, line)
            }
            Event::MappingStart(anchor, tag) => {
                self.open(NodeKind::Mapping, tag, "!!map", anchor, line)
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let open = self.stack.pop().ok_or_else(|| {
                    LoaderError::yaml_parse_error(self.path.clone(), "unbalanced collection end")
                })?;
                self.register_anchor(open.anchor, &open.node);
                self.attach(open.node)
            }
            Event::Alias(id) => {
                let target = self.anchors.get(&id).cloned().ok_or_else(|| {
                    LoaderError::yaml_parse_error(
                        self.path.clone(),
                        format!("unknown anchor referenced at line {}", line + 1),
                    )
                })?;
                self.advance_floor(line);
                self.attach(YamlNode::alias(target, line + 1))
            }
            _ => Ok(()),
        }
    }

    fn open(
        &mut self,
        kind: NodeKind,
        tag: Option<Tag>,
        default_tag: &str,
        anchor: usize,
        line: usize,
    ) -> LoaderResult<()> {
        if self.next_is_key() {
            return Err(LoaderError::unsupported(
                self.path.clone(),
                format!("mapping keys must be scalars (line {})", line + 1),
            ));
        }
        let tag = tag
            .map(|tag| explicit_tag(&tag))
            .unwrap_or_else(|| default_tag.to_string());
        self.stack.push(OpenNode {
            node: YamlNode::new(kind, tag, line + 1),
            anchor,
        });
        Ok(())
    }

    /// True when the next node completed goes into a key slot
    fn next_is_key(&self) -> bool {
        self.stack
            .last()
            .map(|open| open.node.is_mapping() && open.node.children.len() % 2 == 0)
            .unwrap_or(false)
    }

    fn attach(&mut self, node: YamlNode) -> LoaderResult<()> {
        if self.next_is_key() && node.kind == NodeKind::Alias {
            return Err(LoaderError::unsupported(
                self.path.clone(),
                format!("mapping keys must be scalars (line {})", node.line),
            ));
        }
        match self.stack.last_mut() {
            Some(parent) => {
                parent.node.children.push(node);
                Ok(())
            }
            None => Err(LoaderError::yaml_parse_error(
                self.path.clone(),
                "node outside of any document",
            )),
        }
    }

    fn advance_floor(&mut self, line: usize) {
        self.comment_floor = Some(self.comment_floor.map_or(line, |floor| floor.max(line)));
    }

    fn register_anchor(&mut self, anchor: usize, node: &YamlNode) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
    }
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, event: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.handle(event, mark) {
            self.error = Some(error);
        }
    }
}

/// Tag written in the document, in short form for the core schema
fn explicit_tag(tag: &Tag) -> String {
    let full = format!("{}{}", tag.handle, tag.suffix);
    if full == "!" {
        return "!!str".to_string();
    }
    match full.strip_prefix(YAML_TAG_PREFIX) {
        Some(name) => format!("!!{}", name),
        None => full,
    }
}
