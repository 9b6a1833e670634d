//! Minimal owned XML tree built on `quick-xml`.
//!
//! Only what the schema adapters need: namespace-resolved element names, attributes, direct
//! text, children, and the line/column of each start tag.

use encoding_rs::{DecoderResult, Encoding, UTF_8};
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use thiserror::Error;

/// Namespace of MSBuild (Visual Studio 2010+) project files.
pub const MSBUILD_NS: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("{source}")]
    Syntax {
        line: u32,
        col: u32,
        source: quick_xml::Error,
    },
    #[error("unbound prefix `{prefix}`")]
    UnboundPrefix { prefix: String, line: u32, col: u32 },
    #[error("unclosed element <{name}>")]
    Unclosed { name: String, line: u32, col: u32 },
    #[error("junk after document element")]
    TrailingElement { line: u32, col: u32 },
    #[error("no element found")]
    NoRoot,
    #[error("unknown encoding \"{label}\"")]
    UnknownEncoding { label: String },
    #[error("document is not valid {encoding}")]
    Decode {
        encoding: &'static str,
        line: u32,
        col: u32,
    },
}

impl XmlError {
    /// 1-based (line, column) where parsing stopped, when known.
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            XmlError::Syntax { line, col, .. }
            | XmlError::UnboundPrefix { line, col, .. }
            | XmlError::Unclosed { line, col, .. }
            | XmlError::TrailingElement { line, col }
            | XmlError::Decode { line, col, .. } => Some((*line, *col)),
            XmlError::NoRoot => None,
            XmlError::UnknownEncoding { .. } => Some((1, 1)),
        }
    }
}

/// Expanded element name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn matches(&self, namespace: Option<&str>, local: &str) -> bool {
        self.namespace.as_deref() == namespace && self.local == local
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlElement {
    pub name: QName,
    /// Attributes in document order, keys as written (prefix included), values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Concatenated direct text and CDATA content, unescaped.
    pub text: String,
    pub children: Vec<XmlElement>,
    pub line: u32,
    pub col: u32,
}

impl XmlElement {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First descendant reached by following `path` one child level per step, in document
    /// order. Each step is `(namespace, local name)`.
    pub fn find(&self, path: &[(Option<&str>, &str)]) -> Option<&XmlElement> {
        let Some(((ns, local), rest)) = path.split_first() else {
            return Some(self);
        };
        self.children
            .iter()
            .filter(|c| c.name.matches(*ns, local))
            .find_map(|c| c.find(rest))
    }

    /// Text of the element found by [`XmlElement::find`]; `Some("")` for an empty element.
    pub fn find_text(&self, path: &[(Option<&str>, &str)]) -> Option<&str> {
        self.find(path).map(|e| e.text.as_str())
    }
}

/// Decode raw document bytes to UTF-8.
///
/// A byte order mark wins; otherwise the `encoding` named in the XML declaration is used, and
/// UTF-8 when there is none.
pub fn decode_document(bytes: &[u8]) -> Result<String, XmlError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => match declared_encoding(bytes) {
            Some(label) => {
                let encoding = Encoding::for_label(label.as_bytes())
                    .ok_or_else(|| XmlError::UnknownEncoding { label: label.clone() })?;
                // A declaration readable as ASCII cannot be UTF-16.
                (encoding.output_encoding(), bytes)
            }
            None => (UTF_8, bytes),
        },
    };

    let mut decoder = encoding.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(body.len())
        .unwrap_or(body.len());
    let mut text = String::with_capacity(capacity);
    let (result, _) = decoder.decode_to_string_without_replacement(body, &mut text, true);
    match result {
        DecoderResult::InputEmpty => Ok(text),
        DecoderResult::Malformed(..) | DecoderResult::OutputFull => {
            let (line, col) = line_col(&text, text.len());
            Err(XmlError::Decode {
                encoding: encoding.name(),
                line,
                col,
            })
        }
    }
}

/// `encoding` pseudo-attribute of a leading `<?xml ...?>` declaration.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    if !bytes.starts_with(b"<?xml") {
        return None;
    }
    let end = bytes.windows(2).position(|w| w == b"?>")?;
    let decl = String::from_utf8_lossy(&bytes[..end]);
    let rest = decl.split_once("encoding")?.1.trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    let close = value.find(quote)?;
    Some(value[..close].to_string())
}

/// Parse a whole document into its root element.
pub fn parse_document(text: &str) -> Result<XmlElement, XmlError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = NsReader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut open: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let offset = reader.buffer_position() as usize;
        let resolved = reader
            .read_resolved_event()
            .map(|(ns, event)| (resolve_namespace(&ns), event));
        let (namespace, event) = match resolved {
            Ok(pair) => pair,
            Err(source) => {
                let (line, col) = line_col(text, reader.error_position() as usize);
                return Err(XmlError::Syntax { line, col, source });
            }
        };

        match event {
            Event::Start(e) => {
                let element = open_element(text, offset, namespace, &e)?;
                open.push(element);
            }
            Event::Empty(e) => {
                let element = open_element(text, offset, namespace, &e)?;
                close_element(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                // quick-xml checks end names, so an End always has a matching Start here.
                if let Some(element) = open.pop() {
                    close_element(&mut open, &mut root, element)?;
                }
            }
            Event::Text(t) => {
                let Some(current) = open.last_mut() else {
                    // Only whitespace may surround the root element.
                    if let Some(i) = t.iter().position(|b| !b.is_ascii_whitespace()) {
                        let (line, col) = line_col(text, offset + i);
                        return Err(XmlError::TrailingElement { line, col });
                    }
                    continue;
                };
                let unescaped = t.unescape().map_err(|source| {
                    let (line, col) = line_col(text, offset);
                    XmlError::Syntax { line, col, source }
                })?;
                current.text.push_str(&unescaped);
            }
            Event::CData(c) => {
                let Some(current) = open.last_mut() else {
                    let (line, col) = line_col(text, offset);
                    return Err(XmlError::TrailingElement { line, col });
                };
                current.text.push_str(&String::from_utf8_lossy(&c));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(XmlError::Unclosed {
            name: unclosed.name.local.clone(),
            line: unclosed.line,
            col: unclosed.col,
        });
    }

    root.ok_or(XmlError::NoRoot)
}

type Namespace = Result<Option<String>, String>;

fn resolve_namespace(ns: &ResolveResult<'_>) -> Namespace {
    match ns {
        ResolveResult::Bound(n) => Ok(Some(String::from_utf8_lossy(n.0).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(String::from_utf8_lossy(prefix).into_owned()),
    }
}

fn open_element(
    text: &str,
    offset: usize,
    namespace: Namespace,
    start: &BytesStart<'_>,
) -> Result<XmlElement, XmlError> {
    // `offset` is where the reader stood before this event; the tag begins at the next `<`.
    let tag_start = text
        .as_bytes()
        .get(offset..)
        .and_then(|rest| rest.iter().position(|b| *b == b'<'))
        .map_or(offset, |i| offset + i);
    let (line, col) = line_col(text, tag_start);

    let namespace = namespace.map_err(|prefix| XmlError::UnboundPrefix { prefix, line, col })?;

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Syntax {
            line,
            col,
            source: e.into(),
        })?;
        let value = attr
            .unescape_value()
            .map_err(|source| XmlError::Syntax { line, col, source })?;
        attributes.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value.into_owned(),
        ));
    }

    Ok(XmlElement {
        name: QName {
            namespace,
            local: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        },
        attributes,
        text: String::new(),
        children: Vec::new(),
        line,
        col,
    })
}

fn close_element(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::TrailingElement {
            line: element.line,
            col: element.col,
        });
    }
    *root = Some(element);
    Ok(())
}

/// 1-based line and byte column of `offset` in `source`, clamped to the end.
fn line_col(source: &str, offset: usize) -> (u32, u32) {
    let bytes = source.as_bytes();
    let offset = offset.min(bytes.len());
    let before = &bytes[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    (line as u32, (offset - line_start + 1) as u32)
}
