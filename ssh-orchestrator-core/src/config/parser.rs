//! Block-grammar config parser
//!
//! The config files are line-oriented:
//!
//! ```text
//! # comment
//! alias {
//!     key: value
//! }
//! ```
//!
//! A block may also be written on a single line (`alias { key: value }`).
//! Blank lines and whole-line `#` comments are ignored. Every error carries
//! the 1-based line number it was detected on.

use thiserror::Error;

use crate::types::{ProxyEntry, ProxyKind, ServerEntry};

/// Parse failure, positioned at a config line
#[derive(Error, Debug)]
pub enum ParseError {
    /// A block opened while another one is still open
    #[error("line {line}: nested blocks are not supported, missing closing brace?")]
    NestedBlock { line: usize },

    /// `{` with no alias in front of it
    #[error("line {line}: missing alias before '{{'")]
    MissingAlias { line: usize },

    /// `}` with no open block
    #[error("line {line}: unexpected closing brace")]
    UnexpectedClosingBrace { line: usize },

    /// In-block line without a `key: value` separator
    #[error("line {line}: expected 'key: value'")]
    MalformedPair { line: usize },

    /// Key not recognized for this collection
    #[error("line {line}: unknown key '{key}'")]
    UnknownKey { line: usize, key: String },

    /// Non-comment text outside any block
    #[error("line {line}: unexpected text outside block: {text}")]
    TextOutsideBlock { line: usize, text: String },

    /// Block still open at end of input, positioned at its opening line
    #[error("line {line}: block '{alias}' is never closed")]
    UnterminatedBlock { line: usize, alias: String },

    /// Alias used by more than one block in the same file
    #[error("line {line}: duplicate alias '{alias}'")]
    DuplicateAlias { line: usize, alias: String },

    /// `port` value outside 0-65535
    #[error("line {line}: invalid port '{value}'")]
    InvalidPort { line: usize, value: String },

    /// Proxy `type` value that is neither socks5 nor http
    #[error("line {line}: unknown proxy type '{value}' (expected socks5 or http)")]
    InvalidProxyKind { line: usize, value: String },
}

/// Parse the server collection. Entries are returned in file order.
pub fn parse_servers(input: &str) -> Result<Vec<ServerEntry>, ParseError> {
    parse_blocks(input)
}

/// Parse the proxy collection. Entries are returned in file order.
pub fn parse_proxies(input: &str) -> Result<Vec<ProxyEntry>, ParseError> {
    parse_blocks(input)
}

/// Per-collection block construction: which keys exist and where they land.
trait ConfigBlock: Sized {
    fn open(alias: String) -> Self;
    fn alias(&self) -> &str;
    fn assign(&mut self, key: &str, value: &str, line: usize) -> Result<(), ParseError>;
}

impl ConfigBlock for ServerEntry {
    fn open(alias: String) -> Self {
        Self {
            alias,
            host: String::new(),
            user: None,
            port: None,
            identity: None,
            proxy: None,
        }
    }

    fn alias(&self) -> &str {
        &self.alias
    }

    fn assign(&mut self, key: &str, value: &str, line: usize) -> Result<(), ParseError> {
        match key {
            "host" => self.host = value.to_string(),
            "user" => self.user = Some(value.to_string()),
            "port" => self.port = Some(parse_port(value, line)?),
            "identity" => self.identity = Some(value.to_string()),
            "proxy" => self.proxy = Some(value.to_string()),
            _ => {
                return Err(ParseError::UnknownKey {
                    line,
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

impl ConfigBlock for ProxyEntry {
    fn open(alias: String) -> Self {
        Self {
            alias,
            host: String::new(),
            port: None,
            kind: ProxyKind::default(),
            user: None,
            password: None,
        }
    }

    fn alias(&self) -> &str {
        &self.alias
    }

    fn assign(&mut self, key: &str, value: &str, line: usize) -> Result<(), ParseError> {
        match key {
            "host" => self.host = value.to_string(),
            "port" => self.port = Some(parse_port(value, line)?),
            "type" => {
                self.kind = ProxyKind::from_config_value(value).ok_or_else(|| {
                    ParseError::InvalidProxyKind {
                        line,
                        value: value.to_string(),
                    }
                })?;
            }
            "user" => self.user = Some(value.to_string()),
            "password" => self.password = Some(value.to_string()),
            _ => {
                return Err(ParseError::UnknownKey {
                    line,
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn parse_port(value: &str, line: usize) -> Result<u16, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidPort {
        line,
        value: value.to_string(),
    })
}

fn parse_blocks<B: ConfigBlock>(input: &str) -> Result<Vec<B>, ParseError> {
    let mut entries: Vec<B> = Vec::new();
    // Open block plus the line it opened on, for the unterminated-block error
    let mut current: Option<(B, usize)> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line == "}" {
            match current.take() {
                Some((block, _)) => entries.push(block),
                None => return Err(ParseError::UnexpectedClosingBrace { line: line_num }),
            }
            continue;
        }

        if let Some((block, _)) = current.as_mut() {
            if line.ends_with('{') {
                return Err(ParseError::NestedBlock { line: line_num });
            }
            assign_pair(block, line, line_num)?;
            continue;
        }

        // Outside a block: only an opener is acceptable from here on
        let Some(brace) = line.find('{') else {
            return Err(ParseError::TextOutsideBlock {
                line: line_num,
                text: line.to_string(),
            });
        };

        let alias = line[..brace].trim();
        if alias.is_empty() {
            return Err(ParseError::MissingAlias { line: line_num });
        }
        if entries.iter().any(|e| e.alias() == alias) {
            return Err(ParseError::DuplicateAlias {
                line: line_num,
                alias: alias.to_string(),
            });
        }

        let mut block = B::open(alias.to_string());
        let rest = line[brace + 1..].trim();
        if rest.is_empty() {
            // `alias {` opener, body on the following lines
            current = Some((block, line_num));
        } else if let Some(inner) = rest.strip_suffix('}') {
            // Single-line block: `alias { key: value }`
            let inner = inner.trim();
            if !inner.is_empty() {
                assign_pair(&mut block, inner, line_num)?;
            }
            entries.push(block);
        } else {
            // `alias { key: value` with the closing brace further down
            assign_pair(&mut block, rest, line_num)?;
            current = Some((block, line_num));
        }
    }

    if let Some((block, opened)) = current {
        return Err(ParseError::UnterminatedBlock {
            line: opened,
            alias: block.alias().to_string(),
        });
    }

    Ok(entries)
}

fn assign_pair<B: ConfigBlock>(block: &mut B, line: &str, line_num: usize) -> Result<(), ParseError> {
    let Some((key, value)) = line.split_once(':') else {
        return Err(ParseError::MalformedPair { line: line_num });
    };
    block.assign(key.trim(), value.trim(), line_num)
}
