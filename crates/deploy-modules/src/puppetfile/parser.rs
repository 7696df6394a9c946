//! Line-oriented parser for the Puppetfile DSL
//!
//! Supports the declarations deployments actually use:
//!
//! ```text
//! forge 'https://forgeapi.puppetlabs.com'
//! moduledir 'thirdparty'
//! mod 'puppetlabs/stdlib', '4.25.1'
//! mod 'apache',
//!   :git => 'https://github.com/example/puppet-apache.git',
//!   :ref => 'v2.1.0'
//! mod 'ntp', git: 'https://github.com/example/puppet-ntp.git', branch: 'main'
//! ```

use std::collections::BTreeMap;

/// One statement of a Puppetfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Forge(String),
    Moduledir(String),
    Module {
        title: String,
        version: Option<String>,
        options: BTreeMap<String, String>,
    },
}

/// A parse failure at a 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Arg {
    Positional(String),
    Named(String, String),
}

/// Parse Puppetfile content into declarations paired with their line numbers.
pub fn parse(content: &str) -> Result<Vec<(usize, Declaration)>, ParseError> {
    let mut declarations = Vec::new();
    for (line, text) in logical_lines(content)? {
        declarations.push((line, parse_statement(line, &text)?));
    }
    Ok(declarations)
}

/// Join continuation lines (those ending in a comma) and drop comments.
fn logical_lines(content: &str) -> Result<Vec<(usize, String)>, ParseError> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }

        let (start, mut buffer) = pending.take().unwrap_or((line_no, String::new()));
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(text);

        if text.ends_with(',') {
            pending = Some((start, buffer));
        } else {
            lines.push((start, buffer));
        }
    }

    if let Some((start, _)) = pending {
        return Err(ParseError::new(start, "declaration ends with a trailing comma"));
    }
    Ok(lines)
}

fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    for (idx, c) in line.char_indices() {
        match (quote, c) {
            (None, '#') => return &line[..idx],
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            _ => {}
        }
    }
    line
}

fn parse_statement(line: usize, text: &str) -> Result<Declaration, ParseError> {
    let split = text
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(text.len());
    let (keyword, rest) = text.split_at(split);
    let mut rest = rest.trim();
    if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        rest = inner.trim();
    }

    let args = split_args(rest)
        .into_iter()
        .map(|arg| parse_arg(line, arg))
        .collect::<Result<Vec<_>, _>>()?;

    match keyword {
        "forge" => single_positional(line, keyword, &args).map(Declaration::Forge),
        "moduledir" => single_positional(line, keyword, &args).map(Declaration::Moduledir),
        "mod" => parse_module(line, args),
        other => Err(ParseError::new(line, format!("unknown declaration '{other}'"))),
    }
}

fn single_positional(line: usize, keyword: &str, args: &[Arg]) -> Result<String, ParseError> {
    match args {
        [Arg::Positional(value)] => Ok(value.clone()),
        _ => Err(ParseError::new(
            line,
            format!("'{keyword}' takes exactly one string argument"),
        )),
    }
}

fn parse_module(line: usize, args: Vec<Arg>) -> Result<Declaration, ParseError> {
    let mut positional = Vec::new();
    let mut options = BTreeMap::new();

    for arg in args {
        match arg {
            Arg::Positional(value) if options.is_empty() => positional.push(value),
            Arg::Positional(_) => {
                return Err(ParseError::new(line, "positional argument after options"));
            }
            Arg::Named(key, value) => {
                options.insert(key, value);
            }
        }
    }

    let mut positional = positional.into_iter();
    let title = positional
        .next()
        .ok_or_else(|| ParseError::new(line, "'mod' requires a module name"))?;
    let version = positional.next();
    if positional.next().is_some() {
        return Err(ParseError::new(line, format!("too many arguments for module '{title}'")));
    }

    Ok(Declaration::Module {
        title,
        version,
        options,
    })
}

/// Split on commas that are not inside quotes.
fn split_args(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, ',') => {
                parts.push(text[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}

fn parse_arg(line: usize, arg: &str) -> Result<Arg, ParseError> {
    if arg.starts_with('\'') || arg.starts_with('"') {
        return unquote(line, arg).map(Arg::Positional);
    }

    if let Some(symbol) = arg.strip_prefix(':') {
        if let Some((key, value)) = symbol.split_once("=>") {
            return Ok(Arg::Named(key.trim().to_string(), parse_value(line, value.trim())?));
        }
        return Ok(Arg::Positional(symbol.trim().to_string()));
    }

    if let Some((key, value)) = arg.split_once(':')
        && !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Ok(Arg::Named(key.to_string(), parse_value(line, value.trim())?));
    }

    Err(ParseError::new(line, format!("unexpected argument '{arg}'")))
}

fn parse_value(line: usize, value: &str) -> Result<String, ParseError> {
    if value.starts_with('\'') || value.starts_with('"') {
        unquote(line, value)
    } else if let Some(symbol) = value.strip_prefix(':') {
        Ok(symbol.to_string())
    } else if !value.is_empty() {
        Ok(value.to_string())
    } else {
        Err(ParseError::new(line, "missing option value"))
    }
}

fn unquote(line: usize, text: &str) -> Result<String, ParseError> {
    let mut chars = text.chars();
    let quote = chars
        .next()
        .ok_or_else(|| ParseError::new(line, "expected a quoted string"))?;
    let body = &text[quote.len_utf8()..];
    match body.find(quote) {
        Some(end) if end + quote.len_utf8() == body.len() => Ok(body[..end].to_string()),
        Some(_) => Err(ParseError::new(line, format!("unexpected text after {text}"))),
        None => Err(ParseError::new(line, format!("unterminated string {text}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_forge_module_with_version() {
        let parsed = parse("mod 'puppetlabs/stdlib', '4.25.1'").unwrap();
        assert_eq!(
            parsed,
            vec![(
                1,
                Declaration::Module {
                    title: "puppetlabs/stdlib".to_string(),
                    version: Some("4.25.1".to_string()),
                    options: BTreeMap::new(),
                }
            )]
        );
    }

    #[test]
    fn test_hash_rocket_options_across_lines() {
        let content = "\
# modules
mod 'apache',
  :git => 'https://example.com/apache.git',
  :ref => 'v2.1.0'
";
        let parsed = parse(content).unwrap();
        assert_eq!(
            parsed,
            vec![(
                2,
                Declaration::Module {
                    title: "apache".to_string(),
                    version: None,
                    options: options(&[
                        ("git", "https://example.com/apache.git"),
                        ("ref", "v2.1.0"),
                    ]),
                }
            )]
        );
    }

    #[test]
    fn test_keyword_options_and_parentheses() {
        let parsed = parse("mod('ntp', git: \"https://example.com/ntp.git\", branch: 'main')").unwrap();
        let Declaration::Module { options: opts, .. } = &parsed[0].1 else {
            panic!("expected module, got {:?}", parsed[0].1);
        };
        assert_eq!(
            opts,
            &options(&[("branch", "main"), ("git", "https://example.com/ntp.git")])
        );
    }

    #[test]
    fn test_forge_and_moduledir() {
        let parsed = parse("forge \"https://forge.example.com\"\nmoduledir 'thirdparty'\n").unwrap();
        assert_eq!(
            parsed,
            vec![
                (1, Declaration::Forge("https://forge.example.com".to_string())),
                (2, Declaration::Moduledir("thirdparty".to_string())),
            ]
        );
    }

    #[test]
    fn test_hash_inside_quotes_is_not_comment() {
        let parsed = parse("mod 'x/y', :git => 'https://example.com/#frag' # trailing").unwrap();
        let Declaration::Module { options: opts, .. } = &parsed[0].1 else {
            panic!("expected module");
        };
        assert_eq!(opts["git"], "https://example.com/#frag");
    }

    #[test]
    fn test_symbol_version() {
        let parsed = parse("mod 'puppetlabs/stdlib', :latest").unwrap();
        let Declaration::Module { version, .. } = &parsed[0].1 else {
            panic!("expected module");
        };
        assert_eq!(version.as_deref(), Some("latest"));
    }

    #[test]
    fn test_unknown_keyword_reports_line() {
        let err = parse("\n\nfrobnicate 'x'").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("frobnicate"));
    }

    #[test]
    fn test_dangling_comma_is_error() {
        let err = parse("mod 'apache',\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert!(parse("mod 'apache").is_err());
    }

    #[test]
    fn test_mod_without_name_is_error() {
        assert!(parse("mod :git => 'x'").is_err());
    }
}
