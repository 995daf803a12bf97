use crate::contract::ParameterSpec;
use http::HeaderMap;

/// What the request carried for one declared header parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SentValue {
    Absent,
    /// All field lines for the name, joined with `,`
    Text(String),
    /// Bytes that are not valid UTF-8
    Opaque,
}

#[derive(Debug, Clone)]
pub struct DeclaredHeader<'a> {
    pub param: &'a ParameterSpec,
    pub value: SentValue,
}

/// Pairing of declared header parameters with the headers of a request
#[derive(Debug, Clone)]
pub struct HeaderResolution<'a> {
    /// Declared parameters in declaration order
    pub declared: Vec<DeclaredHeader<'a>>,
    /// Request header names with no declared counterpart
    pub undeclared: Vec<String>,
}

/// Match request headers to declared parameters, ignoring case.
pub fn resolve_headers<'a>(
    headers: &HeaderMap,
    declared: &[&'a ParameterSpec],
) -> HeaderResolution<'a> {
    let declared_headers = declared
        .iter()
        .copied()
        .map(|param| DeclaredHeader {
            param,
            value: sent_value(headers, &param.name),
        })
        .collect();

    let undeclared = headers
        .keys()
        .map(|name| name.as_str())
        .filter(|name| !declared.iter().any(|p| p.matches_name(name)))
        .map(str::to_string)
        .collect();

    HeaderResolution {
        declared: declared_headers,
        undeclared,
    }
}

fn sent_value(headers: &HeaderMap, name: &str) -> SentValue {
    let mut lines = headers.get_all(name).iter().peekable();
    if lines.peek().is_none() {
        return SentValue::Absent;
    }

    let mut parts = vec![];
    for line in lines {
        match std::str::from_utf8(line.as_bytes()) {
            Ok(text) => parts.push(text),
            Err(_) => return SentValue::Opaque,
        }
    }
    SentValue::Text(parts.join(","))
}
