use crate::error::{HornetError, Result};
use regex::Regex;

/// A compiled path template such as `/pets/{petId}`
#[derive(Debug, Clone)]
pub(crate) struct PathTemplate {
    pub template: String,
    pattern: Regex,
    literal_segments: usize,
}

impl PathTemplate {
    pub fn compile(template: &str) -> Result<Self> {
        let mut pattern = String::from("^");
        let mut literal_segments = 0;

        for segment in template.split('/').filter(|s| !s.is_empty()) {
            pattern.push('/');
            if !segment.contains('{') {
                literal_segments += 1;
            }
            push_segment(&mut pattern, segment, template)?;
        }

        if pattern == "^" {
            pattern.push('/');
        }
        pattern.push('$');

        let pattern = Regex::new(&pattern).map_err(|e| {
            HornetError::ContractError(format!("Invalid path template '{}': {}", template, e))
        })?;

        Ok(Self {
            template: template.to_string(),
            pattern,
            literal_segments,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// Translate one segment, which may mix literals and `{name}` placeholders
/// (`{id}.json`), into regex syntax.
fn push_segment(pattern: &mut String, segment: &str, template: &str) -> Result<()> {
    let mut rest = segment;

    while let Some(start) = rest.find('{') {
        pattern.push_str(&regex::escape(&rest[..start]));

        let Some(end) = rest[start..].find('}') else {
            return Err(HornetError::ContractError(format!(
                "Unclosed parameter in path template '{}'",
                template
            )));
        };

        pattern.push_str("[^/]+");
        rest = &rest[start + end + 1..];
    }

    pattern.push_str(&regex::escape(rest));
    Ok(())
}

/// Match concrete request paths against the declared templates.
#[derive(Debug, Clone, Default)]
pub(crate) struct PathRouter {
    templates: Vec<PathTemplate>,
    base_paths: Vec<String>,
}

impl PathRouter {
    pub fn new(templates: Vec<PathTemplate>, base_paths: Vec<String>) -> Self {
        let mut templates = templates;
        // Concrete paths (`/pets/mine`) take precedence over templated ones (`/pets/{id}`).
        templates.sort_by(|a, b| {
            b.literal_segments
                .cmp(&a.literal_segments)
                .then_with(|| a.template.cmp(&b.template))
        });

        Self {
            templates,
            base_paths,
        }
    }

    /// Return the template matching `path`, trying the path as given first and
    /// then with each server base path removed.
    pub fn find(&self, path: &str) -> Option<&str> {
        let path = path.split('?').next().unwrap_or(path);

        self.candidates(path).find_map(|candidate| {
            self.templates
                .iter()
                .find(|t| t.matches(&candidate))
                .map(|t| t.template.as_str())
        })
    }

    fn candidates<'a>(&'a self, path: &'a str) -> impl Iterator<Item = String> + 'a {
        std::iter::once(path.to_string()).chain(self.base_paths.iter().filter_map(move |base| {
            let rest = path.strip_prefix(base.as_str())?;
            if rest.is_empty() {
                Some("/".to_string())
            } else if rest.starts_with('/') {
                Some(rest.to_string())
            } else {
                None
            }
        }))
    }
}

/// Extract the path component of a server URL (`https://api.example.com/v1` -> `/v1`).
///
/// Returns `None` when the server adds no base path.
pub(crate) fn server_base_path(url: &str) -> Option<String> {
    let path = match url.find("://") {
        Some(scheme_end) => {
            let after_scheme = &url[scheme_end + 3..];
            &after_scheme[after_scheme.find('/')?..]
        }
        None => url,
    };

    let path = path.trim_end_matches('/');
    if path.is_empty() || !path.starts_with('/') || path.contains('{') {
        return None;
    }
    Some(path.to_string())
}
