use crate::error::{HornetError, Result};
use oas3::OpenApiV3Spec;
use std::fs;
use std::path::Path;

/// Load an OpenAPI specification from a YAML or JSON file
pub fn load_openapi<P: AsRef<Path>>(path: P) -> Result<OpenApiV3Spec> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        HornetError::OpenApiLoadError(format!("Failed to read file {}: {}", path.display(), e))
    })?;

    parse_openapi(&content)
}

/// Parse an OpenAPI specification held in memory.
///
/// YAML is a superset of JSON, so both encodings go through `serde_yaml`.
/// A document without an `info` object is accepted with a placeholder one.
pub fn parse_openapi(content: &str) -> Result<OpenApiV3Spec> {
    let parse_error =
        |e: serde_yaml::Error| HornetError::OpenApiLoadError(format!("Failed to parse OpenAPI document: {}", e));

    let mut raw: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
    if let Some(root) = raw.as_mapping_mut() {
        if !root.contains_key("info") {
            tracing::debug!("OpenAPI document has no info object, using a placeholder");
            root.insert("info".into(), placeholder_info());
        }
    }

    let spec: OpenApiV3Spec = serde_yaml::from_value(raw).map_err(parse_error)?;

    validate_openapi(&spec)?;

    Ok(spec)
}

fn placeholder_info() -> serde_yaml::Value {
    let mut info = serde_yaml::Mapping::new();
    info.insert("title".into(), "Untitled".into());
    info.insert("version".into(), "0.0.0".into());
    serde_yaml::Value::Mapping(info)
}

fn validate_openapi(spec: &OpenApiV3Spec) -> Result<()> {
    if !spec.openapi.starts_with("3.0") && !spec.openapi.starts_with("3.1") {
        return Err(HornetError::ValidationError(format!(
            "Unsupported OpenAPI version: {}. Only 3.0.x and 3.1.x are supported.",
            spec.openapi
        )));
    }

    if spec.paths.as_ref().is_none_or(|p| p.is_empty()) {
        return Err(HornetError::ValidationError(
            "OpenAPI spec must have at least one path".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_openapi() {
        let yaml = r#"
openapi: 3.1.0
info:
  title: Vending API
  version: 1.0.0
paths:
  /vending/drinks:
    get:
      parameters:
        - name: coffeeCups
          in: header
          schema:
            type: number
      responses:
        '200':
          description: OK
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let spec = load_openapi(file.path()).unwrap();
        assert_eq!(spec.info.title, "Vending API");
        assert_eq!(spec.openapi, "3.1.0");
    }

    #[test]
    fn test_load_json_document() {
        let json = r#"{
  "openapi": "3.0.3",
  "info": { "title": "Json API", "version": "1.0.0" },
  "paths": { "/ping": { "get": { "responses": { "200": { "description": "OK" } } } } }
}"#;

        let spec = parse_openapi(json).unwrap();
        assert_eq!(spec.info.title, "Json API");
    }

    #[test]
    fn test_document_without_info() {
        let yaml = r#"openapi: 3.1.0
paths:
  /bish/bosh:
    get:
      parameters:
        - name: bash
          in: header
          required: true
          schema:
            type: string
"#;

        let spec = parse_openapi(yaml).unwrap();
        assert_eq!(spec.info.title, "Untitled");
        assert!(spec.paths.unwrap().contains_key("/bish/bosh"));
    }

    #[test]
    fn test_load_invalid_version() {
        let yaml = r#"
openapi: 2.0.0
info:
  title: Test API
  version: 1.0.0
paths:
  /test:
    get:
      responses:
        '200':
          description: OK
"#;

        assert!(matches!(
            parse_openapi(yaml),
            Err(HornetError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_no_paths() {
        let yaml = r#"
openapi: 3.0.0
info:
  title: Test API
  version: 1.0.0
paths: {}
"#;

        assert!(parse_openapi(yaml).is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_openapi("/nonexistent/file.yaml");
        assert!(matches!(result, Err(HornetError::OpenApiLoadError(_))));
    }
}
