//! buildpack.toml parser

use crate::parser::error::ParseError;
use crate::parser::types::{BuildpackDescriptor, DependencyConstraint, DescriptorDependency};
use tracing::warn;

/// Parser for the `[[metadata.dependencies]]` and
/// `[[metadata.dependency-constraints]]` sections of buildpack.toml
pub struct BuildpackTomlParser;

impl BuildpackTomlParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, content: &str) -> Result<BuildpackDescriptor, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_toml_ng::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set TOML language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse TOML content");
            ParseError::ParseFailed("Failed to parse TOML".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::InvalidSyntax(
                "buildpack.toml contains malformed TOML".to_string(),
            ));
        }

        let mut descriptor = BuildpackDescriptor::default();
        let mut cursor = root.walk();

        for child in root.children(&mut cursor) {
            if child.kind() != "table_array_element" {
                continue;
            }

            match Self::table_name(child, content).as_deref() {
                Some(Self::DEPENDENCIES_TABLE) => {
                    let pairs = Self::collect_pairs(child, content);
                    if let (Some(id), Some(version)) = (pairs.get("id"), pairs.get("version")) {
                        descriptor.dependencies.push(DescriptorDependency {
                            id: id.clone(),
                            version: version.clone(),
                        });
                    }
                }
                Some(Self::CONSTRAINTS_TABLE) => {
                    let pairs = Self::collect_pairs(child, content);
                    if let (Some(id), Some(constraint)) = (pairs.get("id"), pairs.get("constraint"))
                    {
                        let patches = match pairs.get("patches") {
                            Some(raw) => raw.parse().map_err(|_| {
                                ParseError::InvalidSyntax(format!(
                                    "patches must be a non-negative integer, got {raw}"
                                ))
                            })?,
                            None => 1,
                        };
                        descriptor.constraints.push(DependencyConstraint {
                            id: id.clone(),
                            constraint: constraint.clone(),
                            patches,
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(descriptor)
    }
}

impl Default for BuildpackTomlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildpackTomlParser {
    const DEPENDENCIES_TABLE: &'static str = "metadata.dependencies";
    const CONSTRAINTS_TABLE: &'static str = "metadata.dependency-constraints";

    /// Header name of an array-of-tables element, with whitespace around dots removed
    fn table_name(node: tree_sitter::Node, content: &str) -> Option<String> {
        let mut cursor = node.walk();
        let key = node
            .children(&mut cursor)
            .find(|child| matches!(child.kind(), "bare_key" | "dotted_key" | "quoted_key"))?;

        Some(
            content[key.byte_range()]
                .split('.')
                .map(|part| Self::unquote(part.trim()))
                .collect::<Vec<_>>()
                .join("."),
        )
    }

    /// Scalar `key = value` pairs of a table, values unquoted
    fn collect_pairs(
        node: tree_sitter::Node,
        content: &str,
    ) -> std::collections::HashMap<String, String> {
        let mut pairs = std::collections::HashMap::new();
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            if child.kind() != "pair" {
                continue;
            }

            let mut pair_cursor = child.walk();
            let mut key: Option<String> = None;

            for pair_child in child.children(&mut pair_cursor) {
                match pair_child.kind() {
                    "bare_key" | "quoted_key" => {
                        key = Some(Self::unquote(&content[pair_child.byte_range()]));
                    }
                    "string" | "integer" => {
                        if let Some(key) = key.take() {
                            let value = Self::unquote(&content[pair_child.byte_range()]);
                            pairs.insert(key, value);
                        }
                    }
                    _ => {}
                }
            }
        }

        pairs
    }

    fn unquote(text: &str) -> String {
        text.trim()
            .trim_start_matches(['"', '\''])
            .trim_end_matches(['"', '\''])
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILDPACK_TOML: &str = r#"api = "0.7"

[buildpack]
  id = "paketo-buildpacks/icu"
  name = "Paketo Buildpack for ICU"

[metadata]
  include-files = ["bin/build", "bin/detect", "buildpack.toml"]

  [[metadata.dependencies]]
    cpe = "cpe:2.3:a:icu-project:international_components_for_unicode:72.1:*:*:*:*:c\\/c\\+\\+:*:*"
    id = "icu"
    name = "ICU"
    stacks = ["io.buildpacks.stacks.jammy"]
    version = "72.1.0"

  [[metadata.dependencies]]
    id = "icu"
    stacks = ["io.buildpacks.stacks.noble"]
    version = "73.2.0"

  [[metadata.dependency-constraints]]
    constraint = "*"
    id = "icu"
    patches = 2

[[stacks]]
  id = "io.buildpacks.stacks.jammy"
"#;

    #[test]
    fn parse_extracts_dependencies_and_constraints() {
        let descriptor = BuildpackTomlParser::new().parse(BUILDPACK_TOML).unwrap();

        assert_eq!(
            descriptor,
            BuildpackDescriptor {
                dependencies: vec![
                    DescriptorDependency {
                        id: "icu".to_string(),
                        version: "72.1.0".to_string(),
                    },
                    DescriptorDependency {
                        id: "icu".to_string(),
                        version: "73.2.0".to_string(),
                    },
                ],
                constraints: vec![DependencyConstraint {
                    id: "icu".to_string(),
                    constraint: "*".to_string(),
                    patches: 2,
                }],
            }
        );
    }

    #[test]
    fn parse_defaults_patches_to_one() {
        let content = r#"[[metadata.dependency-constraints]]
constraint = "72.*"
id = "icu"
"#;
        let descriptor = BuildpackTomlParser::new().parse(content).unwrap();
        assert_eq!(descriptor.constraints[0].patches, 1);
    }

    #[test]
    fn parse_returns_empty_descriptor_without_metadata() {
        let content = r#"api = "0.7"

[buildpack]
id = "paketo-buildpacks/icu"
"#;
        let descriptor = BuildpackTomlParser::new().parse(content).unwrap();
        assert_eq!(descriptor, BuildpackDescriptor::default());
    }

    #[test]
    fn parse_ignores_other_table_arrays() {
        let content = r#"[[stacks]]
id = "io.buildpacks.stacks.jammy"
version = "1.0.0"
"#;
        let descriptor = BuildpackTomlParser::new().parse(content).unwrap();
        assert!(descriptor.dependencies.is_empty());
    }

    #[test]
    fn parse_rejects_malformed_toml() {
        let result = BuildpackTomlParser::new().parse("[[metadata.dependencies]\nid = ");
        assert!(matches!(result, Err(ParseError::InvalidSyntax(_))));
    }

    #[test]
    fn descriptor_versions_for_filters_by_id() {
        let content = r#"[[metadata.dependencies]]
id = "icu"
version = "72.1.0"

[[metadata.dependencies]]
id = "other"
version = "1.0.0"
"#;
        let descriptor = BuildpackTomlParser::new().parse(content).unwrap();
        assert_eq!(descriptor.versions_for("icu"), vec!["72.1.0"]);
    }
}
