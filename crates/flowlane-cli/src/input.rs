//! Node list loading for command arguments.
//!
//! `-` reads JSON from stdin. Files ending in `.yaml` or `.yml` are parsed
//! as YAML, everything else as JSON.

use anyhow::{Context, Result};
use flowlane_core::GraphNode;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syntax {
    Json,
    Yaml,
}

fn syntax_for(path: &Path) -> Syntax {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("yaml" | "yml") => Syntax::Yaml,
        _ => Syntax::Json,
    }
}

fn parse(content: &str, syntax: Syntax) -> Result<Vec<GraphNode>> {
    match syntax {
        Syntax::Json => Ok(serde_json::from_str(content)?),
        Syntax::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

/// Load a node list from `path`, or from stdin when `path` is `-`.
pub fn read_nodes(path: &Path) -> Result<Vec<GraphNode>> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read node list from stdin")?;
        return parse(&content, Syntax::Json).context("Failed to parse node list from stdin");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let syntax = syntax_for(path);
    let nodes =
        parse(&content, syntax).with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), nodes = nodes.len(), ?syntax, "node list loaded");
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn syntax_follows_extension() {
        assert_eq!(syntax_for(Path::new("g.yaml")), Syntax::Yaml);
        assert_eq!(syntax_for(Path::new("g.YML")), Syntax::Yaml);
        assert_eq!(syntax_for(Path::new("g.json")), Syntax::Json);
        assert_eq!(syntax_for(Path::new("graph")), Syntax::Json);
    }

    #[test]
    fn reads_yaml_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("graph.yaml");
        std::fs::write(
            &path,
            "- id: a\n  nextIds: [b]\n- id: b\n",
        )
        .expect("write");
        let nodes = read_nodes(&path).expect("read");
        assert_eq!(nodes, vec![GraphNode::new("a", ["b"]), GraphNode::sink("b")]);
    }

    #[test]
    fn reads_json_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("graph.json");
        std::fs::write(&path, r#"[{"id":"a","nextIds":[]}]"#).expect("write");
        assert_eq!(read_nodes(&path).expect("read"), vec![GraphNode::sink("a")]);
    }

    #[test]
    fn bad_json_names_the_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").expect("write");
        let err = read_nodes(&path).expect_err("must fail");
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
