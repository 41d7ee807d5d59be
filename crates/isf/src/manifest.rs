use serde::Deserialize;
use tracing::warn;

/// Metadata block from the top of an ISF shader.
///
/// ISF files conventionally open with a `/*{ ... }*/` comment holding a
/// JSON object. The block is informational here: the source is compiled
/// unmodified whether or not it parses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IsfManifest {
    #[serde(rename = "DESCRIPTION")]
    pub description: Option<String>,
    #[serde(rename = "CREDIT")]
    pub credit: Option<String>,
    #[serde(rename = "CATEGORIES", default)]
    pub categories: Vec<String>,
    #[serde(rename = "INPUTS", default)]
    pub inputs: Vec<IsfInput>,
    #[serde(rename = "PASSES", default)]
    pub passes: Vec<serde_json::Value>,
}

/// One entry of the manifest's `INPUTS` array.
#[derive(Debug, Clone, Deserialize)]
pub struct IsfInput {
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "TYPE", default)]
    pub kind: String,
}

impl IsfManifest {
    pub fn input_names(&self) -> Vec<&str> {
        self.inputs.iter().map(|input| input.name.as_str()).collect()
    }

    /// Logs a warning for each manifest feature the renderer ignores.
    pub fn warn_unsupported(&self) {
        if !self.inputs.is_empty() {
            warn!(
                inputs = self.inputs.len(),
                names = ?self.input_names(),
                "shader declares INPUTS; parameter inputs are not supported and are ignored"
            );
        }
        if self.passes.len() > 1 {
            warn!(
                passes = self.passes.len(),
                "shader declares multiple PASSES; only a single pass is rendered"
            );
        }
    }
}

/// Extracts and parses the first `/*{ ... }*/` block, if any.
///
/// A missing or malformed block yields `None`; malformed JSON is logged
/// since it usually means a typo in a hand-edited shader.
pub fn parse_manifest(source: &str) -> Option<IsfManifest> {
    let start = source.find("/*")?;
    let end = start + source[start..].find("*/")?;
    let body = source[start + 2..end].trim();
    if !body.starts_with('{') {
        return None;
    }

    match serde_json::from_str(body) {
        Ok(manifest) => Some(manifest),
        Err(err) => {
            warn!(%err, "ignoring malformed ISF metadata block");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHADER: &str = r#"/*{
        "DESCRIPTION": "swirling plasma",
        "CREDIT": "demo",
        "CATEGORIES": ["GENERATOR"],
        "INPUTS": [
            { "NAME": "speed", "TYPE": "float" },
            { "NAME": "tint", "TYPE": "color" }
        ]
    }*/

    void main() {
        gl_FragColor = vec4(TIME, 0.0, 0.0, 1.0);
    }
    "#;

    #[test]
    fn parses_metadata_block() {
        let manifest = parse_manifest(SHADER).expect("manifest");
        assert_eq!(manifest.description.as_deref(), Some("swirling plasma"));
        assert_eq!(manifest.credit.as_deref(), Some("demo"));
        assert_eq!(manifest.categories, vec!["GENERATOR".to_string()]);
        assert_eq!(manifest.input_names(), vec!["speed", "tint"]);
        assert_eq!(manifest.inputs[0].kind, "float");
    }

    #[test]
    fn shader_without_block_yields_none() {
        assert!(parse_manifest("void main() { gl_FragColor = vec4(1.0); }").is_none());
    }

    #[test]
    fn plain_comment_is_not_a_manifest() {
        assert!(parse_manifest("/* just a note */\nvoid main() {}").is_none());
    }

    #[test]
    fn malformed_json_yields_none() {
        assert!(parse_manifest("/*{ \"DESCRIPTION\": }*/ void main() {}").is_none());
    }

    #[test]
    fn empty_passes_and_inputs_by_default() {
        let manifest = parse_manifest("/*{ \"DESCRIPTION\": \"bare\" }*/").expect("manifest");
        assert!(manifest.inputs.is_empty());
        assert!(manifest.passes.is_empty());
    }
}
