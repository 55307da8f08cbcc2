//! Content sniffing: tell parameterized templates apart from plain manifests.
use std::io::Read;

use serde::Deserialize;

/// Resource kind that marks a manifest as a template needing `oc process`.
pub const TEMPLATE_KIND: &str = "Template";

/// The only part of an object manifest the sniffer cares about.
#[derive(Debug, Deserialize)]
struct TypeMeta {
    #[serde(default)]
    kind: Option<String>,
}

/// Return `true` if the first document read from `reader` is a `Template`.
///
/// Empty input, prose, unreadable streams and malformed documents are all
/// reported as "not a template"; this never fails.
///
/// # Examples
///
/// ```
/// use applyconfig::sniff::is_template;
///
/// assert!(is_template("apiVersion: v1\nkind: Template\n".as_bytes()));
/// assert!(!is_template("kind: Route\n".as_bytes()));
/// assert!(!is_template(&b""[..]));
/// ```
pub fn is_template(mut reader: impl Read) -> bool {
    let mut content = Vec::new();
    if reader.read_to_end(&mut content).is_err() {
        return false;
    }

    let Some(document) = serde_yaml_ng::Deserializer::from_slice(&content).next() else {
        return false;
    };

    TypeMeta::deserialize(document)
        .ok()
        .and_then(|meta| meta.kind)
        .is_some_and(|kind| kind == TEMPLATE_KIND)
}
