//! Bridge module synthesis.
//!
//! A bridge module is a synthetic ESM source that re-exports symbols from
//! a CommonJS-shaped package so downstream ESM-only consumers can import
//! it directly. Two fixed templates exist, selected by the package's
//! interop shape:
//!
//! - A module produced by an ESM-aware toolchain already separates
//!   `default` from named bindings cleanly, so the bridge re-exports the
//!   fields as is.
//! - A plain CommonJS module has no such separation, so the bridge
//!   synthesizes the `__esModule` marker and re-exports the whole loaded
//!   object as `default` while still exposing named fields.
//!
//! Generation is deterministic: same package name and symbol surface,
//! byte-identical output.

use std::fmt;

use crate::introspect::SymbolSurface;
use crate::{Error, Result};

/// Generated bridge source text. Owned by a single orchestrator run;
/// persisted only as a temporary build input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeSource(String);

impl BridgeSource {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BridgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Words that cannot appear as destructured binding names.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true",
    "try", "typeof", "var", "void", "while", "with",
];

fn is_valid_identifier(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    let leading_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$');
    leading_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&symbol)
}

/// Escape a package name for use inside a single-quoted string literal.
fn escape_pkg_name(pkg_name: &str) -> String {
    pkg_name.replace('\\', "\\\\").replace('\'', "\\'")
}

fn named_block(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("\t{name}"))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Synthesize the bridge source for one re-exported package.
///
/// `default` never appears among the named re-exports; it is bound
/// separately by each template.
pub fn synthesize(pkg_name: &str, surface: &SymbolSurface) -> Result<BridgeSource> {
    let named: Vec<&str> = surface.named().collect();

    for symbol in &named {
        if !is_valid_identifier(symbol) {
            return Err(Error::InvalidSymbol {
                package: pkg_name.to_string(),
                symbol: symbol.to_string(),
            });
        }
    }

    let pkg = escape_pkg_name(pkg_name);
    let fields = named_block(&named);

    let source = if surface.es_module {
        format!(
            "const x = require('{pkg}');\n\
             \n\
             const {{\n\
             \tdefault: def,\n\
             {fields}\n\
             }} = x;\n\
             \n\
             export {{\n\
             \tdef as default,\n\
             {fields}\n\
             }};\n"
        )
    } else {
        format!(
            "const x = require('{pkg}');\n\
             \n\
             const {{\n\
             {fields}\n\
             }} = x;\n\
             \n\
             const __esModule = true;\n\
             \n\
             export {{\n\
             \t__esModule,\n\
             \tx as default,\n\
             {fields}\n\
             }};\n"
        )
    };

    Ok(BridgeSource(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commonjs_shaped_bridge() {
        let surface = SymbolSurface::declared(["a", "b"], false);
        let bridge = synthesize("some-pkg", &surface).unwrap();

        assert_eq!(
            bridge.as_str(),
            "const x = require('some-pkg');\n\
             \n\
             const {\n\
             \ta,\n\
             \tb\n\
             } = x;\n\
             \n\
             const __esModule = true;\n\
             \n\
             export {\n\
             \t__esModule,\n\
             \tx as default,\n\
             \ta,\n\
             \tb\n\
             };\n"
        );
    }

    #[test]
    fn esm_shaped_bridge() {
        let surface = SymbolSurface::declared(["a", "b"], true);
        let bridge = synthesize("some-pkg", &surface).unwrap();

        assert_eq!(
            bridge.as_str(),
            "const x = require('some-pkg');\n\
             \n\
             const {\n\
             \tdefault: def,\n\
             \ta,\n\
             \tb\n\
             } = x;\n\
             \n\
             export {\n\
             \tdef as default,\n\
             \ta,\n\
             \tb\n\
             };\n"
        );
    }

    #[test]
    fn esm_bridge_adds_no_marker() {
        let surface = SymbolSurface::declared(["a"], true);
        let bridge = synthesize("pkg", &surface).unwrap();
        assert!(!bridge.as_str().contains("__esModule"));
    }

    #[test]
    fn default_is_never_a_named_binding() {
        let surface = SymbolSurface::declared(["default", "a"], false);
        let bridge = synthesize("pkg", &surface).unwrap();
        assert!(!bridge.as_str().contains("\tdefault,"));
        assert!(bridge.as_str().contains("\tx as default,"));
    }

    #[test]
    fn invalid_symbol_is_rejected() {
        let surface = SymbolSurface::declared(["a-b"], false);
        let err = synthesize("pkg", &surface).unwrap_err();
        match err {
            Error::InvalidSymbol { symbol, .. } => assert_eq!(symbol, "a-b"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reserved_word_is_rejected() {
        let surface = SymbolSurface::declared(["class"], false);
        assert!(synthesize("pkg", &surface).is_err());
    }

    #[test]
    fn scoped_package_name_is_quoted_verbatim() {
        let surface = SymbolSurface::declared(["a"], false);
        let bridge = synthesize("@scope/pkg", &surface).unwrap();
        assert!(bridge.as_str().starts_with("const x = require('@scope/pkg');\n"));
    }

    #[test]
    fn synthesis_is_deterministic() {
        let surface = SymbolSurface::declared(["a", "b"], false);
        let first = synthesize("pkg", &surface).unwrap();
        let second = synthesize("pkg", &surface).unwrap();
        assert_eq!(first, second);
    }
}
