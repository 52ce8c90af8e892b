use ahash::HashSet;
use once_cell::sync::Lazy;

/// Names that must never be produced as generated identifiers: every keyword,
/// every future reserved word, and the value literals.
pub static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  [
    "arguments",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "undefined",
    "var",
    "void",
    "while",
    "with",
    "yield",
  ]
  .into_iter()
  .collect()
});

pub fn is_reserved_word(name: &str) -> bool {
  RESERVED_WORDS.contains(name)
}
