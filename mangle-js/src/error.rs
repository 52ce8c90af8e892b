use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use syntax_js::loc::Loc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScopeErrorType {
  /// Incompatible repeated declaration of one name in the same effective
  /// scope, e.g. `let` twice in a block, or `let` mixed with `var`.
  Redeclaration,
  /// A label name that is already active in the enclosing function.
  DuplicateLabel,
  /// `break` or `continue` referring to a label that is not currently active.
  UndefinedLabel,
  /// `import` or `export` outside the top level.
  MisplacedModuleSyntax,
}

/// A structural error that aborts analysis of the entire compile unit. There
/// is no partial recovery; any scope state built so far must be discarded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScopeError {
  pub typ: ScopeErrorType,
  pub loc: Loc,
}

impl ScopeError {
  pub fn new(typ: ScopeErrorType, loc: Loc) -> ScopeError {
    ScopeError { typ, loc }
  }
}

impl Display for ScopeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let what = match self.typ {
      ScopeErrorType::Redeclaration => "redeclaration of a block-scoped name",
      ScopeErrorType::DuplicateLabel => "label is already in use",
      ScopeErrorType::UndefinedLabel => "jump to a label that is not in scope",
      ScopeErrorType::MisplacedModuleSyntax => "import/export must be at the top level",
    };
    write!(f, "{} [{}:{}]", what, self.loc.0, self.loc.1)
  }
}

impl Error for ScopeError {}

pub type ScopeResult<T> = Result<T, ScopeError>;
