use serde::Deserialize;
use serde::Serialize;

/// Closed set of operators the tree can carry. This only needs to cover what
/// the analyses and tests exercise; it is not a full precedence table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  BitwiseAnd,
  BitwiseOr,
  BitwiseXor,
  Division,
  Equality,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  Multiplication,
  Negation,
  NullishCoalescing,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  Void,
}

impl OperatorName {
  pub fn as_str(&self) -> &'static str {
    match self {
      OperatorName::Addition => "+",
      OperatorName::Assignment => "=",
      OperatorName::AssignmentAddition => "+=",
      OperatorName::BitwiseAnd => "&",
      OperatorName::BitwiseOr => "|",
      OperatorName::BitwiseXor => "^",
      OperatorName::Division => "/",
      OperatorName::Equality => "==",
      OperatorName::GreaterThan => ">",
      OperatorName::GreaterThanOrEqual => ">=",
      OperatorName::In => " in ",
      OperatorName::Inequality => "!=",
      OperatorName::Instanceof => " instanceof ",
      OperatorName::LessThan => "<",
      OperatorName::LessThanOrEqual => "<=",
      OperatorName::LogicalAnd => "&&",
      OperatorName::LogicalNot => "!",
      OperatorName::LogicalOr => "||",
      OperatorName::Multiplication => "*",
      OperatorName::Negation => "-",
      OperatorName::NullishCoalescing => "??",
      OperatorName::Remainder => "%",
      OperatorName::StrictEquality => "===",
      OperatorName::StrictInequality => "!==",
      OperatorName::Subtraction => "-",
      OperatorName::Typeof => "typeof ",
      OperatorName::Void => "void ",
    }
  }
}
