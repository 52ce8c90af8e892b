use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// Each variant wraps Node<T> so that visitors can target Node<IdPat> etc.
// directly and find associated data on the inner node.
#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum Pat {
  Arr(Node<ArrPat>),
  Id(Node<IdPat>),
  Obj(Node<ObjPat>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrPatElem {
  pub target: Node<Pat>,
  pub default_value: Option<Node<Expr>>,
}

// Unnamed elements can exist (holes in `[a, , b]`).
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrPat {
  pub elements: Vec<Option<ArrPatElem>>,
  pub rest: Option<Node<Pat>>,
}

// Not really a pattern but functions similarly so kept here in pat.rs.
// This exists as a separate node type so renaming can target it directly.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrFuncName {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}

// For an object pattern, `...` must be followed by an identifier.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPat {
  pub properties: Vec<Node<ObjPatProp>>,
  pub rest: Option<Node<IdPat>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPatProp {
  pub key: ClassOrObjKey,
  // If `shorthand`, `key` is Direct and `target` is an identifier pattern of
  // the same name. This way there is always an IdPat that can be visited.
  pub target: Node<Pat>,
  #[drive(skip)]
  pub shorthand: bool,
  pub default_value: Option<Node<Expr>>,
}
