pub mod pat;

use self::pat::ArrPat;
use self::pat::ClassOrFuncName;
use self::pat::IdPat;
use self::pat::ObjPat;
use super::class_or_object::ClassMember;
use super::class_or_object::ObjMember;
use super::func::Func;
use super::node::Node;
use crate::operator::OperatorName;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// We must wrap each variant with Node<T> as otherwise we won't be able to
// visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum Expr {
  Arrow(Node<ArrowFuncExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Class(Node<ClassExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  LitArr(Node<LitArrExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
  Member(Node<MemberExpr>),
  Unary(Node<UnaryExpr>),

  // Patterns, when used as assignment targets.
  ArrPat(Node<ArrPat>),
  IdPat(Node<IdPat>),
  ObjPat(Node<ObjPat>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallArg {
  #[drive(skip)]
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ComputedMemberExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNullExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: f64,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitRegexExpr {
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MemberExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub left: Node<Expr>,
  #[drive(skip)]
  pub right: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}
