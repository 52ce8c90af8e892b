use super::expr::Expr;
use super::expr::IdExpr;
use super::func::Func;
use super::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrObjMemberDirectKey {
  #[drive(skip)]
  pub key: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ClassOrObjKey {
  Direct(Node<ClassOrObjMemberDirectKey>),
  Computed(Node<Expr>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ClassOrObjVal {
  // Property; None for a class field without an initializer.
  Prop(Option<Node<Expr>>),
  Method(Node<Func>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassMember {
  pub key: ClassOrObjKey,
  #[drive(skip)]
  pub static_: bool,
  pub val: ClassOrObjVal,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ObjMemberType {
  Valued {
    key: ClassOrObjKey,
    val: ClassOrObjVal,
  },
  Shorthand {
    id: Node<IdExpr>,
  },
  Rest {
    val: Node<Expr>,
  },
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  pub typ: ObjMemberType,
}
