use super::expr::Expr;
use super::node::Node;
use super::stmt::decl::ParamDecl;
use super::stmt::Stmt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// One common type for all function forms (declaration, expression, arrow,
// method), as one type is easier to match on than many.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub arrow: bool,
  #[drive(skip)]
  pub async_: bool,
  #[drive(skip)]
  pub generator: bool,
  pub parameters: Vec<Node<ParamDecl>>,
  pub body: FuncBody,
}

// A function body is different from a block statement, as the scopes are
// different: the scope starts at the parameters, not the braces.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // If arrow function.
  Expression(Node<Expr>),
}
