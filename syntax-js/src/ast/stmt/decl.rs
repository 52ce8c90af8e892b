use crate::ast::class_or_object::ClassMember;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub export_default: bool,
  // Name can only be omitted in a default export.
  pub name: Option<Node<ClassOrFuncName>>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub export_default: bool,
  // Name can only be omitted in a default export.
  pub name: Option<Node<ClassOrFuncName>>,
  pub function: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ParamDecl {
  #[drive(skip)]
  pub rest: bool,
  pub pattern: Node<PatDecl>,
  pub default_value: Option<Node<Expr>>,
}

// A pattern in declaration position (imports, function params, var/let/const,
// catch binding). Contains only the pattern, never an initializer.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct PatDecl {
  pub pat: Node<Pat>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub export: bool,
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDeclarator {
  pub pattern: Node<PatDecl>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize, Drive, DriveMut)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

impl VarDeclMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      VarDeclMode::Const => "const",
      VarDeclMode::Let => "let",
      VarDeclMode::Var => "var",
    }
  }
}
