pub mod decl;

use self::decl::ClassDecl;
use self::decl::FuncDecl;
use self::decl::PatDecl;
use self::decl::VarDecl;
use super::expr::pat::Pat;
use super::expr::Expr;
use super::import_export::ExportNames;
use super::import_export::ImportNames;
use super::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// We must wrap each variant with Node<T> as otherwise we won't be able to
// visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Break(Node<BreakStmt>),
  Continue(Node<ContinueStmt>),
  Debugger(Node<DebuggerStmt>),
  DoWhile(Node<DoWhileStmt>),
  Empty(Node<EmptyStmt>),
  ExportDefaultExpr(Node<ExportDefaultExprStmt>),
  ExportList(Node<ExportListStmt>),
  Expr(Node<ExprStmt>),
  ForIn(Node<ForInStmt>),
  ForOf(Node<ForOfStmt>),
  ForTriple(Node<ForTripleStmt>),
  If(Node<IfStmt>),
  Import(Node<ImportStmt>),
  Label(Node<LabelStmt>),
  Return(Node<ReturnStmt>),
  Switch(Node<SwitchStmt>),
  Throw(Node<ThrowStmt>),
  Try(Node<TryStmt>),
  While(Node<WhileStmt>),
  With(Node<WithStmt>),

  ClassDecl(Node<ClassDecl>),
  FunctionDecl(Node<FuncDecl>),
  VarDecl(Node<VarDecl>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BlockStmt {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BreakStmt {
  #[drive(skip)]
  pub label: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ContinueStmt {
  #[drive(skip)]
  pub label: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DebuggerStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DoWhileStmt {
  pub body: Node<Stmt>,
  pub condition: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct EmptyStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportDefaultExprStmt {
  pub expression: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportListStmt {
  pub names: ExportNames,
  #[drive(skip)]
  pub from: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

// The scope for a `for` statement starts before the braces, so its body is
// not a BlockStmt; BlockStmt specifically means a new scope of its own.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForBody {
  pub body: Vec<Node<Stmt>>,
}

// Left-hand side of `for-in`/`for-of`: either a fresh declaration or an
// existing assignment target.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ForInOfLhs {
  Decl(Node<VarDecl>),
  Pat(Node<Pat>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForInStmt {
  pub lhs: ForInOfLhs,
  pub rhs: Node<Expr>,
  pub body: Node<ForBody>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForOfStmt {
  #[drive(skip)]
  pub await_: bool,
  pub lhs: ForInOfLhs,
  pub rhs: Node<Expr>,
  pub body: Node<ForBody>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ForInit {
  None,
  Expr(Node<Expr>),
  Decl(Node<VarDecl>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForTripleStmt {
  pub init: ForInit,
  pub condition: Option<Node<Expr>>,
  pub post: Option<Node<Expr>>,
  pub body: Node<ForBody>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Node<Stmt>,
  pub alternate: Option<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportStmt {
  pub default: Option<Node<PatDecl>>,
  pub names: Option<ImportNames>,
  #[drive(skip)]
  pub module: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LabelStmt {
  #[drive(skip)]
  pub name: String,
  pub statement: Node<Stmt>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SwitchBranch {
  // If None, it's `default`.
  pub case: Option<Node<Expr>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SwitchStmt {
  pub test: Node<Expr>,
  pub branches: Vec<Node<SwitchBranch>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ThrowStmt {
  pub value: Node<Expr>,
}

// The try body is a BlockStmt of its own; catch and finally hang off the try
// statement so a catch parameter's scope chains to the scope surrounding the
// `try`, not to the try body's scope.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TryStmt {
  pub wrapped: Node<BlockStmt>,
  pub catch: Option<Node<CatchBlock>>,
  pub finally: Option<Node<BlockStmt>>,
}

// The new block scope starts with the parameter, not the braces.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CatchBlock {
  pub parameter: Option<Node<PatDecl>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct WhileStmt {
  pub condition: Node<Expr>,
  pub body: Node<Stmt>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct WithStmt {
  pub object: Node<Expr>,
  pub body: Node<Stmt>,
}
