//! Terse constructors for building trees by hand, used by tests and by any
//! front end that produces this AST. Every node is created at `Loc::UNKNOWN`;
//! use [`at`] to pin a node to a real source position.

use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::LitNumExpr;
use crate::ast::expr::LitObjExpr;
use crate::ast::expr::LitStrExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::import_export::ExportName;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportName;
use crate::ast::import_export::ImportNames;
use crate::ast::import_export::ModuleExportImportName;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::ExportDefaultExprStmt;
use crate::ast::stmt::ExportListStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForBody;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForInit;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::ImportStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::ast::stx::TopLevel;
use crate::loc::Loc;
use crate::operator::OperatorName;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

pub fn node<S: Drive + DriveMut>(stx: S) -> Node<S> {
  Node::new(Loc::UNKNOWN, stx)
}

/// Re-pins a freshly built node to a concrete source position.
pub fn at<S: Drive + DriveMut>(loc: Loc, mut n: Node<S>) -> Node<S> {
  n.loc = loc;
  n
}

pub fn top_level(body: Vec<Node<Stmt>>) -> Node<TopLevel> {
  node(TopLevel { body })
}

// Statements.

pub fn block(body: Vec<Node<Stmt>>) -> Node<Stmt> {
  node(Stmt::Block(node(BlockStmt { body })))
}

pub fn expr_stmt(expr: Node<Expr>) -> Node<Stmt> {
  node(Stmt::Expr(node(ExprStmt { expr })))
}

pub fn ret(value: Option<Node<Expr>>) -> Node<Stmt> {
  node(Stmt::Return(node(ReturnStmt { value })))
}

pub fn throw(value: Node<Expr>) -> Node<Stmt> {
  node(Stmt::Throw(node(ThrowStmt { value })))
}

pub fn if_stmt(test: Node<Expr>, consequent: Node<Stmt>, alternate: Option<Node<Stmt>>) -> Node<Stmt> {
  node(Stmt::If(node(IfStmt {
    test,
    consequent,
    alternate,
  })))
}

pub fn while_stmt(condition: Node<Expr>, body: Node<Stmt>) -> Node<Stmt> {
  node(Stmt::While(node(WhileStmt { condition, body })))
}

pub fn with_stmt(object: Node<Expr>, body: Node<Stmt>) -> Node<Stmt> {
  node(Stmt::With(node(WithStmt { object, body })))
}

pub fn label(name: &str, statement: Node<Stmt>) -> Node<Stmt> {
  node(Stmt::Label(node(LabelStmt {
    name: name.to_string(),
    statement,
  })))
}

pub fn brk(label: Option<&str>) -> Node<Stmt> {
  node(Stmt::Break(node(BreakStmt {
    label: label.map(|l| l.to_string()),
  })))
}

pub fn cont(label: Option<&str>) -> Node<Stmt> {
  node(Stmt::Continue(node(ContinueStmt {
    label: label.map(|l| l.to_string()),
  })))
}

pub fn for_triple(
  init: ForInit,
  condition: Option<Node<Expr>>,
  post: Option<Node<Expr>>,
  body: Vec<Node<Stmt>>,
) -> Node<Stmt> {
  node(Stmt::ForTriple(node(ForTripleStmt {
    init,
    condition,
    post,
    body: node(ForBody { body }),
  })))
}

pub fn for_in(lhs: ForInOfLhs, rhs: Node<Expr>, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  node(Stmt::ForIn(node(ForInStmt {
    lhs,
    rhs,
    body: node(ForBody { body }),
  })))
}

pub fn switch_stmt(test: Node<Expr>, branches: Vec<(Option<Node<Expr>>, Vec<Node<Stmt>>)>) -> Node<Stmt> {
  node(Stmt::Switch(node(SwitchStmt {
    test,
    branches: branches
      .into_iter()
      .map(|(case, body)| node(SwitchBranch { case, body }))
      .collect(),
  })))
}

pub fn try_catch(
  try_body: Vec<Node<Stmt>>,
  parameter: Option<&str>,
  catch_body: Vec<Node<Stmt>>,
) -> Node<Stmt> {
  node(Stmt::Try(node(TryStmt {
    wrapped: node(BlockStmt { body: try_body }),
    catch: Some(node(CatchBlock {
      parameter: parameter.map(pat_decl),
      body: catch_body,
    })),
    finally: None,
  })))
}

// Declarations.

pub fn pat_decl(name: &str) -> Node<PatDecl> {
  node(PatDecl {
    pat: node(Pat::Id(node(IdPat {
      name: name.to_string(),
    }))),
  })
}

pub fn declarator(name: &str, initializer: Option<Node<Expr>>) -> VarDeclarator {
  VarDeclarator {
    pattern: pat_decl(name),
    initializer,
  }
}

pub fn var_decl(mode: VarDeclMode, declarators: Vec<VarDeclarator>) -> Node<Stmt> {
  node(Stmt::VarDecl(node(VarDecl {
    export: false,
    mode,
    declarators,
  })))
}

/// `mode name = init;` with a single declarator.
pub fn var_stmt(mode: VarDeclMode, name: &str, initializer: Option<Node<Expr>>) -> Node<Stmt> {
  var_decl(mode, vec![declarator(name, initializer)])
}

pub fn param(name: &str) -> Node<ParamDecl> {
  node(ParamDecl {
    rest: false,
    pattern: pat_decl(name),
    default_value: None,
  })
}

pub fn func(params: &[&str], body: Vec<Node<Stmt>>) -> Node<Func> {
  node(Func {
    arrow: false,
    async_: false,
    generator: false,
    parameters: params.iter().copied().map(param).collect(),
    body: FuncBody::Block(body),
  })
}

pub fn func_name(name: &str) -> Node<ClassOrFuncName> {
  node(ClassOrFuncName {
    name: name.to_string(),
  })
}

pub fn func_decl(name: &str, params: &[&str], body: Vec<Node<Stmt>>) -> Node<Stmt> {
  node(Stmt::FunctionDecl(node(FuncDecl {
    export: false,
    export_default: false,
    name: Some(func_name(name)),
    function: func(params, body),
  })))
}

pub fn func_expr(name: Option<&str>, params: &[&str], body: Vec<Node<Stmt>>) -> Node<Expr> {
  node(Expr::Func(node(FuncExpr {
    name: name.map(func_name),
    func: func(params, body),
  })))
}

pub fn arrow(params: &[&str], body: Vec<Node<Stmt>>) -> Node<Expr> {
  let mut f = func(params, body);
  f.stx.arrow = true;
  node(Expr::Arrow(node(ArrowFuncExpr { func: f })))
}

pub fn class_decl(name: &str, members: Vec<Node<ClassMember>>) -> Node<Stmt> {
  node(Stmt::ClassDecl(node(ClassDecl {
    export: false,
    export_default: false,
    name: Some(func_name(name)),
    extends: None,
    members,
  })))
}

pub fn class_expr(name: Option<&str>, members: Vec<Node<ClassMember>>) -> Node<Expr> {
  node(Expr::Class(node(ClassExpr {
    name: name.map(func_name),
    extends: None,
    members,
  })))
}

pub fn class_method(key: &str, params: &[&str], body: Vec<Node<Stmt>>) -> Node<ClassMember> {
  node(ClassMember {
    key: direct_key(key),
    static_: false,
    val: ClassOrObjVal::Method(func(params, body)),
  })
}

pub fn direct_key(key: &str) -> ClassOrObjKey {
  ClassOrObjKey::Direct(node(ClassOrObjMemberDirectKey {
    key: key.to_string(),
  }))
}

// Expressions.

pub fn ident(name: &str) -> Node<Expr> {
  node(Expr::Id(node(IdExpr {
    name: name.to_string(),
  })))
}

/// An identifier in assignment-target position.
pub fn ident_target(name: &str) -> Node<Expr> {
  node(Expr::IdPat(node(IdPat {
    name: name.to_string(),
  })))
}

pub fn num(value: f64) -> Node<Expr> {
  node(Expr::LitNum(node(LitNumExpr { value })))
}

pub fn str_lit(value: &str) -> Node<Expr> {
  node(Expr::LitStr(node(LitStrExpr {
    value: value.to_string(),
  })))
}

pub fn binary(operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  node(Expr::Binary(node(BinaryExpr {
    operator,
    left,
    right,
  })))
}

pub fn assign(target: Node<Expr>, value: Node<Expr>) -> Node<Expr> {
  binary(OperatorName::Assignment, target, value)
}

pub fn call(callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  node(Expr::Call(node(CallExpr {
    optional_chaining: false,
    callee,
    arguments: arguments
      .into_iter()
      .map(|value| {
        node(CallArg {
          spread: false,
          value,
        })
      })
      .collect(),
  })))
}

pub fn call_ident(name: &str, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  call(ident(name), arguments)
}

pub fn member(left: Node<Expr>, right: &str) -> Node<Expr> {
  node(Expr::Member(node(MemberExpr {
    optional_chaining: false,
    left,
    right: right.to_string(),
  })))
}

pub fn obj(members: Vec<Node<ObjMember>>) -> Node<Expr> {
  node(Expr::LitObj(node(LitObjExpr { members })))
}

pub fn obj_shorthand(name: &str) -> Node<ObjMember> {
  node(ObjMember {
    typ: ObjMemberType::Shorthand {
      id: node(IdExpr {
        name: name.to_string(),
      }),
    },
  })
}

pub fn obj_prop(key: &str, value: Node<Expr>) -> Node<ObjMember> {
  node(ObjMember {
    typ: ObjMemberType::Valued {
      key: direct_key(key),
      val: ClassOrObjVal::Prop(Some(value)),
    },
  })
}

/// `{ name }` in a destructuring declaration.
pub fn obj_pat_shorthand(names: &[&str]) -> Node<PatDecl> {
  node(PatDecl {
    pat: node(Pat::Obj(node(ObjPat {
      properties: names
        .iter()
        .map(|name| {
          node(ObjPatProp {
            key: direct_key(name),
            target: node(Pat::Id(node(IdPat {
              name: name.to_string(),
            }))),
            shorthand: true,
            default_value: None,
          })
        })
        .collect(),
      rest: None,
    }))),
  })
}

// Module syntax.

pub fn import_stmt(default: Option<&str>, names: Vec<(&str, &str)>, module: &str) -> Node<Stmt> {
  let names = if names.is_empty() {
    None
  } else {
    Some(ImportNames::Specific(
      names
        .into_iter()
        .map(|(importable, alias)| {
          node(ImportName {
            importable: ModuleExportImportName::Ident(importable.to_string()),
            alias: pat_decl(alias),
          })
        })
        .collect(),
    ))
  };
  node(Stmt::Import(node(ImportStmt {
    default: default.map(pat_decl),
    names,
    module: module.to_string(),
  })))
}

/// `export { local as alias, ... }`.
pub fn export_list(names: Vec<(&str, &str)>) -> Node<Stmt> {
  node(Stmt::ExportList(node(ExportListStmt {
    names: ExportNames::Specific(
      names
        .into_iter()
        .map(|(exportable, alias)| {
          node(ExportName {
            exportable: ModuleExportImportName::Ident(exportable.to_string()),
            alias: node(IdPat {
              name: alias.to_string(),
            }),
          })
        })
        .collect(),
    ),
    from: None,
  })))
}

pub fn export_default_expr(expression: Node<Expr>) -> Node<Stmt> {
  node(Stmt::ExportDefaultExpr(node(ExportDefaultExprStmt {
    expression,
  })))
}

/// Marks a declaration statement as exported.
pub fn exported(mut stmt: Node<Stmt>) -> Node<Stmt> {
  match stmt.stx.as_mut() {
    Stmt::VarDecl(var) => var.stx.export = true,
    Stmt::FunctionDecl(func) => func.stx.export = true,
    Stmt::ClassDecl(class) => class.stx.export = true,
    _ => panic!("not an exportable declaration"),
  };
  stmt
}

/// Marks a function or class declaration as `export default`.
pub fn exported_default(mut stmt: Node<Stmt>) -> Node<Stmt> {
  match stmt.stx.as_mut() {
    Stmt::FunctionDecl(func) => {
      func.stx.export = true;
      func.stx.export_default = true;
    }
    Stmt::ClassDecl(class) => {
      class.stx.export = true;
      class.stx.export_default = true;
    }
    _ => panic!("not a default-exportable declaration"),
  };
  stmt
}
