use derive_visitor::Drive;
use derive_visitor::Visitor;
use mangle_js::compute_symbols;
use mangle_js::symbol::ScopeId;
use mangle_js::symbol::ScopeType;
use mangle_js::symbol::SymbolId;
use mangle_js::TopLevelMode;
use syntax_js::ast::expr::pat::IdPat;
use syntax_js::ast::expr::IdExpr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::builder::*;

type IdPatNode = Node<IdPat>;
type IdExprNode = Node<IdExpr>;

#[derive(Default, Visitor)]
#[visitor(IdPatNode(enter), IdExprNode(enter))]
struct ScopeCollector {
  decl_scope: Option<ScopeId>,
  use_scope: Option<ScopeId>,
}

impl ScopeCollector {
  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    if node.stx.name == "value" {
      self.decl_scope = node.assoc.get::<ScopeId>().copied();
    }
  }

  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    if node.stx.name == "value" {
      self.use_scope = node.assoc.get::<ScopeId>().copied();
    }
  }
}

#[test]
fn resolves_outer_let_with_declaration_scope() {
  // function outer() { let value = 1; return function inner() { return value; }; }
  let mut top_level = top_level(vec![func_decl(
    "outer",
    &[],
    vec![
      var_stmt(
        VarDeclMode::Let,
        "value",
        Some(num(1.0)),
      ),
      ret(Some(func_expr(Some("inner"), &[], vec![ret(Some(ident(
        "value",
      )))]))),
    ],
  )]);

  let table = compute_symbols(&mut top_level, TopLevelMode::Module).unwrap();

  let mut collector = ScopeCollector::default();
  top_level.drive(&mut collector);

  let decl_scope = collector.decl_scope.expect("declaration scope captured");
  let use_scope = collector.use_scope.expect("usage scope captured");
  assert_ne!(decl_scope, use_scope, "declaration is in the outer closure");

  let (resolved_scope, symbol) = table
    .find_symbol_with_scope(use_scope, "value")
    .expect("symbol resolves across nested closures");
  assert_eq!(resolved_scope, decl_scope);
  assert_eq!(table.scope(decl_scope).get_symbol("value"), Some(symbol));
  assert!(table.scope(decl_scope).enclosed.contains(&symbol));
}

#[test]
fn annotates_references_with_their_symbol() {
  // let value = 1; value;
  let mut top_level = top_level(vec![
    var_stmt(
      VarDeclMode::Let,
      "value",
      Some(num(1.0)),
    ),
    expr_stmt(ident("value")),
  ]);
  let table = compute_symbols(&mut top_level, TopLevelMode::Global).unwrap();

  let sym = table
    .scope(table.top_scope())
    .get_symbol("value")
    .expect("declared at the top level");
  assert_eq!(table.symbol(sym).references.len(), 1);
  assert!(!table.symbol(sym).unreferenced());
}

#[test]
fn var_hoists_to_the_enclosing_function() {
  // function f() { { var hoisted = 1; } return hoisted; }
  let mut top_level = top_level(vec![func_decl(
    "f",
    &[],
    vec![
      block(vec![var_stmt(
        VarDeclMode::Var,
        "hoisted",
        Some(num(1.0)),
      )]),
      ret(Some(ident("hoisted"))),
    ],
  )]);
  let table = compute_symbols(&mut top_level, TopLevelMode::Global).unwrap();

  let (owner, _) = find_declared(&table, "hoisted");
  assert_eq!(
    table.scope(owner).typ,
    ScopeType::Closure,
    "a var inside a block belongs to the function scope"
  );
}

#[test]
fn unresolved_names_become_undeclared_globals() {
  let mut top_level = top_level(vec![expr_stmt(call_ident("console", vec![]))]);
  let table = compute_symbols(&mut top_level, TopLevelMode::Global).unwrap();

  let sym = table.get_global("console").expect("registered as a global");
  assert!(table.symbol(sym).undeclared);
  assert!(table.symbol(sym).global);
}

#[test]
fn switch_discriminant_resolves_outside_the_branch_scope() {
  // let x = 1; switch (x) { case 1: let x = 2; }
  let mut top_level = top_level(vec![
    var_stmt(
      VarDeclMode::Let,
      "x",
      Some(num(1.0)),
    ),
    switch_stmt(ident("x"), vec![(
      Some(num(1.0)),
      vec![var_stmt(
        VarDeclMode::Let,
        "x",
        Some(num(2.0)),
      )],
    )]),
  ]);
  let table = compute_symbols(&mut top_level, TopLevelMode::Global).unwrap();

  let outer = table
    .scope(table.top_scope())
    .get_symbol("x")
    .expect("outer x");
  assert_eq!(
    table.symbol(outer).references.len(),
    1,
    "the discriminant reads the outer binding, not the case-local one"
  );
}

#[test]
fn arguments_marks_the_enclosing_function() {
  // function f(x) { return arguments; } function g(y) { return y; }
  let mut top_level = top_level(vec![
    func_decl("f", &["x"], vec![ret(Some(ident("arguments")))]),
    func_decl("g", &["y"], vec![ret(Some(ident("y")))]),
  ]);
  let table = compute_symbols(&mut top_level, TopLevelMode::Global).unwrap();

  let (f_scope, args) = find_declared(&table, "arguments");
  assert_eq!(table.scope(f_scope).typ, ScopeType::Closure);
  assert!(table.scope(f_scope).uses_arguments);
  assert_eq!(table.symbol(args).references.len(), 1);

  let (g_scope, _) = find_declared(&table, "y");
  assert!(
    !table.scope(g_scope).uses_arguments,
    "a function that never reads arguments stays unmarked"
  );
}

#[test]
fn arrow_arguments_bind_to_the_nearest_function() {
  // function outer() { function inner() { let local = 1; return () => arguments; } }
  let mut top_level = top_level(vec![func_decl(
    "outer",
    &[],
    vec![func_decl(
      "inner",
      &[],
      vec![
        var_stmt(VarDeclMode::Let, "local", Some(num(1.0))),
        ret(Some(arrow(&[], vec![ret(Some(ident("arguments")))]))),
      ],
    )],
  )]);
  let table = compute_symbols(&mut top_level, TopLevelMode::Global).unwrap();

  #[derive(Default, Visitor)]
  #[visitor(IdExprNode(enter))]
  struct ArgumentsCollector {
    symbol: Option<SymbolId>,
  }

  impl ArgumentsCollector {
    fn enter_id_expr_node(&mut self, node: &IdExprNode) {
      if node.stx.name == "arguments" {
        self.symbol = node.assoc.get::<SymbolId>().copied();
      }
    }
  }

  let mut collector = ArgumentsCollector::default();
  top_level.drive(&mut collector);
  let args = collector.symbol.expect("arrow use resolves to a symbol");

  // The arrow has no arguments object of its own; the reference lands on the
  // implicit binding of `inner`, not `outer`.
  let (inner_scope, _) = find_declared(&table, "local");
  assert_eq!(table.symbol(args).scope, inner_scope);
  assert!(table.scope(inner_scope).uses_arguments);
  let (outer_scope, _) = find_declared(&table, "inner");
  assert!(!table.scope(outer_scope).uses_arguments);
}

fn find_declared(table: &mangle_js::symbol::SymbolTable, name: &str) -> (ScopeId, SymbolId) {
  for scope in table.scope_ids() {
    if let Some(sym) = table.scope(scope).get_symbol(name) {
      return (scope, sym);
    }
  }
  panic!("symbol {name} not declared anywhere");
}
