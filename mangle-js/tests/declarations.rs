use mangle_js::compute_symbols;
use mangle_js::error::ScopeErrorType;
use mangle_js::TopLevelMode;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::builder::*;

#[test]
fn let_twice_in_one_scope_is_an_error() {
  let mut top = top_level(vec![
    var_stmt(VarDeclMode::Let, "x", Some(num(1.0))),
    var_stmt(VarDeclMode::Let, "x", Some(num(2.0))),
  ]);
  let err = compute_symbols(&mut top, TopLevelMode::Global).unwrap_err();
  assert_eq!(err.typ, ScopeErrorType::Redeclaration);
}

#[test]
fn var_after_let_is_an_error() {
  let mut top = top_level(vec![
    var_stmt(VarDeclMode::Let, "x", Some(num(1.0))),
    var_stmt(VarDeclMode::Var, "x", Some(num(2.0))),
  ]);
  let err = compute_symbols(&mut top, TopLevelMode::Global).unwrap_err();
  assert_eq!(err.typ, ScopeErrorType::Redeclaration);
}

#[test]
fn var_merges_with_var_and_function() {
  // var f = 1; var f = 2; function f() {}
  let mut top = top_level(vec![
    var_stmt(VarDeclMode::Var, "f", Some(num(1.0))),
    var_stmt(VarDeclMode::Var, "f", Some(num(2.0))),
    func_decl("f", &[], vec![]),
  ]);
  let table = compute_symbols(&mut top, TopLevelMode::Global).unwrap();
  let sym = table
    .scope(table.top_scope())
    .get_symbol("f")
    .expect("single merged symbol");
  assert_eq!(table.symbol(sym).orig.len(), 3);
}

#[test]
fn let_in_inner_block_shadows_without_error() {
  // let x = 1; { let x = 2; }
  let mut top = top_level(vec![
    var_stmt(VarDeclMode::Let, "x", Some(num(1.0))),
    block(vec![var_stmt(VarDeclMode::Let, "x", Some(num(2.0)))]),
  ]);
  let table = compute_symbols(&mut top, TopLevelMode::Global).unwrap();
  let declared: Vec<_> = table
    .scope_ids()
    .filter_map(|s| table.scope(s).get_symbol("x"))
    .collect();
  assert_eq!(declared.len(), 2, "each block gets its own binding");
}

#[test]
fn catch_parameter_scopes_to_the_catch_block() {
  // try { risky(); } catch (e) { handle(e); } e;
  let mut top = top_level(vec![
    try_catch(
      vec![expr_stmt(call_ident("risky", vec![]))],
      Some("e"),
      vec![expr_stmt(call_ident("handle", vec![ident("e")]))],
    ),
    expr_stmt(ident("e")),
  ]);
  let table = compute_symbols(&mut top, TopLevelMode::Global).unwrap();

  let caught = table
    .scope_ids()
    .find_map(|s| table.scope(s).get_symbol("e"))
    .expect("catch parameter declared");
  assert_eq!(
    table.symbol(caught).references.len(),
    1,
    "only the reference inside the catch body binds to the parameter"
  );
  let escaped = table.get_global("e").expect("trailing use is a global");
  assert!(table.symbol(escaped).undeclared);
}

#[test]
fn import_outside_module_top_level_is_an_error() {
  let mut top = top_level(vec![func_decl("f", &[], vec![import_stmt(
    Some("dep"),
    vec![],
    "dep",
  )])]);
  let err = compute_symbols(&mut top, TopLevelMode::Module).unwrap_err();
  assert_eq!(err.typ, ScopeErrorType::MisplacedModuleSyntax);
}

#[test]
fn labels_resolve_and_reject_duplicates() {
  // outer: while (1) { break outer; }
  let mut top = top_level(vec![label(
    "outer",
    while_stmt(num(1.0), block(vec![brk(Some("outer"))])),
  )]);
  let table = compute_symbols(&mut top, TopLevelMode::Global).unwrap();
  let outer = table
    .label_ids()
    .find(|&id| table.label(id).name == "outer")
    .expect("label recorded");
  assert_eq!(table.label(outer).references.len(), 1);

  // outer: while (1) { outer: while (1) {} }
  let mut top = top_level(vec![label(
    "outer",
    while_stmt(
      num(1.0),
      block(vec![label("outer", while_stmt(num(1.0), block(vec![])))]),
    ),
  )]);
  let err = compute_symbols(&mut top, TopLevelMode::Global).unwrap_err();
  assert_eq!(err.typ, ScopeErrorType::DuplicateLabel);
}

#[test]
fn break_to_an_unknown_label_is_an_error() {
  let mut top = top_level(vec![label(
    "outer",
    while_stmt(num(1.0), block(vec![brk(Some("other"))])),
  )]);
  let err = compute_symbols(&mut top, TopLevelMode::Global).unwrap_err();
  assert_eq!(err.typ, ScopeErrorType::UndefinedLabel);
}

#[test]
fn labels_do_not_cross_function_boundaries() {
  // outer: while (1) { (function () { break outer; })(); }
  let mut top = top_level(vec![label(
    "outer",
    while_stmt(
      num(1.0),
      block(vec![expr_stmt(call(
        func_expr(None, &[], vec![brk(Some("outer"))]),
        vec![],
      ))]),
    ),
  )]);
  let err = compute_symbols(&mut top, TopLevelMode::Global).unwrap_err();
  assert_eq!(err.typ, ScopeErrorType::UndefinedLabel);
}
