use ahash::HashSet;
use mangle_js::expand_identifiers;
use mangle_js::mangle::MangleOptions;
use mangle_js::symbol::SymbolTable;
use mangle_js::TopLevelMode;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::builder::*;
use syntax_js::operator::OperatorName;

fn all_assigned_names(table: &SymbolTable) -> Vec<String> {
  let mut names = Vec::new();
  for scope in table.scope_ids() {
    for name in table.scope(scope).names() {
      let sym = table.scope(scope).get_symbol(name).unwrap();
      if let Some(mangled) = &table.symbol(sym).mangled_name {
        names.push(mangled.clone());
      }
    }
  }
  names
}

#[test]
fn expansion_assigns_globally_unique_names() {
  // Same shape twice so shadow-free scopes would otherwise share names.
  // function a() { let x = 1; return x; } function b() { let x = 2; return x; }
  let mut top = top_level(vec![
    func_decl("first", &["x"], vec![ret(Some(ident("x")))]),
    func_decl("second", &["x"], vec![ret(Some(ident("x")))]),
    func_decl("third", &[], vec![
      var_stmt(VarDeclMode::Let, "x", Some(num(1.0))),
      ret(Some(ident("x"))),
    ]),
  ]);
  let mut opts = MangleOptions::new();
  opts.toplevel = true;
  let table = expand_identifiers(&mut top, TopLevelMode::Global, &opts).unwrap();

  let names = all_assigned_names(&table);
  let unique: HashSet<&String> = names.iter().collect();
  assert_eq!(
    unique.len(),
    names.len(),
    "no two bindings anywhere may share a name"
  );
}

#[test]
fn expansion_avoids_unmangleable_names() {
  // eval pins everything in scope; the pinned names must not be reissued.
  // function f() { let a = 1; eval("a"); } function g() { let other = 2; return other; }
  let mut top = top_level(vec![
    func_decl("f", &[], vec![
      var_stmt(VarDeclMode::Let, "a", Some(num(1.0))),
      expr_stmt(call_ident("eval", vec![str_lit("a")])),
    ]),
    func_decl("g", &[], vec![
      var_stmt(VarDeclMode::Let, "other", Some(num(2.0))),
      ret(Some(ident("other"))),
    ]),
  ]);
  let mut opts = MangleOptions::new();
  opts.toplevel = true;
  let table = expand_identifiers(&mut top, TopLevelMode::Global, &opts).unwrap();

  let pinned = table
    .scope_ids()
    .find_map(|s| table.scope(s).get_symbol("a"))
    .expect("declared");
  assert_eq!(table.symbol(pinned).mangled_name, None);

  for name in all_assigned_names(&table) {
    assert_ne!(name, "a", "a pinned name must never be reissued");
  }
}

#[test]
fn expansion_is_deterministic_and_ordered() {
  let build = || {
    top_level(vec![func_decl(
      "f",
      &["first", "second"],
      vec![ret(Some(binary(
        OperatorName::Addition,
        ident("first"),
        ident("second"),
      )))],
    )])
  };
  let mut one = build();
  let mut two = build();
  let mut opts = MangleOptions::new();
  opts.toplevel = true;
  let table_one = expand_identifiers(&mut one, TopLevelMode::Global, &opts).unwrap();
  let table_two = expand_identifiers(&mut two, TopLevelMode::Global, &opts).unwrap();

  assert_eq!(all_assigned_names(&table_one), all_assigned_names(&table_two));
  assert_eq!(
    serde_json::to_string(&one).unwrap(),
    serde_json::to_string(&two).unwrap()
  );
}

#[test]
fn expansion_leaves_labels_alone() {
  use derive_visitor::Drive;
  use derive_visitor::Visitor;
  use syntax_js::ast::node::Node;
  use syntax_js::ast::stmt::LabelStmt;

  type LabelStmtNode = Node<LabelStmt>;

  #[derive(Default, Visitor)]
  #[visitor(LabelStmtNode(enter))]
  struct Labels {
    names: Vec<String>,
  }

  impl Labels {
    fn enter_label_stmt_node(&mut self, node: &LabelStmtNode) {
      self.names.push(node.stx.name.clone());
    }
  }

  let mut top = top_level(vec![label(
    "retryLoop",
    while_stmt(num(1.0), block(vec![brk(Some("retryLoop"))])),
  )]);
  let mut opts = MangleOptions::new();
  opts.toplevel = true;
  expand_identifiers(&mut top, TopLevelMode::Global, &opts).unwrap();

  let mut labels = Labels::default();
  top.drive(&mut labels);
  assert_eq!(labels.names, vec!["retryLoop".to_string()]);
}
