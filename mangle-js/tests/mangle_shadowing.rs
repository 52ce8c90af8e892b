use mangle_js::mangle::KeepNames;
use mangle_js::mangle::MangleOptions;
use mangle_js::mangle_identifiers;
use mangle_js::symbol::SymbolId;
use mangle_js::symbol::SymbolTable;
use mangle_js::TopLevelMode;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::builder::*;
use syntax_js::operator::OperatorName;

fn find_symbol(table: &SymbolTable, name: &str) -> Option<SymbolId> {
  table
    .scope_ids()
    .find_map(|s| table.scope(s).get_symbol(name))
}

fn mangled(table: &SymbolTable, name: &str) -> String {
  let sym = find_symbol(table, name).unwrap_or_else(|| panic!("symbol {name}"));
  table
    .symbol(sym)
    .mangled_name
    .clone()
    .unwrap_or_else(|| panic!("{name} should be mangled"))
}

#[test]
fn avoids_shadowing_renamed_outer_bindings() {
  // function outer() { let foo = 1; function inner() { let bar = foo + 1; return bar; } return inner(); }
  let mut top = top_level(vec![func_decl(
    "outer",
    &[],
    vec![
      var_stmt(VarDeclMode::Let, "foo", Some(num(1.0))),
      func_decl(
        "inner",
        &[],
        vec![
          var_stmt(
            VarDeclMode::Let,
            "bar",
            Some(binary(OperatorName::Addition, ident("foo"), num(1.0))),
          ),
          ret(Some(ident("bar"))),
        ],
      ),
      ret(Some(call_ident("inner", vec![]))),
    ],
  )]);
  let table = mangle_identifiers(&mut top, TopLevelMode::Global, &MangleOptions::new()).unwrap();

  let foo_name = mangled(&table, "foo");
  let bar_name = mangled(&table, "bar");
  assert_ne!(
    foo_name, bar_name,
    "inner scope must not reuse the renamed outer binding name"
  );
}

#[test]
fn sibling_scopes_may_reuse_names() {
  // function a() { let x = 1; return x; } function b() { let y = 2; return y; }
  let mut top = top_level(vec![
    func_decl("a", &[], vec![
      var_stmt(VarDeclMode::Let, "x", Some(num(1.0))),
      ret(Some(ident("x"))),
    ]),
    func_decl("b", &[], vec![
      var_stmt(VarDeclMode::Let, "y", Some(num(2.0))),
      ret(Some(ident("y"))),
    ]),
  ]);
  let table = mangle_identifiers(&mut top, TopLevelMode::Global, &MangleOptions::new()).unwrap();

  assert_eq!(mangled(&table, "x"), mangled(&table, "y"));
}

#[test]
fn top_level_bindings_stay_put_unless_toplevel_is_set() {
  let build = || {
    top_level(vec![
      var_stmt(VarDeclMode::Let, "longTopLevelName", Some(num(1.0))),
      expr_stmt(ident("longTopLevelName")),
    ])
  };

  let mut top = build();
  let table = mangle_identifiers(&mut top, TopLevelMode::Global, &MangleOptions::new()).unwrap();
  let sym = find_symbol(&table, "longTopLevelName").unwrap();
  assert_eq!(table.symbol(sym).mangled_name, None);

  let mut top = build();
  let mut opts = MangleOptions::new();
  opts.toplevel = true;
  let table = mangle_identifiers(&mut top, TopLevelMode::Global, &opts).unwrap();
  assert_eq!(mangled(&table, "longTopLevelName").len(), 1);
}

#[test]
fn parameters_receive_the_shortest_free_names() {
  // function f(alpha, beta) { return alpha + beta; }
  let mut top = top_level(vec![func_decl(
    "f",
    &["alpha", "beta"],
    vec![ret(Some(binary(
      OperatorName::Addition,
      ident("alpha"),
      ident("beta"),
    )))],
  )]);
  let table = mangle_identifiers(&mut top, TopLevelMode::Global, &MangleOptions::new()).unwrap();

  let alpha = mangled(&table, "alpha");
  let beta = mangled(&table, "beta");
  assert_eq!(alpha.len(), 1);
  assert_eq!(beta.len(), 1);
  assert_ne!(alpha, beta);
  // `f` itself is a top-level binding and stays.
  let f = find_symbol(&table, "f").unwrap();
  assert_eq!(table.symbol(f).mangled_name, None);
}

#[test]
fn keep_fnames_preserves_function_names_only() {
  // function f() { function helper() {} var g = function () {}; let data = 1; }
  let mut top = top_level(vec![func_decl(
    "f",
    &[],
    vec![
      func_decl("helper", &[], vec![]),
      var_stmt(VarDeclMode::Var, "g", Some(func_expr(None, &[], vec![]))),
      var_stmt(VarDeclMode::Let, "data", Some(num(1.0))),
    ],
  )]);
  let mut opts = MangleOptions::new();
  opts.keep_fnames = KeepNames::All;
  let table = mangle_identifiers(&mut top, TopLevelMode::Global, &opts).unwrap();

  let helper = find_symbol(&table, "helper").unwrap();
  assert_eq!(table.symbol(helper).mangled_name, None);
  let g = find_symbol(&table, "g").unwrap();
  assert_eq!(
    table.symbol(g).mangled_name,
    None,
    "a var initialized with a function counts as a function name"
  );
  assert_eq!(mangled(&table, "data").len(), 1);
}

#[test]
fn keep_classnames_preserves_class_names() {
  // function f() { class Widget {} let other = 1; }
  let mut top = top_level(vec![func_decl(
    "f",
    &[],
    vec![
      class_decl("Widget", vec![]),
      var_stmt(VarDeclMode::Let, "other", Some(num(1.0))),
    ],
  )]);
  let mut opts = MangleOptions::new();
  opts.keep_classnames = KeepNames::All;
  let table = mangle_identifiers(&mut top, TopLevelMode::Global, &opts).unwrap();

  let widget = find_symbol(&table, "Widget").unwrap();
  assert_eq!(table.symbol(widget).mangled_name, None);
  assert_eq!(mangled(&table, "other").len(), 1);
}

#[test]
fn fn_expr_parameter_never_takes_the_kept_self_name() {
  // var h = function a(p) { return p; };
  let mut top = top_level(vec![var_stmt(
    VarDeclMode::Var,
    "h",
    Some(func_expr(Some("a"), &["p"], vec![ret(Some(ident("p")))])),
  )]);
  let mut opts = MangleOptions::new();
  opts.keep_fnames = KeepNames::All;
  let table = mangle_identifiers(&mut top, TopLevelMode::Global, &opts).unwrap();

  let a = find_symbol(&table, "a").unwrap();
  assert_eq!(table.symbol(a).mangled_name, None);
  // `(function a(a) {})` is a strict-mode error; the parameter must skip the
  // name the expression keeps for itself, even though `a` is unreferenced.
  let p = mangled(&table, "p");
  assert_ne!(p, "a");
  assert_eq!(p.len(), 1);
}

#[test]
fn reserved_names_are_never_generated_or_stripped() {
  // function f(alpha) { let go = alpha; return go; }
  let mut top = top_level(vec![func_decl(
    "f",
    &["alpha"],
    vec![
      var_stmt(VarDeclMode::Let, "go", Some(ident("alpha"))),
      ret(Some(ident("go"))),
    ],
  )]);
  let mut opts = MangleOptions::new();
  opts.reserved.insert("a".to_string());
  opts.reserved.insert("go".to_string());
  let table = mangle_identifiers(&mut top, TopLevelMode::Global, &opts).unwrap();

  let go = find_symbol(&table, "go").unwrap();
  assert_eq!(table.symbol(go).mangled_name, None, "reserved declarations keep their name");
  assert_ne!(mangled(&table, "alpha"), "a", "reserved names are skipped by the generator");
}

#[test]
fn mangling_is_deterministic() {
  let build = || {
    top_level(vec![func_decl(
      "outer",
      &["first", "second"],
      vec![
        var_stmt(VarDeclMode::Let, "local", Some(ident("first"))),
        ret(Some(binary(
          OperatorName::Addition,
          ident("local"),
          ident("second"),
        ))),
      ],
    )])
  };
  let mut a = build();
  let mut b = build();
  let opts = MangleOptions::new();
  let table_a = mangle_identifiers(&mut a, TopLevelMode::Global, &opts).unwrap();
  let table_b = mangle_identifiers(&mut b, TopLevelMode::Global, &opts).unwrap();

  for name in ["first", "second", "local"] {
    assert_eq!(mangled(&table_a, name), mangled(&table_b, name));
  }
  assert_eq!(
    serde_json::to_string(&a).unwrap(),
    serde_json::to_string(&b).unwrap()
  );
}
