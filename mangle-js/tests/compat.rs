use mangle_js::compat::CompatMode;
use mangle_js::compute_symbols_with_options;
use mangle_js::symbol::ScopeType;
use mangle_js::ResolveOptions;
use mangle_js::TopLevelMode;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stx::TopLevel;
use syntax_js::builder::*;

// function f() { try { risky(); } catch (err) { log(err); } }
fn unit_with_catch() -> Node<TopLevel> {
  top_level(vec![func_decl("f", &[], vec![try_catch(
    vec![expr_stmt(call_ident("risky", vec![]))],
    Some("err"),
    vec![expr_stmt(call_ident("log", vec![ident("err")]))],
  )])])
}

#[test]
fn plain_mode_keeps_the_catch_parameter_block_scoped() {
  let mut top = unit_with_catch();
  let table = compute_symbols_with_options(
    &mut top,
    TopLevelMode::Global,
    &ResolveOptions::default(),
  )
  .unwrap();

  let (scope, sym) = table
    .scope_ids()
    .find_map(|s| table.scope(s).get_symbol("err").map(|sym| (s, sym)))
    .expect("catch parameter declared");
  assert_eq!(table.scope(scope).typ, ScopeType::Block);
  assert!(table.symbol(sym).redefined_catch_def.is_none());
}

#[test]
fn legacy_catch_folds_the_parameter_into_the_function_scope() {
  let mut top = unit_with_catch();
  let opts = ResolveOptions {
    compat: CompatMode::LegacyCatch,
  };
  let table = compute_symbols_with_options(&mut top, TopLevelMode::Global, &opts).unwrap();

  // The reference inside the catch body now counts against the
  // function-scoped counterpart.
  let (scope, counterpart) = table
    .scope_ids()
    .find_map(|s| {
      let sym = table.scope(s).get_symbol("err")?;
      table.symbol(sym).redefined_catch_def.is_none().then_some((s, sym))
    })
    .expect("counterpart declared in the function scope");
  assert!(table.scope(scope).typ.is_closure());
  assert_eq!(table.symbol(counterpart).references.len(), 1);
}

#[test]
fn legacy_catch_counterpart_shares_a_mangled_name() {
  use mangle_js::mangle::MangleOptions;
  use mangle_js::mangle_identifiers;

  let mut top = unit_with_catch();
  let mut opts = MangleOptions::new();
  opts.compat = CompatMode::LegacyCatch;
  let table = mangle_identifiers(&mut top, TopLevelMode::Global, &opts).unwrap();

  let names: Vec<_> = table
    .scope_ids()
    .filter_map(|s| table.scope(s).get_symbol("err"))
    .map(|sym| table.symbol(sym).mangled_name.clone())
    .collect();
  assert!(!names.is_empty());
  assert!(
    names.windows(2).all(|w| w[0] == w[1]),
    "both views of the parameter must print identically"
  );
}

#[test]
fn legacy_loop_reserves_parent_names_inside_the_loop_scope() {
  // function f() { let leak = 1; for (let i = 0; i < 2; i = i + 1) { use(leak); } }
  use syntax_js::ast::stmt::ForInit;
  use syntax_js::operator::OperatorName;

  let mut top = top_level(vec![func_decl("f", &[], vec![
    var_stmt(VarDeclMode::Let, "leak", Some(num(1.0))),
    for_triple(
      ForInit::Decl(node(syntax_js::ast::stmt::decl::VarDecl {
        export: false,
        mode: VarDeclMode::Let,
        declarators: vec![declarator("i", Some(num(0.0)))],
      })),
      Some(binary(OperatorName::LessThan, ident("i"), num(2.0))),
      Some(assign(
        ident_target("i"),
        binary(OperatorName::Addition, ident("i"), num(1.0)),
      )),
      vec![expr_stmt(call_ident("use", vec![ident("leak")]))],
    ),
  ])]);
  let opts = ResolveOptions {
    compat: CompatMode::LegacyLoop,
  };
  let table = compute_symbols_with_options(&mut top, TopLevelMode::Global, &opts).unwrap();

  let (loop_scope, _) = table
    .scope_ids()
    .find_map(|s| table.scope(s).get_symbol("i").map(|sym| (s, sym)))
    .expect("loop binding declared");
  let leak = table
    .scope_ids()
    .find_map(|s| table.scope(s).get_symbol("leak"))
    .expect("declared");
  assert!(
    table.scope(loop_scope).enclosed.contains(&leak),
    "the loop scope must not hand out the parent's names"
  );
}
