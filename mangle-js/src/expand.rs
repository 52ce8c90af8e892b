use crate::base54::Base54;
use crate::mangle::unmangleable;
use crate::mangle::MangleOptions;
use crate::rename::apply_renames;
use crate::symbol::SymbolId;
use crate::symbol::SymbolTable;
use ahash::HashSet;
use syntax_js::ast::node::Node;
use syntax_js::ast::stx::TopLevel;
use syntax_js::keywords::is_reserved_word;

/// Renames every eligible symbol to a globally unique short name, rather
/// than the shortest locally free one. The output is larger than what
/// [`crate::mangle::mangle_names`] produces, but every binding can then be
/// discussed, grepped, or instrumented without ambiguity.
pub fn expand_names(top: &mut Node<TopLevel>, table: &mut SymbolTable, opts: &MangleOptions) {
  let opts = opts.normalized();
  // Frequency ranking is pointless here; a fresh generator keeps the
  // enumeration order stable across runs.
  let mut base54 = Base54::new();
  base54.sort();
  let avoid = find_colliding_names(table, &opts);
  let mut cname = 0usize;
  if opts.cache.is_none() {
    for name in table.global_names().to_vec() {
      if let Some(sym) = table.get_global(&name) {
        rename_symbol(table, &base54, &opts, sym, &avoid, &mut cname);
      }
    }
  }
  for scope in table.scope_ids().collect::<Vec<_>>() {
    let declared: Vec<SymbolId> = table
      .scope(scope)
      .names()
      .iter()
      .filter_map(|name| table.scope(scope).get_symbol(name))
      .collect();
    for sym in declared {
      rename_symbol(table, &base54, &opts, sym, &avoid, &mut cname);
    }
  }
  apply_renames(top, table);
}

/// Names the generator must never produce: user-reserved names, names of
/// symbols that stay as-is, and short names already pinned by the cache.
fn find_colliding_names(table: &SymbolTable, opts: &MangleOptions) -> HashSet<String> {
  let mut avoid = opts.reserved.clone();
  if let Some(cache) = &opts.cache {
    avoid.extend(cache.cached_value_set());
  }
  for name in table.global_names() {
    let Some(sym) = table.get_global(name) else {
      continue;
    };
    if let Some(cache) = &opts.cache {
      if let Some(cached) = cache.get_cached(name) {
        avoid.insert(cached);
        continue;
      }
    }
    if unmangleable(table, opts, sym) {
      avoid.insert(name.clone());
    }
  }
  for scope in table.scope_ids() {
    for name in table.scope(scope).names() {
      let Some(sym) = table.scope(scope).get_symbol(name) else {
        continue;
      };
      if unmangleable(table, opts, sym) {
        avoid.insert(name.clone());
      }
    }
  }
  avoid
}

fn rename_symbol(
  table: &mut SymbolTable,
  base54: &Base54,
  opts: &MangleOptions,
  sym: SymbolId,
  avoid: &HashSet<String>,
  cname: &mut usize,
) {
  if table.symbol(sym).mangled_name.is_some() {
    return;
  }
  if table.symbol(sym).global && opts.cache.is_some() {
    // Globals keep their cached names under expansion; assigning fresh
    // ones would desynchronize the other units.
    if let Some(cache) = &opts.cache {
      let name = table.symbol(sym).name.clone();
      if let Some(cached) = cache.get_cached(&name) {
        table.symbol_mut(sym).mangled_name = Some(cached);
      }
    }
    return;
  }
  if unmangleable(table, opts, sym) {
    return;
  }
  if opts.reserved.contains(&table.symbol(sym).name) {
    return;
  }
  if let Some(redef) = table.symbol(sym).redefined_catch_def {
    let inherited = table
      .symbol(redef)
      .mangled_name
      .clone()
      .unwrap_or_else(|| table.symbol(redef).name.clone());
    table.symbol_mut(sym).mangled_name = Some(inherited);
    return;
  }
  let name = loop {
    let name = base54.name(*cname);
    *cname += 1;
    if !is_reserved_word(&name) && !avoid.contains(&name) {
      break name;
    }
  };
  table.symbol_mut(sym).mangled_name = Some(name);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::symbol::DeclKind;
  use crate::symbol::ScopeType;
  use ahash::HashSetExt;
  use syntax_js::loc::Loc;

  #[test]
  fn test_rename_symbol_assigns_distinct_names_across_scopes() {
    let mut table = SymbolTable::new(ScopeType::Global);
    let a = table.create_scope(table.top_scope(), ScopeType::Closure);
    let b = table.create_scope(table.top_scope(), ScopeType::Closure);
    let x = table.def_variable(a, "x", DeclKind::Let, Loc(0, 1)).unwrap();
    let y = table.def_variable(b, "x", DeclKind::Let, Loc(8, 9)).unwrap();
    let mut base54 = Base54::new();
    base54.sort();
    let opts = MangleOptions::new().normalized();
    let avoid = HashSet::new();
    let mut cname = 0;
    rename_symbol(&mut table, &base54, &opts, x, &avoid, &mut cname);
    rename_symbol(&mut table, &base54, &opts, y, &avoid, &mut cname);
    assert_ne!(
      table.symbol(x).mangled_name,
      table.symbol(y).mangled_name
    );
  }

  #[test]
  fn test_find_colliding_names_includes_pinned_globals() {
    let mut table = SymbolTable::new(ScopeType::Global);
    table.def_global("window");
    let opts = MangleOptions::new().normalized();
    let avoid = find_colliding_names(&table, &opts);
    assert!(avoid.contains("window"));
    assert!(avoid.contains("arguments"));
  }
}
