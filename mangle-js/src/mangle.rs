use crate::base54::compute_char_frequency;
use crate::base54::Base54;
use crate::compat::CompatMode;
use crate::rename::apply_renames;
use crate::symbol::DeclKind;
use crate::symbol::ExportMode;
use crate::symbol::LabelId;
use crate::symbol::ScopeId;
use crate::symbol::SymbolId;
use crate::symbol::SymbolTable;
use ahash::HashMap;
use ahash::HashSet;
use ahash::HashSetExt;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parking_lot::Mutex;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::sync::Arc;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::LabelStmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::keywords::is_reserved_word;

/// Name-preservation policy for function or class names.
#[derive(Clone, Debug, Default)]
pub enum KeepNames {
  #[default]
  None,
  All,
  /// Preserve only names in the set.
  Only(HashSet<String>),
}

impl KeepNames {
  pub fn keeps(&self, name: &str) -> bool {
    match self {
      KeepNames::None => false,
      KeepNames::All => true,
      KeepNames::Only(names) => names.contains(name),
    }
  }
}

/// Persistent mapping from original global names to their assigned short
/// names, shared across compilations of the units of one program so that
/// cross-unit references keep lining up.
#[derive(Default)]
pub struct NameCache {
  props: Mutex<HashMap<String, String>>,
}

impl NameCache {
  pub fn get_cached(&self, name: &str) -> Option<String> {
    self.props.lock().get(name).cloned()
  }

  pub fn set_cached(&self, name: &str, short: &str) {
    self
      .props
      .lock()
      .insert(name.to_string(), short.to_string());
  }

  pub fn len(&self) -> usize {
    self.props.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.props.lock().is_empty()
  }

  /// Every short name handed out so far; these may never be reassigned.
  pub fn cached_value_set(&self) -> HashSet<String> {
    self.props.lock().values().cloned().collect()
  }
}

impl Serialize for NameCache {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let props = self.props.lock();
    let mut entries: Vec<(&String, &String)> = props.iter().collect();
    entries.sort();
    serializer.collect_map(entries)
  }
}

impl<'de> Deserialize<'de> for NameCache {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<NameCache, D::Error> {
    let props = HashMap::<String, String>::deserialize(deserializer)?;
    Ok(NameCache {
      props: Mutex::new(props),
    })
  }
}

/// Options controlling identifier mangling.
#[derive(Clone, Default)]
pub struct MangleOptions {
  /// Rename bindings declared at the top level.
  pub toplevel: bool,
  /// The unit is a module; implies `toplevel`.
  pub module: bool,
  /// Rename even where `eval` or `with` makes that unsound in general.
  pub allow_eval: bool,
  /// Preserve function names (affects `Function.prototype.name`).
  pub keep_fnames: KeepNames,
  /// Preserve class names (affects `Class.name`).
  pub keep_classnames: KeepNames,
  /// Names never to generate, and never to strip from declarations.
  pub reserved: HashSet<String>,
  /// Cross-unit global name cache.
  pub cache: Option<Arc<NameCache>>,
  pub compat: CompatMode,
  /// Let literal text weigh into the character frequency ranking.
  pub consider_literals: bool,
}

impl MangleOptions {
  pub fn new() -> MangleOptions {
    MangleOptions {
      consider_literals: true,
      ..Default::default()
    }
  }

  pub(crate) fn normalized(&self) -> MangleOptions {
    let mut opts = self.clone();
    if opts.module {
      opts.toplevel = true;
    }
    // Never generate, and never rename, `arguments`.
    opts.reserved.insert("arguments".to_string());
    opts
  }
}

/// Whether renaming this symbol could change behavior. Everything else is
/// eligible.
pub fn unmangleable(table: &SymbolTable, opts: &MangleOptions, sym: SymbolId) -> bool {
  let s = table.symbol(sym);
  if s.undeclared {
    return true;
  }
  if s.global && !opts.toplevel {
    return true;
  }
  if s.export == ExportMode::FixedName {
    return true;
  }
  if table.scope(s.scope).is_dynamic() && !opts.allow_eval {
    return true;
  }
  let is_fn_name = s.init_is_func
    || s
      .orig
      .iter()
      .any(|(k, _)| matches!(k, DeclKind::FuncName | DeclKind::FuncExprName));
  if is_fn_name && opts.keep_fnames.keeps(&s.name) {
    return true;
  }
  let is_class_name = s
    .orig
    .iter()
    .any(|(k, _)| matches!(k, DeclKind::ClassName | DeclKind::ClassExprName));
  if is_class_name && opts.keep_classnames.keeps(&s.name) {
    return true;
  }
  false
}

/// Assigns a short name to every eligible symbol and label, then rewrites
/// the tree in place. Requires a fully resolved table.
pub fn mangle_names(top: &mut Node<TopLevel>, table: &mut SymbolTable, opts: &MangleOptions) {
  let opts = opts.normalized();
  let mut base54 = compute_char_frequency(top, table, &opts);
  base54.sort();
  assign_names(table, &base54, &opts);
  assign_label_names(top, table, &base54);
  apply_renames(top, table);
}

fn assign_names(table: &mut SymbolTable, base54: &Base54, opts: &MangleOptions) {
  let mut mangled_names = match &opts.cache {
    Some(cache) => cache.cached_value_set(),
    None => HashSet::new(),
  };
  if opts.cache.is_some() {
    // With a cache, globals go first so fresh cache entries are assigned
    // before local scopes start consuming the enumeration order.
    let globals: Vec<SymbolId> = table
      .global_names()
      .iter()
      .filter_map(|name| table.get_global(name))
      .collect();
    for sym in globals {
      mangle_symbol(table, base54, opts, sym, &mut mangled_names);
    }
  }
  for scope in table.scope_ids().collect::<Vec<_>>() {
    let declared: Vec<SymbolId> = table
      .scope(scope)
      .names()
      .iter()
      .filter(|name| !opts.reserved.contains(name.as_str()))
      .filter_map(|name| table.scope(scope).get_symbol(name))
      .collect();
    for sym in declared {
      mangle_symbol(table, base54, opts, sym, &mut mangled_names);
    }
  }
}

fn mangle_symbol(
  table: &mut SymbolTable,
  base54: &Base54,
  opts: &MangleOptions,
  sym: SymbolId,
  mangled_names: &mut HashSet<String>,
) {
  if table.symbol(sym).mangled_name.is_some() {
    return;
  }
  let global = table.symbol(sym).global;
  if global {
    // Another unit may already have renamed this name, even if it is
    // undeclared here.
    if let Some(cache) = &opts.cache {
      let name = table.symbol(sym).name.clone();
      if let Some(cached) = cache.get_cached(&name) {
        table.symbol_mut(sym).mangled_name = Some(cached);
        return;
      }
    }
  }
  if unmangleable(table, opts, sym) {
    return;
  }
  if let Some(redef) = table.symbol(sym).redefined_catch_def {
    // A folded catch parameter shares its function-scoped counterpart's
    // name rather than consuming one of its own.
    let inherited = table
      .symbol(redef)
      .mangled_name
      .clone()
      .unwrap_or_else(|| table.symbol(redef).name.clone());
    table.symbol_mut(sym).mangled_name = Some(inherited);
    return;
  }
  let scope = table.symbol(sym).scope;
  let assign_scope = if opts.compat.legacy_catch()
    && table
      .symbol(sym)
      .orig
      .first()
      .is_some_and(|(k, _)| *k == DeclKind::FuncExprName)
  {
    // Legacy engines leak a function expression's name into the
    // surrounding scope, so the name must be free there too.
    table.scope(scope).parent.unwrap_or(scope)
  } else {
    scope
  };
  let name = next_mangled(table, base54, opts, assign_scope, sym, mangled_names);
  if global {
    if let Some(cache) = &opts.cache {
      cache.set_cached(&table.symbol(sym).name.clone(), &name);
      mangled_names.insert(name.clone());
    }
  }
  table.symbol_mut(sym).mangled_name = Some(name);
}

fn next_mangled(
  table: &mut SymbolTable,
  base54: &Base54,
  opts: &MangleOptions,
  scope: ScopeId,
  sym: SymbolId,
  mangled_names: &HashSet<String>,
) -> String {
  let enclosed = table.scope(scope).enclosed.clone();
  let at_top = scope == table.top_scope();
  // In a named function expression, a parameter must never end up with the
  // function's own name: `(function a(a) {})` is a strict-mode error.
  let tricky_name = if table
    .symbol(sym)
    .orig
    .first()
    .is_some_and(|(k, _)| *k == DeclKind::Param)
  {
    table
      .scope(table.symbol(sym).scope)
      .fn_expr_name
      .filter(|f| *f != sym)
      .map(|f| {
        table
          .symbol(f)
          .mangled_name
          .clone()
          .unwrap_or_else(|| table.symbol(f).name.clone())
      })
  } else {
    None
  };
  'candidates: loop {
    table.scope_mut(scope).cname += 1;
    let m = base54.name(table.scope(scope).cname as usize);
    if is_reserved_word(&m) || opts.reserved.contains(&m) {
      continue;
    }
    if at_top && mangled_names.contains(&m) {
      continue;
    }
    if tricky_name.as_deref() == Some(m.as_str()) {
      continue;
    }
    for &enc in &enclosed {
      if enc == sym {
        continue;
      }
      let taken = match &table.symbol(enc).mangled_name {
        Some(name) => Some(name.as_str()),
        None if unmangleable(table, opts, enc) => Some(table.symbol(enc).name.as_str()),
        None => None,
      };
      if taken == Some(m.as_str()) {
        continue 'candidates;
      }
    }
    return m;
  }
}

type LabelStmtNode = Node<LabelStmt>;

fn assign_label_names(top: &mut Node<TopLevel>, table: &mut SymbolTable, base54: &Base54) {
  let mut visitor = LabelNameVisitor {
    table,
    base54,
    lname: -1,
    saved: Vec::new(),
  };
  top.drive_mut(&mut visitor);
}

/// Labels cannot collide with variables, so they enumerate independently;
/// the counter save/restore lets disjoint labels share the shortest names.
#[derive(VisitorMut)]
#[visitor(LabelStmtNode(enter, exit))]
struct LabelNameVisitor<'a> {
  table: &'a mut SymbolTable,
  base54: &'a Base54,
  lname: i64,
  saved: Vec<i64>,
}

impl<'a> LabelNameVisitor<'a> {
  fn enter_label_stmt_node(&mut self, node: &mut LabelStmtNode) {
    self.saved.push(self.lname);
    let name = loop {
      self.lname += 1;
      let name = self.base54.name(self.lname as usize);
      if !is_reserved_word(&name) {
        break name;
      }
    };
    if let Some(&id) = node.assoc.get::<LabelId>() {
      self.table.label_mut(id).mangled_name = Some(name);
    }
  }

  fn exit_label_stmt_node(&mut self, _node: &mut LabelStmtNode) {
    self.lname = self.saved.pop().unwrap_or(-1);
  }
}
