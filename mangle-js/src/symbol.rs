use crate::error::ScopeError;
use crate::error::ScopeErrorType;
use crate::error::ScopeResult;
use ahash::HashMap;
use ahash::HashMapExt;
use serde::Serialize;
use syntax_js::loc::Loc;

/// Handle into [SymbolTable::scopes]. Stable for the lifetime of the table;
/// handles are allocated in creation order, which for a single build pass is
/// preorder over the scope tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct ScopeId(u32);

/// Handle into [SymbolTable::symbols]. Also serves as the symbol's stable
/// numeric identity for caching and name-preservation lookups.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct SymbolId(u32);

/// Handle into [SymbolTable::labels].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct LabelId(u32);

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum ScopeType {
  Global,
  Module,
  /// Function of any form. Arrow functions additionally carry
  /// [ScopeData::is_arrow].
  Closure,
  Class,
  Block,
}

impl ScopeType {
  /// Function-like scopes are hoisting targets: `var` and function
  /// declarations anywhere inside land here.
  pub fn is_closure(&self) -> bool {
    match self {
      ScopeType::Global | ScopeType::Module | ScopeType::Closure | ScopeType::Class => true,
      ScopeType::Block => false,
    }
  }
}

/// What kind of construct declared a name. A merged symbol keeps one entry
/// per declaration site.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum DeclKind {
  Var,
  Let,
  Const,
  CatchParam,
  Param,
  FuncName,
  FuncExprName,
  ClassName,
  ClassExprName,
  Import,
}

impl DeclKind {
  /// Kinds that refuse to merge with anything except a function expression's
  /// own name. `var`/`function`/parameters merge freely among themselves.
  pub fn is_block_decl(&self) -> bool {
    match self {
      DeclKind::Let
      | DeclKind::Const
      | DeclKind::CatchParam
      | DeclKind::ClassName
      | DeclKind::ClassExprName
      | DeclKind::Import => true,
      DeclKind::Var | DeclKind::Param | DeclKind::FuncName | DeclKind::FuncExprName => false,
    }
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum ExportMode {
  None,
  /// The name is visible to other modules as-is and must not change.
  FixedName,
  /// Exported, but consumers bind the export slot rather than the
  /// identifier (default-exported function/class declarations).
  Renamable,
}

#[derive(Debug)]
pub struct SymbolData {
  pub name: String,
  /// Owning scope; never changes after creation.
  pub scope: ScopeId,
  /// Declaration sites in source order.
  pub orig: Vec<(DeclKind, Loc)>,
  /// Every identifier use bound to this symbol.
  pub references: Vec<Loc>,
  pub global: bool,
  /// Created by the resolver for a reference that no declaration satisfies.
  pub undeclared: bool,
  pub export: ExportMode,
  /// Set when a `var` declarator's initializer is a function, so function
  /// name preservation can also cover `var f = function() {}`.
  pub init_is_func: bool,
  pub mangled_name: Option<String>,
  /// Under legacy catch scoping, the function-scoped counterpart this
  /// catch parameter was folded into.
  pub redefined_catch_def: Option<SymbolId>,
}

impl SymbolData {
  pub fn unreferenced(&self) -> bool {
    self.references.is_empty()
  }
}

#[derive(Debug)]
pub struct LabelData {
  pub name: String,
  pub loc: Loc,
  pub references: Vec<Loc>,
  pub mangled_name: Option<String>,
}

#[derive(Debug)]
pub struct ScopeData {
  pub typ: ScopeType,
  pub is_arrow: bool,
  pub parent: Option<ScopeId>,
  /// Nearest enclosing function-like scope, self included.
  pub defun: ScopeId,
  pub children: Vec<ScopeId>,
  /// Declared names in declaration order; keys of `variables`.
  names: Vec<String>,
  variables: HashMap<String, SymbolId>,
  /// Subset of `variables` declared by function declarations.
  functions: HashMap<String, SymbolId>,
  pub uses_with: bool,
  pub uses_eval: bool,
  pub uses_arguments: bool,
  /// Symbols of this or an outer scope referenced from this scope or any
  /// descendant. Sole source of collision information when renaming.
  pub enclosed: Vec<SymbolId>,
  /// Per-scope naming counter; -1 until name assignment starts.
  pub cname: i64,
  /// The function expression's own name binding, if this is the scope of a
  /// named function expression.
  pub fn_expr_name: Option<SymbolId>,
}

impl ScopeData {
  pub fn names(&self) -> &[String] {
    &self.names
  }

  pub fn get_symbol(&self, name: &str) -> Option<SymbolId> {
    self.variables.get(name).copied()
  }

  pub fn get_function(&self, name: &str) -> Option<SymbolId> {
    self.functions.get(name).copied()
  }

  /// True once renaming may no longer assume anything about what names are
  /// visible here.
  pub fn is_dynamic(&self) -> bool {
    self.uses_with || self.uses_eval
  }
}

/// Arena of every scope, symbol, and label of one program, plus the flat
/// registry of implicit globals. All cross-references are handles, so both
/// directions of the scope tree are O(1) without ownership cycles.
#[derive(Debug)]
pub struct SymbolTable {
  scopes: Vec<ScopeData>,
  symbols: Vec<SymbolData>,
  labels: Vec<LabelData>,
  globals: HashMap<String, SymbolId>,
  /// Keys of `globals` in creation order, for deterministic iteration.
  global_names: Vec<String>,
  top: ScopeId,
}

fn push_uniq<T: PartialEq>(v: &mut Vec<T>, x: T) {
  if !v.contains(&x) {
    v.push(x);
  }
}

impl SymbolTable {
  pub fn new(top_typ: ScopeType) -> SymbolTable {
    let top = ScopeId(0);
    SymbolTable {
      scopes: vec![ScopeData {
        typ: top_typ,
        is_arrow: false,
        parent: None,
        defun: top,
        children: Vec::new(),
        names: Vec::new(),
        variables: HashMap::new(),
        functions: HashMap::new(),
        uses_with: false,
        uses_eval: false,
        uses_arguments: false,
        enclosed: Vec::new(),
        cname: -1,
        fn_expr_name: None,
      }],
      symbols: Vec::new(),
      labels: Vec::new(),
      globals: HashMap::new(),
      global_names: Vec::new(),
      top,
    }
  }

  pub fn top_scope(&self) -> ScopeId {
    self.top
  }

  pub fn scope(&self, id: ScopeId) -> &ScopeData {
    &self.scopes[id.0 as usize]
  }

  pub fn scope_mut(&mut self, id: ScopeId) -> &mut ScopeData {
    &mut self.scopes[id.0 as usize]
  }

  pub fn symbol(&self, id: SymbolId) -> &SymbolData {
    &self.symbols[id.0 as usize]
  }

  pub fn symbol_mut(&mut self, id: SymbolId) -> &mut SymbolData {
    &mut self.symbols[id.0 as usize]
  }

  pub fn label(&self, id: LabelId) -> &LabelData {
    &self.labels[id.0 as usize]
  }

  pub fn label_mut(&mut self, id: LabelId) -> &mut LabelData {
    &mut self.labels[id.0 as usize]
  }

  /// All scopes in creation order. For a tree built in one pass this is
  /// preorder, so every scope appears after its ancestors.
  pub fn scope_ids(&self) -> impl Iterator<Item = ScopeId> {
    (0..self.scopes.len() as u32).map(ScopeId)
  }

  pub fn label_ids(&self) -> impl Iterator<Item = LabelId> {
    (0..self.labels.len() as u32).map(LabelId)
  }

  pub fn global_names(&self) -> &[String] {
    &self.global_names
  }

  pub fn get_global(&self, name: &str) -> Option<SymbolId> {
    self.globals.get(name).copied()
  }

  pub fn create_scope(&mut self, parent: ScopeId, typ: ScopeType) -> ScopeId {
    let id = ScopeId(self.scopes.len() as u32);
    let p = self.scope(parent);
    // Hazard flags are sticky and inherited by scopes created afterwards.
    let uses_with = p.uses_with;
    let uses_eval = p.uses_eval;
    let defun = if typ.is_closure() { id } else { p.defun };
    self.scopes.push(ScopeData {
      typ,
      is_arrow: false,
      parent: Some(parent),
      defun,
      children: Vec::new(),
      names: Vec::new(),
      variables: HashMap::new(),
      functions: HashMap::new(),
      uses_with,
      uses_eval,
      uses_arguments: false,
      enclosed: Vec::new(),
      cname: -1,
      fn_expr_name: None,
    });
    self.scope_mut(parent).children.push(id);
    id
  }

  pub fn create_label(&mut self, name: String, loc: Loc) -> LabelId {
    let id = LabelId(self.labels.len() as u32);
    self.labels.push(LabelData {
      name,
      loc,
      references: Vec::new(),
      mangled_name: None,
    });
    id
  }

  /// Declares `name` directly in `scope`, merging into an existing symbol
  /// where the combination is legal.
  pub fn def_variable(
    &mut self,
    scope: ScopeId,
    name: &str,
    kind: DeclKind,
    loc: Loc,
  ) -> ScopeResult<SymbolId> {
    if let Some(existing) = self.scope(scope).get_symbol(name) {
      let legal = if kind.is_block_decl() {
        // A block-scoped declaration tolerates only a function expression's
        // own name under it, e.g. `(function f() { let f; })`.
        self
          .symbol(existing)
          .orig
          .iter()
          .all(|(k, _)| *k == DeclKind::FuncExprName)
      } else {
        !self.symbol(existing).orig.iter().any(|(k, _)| k.is_block_decl())
      };
      if !legal {
        return Err(ScopeError::new(ScopeErrorType::Redeclaration, loc));
      }
      self.symbol_mut(existing).orig.push((kind, loc));
      return Ok(existing);
    }

    let id = SymbolId(self.symbols.len() as u32);
    self.symbols.push(SymbolData {
      name: name.to_string(),
      scope,
      orig: vec![(kind, loc)],
      references: Vec::new(),
      global: scope == self.top,
      undeclared: false,
      export: ExportMode::None,
      init_is_func: false,
      mangled_name: None,
      redefined_catch_def: None,
    });
    self.scope_mut(scope).names.push(name.to_string());
    self.scope_mut(scope).variables.insert(name.to_string(), id);
    Ok(id)
  }

  /// Like [Self::def_variable] but also records the symbol in the scope's
  /// function map.
  pub fn def_function(
    &mut self,
    scope: ScopeId,
    name: &str,
    loc: Loc,
  ) -> ScopeResult<SymbolId> {
    let id = self.def_variable(scope, name, DeclKind::FuncName, loc)?;
    self.scope_mut(scope).functions.insert(name.to_string(), id);
    Ok(id)
  }

  /// The program-wide symbol for an undeclared name, created on first use.
  pub fn def_global(&mut self, name: &str) -> SymbolId {
    if let Some(id) = self.globals.get(name) {
      return *id;
    }
    let id = SymbolId(self.symbols.len() as u32);
    self.symbols.push(SymbolData {
      name: name.to_string(),
      scope: self.top,
      orig: Vec::new(),
      references: Vec::new(),
      global: true,
      undeclared: true,
      export: ExportMode::None,
      init_is_func: false,
      mangled_name: None,
      redefined_catch_def: None,
    });
    self.globals.insert(name.to_string(), id);
    self.global_names.push(name.to_string());
    id
  }

  pub fn find_symbol(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
    self.find_symbol_with_scope(scope, name).map(|(_, sym)| sym)
  }

  /// Walks the scope chain outwards from `scope` for a declaration of
  /// `name`, returning the declaring scope as well.
  pub fn find_symbol_with_scope(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, SymbolId)> {
    let mut cur = Some(scope);
    while let Some(id) = cur {
      if let Some(sym) = self.scope(id).get_symbol(name) {
        return Some((id, sym));
      }
      cur = self.scope(id).parent;
    }
    None
  }

  pub fn add_ref(&mut self, sym: SymbolId, loc: Loc) {
    self.symbol_mut(sym).references.push(loc);
  }

  pub fn add_label_ref(&mut self, label: LabelId, loc: Loc) {
    self.label_mut(label).references.push(loc);
  }

  /// Records that `sym` is visible-and-used within `from` by adding it to
  /// the enclosed set of every scope from `from` up to and including the
  /// symbol's owning scope.
  pub fn mark_enclosed(&mut self, sym: SymbolId, from: ScopeId) {
    let owner = self.symbol(sym).scope;
    let mut cur = Some(from);
    while let Some(id) = cur {
      push_uniq(&mut self.scope_mut(id).enclosed, sym);
      if id == owner {
        break;
      }
      cur = self.scope(id).parent;
    }
  }

  /// Marks dynamic evaluation from `scope` up to the root. Stops early at an
  /// already-marked scope, whose ancestors are then marked too.
  pub fn mark_eval(&mut self, scope: ScopeId) {
    let mut cur = Some(scope);
    while let Some(id) = cur {
      if self.scope(id).uses_eval {
        break;
      }
      self.scope_mut(id).uses_eval = true;
      cur = self.scope(id).parent;
    }
  }

  pub fn mark_with(&mut self, scope: ScopeId) {
    let mut cur = Some(scope);
    while let Some(id) = cur {
      if self.scope(id).uses_with {
        break;
      }
      self.scope_mut(id).uses_with = true;
      cur = self.scope(id).parent;
    }
  }

  pub fn is_ancestor_of(&self, maybe_ancestor: ScopeId, scope: ScopeId) -> bool {
    let mut cur = Some(scope);
    while let Some(id) = cur {
      if id == maybe_ancestor {
        return true;
      }
      cur = self.scope(id).parent;
    }
    false
  }

  fn subtree(&self, root: ScopeId) -> Vec<ScopeId> {
    let mut out = vec![root];
    let mut i = 0;
    while i < out.len() {
      out.extend(self.scope(out[i]).children.iter().copied());
      i += 1;
    }
    out
  }

  /// Folds a catch parameter into its function scope under legacy catch
  /// scoping: merges (or creates) the same-named binding in the enclosing
  /// function scope, moves the references over, and links the catch symbol
  /// to its counterpart so it later shares the counterpart's name. Merging
  /// here is unchecked; the colliding binding is the point of the fixup.
  pub fn redefine_catch(&mut self, catch_sym: SymbolId) -> SymbolId {
    let catch_scope = self.symbol(catch_sym).scope;
    let defun = self.scope(catch_scope).defun;
    let name = self.symbol(catch_sym).name.clone();
    let counterpart = match self.scope(defun).get_symbol(&name) {
      Some(existing) => existing,
      None => {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(SymbolData {
          name: name.clone(),
          scope: defun,
          orig: Vec::new(),
          references: Vec::new(),
          global: defun == self.top,
          undeclared: false,
          export: ExportMode::None,
          init_is_func: false,
          mangled_name: None,
          redefined_catch_def: None,
        });
        self.scope_mut(defun).names.push(name.clone());
        self.scope_mut(defun).variables.insert(name, id);
        id
      }
    };
    let orig = self.symbol(catch_sym).orig.clone();
    let refs = std::mem::take(&mut self.symbol_mut(catch_sym).references);
    self.symbol_mut(counterpart).orig.extend(orig);
    self.symbol_mut(counterpart).references.extend(refs);
    self.symbol_mut(catch_sym).redefined_catch_def = Some(counterpart);
    self.mark_enclosed(counterpart, catch_scope);
    counterpart
  }

  /// Moves `scope` (with its whole subtree) under `new_parent`, eagerly
  /// recomputing defun targets inside the subtree and the enclosed sets of
  /// the new ancestors. Used when an optimizer relocates a nested function.
  pub fn reparent_scope(&mut self, scope: ScopeId, new_parent: ScopeId) {
    let old_parent = self.scope(scope).parent;
    if let Some(old) = old_parent {
      self.scope_mut(old).children.retain(|c| *c != scope);
    }
    self.scope_mut(scope).parent = Some(new_parent);
    self.scope_mut(new_parent).children.push(scope);

    let subtree = self.subtree(scope);
    for &id in &subtree {
      let defun = if self.scope(id).typ.is_closure() {
        id
      } else {
        // Parents precede children in `subtree`, so this is already final.
        let parent = self.scope(id).parent.unwrap_or(id);
        self.scope(parent).defun
      };
      self.scope_mut(id).defun = defun;
    }

    // Everything the subtree encloses that lives above the new parent must
    // now be visible along the new ancestor chain.
    let mut moved: Vec<SymbolId> = Vec::new();
    for &id in &subtree {
      for &sym in &self.scope(id).enclosed {
        push_uniq(&mut moved, sym);
      }
    }
    for sym in moved {
      let owner = self.symbol(sym).scope;
      if self.is_ancestor_of(owner, new_parent) {
        self.mark_enclosed(sym, new_parent);
      }
    }

    if subtree.iter().any(|&id| self.scope(id).uses_eval) {
      self.mark_eval(new_parent);
    }
    if subtree.iter().any(|&id| self.scope(id).uses_with) {
      self.mark_with(new_parent);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_var_merges_with_function_decl() {
    let mut table = SymbolTable::new(ScopeType::Global);
    let top = table.top_scope();
    let a = table.def_function(top, "a", Loc(0, 1)).unwrap();
    let b = table.def_variable(top, "a", DeclKind::Var, Loc(5, 6)).unwrap();
    assert_eq!(a, b);
    assert_eq!(table.symbol(a).orig.len(), 2);
  }

  #[test]
  fn test_let_rejects_redeclaration() {
    let mut table = SymbolTable::new(ScopeType::Global);
    let top = table.top_scope();
    table.def_variable(top, "x", DeclKind::Let, Loc(0, 1)).unwrap();
    let err = table
      .def_variable(top, "x", DeclKind::Let, Loc(5, 6))
      .unwrap_err();
    assert_eq!(err.typ, ScopeErrorType::Redeclaration);
    assert_eq!(err.loc, Loc(5, 6));
  }

  #[test]
  fn test_var_rejects_prior_let() {
    let mut table = SymbolTable::new(ScopeType::Global);
    let top = table.top_scope();
    table.def_variable(top, "x", DeclKind::Let, Loc(0, 1)).unwrap();
    assert!(table.def_variable(top, "x", DeclKind::Var, Loc(5, 6)).is_err());
  }

  #[test]
  fn test_let_merges_only_into_fn_expr_name() {
    let mut table = SymbolTable::new(ScopeType::Global);
    let fn_scope = table.create_scope(table.top_scope(), ScopeType::Closure);
    let f = table
      .def_variable(fn_scope, "f", DeclKind::FuncExprName, Loc(1, 2))
      .unwrap();
    let shadow = table
      .def_variable(fn_scope, "f", DeclKind::Let, Loc(3, 4))
      .unwrap();
    assert_eq!(f, shadow);
  }

  #[test]
  fn test_find_symbol_walks_chain() {
    let mut table = SymbolTable::new(ScopeType::Global);
    let top = table.top_scope();
    let sym = table.def_variable(top, "x", DeclKind::Var, Loc(0, 1)).unwrap();
    let inner = table.create_scope(top, ScopeType::Closure);
    let block = table.create_scope(inner, ScopeType::Block);
    assert_eq!(table.find_symbol_with_scope(block, "x"), Some((top, sym)));
    assert_eq!(table.find_symbol(block, "y"), None);
    assert_eq!(table.scope(block).defun, inner);
  }

  #[test]
  fn test_mark_enclosed_stops_at_owner() {
    let mut table = SymbolTable::new(ScopeType::Global);
    let top = table.top_scope();
    let outer = table.create_scope(top, ScopeType::Closure);
    let sym = table
      .def_variable(outer, "x", DeclKind::Let, Loc(0, 1))
      .unwrap();
    let inner = table.create_scope(outer, ScopeType::Closure);
    table.mark_enclosed(sym, inner);
    assert!(table.scope(inner).enclosed.contains(&sym));
    assert!(table.scope(outer).enclosed.contains(&sym));
    assert!(!table.scope(top).enclosed.contains(&sym));
  }

  #[test]
  fn test_globals_are_deduplicated() {
    let mut table = SymbolTable::new(ScopeType::Global);
    let a = table.def_global("console");
    let b = table.def_global("console");
    assert_eq!(a, b);
    assert!(table.symbol(a).undeclared);
    assert_eq!(table.global_names(), &["console".to_string()]);
  }

  #[test]
  fn test_reparent_recomputes_defun_and_enclosed() {
    let mut table = SymbolTable::new(ScopeType::Global);
    let top = table.top_scope();
    let host = table.create_scope(top, ScopeType::Closure);
    let x = table.def_variable(host, "x", DeclKind::Var, Loc(0, 1)).unwrap();
    let moved = table.create_scope(host, ScopeType::Block);
    table.mark_enclosed(x, moved);
    let other = table.create_scope(top, ScopeType::Closure);
    table.reparent_scope(moved, other);
    assert_eq!(table.scope(moved).parent, Some(other));
    assert_eq!(table.scope(moved).defun, other);
    // x is owned by a scope that is no longer an ancestor; the new chain
    // must not claim visibility of it.
    assert!(!table.scope(other).enclosed.contains(&x));
  }
}
