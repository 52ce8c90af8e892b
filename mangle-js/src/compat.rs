use crate::symbol::ScopeId;
use crate::symbol::SymbolId;
use crate::symbol::SymbolTable;
use ahash::HashMap;
use ahash::HashMapExt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use derive_visitor::Visitor;
use derive_visitor::VisitorMut;
use syntax_js::ast::expr::pat::IdPat;
use syntax_js::ast::expr::pat::Pat;
use syntax_js::ast::expr::IdExpr;
use syntax_js::ast::node::Node;
use syntax_js::ast::node::NodeAssocData;
use syntax_js::ast::stmt::CatchBlock;
use syntax_js::ast::stmt::ForInStmt;
use syntax_js::ast::stmt::ForOfStmt;
use syntax_js::ast::stmt::ForTripleStmt;
use syntax_js::ast::stx::TopLevel;

/// Which legacy engine scoping behaviors to correct for.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CompatMode {
  #[default]
  None,
  /// Engines where a catch parameter is function-scoped.
  LegacyCatch,
  /// Engines where `let` in a loop head leaks into the surrounding scope.
  LegacyLoop,
  Both,
}

impl CompatMode {
  pub fn legacy_catch(self) -> bool {
    matches!(self, CompatMode::LegacyCatch | CompatMode::Both)
  }

  pub fn legacy_loop(self) -> bool {
    matches!(self, CompatMode::LegacyLoop | CompatMode::Both)
  }
}

type CatchBlockNode = Node<CatchBlock>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type ForInStmtNode = Node<ForInStmt>;
type ForOfStmtNode = Node<ForOfStmt>;
type ForTripleStmtNode = Node<ForTripleStmt>;

/// Folds every catch parameter into its enclosing function scope and
/// retargets each occurrence, matching engines that never gave catch its
/// own scope.
pub fn apply_legacy_catch(top: &mut Node<TopLevel>, table: &mut SymbolTable) {
  let mut collector = CatchCollector {
    table,
    retarget: HashMap::new(),
  };
  top.drive(&mut collector);
  let retarget = collector.retarget;
  if retarget.is_empty() {
    return;
  }
  let mut visitor = RetargetVisitor {
    map: &retarget,
  };
  top.drive_mut(&mut visitor);
}

#[derive(Visitor)]
#[visitor(CatchBlockNode(enter))]
struct CatchCollector<'a> {
  table: &'a mut SymbolTable,
  retarget: HashMap<SymbolId, SymbolId>,
}

impl<'a> CatchCollector<'a> {
  fn enter_catch_block_node(&mut self, node: &CatchBlockNode) {
    let Some(parameter) = &node.stx.parameter else {
      return;
    };
    let mut bound = Vec::new();
    collect_pat_symbols(&parameter.stx.pat, &mut bound);
    for sym in bound {
      let counterpart = self.table.redefine_catch(sym);
      self.retarget.insert(sym, counterpart);
    }
  }
}

fn collect_pat_symbols(pat: &Node<Pat>, out: &mut Vec<SymbolId>) {
  match pat.stx.as_ref() {
    Pat::Id(id) => {
      if let Some(&sym) = id.assoc.get::<SymbolId>() {
        out.push(sym);
      }
    }
    Pat::Arr(arr) => {
      for elem in arr.stx.elements.iter().flatten() {
        collect_pat_symbols(&elem.target, out);
      }
      if let Some(rest) = &arr.stx.rest {
        collect_pat_symbols(rest, out);
      }
    }
    Pat::Obj(obj) => {
      for prop in obj.stx.properties.iter() {
        collect_pat_symbols(&prop.stx.target, out);
      }
      if let Some(rest) = &obj.stx.rest {
        if let Some(&sym) = rest.assoc.get::<SymbolId>() {
          out.push(sym);
        }
      }
    }
  }
}

#[derive(VisitorMut)]
#[visitor(IdExprNode(enter), IdPatNode(enter))]
struct RetargetVisitor<'a> {
  map: &'a HashMap<SymbolId, SymbolId>,
}

impl<'a> RetargetVisitor<'a> {
  fn retarget(&self, node_assoc: &mut NodeAssocData) {
    let Some(&sym) = node_assoc.get::<SymbolId>() else {
      return;
    };
    if let Some(&to) = self.map.get(&sym) {
      node_assoc.set(to);
    }
  }

  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    self.retarget(&mut node.assoc);
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    self.retarget(&mut node.assoc);
  }
}

/// Widens every loop scope's enclosed set with everything declared in its
/// immediate parent, so renaming cannot reuse a name the parent already
/// holds. Works around engines that hoist loop-head `let` too far.
pub fn apply_legacy_loop(top: &Node<TopLevel>, table: &mut SymbolTable) {
  let mut collector = LoopScopeCollector::default();
  top.drive(&mut collector);
  for scope in collector.scopes {
    let Some(parent) = table.scope(scope).parent else {
      continue;
    };
    let declared: Vec<SymbolId> = table
      .scope(parent)
      .names()
      .iter()
      .filter_map(|name| table.scope(parent).get_symbol(name))
      .collect();
    for sym in declared {
      if !table.scope(scope).enclosed.contains(&sym) {
        table.scope_mut(scope).enclosed.push(sym);
      }
    }
  }
}

#[derive(Default, Visitor)]
#[visitor(ForInStmtNode(enter), ForOfStmtNode(enter), ForTripleStmtNode(enter))]
struct LoopScopeCollector {
  scopes: Vec<ScopeId>,
}

impl LoopScopeCollector {
  fn push_scope(&mut self, assoc: &NodeAssocData) {
    if let Some(&scope) = assoc.get::<ScopeId>() {
      self.scopes.push(scope);
    }
  }

  fn enter_for_in_stmt_node(&mut self, node: &ForInStmtNode) {
    self.push_scope(&node.assoc);
  }

  fn enter_for_of_stmt_node(&mut self, node: &ForOfStmtNode) {
    self.push_scope(&node.assoc);
  }

  fn enter_for_triple_stmt_node(&mut self, node: &ForTripleStmtNode) {
    self.push_scope(&node.assoc);
  }
}
