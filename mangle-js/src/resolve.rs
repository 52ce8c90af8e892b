use crate::symbol::DeclKind;
use crate::symbol::ScopeId;
use crate::symbol::ScopeType;
use crate::symbol::SymbolId;
use crate::symbol::SymbolTable;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use syntax_js::ast::expr::pat::IdPat;
use syntax_js::ast::expr::CallExpr;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::expr::IdExpr;
use syntax_js::ast::import_export::ExportNames;
use syntax_js::ast::import_export::ModuleExportImportName;
use syntax_js::ast::node::Node;
use syntax_js::ast::node::NodeAssocData;
use syntax_js::ast::stmt::ExportListStmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::loc::Loc;

type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type CallExprNode = Node<CallExpr>;
type ExportListStmtNode = Node<ExportListStmt>;

/// Second pass. Binds every identifier use to a symbol (creating implicit
/// globals where resolution fails), grows enclosed sets, and flags
/// `eval`/`arguments` hazards. Relies on the scope annotations the builder
/// left on nodes.
pub fn resolve_references(top: &mut Node<TopLevel>, table: &mut SymbolTable) {
  let mut visitor = ResolveVisitor { table };
  top.drive_mut(&mut visitor);
  enclose_catch_collisions(table);
}

/// A catch parameter that shares its name with a binding in the enclosing
/// function scope hides it inside the catch block, but a later legacy-catch
/// fold makes both print as one; renaming must treat the function-scoped
/// binding as taken along the whole chain either way.
fn enclose_catch_collisions(table: &mut SymbolTable) {
  for scope in table.scope_ids().collect::<Vec<_>>() {
    let declared: Vec<SymbolId> = table
      .scope(scope)
      .names()
      .iter()
      .filter_map(|name| table.scope(scope).get_symbol(name))
      .collect();
    for sym in declared {
      let is_catch = table
        .symbol(sym)
        .orig
        .first()
        .is_some_and(|(k, _)| *k == DeclKind::CatchParam);
      if !is_catch {
        continue;
      }
      let defun = table.scope(scope).defun;
      let name = table.symbol(sym).name.clone();
      if let Some(outer) = table.scope(defun).get_symbol(&name) {
        if outer != sym {
          table.mark_enclosed(outer, scope);
        }
      }
    }
  }
}

#[derive(VisitorMut)]
#[visitor(
  IdExprNode(enter),
  IdPatNode(enter),
  CallExprNode(enter),
  ExportListStmtNode(enter)
)]
struct ResolveVisitor<'a> {
  table: &'a mut SymbolTable,
}

impl<'a> ResolveVisitor<'a> {
  fn resolve(&mut self, scope: ScopeId, name: &str, loc: Loc, assoc: &mut NodeAssocData) {
    let sym = match self.table.find_symbol(scope, name) {
      Some(sym) => sym,
      None => self.table.def_global(name),
    };
    assoc.set(sym);
    self.table.add_ref(sym, loc);
    self.table.mark_enclosed(sym, scope);
    if name == "arguments" {
      // The nearest non-arrow function owns the implicit binding; a use
      // anywhere below it means the function consumes the arguments object.
      let owner = self.table.symbol(sym).scope;
      if self.table.scope(owner).typ == ScopeType::Closure {
        self.table.scope_mut(owner).uses_arguments = true;
      }
    }
  }

  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    let Some(&scope) = node.assoc.get::<ScopeId>() else {
      return;
    };
    let loc = node.loc;
    let name = node.stx.name.clone();
    self.resolve(scope, &name, loc, &mut node.assoc);
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    // Declaration sites were bound by the builder; export aliases carry no
    // scope and stay unbound.
    if node.assoc.get::<SymbolId>().is_some() {
      return;
    }
    let Some(&scope) = node.assoc.get::<ScopeId>() else {
      return;
    };
    let loc = node.loc;
    let name = node.stx.name.clone();
    self.resolve(scope, &name, loc, &mut node.assoc);
  }

  fn enter_call_expr_node(&mut self, node: &mut CallExprNode) {
    let Some(&scope) = node.assoc.get::<ScopeId>() else {
      return;
    };
    if node.stx.optional_chaining {
      return;
    }
    let Expr::Id(id) = node.stx.callee.stx.as_ref() else {
      return;
    };
    // A direct eval can observe and introduce bindings along the entire
    // chain, even where a local `eval` shadows the global one; renaming
    // assumptions are off for all of it.
    if id.stx.name == "eval" {
      self.table.mark_eval(scope);
    }
  }

  fn enter_export_list_stmt_node(&mut self, node: &mut ExportListStmtNode) {
    let Some(&scope) = node.assoc.get::<ScopeId>() else {
      return;
    };
    if node.stx.from.is_some() {
      return;
    }
    let ExportNames::Specific(names) = &mut node.stx.names else {
      return;
    };
    for entry in names.iter_mut() {
      let ModuleExportImportName::Ident(exportable) = &entry.stx.exportable else {
        continue;
      };
      // Exporting an undeclared name is a linkage error left to the
      // bundler; nothing to bind here.
      if let Some(sym) = self.table.find_symbol(scope, exportable) {
        entry.assoc.set(sym);
        self.table.add_ref(sym, entry.loc);
        self.table.mark_enclosed(sym, scope);
      }
    }
  }
}
