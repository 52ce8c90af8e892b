use crate::symbol::LabelId;
use crate::symbol::SymbolId;
use crate::symbol::SymbolTable;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use syntax_js::ast::class_or_object::ClassOrObjKey;
use syntax_js::ast::class_or_object::ClassOrObjMemberDirectKey;
use syntax_js::ast::class_or_object::ClassOrObjVal;
use syntax_js::ast::class_or_object::ObjMember;
use syntax_js::ast::class_or_object::ObjMemberType;
use syntax_js::ast::expr::pat::ClassOrFuncName;
use syntax_js::ast::expr::pat::IdPat;
use syntax_js::ast::expr::pat::ObjPatProp;
use syntax_js::ast::expr::pat::Pat;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::expr::IdExpr;
use syntax_js::ast::import_export::ExportName;
use syntax_js::ast::import_export::ModuleExportImportName;
use syntax_js::ast::node::Node;
use syntax_js::ast::node::NodeAssocData;
use syntax_js::ast::stmt::BreakStmt;
use syntax_js::ast::stmt::ContinueStmt;
use syntax_js::ast::stmt::LabelStmt;
use syntax_js::ast::stx::TopLevel;

type BreakStmtNode = Node<BreakStmt>;
type ClassOrFuncNameNode = Node<ClassOrFuncName>;
type ContinueStmtNode = Node<ContinueStmt>;
type ExportNameNode = Node<ExportName>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type LabelStmtNode = Node<LabelStmt>;
type ObjMemberNode = Node<ObjMember>;
type ObjPatPropNode = Node<ObjPatProp>;

/// Rewrites every annotated identifier and label in the tree to its assigned
/// name. Nodes without an assigned name are left alone.
pub fn apply_renames(top: &mut Node<TopLevel>, table: &SymbolTable) {
  let mut visitor = RenameVisitor { table };
  top.drive_mut(&mut visitor);
}

#[derive(VisitorMut)]
#[visitor(
  BreakStmtNode(enter),
  ClassOrFuncNameNode(enter),
  ContinueStmtNode(enter),
  ExportNameNode(enter),
  IdExprNode(enter),
  IdPatNode(enter),
  LabelStmtNode(enter),
  ObjMemberNode(enter),
  ObjPatPropNode(enter)
)]
struct RenameVisitor<'a> {
  table: &'a SymbolTable,
}

impl<'a> RenameVisitor<'a> {
  fn renamed(&self, node_assoc: &NodeAssocData) -> Option<&'a str> {
    let &sym = node_assoc.get::<SymbolId>()?;
    self.table.symbol(sym).mangled_name.as_deref()
  }

  fn label_renamed(&self, id: LabelId) -> Option<&'a str> {
    self.table.label(id).mangled_name.as_deref()
  }

  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    if let Some(name) = self.renamed(&node.assoc) {
      node.stx.name = name.to_string();
    }
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    if let Some(name) = self.renamed(&node.assoc) {
      node.stx.name = name.to_string();
    }
  }

  fn enter_class_or_func_name_node(&mut self, node: &mut ClassOrFuncNameNode) {
    if let Some(name) = self.renamed(&node.assoc) {
      node.stx.name = name.to_string();
    }
  }

  // `{ x }` must become `{ x: a }` when `x` is renamed; the property key
  // stays put while the value identifier picks up the new name during
  // descent.
  fn enter_obj_member_node(&mut self, node: &mut ObjMemberNode) {
    let ObjMemberType::Shorthand { id } = &mut node.stx.typ else {
      return;
    };
    if self.renamed(&id.assoc).is_none() {
      return;
    }
    let placeholder = Node::new(id.loc, IdExpr {
      name: String::new(),
    });
    let id = std::mem::replace(id, placeholder);
    let key = ClassOrObjKey::Direct(Node::new(
      id.loc,
      ClassOrObjMemberDirectKey {
        key: id.stx.name.clone(),
      },
    ));
    let val = ClassOrObjVal::Prop(Some(id.wrap(Expr::Id)));
    node.stx.typ = ObjMemberType::Valued { key, val };
  }

  // `const { x } = o` must become `const { x: a } = o` when `x` is renamed.
  fn enter_obj_pat_prop_node(&mut self, node: &mut ObjPatPropNode) {
    if !node.stx.shorthand {
      return;
    }
    let renamed = match &*node.stx.target.stx {
      Pat::Id(id) => self.renamed(&id.assoc).is_some(),
      _ => false,
    };
    if renamed {
      node.stx.shorthand = false;
    }
  }

  // `export { x as a }` keeps the alias fixed and renames only the local
  // binding.
  fn enter_export_name_node(&mut self, node: &mut ExportNameNode) {
    if let Some(name) = self.renamed(&node.assoc) {
      node.stx.exportable = ModuleExportImportName::Ident(name.to_string());
    }
  }

  fn enter_label_stmt_node(&mut self, node: &mut LabelStmtNode) {
    if let Some(&id) = node.assoc.get::<LabelId>() {
      if let Some(name) = self.label_renamed(id) {
        node.stx.name = name.to_string();
      }
    }
  }

  fn enter_break_stmt_node(&mut self, node: &mut BreakStmtNode) {
    if let Some(&id) = node.assoc.get::<LabelId>() {
      if let Some(name) = self.label_renamed(id) {
        node.stx.label = Some(name.to_string());
      }
    }
  }

  fn enter_continue_stmt_node(&mut self, node: &mut ContinueStmtNode) {
    if let Some(&id) = node.assoc.get::<LabelId>() {
      if let Some(name) = self.label_renamed(id) {
        node.stx.label = Some(name.to_string());
      }
    }
  }
}
