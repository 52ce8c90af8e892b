use crate::error::ScopeError;
use crate::error::ScopeErrorType;
use crate::error::ScopeResult;
use crate::symbol::DeclKind;
use crate::symbol::ExportMode;
use crate::symbol::LabelId;
use crate::symbol::ScopeId;
use crate::symbol::ScopeType;
use crate::symbol::SymbolId;
use crate::symbol::SymbolTable;
use syntax_js::ast::class_or_object::ClassMember;
use syntax_js::ast::class_or_object::ClassOrObjKey;
use syntax_js::ast::class_or_object::ClassOrObjVal;
use syntax_js::ast::class_or_object::ObjMember;
use syntax_js::ast::class_or_object::ObjMemberType;
use syntax_js::ast::expr::pat::ArrPat;
use syntax_js::ast::expr::pat::ClassOrFuncName;
use syntax_js::ast::expr::pat::IdPat;
use syntax_js::ast::expr::pat::ObjPat;
use syntax_js::ast::expr::pat::ObjPatProp;
use syntax_js::ast::expr::pat::Pat;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::func::Func;
use syntax_js::ast::func::FuncBody;
use syntax_js::ast::import_export::ImportNames;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::ParamDecl;
use syntax_js::ast::stmt::decl::PatDecl;
use syntax_js::ast::stmt::decl::VarDecl;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::BlockStmt;
use syntax_js::ast::stmt::ForInOfLhs;
use syntax_js::ast::stmt::ForInit;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::loc::Loc;

/// Traversal context for one point of the walk. Passed by value so callers
/// keep theirs untouched across recursive descent.
#[derive(Clone, Copy)]
struct Ctx {
  /// Current lexical scope.
  scope: ScopeId,
  /// Nearest enclosing function-like scope; hoisting target.
  defun: ScopeId,
}

/// First pass. Builds the scope tree, registers every declaration, binds
/// labels, and annotates nodes with the scope they belong to so the resolver
/// can run as a flat visitor afterwards.
pub struct ScopeBuilder<'a> {
  table: &'a mut SymbolTable,
  /// One frame per enclosing function; labels never cross function bounds.
  label_frames: Vec<Vec<(String, LabelId)>>,
}

impl<'a> ScopeBuilder<'a> {
  pub fn new(table: &'a mut SymbolTable) -> ScopeBuilder<'a> {
    ScopeBuilder {
      table,
      label_frames: Vec::new(),
    }
  }

  pub fn build(&mut self, top: &mut Node<TopLevel>) -> ScopeResult<()> {
    let scope = self.table.top_scope();
    top.assoc.set(scope);
    let ctx = Ctx {
      scope,
      defun: scope,
    };
    self.label_frames.push(Vec::new());
    for stmt in top.stx.body.iter_mut() {
      self.stmt(ctx, stmt)?;
    }
    self.label_frames.pop();
    Ok(())
  }

  fn require_top_level(&self, ctx: Ctx, loc: Loc) -> ScopeResult<()> {
    if ctx.scope != self.table.top_scope() {
      return Err(ScopeError::new(ScopeErrorType::MisplacedModuleSyntax, loc));
    }
    Ok(())
  }

  fn stmt(&mut self, ctx: Ctx, n: &mut Node<Stmt>) -> ScopeResult<()> {
    match n.stx.as_mut() {
      Stmt::Block(node) => {
        let scope = self.table.create_scope(ctx.scope, ScopeType::Block);
        node.assoc.set(scope);
        let ctx = Ctx { scope, ..ctx };
        for stmt in node.stx.body.iter_mut() {
          self.stmt(ctx, stmt)?;
        }
        Ok(())
      }
      Stmt::Break(node) => {
        if let Some(label) = node.stx.label.clone() {
          let id = self.lookup_label(&label, node.loc)?;
          node.assoc.set(id);
          self.table.add_label_ref(id, node.loc);
        }
        Ok(())
      }
      Stmt::Continue(node) => {
        if let Some(label) = node.stx.label.clone() {
          let id = self.lookup_label(&label, node.loc)?;
          node.assoc.set(id);
          self.table.add_label_ref(id, node.loc);
        }
        Ok(())
      }
      Stmt::Debugger(_) | Stmt::Empty(_) => Ok(()),
      Stmt::DoWhile(node) => {
        self.stmt(ctx, &mut node.stx.body)?;
        self.expr(ctx, &mut node.stx.condition)
      }
      Stmt::ExportDefaultExpr(node) => {
        self.require_top_level(ctx, node.loc)?;
        self.expr(ctx, &mut node.stx.expression)
      }
      Stmt::ExportList(node) => {
        self.require_top_level(ctx, node.loc)?;
        // Exportable names are references, resolved in the second pass.
        // Aliases are the outward-facing names and are never annotated, so
        // later passes know to leave them alone.
        node.assoc.set(ctx.scope);
        Ok(())
      }
      Stmt::Expr(node) => self.expr(ctx, &mut node.stx.expr),
      Stmt::ForIn(node) => {
        let scope = self.table.create_scope(ctx.scope, ScopeType::Block);
        node.assoc.set(scope);
        let ctx = Ctx { scope, ..ctx };
        self.for_lhs(ctx, &mut node.stx.lhs)?;
        self.expr(ctx, &mut node.stx.rhs)?;
        for stmt in node.stx.body.stx.body.iter_mut() {
          self.stmt(ctx, stmt)?;
        }
        Ok(())
      }
      Stmt::ForOf(node) => {
        let scope = self.table.create_scope(ctx.scope, ScopeType::Block);
        node.assoc.set(scope);
        let ctx = Ctx { scope, ..ctx };
        self.for_lhs(ctx, &mut node.stx.lhs)?;
        self.expr(ctx, &mut node.stx.rhs)?;
        for stmt in node.stx.body.stx.body.iter_mut() {
          self.stmt(ctx, stmt)?;
        }
        Ok(())
      }
      Stmt::ForTriple(node) => {
        let scope = self.table.create_scope(ctx.scope, ScopeType::Block);
        node.assoc.set(scope);
        let ctx = Ctx { scope, ..ctx };
        match &mut node.stx.init {
          ForInit::None => {}
          ForInit::Expr(expr) => self.expr(ctx, expr)?,
          ForInit::Decl(decl) => self.var_decl(ctx, decl)?,
        };
        if let Some(condition) = &mut node.stx.condition {
          self.expr(ctx, condition)?;
        }
        if let Some(post) = &mut node.stx.post {
          self.expr(ctx, post)?;
        }
        for stmt in node.stx.body.stx.body.iter_mut() {
          self.stmt(ctx, stmt)?;
        }
        Ok(())
      }
      Stmt::If(node) => {
        self.expr(ctx, &mut node.stx.test)?;
        self.stmt(ctx, &mut node.stx.consequent)?;
        if let Some(alternate) = &mut node.stx.alternate {
          self.stmt(ctx, alternate)?;
        }
        Ok(())
      }
      Stmt::Import(node) => {
        self.require_top_level(ctx, node.loc)?;
        if let Some(default) = &mut node.stx.default {
          self.pat_decl(ctx, DeclKind::Import, default, ExportMode::None)?;
        }
        match &mut node.stx.names {
          None => {}
          Some(ImportNames::All(alias)) => {
            self.pat_decl(ctx, DeclKind::Import, alias, ExportMode::None)?;
          }
          Some(ImportNames::Specific(names)) => {
            for name in names.iter_mut() {
              self.pat_decl(ctx, DeclKind::Import, &mut name.stx.alias, ExportMode::None)?;
            }
          }
        };
        Ok(())
      }
      Stmt::Label(node) => {
        let name = node.stx.name.clone();
        let frame = self.label_frames.last().expect("label frame");
        if frame.iter().any(|(n, _)| *n == name) {
          return Err(ScopeError::new(ScopeErrorType::DuplicateLabel, node.loc));
        }
        let id = self.table.create_label(name.clone(), node.loc);
        node.assoc.set(id);
        self.label_frames.last_mut().expect("label frame").push((name, id));
        let res = self.stmt(ctx, &mut node.stx.statement);
        self.label_frames.last_mut().expect("label frame").pop();
        res
      }
      Stmt::Return(node) => {
        if let Some(value) = &mut node.stx.value {
          self.expr(ctx, value)?;
        }
        Ok(())
      }
      Stmt::Switch(node) => {
        // The discriminant lexically belongs to the surrounding scope; only
        // the branches live in the switch's own block scope.
        self.expr(ctx, &mut node.stx.test)?;
        let scope = self.table.create_scope(ctx.scope, ScopeType::Block);
        node.assoc.set(scope);
        let ctx = Ctx { scope, ..ctx };
        for branch in node.stx.branches.iter_mut() {
          if let Some(case) = &mut branch.stx.case {
            self.expr(ctx, case)?;
          }
          for stmt in branch.stx.body.iter_mut() {
            self.stmt(ctx, stmt)?;
          }
        }
        Ok(())
      }
      Stmt::Throw(node) => self.expr(ctx, &mut node.stx.value),
      Stmt::Try(node) => {
        self.bare_block(ctx, &mut node.stx.wrapped)?;
        if let Some(catch) = &mut node.stx.catch {
          // Chains to the scope surrounding the try, not the try body.
          let scope = self.table.create_scope(ctx.scope, ScopeType::Block);
          catch.assoc.set(scope);
          let cctx = Ctx { scope, ..ctx };
          if let Some(parameter) = &mut catch.stx.parameter {
            self.pat_decl(cctx, DeclKind::CatchParam, parameter, ExportMode::None)?;
          }
          for stmt in catch.stx.body.iter_mut() {
            self.stmt(cctx, stmt)?;
          }
        }
        if let Some(finally) = &mut node.stx.finally {
          self.bare_block(ctx, finally)?;
        }
        Ok(())
      }
      Stmt::While(node) => {
        self.expr(ctx, &mut node.stx.condition)?;
        self.stmt(ctx, &mut node.stx.body)
      }
      Stmt::With(node) => {
        self.table.mark_with(ctx.scope);
        self.expr(ctx, &mut node.stx.object)?;
        self.stmt(ctx, &mut node.stx.body)
      }
      Stmt::ClassDecl(node) => {
        let export = self.export_mode(ctx, node.stx.export, node.stx.export_default, node.loc)?;
        if let Some(name) = &mut node.stx.name {
          self.declare_name(ctx, DeclKind::ClassName, name, export)?;
        }
        let scope = self.table.create_scope(ctx.scope, ScopeType::Class);
        node.assoc.set(scope);
        let cctx = Ctx {
          scope,
          defun: scope,
        };
        if let Some(extends) = &mut node.stx.extends {
          self.expr(cctx, extends)?;
        }
        for member in node.stx.members.iter_mut() {
          self.class_member(cctx, member)?;
        }
        Ok(())
      }
      Stmt::FunctionDecl(node) => {
        let export = self.export_mode(ctx, node.stx.export, node.stx.export_default, node.loc)?;
        if let Some(name) = &mut node.stx.name {
          self.declare_name(ctx, DeclKind::FuncName, name, export)?;
        }
        self.func(ctx, &mut node.stx.function, None)?;
        Ok(())
      }
      Stmt::VarDecl(node) => self.var_decl(ctx, node),
    }
  }

  fn bare_block(&mut self, ctx: Ctx, n: &mut Node<BlockStmt>) -> ScopeResult<()> {
    let scope = self.table.create_scope(ctx.scope, ScopeType::Block);
    n.assoc.set(scope);
    let ctx = Ctx { scope, ..ctx };
    for stmt in n.stx.body.iter_mut() {
      self.stmt(ctx, stmt)?;
    }
    Ok(())
  }

  fn export_mode(
    &self,
    ctx: Ctx,
    export: bool,
    export_default: bool,
    loc: Loc,
  ) -> ScopeResult<ExportMode> {
    if !export {
      return Ok(ExportMode::None);
    }
    self.require_top_level(ctx, loc)?;
    // A default-exported declaration stays renamable: consumers bind the
    // export slot, not the identifier.
    Ok(if export_default {
      ExportMode::Renamable
    } else {
      ExportMode::FixedName
    })
  }

  fn lookup_label(&self, name: &str, loc: Loc) -> ScopeResult<LabelId> {
    let frame = self.label_frames.last().expect("label frame");
    frame
      .iter()
      .rev()
      .find(|(n, _)| n == name)
      .map(|(_, id)| *id)
      .ok_or_else(|| ScopeError::new(ScopeErrorType::UndefinedLabel, loc))
  }

  fn var_decl(&mut self, ctx: Ctx, node: &mut Node<VarDecl>) -> ScopeResult<()> {
    let export = self.export_mode(ctx, node.stx.export, false, node.loc)?;
    let kind = match node.stx.mode {
      VarDeclMode::Const => DeclKind::Const,
      VarDeclMode::Let => DeclKind::Let,
      VarDeclMode::Var => DeclKind::Var,
    };
    for declarator in node.stx.declarators.iter_mut() {
      self.pat_decl(ctx, kind, &mut declarator.pattern, export)?;
      if let Some(initializer) = &mut declarator.initializer {
        if matches!(initializer.stx.as_ref(), Expr::Func(_) | Expr::Arrow(_)) {
          // `var f = function() {}` participates in function name keeping.
          if let Pat::Id(id) = declarator.pattern.stx.pat.stx.as_ref() {
            if let Some(&sym) = id.assoc.get::<SymbolId>() {
              self.table.symbol_mut(sym).init_is_func = true;
            }
          }
        }
        self.expr(ctx, initializer)?;
      }
    }
    Ok(())
  }

  fn for_lhs(&mut self, ctx: Ctx, lhs: &mut ForInOfLhs) -> ScopeResult<()> {
    match lhs {
      ForInOfLhs::Decl(decl) => self.var_decl(ctx, decl),
      ForInOfLhs::Pat(pat) => self.target_pat(ctx, pat),
    }
  }

  fn pat_decl(
    &mut self,
    ctx: Ctx,
    kind: DeclKind,
    n: &mut Node<PatDecl>,
    export: ExportMode,
  ) -> ScopeResult<()> {
    self.decl_pat(ctx, kind, &mut n.stx.pat, export)
  }

  fn decl_pat(
    &mut self,
    ctx: Ctx,
    kind: DeclKind,
    n: &mut Node<Pat>,
    export: ExportMode,
  ) -> ScopeResult<()> {
    match n.stx.as_mut() {
      Pat::Id(id) => {
        self.declare_id(ctx, kind, id, export)?;
      }
      Pat::Arr(arr) => {
        for elem in arr.stx.elements.iter_mut().flatten() {
          self.decl_pat(ctx, kind, &mut elem.target, export)?;
          if let Some(default_value) = &mut elem.default_value {
            self.expr(ctx, default_value)?;
          }
        }
        if let Some(rest) = &mut arr.stx.rest {
          self.decl_pat(ctx, kind, rest, export)?;
        }
      }
      Pat::Obj(obj) => {
        for prop in obj.stx.properties.iter_mut() {
          let ObjPatProp {
            key,
            target,
            default_value,
            ..
          } = prop.stx.as_mut();
          if let ClassOrObjKey::Computed(expr) = key {
            self.expr(ctx, expr)?;
          }
          self.decl_pat(ctx, kind, target, export)?;
          if let Some(default_value) = default_value {
            self.expr(ctx, default_value)?;
          }
        }
        if let Some(rest) = &mut obj.stx.rest {
          self.declare_id(ctx, kind, rest, export)?;
        }
      }
    };
    Ok(())
  }

  /// Declares one identifier, hoisting `var` to the enclosing function
  /// scope. A hoisted declaration inside a block may be shadowed by a
  /// block-scoped binding in between; then the declaration node rebinds to
  /// the shadowing symbol, counting as a use of it.
  fn declare_id(
    &mut self,
    ctx: Ctx,
    kind: DeclKind,
    id: &mut Node<IdPat>,
    export: ExportMode,
  ) -> ScopeResult<SymbolId> {
    let hoist = kind == DeclKind::Var;
    let target = if hoist { ctx.defun } else { ctx.scope };
    let sym = self.table.def_variable(target, &id.stx.name, kind, id.loc)?;
    if export != ExportMode::None {
      self.table.symbol_mut(sym).export = export;
    }
    id.assoc.set(ctx.scope);
    let bound = self.rebind_if_shadowed(ctx, target, &id.stx.name, sym, id.loc);
    id.assoc.set(bound);
    Ok(bound)
  }

  /// Same as [Self::declare_id] but for the name node of a function or class
  /// declaration/expression.
  fn declare_name(
    &mut self,
    ctx: Ctx,
    kind: DeclKind,
    name: &mut Node<ClassOrFuncName>,
    export: ExportMode,
  ) -> ScopeResult<SymbolId> {
    let target = match kind {
      DeclKind::FuncName | DeclKind::ClassName => ctx.defun,
      _ => ctx.scope,
    };
    let sym = match kind {
      DeclKind::FuncName => self.table.def_function(target, &name.stx.name, name.loc)?,
      _ => self.table.def_variable(target, &name.stx.name, kind, name.loc)?,
    };
    if export != ExportMode::None {
      self.table.symbol_mut(sym).export = export;
    }
    name.assoc.set(ctx.scope);
    let bound = self.rebind_if_shadowed(ctx, target, &name.stx.name, sym, name.loc);
    name.assoc.set(bound);
    Ok(bound)
  }

  fn rebind_if_shadowed(
    &mut self,
    ctx: Ctx,
    target: ScopeId,
    name: &str,
    sym: SymbolId,
    loc: Loc,
  ) -> SymbolId {
    if target == ctx.scope {
      return sym;
    }
    self.table.mark_enclosed(sym, ctx.scope);
    match self.table.find_symbol(ctx.scope, name) {
      Some(visible) if visible != sym => {
        self.table.add_ref(visible, loc);
        self.table.mark_enclosed(visible, ctx.scope);
        visible
      }
      _ => sym,
    }
  }

  /// Assignment-target pattern outside a declaration; identifiers here are
  /// references for the resolver to bind.
  fn target_pat(&mut self, ctx: Ctx, n: &mut Node<Pat>) -> ScopeResult<()> {
    match n.stx.as_mut() {
      Pat::Id(id) => {
        id.assoc.set(ctx.scope);
      }
      Pat::Arr(arr) => {
        self.target_arr_pat(ctx, arr)?;
      }
      Pat::Obj(obj) => {
        self.target_obj_pat(ctx, obj)?;
      }
    };
    Ok(())
  }

  fn target_arr_pat(&mut self, ctx: Ctx, arr: &mut Node<ArrPat>) -> ScopeResult<()> {
    for elem in arr.stx.elements.iter_mut().flatten() {
      self.target_pat(ctx, &mut elem.target)?;
      if let Some(default_value) = &mut elem.default_value {
        self.expr(ctx, default_value)?;
      }
    }
    if let Some(rest) = &mut arr.stx.rest {
      self.target_pat(ctx, rest)?;
    }
    Ok(())
  }

  fn target_obj_pat(&mut self, ctx: Ctx, obj: &mut Node<ObjPat>) -> ScopeResult<()> {
    for prop in obj.stx.properties.iter_mut() {
      let ObjPatProp {
        key,
        target,
        default_value,
        ..
      } = prop.stx.as_mut();
      if let ClassOrObjKey::Computed(expr) = key {
        self.expr(ctx, expr)?;
      }
      self.target_pat(ctx, target)?;
      if let Some(default_value) = default_value {
        self.expr(ctx, default_value)?;
      }
    }
    if let Some(rest) = &mut obj.stx.rest {
      rest.assoc.set(ctx.scope);
    }
    Ok(())
  }

  fn func(
    &mut self,
    ctx: Ctx,
    n: &mut Node<Func>,
    fn_expr_name: Option<&mut Node<ClassOrFuncName>>,
  ) -> ScopeResult<ScopeId> {
    let scope = self.table.create_scope(ctx.scope, ScopeType::Closure);
    self.table.scope_mut(scope).is_arrow = n.stx.arrow;
    n.assoc.set(scope);
    let fctx = Ctx {
      scope,
      defun: scope,
    };
    self.label_frames.push(Vec::new());
    if let Some(name) = fn_expr_name {
      // A function expression's name binds inside its own scope only.
      let sym =
        self
          .table
          .def_variable(scope, &name.stx.name, DeclKind::FuncExprName, name.loc)?;
      name.assoc.set(scope);
      name.assoc.set(sym);
      self.table.scope_mut(scope).fn_expr_name = Some(sym);
    }
    if !n.stx.arrow {
      // Implicit binding every ordinary function carries.
      self
        .table
        .def_variable(scope, "arguments", DeclKind::Param, Loc::UNKNOWN)?;
    }
    let Func {
      parameters, body, ..
    } = n.stx.as_mut();
    for param in parameters.iter_mut() {
      let ParamDecl {
        pattern,
        default_value,
        ..
      } = param.stx.as_mut();
      self.pat_decl(fctx, DeclKind::Param, pattern, ExportMode::None)?;
      if let Some(default_value) = default_value {
        self.expr(fctx, default_value)?;
      }
    }
    match body {
      FuncBody::Block(stmts) => {
        for stmt in stmts.iter_mut() {
          self.stmt(fctx, stmt)?;
        }
      }
      FuncBody::Expression(expr) => self.expr(fctx, expr)?,
    };
    self.label_frames.pop();
    Ok(scope)
  }

  fn class_member(&mut self, ctx: Ctx, member: &mut Node<ClassMember>) -> ScopeResult<()> {
    if let ClassOrObjKey::Computed(expr) = &mut member.stx.key {
      self.expr(ctx, expr)?;
    }
    match &mut member.stx.val {
      ClassOrObjVal::Prop(Some(value)) => self.expr(ctx, value)?,
      ClassOrObjVal::Prop(None) => {}
      ClassOrObjVal::Method(func) => {
        self.func(ctx, func, None)?;
      }
    };
    Ok(())
  }

  fn obj_member(&mut self, ctx: Ctx, member: &mut Node<ObjMember>) -> ScopeResult<()> {
    match &mut member.stx.typ {
      ObjMemberType::Valued { key, val } => {
        if let ClassOrObjKey::Computed(expr) = key {
          self.expr(ctx, expr)?;
        }
        match val {
          ClassOrObjVal::Prop(Some(value)) => self.expr(ctx, value)?,
          ClassOrObjVal::Prop(None) => {}
          ClassOrObjVal::Method(func) => {
            self.func(ctx, func, None)?;
          }
        };
      }
      ObjMemberType::Shorthand { id } => {
        id.assoc.set(ctx.scope);
      }
      ObjMemberType::Rest { val } => self.expr(ctx, val)?,
    };
    Ok(())
  }

  fn expr(&mut self, ctx: Ctx, n: &mut Node<Expr>) -> ScopeResult<()> {
    match n.stx.as_mut() {
      Expr::Arrow(node) => {
        let scope = self.func(ctx, &mut node.stx.func, None)?;
        node.assoc.set(scope);
      }
      Expr::Binary(node) => {
        self.expr(ctx, &mut node.stx.left)?;
        self.expr(ctx, &mut node.stx.right)?;
      }
      Expr::Call(node) => {
        // The resolver needs the call's scope for direct `eval` detection.
        node.assoc.set(ctx.scope);
        self.expr(ctx, &mut node.stx.callee)?;
        for arg in node.stx.arguments.iter_mut() {
          self.expr(ctx, &mut arg.stx.value)?;
        }
      }
      Expr::Class(node) => {
        let scope = self.table.create_scope(ctx.scope, ScopeType::Class);
        node.assoc.set(scope);
        let cctx = Ctx {
          scope,
          defun: scope,
        };
        if let Some(name) = &mut node.stx.name {
          // A class expression's name binds inside the class body only.
          self.declare_name(cctx, DeclKind::ClassExprName, name, ExportMode::None)?;
        }
        if let Some(extends) = &mut node.stx.extends {
          self.expr(cctx, extends)?;
        }
        for member in node.stx.members.iter_mut() {
          self.class_member(cctx, member)?;
        }
      }
      Expr::ComputedMember(node) => {
        self.expr(ctx, &mut node.stx.object)?;
        self.expr(ctx, &mut node.stx.member)?;
      }
      Expr::Cond(node) => {
        self.expr(ctx, &mut node.stx.test)?;
        self.expr(ctx, &mut node.stx.consequent)?;
        self.expr(ctx, &mut node.stx.alternate)?;
      }
      Expr::Func(node) => {
        let stx = node.stx.as_mut();
        let scope = self.func(ctx, &mut stx.func, stx.name.as_mut())?;
        node.assoc.set(scope);
      }
      Expr::Id(node) => {
        node.assoc.set(ctx.scope);
      }
      Expr::LitArr(node) => {
        for element in node.stx.elements.iter_mut() {
          self.expr(ctx, element)?;
        }
      }
      Expr::LitBool(_) | Expr::LitNull(_) | Expr::LitNum(_) | Expr::LitRegex(_)
      | Expr::LitStr(_) => {}
      Expr::LitObj(node) => {
        for member in node.stx.members.iter_mut() {
          self.obj_member(ctx, member)?;
        }
      }
      Expr::Member(node) => self.expr(ctx, &mut node.stx.left)?,
      Expr::Unary(node) => self.expr(ctx, &mut node.stx.argument)?,
      Expr::ArrPat(node) => self.target_arr_pat(ctx, node)?,
      Expr::IdPat(node) => {
        node.assoc.set(ctx.scope);
      }
      Expr::ObjPat(node) => self.target_obj_pat(ctx, node)?,
    };
    Ok(())
  }
}
