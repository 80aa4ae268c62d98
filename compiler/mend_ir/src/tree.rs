//! Arena-backed program tree.
//!
//! The tree is the in-memory program representation that fixes read and
//! edit. Nodes live in generation-tagged slots; parents are tracked so the
//! tree can answer "is this element still part of the analyzed scope".
//!
//! Mutation after construction goes through a [`WriteScope`](crate::WriteScope),
//! which journals every slot it touches so the edit can be rolled back.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{EditError, ElementId, Generation, Span, TypeId, TypeNames};

/// Argument list of a call. Most calls have few arguments.
pub type ArgList = SmallVec<[ElementId; 4]>;

/// Expression forms the quick-fix engine understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Variable or field reference.
    Ident(String),
    /// Literal, kept as its source text.
    Literal(String),
    /// Method call: `callee(args)`.
    Call { callee: String, args: ArgList },
    /// Constructor call: `new Class(args)`.
    New { class: String, args: ArgList },
    /// Explicit conversion: `(target) operand`.
    Cast { target: TypeId, operand: ElementId },
    /// Parenthesized expression.
    Paren(ElementId),
    /// Binary operator application.
    Binary {
        op: String,
        lhs: ElementId,
        rhs: ElementId,
    },
}

impl NodeKind {
    /// Direct children in source order.
    pub fn children(&self) -> ArgList {
        match self {
            NodeKind::Ident(_) | NodeKind::Literal(_) => ArgList::new(),
            NodeKind::Call { args, .. } | NodeKind::New { args, .. } => args.clone(),
            NodeKind::Cast { operand, .. } => smallvec::smallvec![*operand],
            NodeKind::Paren(inner) => smallvec::smallvec![*inner],
            NodeKind::Binary { lhs, rhs, .. } => smallvec::smallvec![*lhs, *rhs],
        }
    }

    /// Argument list, if this is a method or constructor call.
    pub fn args(&self) -> Option<&[ElementId]> {
        match self {
            NodeKind::Call { args, .. } | NodeKind::New { args, .. } => Some(args),
            _ => None,
        }
    }

    /// Whether this node needs parentheses to be the operand of a cast.
    pub fn binds_looser_than_cast(&self) -> bool {
        matches!(self, NodeKind::Binary { .. })
    }

    /// Swap `old` for `new` among the children. Returns false if `old`
    /// is not a child.
    fn replace_child(&mut self, old: ElementId, new: ElementId) -> bool {
        let slot = match self {
            NodeKind::Ident(_) | NodeKind::Literal(_) => None,
            NodeKind::Call { args, .. } | NodeKind::New { args, .. } => {
                args.iter_mut().find(|a| **a == old)
            }
            NodeKind::Cast { operand, .. } => Some(operand).filter(|o| **o == old),
            NodeKind::Paren(inner) => Some(inner).filter(|i| **i == old),
            NodeKind::Binary { lhs, rhs, .. } => {
                if *lhs == old {
                    Some(lhs)
                } else if *rhs == old {
                    Some(rhs)
                } else {
                    None
                }
            }
        };
        if let Some(child) = slot {
            *child = new;
            true
        } else {
            false
        }
    }

    /// Remove `child` from an argument list. Only calls have removable
    /// children; every other form requires its operands.
    fn remove_child(&mut self, child: ElementId) -> bool {
        match self {
            NodeKind::Call { args, .. } | NodeKind::New { args, .. } => {
                if let Some(pos) = args.iter().position(|a| *a == child) {
                    args.remove(pos);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}

/// A node with its analyzed static type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Static type assigned by the analyzer (or by the edit that made it).
    pub ty: TypeId,
    pub span: Span,
    parent: Option<ElementId>,
}

impl Node {
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Undo record for an open write scope.
#[derive(Clone, Debug)]
struct Journal {
    len: usize,
    roots: Vec<ElementId>,
    saved: FxHashMap<usize, Slot>,
}

/// The program representation.
#[derive(Clone, Debug, Default)]
pub struct ProgramTree {
    slots: Vec<Slot>,
    roots: Vec<ElementId>,
    generation: Generation,
    journal: Option<Journal>,
}

impl ProgramTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node while building the tree.
    ///
    /// Children named by `kind` are re-parented to the new node.
    pub fn push(&mut self, kind: NodeKind, ty: TypeId, span: Span) -> ElementId {
        let children = kind.children();
        let id = self.insert(kind, ty, span);
        for child in children {
            self.set_parent(child, Some(id));
        }
        id
    }

    /// Mark a node as a root of the analyzed scope.
    pub fn add_root(&mut self, id: ElementId) {
        self.roots.push(id);
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Look up a node if the handle is still valid.
    pub fn get(&self, id: ElementId) -> Option<&Node> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    /// Look up a node, failing on a stale handle.
    pub fn node(&self, id: ElementId) -> Result<&Node, EditError> {
        self.get(id).ok_or(EditError::InvalidElement(id))
    }

    /// The handle refers to a live node (not deleted, not a reused slot).
    pub fn is_valid(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// The node is live and still reachable from an analyzed root.
    pub fn is_in_scope(&self, id: ElementId) -> bool {
        let mut current = id;
        // A path longer than the arena means a parent cycle; treat as detached.
        for _ in 0..=self.slots.len() {
            let Some(node) = self.get(current) else {
                return false;
            };
            match node.parent {
                Some(parent) => current = parent,
                None => return self.roots.contains(&current),
            }
        }
        false
    }

    /// Static type of a live node.
    pub fn type_of(&self, id: ElementId) -> Option<TypeId> {
        self.get(id).map(|node| node.ty)
    }

    /// Arguments of a method or constructor call.
    pub fn args(&self, call: ElementId) -> Result<&[ElementId], EditError> {
        self.node(call)?
            .kind
            .args()
            .ok_or(EditError::NotACall(call))
    }

    /// Argument `index` of a call.
    pub fn arg(&self, call: ElementId, index: usize) -> Result<ElementId, EditError> {
        let args = self.args(call)?;
        args.get(index)
            .copied()
            .ok_or(EditError::ArgumentOutOfRange {
                call,
                index,
                len: args.len(),
            })
    }

    /// Render a subtree as source text.
    pub fn render(&self, id: ElementId, names: &dyn TypeNames) -> String {
        let mut out = String::new();
        self.render_into(id, names, &mut out);
        out
    }

    fn render_into(&self, id: ElementId, names: &dyn TypeNames, out: &mut String) {
        let Some(node) = self.get(id) else {
            out.push_str("<invalid>");
            return;
        };
        match &node.kind {
            NodeKind::Ident(text) | NodeKind::Literal(text) => out.push_str(text),
            NodeKind::Call { callee, args } => {
                out.push_str(callee);
                self.render_args(args, names, out);
            }
            NodeKind::New { class, args } => {
                out.push_str("new ");
                out.push_str(class);
                self.render_args(args, names, out);
            }
            NodeKind::Cast { target, operand } => {
                out.push('(');
                out.push_str(&names.type_name(*target));
                out.push_str(") ");
                self.render_into(*operand, names, out);
            }
            NodeKind::Paren(inner) => {
                out.push('(');
                self.render_into(*inner, names, out);
                out.push(')');
            }
            NodeKind::Binary { op, lhs, rhs } => {
                self.render_into(*lhs, names, out);
                out.push(' ');
                out.push_str(op);
                out.push(' ');
                self.render_into(*rhs, names, out);
            }
        }
    }

    fn render_args(&self, args: &[ElementId], names: &dyn TypeNames, out: &mut String) {
        out.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.render_into(*arg, names, out);
        }
        out.push(')');
    }

    // Mutation internals. Every slot write goes through `touch` first so an
    // open journal can restore it.

    fn insert(&mut self, kind: NodeKind, ty: TypeId, span: Span) -> ElementId {
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            node: Some(Node {
                kind,
                ty,
                span,
                parent: None,
            }),
        });
        ElementId::new(index, 0)
    }

    fn touch(&mut self, index: usize) {
        if let Some(journal) = self.journal.as_mut() {
            if index < journal.len {
                let slots = &self.slots;
                journal
                    .saved
                    .entry(index)
                    .or_insert_with(|| slots[index].clone());
            }
        }
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node, EditError> {
        if !self.is_valid(id) {
            return Err(EditError::InvalidElement(id));
        }
        self.touch(id.index());
        self.slots
            .get_mut(id.index())
            .and_then(|slot| slot.node.as_mut())
            .ok_or(EditError::InvalidElement(id))
    }

    fn set_parent(&mut self, id: ElementId, parent: Option<ElementId>) {
        if let Ok(node) = self.node_mut(id) {
            node.parent = parent;
        }
    }

    /// Point every child inside `root`'s subtree at its parent.
    fn adopt_subtree(&mut self, root: ElementId) {
        let mut stack = vec![root];
        let mut budget = self.slots.len();
        while let Some(id) = stack.pop() {
            if budget == 0 {
                break;
            }
            budget -= 1;
            let Some(node) = self.get(id) else { continue };
            for child in node.kind.children() {
                self.set_parent(child, Some(id));
                stack.push(child);
            }
        }
    }

    /// Whether `needle` occurs in the subtree rooted at `root`.
    fn subtree_contains(&self, root: ElementId, needle: ElementId) -> bool {
        let mut stack = vec![root];
        let mut budget = self.slots.len();
        while let Some(id) = stack.pop() {
            if id == needle {
                return true;
            }
            if budget == 0 {
                return true;
            }
            budget -= 1;
            if let Some(node) = self.get(id) {
                stack.extend(node.kind.children());
            }
        }
        false
    }

    fn kill(&mut self, id: ElementId) {
        if !self.is_valid(id) {
            return;
        }
        self.touch(id.index());
        if let Some(slot) = self.slots.get_mut(id.index()) {
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
        }
    }

    pub(crate) fn begin_journal(&mut self) {
        self.journal = Some(Journal {
            len: self.slots.len(),
            roots: self.roots.clone(),
            saved: FxHashMap::default(),
        });
    }

    pub(crate) fn commit_journal(&mut self) -> Generation {
        self.journal = None;
        self.generation = self.generation.next();
        self.generation
    }

    pub(crate) fn rollback_journal(&mut self) {
        if let Some(journal) = self.journal.take() {
            self.slots.truncate(journal.len);
            for (index, slot) in journal.saved {
                self.slots[index] = slot;
            }
            self.roots = journal.roots;
        }
    }

    // Edit primitives, reachable only through `WriteScope`.

    pub(crate) fn alloc(
        &mut self,
        kind: NodeKind,
        ty: TypeId,
        span: Span,
    ) -> Result<ElementId, EditError> {
        if let Some(bad) = kind.children().into_iter().find(|c| !self.is_valid(*c)) {
            return Err(EditError::InvalidElement(bad));
        }
        Ok(self.insert(kind, ty, span))
    }

    /// Allocated nodes are not linked to their children until they are
    /// placed with `replace`; `old` keeps its position until then.
    pub(crate) fn replace(&mut self, old: ElementId, new: ElementId) -> Result<(), EditError> {
        let parent = self.node(old)?.parent;
        self.node(new)?;
        if let Some(parent) = parent {
            if self.subtree_contains(new, parent) {
                return Err(EditError::Cycle { parent, child: new });
            }
            if !self.node_mut(parent)?.kind.replace_child(old, new) {
                return Err(EditError::NotAChild { parent, child: old });
            }
            self.set_parent(new, Some(parent));
            self.adopt_subtree(new);
            // `old` stays attached only if `new` wraps it.
            if self.node(old)?.parent == Some(parent) {
                self.set_parent(old, None);
            }
        } else {
            let pos = self
                .roots
                .iter()
                .position(|r| *r == old)
                .ok_or(EditError::Detached(old))?;
            self.roots[pos] = new;
            self.set_parent(new, None);
            self.adopt_subtree(new);
        }
        Ok(())
    }

    pub(crate) fn delete(&mut self, id: ElementId) -> Result<(), EditError> {
        if let Some(parent) = self.node(id)?.parent {
            if !self.node_mut(parent)?.kind.remove_child(id) {
                return Err(EditError::RequiredChild { parent, child: id });
            }
        } else {
            let pos = self
                .roots
                .iter()
                .position(|r| *r == id)
                .ok_or(EditError::Detached(id))?;
            self.roots.remove(pos);
        }
        self.kill(id);
        Ok(())
    }
}
