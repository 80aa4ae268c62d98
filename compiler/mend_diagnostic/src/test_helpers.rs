//! Shared fixtures for unit tests.

use std::sync::Arc;

use mend_ir::{ElementId, NodeKind, ProgramTree, SharedProgram, Span, TypeId, TypeNames};

use crate::{ApplyContext, ApplyError, FixAction, FixRef};

/// What a [`StubFix`] does when applied.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Behavior {
    Nothing,
    DeleteTarget,
    DeleteThenFail,
}

/// Configurable fix used to drive the registry and the applier.
#[derive(Debug)]
pub(crate) struct StubFix {
    label: String,
    target: Option<ElementId>,
    behavior: Behavior,
    read_only: bool,
}

impl StubFix {
    pub(crate) fn new(label: &str) -> Self {
        StubFix {
            label: label.to_string(),
            target: None,
            behavior: Behavior::Nothing,
            read_only: false,
        }
    }

    pub(crate) fn targeting(mut self, target: ElementId, behavior: Behavior) -> Self {
        self.target = Some(target);
        self.behavior = behavior;
        self
    }

    pub(crate) fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub(crate) fn into_ref(self) -> FixRef {
        Arc::new(self)
    }
}

impl FixAction for StubFix {
    fn describe(&self, _tree: &ProgramTree) -> String {
        self.label.clone()
    }

    fn family_key(&self) -> &str {
        "Stub"
    }

    fn is_available(&self, tree: &ProgramTree) -> bool {
        self.target.map_or(true, |target| tree.is_in_scope(target))
    }

    fn apply(&self, cx: &mut ApplyContext<'_, '_>) -> Result<(), ApplyError> {
        if !self.is_available(cx.tree()) {
            return Err(ApplyError::Stale);
        }
        let Some(target) = self.target else {
            return Ok(());
        };
        match self.behavior {
            Behavior::Nothing => Ok(()),
            Behavior::DeleteTarget => Ok(cx.edits()?.delete(target)?),
            Behavior::DeleteThenFail => {
                cx.edits()?.delete(target)?;
                Err(ApplyError::EditFailed("forced failure".to_string()))
            }
        }
    }

    fn requires_write_scope(&self) -> bool {
        !self.read_only
    }
}

pub(crate) fn stub(label: &str) -> FixRef {
    StubFix::new(label).into_ref()
}

/// Renders type ids as `T<raw>`.
pub(crate) struct Names;

impl TypeNames for Names {
    fn type_name(&self, ty: TypeId) -> String {
        format!("T{}", ty.raw())
    }
}

/// `g(x, y)` as a shared program: `(program, call, x, y)`.
pub(crate) fn call_program() -> (SharedProgram, ElementId, ElementId, ElementId) {
    let mut tree = ProgramTree::new();
    let x = tree.push(NodeKind::Ident("x".into()), TypeId::INT, Span::new(2, 3));
    let y = tree.push(NodeKind::Ident("y".into()), TypeId::INT, Span::new(5, 6));
    let call = tree.push(
        NodeKind::Call {
            callee: "g".into(),
            args: [x, y].into_iter().collect(),
        },
        TypeId::VOID,
        Span::new(0, 7),
    );
    tree.add_root(call);
    (SharedProgram::new(tree), call, x, y)
}
